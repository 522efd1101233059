//! Show a single post's header

use anyhow::Result;
use std::io::Write;

use crate::cms::ContentSource;
use crate::content::post_path;
use crate::SpaceTraveling;

/// Print title, date, author, reading time and section headings of a post
pub async fn run<S, W>(site: &SpaceTraveling, source: &S, slug: &str, out: &mut W) -> Result<()>
where
    S: ContentSource + ?Sized,
    W: Write,
{
    let post = source.get_by_uid(slug).await?;
    let (date, author, reading_time) = site.helpers().post_header(&post)?;

    writeln!(out, "{}", post.data.title)?;
    if let Some(subtitle) = &post.data.subtitle {
        writeln!(out, "{}", subtitle)?;
    }
    writeln!(out, "{} | {} | {}", date, author, reading_time)?;
    writeln!(out, "Path: {}", post_path(&post.uid))?;
    for block in &post.data.content {
        writeln!(out, "  # {}", block.heading)?;
    }

    Ok(())
}
