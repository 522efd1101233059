//! List posts from the content repository

use anyhow::Result;
use std::io::Write;

use crate::cms::ContentSource;
use crate::pagination::PaginationState;
use crate::SpaceTraveling;

/// List posts; with `all`, follow the pagination cursor to the end
pub async fn run<S, W>(site: &SpaceTraveling, source: &S, all: bool, out: &mut W) -> Result<()>
where
    S: ContentSource + ?Sized,
    W: Write,
{
    let helpers = site.helpers();
    let first = source.query_posts(site.config.prismic.page_size).await?;
    let mut state = PaginationState::new(first);

    if all {
        while state.has_more() {
            state.load_more(source).await?;
        }
    }

    writeln!(out, "Posts ({}):", state.posts().len())?;
    for post in state.posts() {
        let date = helpers.date_or_blank(post.first_publication_date.as_deref());
        writeln!(
            out,
            "  {} - {} by {} [{}]",
            if date.is_empty() { "-" } else { date.as_str() },
            post.data.title,
            post.data.author,
            post.uid
        )?;
    }

    if state.has_more() {
        writeln!(out, "More posts available (use --all to load them)")?;
    }

    Ok(())
}

/// Print the slug of every post
pub async fn run_uids<S, W>(source: &S, out: &mut W) -> Result<()>
where
    S: ContentSource + ?Sized,
    W: Write,
{
    for uid in source.all_post_uids().await? {
        writeln!(out, "{}", uid)?;
    }
    Ok(())
}
