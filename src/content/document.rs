//! Raw repository documents and their mapping into post models.
//!
//! Only whitelisted fields survive the mapping. Missing required fields are
//! reported as [`Error::MalformedResponse`] instead of being left blank.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::post::{Banner, ContentBlock, PostDetail, PostDetailData, PostSummary, PostSummaryData};
use super::richtext::{self, RichTextNode};
use crate::error::{Error, Result};
use crate::pagination::{Cursor, PostPage};

/// Response body of a document search or a `next_page` URL
#[derive(Debug, Deserialize)]
pub struct RawSearchResponse {
    pub results: Vec<RawDocument>,
    #[serde(default)]
    pub next_page: Option<String>,
}

/// A document as stored in the repository
#[derive(Debug, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub first_publication_date: Option<String>,
    #[serde(default)]
    pub last_publication_date: Option<String>,
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

impl RawSearchResponse {
    /// Map a search page into post summaries.
    ///
    /// Records missing a required field are dropped with a warning so one bad
    /// document does not hide the rest of the page.
    pub fn into_page(self) -> Result<PostPage> {
        let mut results = Vec::with_capacity(self.results.len());
        for (index, doc) in self.results.into_iter().enumerate() {
            match doc.into_summary() {
                Ok(summary) => results.push(summary),
                Err(e) => tracing::warn!("Skipping post #{} in page: {}", index, e),
            }
        }

        let next_page = self
            .next_page
            .filter(|url| !url.is_empty())
            .map(|url| {
                Cursor::parse(&url).map_err(|e| {
                    Error::MalformedResponse(format!("invalid field `next_page`: {}", e))
                })
            })
            .transpose()?;

        Ok(PostPage { results, next_page })
    }
}

impl RawDocument {
    /// Extract `{uid, first_publication_date, title, subtitle, author}`
    pub fn into_summary(self) -> Result<PostSummary> {
        let uid = self.uid.ok_or_else(|| Error::missing("uid"))?;
        let data = self.data.ok_or_else(|| Error::missing("data"))?;

        Ok(PostSummary {
            uid,
            first_publication_date: self.first_publication_date,
            data: PostSummaryData {
                title: required_text(&data, "title")?,
                subtitle: optional_text(&data, "subtitle").unwrap_or_default(),
                author: required_text(&data, "author")?,
            },
        })
    }

    /// Extract the full post with banner and content blocks
    pub fn into_detail(self) -> Result<PostDetail> {
        let uid = self.uid.ok_or_else(|| Error::missing("uid"))?;
        let data = self.data.ok_or_else(|| Error::missing("data"))?;

        let banner = data
            .get("banner")
            .and_then(Value::as_object)
            .ok_or_else(|| Error::missing("data.banner"))?;
        let banner = Banner {
            url: banner
                .get("url")
                .and_then(Value::as_str)
                .ok_or_else(|| Error::missing("data.banner.url"))?
                .to_string(),
            alt: banner.get("alt").and_then(Value::as_str).map(str::to_string),
        };

        let content = data
            .get("content")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::missing("data.content"))?
            .iter()
            .enumerate()
            .map(|(i, block)| parse_block(i, block))
            .collect::<Result<Vec<_>>>()?;

        Ok(PostDetail {
            uid,
            first_publication_date: self.first_publication_date,
            last_publication_date: self.last_publication_date,
            data: PostDetailData {
                title: required_text(&data, "title")?,
                subtitle: optional_text(&data, "subtitle"),
                author: required_text(&data, "author")?,
                banner,
                content,
            },
        })
    }
}

fn parse_block(index: usize, block: &Value) -> Result<ContentBlock> {
    let heading = block
        .get("heading")
        .and_then(text_value)
        .ok_or_else(|| Error::missing(&format!("data.content[{}].heading", index)))?;

    let body_field = format!("data.content[{}].body", index);
    let body = block
        .get("body")
        .filter(|b| b.is_array())
        .ok_or_else(|| Error::missing(&body_field))?;
    let body: Vec<RichTextNode> = serde_json::from_value(body.clone())
        .map_err(|e| Error::MalformedResponse(format!("{}: {}", body_field, e)))?;

    Ok(ContentBlock { heading, body })
}

/// Accept either a plain key-text field or a rich text title array
fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(_) => serde_json::from_value::<Vec<RichTextNode>>(value.clone())
            .ok()
            .map(|nodes| richtext::as_text(&nodes)),
        _ => None,
    }
}

fn required_text(data: &Map<String, Value>, field: &str) -> Result<String> {
    data.get(field)
        .and_then(text_value)
        .ok_or_else(|| Error::missing(&format!("data.{}", field)))
}

fn optional_text(data: &Map<String, Value>, field: &str) -> Option<String> {
    data.get(field).and_then(text_value)
}
