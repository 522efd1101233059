//! Post models

use serde::{Deserialize, Serialize};

use super::richtext::RichTextNode;

/// A post as shown in the home page list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Unique slug, used as list key and in the post URL
    pub uid: String,

    /// First publication timestamp (ISO 8601)
    pub first_publication_date: Option<String>,

    pub data: PostSummaryData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummaryData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

impl PostSummary {
    /// Create a summary from its parts
    pub fn new(
        uid: &str,
        first_publication_date: Option<&str>,
        title: &str,
        subtitle: &str,
        author: &str,
    ) -> Self {
        Self {
            uid: uid.to_string(),
            first_publication_date: first_publication_date.map(str::to_string),
            data: PostSummaryData {
                title: title.to_string(),
                subtitle: subtitle.to_string(),
                author: author.to_string(),
            },
        }
    }

    /// Navigation target for this post
    pub fn path(&self) -> String {
        post_path(&self.uid)
    }
}

/// A fully hydrated post document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetail {
    pub uid: String,
    pub first_publication_date: Option<String>,
    pub last_publication_date: Option<String>,
    pub data: PostDetailData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetailData {
    pub title: String,
    pub subtitle: Option<String>,
    pub author: String,
    pub banner: Banner,
    pub content: Vec<ContentBlock>,
}

/// Banner image reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub url: String,
    pub alt: Option<String>,
}

/// A heading followed by rich text body segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub heading: String,
    pub body: Vec<RichTextNode>,
}

impl ContentBlock {
    pub fn new(heading: &str, body: Vec<RichTextNode>) -> Self {
        Self {
            heading: heading.to_string(),
            body,
        }
    }
}

/// URL path of a post page
pub fn post_path(uid: &str) -> String {
    format!("/post/{}", uid)
}
