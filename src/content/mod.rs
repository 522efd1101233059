//! Content module - post models, repository documents and rich text

pub mod document;
mod post;
pub mod richtext;

pub use document::{RawDocument, RawSearchResponse};
pub use post::{
    post_path, Banner, ContentBlock, PostDetail, PostDetailData, PostSummary, PostSummaryData,
};
pub use richtext::RichTextNode;
