//! Helper functions for templates
//!
//! Date formatting and reading time estimation used when rendering posts.

mod date;
mod reading;

pub use date::*;
pub use reading::*;

use chrono_tz::Tz;

use crate::content::{ContentBlock, PostDetail};
use crate::error::Result;

/// Helpers bound to the site's display timezone
#[derive(Debug, Clone, Copy)]
pub struct Helpers {
    timezone: Tz,
}

impl Helpers {
    /// Create a new helpers instance
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Format a publication date for display
    pub fn date(&self, timestamp: Option<&str>) -> Result<String> {
        format_display_date(timestamp, &self.timezone)
    }

    /// Format a publication date, logging and returning an empty string when
    /// there is none to show
    pub fn date_or_blank(&self, timestamp: Option<&str>) -> String {
        self.date(timestamp).unwrap_or_else(|e| {
            tracing::warn!("{}", e);
            String::new()
        })
    }

    /// Reading time in minutes for post content
    pub fn reading_minutes(&self, content: &[ContentBlock]) -> u64 {
        estimate_reading_minutes(content)
    }

    /// Display header values for a post: date, author and reading time
    pub fn post_header(&self, post: &PostDetail) -> Result<(String, String, String)> {
        Ok((
            self.date(post.first_publication_date.as_deref())?,
            post.data.author.clone(),
            format!("{} min", self.reading_minutes(&post.data.content)),
        ))
    }
}
