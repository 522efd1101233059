//! Cursor pagination over the post list.
//!
//! The repository hands back an opaque `next_page` URL with every batch. A
//! [`PaginationState`] owns the posts shown so far and that cursor; batches
//! are only ever appended, in the order they arrive.

use reqwest::Url;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

use crate::cms::ContentSource;
use crate::content::PostSummary;
use crate::error::{Error, Result};

/// Opaque reference to the next batch of results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor(Url);

impl Cursor {
    /// Parse a `next_page` reference, which must be an absolute http(s) URL
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw).map_err(|e| Error::InvalidCursor(format!("{}: {}", raw, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            scheme => Err(Error::InvalidCursor(format!(
                "unsupported scheme {:?} in {}",
                scheme, raw
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn url(&self) -> &Url {
        &self.0
    }

    /// Whether the cursor points at the same scheme, host and port as `base`
    pub fn same_origin(&self, base: &Url) -> bool {
        self.0.origin() == base.origin()
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Cursor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One batch of post summaries and the cursor to the following batch
#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    pub results: Vec<PostSummary>,
    pub next_page: Option<Cursor>,
}

/// Retrieve the batch a cursor points at.
///
/// Performs a single retrieval with no retry; the caller decides what to do
/// with failures and owns the list the batch is appended to.
pub async fn load_next_page<S>(source: &S, cursor: &Cursor) -> Result<PostPage>
where
    S: ContentSource + ?Sized,
{
    tracing::debug!("Loading next page: {}", cursor);
    let page = source.fetch_page(cursor).await?;
    tracing::debug!(
        "Loaded {} posts (more: {})",
        page.results.len(),
        page.next_page.is_some()
    );
    Ok(page)
}

/// Posts shown so far plus the cursor to the next batch
#[derive(Debug, Clone)]
pub struct PaginationState {
    posts: Vec<PostSummary>,
    seen: HashSet<String>,
    cursor: Option<Cursor>,
    in_flight: bool,
}

impl PaginationState {
    /// Start a session from the initially fetched page
    pub fn new(initial: PostPage) -> Self {
        let mut state = Self {
            posts: Vec::with_capacity(initial.results.len()),
            seen: HashSet::new(),
            cursor: None,
            in_flight: false,
        };
        state.append(initial);
        state
    }

    /// Posts in display order
    pub fn posts(&self) -> &[PostSummary] {
        &self.posts
    }

    pub fn into_posts(self) -> Vec<PostSummary> {
        self.posts
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// Whether the "load more" control should be offered
    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Claim the next load.
    ///
    /// Returns `None` when the list is exhausted or a load is already in
    /// flight; a trigger in either state is a no-op.
    pub fn begin_load(&mut self) -> Option<Cursor> {
        if self.in_flight {
            tracing::debug!("Ignoring load request: a load is already in flight");
            return None;
        }
        let cursor = self.cursor.clone()?;
        self.in_flight = true;
        Some(cursor)
    }

    /// Complete a load claimed with [`begin_load`](Self::begin_load).
    ///
    /// On success the batch is appended and the cursor replaced, returning the
    /// number of posts added. On failure the cursor is kept so the load can be
    /// triggered again.
    pub fn finish_load(&mut self, result: Result<PostPage>) -> Result<usize> {
        self.in_flight = false;
        let page = result?;
        Ok(self.append(page))
    }

    /// Load the next batch from `source`, if any
    pub async fn load_more<S>(&mut self, source: &S) -> Result<usize>
    where
        S: ContentSource + ?Sized,
    {
        let Some(cursor) = self.begin_load() else {
            return Ok(0);
        };
        let result = load_next_page(source, &cursor).await;
        self.finish_load(result)
    }

    fn append(&mut self, page: PostPage) -> usize {
        let before = self.posts.len();
        for post in page.results {
            if self.seen.insert(post.uid.clone()) {
                self.posts.push(post);
            } else {
                tracing::warn!("Dropping duplicate post {:?} from page", post.uid);
            }
        }
        self.cursor = page.next_page;
        self.posts.len() - before
    }
}
