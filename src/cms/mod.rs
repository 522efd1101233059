//! Content repository access

mod prismic;

use async_trait::async_trait;

pub use prismic::PrismicClient;

use crate::content::PostDetail;
use crate::error::Result;
use crate::pagination::{Cursor, PostPage};

/// Where posts come from
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// First page of post summaries, newest repository order
    async fn query_posts(&self, page_size: usize) -> Result<PostPage>;

    /// Retrieve the page a `next_page` cursor points at
    async fn fetch_page(&self, cursor: &Cursor) -> Result<PostPage>;

    /// A single post by its slug
    async fn get_by_uid(&self, uid: &str) -> Result<PostDetail>;

    /// Slugs of every post, following cursors to the end
    async fn all_post_uids(&self) -> Result<Vec<String>> {
        let mut page = self.query_posts(100).await?;
        let mut uids: Vec<String> = page.results.iter().map(|p| p.uid.clone()).collect();

        while let Some(cursor) = page.next_page.take() {
            page = self.fetch_page(&cursor).await?;
            uids.extend(page.results.iter().map(|p| p.uid.clone()));
        }

        Ok(uids)
    }
}
