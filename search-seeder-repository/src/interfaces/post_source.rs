//! Paginated post reader trait definition.

use async_trait::async_trait;
use search_seeder_shared::PostRecord;

use crate::errors::SourceError;

/// Reads posts, with all of their associations, from the relational store.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch one page of posts ordered by creation time ascending.
    ///
    /// The order must be stable across calls so that consecutive pages
    /// neither skip nor repeat rows while the source is not written to.
    ///
    /// # Arguments
    ///
    /// * `offset` - Number of posts to skip
    /// * `limit` - Maximum number of posts to return
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<PostRecord>)` - The page, empty once the data is exhausted
    /// * `Err(SourceError)` - If the query fails
    async fn fetch_page(&self, offset: usize, limit: usize)
        -> Result<Vec<PostRecord>, SourceError>;
}
