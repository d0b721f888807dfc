//! Cache-backed set trait definition.

use async_trait::async_trait;

use crate::errors::CacheError;

/// A set store in the cache, addressed by key.
#[async_trait]
pub trait UsernameSetStore: Send + Sync {
    /// Number of members in the set stored at `key` (0 if it does not exist).
    async fn cardinality(&self, key: &str) -> Result<u64, CacheError>;

    /// Add `members` to the set stored at `key` in a single command.
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - Number of members that were not already present
    /// * `Err(CacheError)` - If the command fails
    async fn add_members(&self, key: &str, members: &[String]) -> Result<u64, CacheError>;

    /// Close the connection to the cache.
    async fn close(&self) -> Result<(), CacheError>;
}
