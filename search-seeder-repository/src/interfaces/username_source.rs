//! Username reader trait definition.

use async_trait::async_trait;

use crate::errors::SourceError;

/// Reads every username from the user profile table.
#[async_trait]
pub trait UsernameSource: Send + Sync {
    /// Fetch all usernames in one unbounded read, as stored.
    ///
    /// Absent usernames are returned as `None`; normalization is up to the
    /// caller.
    async fn fetch_usernames(&self) -> Result<Vec<Option<String>>, SourceError>;
}
