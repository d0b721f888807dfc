//! Error types for the cache set store.

use thiserror::Error;

/// Represents errors that can occur while talking to the cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Failed to open a connection to the cache.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A cache command failed.
    #[error("Command error: {0}")]
    CommandError(#[from] redis::RedisError),
}

impl CacheError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }
}
