//! Error types for the relational sources.

use thiserror::Error;

/// Represents errors that can occur while reading from the relational store.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// A row was read but holds a value the seeder cannot represent.
    #[error("Invalid row for post {post_id}: {reason}")]
    InvalidRow { post_id: String, reason: String },
}

impl SourceError {
    /// Create an invalid row error.
    pub fn invalid_row(post_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRow {
            post_id: post_id.into(),
            reason: reason.into(),
        }
    }
}
