//! Error types for the seeding phases.

use search_seeder_repository::{CacheError, SearchIndexError, SourceError};
use thiserror::Error;

/// Errors that abort a seeding phase.
///
/// Every variant except `TeardownError` is fatal to the phase it occurs in:
/// the run stops rather than skipping the offending unit.
#[derive(Error, Debug)]
pub enum SeedError {
    /// The index could not be dropped or recreated.
    #[error("Schema error: {0}")]
    SchemaError(#[source] SearchIndexError),

    /// A read from the relational store failed.
    #[error("Source error: {0}")]
    SourceError(#[from] SourceError),

    /// A cache command failed.
    #[error("Cache error: {0}")]
    CacheError(#[from] CacheError),

    /// The bulk request could not be sent or was rejected as a whole.
    #[error("Index error: {0}")]
    IndexError(#[source] SearchIndexError),

    /// The engine accepted the bulk request but reported per-document failures.
    #[error("Bulk index reported {failed} failed documents out of {total}")]
    BulkPartialFailure { failed: usize, total: usize },

    /// Releasing a collaborator failed.
    #[error("Teardown error for {resource}: {message}")]
    TeardownError { resource: String, message: String },
}

impl SeedError {
    /// Create a schema error.
    pub fn schema(err: SearchIndexError) -> Self {
        Self::SchemaError(err)
    }

    /// Create an index error.
    pub fn index(err: SearchIndexError) -> Self {
        Self::IndexError(err)
    }

    /// Create a teardown error.
    pub fn teardown(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TeardownError {
            resource: resource.into(),
            message: message.into(),
        }
    }
}
