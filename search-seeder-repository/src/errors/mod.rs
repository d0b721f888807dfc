//! Error types for the search seeder repository.
//!
//! One error type per collaborator: the search index, the relational sources
//! and the cache.

mod cache_error;
mod search_index_error;
mod source_error;

pub use cache_error::CacheError;
pub use search_index_error::SearchIndexError;
pub use source_error::SourceError;
