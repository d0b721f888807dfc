//! # Search Seeder Repository
//!
//! This crate provides the traits the seeder depends on and their concrete
//! implementations: PostgreSQL for the relational sources, OpenSearch for the
//! search index and Redis for the username set.

pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod postgres;
pub mod redis;
pub mod types;

pub use errors::{CacheError, SearchIndexError, SourceError};
pub use interfaces::{PostSource, SearchIndexProvider, UsernameSetStore, UsernameSource};
pub use crate::opensearch::OpenSearchProvider;
pub use crate::postgres::{PostgresPostSource, PostgresUsernameSource};
pub use crate::redis::RedisUsernameSet;
pub use types::{BulkItemFailure, BulkResult};
