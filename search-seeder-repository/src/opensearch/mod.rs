//! OpenSearch implementation of the search index provider.
//!
//! This module provides a concrete implementation of `SearchIndexProvider`
//! using OpenSearch as the backend, and the posts index definition.

mod bulk_response;
mod index_config;
mod provider;

pub use index_config::{posts_index_body, POSTS_INDEX, PREFIX_ANALYZER, SEARCH_ANALYZER};
pub use provider::OpenSearchProvider;
