//! Interface definitions for the seeder's collaborators.
//!
//! This module defines the abstract traits that allow dependency injection
//! of the relational sources, the search index and the cache, and their
//! substitution with in-memory fakes in tests.

mod post_source;
mod search_index_provider;
mod username_set_store;
mod username_source;

pub use post_source::PostSource;
pub use search_index_provider::SearchIndexProvider;
pub use username_set_store::UsernameSetStore;
pub use username_source::UsernameSource;
