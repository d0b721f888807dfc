//! # Search Seeder Shared
//!
//! This crate defines the data structures shared across the search seeder:
//! the relational post records read from the source database and the flat
//! documents written to the search index.

pub mod types;

pub use types::post_document::{MediaDocument, PostDocument};
pub use types::post_record::{
    AuthorProjection, EngagementRow, Hashtag, HashtagLink, MediaItem, MediaType, ParseEnumError,
    PostRecord, Visibility,
};
