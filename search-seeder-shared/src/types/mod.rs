//! This module defines the core data structures used across the search seeder.
//! It re-exports the source records and the search document.

pub mod post_document;
pub mod post_record;

pub use post_document::{MediaDocument, PostDocument};
pub use post_record::{
    AuthorProjection, EngagementRow, Hashtag, HashtagLink, MediaItem, MediaType, PostRecord,
    Visibility,
};
