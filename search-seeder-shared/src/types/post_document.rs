//! Post document types for the search index.
//!
//! This module defines the flat document structure that is indexed in the
//! search engine, one per source post.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::post_record::{MediaType, Visibility};

/// A media entry of a post document.
///
/// Stored as a `nested` object so that a URL and its type stay queryable as a
/// unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDocument {
    #[serde(rename = "mediaUrl")]
    pub media_url: String,
    #[serde(rename = "mediaType")]
    pub media_type: MediaType,
}

/// Document representation of a post in the search index.
///
/// Text fields are never absent: a post without a title, content or author
/// is indexed with empty strings so that analysis never sees nulls.
///
/// # Fields
///
/// - `id`: Post identifier, also the document `_id`
/// - `author_*`: Author projection flattened with an `author_` prefix
/// - `hashtags`: Hashtag names, keyword-typed with a prefix sub-field
/// - `media`: Nested `(mediaUrl, mediaType)` pairs
/// - `*_count`: Engagement counters
/// - `expired_at`: Expiration timestamp, `null` when the post never expires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDocument {
    pub id: String,

    pub author_id: String,
    pub author_username: String,
    pub author_fullname: String,
    pub author_avatar: String,

    pub title: String,
    pub content: String,

    pub hashtags: Vec<String>,
    pub media: Vec<MediaDocument>,

    pub post_type: String,
    pub expired_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub visibility: Visibility,

    pub like_count: i64,
    pub comment_count: i64,
    pub share_count: i64,
}

impl PostDocument {
    /// The document ID used in the search index.
    ///
    /// Equal to the post identifier, so indexing the same post twice
    /// overwrites the previous document.
    pub fn document_id(&self) -> &str {
        &self.id
    }
}
