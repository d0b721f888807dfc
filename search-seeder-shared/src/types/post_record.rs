//! Relational post records as read from the posts database.
//!
//! Every association is resolved eagerly by the reader, so a `PostRecord`
//! carries its author projection, media, hashtag links and raw engagement rows
//! as concrete nested values.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a stored enum value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

/// Type tag of a media item attached to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    File,
}

impl MediaType {
    /// The lower-case wire value stored in the index.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::File => "file",
        }
    }
}

impl FromStr for MediaType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "file" => Ok(Self::File),
            _ => Err(ParseEnumError {
                kind: "media type",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audience a post is visible to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Friends,
    Private,
}

impl Visibility {
    /// The lower-case wire value stored in the index.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Friends => "friends",
            Self::Private => "private",
        }
    }
}

impl FromStr for Visibility {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "friends" => Ok(Self::Friends),
            "private" => Ok(Self::Private),
            _ => Err(ParseEnumError {
                kind: "visibility",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Author columns joined onto a post. Not owned by the post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProjection {
    pub id: String,
    pub username: Option<String>,
    pub fullname: Option<String>,
    pub avatar_url: Option<String>,
}

/// A media item attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub url: String,
    pub media_type: MediaType,
}

/// A hashtag row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hashtag {
    pub id: String,
    pub name: String,
}

/// Link row between a post and a hashtag, with the hashtag resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashtagLink {
    pub hashtag_id: String,
    pub hashtag: Hashtag,
}

/// A raw like, comment or share row. Only its presence matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementRow {
    pub id: String,
    pub user_id: Option<String>,
}

/// A post with all of its associations loaded.
///
/// The `*_count` fields are the denormalized counters kept on the post row.
/// They may be absent, in which case the length of the matching raw
/// collection (`likes`, `comments`, `shares`) is the count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: String,
    /// Author reference stored on the post row.
    pub user_id: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub post_type: String,
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expired_at: Option<DateTime<Utc>>,
    pub like_count: Option<i64>,
    pub comment_count: Option<i64>,
    pub share_count: Option<i64>,
    pub author: Option<AuthorProjection>,
    pub media: Vec<MediaItem>,
    pub hashtags: Vec<HashtagLink>,
    pub likes: Vec<EngagementRow>,
    pub comments: Vec<EngagementRow>,
    pub shares: Vec<EngagementRow>,
}

impl PostRecord {
    /// Create a record with no associations and no denormalized counters.
    ///
    /// Associations are attached afterwards by the reader.
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        post_type: impl Into<String>,
        visibility: Visibility,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            title: None,
            content: None,
            post_type: post_type.into(),
            visibility,
            created_at,
            updated_at: created_at,
            expired_at: None,
            like_count: None,
            comment_count: None,
            share_count: None,
            author: None,
            media: Vec::new(),
            hashtags: Vec::new(),
            likes: Vec::new(),
            comments: Vec::new(),
            shares: Vec::new(),
        }
    }
}
