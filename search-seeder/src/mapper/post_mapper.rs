//! Post mapper implementation.
//!
//! Transforms `PostRecord`s into `PostDocument`s. The transform is pure and
//! total: it never performs I/O and never fails for a record the reader
//! produced.

use tracing::{debug, instrument};

use search_seeder_shared::{EngagementRow, MediaDocument, PostDocument, PostRecord};

/// Mapper that flattens post records into search documents.
///
/// - Author fields are prefixed with `author_`; a missing author or a
///   missing author column becomes an empty string.
/// - Missing title and content become empty strings.
/// - Hashtag links are reduced to their names.
/// - Counters prefer the denormalized value and fall back to the size of
///   the raw collection, independently per counter.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostMapper;

impl PostMapper {
    /// Create a new post mapper.
    pub fn new() -> Self {
        Self
    }

    /// Map a page of records, preserving order.
    #[instrument(skip(self, records), fields(record_count = records.len()))]
    pub fn map_page(&self, records: &[PostRecord]) -> Vec<PostDocument> {
        let documents: Vec<PostDocument> = records.iter().map(|r| self.map(r)).collect();
        debug!(document_count = documents.len(), "Mapped post page");
        documents
    }

    /// Map a single record.
    pub fn map(&self, record: &PostRecord) -> PostDocument {
        let author = record.author.as_ref();

        PostDocument {
            id: record.id.clone(),

            author_id: record.user_id.clone(),
            author_username: author
                .and_then(|a| a.username.clone())
                .unwrap_or_default(),
            author_fullname: author
                .and_then(|a| a.fullname.clone())
                .unwrap_or_default(),
            author_avatar: author
                .and_then(|a| a.avatar_url.clone())
                .unwrap_or_default(),

            title: record.title.clone().unwrap_or_default(),
            content: record.content.clone().unwrap_or_default(),

            hashtags: record
                .hashtags
                .iter()
                .map(|link| link.hashtag.name.clone())
                .collect(),
            media: record
                .media
                .iter()
                .map(|m| MediaDocument {
                    media_url: m.url.clone(),
                    media_type: m.media_type,
                })
                .collect(),

            post_type: record.post_type.clone(),
            expired_at: record.expired_at,
            created_at: record.created_at,
            updated_at: record.updated_at,
            visibility: record.visibility,

            like_count: count_or_len(record.like_count, &record.likes),
            comment_count: count_or_len(record.comment_count, &record.comments),
            share_count: count_or_len(record.share_count, &record.shares),
        }
    }
}

/// The denormalized counter when present, otherwise the number of raw rows.
fn count_or_len(counter: Option<i64>, rows: &[EngagementRow]) -> i64 {
    counter.unwrap_or(rows.len() as i64)
}
