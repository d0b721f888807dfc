//! Paginated post reader backed by the posts database.
//!
//! A page is loaded with one query for the posts joined with their author,
//! then one query per association restricted to the page's post ids. Rows are
//! grouped by post id and attached to their post in page order.
//!
//! ## Tables
//!
//! - `posts`: post rows with the denormalized counters
//! - `users`: author projection
//! - `media`: media items
//! - `post_hashtags` / `hashtags`: hashtag links and names
//! - `likes`, `comments`, `shares`: raw engagement rows

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use search_seeder_shared::{
    AuthorProjection, EngagementRow, Hashtag, HashtagLink, MediaItem, MediaType, PostRecord,
    Visibility,
};
use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::errors::SourceError;
use crate::interfaces::PostSource;

/// Ordered by creation time, with the id as tie-breaker so that posts
/// sharing a timestamp keep the same order on every page.
const POSTS_PAGE_QUERY: &str = r#"
    SELECT
        p.id::text                    AS id,
        p."userId"::text              AS user_id,
        p.title                       AS title,
        p.content                     AS content,
        p."postType"::text            AS post_type,
        p.visibility::text            AS visibility,
        p."createdAt"::timestamptz    AS created_at,
        p."updatedAt"::timestamptz    AS updated_at,
        p.expired_at::timestamptz     AS expired_at,
        p."likeCount"::int8           AS like_count,
        p."commentCount"::int8        AS comment_count,
        p."shareCount"::int8          AS share_count,
        u.id::text                    AS author_id,
        u.username                    AS author_username,
        u.fullname                    AS author_fullname,
        u."avatarUrl"                 AS author_avatar
    FROM posts p
    LEFT JOIN users u ON u.id = p."userId"
    ORDER BY p."createdAt" ASC, p.id ASC
    OFFSET $1
    LIMIT $2
"#;

const MEDIA_QUERY: &str = r#"
    SELECT "postId"::text AS post_id, "mediaUrl" AS url, "mediaType"::text AS media_type
    FROM media
    WHERE "postId"::text = ANY($1)
"#;

const HASHTAGS_QUERY: &str = r#"
    SELECT ph."postId"::text AS post_id, h.id::text AS hashtag_id, h.name AS name
    FROM post_hashtags ph
    JOIN hashtags h ON h.id = ph."hashtagId"
    WHERE ph."postId"::text = ANY($1)
"#;

/// Engagement tables share the same shape.
fn engagement_query(table: &str) -> String {
    format!(
        r#"SELECT "postId"::text AS post_id, id::text AS id, "userId"::text AS user_id FROM {} WHERE "postId"::text = ANY($1)"#,
        table
    )
}

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: String,
    user_id: String,
    title: Option<String>,
    content: Option<String>,
    post_type: String,
    visibility: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    expired_at: Option<DateTime<Utc>>,
    like_count: Option<i64>,
    comment_count: Option<i64>,
    share_count: Option<i64>,
    author_id: Option<String>,
    author_username: Option<String>,
    author_fullname: Option<String>,
    author_avatar: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct MediaRow {
    post_id: String,
    url: String,
    media_type: String,
}

#[derive(Debug, sqlx::FromRow)]
struct HashtagRow {
    post_id: String,
    hashtag_id: String,
    name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct EngagementRowRecord {
    post_id: String,
    id: String,
    user_id: Option<String>,
}

/// Associations of a page, grouped by post id.
#[derive(Debug, Default)]
struct PageAssociations {
    media: HashMap<String, Vec<MediaItem>>,
    hashtags: HashMap<String, Vec<HashtagLink>>,
    likes: HashMap<String, Vec<EngagementRow>>,
    comments: HashMap<String, Vec<EngagementRow>>,
    shares: HashMap<String, Vec<EngagementRow>>,
}

fn group_by_post<T>(rows: impl IntoIterator<Item = (String, T)>) -> HashMap<String, Vec<T>> {
    let mut grouped: HashMap<String, Vec<T>> = HashMap::new();
    for (post_id, item) in rows {
        grouped.entry(post_id).or_default().push(item);
    }
    grouped
}

fn media_item(row: MediaRow) -> Result<(String, MediaItem), SourceError> {
    let media_type: MediaType = row
        .media_type
        .parse()
        .map_err(|e: search_seeder_shared::ParseEnumError| {
            SourceError::invalid_row(&row.post_id, e.to_string())
        })?;
    Ok((
        row.post_id,
        MediaItem {
            url: row.url,
            media_type,
        },
    ))
}

fn hashtag_link(row: HashtagRow) -> (String, HashtagLink) {
    (
        row.post_id,
        HashtagLink {
            hashtag_id: row.hashtag_id.clone(),
            hashtag: Hashtag {
                id: row.hashtag_id,
                name: row.name,
            },
        },
    )
}

fn engagement_row(row: EngagementRowRecord) -> (String, EngagementRow) {
    (
        row.post_id,
        EngagementRow {
            id: row.id,
            user_id: row.user_id,
        },
    )
}

/// Turn a post row into a record and attach its associations.
fn assemble(row: PostRow, associations: &mut PageAssociations) -> Result<PostRecord, SourceError> {
    let visibility: Visibility = row
        .visibility
        .parse()
        .map_err(|e: search_seeder_shared::ParseEnumError| {
            SourceError::invalid_row(&row.id, e.to_string())
        })?;

    let author = row.author_id.map(|id| AuthorProjection {
        id,
        username: row.author_username,
        fullname: row.author_fullname,
        avatar_url: row.author_avatar,
    });

    Ok(PostRecord {
        media: associations.media.remove(&row.id).unwrap_or_default(),
        hashtags: associations.hashtags.remove(&row.id).unwrap_or_default(),
        likes: associations.likes.remove(&row.id).unwrap_or_default(),
        comments: associations.comments.remove(&row.id).unwrap_or_default(),
        shares: associations.shares.remove(&row.id).unwrap_or_default(),
        id: row.id,
        user_id: row.user_id,
        title: row.title,
        content: row.content,
        post_type: row.post_type,
        visibility,
        created_at: row.created_at,
        updated_at: row.updated_at,
        expired_at: row.expired_at,
        like_count: row.like_count,
        comment_count: row.comment_count,
        share_count: row.share_count,
        author,
    })
}

/// PostgreSQL implementation of `PostSource`.
pub struct PostgresPostSource {
    pool: PgPool,
}

impl PostgresPostSource {
    /// Creates a source over an already connected pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Close the underlying pool, waiting for checked-out connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn fetch_engagement(
        &self,
        table: &str,
        post_ids: &[String],
    ) -> Result<HashMap<String, Vec<EngagementRow>>, SourceError> {
        let rows: Vec<EngagementRowRecord> = sqlx::query_as(&engagement_query(table))
            .bind(post_ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(group_by_post(rows.into_iter().map(engagement_row)))
    }

    async fn fetch_associations(
        &self,
        post_ids: &[String],
    ) -> Result<PageAssociations, SourceError> {
        let media_rows: Vec<MediaRow> = sqlx::query_as(MEDIA_QUERY)
            .bind(post_ids)
            .fetch_all(&self.pool)
            .await?;
        let media = group_by_post(
            media_rows
                .into_iter()
                .map(media_item)
                .collect::<Result<Vec<_>, _>>()?,
        );

        let hashtag_rows: Vec<HashtagRow> = sqlx::query_as(HASHTAGS_QUERY)
            .bind(post_ids)
            .fetch_all(&self.pool)
            .await?;
        let hashtags = group_by_post(hashtag_rows.into_iter().map(hashtag_link));

        Ok(PageAssociations {
            media,
            hashtags,
            likes: self.fetch_engagement("likes", post_ids).await?,
            comments: self.fetch_engagement("comments", post_ids).await?,
            shares: self.fetch_engagement("shares", post_ids).await?,
        })
    }
}

#[async_trait]
impl PostSource for PostgresPostSource {
    #[instrument(skip(self))]
    async fn fetch_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PostRecord>, SourceError> {
        let rows: Vec<PostRow> = sqlx::query_as(POSTS_PAGE_QUERY)
            .bind(offset as i64)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
        let mut associations = self.fetch_associations(&post_ids).await?;

        let records = rows
            .into_iter()
            .map(|row| assemble(row, &mut associations))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(post_count = records.len(), "Read post page");
        Ok(records)
    }
}
