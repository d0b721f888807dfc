//! In-memory collaborators shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use serde_json::Value;

use search_seeder_repository::{
    BulkItemFailure, BulkResult, CacheError, PostSource, SearchIndexError, SearchIndexProvider,
    SourceError, UsernameSetStore, UsernameSource,
};
use search_seeder_shared::{
    AuthorProjection, EngagementRow, Hashtag, HashtagLink, MediaItem, MediaType, PostDocument,
    PostRecord, Visibility,
};

/// Ordered log of calls across collaborators.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

fn record(log: &Option<CallLog>, entry: String) {
    if let Some(log) = log {
        log.lock().unwrap().push(entry);
    }
}

/// A post created `minutes` after a fixed epoch, with an author and one hashtag.
pub fn post(id: &str, minutes: i64) -> PostRecord {
    let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes);
    let mut record = PostRecord::new(id, "user-1", "normal", Visibility::Public, created_at);
    record.title = Some(format!("Bài viết {id}"));
    record.author = Some(AuthorProjection {
        id: "user-1".to_string(),
        username: Some("hoa".to_string()),
        fullname: Some("Lê Hoa".to_string()),
        avatar_url: None,
    });
    record.hashtags = vec![HashtagLink {
        hashtag_id: "h1".to_string(),
        hashtag: Hashtag {
            id: "h1".to_string(),
            name: "dulich".to_string(),
        },
    }];
    record
}

/// `n` posts with distinct ids and increasing creation times.
pub fn posts(n: usize) -> Vec<PostRecord> {
    (0..n).map(|i| post(&format!("post-{i:05}"), i as i64)).collect()
}

/// Raw engagement rows.
pub fn rows(n: usize) -> Vec<EngagementRow> {
    (0..n)
        .map(|i| EngagementRow {
            id: format!("row-{i}"),
            user_id: Some(format!("user-{i}")),
        })
        .collect()
}

pub fn image(url: &str) -> MediaItem {
    MediaItem {
        url: url.to_string(),
        media_type: MediaType::Image,
    }
}

// ---------------------------------------------------------------------------
// Post source
// ---------------------------------------------------------------------------

/// Serves pages from a fixed list of posts, already in source order.
pub struct InMemoryPostSource {
    posts: Vec<PostRecord>,
    fail_at_offset: Option<usize>,
    calls: Mutex<Vec<(usize, usize)>>,
    log: Option<CallLog>,
}

impl InMemoryPostSource {
    pub fn new(posts: Vec<PostRecord>) -> Self {
        Self {
            posts,
            fail_at_offset: None,
            calls: Mutex::new(Vec::new()),
            log: None,
        }
    }

    pub fn failing_at(mut self, offset: usize) -> Self {
        self.fail_at_offset = Some(offset);
        self
    }

    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = Some(log);
        self
    }

    /// `(offset, limit)` of every read.
    pub fn calls(&self) -> Vec<(usize, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PostSource for InMemoryPostSource {
    async fn fetch_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PostRecord>, SourceError> {
        self.calls.lock().unwrap().push((offset, limit));
        record(&self.log, format!("posts.fetch_page({offset})"));

        if self.fail_at_offset == Some(offset) {
            return Err(SourceError::invalid_row(
                format!("offset-{offset}"),
                "unknown visibility 'secret'",
            ));
        }

        Ok(self.posts.iter().skip(offset).take(limit).cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// Search engine
// ---------------------------------------------------------------------------

/// How the in-memory engine answers bulk requests.
#[derive(Debug, Clone)]
pub enum BulkMode {
    /// Write every document.
    Accept,
    /// Reject the given ids with a mapping error, write the others.
    RejectIds(Vec<String>),
    /// Fail the request as a whole.
    Transport,
}

/// Index admin and bulk writes against in-memory maps.
pub struct InMemorySearchEngine {
    indices: Mutex<HashMap<String, HashMap<String, PostDocument>>>,
    bodies: Mutex<HashMap<String, Value>>,
    bulk_mode: Mutex<BulkMode>,
    fail_create: bool,
    bulk_calls: AtomicUsize,
    written_ids: Mutex<Vec<String>>,
    log: Option<CallLog>,
}

impl InMemorySearchEngine {
    pub fn new() -> Self {
        Self {
            indices: Mutex::new(HashMap::new()),
            bodies: Mutex::new(HashMap::new()),
            bulk_mode: Mutex::new(BulkMode::Accept),
            fail_create: false,
            bulk_calls: AtomicUsize::new(0),
            written_ids: Mutex::new(Vec::new()),
            log: None,
        }
    }

    pub fn with_bulk_mode(self, mode: BulkMode) -> Self {
        *self.bulk_mode.lock().unwrap() = mode;
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Seed an index as if left over from an earlier run.
    pub fn with_existing_index(self, index: &str, documents: Vec<PostDocument>) -> Self {
        let docs = documents
            .into_iter()
            .map(|d| (d.document_id().to_string(), d))
            .collect();
        self.indices.lock().unwrap().insert(index.to_string(), docs);
        self
    }

    pub fn set_bulk_mode(&self, mode: BulkMode) {
        *self.bulk_mode.lock().unwrap() = mode;
    }

    pub fn has_index(&self, index: &str) -> bool {
        self.indices.lock().unwrap().contains_key(index)
    }

    pub fn document_count(&self, index: &str) -> usize {
        self.indices
            .lock()
            .unwrap()
            .get(index)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }

    pub fn document(&self, index: &str, id: &str) -> Option<PostDocument> {
        self.indices
            .lock()
            .unwrap()
            .get(index)
            .and_then(|docs| docs.get(id).cloned())
    }

    /// All documents of `index`, sorted by id.
    pub fn documents(&self, index: &str) -> Vec<PostDocument> {
        let mut docs: Vec<PostDocument> = self
            .indices
            .lock()
            .unwrap()
            .get(index)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default();
        docs.sort_by(|a, b| a.id.cmp(&b.id));
        docs
    }

    pub fn created_body(&self, index: &str) -> Option<Value> {
        self.bodies.lock().unwrap().get(index).cloned()
    }

    pub fn bulk_calls(&self) -> usize {
        self.bulk_calls.load(Ordering::SeqCst)
    }

    /// Ids of every document sent in a successful bulk item, in send order.
    pub fn written_ids(&self) -> Vec<String> {
        self.written_ids.lock().unwrap().clone()
    }
}

impl Default for InMemorySearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchIndexProvider for InMemorySearchEngine {
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError> {
        record(&self.log, format!("search.index_exists({index})"));
        Ok(self.has_index(index))
    }

    async fn delete_index(&self, index: &str) -> Result<(), SearchIndexError> {
        record(&self.log, format!("search.delete_index({index})"));
        match self.indices.lock().unwrap().remove(index) {
            Some(_) => Ok(()),
            None => Err(SearchIndexError::index_deletion(format!(
                "no such index [{index}]"
            ))),
        }
    }

    async fn create_index(&self, index: &str, body: &Value) -> Result<(), SearchIndexError> {
        record(&self.log, format!("search.create_index({index})"));
        if self.fail_create {
            return Err(SearchIndexError::index_creation("illegal_argument_exception"));
        }

        let mut indices = self.indices.lock().unwrap();
        if indices.contains_key(index) {
            return Err(SearchIndexError::index_creation(format!(
                "resource_already_exists_exception [{index}]"
            )));
        }
        indices.insert(index.to_string(), HashMap::new());
        self.bodies
            .lock()
            .unwrap()
            .insert(index.to_string(), body.clone());
        Ok(())
    }

    async fn bulk_index(
        &self,
        index: &str,
        documents: &[PostDocument],
        _refresh: bool,
    ) -> Result<BulkResult, SearchIndexError> {
        self.bulk_calls.fetch_add(1, Ordering::SeqCst);
        record(&self.log, format!("search.bulk_index({})", documents.len()));

        let mode = self.bulk_mode.lock().unwrap().clone();
        let rejected: HashSet<String> = match mode {
            BulkMode::Transport => {
                return Err(SearchIndexError::bulk_index("connection reset by peer"))
            }
            BulkMode::Accept => HashSet::new(),
            BulkMode::RejectIds(ids) => ids.into_iter().collect(),
        };

        let mut indices = self.indices.lock().unwrap();
        let docs = indices.get_mut(index).ok_or_else(|| {
            SearchIndexError::bulk_index(format!("index_not_found_exception [{index}]"))
        })?;

        let mut failures = Vec::new();
        for doc in documents {
            if rejected.contains(doc.document_id()) {
                failures.push(BulkItemFailure {
                    document_id: doc.document_id().to_string(),
                    status: 400,
                    error_type: "mapper_parsing_exception".to_string(),
                    reason: "failed to parse field [created_at]".to_string(),
                });
                continue;
            }
            docs.insert(doc.document_id().to_string(), doc.clone());
            self.written_ids
                .lock()
                .unwrap()
                .push(doc.document_id().to_string());
        }

        if failures.is_empty() {
            Ok(BulkResult::succeeded(documents.len()))
        } else {
            Ok(BulkResult::failed(documents.len(), failures))
        }
    }
}

// ---------------------------------------------------------------------------
// Usernames
// ---------------------------------------------------------------------------

/// Returns a fixed list of usernames.
pub struct FixedUsernameSource {
    usernames: Vec<Option<String>>,
    fail: bool,
    reads: AtomicUsize,
    log: Option<CallLog>,
}

impl FixedUsernameSource {
    pub fn new(usernames: Vec<Option<&str>>) -> Self {
        Self {
            usernames: usernames
                .into_iter()
                .map(|u| u.map(str::to_string))
                .collect(),
            fail: false,
            reads: AtomicUsize::new(0),
            log: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = Some(log);
        self
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UsernameSource for FixedUsernameSource {
    async fn fetch_usernames(&self) -> Result<Vec<Option<String>>, SourceError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        record(&self.log, "users.fetch_usernames".to_string());
        if self.fail {
            return Err(SourceError::invalid_row("profile", "username column missing"));
        }
        Ok(self.usernames.clone())
    }
}

/// Sets kept in memory, keyed like the cache.
pub struct InMemorySetStore {
    sets: Mutex<HashMap<String, HashSet<String>>>,
    add_calls: AtomicUsize,
    close_calls: AtomicUsize,
    fail_close: bool,
    log: Option<CallLog>,
}

impl InMemorySetStore {
    pub fn new() -> Self {
        Self {
            sets: Mutex::new(HashMap::new()),
            add_calls: AtomicUsize::new(0),
            close_calls: AtomicUsize::new(0),
            fail_close: false,
            log: None,
        }
    }

    pub fn with_members(self, key: &str, members: &[&str]) -> Self {
        self.sets.lock().unwrap().insert(
            key.to_string(),
            members.iter().map(|m| m.to_string()).collect(),
        );
        self
    }

    pub fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = Some(log);
        self
    }

    pub fn members(&self, key: &str) -> HashSet<String> {
        self.sets
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    pub fn add_calls(&self) -> usize {
        self.add_calls.load(Ordering::SeqCst)
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

impl Default for InMemorySetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UsernameSetStore for InMemorySetStore {
    async fn cardinality(&self, key: &str) -> Result<u64, CacheError> {
        record(&self.log, format!("cache.cardinality({key})"));
        Ok(self.members(key).len() as u64)
    }

    async fn add_members(&self, key: &str, members: &[String]) -> Result<u64, CacheError> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        record(&self.log, format!("cache.add_members({})", members.len()));
        let mut sets = self.sets.lock().unwrap();
        let set = sets.entry(key.to_string()).or_default();
        let added = members.iter().filter(|m| set.insert((*m).clone())).count();
        Ok(added as u64)
    }

    async fn close(&self) -> Result<(), CacheError> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        record(&self.log, "cache.close".to_string());
        if self.fail_close {
            return Err(CacheError::connection("broken pipe"));
        }
        Ok(())
    }
}
