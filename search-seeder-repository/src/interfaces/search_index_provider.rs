//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;
use search_seeder_shared::PostDocument;
use serde_json::Value;

use crate::errors::SearchIndexError;
use crate::types::BulkResult;

/// Abstracts the underlying search index implementation (OpenSearch, Elasticsearch, etc.).
///
/// Exposes the index administration calls needed to rebuild an index from
/// scratch and a bulk upsert-by-id write. Implementations are injected into
/// the schema manager and the bulk indexer so that tests can substitute an
/// in-memory engine.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Check whether `index` exists.
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError>;

    /// Delete `index`.
    async fn delete_index(&self, index: &str) -> Result<(), SearchIndexError>;

    /// Create `index` with the given settings and mappings body.
    ///
    /// # Arguments
    ///
    /// * `index` - The index name
    /// * `body` - JSON object with `settings` and `mappings`
    async fn create_index(&self, index: &str, body: &Value) -> Result<(), SearchIndexError>;

    /// Index `documents` in a single bulk request, addressed by their
    /// document ID so that existing documents are overwritten.
    ///
    /// # Arguments
    ///
    /// * `index` - The target index
    /// * `documents` - Documents to write
    /// * `refresh` - Make the documents searchable before returning
    ///
    /// # Returns
    ///
    /// * `Ok(BulkResult)` - The per-item outcome of the request
    /// * `Err(SearchIndexError)` - If the request could not be sent or was rejected as a whole
    async fn bulk_index(
        &self,
        index: &str,
        documents: &[PostDocument],
        refresh: bool,
    ) -> Result<BulkResult, SearchIndexError>;
}
