//! Loader module for the search seeder.
//!
//! Writes a page of post documents into the search index with a single bulk
//! request and turns per-document failures into a fatal error.

use std::sync::Arc;
use tracing::{debug, error, instrument};

use crate::errors::SeedError;
use search_seeder_repository::{BulkResult, SearchIndexProvider};
use search_seeder_shared::PostDocument;

/// Number of failed items logged when a bulk request partially fails.
const FAILURE_SAMPLE_SIZE: usize = 3;

/// Loader that bulk indexes documents into the search engine.
///
/// Each call sends one request: an `index` action per document, addressed
/// by the post ID, with `refresh=true` so the page is searchable once the
/// call returns.
pub struct BulkIndexer {
    provider: Arc<dyn SearchIndexProvider>,
    index: String,
}

impl BulkIndexer {
    /// Create a new bulk indexer writing to `index`.
    pub fn new(provider: Arc<dyn SearchIndexProvider>, index: impl Into<String>) -> Self {
        Self {
            provider,
            index: index.into(),
        }
    }

    /// The index this loader writes to.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Index a batch of documents.
    ///
    /// An empty batch sends nothing. If the engine reports any failed item,
    /// a sample of the failures is logged and `SeedError::BulkPartialFailure`
    /// is returned.
    #[instrument(skip(self, documents), fields(index = %self.index, document_count = documents.len()))]
    pub async fn index_batch(&self, documents: &[PostDocument]) -> Result<BulkResult, SeedError> {
        if documents.is_empty() {
            return Ok(BulkResult::succeeded(0));
        }

        let result = self
            .provider
            .bulk_index(&self.index, documents, true)
            .await
            .map_err(|e| {
                error!(error = %e, count = documents.len(), "Bulk request failed");
                SeedError::index(e)
            })?;

        if result.has_failures() {
            error!(
                failed = result.failures.len(),
                total = result.total,
                "Bulk indexing reported failures"
            );
            for failure in result.failures.iter().take(FAILURE_SAMPLE_SIZE) {
                error!(
                    document_id = %failure.document_id,
                    status = failure.status,
                    error_type = %failure.error_type,
                    reason = %failure.reason,
                    "Failed to index document"
                );
            }
            return Err(SeedError::BulkPartialFailure {
                failed: result.failures.len(),
                total: result.total,
            });
        }

        debug!(
            succeeded = result.succeeded_count(),
            total = result.total,
            "Indexed batch"
        );
        Ok(result)
    }
}
