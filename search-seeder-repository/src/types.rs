//! Result types for search index operations.

/// Failure of a single document within a bulk request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkItemFailure {
    /// The `_id` of the document that failed.
    pub document_id: String,
    /// HTTP status reported for the item.
    pub status: u16,
    /// Error type reported by the engine (e.g. `mapper_parsing_exception`).
    pub error_type: String,
    /// Human readable reason reported by the engine.
    pub reason: String,
}

/// Outcome of a bulk request.
///
/// `success` is false as soon as the engine flags the request as having
/// errors, and `failures` lists every item that reported one. Callers must
/// inspect this value: a bulk request that was accepted by the engine can
/// still have failed for some of its documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkResult {
    /// Whether every item was written.
    pub success: bool,
    /// Number of items in the request.
    pub total: usize,
    /// Items that reported an error.
    pub failures: Vec<BulkItemFailure>,
}

impl BulkResult {
    /// A result where all `total` items were written.
    pub fn succeeded(total: usize) -> Self {
        Self {
            success: true,
            total,
            failures: Vec::new(),
        }
    }

    /// A result carrying item failures.
    pub fn failed(total: usize, failures: Vec<BulkItemFailure>) -> Self {
        Self {
            success: false,
            total,
            failures,
        }
    }

    /// Whether the request reported any failure.
    pub fn has_failures(&self) -> bool {
        !self.success || !self.failures.is_empty()
    }

    /// Number of items that were written.
    pub fn succeeded_count(&self) -> usize {
        self.total.saturating_sub(self.failures.len())
    }
}
