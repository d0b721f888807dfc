//! Typed view of the bulk API response.
//!
//! Only the parts the seeder inspects are deserialized: the top-level
//! `errors` flag and, per item, the action result with its optional error.

use std::collections::HashMap;

use serde::Deserialize;

use crate::types::{BulkItemFailure, BulkResult};

#[derive(Debug, Deserialize)]
pub(crate) struct BulkResponse {
    #[serde(default)]
    pub errors: bool,
    #[serde(default)]
    pub items: Vec<HashMap<String, BulkResponseItem>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BulkResponseItem {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub status: u16,
    pub error: Option<BulkResponseError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BulkResponseError {
    #[serde(rename = "type", default)]
    pub error_type: String,
    #[serde(default)]
    pub reason: Option<String>,
}

impl BulkResponse {
    /// Convert the raw response into a `BulkResult` for a request of `total` items.
    ///
    /// Each item is keyed by its action name (`index`, `create`, `update` or
    /// `delete`); any action carrying an `error` is a failure.
    pub fn into_result(self, total: usize) -> BulkResult {
        let failures: Vec<BulkItemFailure> = self
            .items
            .into_iter()
            .flat_map(|item| item.into_values())
            .filter_map(|action| {
                let error = action.error?;
                Some(BulkItemFailure {
                    document_id: action.id.unwrap_or_default(),
                    status: action.status,
                    error_type: error.error_type,
                    reason: error.reason.unwrap_or_default(),
                })
            })
            .collect();

        if self.errors || !failures.is_empty() {
            BulkResult::failed(total, failures)
        } else {
            BulkResult::succeeded(total)
        }
    }
}
