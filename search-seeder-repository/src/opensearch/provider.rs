//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust crate. The REST calls used here (index exists,
//! delete, create, bulk) are shared with Elasticsearch.

use async_trait::async_trait;
use opensearch::{
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    http::StatusCode,
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts},
    params::Refresh,
    BulkParts, OpenSearch,
};
use search_seeder_shared::PostDocument;
use serde_json::{json, Value};
use tracing::{debug, error, info};
use url::Url;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::bulk_response::BulkResponse;
use crate::types::BulkResult;

/// OpenSearch provider implementation.
///
/// # Example
///
/// ```ignore
/// use search_seeder_repository::opensearch::{posts_index_body, POSTS_INDEX};
/// let provider = OpenSearchProvider::new("http://localhost:9200")?;
///
/// if provider.index_exists(POSTS_INDEX).await? {
///     provider.delete_index(POSTS_INDEX).await?;
/// }
/// provider.create_index(POSTS_INDEX, &posts_index_body()).await?;
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(SearchIndexError)` - If the URL is invalid or the transport cannot be built
    pub fn new(url: &str) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, "Created OpenSearch provider");

        Ok(Self { client })
    }

    /// Build the newline-delimited bulk body: an `index` action addressed by
    /// the document ID followed by the document itself.
    fn bulk_body(
        index: &str,
        documents: &[PostDocument],
    ) -> Result<Vec<JsonBody<Value>>, SearchIndexError> {
        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(documents.len() * 2);

        for doc in documents {
            let source = serde_json::to_value(doc).map_err(|e| {
                SearchIndexError::serialization(format!(
                    "Failed to serialize post {}: {}",
                    doc.document_id(),
                    e
                ))
            })?;
            body.push(json!({ "index": { "_index": index, "_id": doc.document_id() } }).into());
            body.push(source.into());
        }

        Ok(body)
    }
}

/// Read the body of a failed response for error reporting.
async fn error_body(response: opensearch::http::response::Response) -> String {
    response.text().await.unwrap_or_default()
}

#[async_trait]
impl SearchIndexProvider for OpenSearchProvider {
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::index_exists(e.to_string()))?;

        match response.status_code() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => {
                let body = error_body(response).await;
                error!(index = %index, status = %status, body = %body, "Index exists check failed");
                Err(SearchIndexError::index_exists(format!(
                    "Exists check for {} failed with status {}: {}",
                    index, status, body
                )))
            }
        }
    }

    async fn delete_index(&self, index: &str) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::index_deletion(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = error_body(response).await;
            error!(index = %index, status = %status, body = %body, "Index deletion failed");
            return Err(SearchIndexError::index_deletion(format!(
                "Deleting {} failed with status {}: {}",
                index, status, body
            )));
        }

        debug!(index = %index, "Index deleted");
        Ok(())
    }

    async fn create_index(&self, index: &str, body: &Value) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(body.clone())
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let message = error_body(response).await;
            error!(index = %index, status = %status, body = %message, "Index creation failed");
            return Err(SearchIndexError::index_creation(format!(
                "Creating {} failed with status {}: {}",
                index, status, message
            )));
        }

        debug!(index = %index, "Index created");
        Ok(())
    }

    async fn bulk_index(
        &self,
        index: &str,
        documents: &[PostDocument],
        refresh: bool,
    ) -> Result<BulkResult, SearchIndexError> {
        if documents.is_empty() {
            return Ok(BulkResult::succeeded(0));
        }

        let body = Self::bulk_body(index, documents)?;
        let refresh = if refresh { Refresh::True } else { Refresh::False };

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .refresh(refresh)
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::bulk_index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = error_body(response).await;
            error!(index = %index, status = %status, body = %body, "Bulk request failed");
            return Err(SearchIndexError::bulk_index(format!(
                "Bulk request failed with status {}: {}",
                status, body
            )));
        }

        let parsed: BulkResponse = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        let result = parsed.into_result(documents.len());
        debug!(
            index = %index,
            total = result.total,
            failed = result.failures.len(),
            "Bulk request completed"
        );
        Ok(result)
    }
}
