//! Index schema management.
//!
//! Drops and recreates the posts index with its analyzers and mappings.

use std::sync::Arc;
use tracing::{info, instrument};

use crate::errors::SeedError;
use search_seeder_repository::opensearch::posts_index_body;
use search_seeder_repository::SearchIndexProvider;

/// Rebuilds an index from scratch with the fixed posts definition.
pub struct IndexSchemaManager {
    provider: Arc<dyn SearchIndexProvider>,
}

impl IndexSchemaManager {
    /// Create a new schema manager over the given provider.
    pub fn new(provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self { provider }
    }

    /// Delete `index` if it exists, then create it.
    ///
    /// Any failure of the existence check, the deletion or the creation is
    /// returned as `SeedError::SchemaError`; nothing is retried.
    #[instrument(skip(self))]
    pub async fn ensure_clean_index(&self, index: &str) -> Result<(), SeedError> {
        let exists = self
            .provider
            .index_exists(index)
            .await
            .map_err(SeedError::schema)?;

        if exists {
            info!(index = %index, "Deleting existing index");
            self.provider
                .delete_index(index)
                .await
                .map_err(SeedError::schema)?;
        }

        self.provider
            .create_index(index, &posts_index_body())
            .await
            .map_err(SeedError::schema)?;

        info!(index = %index, "Index created with analyzers and mappings");
        Ok(())
    }
}
