//! Orchestrator module for the post reindex.
//!
//! Coordinates the schema manager, the source reader, the mapper and the
//! loader as an explicit state machine:
//!
//! ```text
//! Init -> SchemaReady -> Paging { offset } -> Paging { offset + batch } -> ... -> Done { total }
//! ```
//!
//! Any failure moves the run to `Failed`.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::errors::SeedError;
use crate::loader::BulkIndexer;
use crate::mapper::PostMapper;
use crate::schema::IndexSchemaManager;
use search_seeder_repository::opensearch::POSTS_INDEX;
use search_seeder_repository::{PostSource, SearchIndexProvider};

/// Default number of posts read and written per page.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Configuration for the reindex orchestrator.
#[derive(Debug, Clone)]
pub struct ReindexConfig {
    /// Name of the index to rebuild.
    pub index_name: String,
    /// Number of posts per page.
    pub batch_size: usize,
}

impl Default for ReindexConfig {
    fn default() -> Self {
        Self {
            index_name: POSTS_INDEX.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// State of a reindex run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReindexState {
    /// Nothing has been done yet.
    Init,
    /// The index has been dropped and recreated.
    SchemaReady,
    /// The page starting at `offset` is the next one to process.
    Paging { offset: usize },
    /// Every page has been written.
    Done { total: usize },
    /// The run stopped on an error. `offset` is the page being processed,
    /// or `None` if the failure happened before paging started.
    Failed { offset: Option<usize> },
}

impl fmt::Display for ReindexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::SchemaReady => write!(f, "schema_ready"),
            Self::Paging { offset } => write!(f, "paging({offset})"),
            Self::Done { total } => write!(f, "done({total})"),
            Self::Failed { offset: Some(offset) } => write!(f, "failed({offset})"),
            Self::Failed { offset: None } => write!(f, "failed"),
        }
    }
}

/// Outcome of a successful reindex run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReindexSummary {
    /// Number of documents written.
    pub total_indexed: usize,
    /// Number of non-empty pages processed.
    pub pages: usize,
}

/// Orchestrator that rebuilds the posts index from the relational store.
///
/// The orchestrator:
/// - Recreates the index once, before any read
/// - Reads pages strictly sequentially, in the source's stable order
/// - Maps and bulk writes each page before reading the next one
/// - Stops at the first failure, leaving the index partially populated
pub struct ReindexOrchestrator {
    source: Arc<dyn PostSource>,
    schema: IndexSchemaManager,
    mapper: PostMapper,
    loader: BulkIndexer,
    config: ReindexConfig,
    state: ReindexState,
}

impl ReindexOrchestrator {
    /// Create a new orchestrator with the default configuration.
    pub fn new(source: Arc<dyn PostSource>, provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self::with_config(source, provider, ReindexConfig::default())
    }

    /// Create a new orchestrator with custom configuration.
    pub fn with_config(
        source: Arc<dyn PostSource>,
        provider: Arc<dyn SearchIndexProvider>,
        config: ReindexConfig,
    ) -> Self {
        Self {
            source,
            schema: IndexSchemaManager::new(provider.clone()),
            mapper: PostMapper::new(),
            loader: BulkIndexer::new(provider, config.index_name.clone()),
            config,
            state: ReindexState::Init,
        }
    }

    /// Current state of the run.
    pub fn state(&self) -> &ReindexState {
        &self.state
    }

    /// The configuration in use.
    pub fn config(&self) -> &ReindexConfig {
        &self.config
    }

    /// Run the reindex to completion.
    ///
    /// Every run starts from `Init` and rebuilds the index from scratch. On
    /// failure the state becomes `Failed` and the error is returned; the run
    /// is neither retried nor resumable.
    #[instrument(skip(self), fields(index = %self.config.index_name, batch_size = self.config.batch_size))]
    pub async fn run(&mut self) -> Result<ReindexSummary, SeedError> {
        self.transition(ReindexState::Init);

        if let Err(e) = self.schema.ensure_clean_index(self.loader.index()).await {
            return Err(self.fail(None, e));
        }
        self.transition(ReindexState::SchemaReady);

        let mut offset = 0usize;
        let mut total = 0usize;
        let mut pages = 0usize;
        self.transition(ReindexState::Paging { offset });

        loop {
            match self.process_page(offset).await {
                Ok(None) => {
                    self.transition(ReindexState::Done { total });
                    info!(total_indexed = total, pages = pages, "Reindex complete");
                    return Ok(ReindexSummary {
                        total_indexed: total,
                        pages,
                    });
                }
                Ok(Some(indexed)) => {
                    total += indexed;
                    pages += 1;
                    info!(offset = offset, indexed = indexed, total = total, "Indexed page");
                    offset += self.config.batch_size;
                    self.transition(ReindexState::Paging { offset });
                }
                Err(e) => return Err(self.fail(Some(offset), e)),
            }
        }
    }

    /// Fetch, map and write the page at `offset`. Returns the number of
    /// documents written, or `None` once the source is exhausted.
    async fn process_page(&self, offset: usize) -> Result<Option<usize>, SeedError> {
        let records = self
            .source
            .fetch_page(offset, self.config.batch_size)
            .await?;

        if records.is_empty() {
            return Ok(None);
        }

        let documents = self.mapper.map_page(&records);
        let result = self.loader.index_batch(&documents).await?;
        Ok(Some(result.succeeded_count()))
    }

    fn transition(&mut self, next: ReindexState) {
        debug!(from = %self.state, to = %next, "Reindex state transition");
        self.state = next;
    }

    fn fail(&mut self, offset: Option<usize>, err: SeedError) -> SeedError {
        error!(offset = ?offset, error = %err, "Reindex failed");
        self.transition(ReindexState::Failed { offset });
        err
    }
}
