//! # Search Seeder
//!
//! One-time bootstrap of the post search subsystem from the relational
//! stores.
//!
//! ## Phases
//!
//! 1. **Usernames**: copies every username into a Redis set, unless the
//!    set is already populated
//! 2. **Posts**: drops and recreates the posts index in OpenSearch, then
//!    pages through the posts database, mapping and bulk writing each page
//!
//! Every collaborator is released at the end, whatever the outcome.
//!
//! ## Modules
//!
//! - [`config`]: Settings and dependency initialization
//! - [`schema`]: Drops and recreates the posts index
//! - [`mapper`]: Transforms post records into search documents
//! - [`loader`]: Bulk writes documents into the index
//! - [`orchestrator`]: Drives the post reindex state machine
//! - [`usernames`]: Seeds the username set
//! - [`teardown`]: Ordered release of collaborators
//! - [`job`]: Runs both phases and the teardown
//! - [`errors`]: Error types for the seeding phases

pub mod config;
pub mod errors;
pub mod job;
pub mod loader;
pub mod mapper;
pub mod orchestrator;
pub mod schema;
pub mod teardown;
pub mod usernames;

pub use config::{Dependencies, SeederConfig};
pub use errors::SeedError;
pub use job::{SeedJob, SeedReport};

use thiserror::Error;

/// Errors that can occur during seeder initialization or execution.
#[derive(Error, Debug)]
pub enum SeederError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Seed error.
    #[error("Seed error: {0}")]
    SeedError(#[from] SeedError),
}

impl SeederError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
