//! Dependency initialization and wiring for the seed job.

use std::fmt;
use std::sync::Arc;
use tracing::info;

use crate::config::SeederConfig;
use crate::errors::SeedError;
use crate::job::SeedJob;
use crate::orchestrator::{ReindexConfig, ReindexOrchestrator};
use crate::teardown::Teardown;
use crate::usernames::UsernameSeeder;
use crate::SeederError;
use search_seeder_repository::postgres::connect;
use search_seeder_repository::{
    OpenSearchProvider, PostgresPostSource, PostgresUsernameSource, RedisUsernameSet,
    UsernameSetStore,
};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured job ready to run.
    pub job: SeedJob,
}

impl Dependencies {
    /// Connect every collaborator and wire the job.
    ///
    /// Connections are attempted once, in order: posts database, users
    /// database, cache, search engine. Each one registers its release step
    /// as soon as it is open, so a failure later in the sequence releases
    /// the earlier ones before the configuration error is returned.
    pub async fn new(config: &SeederConfig) -> Result<Self, SeederError> {
        info!(
            opensearch_url = %config.opensearch_url,
            posts_index = %config.posts_index,
            usernames_set_key = %config.usernames_set_key,
            pg_max_connections = config.pg_max_connections,
            "Initializing dependencies"
        );

        let mut teardown = Teardown::new();

        let posts_pool = acquired(
            &mut teardown,
            connect(&config.posts_database_url, config.pg_max_connections).await,
            "Failed to connect to posts database",
        )
        .await?;
        let posts = Arc::new(PostgresPostSource::new(posts_pool));
        let handle = posts.clone();
        teardown.push("posts database", move || async move {
            handle.close().await;
            Ok(())
        });

        let users_pool = acquired(
            &mut teardown,
            connect(&config.users_database_url, config.pg_max_connections).await,
            "Failed to connect to users database",
        )
        .await?;
        let users = Arc::new(PostgresUsernameSource::new(users_pool));
        let handle = users.clone();
        teardown.push("users database", move || async move {
            handle.close().await;
            Ok(())
        });

        let cache = Arc::new(
            acquired(
                &mut teardown,
                RedisUsernameSet::new(&config.redis_url).await,
                "Failed to connect to Redis",
            )
            .await?,
        );
        let handle = cache.clone();
        teardown.push("cache", move || async move {
            handle.close().await.map_err(SeedError::from)
        });

        let search = Arc::new(
            acquired(
                &mut teardown,
                OpenSearchProvider::new(&config.opensearch_url),
                "Failed to create OpenSearch provider",
            )
            .await?,
        );
        let handle = search.clone();
        teardown.push("search engine", move || async move {
            // Stateless HTTP client, released with its last handle.
            drop(handle);
            Ok(())
        });

        info!("Connections established");

        let usernames = UsernameSeeder::new(users, cache, &config.usernames_set_key);

        let reindex = ReindexOrchestrator::with_config(
            posts,
            search,
            ReindexConfig {
                index_name: config.posts_index.clone(),
                ..ReindexConfig::default()
            },
        );

        Ok(Self {
            job: SeedJob::new(usernames, reindex, teardown),
        })
    }
}

/// Unwrap a connection attempt. On failure, everything registered in
/// `teardown` so far is released and a configuration error is returned.
async fn acquired<T, E: fmt::Display>(
    teardown: &mut Teardown,
    result: Result<T, E>,
    context: &str,
) -> Result<T, SeederError> {
    match result {
        Ok(value) => Ok(value),
        Err(e) => {
            let err = SeederError::config(format!("{}: {}", context, e));
            Err(std::mem::take(teardown).unwind(err).await)
        }
    }
}
