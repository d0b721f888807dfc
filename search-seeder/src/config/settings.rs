//! Settings read from the environment.

use std::env;

use crate::usernames::DEFAULT_USERNAMES_SET_KEY;
use crate::SeederError;
use search_seeder_repository::opensearch::POSTS_INDEX;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default Redis URL.
const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Default PostgreSQL pool size, per database.
const DEFAULT_PG_MAX_CONNECTIONS: u32 = 5;

/// Settings of a seed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeederConfig {
    pub opensearch_url: String,
    pub posts_index: String,
    pub posts_database_url: String,
    pub users_database_url: String,
    pub redis_url: String,
    pub usernames_set_key: String,
    pub pg_max_connections: u32,
}

impl SeederConfig {
    /// Read the settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `POSTS_INDEX`: Name of the posts index (default: posts_index)
    /// - `POSTS_DATABASE_URL`: Posts database connection string (required)
    /// - `USERS_DATABASE_URL`: Users database connection string (required)
    /// - `REDIS_URL`: Redis connection string (default: redis://127.0.0.1:6379)
    /// - `USERNAMES_SET_KEY`: Key of the username set (default: usernames)
    /// - `PG_MAX_CONNECTIONS`: Pool size per database (default: 5)
    pub fn from_env() -> Result<Self, SeederError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the settings through `lookup`, which returns the value of a
    /// variable if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SeederError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or_default = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| SeederError::config(format!("{} is not set", name)))
        };

        let pg_max_connections = match lookup("PG_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| {
                SeederError::config(format!("Invalid PG_MAX_CONNECTIONS '{}': {}", raw, e))
            })?,
            None => DEFAULT_PG_MAX_CONNECTIONS,
        };

        Ok(Self {
            opensearch_url: or_default("OPENSEARCH_URL", DEFAULT_OPENSEARCH_URL),
            posts_index: or_default("POSTS_INDEX", POSTS_INDEX),
            posts_database_url: required("POSTS_DATABASE_URL")?,
            users_database_url: required("USERS_DATABASE_URL")?,
            redis_url: or_default("REDIS_URL", DEFAULT_REDIS_URL),
            usernames_set_key: or_default("USERNAMES_SET_KEY", DEFAULT_USERNAMES_SET_KEY),
            pg_max_connections,
        })
    }
}
