//! Username set seeding.
//!
//! Copies every username from the users database into a cache set, once.
//! A non-empty set is left untouched; reseeding requires clearing it
//! externally.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::errors::SeedError;
use search_seeder_repository::{UsernameSetStore, UsernameSource};

/// Default cache key of the username set.
pub const DEFAULT_USERNAMES_SET_KEY: &str = "usernames";

/// Outcome of a username seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsernameSeedOutcome {
    /// The set already had `existing` members; the source was not read.
    Skipped { existing: u64 },
    /// `count` normalized usernames were added.
    Seeded { count: usize },
}

/// Trim, lower-case and de-duplicate usernames, dropping absent and empty
/// ones. The first occurrence wins, so the output keeps source order.
pub fn normalize_usernames<I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    let mut seen = HashSet::new();
    raw.into_iter()
        .flatten()
        .map(|name| name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Seeds the username set from the users database.
pub struct UsernameSeeder {
    source: Arc<dyn UsernameSource>,
    store: Arc<dyn UsernameSetStore>,
    set_key: String,
}

impl UsernameSeeder {
    pub fn new(
        source: Arc<dyn UsernameSource>,
        store: Arc<dyn UsernameSetStore>,
        set_key: impl Into<String>,
    ) -> Self {
        Self {
            source,
            store,
            set_key: set_key.into(),
        }
    }

    /// Seed the set unless it already has members.
    #[instrument(skip(self), fields(set_key = %self.set_key))]
    pub async fn seed_usernames(&self) -> Result<UsernameSeedOutcome, SeedError> {
        let existing = self.store.cardinality(&self.set_key).await?;
        if existing > 0 {
            info!(existing = existing, "Username set already seeded, skipping");
            return Ok(UsernameSeedOutcome::Skipped { existing });
        }

        let raw = self.source.fetch_usernames().await?;
        let read = raw.len();
        let usernames = normalize_usernames(raw);

        if !usernames.is_empty() {
            self.store.add_members(&self.set_key, &usernames).await?;
        }

        info!(read = read, seeded = usernames.len(), "Username set seeded");
        Ok(UsernameSeedOutcome::Seeded {
            count: usernames.len(),
        })
    }
}
