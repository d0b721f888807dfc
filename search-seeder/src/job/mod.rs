//! The seed job: both phases in fixed order, then teardown.

use tracing::{error, info, warn};

use crate::errors::SeedError;
use crate::orchestrator::{ReindexOrchestrator, ReindexSummary};
use crate::teardown::{Teardown, TeardownFailure};
use crate::usernames::{UsernameSeedOutcome, UsernameSeeder};

/// What a job run did.
#[derive(Debug)]
pub struct SeedReport {
    /// Outcome of the username phase, if it completed.
    pub usernames: Option<UsernameSeedOutcome>,
    /// Outcome of the post reindex phase, if it completed.
    pub reindex: Option<ReindexSummary>,
    /// The failure that stopped the run, if any.
    pub error: Option<SeedError>,
    /// Release steps that failed.
    pub teardown_failures: Vec<TeardownFailure>,
}

impl SeedReport {
    /// Whether both phases completed.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Runs the username phase, then the post reindex, then releases every
/// collaborator.
///
/// The first failing phase stops the run: the posts phase does not start
/// if the username phase failed. Teardown always runs.
pub struct SeedJob {
    usernames: UsernameSeeder,
    reindex: ReindexOrchestrator,
    teardown: Teardown,
}

impl SeedJob {
    pub fn new(usernames: UsernameSeeder, reindex: ReindexOrchestrator, teardown: Teardown) -> Self {
        Self {
            usernames,
            reindex,
            teardown,
        }
    }

    /// Run the job to completion. Failures are logged and reported, never
    /// returned.
    pub async fn run(self) -> SeedReport {
        let Self {
            usernames,
            mut reindex,
            teardown,
        } = self;

        info!("Starting seed job");

        let mut report = SeedReport {
            usernames: None,
            reindex: None,
            error: None,
            teardown_failures: Vec::new(),
        };

        let phases = async {
            info!("[1/2] Seeding usernames");
            let outcome = usernames.seed_usernames().await?;
            report.usernames = Some(outcome);

            info!(index = %reindex.config().index_name, "[2/2] Reindexing posts");
            let summary = reindex.run().await?;
            report.reindex = Some(summary);

            Ok::<(), SeedError>(())
        };

        match phases.await {
            Ok(()) => info!("Seed job completed successfully"),
            Err(e) => {
                error!(error = %e, "Seed job failed");
                report.error = Some(e);
            }
        }

        info!(steps = teardown.len(), "Releasing resources");
        report.teardown_failures = teardown.run().await;
        if !report.teardown_failures.is_empty() {
            warn!(
                failed = report.teardown_failures.len(),
                "Some resources were not released cleanly"
            );
        }

        report
    }
}
