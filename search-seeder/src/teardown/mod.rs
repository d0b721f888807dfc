//! Scoped release of the job's collaborators.
//!
//! A `Teardown` is an ordered list of named release steps. Every step runs
//! even if an earlier one failed; failures are logged and collected, never
//! propagated.

use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use tracing::{info, warn};

use crate::errors::SeedError;

type ReleaseFn = Box<dyn FnOnce() -> BoxFuture<'static, Result<(), SeedError>> + Send>;

/// A release step that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeardownFailure {
    /// Name of the released resource.
    pub resource: String,
    /// Rendered error.
    pub message: String,
}

impl fmt::Display for TeardownFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.resource, self.message)
    }
}

/// Ordered release steps.
#[derive(Default)]
pub struct Teardown {
    steps: Vec<(String, ReleaseFn)>,
}

impl Teardown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a release step named `resource`.
    pub fn push<F, Fut>(&mut self, resource: impl Into<String>, release: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), SeedError>> + Send + 'static,
    {
        let step: ReleaseFn =
            Box::new(move || -> BoxFuture<'static, Result<(), SeedError>> { Box::pin(release()) });
        self.steps.push((resource.into(), step));
    }

    /// Builder form of [`Teardown::push`].
    pub fn with<F, Fut>(mut self, resource: impl Into<String>, release: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), SeedError>> + Send + 'static,
    {
        self.push(resource, release);
        self
    }

    /// Names of the registered steps, in release order.
    pub fn resources(&self) -> Vec<&str> {
        self.steps.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order and return the ones that failed.
    pub async fn run(self) -> Vec<TeardownFailure> {
        let mut failures = Vec::new();

        for (resource, release) in self.steps {
            match release().await {
                Ok(()) => info!(resource = %resource, "Released"),
                Err(e) => {
                    warn!(resource = %resource, error = %e, "Failed to release");
                    failures.push(TeardownFailure {
                        resource,
                        message: e.to_string(),
                    });
                }
            }
        }

        failures
    }

    /// Release everything registered so far after a failed setup step and
    /// hand `err` back to the caller.
    pub async fn unwind<E: fmt::Display>(self, err: E) -> E {
        warn!(
            error = %err,
            resources = ?self.resources(),
            "Setup failed, releasing acquired resources"
        );
        let failures = self.run().await;
        if !failures.is_empty() {
            warn!(failed = failures.len(), "Partial release after setup failure");
        }
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder(
        log: &Arc<Mutex<Vec<&'static str>>>,
        name: &'static str,
        fail: bool,
    ) -> impl FnOnce() -> BoxFuture<'static, Result<(), SeedError>> + Send + 'static {
        let log = log.clone();
        move || -> BoxFuture<'static, Result<(), SeedError>> {
            Box::pin(async move {
                log.lock().unwrap().push(name);
                if fail {
                    Err(SeedError::teardown(name, "connection reset"))
                } else {
                    Ok(())
                }
            })
        }
    }

    #[tokio::test]
    async fn test_runs_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let teardown = Teardown::new()
            .with("posts database", recorder(&log, "posts database", false))
            .with("users database", recorder(&log, "users database", false))
            .with("cache", recorder(&log, "cache", false));

        assert_eq!(
            teardown.resources(),
            vec!["posts database", "users database", "cache"]
        );

        let failures = teardown.run().await;

        assert!(failures.is_empty());
        assert_eq!(
            *log.lock().unwrap(),
            vec!["posts database", "users database", "cache"]
        );
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_later_steps() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let teardown = Teardown::new()
            .with("posts database", recorder(&log, "posts database", true))
            .with("cache", recorder(&log, "cache", false))
            .with("search engine", recorder(&log, "search engine", true));

        let failures = teardown.run().await;

        assert_eq!(
            *log.lock().unwrap(),
            vec!["posts database", "cache", "search engine"]
        );
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].resource, "posts database");
        assert_eq!(failures[1].resource, "search engine");
        assert!(failures[0].message.contains("connection reset"));
    }

    #[tokio::test]
    async fn test_empty_teardown() {
        let teardown = Teardown::new();
        assert!(teardown.is_empty());
        assert!(teardown.run().await.is_empty());
    }

    #[tokio::test]
    async fn test_unwind_releases_and_returns_error() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let teardown = Teardown::new()
            .with("posts database", recorder(&log, "posts database", false))
            .with("users database", recorder(&log, "users database", true));

        let err = teardown.unwind("redis refused connection").await;

        assert_eq!(err, "redis refused connection");
        assert_eq!(
            *log.lock().unwrap(),
            vec!["posts database", "users database"]
        );
    }
}
