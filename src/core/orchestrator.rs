//! Bounded-parallel execution of one action per repository
//!
//! Tasks are admitted in repository order through a semaphore sized to the
//! configured parallelism; each admitted task runs on the tokio worker pool
//! and releases its permit when it finishes. Completion order is whatever
//! the tasks make of it.

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;

use super::aggregator::{ResultAggregator, TaskOutcome};
use super::config::FAILURE_MARKER;
use super::discovery::Repository;
use super::progress::ProgressReporter;
use crate::utils::{BOLD, RESET};

/// Work performed against a single repository
#[async_trait]
pub trait RepoAction: Send + Sync {
    async fn run(&self, repo: &Repository) -> TaskOutcome;
}

/// Dispatches actions over a repository list with at most `limit` running at once
pub struct TaskOrchestrator {
    limit: usize,
    show_progress: bool,
}

impl TaskOrchestrator {
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            show_progress: true,
        }
    }

    /// Disables the progress line, for library use and tests
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Runs `action` once per repository and returns once every task has completed
    ///
    /// Every task contributes exactly one result to `aggregator`; a task that
    /// panics is recorded as a failure. Returns the number of completed tasks,
    /// counted from zero on every call.
    pub async fn run(
        &self,
        repositories: &[Repository],
        action: Arc<dyn RepoAction>,
        aggregator: Arc<ResultAggregator>,
    ) -> Result<usize> {
        let total = repositories.len();
        let completed = Arc::new(AtomicUsize::new(0));
        let reporter = if self.show_progress {
            ProgressReporter::new(Arc::clone(&completed), total)
        } else {
            ProgressReporter::hidden(Arc::clone(&completed), total)
        };
        let progress = reporter.start()?;

        let semaphore = Arc::new(Semaphore::new(self.limit));
        let mut running = FuturesUnordered::new();

        for repo in repositories {
            // Admission happens here, in repository order
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .context("admission semaphore closed")?;
            tracing::debug!(repo = %repo.relative_path, "task admitted");

            let task_repo = repo.clone();
            let action = Arc::clone(&action);
            let aggregator = Arc::clone(&aggregator);
            let completed = Arc::clone(&completed);

            let handle = tokio::spawn(async move {
                let outcome = action.run(&task_repo).await;
                aggregator.record(outcome);
                completed.fetch_add(1, Ordering::Relaxed);
                drop(permit);
                tracing::debug!(repo = %task_repo.relative_path, "task completed");
            });
            let repo = repo.clone();
            running.push(async move { (handle.await, repo) });
        }

        while let Some(joined) = running.next().await {
            reap(joined, &aggregator, &completed);
        }

        progress.stop().await;
        Ok(completed.load(Ordering::Relaxed))
    }
}

/// Records a failure block for a task that panicked before recording its own result
fn reap(
    joined: (Result<(), tokio::task::JoinError>, Repository),
    aggregator: &ResultAggregator,
    completed: &AtomicUsize,
) {
    let (result, repo) = joined;
    if let Err(e) = result {
        tracing::warn!(repo = %repo.relative_path, error = %e, "task did not complete");
        aggregator.record(TaskOutcome::failure(format!(
            "{BOLD}{FAILURE_MARKER} {}:{RESET}\n  panicked: {e}",
            repo.relative_path
        )));
        completed.fetch_add(1, Ordering::Relaxed);
    }
}
