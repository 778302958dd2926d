//! Built-in branch status summary
//!
//! Each field comes from its own git query. A query that fails degrades that
//! field to a safe default instead of failing the whole line, and status
//! results never count as task failures.

use async_trait::async_trait;

use crate::core::{RepoAction, Repository, TaskOutcome};
use crate::git::{self, RemoteSyncState, StatusLine, FALLBACK_DEFAULT_BRANCH};

/// Width of the path column: the longest relative path among `repositories`
pub fn column_width(repositories: &[Repository]) -> usize {
    repositories
        .iter()
        .map(|repo| repo.relative_path.chars().count())
        .max()
        .unwrap_or(0)
}

/// Gathers the status fields for one repository, running the queries concurrently
pub async fn inspect_repo(repo: &Repository) -> StatusLine {
    let path = repo.path.as_path();
    let (current, default, remote_sync, clean, branches) = tokio::join!(
        git::current_branch(path),
        git::default_branch(path),
        git::remote_sync_state(path),
        git::is_clean(path),
        git::local_branches(path),
    );

    let current_branch = current.unwrap_or_else(|e| format!("!{e}"));

    let default_branch = default.unwrap_or_else(|e| {
        tracing::debug!(repo = %repo.relative_path, error = %e, "default branch unavailable");
        FALLBACK_DEFAULT_BRANCH.to_string()
    });

    let remote_sync = remote_sync.unwrap_or_else(|e| {
        tracing::debug!(repo = %repo.relative_path, error = %e, "remote sync state unavailable");
        RemoteSyncState::SyncRemote
    });

    let clean = clean.unwrap_or_else(|e| {
        tracing::debug!(repo = %repo.relative_path, error = %e, "worktree state unavailable");
        false
    });

    let branches = branches.unwrap_or_else(|e| {
        tracing::debug!(repo = %repo.relative_path, error = %e, "local branches unavailable");
        Vec::new()
    });

    StatusLine::new(
        repo.relative_path.clone(),
        current_branch,
        default_branch,
        remote_sync,
        clean,
        branches,
    )
}

/// Renders one status line per repository, aligned to a shared column width
pub struct StatusAction {
    width: usize,
}

impl StatusAction {
    /// `width` must be computed over every matched repository before any line is rendered
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn for_repositories(repositories: &[Repository]) -> Self {
        Self::new(column_width(repositories))
    }
}

#[async_trait]
impl RepoAction for StatusAction {
    async fn run(&self, repo: &Repository) -> TaskOutcome {
        let line = inspect_repo(repo).await;
        TaskOutcome::success(line.render(self.width))
    }
}
