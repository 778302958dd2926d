//! Git queries used by filters and the status inspector
//!
//! Each query shells out to `git` inside the repository and trusts its output
//! format. Nothing here mutates a repository.

use std::path::Path;
use tokio::process::Command;

use super::error::GitError;
use super::status::{parse_remote_sync, RemoteSyncState};

// Git command arguments
const GIT_REV_PARSE_HEAD_ARGS: &[&str] = &["rev-parse", "--abbrev-ref", "HEAD"];
const GIT_DEFAULT_BRANCH_ARGS: &[&str] = &["config", "get", "init.defaultbranch"];
const GIT_LOCAL_BRANCHES_ARGS: &[&str] = &["branch", "--format", "%(refname:short)"];
const GIT_STATUS_PORCELAIN_ARGS: &[&str] = &["status", "--porcelain"];
pub(crate) const GIT_STATUS_BRANCH_ARGS: &[&str] = &["status", "--porcelain", "--branch"];

/// Branch name used when `init.defaultbranch` is unset or empty
pub const FALLBACK_DEFAULT_BRANCH: &str = "main";

/// Runs a git command in the specified directory
/// Returns stdout on success, a [`GitError`] carrying stderr otherwise
pub async fn run_git(path: &Path, args: &[&str]) -> Result<String, GitError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .await
        .map_err(|source| GitError::Spawn {
            args: args.join(" "),
            source,
        })?;

    if !output.status.success() {
        return Err(GitError::Failed {
            args: args.join(" "),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Returns the checked-out branch name (`HEAD` when detached)
pub async fn current_branch(path: &Path) -> Result<String, GitError> {
    Ok(run_git(path, GIT_REV_PARSE_HEAD_ARGS).await?.trim().to_string())
}

/// Returns the configured `init.defaultbranch`, or `main` when it is empty
pub async fn default_branch(path: &Path) -> Result<String, GitError> {
    let value = run_git(path, GIT_DEFAULT_BRANCH_ARGS).await?;
    let value = value.trim();
    if value.is_empty() {
        Ok(FALLBACK_DEFAULT_BRANCH.to_string())
    } else {
        Ok(value.to_string())
    }
}

/// Lists local branch names in the order git reports them
pub async fn local_branches(path: &Path) -> Result<Vec<String>, GitError> {
    let output = run_git(path, GIT_LOCAL_BRANCHES_ARGS).await?;
    Ok(output
        .lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect())
}

/// Returns true when `git status --porcelain` lists at least one change
pub async fn is_dirty(path: &Path) -> Result<bool, GitError> {
    let output = run_git(path, GIT_STATUS_PORCELAIN_ARGS).await?;
    Ok(!output.trim().is_empty())
}

/// Returns true when the worktree has no uncommitted changes
pub async fn is_clean(path: &Path) -> Result<bool, GitError> {
    Ok(!is_dirty(path).await?)
}

/// Reads the branch header of `git status --porcelain --branch`
pub async fn remote_sync_state(path: &Path) -> Result<RemoteSyncState, GitError> {
    let output = run_git(path, GIT_STATUS_BRANCH_ARGS).await?;
    parse_remote_sync(&output)
}
