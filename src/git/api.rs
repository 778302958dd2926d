//! Public API for git queries.
//!
//! This module provides the stable public API for git-related functionality:
//! - Branch introspection (current, default, local branches)
//! - Worktree cleanliness
//! - Remote sync state parsing and status line rendering
//!
//! ## Example: Checking for changes
//!
//! ```rust,no_run
//! use gits::git::is_dirty;
//! use std::path::Path;
//!
//! async fn check(path: &Path) {
//!     if is_dirty(path).await.unwrap_or(false) {
//!         println!("Repository has changes");
//!     }
//! }
//! ```

// Errors
pub use super::error::GitError;

// Queries
pub use super::operations::{
    current_branch, default_branch, is_clean, is_dirty, local_branches, remote_sync_state,
    run_git, FALLBACK_DEFAULT_BRANCH,
};

// Status
pub use super::status::{parse_remote_sync, RemoteSyncState, StatusLine};
