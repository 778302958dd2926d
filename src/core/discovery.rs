//! Repository discovery
//!
//! Walks the tree below a root directory and reports every directory that
//! directly contains a `.git` directory. Discovery never descends into a
//! repository root, so nested repositories are not reported separately.

use ignore::{DirEntry, WalkBuilder};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::config::GIT_DIR_NAME;
use super::filter::FilterSet;
use crate::utils::{relative_display_path, resolve_root};

/// A repository found during discovery
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Repository {
    /// Absolute, symlink-free path of the repository root
    pub path: PathBuf,
    /// Path relative to the scanned root, for display only
    pub relative_path: String,
}

impl Repository {
    pub fn new(root: &Path, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let relative_path = relative_display_path(root, &path);
        Self {
            path,
            relative_path,
        }
    }
}

/// Fatal discovery failures; no repository is processed after one of these
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("cannot resolve directory {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error walking the directory tree: {0}")]
    Walk(#[from] ignore::Error),
}

/// Returns true when `path` directly contains a `.git` directory
pub fn is_git_repo(path: &Path) -> bool {
    path.join(GIT_DIR_NAME).is_dir()
}

/// Prunes every directory whose parent is a repository root
fn inside_repository(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_some_and(|ft| ft.is_dir())
        && entry.path().parent().is_some_and(is_git_repo)
}

/// Finds the repositories below `root` that pass every filter in `filters`
///
/// `root` is resolved to an absolute, symlink-free path first. Filters run
/// as each repository root is reached; a repository is never descended into
/// whether or not it matched. Any I/O error during the walk aborts discovery.
/// The result is sorted by path.
pub async fn find_repos(root: &Path, filters: &FilterSet) -> Result<Vec<Repository>, DiscoveryError> {
    let root = resolve_root(root).map_err(|source| DiscoveryError::Resolve {
        path: root.to_path_buf(),
        source,
    })?;
    tracing::debug!(root = %root.display(), filters = filters.len(), "scanning for repositories");

    let walker = WalkBuilder::new(&root)
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(|entry| !inside_repository(entry))
        .build();

    let mut repositories = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_some_and(|ft| ft.is_dir()) || !is_git_repo(entry.path()) {
            continue;
        }

        if filters.accepts(entry.path()).await {
            tracing::debug!(path = %entry.path().display(), "repository matched");
            repositories.push(Repository::new(&root, entry.path()));
        }
    }

    repositories.sort_by(|a, b| a.path.as_os_str().cmp(b.path.as_os_str()));
    Ok(repositories)
}
