//! Repository filter pipeline
//!
//! Filters are built once from the run configuration and consulted for every
//! repository root the locator finds. A repository is kept only when every
//! filter says yes; a filter that errors counts as a no.

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use super::config::RunConfig;
use crate::git;

/// A predicate over a repository root
#[async_trait]
pub trait RepoFilter: Send + Sync {
    /// Short name used in log output
    fn name(&self) -> &str;

    /// Returns whether the repository at `path` matches
    async fn matches(&self, path: &Path) -> Result<bool>;
}

/// Matches repositories whose checked-out branch equals a target name
pub struct BranchFilter {
    branch: String,
}

impl BranchFilter {
    pub fn new(branch: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
        }
    }
}

#[async_trait]
impl RepoFilter for BranchFilter {
    fn name(&self) -> &str {
        "branch"
    }

    async fn matches(&self, path: &Path) -> Result<bool> {
        Ok(git::current_branch(path).await? == self.branch)
    }
}

/// Matches repositories with at least one uncommitted change
pub struct DirtyFilter;

#[async_trait]
impl RepoFilter for DirtyFilter {
    fn name(&self) -> &str {
        "dirty"
    }

    async fn matches(&self, path: &Path) -> Result<bool> {
        Ok(git::is_dirty(path).await?)
    }
}

/// Matches repositories with no uncommitted changes
pub struct CleanFilter;

#[async_trait]
impl RepoFilter for CleanFilter {
    fn name(&self) -> &str {
        "clean"
    }

    async fn matches(&self, path: &Path) -> Result<bool> {
        Ok(git::is_clean(path).await?)
    }
}

/// Ordered set of filters combined with logical AND
#[derive(Default)]
pub struct FilterSet {
    filters: Vec<Box<dyn RepoFilter>>,
}

impl FilterSet {
    /// An empty set, which matches every repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the branch, dirty and clean filters requested by `config`
    pub fn from_config(config: &RunConfig) -> Self {
        let mut set = Self::new();
        if let Some(branch) = config.branch.as_deref().filter(|b| !b.is_empty()) {
            set.push(BranchFilter::new(branch));
        }
        if config.dirty {
            set.push(DirtyFilter);
        }
        if config.clean {
            set.push(CleanFilter);
        }
        set
    }

    pub fn push(&mut self, filter: impl RepoFilter + 'static) {
        self.filters.push(Box::new(filter));
    }

    /// Adds a filter, builder style
    pub fn with(mut self, filter: impl RepoFilter + 'static) -> Self {
        self.push(filter);
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns true when every filter matches; stops at the first miss or error
    pub async fn accepts(&self, path: &Path) -> bool {
        for filter in &self.filters {
            match filter.matches(path).await {
                Ok(true) => {}
                Ok(false) => {
                    tracing::debug!(path = %path.display(), filter = filter.name(), "excluded by filter");
                    return false;
                }
                Err(e) => {
                    tracing::debug!(
                        path = %path.display(),
                        filter = filter.name(),
                        error = %e,
                        "filter failed, excluding repository"
                    );
                    return false;
                }
            }
        }
        true
    }
}
