//! Test fixtures and builders

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::git::{checkout_new_branch, create_test_commit, setup_git_repo};

/// A scratch directory that repositories are built into
pub struct TestTree {
    pub temp_dir: TempDir,
}

impl TestTree {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Creates a plain directory (no repository) below the root
    pub fn create_dir(&self, relative: &str) -> Result<PathBuf> {
        let path = self.root().join(relative);
        std::fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Builds a repository at `relative` below the root
    pub fn repo(&self, relative: &str) -> TestRepoBuilder {
        TestRepoBuilder::new(self.root().join(relative))
    }
}

/// A repository created by [`TestRepoBuilder`]
pub struct TestRepo {
    pub path: PathBuf,
}

impl TestRepo {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a new file in the repository
    pub fn create_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let file_path = self.path.join(name);
        std::fs::write(&file_path, content)?;
        Ok(file_path)
    }
}

/// Builder for creating test repositories
pub struct TestRepoBuilder {
    path: PathBuf,
    branch: Option<String>,
    extra_branches: Vec<String>,
    dirty: bool,
    with_commits: usize,
}

impl TestRepoBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            branch: None,
            extra_branches: Vec::new(),
            dirty: false,
            with_commits: 1,
        }
    }

    /// Leaves the repository checked out on `branch`
    pub fn on_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Creates `branch` without checking it out
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.extra_branches.push(branch.into());
        self
    }

    /// Leaves an untracked file in the worktree
    pub fn dirty(mut self) -> Self {
        self.dirty = true;
        self
    }

    pub fn with_commits(mut self, count: usize) -> Self {
        self.with_commits = count.max(1);
        self
    }

    pub fn build(self) -> Result<TestRepo> {
        std::fs::create_dir_all(&self.path)?;
        setup_git_repo(&self.path)?;

        create_test_commit(&self.path, "README.md", "# Test Repo", "Initial commit")?;
        for i in 2..=self.with_commits {
            create_test_commit(
                &self.path,
                &format!("file{}.txt", i),
                &format!("Content {}", i),
                &format!("Commit {}", i),
            )?;
        }

        for branch in &self.extra_branches {
            super::git::git(&self.path, &["branch", branch])?;
        }

        if let Some(branch) = &self.branch {
            checkout_new_branch(&self.path, branch)?;
        }

        let repo = TestRepo { path: self.path };
        if self.dirty {
            repo.create_file("untracked.txt", "work in progress")?;
        }

        Ok(repo)
    }
}
