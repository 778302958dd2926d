//! Common test utilities and helpers
#![allow(dead_code, unused_imports)]

pub mod fixtures;
pub mod git;
pub mod terminal;

pub use self::fixtures::{TestRepo, TestRepoBuilder, TestTree};
pub use self::git::{
    checkout_new_branch, clone_repo, create_multiple_repos, create_test_commit, git,
    is_git_available, setup_git_repo,
};
pub use self::terminal::strip_ansi;
