//! # gits
//!
//! `gits` finds every git repository below a directory and runs either an
//! arbitrary command or a built-in branch status summary in each of them,
//! a bounded number at a time. It powers the `gits` CLI tool.
//!
//! ## Core Features
//!
//! - **Discovery**: Walks the tree once, stopping at each repository root.
//! - **Filters**: Narrow the set by current branch, dirty or clean worktree.
//! - **Bounded Parallelism**: At most N repositories are processed at once.
//! - **Deterministic Output**: Results are sorted before printing.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gits::core::{find_repos, FilterSet};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let repos = find_repos(Path::new("."), &FilterSet::new()).await?;
//!     for repo in repos {
//!         println!("{}", repo.relative_path);
//!     }
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod core;
pub mod git;
pub mod utils;
