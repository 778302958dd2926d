//! Public API for the core module.
//!
//! This module provides the stable public API for core functionality including:
//! - Repository discovery
//! - Filters
//! - Task orchestration and result aggregation
//! - Configuration utilities

// Configuration
pub use super::config::{get_parallelism, CommandSpec, Mode, RunConfig};
pub use super::config::{FAILURE_MARKER, NO_REPOS_MESSAGE, OUTPUT_INDENT, SUCCESS_MARKER};

// Discovery
pub use super::discovery::{find_repos, is_git_repo, DiscoveryError, Repository};

// Filters
pub use super::filter::{BranchFilter, CleanFilter, DirtyFilter, FilterSet, RepoFilter};

// Orchestration
pub use super::aggregator::{Report, ResultAggregator, TaskOutcome};
pub use super::orchestrator::{RepoAction, TaskOrchestrator};
pub use super::progress::{render_frame, ProgressHandle, ProgressReporter};
