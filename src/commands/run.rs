//! Discover, filter, dispatch and report
//!
//! This module ties the pieces together for one invocation: build the filter
//! set, discover matching repositories, run the chosen action over them with
//! bounded parallelism, and hand back the sorted report.

use anyhow::{Context, Result};
use std::sync::Arc;

use super::exec::CommandAction;
use super::status::StatusAction;
use crate::core::{
    find_repos, FilterSet, Mode, RepoAction, Report, ResultAggregator, RunConfig,
    TaskOrchestrator, NO_REPOS_MESSAGE,
};

/// Handles one run of the tool
///
/// Fatal problems (bad configuration, unresolvable root, traversal errors)
/// are returned as errors before any task starts. Everything after that is
/// folded into the returned [`Report`].
pub async fn handle_run(config: &RunConfig) -> Result<Report> {
    handle_run_with_filters(config, FilterSet::from_config(config)).await
}

/// Like [`handle_run`], but with a caller-built filter set in place of the
/// branch, dirty and clean flags of `config`
pub async fn handle_run_with_filters(config: &RunConfig, filters: FilterSet) -> Result<Report> {
    config.validate()?;

    let repositories = find_repos(&config.root, &filters)
        .await
        .with_context(|| format!("failed to scan {}", config.root.display()))?;

    if repositories.is_empty() {
        eprintln!("{NO_REPOS_MESSAGE}");
        return Ok(Report::new(Vec::new(), false));
    }

    tracing::info!(
        repositories = repositories.len(),
        parallel = config.parallel,
        "dispatching tasks"
    );

    let action: Arc<dyn RepoAction> = match &config.mode {
        Mode::Status => Arc::new(StatusAction::for_repositories(&repositories)),
        Mode::Command(command) => Arc::new(CommandAction::new(command.clone())),
    };

    let aggregator = Arc::new(ResultAggregator::new());
    let completed = TaskOrchestrator::new(config.parallel)
        .run(&repositories, action, Arc::clone(&aggregator))
        .await?;
    tracing::debug!(completed, "all tasks finished");

    Ok(aggregator.report())
}
