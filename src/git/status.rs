//! Remote sync state and the rendered branch status line

use super::error::GitError;
use super::operations::GIT_STATUS_BRANCH_ARGS;
use crate::utils::{BLUE, BOLD, BOLD_GREEN, BOLD_RED, RED, RESET};

const BRANCH_HEADER_PREFIX: &str = "##";
const BEHIND_MARKER: &str = "[behind";
const AHEAD_MARKER: &str = "[ahead";

const DIRTY_SYMBOL: &str = "📝";
const BEHIND_SYMBOL: &str = "😰";
const AHEAD_SYMBOL: &str = "🏎💨";

/// Relationship between the current branch and its upstream
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RemoteSyncState {
    /// Upstream has commits the local branch lacks
    BehindRemote,
    /// In sync, or no upstream information available
    #[default]
    SyncRemote,
    /// Local branch has commits not yet on the upstream
    AheadRemote,
}

impl RemoteSyncState {
    /// Returns the emoji symbol for this state (empty when in sync)
    pub fn symbol(&self) -> &'static str {
        match self {
            RemoteSyncState::BehindRemote => BEHIND_SYMBOL,
            RemoteSyncState::SyncRemote => "",
            RemoteSyncState::AheadRemote => AHEAD_SYMBOL,
        }
    }
}

/// Parses the first line of `git status --porcelain --branch`
///
/// Only a bracket opening with `behind` or `ahead` counts, so a diverged
/// branch (`[ahead N, behind M]`) reads as ahead.
pub fn parse_remote_sync(output: &str) -> Result<RemoteSyncState, GitError> {
    let first_line = output.lines().next().unwrap_or("");

    if !first_line.starts_with(BRANCH_HEADER_PREFIX) {
        return Err(GitError::UnexpectedOutput {
            args: GIT_STATUS_BRANCH_ARGS.join(" "),
            detail: format!("first line `{first_line}` does not start with `{BRANCH_HEADER_PREFIX}`"),
        });
    }

    if first_line.contains(BEHIND_MARKER) {
        Ok(RemoteSyncState::BehindRemote)
    } else if first_line.contains(AHEAD_MARKER) {
        Ok(RemoteSyncState::AheadRemote)
    } else {
        Ok(RemoteSyncState::SyncRemote)
    }
}

/// Everything shown for one repository in status mode
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusLine {
    pub relative_path: String,
    pub current_branch: String,
    pub default_branch: String,
    pub remote_sync: RemoteSyncState,
    pub clean: bool,
    /// Local branches other than the current one, sorted
    pub other_branches: Vec<String>,
}

impl StatusLine {
    /// Builds a status line, dropping the current branch from `local_branches` and sorting the rest
    pub fn new(
        relative_path: impl Into<String>,
        current_branch: String,
        default_branch: String,
        remote_sync: RemoteSyncState,
        clean: bool,
        local_branches: Vec<String>,
    ) -> Self {
        let mut other_branches: Vec<String> = local_branches
            .into_iter()
            .filter(|name| *name != current_branch)
            .collect();
        other_branches.sort();

        Self {
            relative_path: relative_path.into(),
            current_branch,
            default_branch,
            remote_sync,
            clean,
            other_branches,
        }
    }

    pub fn on_default_branch(&self) -> bool {
        self.current_branch == self.default_branch
    }

    /// Dirty and remote markers, empty when there is nothing to flag
    pub fn annotation(&self) -> String {
        let mut status = String::new();
        if !self.clean {
            status.push_str(DIRTY_SYMBOL);
        }
        status.push_str(self.remote_sync.symbol());
        status
    }

    /// Renders the line with the path column left-justified to `width`
    pub fn render(&self, width: usize) -> String {
        let branch_color = if self.on_default_branch() {
            BOLD_GREEN
        } else {
            BOLD_RED
        };

        let mut line = format!(
            "{BOLD}{:<width$}{RESET} [{branch_color}{}{RESET}]",
            self.relative_path, self.current_branch
        );

        let annotation = self.annotation();
        if !annotation.is_empty() {
            line.push_str(&format!("{RED}({RESET}{annotation}{RED}){RESET}"));
        }

        for name in &self.other_branches {
            line.push_str(&format!(" [{BLUE}{name}{RESET}]"));
        }

        line
    }
}
