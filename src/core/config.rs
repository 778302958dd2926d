//! Configuration constants and run settings

use anyhow::{bail, Result};
use std::path::PathBuf;
use std::time::Duration;

// Progress configuration
pub const PROGRESS_TICK_INTERVAL: Duration = Duration::from_secs(1);
pub const PROGRESS_ICON: &str = "⚡️";
pub const PROGRESS_MAX_DOTS: usize = 3;

// UI Constants
pub const NO_REPOS_MESSAGE: &str = "No git repositories found.";

// Result block formatting
pub const OUTPUT_INDENT: &str = "  ";
pub const SUCCESS_MARKER: &str = "✅️";
pub const FAILURE_MARKER: &str = "❌";

/// Name of the directory that marks a repository root
pub const GIT_DIR_NAME: &str = ".git";

/// Determines the degree of parallelism for per-repository tasks
///
/// Priority order:
/// 1. explicit value (CLI flag or `GITS_PARALLEL`) → N, at least 1
/// 2. default → number of available CPUs
pub fn get_parallelism(requested: Option<usize>) -> usize {
    match requested {
        Some(n) => n.max(1),
        None => num_cpus::get().max(1),
    }
}

/// An external executable plus its arguments
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Splits `argv` into program and arguments; `None` when empty
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Command line as typed, for logging
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// What to do with each matched repository
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Print a one-line branch summary per repository
    Status,
    /// Run an external command inside each repository
    Command(CommandSpec),
}

/// Settings for one run, produced by the CLI layer
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Directory to scan; resolved to an absolute, symlink-free path before the walk
    pub root: PathBuf,
    pub parallel: usize,
    /// Only match repositories currently on this branch
    pub branch: Option<String>,
    pub dirty: bool,
    pub clean: bool,
    pub mode: Mode,
}

impl RunConfig {
    pub fn new(root: impl Into<PathBuf>, mode: Mode) -> Self {
        Self {
            root: root.into(),
            parallel: get_parallelism(None),
            branch: None,
            dirty: false,
            clean: false,
            mode,
        }
    }

    /// Checks the pre-conditions the orchestrator relies on
    pub fn validate(&self) -> Result<()> {
        if self.parallel == 0 {
            bail!("parallelism must be a positive integer");
        }
        if let Mode::Command(command) = &self.mode {
            if command.program.is_empty() {
                bail!("no command provided");
            }
        }
        Ok(())
    }
}
