//! Command line surface

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

use gits::core::{get_parallelism, CommandSpec, Mode, RunConfig};

#[derive(Parser, Debug)]
#[command(name = "gits")]
#[command(version, about = "Run a command in every git repository below the current directory")]
#[command(override_usage = "gits [OPTIONS] <COMMAND> [ARGS...]\n       gits [OPTIONS] --status")]
pub struct Cli {
    /// Number of repositories processed in parallel [default: number of CPUs]
    #[arg(short, long, env = "GITS_PARALLEL", value_parser = clap::value_parser!(u64).range(1..))]
    pub parallel: Option<u64>,

    /// Only match repositories currently on this branch
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Only match repositories with uncommitted changes
    #[arg(long)]
    pub dirty: bool,

    /// Only match repositories without uncommitted changes
    #[arg(long)]
    pub clean: bool,

    /// Print a branch summary for each repository instead of running a command
    #[arg(short, long, conflicts_with = "command")]
    pub status: bool,

    /// Directory to scan [default: current directory]
    #[arg(short = 'C', long = "directory", value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Command and arguments to run in each repository
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl Cli {
    /// Converts parsed arguments into a run configuration
    pub fn into_config(self) -> Result<RunConfig> {
        let mode = if self.status {
            Mode::Status
        } else {
            match CommandSpec::from_argv(&self.command) {
                Some(command) => Mode::Command(command),
                None => bail!("no command provided (pass a command to run, or --status)"),
            }
        };

        let root = match self.directory {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };

        let mut config = RunConfig::new(root, mode);
        config.parallel = get_parallelism(self.parallel.map(|n| n as usize));
        config.branch = self.branch;
        config.dirty = self.dirty;
        config.clean = self.clean;
        Ok(config)
    }
}
