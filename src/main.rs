//! gits: run a command in every git repository below a directory
//!
//! Prints one labelled block per repository (or one status line with
//! `--status`), sorted, and exits 1 if any command failed.

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use gits::commands::handle_run;

mod cli;

use cli::Cli;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = cli.into_config()?;
    tracing::debug!(root = %config.root.display(), parallel = config.parallel, "starting");

    let report = handle_run(&config).await?;
    report.print();
    Ok(ExitCode::from(report.exit_code()))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("gits: {e:#}");
            ExitCode::FAILURE
        }
    }
}
