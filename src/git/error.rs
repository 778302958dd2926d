//! Errors raised at the git query boundary

use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to run git {args}: {source}")]
    Spawn {
        args: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {args} failed ({status}){}", stderr_suffix(.stderr))]
    Failed {
        args: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("unexpected output from git {args}: {detail}")]
    UnexpectedOutput { args: String, detail: String },
}

/// First line of stderr, so a failure still fits on a single status line
fn stderr_suffix(stderr: &str) -> String {
    match stderr.lines().map(str::trim).find(|line| !line.is_empty()) {
        Some(line) => format!(": {line}"),
        None => String::new(),
    }
}
