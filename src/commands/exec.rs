//! External command execution inside a repository

use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};

use crate::core::{CommandSpec, RepoAction, Repository, TaskOutcome};
use crate::core::{FAILURE_MARKER, OUTPUT_INDENT, SUCCESS_MARKER};
use crate::utils::{BOLD, RESET};

const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Captured output and exit code of one command run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandOutput {
    /// stdout and stderr, interleaved in arrival order
    pub output: String,
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Reads the next chunk from `reader`, or never resolves once it is exhausted
async fn read_chunk<R: AsyncRead + Unpin>(reader: &mut Option<R>, buf: &mut [u8]) -> io::Result<usize> {
    match reader {
        Some(reader) => reader.read(buf).await,
        None => std::future::pending().await,
    }
}

/// Drains stdout and stderr of `child` into one buffer as data arrives
async fn capture_combined(child: &mut Child) -> io::Result<Vec<u8>> {
    let mut stdout = child.stdout.take();
    let mut stderr = child.stderr.take();
    let mut out_buf = vec![0u8; READ_CHUNK_SIZE];
    let mut err_buf = vec![0u8; READ_CHUNK_SIZE];
    let mut combined = Vec::new();

    while stdout.is_some() || stderr.is_some() {
        tokio::select! {
            read = read_chunk(&mut stdout, &mut out_buf) => match read? {
                0 => stdout = None,
                n => combined.extend_from_slice(&out_buf[..n]),
            },
            read = read_chunk(&mut stderr, &mut err_buf) => match read? {
                0 => stderr = None,
                n => combined.extend_from_slice(&err_buf[..n]),
            },
        }
    }

    Ok(combined)
}

/// Runs `command` with `path` as its working directory
///
/// A normal exit reports the process's own code. Failing to start, failing
/// to read output, or being killed by a signal all report 1. There is no
/// timeout and no retry.
pub async fn run_command(path: &Path, command: &CommandSpec) -> CommandOutput {
    let mut child = match Command::new(&command.program)
        .args(&command.args)
        .current_dir(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            return CommandOutput {
                output: format!("failed to start `{}`: {e}\n", command.program),
                exit_code: 1,
            };
        }
    };

    let (mut output, read_error) = match capture_combined(&mut child).await {
        Ok(bytes) => (String::from_utf8_lossy(&bytes).into_owned(), None),
        Err(e) => (String::new(), Some(e)),
    };

    let exit_code = match child.wait().await {
        Ok(status) if read_error.is_none() => status.code().unwrap_or(1),
        Ok(_) => 1,
        Err(e) => {
            output.push_str(&format!("failed to wait for `{}`: {e}\n", command.program));
            1
        }
    };

    if let Some(e) = read_error {
        output.push_str(&format!("failed to read output of `{}`: {e}\n", command.program));
    }

    CommandOutput { output, exit_code }
}

/// Formats the labelled result block for one repository
///
/// The header carries the success or failure marker and the relative path;
/// the captured output follows on the next line, every line indented.
pub fn format_command_result(relative_path: &str, result: &CommandOutput) -> String {
    let marker = if result.success() {
        SUCCESS_MARKER
    } else {
        FAILURE_MARKER
    };
    let body = result.output.replace('\n', &format!("\n{OUTPUT_INDENT}"));
    format!("{BOLD}{marker} {relative_path}:{RESET}\n{OUTPUT_INDENT}{body}")
}

/// Runs one external command in every repository
pub struct CommandAction {
    command: CommandSpec,
}

impl CommandAction {
    pub fn new(command: CommandSpec) -> Self {
        Self { command }
    }
}

#[async_trait]
impl RepoAction for CommandAction {
    async fn run(&self, repo: &Repository) -> TaskOutcome {
        let result = run_command(&repo.path, &self.command).await;
        tracing::debug!(
            repo = %repo.relative_path,
            command = %self.command.display(),
            exit_code = result.exit_code,
            "command finished"
        );

        let text = format_command_result(&repo.relative_path, &result);
        if result.success() {
            TaskOutcome::success(text)
        } else {
            TaskOutcome::failure(text)
        }
    }
}
