//! Per-repository actions and the top-level run flow

pub mod exec;
pub mod run;
pub mod status;

pub use exec::{format_command_result, run_command, CommandAction, CommandOutput};
pub use run::{handle_run, handle_run_with_filters};
pub use status::{column_width, inspect_repo, StatusAction};
