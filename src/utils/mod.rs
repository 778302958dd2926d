pub(crate) mod fs;
pub(crate) mod terminal;

// Public API - utilities used by commands
pub use fs::{relative_display_path, resolve_root};
pub use terminal::{BLUE, BOLD, BOLD_GREEN, BOLD_RED, RED, RESET};
