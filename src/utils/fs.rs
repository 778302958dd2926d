//! File system utilities

use std::io;
use std::path::{Path, PathBuf};

/// Resolves a directory to an absolute, symlink-free path.
///
/// Relative paths are interpreted against the current working directory.
pub fn resolve_root(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    absolute.canonicalize()
}

/// Returns `path` relative to `root` for display
///
/// The root itself displays as `.`; a path outside the root is shown as-is.
pub fn relative_display_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => rel.to_string_lossy().into_owned(),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}
