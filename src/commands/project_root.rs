use std::path::{Path, PathBuf};

use assetpipe::config::CONFIG_FILE_NAME;

/// Discover the project root directory from an invocation directory.
///
/// Walks upward from `start` and stops at the first directory holding
/// `assetpipe.toml`. Falls back to `start` when no config is found.
pub(crate) fn discover_project_root(start: &Path) -> PathBuf {
    for dir in start.ancestors() {
        if dir.join(CONFIG_FILE_NAME).is_file() {
            return dir.to_path_buf();
        }
    }
    start.to_path_buf()
}
