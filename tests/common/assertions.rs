//! Assertion macros with descriptive failure messages.

use std::path::Path;

/// List all files under a directory, relative to it, sorted
pub fn list_all_files(dir: &Path) -> Vec<String> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) {
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    walk(root, &path, out);
                } else if let Ok(rel) = path.strip_prefix(root) {
                    out.push(rel.to_string_lossy().replace('\\', "/"));
                }
            }
        }
    }

    let mut files = Vec::new();
    walk(dir, dir, &mut files);
    files.sort();
    files
}

/// Assert that a file exists under the build root.
///
/// # Example
/// ```ignore
/// assert_built!(env, "css/main.min.css");
/// ```
#[macro_export]
macro_rules! assert_built {
    ($env:expr, $path:expr) => {
        let full_path = $env.build_path($path);
        assert!(
            full_path.is_file(),
            "Expected '{}' in the build, but it doesn't exist.\n\
             Build contents:\n  {}",
            $path,
            $crate::common::list_all_files(&$env.build_path("")).join("\n  ")
        );
    };
}

/// Assert that a file does NOT exist under the build root.
#[macro_export]
macro_rules! assert_not_built {
    ($env:expr, $path:expr) => {
        let full_path = $env.build_path($path);
        assert!(
            !full_path.exists(),
            "Expected '{}' to NOT be built, but it exists.",
            $path
        );
    };
}
