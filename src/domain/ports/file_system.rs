//! FileSystem port - abstraction over file I/O operations
//!
//! Tasks write through this trait so the build order can be observed in
//! tests without touching the real disk layout.

use std::path::{Path, PathBuf};

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug)]
pub enum FsError {
    /// File not found
    NotFound(PathBuf),
    /// Permission denied
    PermissionDenied(PathBuf),
    /// I/O error
    Io(PathBuf, std::io::Error),
}

impl FsError {
    /// Classify an `io::Error` raised while touching `path`
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io(path.to_path_buf(), err),
        }
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "File not found: {}", path.display()),
            FsError::PermissionDenied(path) => {
                write!(f, "Permission denied: {}", path.display())
            }
            FsError::Io(path, err) => write!(f, "I/O error on {}: {}", path.display(), err),
        }
    }
}

impl std::error::Error for FsError {}

impl From<FsError> for crate::error::PipelineError {
    fn from(err: FsError) -> Self {
        match err {
            FsError::NotFound(path) => crate::error::PipelineError::MissingInput { path },
            FsError::PermissionDenied(path) => crate::error::PipelineError::io(
                path,
                std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            ),
            FsError::Io(path, source) => crate::error::PipelineError::Io { path, source },
        }
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O with atomic writes
pub trait FileSystem: Send + Sync {
    /// Read file content as bytes
    fn read(&self, path: &Path) -> FsResult<Vec<u8>>;

    /// Write content to file atomically, creating parent directories
    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()>;

    /// Check if a file or directory exists
    fn exists(&self, path: &Path) -> bool;

    /// Remove every entry inside `dir`, keeping `dir` itself.
    /// Creates `dir` when it does not exist. Returns the number of
    /// top-level entries removed.
    fn clear_dir(&self, dir: &Path) -> FsResult<usize>;

    /// Read file content as UTF-8 text
    fn read_to_string(&self, path: &Path) -> FsResult<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| {
            FsError::Io(
                path.to_path_buf(),
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })
    }
}
