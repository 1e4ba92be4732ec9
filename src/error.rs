//! Error types for assetpipe
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Main error type for pipeline operations
#[derive(Error, Debug)]
pub enum PipelineError {
    /// IO error on a specific path
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error with no useful path attached
    #[error("IO error: {0}")]
    BareIo(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// A configured glob does not compile
    #[error("invalid glob '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// A required input file is missing
    #[error("required file not found: {path}")]
    MissingInput { path: PathBuf },

    /// SCSS compilation failed
    #[error("failed to compile {file}: {message}")]
    Scss { file: PathBuf, message: String },

    /// Compiled CSS could not be post-processed
    #[error("failed to process CSS {file}: {message}")]
    Css { file: PathBuf, message: String },

    /// Image optimization failed
    #[error("failed to optimize image {file}: {message}")]
    Image { file: PathBuf, message: String },

    /// Refusing to clear a directory that holds the project or its sources
    #[error("refusing to clean '{path}': it contains the project or source root")]
    UnsafeClean { path: PathBuf },

    /// File watcher could not be set up
    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),

    /// Live-reload server failure
    #[error("live-reload server error: {message}")]
    Server { message: String },

    /// One or more tasks of a composite run failed
    #[error("{failed} of {total} tasks failed")]
    TasksFailed { failed: usize, total: usize },
}

impl PipelineError {
    /// Attach a path to an `io::Error`
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_display_scss() {
        let err = PipelineError::Scss {
            file: PathBuf::from("src/css/imports.scss"),
            message: "expected \";\"".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to compile src/css/imports.scss: expected \";\""
        );
    }

    #[test]
    fn test_error_display_io_carries_path() {
        let err = PipelineError::io(
            "build/css",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("build/css"));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_display_tasks_failed() {
        let err = PipelineError::TasksFailed {
            failed: 2,
            total: 6,
        };
        assert_eq!(err.to_string(), "2 of 6 tasks failed");
    }
}
