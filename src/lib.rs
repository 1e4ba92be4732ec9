//! assetpipe - front-end asset pipeline
//!
//! Copies markup, compiles SCSS, bundles scripts, optimizes images and
//! bundles third-party libraries into a build directory. Watch mode
//! rebuilds on change and can serve the build with live reload.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
pub mod watcher;

// Re-exports for convenience
pub use application::{run_parallel, run_series, run_task, PipelineEvent, TaskContext, TaskReport};
pub use config::BuildConfig;
pub use domain::value_objects::{BuildFlags, BuildMode, TaskName};
pub use error::{PipelineError, PipelineResult};
pub use watcher::{watch, WatchOptions};
