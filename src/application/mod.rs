//! Application Layer
//!
//! Tasks and the combinators that run them.
//!
//! ## Tasks
//!
//! - `html`, `images`, `styles`, `scripts` - one asset class each
//! - `scripts-libs`, `styles-libs` - third-party bundles
//! - `clean` - empty the build root
//!
//! ## Composition
//!
//! - `run_series` - in order, stop at the first failure
//! - `run_parallel` - every task on its own thread, report all failures

pub mod context;
pub mod event;
pub mod runner;
pub mod tasks;

pub use context::{TaskContext, TaskReport};
pub use event::PipelineEvent;
pub use runner::{run_parallel, run_reported, run_series, RunSummary, TaskFailure};
pub use tasks::run_task;
