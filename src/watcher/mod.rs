//! File watcher for watch mode
//!
//! Maps change events under the source root to the single task that owns
//! the changed path:
//! - Routing by glob (markup, styles, scripts, images)
//! - Per-task quiet period before re-running
//! - Content-hash filter for saves that change nothing
//! - Graceful Ctrl+C shutdown

mod event;
mod route;
mod sync;

pub use event::{WatchOptions, WatcherState};
pub use route::WatchRoutes;
pub use sync::watch;
