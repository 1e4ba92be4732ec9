//! Watch loop

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::application::runner::run_reported;
use crate::application::PipelineEvent;
use crate::domain::value_objects::ContentHash;
use crate::error::{PipelineError, PipelineResult};

use super::event::{WatchOptions, WatcherState};
use super::route::{normalize, WatchRoutes};

/// Watch the source root and re-run the owning task on change.
///
/// Returns when `running` is cleared. A failing task is reported through
/// `event_callback` and the loop keeps going.
pub fn watch<F>(options: WatchOptions, running: Arc<AtomicBool>, event_callback: F) -> PipelineResult<()>
where
    F: Fn(PipelineEvent) + Sync,
{
    let ctx = &options.ctx;
    let src_root = ctx.src_root();
    let src_root = src_root.canonicalize().map_err(|e| PipelineError::io(&src_root, e))?;
    let routes = WatchRoutes::new(src_root.clone(), ctx.config())?;

    event_callback(PipelineEvent::WatchStarted {
        source: src_root.display().to_string(),
    });

    // Track content hashes for change detection, pre-populated so the
    // first event for an untouched file is not treated as a change
    let mut content_hashes: HashMap<PathBuf, ContentHash> = routes.snapshot()?;

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                if matches!(event.kind, EventKind::Access(_)) {
                    return;
                }
                for path in event.paths {
                    let _ = tx.send(path);
                }
            }
        },
        Config::default(),
    )?;
    watcher.watch(&src_root, RecursiveMode::Recursive)?;
    tracing::info!(path = %src_root.display(), "watching for changes");

    let mut state = WatcherState::new(options.delay);

    while running.load(Ordering::SeqCst) {
        if let Ok(path) = rx.recv_timeout(Duration::from_millis(50)) {
            let path = normalize(&path);
            if path.is_dir() {
                continue;
            }

            let tasks = routes.tasks_for(&path);
            if tasks.is_empty() {
                tracing::trace!(path = %path.display(), "change outside watch globs");
                continue;
            }

            // Filter out saves that leave the content unchanged
            match std::fs::read(&path) {
                Ok(content) => {
                    let new_hash = ContentHash::from_bytes(&content);
                    if content_hashes.get(&path) == Some(&new_hash) {
                        continue;
                    }
                    content_hashes.insert(path.clone(), new_hash);
                }
                Err(_) => {
                    // Removed or renamed away: still a change
                    if content_hashes.remove(&path).is_none() {
                        continue;
                    }
                }
            }

            for task in tasks {
                event_callback(PipelineEvent::FileChanged {
                    path: path.display().to_string(),
                    task,
                });
                state.add_change(task);
            }
        }

        if state.has_pending() {
            for task in state.take_due() {
                // Failures are reported via the callback; keep watching
                let _ = run_reported(task, ctx, &event_callback);
            }
        }
    }

    event_callback(PipelineEvent::Shutdown);
    Ok(())
}
