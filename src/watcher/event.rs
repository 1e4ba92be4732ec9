//! Watch options and debounce state

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::application::TaskContext;
use crate::domain::value_objects::TaskName;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Context every re-run uses
    pub ctx: TaskContext,
    /// Quiet period after the last change before a task re-runs
    pub delay: Duration,
}

impl WatchOptions {
    pub fn new(ctx: TaskContext) -> Self {
        let delay = Duration::from_millis(ctx.config().watch.delay_ms);
        Self { ctx, delay }
    }
}

/// Pending re-runs, keyed by task
pub struct WatcherState {
    delay: Duration,
    pending: BTreeMap<TaskName, Instant>,
}

impl WatcherState {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: BTreeMap::new(),
        }
    }

    /// Record a change for `task`; restarts that task's quiet period
    pub fn add_change(&mut self, task: TaskName) {
        self.pending.insert(task, Instant::now());
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Remove and return every task whose quiet period has elapsed
    pub fn take_due(&mut self) -> Vec<TaskName> {
        let due: Vec<TaskName> = self
            .pending
            .iter()
            .filter(|(_, last)| last.elapsed() >= self.delay)
            .map(|(task, _)| *task)
            .collect();
        for task in &due {
            self.pending.remove(task);
        }
        due
    }
}
