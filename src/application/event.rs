//! Progress events for CLI output
//!
//! Commands and the watcher report through a callback; the presentation
//! layer renders them as text or NDJSON.

use serde::Serialize;

use crate::domain::value_objects::TaskName;

/// Event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PipelineEvent {
    TaskStarted {
        task: TaskName,
    },
    TaskComplete {
        task: TaskName,
        written: usize,
        bytes: u64,
        duration_ms: u64,
    },
    TaskFailed {
        task: TaskName,
        message: String,
    },
    WatchStarted {
        source: String,
    },
    FileChanged {
        path: String,
        task: TaskName,
    },
    ServerStarted {
        url: String,
    },
    Shutdown,
}

impl PipelineEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
