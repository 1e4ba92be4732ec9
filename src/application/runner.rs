//! Task combinators
//!
//! `run_series` runs tasks in order and stops at the first failure, so
//! `clean` always finishes before anything writes. `run_parallel` runs each
//! task on a scoped thread and waits for all of them.

use std::time::Instant;

use crate::domain::value_objects::TaskName;
use crate::error::{PipelineError, PipelineResult};

use super::context::{TaskContext, TaskReport};
use super::event::PipelineEvent;
use super::tasks::run_task;

/// A task that did not complete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    pub task: TaskName,
    pub message: String,
}

/// Outcome of a composite run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Reports of the tasks that succeeded, in declaration order
    pub reports: Vec<TaskReport>,
    pub failures: Vec<TaskFailure>,
    /// Number of tasks in the composition
    pub total: usize,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn files_written(&self) -> usize {
        self.reports.iter().map(|r| r.written.len()).sum()
    }

    pub fn report(&self, task: TaskName) -> Option<&TaskReport> {
        self.reports.iter().find(|r| r.task == task)
    }

    pub fn into_result(self) -> PipelineResult<Vec<TaskReport>> {
        if self.is_success() {
            Ok(self.reports)
        } else {
            Err(PipelineError::TasksFailed {
                failed: self.failures.len(),
                total: self.total,
            })
        }
    }
}

/// Run one task, reporting start and completion or failure
pub fn run_reported(
    task: TaskName,
    ctx: &TaskContext,
    on_event: &(dyn Fn(PipelineEvent) + Sync),
) -> Result<TaskReport, TaskFailure> {
    on_event(PipelineEvent::TaskStarted { task });
    let started = Instant::now();

    match run_task(task, ctx) {
        Ok(report) => {
            on_event(PipelineEvent::TaskComplete {
                task,
                written: report.written.len(),
                bytes: report.bytes,
                duration_ms: started.elapsed().as_millis() as u64,
            });
            Ok(report)
        }
        Err(e) => {
            tracing::debug!(%task, error = ?e, "task failed");
            let message = e.to_string();
            on_event(PipelineEvent::TaskFailed {
                task,
                message: message.clone(),
            });
            Err(TaskFailure { task, message })
        }
    }
}

/// Run tasks one after another; the first failure stops the sequence
pub fn run_series(
    tasks: &[TaskName],
    ctx: &TaskContext,
    on_event: &(dyn Fn(PipelineEvent) + Sync),
) -> RunSummary {
    let mut summary = RunSummary {
        total: tasks.len(),
        ..Default::default()
    };

    for &task in tasks {
        match run_reported(task, ctx, on_event) {
            Ok(report) => summary.reports.push(report),
            Err(failure) => {
                summary.failures.push(failure);
                break;
            }
        }
    }
    summary
}

/// Run every task concurrently and collect all outcomes
pub fn run_parallel(
    tasks: &[TaskName],
    ctx: &TaskContext,
    on_event: &(dyn Fn(PipelineEvent) + Sync),
) -> RunSummary {
    let outcomes: Vec<Result<TaskReport, TaskFailure>> = std::thread::scope(|scope| {
        let handles: Vec<_> = tasks
            .iter()
            .map(|&task| (task, scope.spawn(move || run_reported(task, ctx, on_event))))
            .collect();

        handles
            .into_iter()
            .map(|(task, handle)| {
                handle.join().unwrap_or_else(|_| {
                    Err(TaskFailure {
                        task,
                        message: "task panicked".to_string(),
                    })
                })
            })
            .collect()
    });

    let mut summary = RunSummary {
        total: tasks.len(),
        ..Default::default()
    };
    for outcome in outcomes {
        match outcome {
            Ok(report) => summary.reports.push(report),
            Err(failure) => summary.failures.push(failure),
        }
    }
    summary
}
