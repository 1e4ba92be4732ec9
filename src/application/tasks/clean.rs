//! Clean: empty the build root

use crate::application::context::{TaskContext, TaskReport};
use crate::domain::value_objects::TaskName;
use crate::error::{PipelineError, PipelineResult};

/// Remove every entry under the build root. The root itself is kept (and
/// created when missing).
pub fn clean(ctx: &TaskContext) -> PipelineResult<TaskReport> {
    let build_root = ctx.build_root();
    guard_build_root(ctx)?;

    let mut report = TaskReport::new(TaskName::Clean);
    report.removed = ctx.fs().clear_dir(&build_root)?;
    tracing::info!(path = %build_root.display(), removed = report.removed, "cleaned build root");
    Ok(report)
}

/// The build root must not be the project root or contain the sources
fn guard_build_root(ctx: &TaskContext) -> PipelineResult<()> {
    let normalize = |p: std::path::PathBuf| p.components().collect::<std::path::PathBuf>();
    let build_root = normalize(ctx.build_root());
    let project_root = normalize(ctx.project_root().to_path_buf());
    let src_root = normalize(ctx.src_root());

    if project_root.starts_with(&build_root) || src_root.starts_with(&build_root) {
        return Err(PipelineError::UnsafeClean { path: build_root });
    }
    Ok(())
}
