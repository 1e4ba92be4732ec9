//! Markup: copy as-is

use crate::application::context::{TaskContext, TaskReport};
use crate::domain::value_objects::TaskName;
use crate::error::PipelineResult;
use crate::infrastructure::fs::SourceGlob;
use crate::infrastructure::server::ReloadKind;

pub fn html(ctx: &TaskContext) -> PipelineResult<TaskReport> {
    let config = &ctx.config().html;
    let glob = SourceGlob::new(&config.src)?;
    let dest = ctx.dest_dir(&config.dest);

    let mut report = TaskReport::new(TaskName::Html);
    for file in glob.resolve(&ctx.src_root())? {
        let content = ctx.fs().read(&file.path)?;
        report.write(ctx, dest.join(&file.relative), &content)?;
    }

    if !report.is_empty() {
        ctx.notify(ReloadKind::Page);
    }
    Ok(report)
}
