//! Images: copy, minifying PNG and SVG losslessly in production

use std::path::Path;

use crate::application::context::{TaskContext, TaskReport};
use crate::domain::value_objects::TaskName;
use crate::error::PipelineResult;
use crate::infrastructure::fs::SourceGlob;
use crate::infrastructure::server::ReloadKind;
use crate::infrastructure::transform::{optimize_png, optimize_svg};

pub fn images(ctx: &TaskContext) -> PipelineResult<TaskReport> {
    let config = &ctx.config().img;
    let glob = SourceGlob::new(&config.src)?;
    let dest = ctx.dest_dir(&config.dest);
    let compress = ctx.mode().minifies();

    let mut report = TaskReport::new(TaskName::Images);
    for file in glob.resolve(&ctx.src_root())? {
        let content = ctx.fs().read(&file.path)?;
        let content = match (compress, extension(&file.path).as_deref()) {
            (true, Some("png")) => optimize_png(&content, &file.path)?,
            (true, Some("svg")) => optimize_svg(&content),
            _ => content,
        };
        report.write(ctx, dest.join(&file.relative), &content)?;
    }

    if !report.is_empty() {
        ctx.notify(ReloadKind::Page);
    }
    Ok(report)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}
