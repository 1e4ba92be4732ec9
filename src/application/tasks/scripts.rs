//! Scripts: concatenate the entry glob into one file

use crate::application::context::{TaskContext, TaskReport};
use crate::domain::value_objects::TaskName;
use crate::error::PipelineResult;
use crate::infrastructure::fs::SourceGlob;
use crate::infrastructure::server::ReloadKind;
use crate::infrastructure::transform::{minify_js, SourceMap, SourceMapBuilder};

/// The output takes the first match's file name (`main.js` by default)
pub fn scripts(ctx: &TaskContext) -> PipelineResult<TaskReport> {
    let config = &ctx.config().js;
    let glob = SourceGlob::new(&config.src)?;
    let files = glob.resolve(&ctx.src_root())?;

    let mut report = TaskReport::new(TaskName::Scripts);
    let Some(output_name) = files
        .first()
        .and_then(|f| f.path.file_name())
        .map(|n| n.to_string_lossy().into_owned())
    else {
        tracing::warn!(pattern = %config.src, "no scripts matched");
        return Ok(report);
    };
    let out_dir = ctx.dest_dir(&config.dest);

    let mut bundle = String::new();
    let mut map = SourceMapBuilder::new(output_name.clone());
    for file in &files {
        let source = ctx.fs().read_to_string(&file.path)?;
        let index = map.add_source(ctx.source_name(&file.path), source.clone());
        for (line_no, line) in source.lines().enumerate() {
            bundle.push_str(line);
            bundle.push('\n');
            map.push_line(index, line_no);
        }
    }

    if ctx.mode().minifies() {
        let minified = minify_js(&bundle);
        report.write(ctx, out_dir.join(&output_name), minified.as_bytes())?;
    } else {
        let map_name = format!("{}.map", output_name);
        bundle.push_str(&SourceMap::js_link(&map_name));
        report.write(ctx, out_dir.join(&output_name), bundle.as_bytes())?;
        report.write(ctx, out_dir.join(map_name), map.build().to_json().as_bytes())?;
    }

    ctx.notify(ReloadKind::Page);
    Ok(report)
}
