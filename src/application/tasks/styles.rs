//! Styles: compile every SCSS file matching `css.src` into one bundle
//!
//! Files whose name starts with `_` are partials and only reach the bundle
//! through `@import`. The bundle always gets media queries grouped and
//! vendor prefixes added.

use crate::application::context::{TaskContext, TaskReport};
use crate::domain::value_objects::TaskName;
use crate::error::{PipelineError, PipelineResult};
use crate::infrastructure::fs::{SourceFile, SourceGlob};
use crate::infrastructure::server::ReloadKind;
use crate::infrastructure::transform::{compile_scss, process_css, CssOptions, SourceMap};

pub fn styles(ctx: &TaskContext) -> PipelineResult<TaskReport> {
    let config = &ctx.config().css;
    let src_root = ctx.src_root();
    let glob = SourceGlob::new(&config.src)?;

    let entries: Vec<SourceFile> = glob
        .resolve(&src_root)?
        .into_iter()
        .filter(|file| !is_partial(file))
        .collect();
    if entries.is_empty() {
        return Err(PipelineError::MissingInput {
            path: src_root.join(glob.pattern()),
        });
    }

    let mut compiled = String::new();
    for entry in &entries {
        compiled.push_str(&compile_scss(&entry.path)?);
        if !compiled.ends_with('\n') {
            compiled.push('\n');
        }
    }

    let out_dir = ctx.dest_dir(&config.dest);
    let out_path = out_dir.join(&config.bundle);
    let map_source = match entries.as_slice() {
        [single] => ctx.source_name(&single.path),
        _ => config.bundle.clone(),
    };
    let output = process_css(
        &compiled,
        &out_path,
        CssOptions {
            prefix: true,
            group_media: true,
            minify: ctx.mode().minifies(),
            source_map: ctx
                .mode()
                .emits_source_maps()
                .then_some(map_source.as_str()),
        },
    )?;

    let mut report = TaskReport::new(TaskName::Styles);
    match output.map {
        Some(map) => {
            let map_name = format!("{}.map", config.bundle);
            let css = output.code + &SourceMap::css_link(&map_name);
            report.write(ctx, out_path, css.as_bytes())?;
            report.write(ctx, out_dir.join(map_name), map.as_bytes())?;
        }
        None => report.write(ctx, out_path, output.code.as_bytes())?,
    }

    ctx.notify(ReloadKind::Css);
    Ok(report)
}

fn is_partial(file: &SourceFile) -> bool {
    file.path
        .file_name()
        .map(|name| name.to_string_lossy().starts_with('_'))
        .unwrap_or(false)
}
