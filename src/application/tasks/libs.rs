//! Third-party library bundles
//!
//! Library paths are relative to the project root, not the source root.
//! Neither bundle gets a source map and neither notifies live reload.

use crate::application::context::{TaskContext, TaskReport};
use crate::domain::value_objects::TaskName;
use crate::error::PipelineResult;
use crate::infrastructure::transform::{compile_scss, minify_js, process_css, CssOptions};

/// Concatenate `libs.js` into one file; always minified
pub fn scripts_libs(ctx: &TaskContext) -> PipelineResult<TaskReport> {
    let config = ctx.config();
    let mut bundle = String::new();

    for lib in &config.libs.js {
        let path = ctx.project_root().join(lib);
        let source = ctx.fs().read_to_string(&path)?;
        bundle.push_str(&source);
        if !bundle.ends_with('\n') {
            bundle.push('\n');
        }
    }

    let out = ctx.dest_dir(&config.js.dest).join(&config.libs.js_bundle);
    let mut report = TaskReport::new(TaskName::ScriptsLibs);
    report.write(ctx, out, minify_js(&bundle).as_bytes())?;
    Ok(report)
}

/// Compile each `libs.css` entry and concatenate; minified in production.
/// Libraries ship their own prefixes, so none are added here.
pub fn styles_libs(ctx: &TaskContext) -> PipelineResult<TaskReport> {
    let config = ctx.config();
    let out = ctx.dest_dir(&config.css.dest).join(&config.libs.css_bundle);
    let mut bundle = String::new();

    for lib in &config.libs.css {
        let path = ctx.project_root().join(lib);
        let css = compile_scss(&path)?;
        bundle.push_str(&css);
        if !bundle.ends_with('\n') {
            bundle.push('\n');
        }
    }

    if ctx.mode().minifies() {
        let options = CssOptions {
            minify: true,
            ..CssOptions::default()
        };
        bundle = process_css(&bundle, &out, options)?.code;
    }

    let mut report = TaskReport::new(TaskName::StylesLibs);
    report.write(ctx, out, bundle.as_bytes())?;
    Ok(report)
}
