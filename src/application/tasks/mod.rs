//! Task implementations
//!
//! Each task resolves its inputs, applies the transforms the build mode
//! asks for, writes through the context and reports what it wrote.

mod clean;
mod html;
mod images;
mod libs;
mod scripts;
mod styles;


use crate::domain::value_objects::TaskName;
use crate::error::PipelineResult;

use super::context::{TaskContext, TaskReport};

pub use clean::clean;
pub use html::html;
pub use images::images;
pub use libs::{scripts_libs, styles_libs};
pub use scripts::scripts;
pub use styles::styles;

/// Run a single task by name
pub fn run_task(task: TaskName, ctx: &TaskContext) -> PipelineResult<TaskReport> {
    match task {
        TaskName::Clean => clean(ctx),
        TaskName::Html => html(ctx),
        TaskName::Styles => styles(ctx),
        TaskName::Scripts => scripts(ctx),
        TaskName::Images => images(ctx),
        TaskName::ScriptsLibs => scripts_libs(ctx),
        TaskName::StylesLibs => styles_libs(ctx),
    }
}
