//! SCSS compilation via `grass`

use std::path::Path;

use crate::error::{PipelineError, PipelineResult};

fn options(load_dir: Option<&Path>) -> grass::Options<'static> {
    let options = grass::Options::default().style(grass::OutputStyle::Expanded);
    match load_dir {
        Some(dir) => options.load_path(dir),
        None => options,
    }
}

/// Compile an SCSS (or plain CSS) file. Imports resolve against the file's
/// own directory.
pub fn compile_scss(file: &Path) -> PipelineResult<String> {
    if !file.is_file() {
        return Err(PipelineError::MissingInput {
            path: file.to_path_buf(),
        });
    }
    grass::from_path(file, &options(file.parent())).map_err(|e| PipelineError::Scss {
        file: file.to_path_buf(),
        message: e.to_string(),
    })
}

/// Compile SCSS source text. `origin` is only used for error messages.
pub fn compile_scss_str(source: &str, origin: &Path) -> PipelineResult<String> {
    grass::from_string(source.to_string(), &options(origin.parent())).map_err(|e| {
        PipelineError::Scss {
            file: origin.to_path_buf(),
            message: e.to_string(),
        }
    })
}
