pub mod build;
pub mod project_root;
pub mod watch;

use std::path::Path;

use anyhow::{Context, Result};
use assetpipe::application::TaskContext;
use assetpipe::config::{BuildConfig, CONFIG_FILE_NAME};
use assetpipe::domain::value_objects::BuildFlags;

use project_root::discover_project_root;

/// Resolve the project root and load its configuration.
///
/// Config warnings (unknown keys) are printed to stderr and never fatal.
pub(crate) fn load_context(
    project_root: Option<&Path>,
    config_file: Option<&Path>,
    flags: BuildFlags,
) -> Result<TaskContext> {
    let root = match project_root {
        Some(dir) => dir.to_path_buf(),
        None => {
            let cwd = std::env::current_dir().context("cannot read current directory")?;
            discover_project_root(&cwd)
        }
    };
    let root = root
        .canonicalize()
        .with_context(|| format!("project root not found: {}", root.display()))?;

    // An explicit --config must exist; the default file is optional
    let (config_path, (config, warnings)) = match config_file {
        Some(path) => {
            let (config, warnings) = BuildConfig::load_with_warnings(path)?;
            (path.to_path_buf(), (config.with_env_overrides(), warnings))
        }
        None => {
            let path = root.join(CONFIG_FILE_NAME);
            let loaded = BuildConfig::load_or_default(&path)?;
            (path, loaded)
        }
    };
    for warning in &warnings {
        eprintln!("warning: {}", warning);
    }
    tracing::debug!(
        root = %root.display(),
        config = %config_path.display(),
        mode = %flags.mode,
        sync = flags.sync,
        "loaded configuration"
    );

    Ok(TaskContext::new(root, config, flags))
}
