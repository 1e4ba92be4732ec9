//! Configuration module
//!
//! Resolution order:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (ASSETPIPE_*)
//! 3. Project config (`assetpipe.toml`)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::ConfigWarning;
pub use types::{
    BuildConfig, HtmlConfig, ImagesConfig, LibsConfig, ScriptsConfig, ServerConfig, StylesConfig,
    WatchConfig,
};

/// Default config file name, looked up in the project root
pub const CONFIG_FILE_NAME: &str = "assetpipe.toml";
