//! Build Mode Value Object
//!
//! The two switches read once at startup: development vs production, and
//! whether the live-reload server runs.

use serde::{Deserialize, Serialize};

/// Build mode for every task
///
/// - `Development`: emit source maps, skip minification and compression
/// - `Production`: no source maps, minify and compress (default)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    #[default]
    Production,
}

impl BuildMode {
    /// `--dev` selects development, anything else is production
    pub fn from_dev_flag(dev: bool) -> Self {
        if dev {
            BuildMode::Development
        } else {
            BuildMode::Production
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, BuildMode::Development)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, BuildMode::Production)
    }

    /// Whether source maps are written next to styles and scripts
    pub fn emits_source_maps(&self) -> bool {
        self.is_dev()
    }

    /// Whether outputs are minified or compressed
    pub fn minifies(&self) -> bool {
        self.is_prod()
    }
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildMode::Development => write!(f, "development"),
            BuildMode::Production => write!(f, "production"),
        }
    }
}

/// Process-wide flags parsed from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildFlags {
    pub mode: BuildMode,
    /// Start and notify the live-reload server
    pub sync: bool,
}

impl BuildFlags {
    pub fn new(dev: bool, sync: bool) -> Self {
        Self {
            mode: BuildMode::from_dev_flag(dev),
            sync,
        }
    }
}
