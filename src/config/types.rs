//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PipelineResult;

use super::loader::{self, ConfigWarning};

/// Markup glob, relative to the source root, and destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    pub src: String,
    pub dest: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            src: "**/*.html".to_string(),
            dest: "/".to_string(),
        }
    }
}

/// Image glob, relative to the source root, and destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    pub src: String,
    pub dest: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            src: "images/**/*".to_string(),
            dest: "/images".to_string(),
        }
    }
}

/// Stylesheet entry point, watch glob and bundle name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylesConfig {
    pub src: String,
    pub watch: String,
    pub dest: String,
    pub bundle: String,
}

impl Default for StylesConfig {
    fn default() -> Self {
        Self {
            src: "css/imports.scss".to_string(),
            watch: "css/**/*.scss".to_string(),
            dest: "/css".to_string(),
            bundle: "main.min.css".to_string(),
        }
    }
}

/// Script entry glob and watch glob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptsConfig {
    pub src: String,
    pub watch: String,
    pub dest: String,
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            src: "js/main.js".to_string(),
            watch: "js/**/*.js".to_string(),
            dest: "/js".to_string(),
        }
    }
}

/// Third-party library files, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibsConfig {
    pub css: Vec<String>,
    pub css_bundle: String,
    pub js: Vec<String>,
    pub js_bundle: String,
}

impl Default for LibsConfig {
    fn default() -> Self {
        Self {
            css: vec![
                "node_modules/normalize.css/normalize.css".to_string(),
                "src/css/libs.scss".to_string(),
            ],
            css_bundle: "libs.min.css".to_string(),
            js: vec!["node_modules/jquery/dist/jquery.min.js".to_string()],
            js_bundle: "libs.min.js".to_string(),
        }
    }
}

/// Live-reload server address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Watch mode tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Quiet period before a task re-runs after a change
    pub delay_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { delay_ms: 200 }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_src")]
    pub src: PathBuf,

    #[serde(default = "default_build")]
    pub build: PathBuf,

    #[serde(default)]
    pub html: HtmlConfig,

    #[serde(default)]
    pub img: ImagesConfig,

    #[serde(default)]
    pub css: StylesConfig,

    #[serde(default)]
    pub js: ScriptsConfig,

    #[serde(default)]
    pub libs: LibsConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub watch: WatchConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            src: default_src(),
            build: default_build(),
            html: HtmlConfig::default(),
            img: ImagesConfig::default(),
            css: StylesConfig::default(),
            js: ScriptsConfig::default(),
            libs: LibsConfig::default(),
            server: ServerConfig::default(),
            watch: WatchConfig::default(),
        }
    }
}

fn default_src() -> PathBuf {
    PathBuf::from("./src/")
}

fn default_build() -> PathBuf {
    PathBuf::from("./build")
}

impl BuildConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> PipelineResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> PipelineResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load `path` if it exists, otherwise defaults; env overrides applied
    pub fn load_or_default(path: &Path) -> PipelineResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(path)
    }

    /// Apply environment variable overrides (ASSETPIPE_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Absolute source root for a project
    pub fn src_root(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.src)
    }

    /// Absolute build root for a project
    pub fn build_root(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.build)
    }

    /// Resolve a destination like `/css` against the build root
    pub fn dest_dir(&self, project_root: &Path, dest: &str) -> PathBuf {
        let dest = dest.trim_start_matches('/');
        let root = self.build_root(project_root);
        if dest.is_empty() {
            root
        } else {
            root.join(dest)
        }
    }
}
