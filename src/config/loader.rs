//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult};

use super::types::BuildConfig;

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> PipelineResult<(BuildConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: BuildConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| PipelineError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load the config file if present, otherwise defaults. Env overrides win
/// over both. A present but malformed file is an error.
pub fn load_or_default(path: &Path) -> PipelineResult<(BuildConfig, Vec<ConfigWarning>)> {
    let (config, warnings) = if path.exists() {
        load_with_warnings(path)?
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        (BuildConfig::default(), Vec::new())
    };
    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (ASSETPIPE_* prefix)
pub fn with_env_overrides(config: BuildConfig) -> BuildConfig {
    apply_overrides(config, |key| std::env::var(key).ok())
}

pub(crate) fn apply_overrides(
    mut config: BuildConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> BuildConfig {
    // ASSETPIPE_SRC
    if let Some(src) = lookup("ASSETPIPE_SRC").filter(|s| !s.is_empty()) {
        config.src = PathBuf::from(src);
    }

    // ASSETPIPE_BUILD
    if let Some(build) = lookup("ASSETPIPE_BUILD").filter(|s| !s.is_empty()) {
        config.build = PathBuf::from(build);
    }

    // ASSETPIPE_PORT
    if let Some(port) = lookup("ASSETPIPE_PORT") {
        match port.trim().parse::<u16>() {
            Ok(port) => config.server.port = port,
            Err(_) => tracing::warn!(value = %port, "ignoring invalid ASSETPIPE_PORT"),
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "src",
        "build",
        "html",
        "img",
        "css",
        "js",
        "dest",
        "watch",
        "bundle",
        "libs",
        "css_bundle",
        "js_bundle",
        "server",
        "host",
        "port",
        "delay_ms",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 && dist < unknown.len() => {
            Some(candidate.to_string())
        }
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
