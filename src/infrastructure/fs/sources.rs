//! Source glob resolution
//!
//! A configured glob is matched against paths relative to a root. Each match
//! keeps its path relative to the glob's literal base (the leading
//! components with no glob syntax), which is how outputs mirror sources.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use ignore::WalkBuilder;

use crate::error::{PipelineError, PipelineResult};

/// A compiled source glob
#[derive(Debug, Clone)]
pub struct SourceGlob {
    pattern: String,
    base: PathBuf,
    matcher: GlobMatcher,
}

/// One file matched by a [`SourceGlob`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute (root-joined) path on disk
    pub path: PathBuf,
    /// Path relative to the glob's literal base
    pub relative: PathBuf,
}

impl SourceGlob {
    pub fn new(pattern: &str) -> PipelineResult<Self> {
        let pattern = pattern.trim_start_matches("./").trim_start_matches('/');
        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| PipelineError::InvalidGlob {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?
            .compile_matcher();

        Ok(Self {
            pattern: pattern.to_string(),
            base: literal_base(pattern),
            matcher,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Leading directory of the pattern that contains no glob syntax
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Match a path already made relative to the root
    pub fn is_match_relative(&self, relative: &Path) -> bool {
        self.matcher.is_match(relative)
    }

    /// Match an absolute path that lives under `root`
    pub fn is_match(&self, root: &Path, path: &Path) -> bool {
        path.strip_prefix(root)
            .map(|rel| self.is_match_relative(rel))
            .unwrap_or(false)
    }

    /// Every regular file under `root` that matches, sorted by path
    pub fn resolve(&self, root: &Path) -> PipelineResult<Vec<SourceFile>> {
        let walk_root = root.join(&self.base);
        if !walk_root.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        let walker = WalkBuilder::new(&walk_root)
            .standard_filters(false)
            .follow_links(true)
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| PipelineError::io(&walk_root, std::io::Error::other(e)))?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let path = entry.into_path();
            let Ok(rel_to_root) = path.strip_prefix(root) else {
                continue;
            };
            if !self.is_match_relative(rel_to_root) {
                continue;
            }
            let relative = rel_to_root
                .strip_prefix(&self.base)
                .unwrap_or(rel_to_root)
                .to_path_buf();
            files.push(SourceFile { path, relative });
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }
}

fn literal_base(pattern: &str) -> PathBuf {
    let components: Vec<&str> = pattern.split('/').collect();
    let literal: Vec<&str> = components
        .iter()
        .take_while(|c| !c.contains(['*', '?', '[', '{']))
        .copied()
        .collect();

    // A fully literal pattern names a file; its base is the parent directory
    let literal = if literal.len() == components.len() {
        &literal[..literal.len().saturating_sub(1)]
    } else {
        &literal[..]
    };

    literal.iter().collect()
}
