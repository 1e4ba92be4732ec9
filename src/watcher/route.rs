//! Changed path to task routing

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::BuildConfig;
use crate::domain::value_objects::{ContentHash, TaskName};
use crate::error::PipelineResult;
use crate::infrastructure::fs::SourceGlob;

/// Watch globs, relative to the source root, and the task each triggers
pub struct WatchRoutes {
    src_root: PathBuf,
    routes: Vec<(SourceGlob, TaskName)>,
}

impl WatchRoutes {
    pub fn new(src_root: PathBuf, config: &BuildConfig) -> PipelineResult<Self> {
        let routes = vec![
            (SourceGlob::new(&config.html.src)?, TaskName::Html),
            (SourceGlob::new(&config.css.watch)?, TaskName::Styles),
            (SourceGlob::new(&config.js.watch)?, TaskName::Scripts),
            (SourceGlob::new(&config.img.src)?, TaskName::Images),
        ];
        Ok(Self { src_root, routes })
    }

    pub fn src_root(&self) -> &Path {
        &self.src_root
    }

    /// Tasks whose watch glob matches `path`
    pub fn tasks_for(&self, path: &Path) -> Vec<TaskName> {
        self.routes
            .iter()
            .filter(|(glob, _)| glob.is_match(&self.src_root, path))
            .map(|(_, task)| *task)
            .collect()
    }

    /// Hash every currently watched file so unchanged saves can be ignored
    pub fn snapshot(&self) -> PipelineResult<HashMap<PathBuf, ContentHash>> {
        let mut hashes = HashMap::new();
        for (glob, _) in &self.routes {
            for file in glob.resolve(&self.src_root)? {
                if let Ok(content) = std::fs::read(&file.path) {
                    hashes.insert(normalize(&file.path), ContentHash::from_bytes(&content));
                }
            }
        }
        Ok(hashes)
    }
}

/// Drop `.` components so walker paths and event paths compare equal
pub(crate) fn normalize(path: &Path) -> PathBuf {
    path.components().collect()
}
