//! Task context and report

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::config::BuildConfig;
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::{BuildFlags, BuildMode, TaskName};
use crate::error::PipelineResult;
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::server::{LiveReload, ReloadKind};

/// Everything a task needs: where the project is, what the config says,
/// the two startup flags and the live-reload handle.
#[derive(Clone)]
pub struct TaskContext {
    project_root: PathBuf,
    config: BuildConfig,
    flags: BuildFlags,
    fs: Arc<dyn FileSystem>,
    reload: Option<LiveReload>,
}

impl TaskContext {
    pub fn new(project_root: impl Into<PathBuf>, config: BuildConfig, flags: BuildFlags) -> Self {
        Self {
            project_root: project_root.into(),
            config,
            flags,
            fs: Arc::new(LocalFs::new()),
            reload: None,
        }
    }

    /// Replace the file system (tests observe writes through this)
    pub fn with_fs(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Attach a live-reload channel. Ignored unless sync mode is on, so a
    /// non-sync run never notifies anything.
    pub fn with_reload(mut self, reload: LiveReload) -> Self {
        if self.flags.sync {
            self.reload = Some(reload);
        }
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn flags(&self) -> BuildFlags {
        self.flags
    }

    pub fn mode(&self) -> BuildMode {
        self.flags.mode
    }

    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    pub fn reload(&self) -> Option<&LiveReload> {
        self.reload.as_ref()
    }

    pub fn src_root(&self) -> PathBuf {
        self.config.src_root(&self.project_root)
    }

    pub fn build_root(&self) -> PathBuf {
        self.config.build_root(&self.project_root)
    }

    pub fn dest_dir(&self, dest: &str) -> PathBuf {
        self.config.dest_dir(&self.project_root, dest)
    }

    /// Tell connected browsers about new output (no-op without `--sync`)
    pub fn notify(&self, kind: ReloadKind) {
        if let Some(reload) = &self.reload {
            reload.notify(kind);
        }
    }

    /// Name a source for source maps and messages: relative to the source
    /// root, forward slashes
    pub fn source_name(&self, path: &Path) -> String {
        let src_root = self.src_root();
        let rel = path.strip_prefix(&src_root).unwrap_or(path);
        rel.to_string_lossy().replace('\\', "/")
    }
}

impl std::fmt::Debug for TaskContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskContext")
            .field("project_root", &self.project_root)
            .field("flags", &self.flags)
            .field("sync", &self.reload.is_some())
            .finish_non_exhaustive()
    }
}

/// What one task run produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskReport {
    pub task: TaskName,
    /// Files written, in write order
    pub written: Vec<PathBuf>,
    /// Total bytes written
    pub bytes: u64,
    /// Entries removed (clean only)
    pub removed: usize,
}

impl TaskReport {
    pub fn new(task: TaskName) -> Self {
        Self {
            task,
            written: Vec::new(),
            bytes: 0,
            removed: 0,
        }
    }

    /// Write through the context's file system and record the output
    pub fn write(&mut self, ctx: &TaskContext, path: PathBuf, content: &[u8]) -> PipelineResult<()> {
        ctx.fs().write(&path, content)?;
        tracing::debug!(
            task = %self.task,
            path = %path.display(),
            bytes = content.len(),
            "wrote"
        );
        self.bytes += content.len() as u64;
        self.written.push(path);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }
}
