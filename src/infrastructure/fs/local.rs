//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io::Write;
use std::path::Path;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

/// Local file system implementation
///
/// Writes go to a temp file in the destination directory and are renamed
/// into place, so the live-reload server never serves a half-written file.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| FsError::from_io(path, e))
    }

    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| FsError::from_io(parent, e))?;

        let mut tmp =
            tempfile::NamedTempFile::new_in(parent).map_err(|e| FsError::from_io(parent, e))?;
        tmp.write_all(content)
            .map_err(|e| FsError::from_io(tmp.path(), e))?;
        tmp.persist(path)
            .map_err(|e| FsError::from_io(path, e.error))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn clear_dir(&self, dir: &Path) -> FsResult<usize> {
        if !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|e| FsError::from_io(dir, e))?;
            return Ok(0);
        }

        let mut removed = 0;
        for entry in std::fs::read_dir(dir).map_err(|e| FsError::from_io(dir, e))? {
            let entry = entry.map_err(|e| FsError::from_io(dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| FsError::from_io(&path, e))?;
            if file_type.is_dir() {
                std::fs::remove_dir_all(&path).map_err(|e| FsError::from_io(&path, e))?;
            } else {
                std::fs::remove_file(&path).map_err(|e| FsError::from_io(&path, e))?;
            }
            removed += 1;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn local_fs_write_and_read() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("test.txt");
        let fs = LocalFs::new();

        fs.write(&file, b"hello world").unwrap();
        let content = fs.read(&file).unwrap();

        assert_eq!(content, b"hello world");
    }

    #[test]
    fn local_fs_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("nested").join("dir").join("test.txt");
        let fs = LocalFs::new();

        fs.write(&file, b"content").unwrap();

        assert!(file.exists());
    }

    #[test]
    fn local_fs_write_overwrites() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("main.js");
        let fs = LocalFs::new();

        fs.write(&file, b"old").unwrap();
        fs.write(&file, b"new").unwrap();

        assert_eq!(fs.read_to_string(&file).unwrap(), "new");
    }

    #[test]
    fn local_fs_read_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();

        let err = fs.read(&dir.path().join("missing.css")).unwrap_err();
        assert!(matches!(err, FsError::NotFound(_)));
    }

    #[test]
    fn local_fs_clear_dir_keeps_root() {
        let dir = tempdir().unwrap();
        let build = dir.path().join("build");
        let fs = LocalFs::new();

        fs.write(&build.join("index.html"), b"<html></html>").unwrap();
        fs.write(&build.join("css/main.min.css"), b"a{}").unwrap();

        let removed = fs.clear_dir(&build).unwrap();

        assert_eq!(removed, 2);
        assert!(build.is_dir());
        assert_eq!(std::fs::read_dir(&build).unwrap().count(), 0);
    }

    #[test]
    fn local_fs_clear_dir_creates_missing() {
        let dir = tempdir().unwrap();
        let build = dir.path().join("build");
        let fs = LocalFs::new();

        assert_eq!(fs.clear_dir(&build).unwrap(), 0);
        assert!(build.is_dir());
    }
}
