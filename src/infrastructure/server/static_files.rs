//! Static file resolution for the dev server
//!
//! Maps request paths onto the build root, serving `index.html` for
//! directories and refusing anything that escapes the root.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use thiserror::Error;

/// Errors that can occur while resolving a request path
#[derive(Debug, Error)]
pub enum StaticFileError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Path traversal detected: {0}")]
    PathTraversal(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// A resolved file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFile {
    pub path: PathBuf,
    pub content_type: &'static str,
}

impl StaticFile {
    pub fn is_html(&self) -> bool {
        self.content_type.starts_with("text/html")
    }
}

/// Resolve `request_path` (URL path, no query) under `root`
pub fn resolve(root: &Path, request_path: &str) -> Result<StaticFile, StaticFileError> {
    let clean_path = normalize_path(request_path)?;
    let full_path = root.join(&clean_path);

    let canonical = full_path
        .canonicalize()
        .map_err(|_| StaticFileError::NotFound(request_path.to_string()))?;
    let root_canonical = root
        .canonicalize()
        .map_err(|_| StaticFileError::NotFound(request_path.to_string()))?;

    if !canonical.starts_with(&root_canonical) {
        return Err(StaticFileError::PathTraversal(request_path.to_string()));
    }

    let target_path = if canonical.is_dir() {
        let index_path = canonical.join("index.html");
        if index_path.is_file() {
            index_path
        } else {
            return Err(StaticFileError::NotFound(request_path.to_string()));
        }
    } else if canonical.is_file() {
        canonical
    } else {
        return Err(StaticFileError::NotFound(request_path.to_string()));
    };

    let extension = target_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    Ok(StaticFile {
        content_type: mime_type(&extension),
        path: target_path,
    })
}

fn normalize_path(path: &str) -> Result<String, StaticFileError> {
    let decoded = percent_decode_str(path)
        .decode_utf8()
        .map_err(|_| StaticFileError::InvalidPath(path.to_string()))?;
    let decoded = decoded.trim_start_matches('/');

    if decoded.contains('\0') {
        return Err(StaticFileError::InvalidPath("null byte in path".to_string()));
    }
    if decoded.split(['/', '\\']).any(|segment| segment == "..") {
        return Err(StaticFileError::PathTraversal(path.to_string()));
    }

    Ok(decoded.to_string())
}

fn mime_type(extension: &str) -> &'static str {
    match extension {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "json" | "map" => "application/json",
        "txt" => "text/plain; charset=utf-8",
        "xml" => "application/xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        _ => "application/octet-stream",
    }
}
