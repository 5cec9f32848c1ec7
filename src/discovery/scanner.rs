//! File system scanner for Amplitude JSON sources.
//!
//! Recursively scans category directories for `.json` definitions.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::manifest::Manifest;
use crate::error::{AmError, Result};

/// Scan a directory for JSON source files.
///
/// Returns paths in sorted order so builds are reproducible regardless of
/// directory iteration order. A missing directory yields no files; an entry
/// that cannot be read is an error.
pub fn scan_directory(root: &Path, manifest: &Manifest) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| AmError::Io {
            path: e.path().unwrap_or(root).to_path_buf(),
            message: format!("Failed to scan directory: {}", e),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if is_json(&path) && !manifest.is_excluded(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Check for a lowercase `.json` extension, the only one the output mapping
/// knows how to replace.
pub fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "json")
}
