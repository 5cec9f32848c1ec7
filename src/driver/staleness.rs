//! Modification-time based staleness checks.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use serde::Serialize;

use crate::error::{AmError, Result};

/// Why a target does or does not need rebuilding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Staleness {
    /// The target does not exist.
    Missing,
    /// The JSON source changed after the target was written.
    SourceNewer,
    /// The schema changed after the target was written, or cannot be read.
    SchemaNewer,
    /// The target is newer than both inputs.
    UpToDate,
}

impl Staleness {
    pub fn needs_rebuild(&self) -> bool {
        !matches!(self, Staleness::UpToDate)
    }
}

impl fmt::Display for Staleness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Staleness::Missing => write!(f, "missing"),
            Staleness::SourceNewer => write!(f, "source changed"),
            Staleness::SchemaNewer => write!(f, "schema changed"),
            Staleness::UpToDate => write!(f, "up to date"),
        }
    }
}

/// Compare a target against the source and schema it is built from.
///
/// A rebuild is required when the target is absent, or when either input is
/// strictly newer. A schema that cannot be stat'ed (for example an
/// unresolved bare name) always requests a rebuild. A source that cannot be
/// stat'ed is an error.
pub fn check(source: &Path, schema: &Path, target: &Path) -> Result<Staleness> {
    let Some(target_time) = target_mtime(target) else {
        return Ok(Staleness::Missing);
    };

    let source_time = modified(source).map_err(|e| AmError::Io {
        path: source.to_path_buf(),
        message: format!("Failed to read modification time: {}", e),
    })?;
    if source_time > target_time {
        return Ok(Staleness::SourceNewer);
    }

    match modified(schema) {
        Ok(schema_time) if schema_time <= target_time => Ok(Staleness::UpToDate),
        _ => Ok(Staleness::SchemaNewer),
    }
}

fn target_mtime(target: &Path) -> Option<SystemTime> {
    let metadata = fs::metadata(target).ok()?;
    if !metadata.is_file() {
        return None;
    }
    metadata.modified().ok()
}

fn modified(path: &Path) -> std::io::Result<SystemTime> {
    fs::metadata(path)?.modified()
}
