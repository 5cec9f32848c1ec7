//! Per-file outcomes and the reports that collect them.

use std::path::PathBuf;

use crate::error::{AmError, BuildFailure, Result};

use super::staleness::Staleness;

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The compiler ran and succeeded.
    Converted(Staleness),
    /// The target was fresh; nothing ran.
    UpToDate,
    /// The compiler could not be launched, failed, or timed out.
    Failed(BuildFailure),
}

/// One entry of a build report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub target: PathBuf,
    pub outcome: Outcome,
}

/// Collects outcomes of a build run.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    entries: Vec<FileOutcome>,
    /// Inputs never attempted because a fail-fast build stopped early.
    skipped: usize,
}

impl BuildReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: FileOutcome) {
        self.entries.push(entry);
    }

    pub fn add_skipped(&mut self, count: usize) {
        self.skipped += count;
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileOutcome> {
        self.entries.iter()
    }

    pub fn converted_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, Outcome::Converted(_)))
            .count()
    }

    pub fn up_to_date_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == Outcome::UpToDate)
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped
    }

    /// All failures, in the order they were recorded.
    pub fn failures(&self) -> impl Iterator<Item = &BuildFailure> {
        self.entries.iter().filter_map(|e| match &e.outcome {
            Outcome::Failed(failure) => Some(failure),
            _ => None,
        })
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Turn the report into an error if anything failed.
    pub fn into_result(self) -> Result<BuildReport> {
        if !self.has_failures() {
            return Ok(self);
        }
        Err(AmError::Build {
            failures: self.failures().cloned().collect(),
        })
    }
}

/// Collects outcomes of a clean run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Targets that existed and were deleted.
    pub removed: Vec<PathBuf>,
    /// Targets that were already absent.
    pub absent: usize,
}
