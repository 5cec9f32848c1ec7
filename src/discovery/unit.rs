//! Conversion units: one schema and the JSON sources it governs.

use std::path::{Path, PathBuf};

use crate::mapping::{map_output_path, AssetCategory};

/// A schema together with the ordered list of inputs compiled against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionUnit {
    category: AssetCategory,
    schema: PathBuf,
    input_files: Vec<PathBuf>,
}

impl ConversionUnit {
    /// Create a new conversion unit.
    pub fn new(category: AssetCategory, schema: impl Into<PathBuf>, input_files: Vec<PathBuf>) -> Self {
        Self {
            category,
            schema: schema.into(),
            input_files,
        }
    }

    pub fn category(&self) -> AssetCategory {
        self.category
    }

    pub fn schema(&self) -> &Path {
        &self.schema
    }

    pub fn input_files(&self) -> &[PathBuf] {
        &self.input_files
    }

    pub fn is_empty(&self) -> bool {
        self.input_files.is_empty()
    }

    /// Iterate over `(input, target)` pairs.
    pub fn targets(&self) -> impl Iterator<Item = (&Path, PathBuf)> + '_ {
        self.input_files
            .iter()
            .map(|input| (input.as_path(), map_output_path(input)))
    }
}

/// Count the input files across a set of units.
pub fn total_inputs(units: &[ConversionUnit]) -> usize {
    units.iter().map(|u| u.input_files.len()).sum()
}
