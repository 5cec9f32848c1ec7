//! Project manifest (ambuild.yaml) parsing.
//!
//! The manifest is optional. It overrides where the Amplitude project lives,
//! where schemas and the compiler are found, and how builds are scheduled.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AmError, Result};

/// Default location of the Amplitude project below the game project root.
pub const DEFAULT_PROJECT_DIR: &str = "sounds/amplitude_project";

/// Project manifest loaded from ambuild.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Amplitude project directory, relative to the project root.
    #[serde(default = "default_project_dir")]
    pub project_dir: PathBuf,

    /// Directories searched for `.fbs` schemas and passed to the compiler
    /// as include paths.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schema_roots: Vec<PathBuf>,

    /// Explicit path to the schema compiler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler: Option<PathBuf>,

    /// Directories searched for the compiler when `compiler` is not set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compiler_search_paths: Vec<PathBuf>,

    /// Number of concurrent compiler processes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,

    /// Keep converting after a failure instead of stopping at the first one.
    #[serde(default)]
    pub keep_going: bool,

    /// Seconds a single compiler run may take before it is killed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Patterns to exclude from discovery.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<String>,
}

fn default_project_dir() -> PathBuf {
    PathBuf::from(DEFAULT_PROJECT_DIR)
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            project_dir: default_project_dir(),
            schema_roots: vec![],
            compiler: None,
            compiler_search_paths: vec![],
            jobs: None,
            keep_going: false,
            timeout_secs: None,
            excludes: vec![],
        }
    }
}

impl Manifest {
    /// Load manifest from an ambuild.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AmError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| AmError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check ambuild.yaml syntax".to_string()),
        })
    }

    /// Render the manifest as YAML. Unset optional entries are omitted.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| AmError::Parse {
            message: format!("Failed to serialize manifest: {}", e),
            help: None,
        })
    }

    /// Resolve the Amplitude project directory against the project root.
    pub fn project_dir(&self, root: &Path) -> PathBuf {
        resolve(root, &self.project_dir)
    }

    /// Schema roots resolved against the project root.
    pub fn schema_roots(&self, root: &Path) -> Vec<PathBuf> {
        self.schema_roots.iter().map(|p| resolve(root, p)).collect()
    }

    /// Compiler search paths resolved against the project root.
    pub fn compiler_search_paths(&self, root: &Path) -> Vec<PathBuf> {
        self.compiler_search_paths
            .iter()
            .map(|p| resolve(root, p))
            .collect()
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.excludes
            .iter()
            .any(|pattern| Self::matches_pattern(&path_str, pattern))
    }

    /// Simple glob pattern matching.
    fn matches_pattern(path: &str, pattern: &str) -> bool {
        if let Some(suffix) = pattern.strip_prefix("**/") {
            // **/dir/* matches anything inside dir anywhere in the path
            if let Some(dir) = suffix.strip_suffix("/*") {
                return path.contains(&format!("/{}/", dir)) || path.starts_with(&format!("{}/", dir));
            }
            return path.contains(suffix);
        }

        if let Some(suffix) = pattern.strip_prefix('*') {
            if !pattern.contains('/') {
                return path.ends_with(suffix);
            }
        }

        if let Some(prefix) = pattern.strip_suffix("/*") {
            return path.starts_with(&format!("{}/", prefix))
                || path.contains(&format!("/{}/", prefix));
        }

        path.contains(pattern)
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
