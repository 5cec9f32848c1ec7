//! Project discovery for ambuild.
//!
//! Finds the Amplitude project below a game project root, loads the optional
//! `ambuild.yaml` manifest and groups the JSON sources into conversion units,
//! one per asset category.
//!
//! # Example
//!
//! ```ignore
//! use ambuild::discovery::{conversion_units, discover};
//!
//! let project = discover("./my-game")?;
//! let units = conversion_units(&project.project_dir, &schema_roots, &project.manifest)?;
//! ```

mod locate;
mod manifest;
mod scanner;
mod unit;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::mapping::{AssetCategory, SourceLayout};

pub use locate::{find_in_paths, locate_in_paths, resolve_compiler, COMPILER_NAME};
pub use manifest::{Manifest, DEFAULT_PROJECT_DIR};
pub use scanner::{is_json, scan_directory};
pub use unit::{total_inputs, ConversionUnit};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "ambuild.yaml";

/// Result of discovering a project.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The game project root directory.
    pub root: PathBuf,

    /// The loaded manifest (default if no ambuild.yaml was found).
    pub manifest: Manifest,

    /// Whether an ambuild.yaml manifest was found.
    pub has_manifest: bool,

    /// The Amplitude project directory holding the JSON sources.
    pub project_dir: PathBuf,
}

/// Discover a project below `root`.
///
/// Looks for an `ambuild.yaml` manifest in the root directory and resolves
/// the Amplitude project directory from it.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();

    let manifest_path = root.join(MANIFEST_FILENAME);
    let (manifest, has_manifest) = if manifest_path.is_file() {
        (Manifest::load(&manifest_path)?, true)
    } else {
        (Manifest::default(), false)
    };

    let project_dir = manifest.project_dir(&root);

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest,
        project_dir,
    })
}

/// Build the conversion units of an Amplitude project directory.
///
/// One unit is returned per category, in [`AssetCategory::ALL`] order, even
/// when it has no inputs. Single-file categories contribute their file only
/// if it exists. Schemas are looked up in `schema_roots`; an unresolved
/// schema keeps its bare file name. Fails if a category directory cannot be
/// read.
pub fn conversion_units<P: AsRef<Path>>(
    project_dir: &Path,
    schema_roots: &[P],
    manifest: &Manifest,
) -> Result<Vec<ConversionUnit>> {
    AssetCategory::ALL
        .iter()
        .map(|&category| -> Result<ConversionUnit> {
            let schema = find_in_paths(category.schema_file(), schema_roots);
            let inputs = match category.layout() {
                SourceLayout::File(name) => {
                    let path = project_dir.join(name);
                    if path.is_file() && !manifest.is_excluded(&path) {
                        vec![path]
                    } else {
                        vec![]
                    }
                }
                SourceLayout::Directory(dir) => scan_directory(&project_dir.join(dir), manifest)?,
            };
            Ok(ConversionUnit::new(category, schema, inputs))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "{}").unwrap();
    }

    #[test]
    fn test_discover_without_manifest() {
        let dir = tempdir().unwrap();

        let result = discover(dir.path()).unwrap();

        assert!(!result.has_manifest);
        assert_eq!(result.project_dir, dir.path().join(DEFAULT_PROJECT_DIR));
    }

    #[test]
    fn test_discover_with_manifest() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILENAME),
            "project_dir: audio/amplitude_project\njobs: 2\n",
        )
        .unwrap();

        let result = discover(dir.path()).unwrap();

        assert!(result.has_manifest);
        assert_eq!(result.manifest.jobs, Some(2));
        assert_eq!(result.project_dir, dir.path().join("audio/amplitude_project"));
    }

    #[test]
    fn test_conversion_units_cover_every_category() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("amplitude_project");
        write(&project.join("audio_config.json"));
        write(&project.join("events/play.json"));
        write(&project.join("sounds/steps/footstep.json"));

        let empty: [&Path; 0] = [];
        let units = conversion_units(&project, &empty, &Manifest::default()).unwrap();

        assert_eq!(units.len(), AssetCategory::ALL.len());
        let categories: Vec<_> = units.iter().map(|u| u.category()).collect();
        assert_eq!(categories, AssetCategory::ALL.to_vec());

        assert_eq!(units[0].input_files(), &[project.join("audio_config.json")]);
        assert!(units[1].is_empty(), "buses.json is absent");

        let sounds = units
            .iter()
            .find(|u| u.category() == AssetCategory::Sounds)
            .unwrap();
        assert_eq!(sounds.input_files(), &[project.join("sounds/steps/footstep.json")]);
        assert_eq!(sounds.schema(), Path::new("sound_definition.fbs"));
        assert_eq!(total_inputs(&units), 3);
    }

    #[test]
    fn test_conversion_units_resolve_schemas() {
        let dir = tempdir().unwrap();
        let schemas = dir.path().join("schemas");
        write(&schemas.join("buses_definition.fbs"));

        let units =
            conversion_units(&dir.path().join("missing"), &[&schemas], &Manifest::default())
                .unwrap();

        let buses = &units[1];
        assert_eq!(buses.category(), AssetCategory::Buses);
        assert_eq!(buses.schema(), schemas.join("buses_definition.fbs"));
        assert_eq!(units[2].schema(), Path::new("sound_bank_definition.fbs"));
    }

    #[test]
    fn test_conversion_units_apply_excludes() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("amplitude_project");
        write(&project.join("buses.json"));
        write(&project.join("rtpc/speed.json"));

        let manifest = Manifest {
            excludes: vec!["buses.json".to_string()],
            ..Default::default()
        };
        let empty: [&Path; 0] = [];
        let units = conversion_units(&project, &empty, &manifest).unwrap();

        assert!(units[1].is_empty());
        assert_eq!(total_inputs(&units), 1);
    }
}
