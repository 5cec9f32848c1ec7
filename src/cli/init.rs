//! Init command implementation.
//!
//! Generates an `ambuild.yaml` manifest for a game project.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use walkdir::WalkDir;

use crate::config::Environment;
use crate::discovery::{Manifest, DEFAULT_PROJECT_DIR, MANIFEST_FILENAME};
use crate::error::{AmError, Result};
use crate::mapping::SOURCE_ROOT_SEGMENT;
use crate::output::{display_path, Printer};

/// How deep below the root to look for an Amplitude project.
const SEARCH_DEPTH: usize = 4;

/// Initialize an ambuild project by generating an ambuild.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Game project root (default: current directory)
    #[arg(long, short, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Overwrite existing ambuild.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    run_with_env(args, &Environment::from_process(), printer)
}

fn run_with_env(args: InitArgs, env: &Environment, printer: &Printer) -> Result<()> {
    let manifest_path = args.project.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(AmError::Config {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    printer.status("Scanning", &display_path(&args.project));
    let project_dir = find_project_dir(&args.project);

    let manifest = Manifest {
        project_dir: project_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROJECT_DIR)),
        schema_roots: env.sdk_schemas().into_iter().collect(),
        ..Default::default()
    };

    let mut yaml = String::from("# ambuild project manifest\n");
    yaml.push_str(&manifest.to_yaml()?);
    if manifest.schema_roots.is_empty() {
        yaml.push_str("# schema_roots:\n#   - /path/to/amplitude/sdk/schemas\n");
    }

    fs::write(&manifest_path, &yaml).map_err(|e| AmError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    match &project_dir {
        Some(dir) => printer.info("Discovered", &dir.display().to_string()),
        None => printer.warning("Missing", "no amplitude_project directory found"),
    }
    printer.success("Created", MANIFEST_FILENAME);

    Ok(())
}

/// Find the Amplitude project directory relative to `root`.
///
/// Prefers the conventional location, then the shallowest directory named
/// `amplitude_project`.
fn find_project_dir(root: &Path) -> Option<PathBuf> {
    if root.join(DEFAULT_PROJECT_DIR).is_dir() {
        return Some(PathBuf::from(DEFAULT_PROJECT_DIR));
    }

    WalkDir::new(root)
        .max_depth(SEARCH_DEPTH)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir() && e.file_name() == SOURCE_ROOT_SEGMENT)
        .min_by_key(|e| e.depth())
        .and_then(|e| e.path().strip_prefix(root).ok().map(Path::to_path_buf))
}
