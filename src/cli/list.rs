//! List command implementation.
//!
//! Shows every conversion unit with its targets and whether each target is
//! stale, either as status lines or as JSON on stdout.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::config::{self, Environment, Overrides};
use crate::discovery::{conversion_units, ConversionUnit};
use crate::driver::{check_staleness, Staleness};
use crate::error::{AmError, Result};
use crate::mapping::AssetCategory;
use crate::output::{display_path, Printer};

use super::ProjectArgs;

/// List conversion units, their targets and whether they are stale
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Print machine-readable JSON to stdout
    #[arg(long)]
    pub json: bool,
}

/// One source file and the binary it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub category: AssetCategory,
    pub schema: PathBuf,
    pub input: PathBuf,
    pub target: PathBuf,
    pub staleness: Staleness,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let env = Environment::from_process();
    let discovery = args.project.discover(&env)?;
    let config = config::resolve(
        &discovery.root,
        &discovery.manifest,
        &env,
        &Overrides::default(),
    )?;

    let units = conversion_units(&discovery.project_dir, &config.schema_roots, &discovery.manifest)?;
    let entries = collect_entries(&units)?;

    if args.json {
        let json = serde_json::to_string_pretty(&entries).map_err(|e| AmError::Parse {
            message: format!("Failed to serialize listing: {}", e),
            help: None,
        })?;
        println!("{}", json);
    } else {
        print_entries(&entries, printer);
    }

    Ok(())
}

/// Map every input of every unit and check its staleness.
pub fn collect_entries(units: &[ConversionUnit]) -> Result<Vec<ListEntry>> {
    let mut entries = Vec::new();

    for unit in units {
        for (input, target) in unit.targets() {
            let staleness = check_staleness(input, unit.schema(), &target)?;
            entries.push(ListEntry {
                category: unit.category(),
                schema: unit.schema().to_path_buf(),
                input: input.to_path_buf(),
                target,
                staleness,
            });
        }
    }

    Ok(entries)
}

fn print_entries(entries: &[ListEntry], printer: &Printer) {
    for entry in entries {
        let line = format!(
            "{} {} {} {}",
            display_path(&entry.input),
            printer.dim("->"),
            display_path(&entry.target),
            printer.dim(&format!("({})", entry.staleness))
        );
        if entry.staleness.needs_rebuild() {
            printer.warning(entry.category.name(), &line);
        } else {
            printer.info(entry.category.name(), &line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_collect_entries() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("amplitude_project");
        fs::create_dir_all(project.join("events")).unwrap();
        fs::write(project.join("events/play.json"), "{}").unwrap();

        let empty: [PathBuf; 0] = [];
        let units = conversion_units(&project, &empty, &Default::default()).unwrap();
        let entries = collect_entries(&units).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, AssetCategory::Events);
        assert_eq!(
            entries[0].target,
            dir.path().join("amplitude_assets/events/play.amevent")
        );
        assert_eq!(entries[0].staleness, Staleness::Missing);
    }

    #[test]
    fn test_entry_serializes() {
        let entry = ListEntry {
            category: AssetCategory::SwitchContainers,
            schema: PathBuf::from("switch_container_definition.fbs"),
            input: PathBuf::from("p/amplitude_project/switch_containers/a.json"),
            target: PathBuf::from("p/amplitude_assets/switch_containers/a.amswitchcontainer"),
            staleness: Staleness::SchemaNewer,
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["category"], "switch_containers");
        assert_eq!(value["staleness"], "schema_newer");
        assert_eq!(
            value["target"],
            "p/amplitude_assets/switch_containers/a.amswitchcontainer"
        );
    }
}
