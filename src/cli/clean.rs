//! Clean command implementation.
//!
//! Deletes every binary a build of the current sources would write.

use std::path::PathBuf;

use clap::Args;

use crate::config::Environment;
use crate::discovery::conversion_units;
use crate::driver;
use crate::error::Result;
use crate::output::{plural, Printer};

use super::ProjectArgs;

/// Delete every generated binary
#[derive(Args, Debug, Default)]
pub struct CleanArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

pub fn run(args: CleanArgs, printer: &Printer) -> Result<()> {
    let env = Environment::from_process();
    let discovery = args.project.discover(&env)?;

    // Targets depend only on source paths, so schemas are not located.
    let no_schemas: [PathBuf; 0] = [];
    let units = conversion_units(&discovery.project_dir, &no_schemas, &discovery.manifest)?;

    let report = driver::clean(&units, printer)?;

    printer.success(
        "Cleaned",
        &format!(
            "{} removed, {} already absent",
            plural(report.removed.len(), "binary", "binaries"),
            report.absent
        ),
    );

    Ok(())
}
