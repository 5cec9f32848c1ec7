//! Build command implementation.
//!
//! Compiles every stale JSON definition of the Amplitude project, optionally
//! rebuilding on change until interrupted.

use std::path::PathBuf;

use clap::Args;

use crate::config::{self, BuildConfig, Environment, Overrides};
use crate::discovery::{conversion_units, total_inputs, ConversionUnit, DiscoveryResult};
use crate::driver::{BuildReport, Driver};
use crate::error::{AmError, Result};
use crate::output::{display_path, plural, Printer};
use crate::watch::ChangeWatcher;

use super::ProjectArgs;

/// Compile stale JSON definitions into engine binaries
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Schema directory (repeatable; default: $SS_AMPLITUDE_ROOT_PATH/sdk/schemas)
    #[arg(long = "schemas", value_name = "DIR")]
    pub schema_roots: Vec<PathBuf>,

    /// Path to the flatc compiler
    #[arg(long, value_name = "PATH")]
    pub flatc: Option<PathBuf>,

    /// Number of concurrent compiler processes
    #[arg(long, short)]
    pub jobs: Option<usize>,

    /// Keep converting after a failure
    #[arg(long)]
    pub keep_going: bool,

    /// Rebuild every target, ignoring modification times
    #[arg(long)]
    pub force: bool,

    /// Kill a compiler run after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Fail if flatc cannot be located instead of relying on PATH
    #[arg(long)]
    pub require_compiler: bool,

    /// Rebuild whenever a definition or schema changes
    #[arg(long)]
    pub watch: bool,
}

impl BuildArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            schema_roots: self.schema_roots.clone(),
            compiler: self.flatc.clone(),
            jobs: self.jobs,
            keep_going: self.keep_going,
            timeout_secs: self.timeout,
            force: self.force,
            require_compiler: self.require_compiler,
        }
    }
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let env = Environment::from_process();
    let discovery = args.project.discover(&env)?;
    let config = config::resolve(&discovery.root, &discovery.manifest, &env, &args.overrides())?;

    ensure_project_dir(&discovery)?;

    let driver = Driver::new(config).with_printer(*printer);
    let result = build_once(&discovery, &driver, printer);

    if !args.watch {
        return result.map(|_| ());
    }

    if let Err(err) = result {
        report_error(err);
    }
    watch(&discovery, &driver, printer)
}

/// Discover units and run one build.
fn build_once(
    discovery: &DiscoveryResult,
    driver: &Driver,
    printer: &Printer,
) -> Result<BuildReport> {
    let units = units_for(discovery, driver.config())?;

    printer.status(
        "Building",
        &format!(
            "{} ({})",
            display_path(&discovery.project_dir),
            plural(total_inputs(&units), "definition", "definitions")
        ),
    );

    let report = driver.build(&units)?;

    let mut summary = format!(
        "{} converted, {} up to date",
        report.converted_count(),
        report.up_to_date_count()
    );
    if report.skipped_count() > 0 {
        summary.push_str(&format!(", {} skipped", report.skipped_count()));
    }

    if report.has_failures() {
        printer.error("Failed", &summary);
    } else {
        printer.success("Finished", &summary);
    }

    report.into_result()
}

fn units_for(discovery: &DiscoveryResult, config: &BuildConfig) -> Result<Vec<ConversionUnit>> {
    conversion_units(&discovery.project_dir, &config.schema_roots, &discovery.manifest)
}

fn ensure_project_dir(discovery: &DiscoveryResult) -> Result<()> {
    if discovery.project_dir.is_dir() {
        return Ok(());
    }
    Err(AmError::Config {
        message: format!(
            "Amplitude project not found at {}",
            discovery.project_dir.display()
        ),
        help: Some(
            "Pass --project, set PATH_O3DE_PROJECT or set `project_dir` in ambuild.yaml"
                .to_string(),
        ),
    })
}

/// Rebuild on every batch of relevant changes. Build errors are reported and
/// the loop continues; watcher errors end it.
fn watch(discovery: &DiscoveryResult, driver: &Driver, printer: &Printer) -> Result<()> {
    let mut dirs = vec![discovery.project_dir.clone()];
    dirs.extend(driver.config().schema_roots.iter().cloned());

    let watcher = ChangeWatcher::new(&dirs)?;
    printer.info("Watching", &display_path(&discovery.project_dir));

    loop {
        let changed = watcher.wait_for_change()?;
        printer.info("Changed", &plural(changed.len(), "file", "files"));

        if let Err(err) = build_once(discovery, driver, printer) {
            report_error(err);
        }
    }
}

fn report_error(err: AmError) {
    eprintln!("{:?}", miette::Report::new(err));
}
