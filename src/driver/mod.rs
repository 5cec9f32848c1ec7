//! The build driver.
//!
//! Walks conversion units, decides per file whether the binary is stale and
//! runs the external compiler when it is. Clean mode deletes every target
//! a build would write.

mod compiler;
mod report;
mod staleness;

use std::fs;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::config::{BuildConfig, FailurePolicy};
use crate::discovery::ConversionUnit;
use crate::error::{AmError, Result};
use crate::mapping::map_output_path;
use crate::output::{display_path, Printer};

pub use compiler::Invocation;
pub use report::{BuildReport, CleanReport, FileOutcome, Outcome};
pub use staleness::{check as check_staleness, Staleness};

/// Runs builds and cleans with a fixed configuration.
#[derive(Debug, Clone)]
pub struct Driver {
    config: BuildConfig,
    printer: Printer,
}

impl Driver {
    /// Create a driver that reports nothing while it works.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            printer: Printer::silent(),
        }
    }

    /// Report progress through `printer`.
    pub fn with_printer(mut self, printer: Printer) -> Self {
        self.printer = printer;
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Convert every stale input of every unit.
    ///
    /// Compiler failures are recorded in the report, not returned; call
    /// [`BuildReport::into_result`] to turn them into an error. Filesystem
    /// errors (creating output directories, reading source times) abort the
    /// build immediately.
    pub fn build(&self, units: &[ConversionUnit]) -> Result<BuildReport> {
        let jobs: Vec<(&Path, &Path)> = units
            .iter()
            .flat_map(|unit| {
                unit.input_files()
                    .iter()
                    .map(move |input| (unit.schema(), input.as_path()))
            })
            .collect();

        if self.config.jobs > 1 && jobs.len() > 1 {
            self.build_parallel(&jobs)
        } else {
            self.build_sequential(&jobs)
        }
    }

    fn build_sequential(&self, jobs: &[(&Path, &Path)]) -> Result<BuildReport> {
        let mut report = BuildReport::new();

        for (index, (schema, input)) in jobs.iter().enumerate() {
            let entry = self.convert(schema, input)?;
            let failed = matches!(entry.outcome, Outcome::Failed(_));
            report.push(entry);

            if failed && self.config.policy == FailurePolicy::FailFast {
                report.add_skipped(jobs.len() - index - 1);
                break;
            }
        }

        Ok(report)
    }

    fn build_parallel(&self, jobs: &[(&Path, &Path)]) -> Result<BuildReport> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.jobs)
            .build()
            .map_err(|e| AmError::Config {
                message: format!("Failed to start {} build workers: {}", self.config.jobs, e),
                help: Some("Try a smaller --jobs value".to_string()),
            })?;

        let stop = AtomicBool::new(false);
        let results: Vec<Option<Result<FileOutcome>>> = pool.install(|| {
            jobs.par_iter()
                .map(|(schema, input)| {
                    if stop.load(Ordering::SeqCst) {
                        return None;
                    }
                    let result = self.convert(schema, input);
                    let halt = match &result {
                        Ok(entry) => {
                            matches!(entry.outcome, Outcome::Failed(_))
                                && self.config.policy == FailurePolicy::FailFast
                        }
                        Err(_) => true,
                    };
                    if halt {
                        stop.store(true, Ordering::SeqCst);
                    }
                    Some(result)
                })
                .collect()
        });

        let mut report = BuildReport::new();
        for result in results {
            match result {
                Some(entry) => report.push(entry?),
                None => report.add_skipped(1),
            }
        }
        Ok(report)
    }

    /// Bring one target up to date.
    fn convert(&self, schema: &Path, input: &Path) -> Result<FileOutcome> {
        let target = map_output_path(input);
        let out_dir = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();

        // create_dir_all tolerates a concurrent creator.
        fs::create_dir_all(&out_dir).map_err(|e| AmError::Io {
            path: out_dir.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;

        let staleness = if self.config.force {
            Staleness::Missing
        } else {
            staleness::check(input, schema, &target)?
        };

        if !staleness.needs_rebuild() {
            self.printer.verbose("Fresh", &display_path(&target));
            return Ok(FileOutcome {
                input: input.to_path_buf(),
                target,
                outcome: Outcome::UpToDate,
            });
        }

        self.printer.status(
            "Converting",
            &format!("{} {}", display_path(input), self.printer.dim(&format!("({})", staleness))),
        );

        let invocation = Invocation::new(
            &self.config.compiler_path,
            &out_dir,
            &self.config.schema_roots,
            schema,
            input,
        );
        let outcome = match invocation.run(self.config.timeout) {
            Ok(()) => Outcome::Converted(staleness),
            Err(failure) => {
                self.printer.error("Failed", &display_path(input));
                Outcome::Failed(failure)
            }
        };

        Ok(FileOutcome {
            input: input.to_path_buf(),
            target,
            outcome,
        })
    }

    /// Delete every target the units map to. See [`clean`].
    pub fn clean(&self, units: &[ConversionUnit]) -> Result<CleanReport> {
        clean(units, &self.printer)
    }
}

/// Delete every target the units map to. Absent targets are ignored.
///
/// Needs neither schemas nor a compiler, so it is usable without a
/// [`BuildConfig`].
pub fn clean(units: &[ConversionUnit], printer: &Printer) -> Result<CleanReport> {
    let mut report = CleanReport::default();

    for unit in units {
        for (_, target) in unit.targets() {
            if !target.is_file() {
                report.absent += 1;
                continue;
            }
            match fs::remove_file(&target) {
                Ok(()) => {
                    printer.status("Removed", &display_path(&target));
                    report.removed.push(target);
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => report.absent += 1,
                Err(e) => {
                    return Err(AmError::Io {
                        path: target,
                        message: format!("Failed to remove: {}", e),
                    })
                }
            }
        }
    }

    Ok(report)
}
