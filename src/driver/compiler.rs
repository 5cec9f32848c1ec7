//! External schema compiler invocation.
//!
//! One invocation compiles one JSON document against one schema into a
//! binary written to an output directory:
//!
//! ```text
//! flatc -o <out_dir> [-I <schema_root>]... -b <schema> <input>
//! ```

use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::BuildFailure;

/// Interval between exit polls while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// A single compiler run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub out_dir: PathBuf,
    pub include_dirs: Vec<PathBuf>,
    pub schema: PathBuf,
    pub input: PathBuf,
}

impl Invocation {
    pub fn new(
        program: &Path,
        out_dir: &Path,
        include_dirs: &[PathBuf],
        schema: &Path,
        input: &Path,
    ) -> Self {
        Self {
            program: program.to_path_buf(),
            out_dir: out_dir.to_path_buf(),
            include_dirs: include_dirs.to_vec(),
            schema: schema.to_path_buf(),
            input: input.to_path_buf(),
        }
    }

    /// Arguments passed to the program, excluding the program itself.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["-o".to_string(), display(&self.out_dir)];
        for dir in &self.include_dirs {
            args.push("-I".to_string());
            args.push(display(dir));
        }
        args.push("-b".to_string());
        args.push(display(&self.schema));
        args.push(display(&self.input));
        args
    }

    /// Full argument vector including the program, as reported on failure.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = vec![display(&self.program)];
        argv.extend(self.args());
        argv
    }

    /// Run the compiler to completion.
    ///
    /// The child inherits stdout/stderr so compiler diagnostics stay visible.
    pub fn run(&self, timeout: Option<Duration>) -> std::result::Result<(), BuildFailure> {
        let mut child = Command::new(&self.program)
            .args(self.args())
            .spawn()
            .map_err(|e| BuildFailure::launch(self.argv(), &e))?;

        let status = match timeout {
            None => child.wait(),
            Some(limit) => match wait_with_deadline(&mut child, limit) {
                Ok(Some(status)) => Ok(status),
                Ok(None) => return Err(BuildFailure::timeout(self.argv(), limit.as_secs())),
                Err(e) => Err(e),
            },
        }
        .map_err(|e| BuildFailure::launch(self.argv(), &e))?;

        if status.success() {
            Ok(())
        } else {
            Err(BuildFailure::compiler(self.argv(), status.code()))
        }
    }
}

/// Wait for `child`, killing it once `limit` has elapsed.
///
/// Returns `Ok(None)` when the child had to be killed.
fn wait_with_deadline(child: &mut Child, limit: Duration) -> std::io::Result<Option<ExitStatus>> {
    let deadline = Instant::now() + limit;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            // The child may exit between the poll and the kill.
            let _ = child.kill();
            child.wait()?;
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
