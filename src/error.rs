use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for ambuild operations
#[derive(Error, Diagnostic, Debug)]
pub enum AmError {
    #[error("IO error: {0}")]
    #[diagnostic(code(ambuild::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(ambuild::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(ambuild::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(ambuild::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build failed: {} conversion(s) did not complete", .failures.len())]
    #[diagnostic(code(ambuild::build))]
    Build {
        #[related]
        failures: Vec<BuildFailure>,
    },
}

pub type Result<T> = std::result::Result<T, AmError>;

/// Why an external compiler run did not produce its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The executable could not be found or started.
    Launch,
    /// The compiler ran and exited with a non-zero status.
    Compiler,
    /// The compiler did not exit before the configured timeout and was killed.
    Timeout,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Launch => write!(f, "launch"),
            FailureKind::Compiler => write!(f, "compiler"),
            FailureKind::Timeout => write!(f, "timeout"),
        }
    }
}

/// A single failed compiler invocation.
///
/// All causes share one shape: the attempted argument list, a numeric code
/// and an optional diagnostic message.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("Error running command `{}`. Returned {}.", .argv.join(" "), .code)]
#[diagnostic(code(ambuild::compiler))]
pub struct BuildFailure {
    pub kind: FailureKind,
    pub argv: Vec<String>,
    pub code: i32,
    #[help]
    pub message: Option<String>,
}

impl BuildFailure {
    /// The executable could not be started.
    pub fn launch(argv: Vec<String>, error: &std::io::Error) -> Self {
        Self {
            kind: FailureKind::Launch,
            argv,
            code: error.raw_os_error().unwrap_or(1),
            message: Some(error.to_string()),
        }
    }

    /// The compiler exited unsuccessfully. `code` is `None` when the process
    /// was terminated by a signal.
    pub fn compiler(argv: Vec<String>, code: Option<i32>) -> Self {
        Self {
            kind: FailureKind::Compiler,
            argv,
            code: code.unwrap_or(-1),
            message: code
                .is_none()
                .then(|| "process terminated by signal".to_string()),
        }
    }

    /// The compiler was killed after exceeding its time budget.
    pub fn timeout(argv: Vec<String>, seconds: u64) -> Self {
        Self {
            kind: FailureKind::Timeout,
            argv,
            code: -1,
            message: Some(format!("killed after {}s without exiting", seconds)),
        }
    }
}
