pub mod build;
pub mod clean;
pub mod completions;
pub mod init;
pub mod list;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Environment;
use crate::discovery::{discover, DiscoveryResult};
use crate::error::Result;
use crate::output::{Printer, Verbosity};

/// ambuild - Amplitude audio asset builder
#[derive(Parser, Debug)]
#[command(name = "ambuild")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Also report up-to-date files
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only report errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Build the status printer matching the verbosity flags.
    pub fn printer(&self) -> Printer {
        let verbosity = if self.quiet {
            Verbosity::Silent
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        Printer::new().with_verbosity(verbosity)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile stale JSON definitions into engine binaries
    Build(build::BuildArgs),

    /// Delete every generated binary
    Clean(clean::CleanArgs),

    /// List conversion units, their targets and whether they are stale
    List(list::ListArgs),

    /// Initialize an ambuild project (generates ambuild.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Project selection shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Game project root (default: $PATH_O3DE_PROJECT, then the current directory)
    #[arg(long, short = 'p', value_name = "DIR")]
    pub project: Option<PathBuf>,
}

impl ProjectArgs {
    /// Resolve the project root and discover the project below it.
    pub fn discover(&self, env: &Environment) -> Result<DiscoveryResult> {
        let cwd = std::env::current_dir()?;
        let root = env.project_root(self.project.as_deref(), &cwd);
        discover(root)
    }
}
