use clap::Parser;
use miette::Result;
use ambuild::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = cli.printer();

    match cli.command {
        Commands::Build(args) => ambuild::cli::build::run(args, &printer)?,
        Commands::Clean(args) => ambuild::cli::clean::run(args, &printer)?,
        Commands::List(args) => ambuild::cli::list::run(args, &printer)?,
        Commands::Init(args) => ambuild::cli::init::run(args, &printer)?,
        Commands::Completions(args) => ambuild::cli::completions::run(args)?,
    }

    Ok(())
}
