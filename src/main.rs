use clap::Parser;
use miette::Result;
use tilecast::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Place(args) => tilecast::cli::place::run(args)?,
        Commands::Table(args) => tilecast::cli::table::run(args)?,
        Commands::Convert(args) => tilecast::cli::convert::run(args)?,
        Commands::Names(args) => tilecast::cli::names::run(args)?,
        Commands::Check(args) => tilecast::cli::check::run(args)?,
        Commands::Completions(args) => tilecast::cli::completions::run(args)?,
    }

    Ok(())
}
