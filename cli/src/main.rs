mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{aggregate, compare, groups, merge, resolve, sample};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    match &cli.command {
        Commands::Resolve(args) => resolve::run(&cli, args),
        Commands::Aggregate(args) => aggregate::run(&cli, args),
        Commands::Merge(args) => merge::run(&cli, args),
        Commands::Compare(args) => compare::run(&cli, args),
        Commands::Groups(command) => groups::run(&cli, command),
        Commands::Sample(args) => sample::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
