mod cli;
mod commands;
mod logger;

use cli::{Cli, Commands};
use commands::{mesh, stats};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    logger::init(cli.verbose);
    match &cli.command {
        Commands::Mesh(args) => mesh::run(&cli, args),
        Commands::Stats(args) => stats::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
