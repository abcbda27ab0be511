
mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::solve;

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    match &cli.command {
        Commands::Solve(args) => solve::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
