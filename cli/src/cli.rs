use std::path::PathBuf;

/// Pair-allocation CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "pairalloc", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Allocate one project to every pair by simulated annealing
    Solve(SolveArgs),
}

#[derive(clap::Args, Debug)]
pub struct SolveArgs {
    /// Ranked-choice CSV: one row per project, one column per pair,
    /// cells blank or a rank in 1..=4
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub choices: PathBuf,

    /// Supervisor workload CSV: one row per project, one column per
    /// supervisor, cells blank or a weight in (0,1]
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub workloads: PathBuf,

    /// Number of projects (rows in both input files)
    #[arg(short, long)]
    pub projects: usize,

    /// Number of pairs (columns in the choices file)
    #[arg(short = 'n', long)]
    pub pairs: usize,

    /// Number of supervisors (columns in the workload file)
    #[arg(short, long)]
    pub supervisors: usize,

    /// Generator seed in (0, 2^31-1); drawn from entropy when omitted
    #[arg(long)]
    pub seed: Option<i32>,

    /// Output report location, defaults to "./finalConfig.txt"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Starting temperature
    #[arg(long, default_value_t = 5.0)]
    pub initial_temp: f64,

    /// Temperature decrement per equilibration epoch
    #[arg(long, default_value_t = 0.001)]
    pub temp_step: f64,
}
