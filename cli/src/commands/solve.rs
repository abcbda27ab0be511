use anyhow::Result;
use rand::Rng;

use pairalloc::{Schedule, Solver, Weights, read_preferences, read_workloads};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::SolveArgs) -> Result<()> {
    let out_path = args.output.clone().unwrap_or("./finalConfig.txt".into());
    let seed = args.seed.unwrap_or_else(|| rand::rng().random_range(1..i32::MAX));

    println!("[solve] reading choices from {}", args.choices.display());
    let prefs = read_preferences(&args.choices, args.projects, args.pairs)?;

    println!("[solve] reading workloads from {}", args.workloads.display());
    let loads = read_workloads(&args.workloads, args.projects, args.supervisors)?;

    let weights = Weights::standard(args.pairs);
    let schedule = Schedule {
        initial_temp: args.initial_temp,
        temp_step: args.temp_step,
        ..Schedule::default()
    };
    let mut solver = Solver::new(prefs, loads, weights, schedule, seed)?;

    println!("[solve] seeding a feasible allocation (seed {})", seed);
    solver.seed_feasible()?;

    println!(
        "[solve] annealing from T={} in steps of {}",
        args.initial_temp, args.temp_step
    );
    solver.anneal();

    println!("Final energy is {:.6}", solver.energy());
    solver.append_report(&out_path)?;
    println!("[solve] report appended to {}", out_path.display());

    Ok(())
}
