//! Simulated-annealing scheduler: temperature descent over equilibration
//! epochs with Metropolis acceptance and constraint rejection.

use crate::{
    allocation::Allocation,
    inputs::{Preferences, Workloads},
    objective::Weights,
    rng::ShiftRegisterRng,
};

/// Temperature schedule and per-epoch move budgets.
///
/// The schedule is integer-stepped: `round(initial_temp / temp_step)`
/// cooling epochs followed by one epoch at exactly zero temperature, so
/// termination never hinges on floating-point drift.
#[derive(Clone, Copy, Debug)]
pub struct Schedule {
    /// Starting temperature T₀.
    pub initial_temp: f64,
    /// Temperature decrement per epoch.
    pub temp_step: f64,
    /// Epoch move cap, per pair.
    pub moves_per_pair: usize,
    /// Epoch successful-move cap, per pair.
    pub successes_per_pair: usize,
}

impl Default for Schedule {
    fn default() -> Self {
        Self { initial_temp: 5.0, temp_step: 0.001, moves_per_pair: 1000, successes_per_pair: 100 }
    }
}

impl Schedule {
    /// Number of cooling epochs before the zero-temperature epoch.
    pub(crate) fn cooling_epochs(&self) -> usize {
        (self.initial_temp / self.temp_step).round() as usize
    }

    /// Temperature of a given epoch; the last epoch is exactly zero.
    pub(crate) fn temperature(&self, epoch: usize) -> f64 {
        if epoch >= self.cooling_epochs() {
            0.0
        } else {
            (self.initial_temp - epoch as f64 * self.temp_step).max(0.0)
        }
    }
}

pub(crate) struct EpochStats {
    pub(crate) moves: usize,
    /// Net successful moves; no-op moves are debited on top of rejections,
    /// so this can end negative.
    pub(crate) successes: isize,
    pub(crate) unchanged: usize,
}

impl Allocation {
    /// Run the full temperature schedule. The allocation must already be
    /// feasible; every epoch leaves it feasible.
    pub(crate) fn anneal(
        &mut self,
        prefs: &Preferences,
        loads: &Workloads,
        weights: &Weights,
        schedule: &Schedule,
        rng: &mut ShiftRegisterRng,
    ) {
        assert!(schedule.initial_temp >= 0.0, "initial temperature must be non-negative");
        assert!(schedule.temp_step > 0.0, "temperature step must be positive");

        let cooling = schedule.cooling_epochs();
        log::info!(
            "annealing over {} epochs from T={} in steps of {}",
            cooling + 1,
            schedule.initial_temp,
            schedule.temp_step,
        );

        for epoch in 0..=cooling {
            let temp = schedule.temperature(epoch);
            let stats = self.equilibrate(prefs, loads, weights, schedule, temp, rng);
            log::debug!(
                "epoch {}: T={:.3} energy={:.4} moves={} successes={} no-ops={}",
                epoch,
                temp,
                self.energy(weights),
                stats.moves,
                stats.successes,
                stats.unchanged,
            );
        }
    }

    /// One equilibration epoch at a fixed temperature.
    ///
    /// Each move proposes a single-pair rank change and draws one
    /// acceptance variate, whether or not the decision needs it, so the
    /// generator stream stays aligned across runs. The move is reverted on
    /// the first failing predicate, in this order: pair uniqueness broken;
    /// Metropolis rejection (positive temperature); uphill move at zero
    /// temperature; supervisor overload on the new project. Uniqueness is
    /// checked first, so the later predicates run on clash-free states.
    /// A move that lands on the pre-move energy is debited from the
    /// success counter as a no-op, on top of any rejection debit.
    fn equilibrate(
        &mut self,
        prefs: &Preferences,
        loads: &Workloads,
        weights: &Weights,
        schedule: &Schedule,
        temp: f64,
        rng: &mut ShiftRegisterRng,
    ) -> EpochStats {
        let moves_cap = schedule.moves_per_pair * self.num_pairs();
        let success_cap = (schedule.successes_per_pair * self.num_pairs()) as isize;

        let mut moves = 0usize;
        let mut successes = 0isize;
        let mut unchanged = 0usize;
        let mut current = self.energy(weights);

        while moves < moves_cap && successes < success_cap {
            moves += 1;
            successes += 1;

            let proposal = self.propose_rank_change(prefs, rng);
            let trial = self.energy(weights);
            let delta = trial - current;
            let variate = rng.next_uniform();
            let overloads = self.load_clash_count(loads, self.project(proposal.pair));

            if self.clash_count() > 0 {
                self.revert(&proposal);
                successes -= 1;
            } else if temp > 0.0 && variate > (-delta / temp).exp() {
                self.revert(&proposal);
                successes -= 1;
            } else if temp == 0.0 && trial > current {
                self.revert(&proposal);
                successes -= 1;
            } else if overloads > 0 {
                self.revert(&proposal);
                successes -= 1;
            }

            if trial == current {
                unchanged += 1;
                successes -= 1;
            }

            current = self.energy(weights);
        }

        EpochStats { moves, successes, unchanged }
    }
}
