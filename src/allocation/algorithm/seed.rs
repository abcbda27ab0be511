//! Feasible starting allocation via greedy repair.

use anyhow::{Result, ensure};

use crate::{
    allocation::Allocation,
    inputs::{Preferences, Workloads},
    rng::ShiftRegisterRng,
};

impl Allocation {
    /// Seed every pair at a randomly drawn rank, then repair until no
    /// constraint is violated.
    ///
    /// A pair whose drawn rank is unranked stays parked at the placeholder
    /// slot for the repair loop to move. Repair is greedy descent on the
    /// violation count: apply a random rank change, revert it if the count
    /// rose, keep it otherwise. The count is non-increasing and bounded by
    /// zero but not guaranteed to get there (a pair that ranked nothing can
    /// pin it above zero), so the loop is capped at `max_repair_moves` and
    /// failing to converge is an error.
    pub(crate) fn seed_feasible(
        &mut self,
        prefs: &Preferences,
        loads: &Workloads,
        rng: &mut ShiftRegisterRng,
        max_repair_moves: usize,
    ) -> Result<()> {
        for pair in 0..self.num_pairs() {
            let rank = rng.index_below(4) as u8 + 1;
            if let Some(project) = prefs.project_ranked(pair, rank) {
                self.set(pair, project, rank);
            }
        }

        let mut violations = self.violation_count(loads);
        log::debug!("seeded allocation with {violations} violations");

        let mut moves = 0usize;
        while violations > 0 {
            ensure!(
                moves < max_repair_moves,
                "no feasible allocation found: {} violations left after {} repair moves",
                violations,
                moves,
            );
            moves += 1;

            let proposal = self.propose_rank_change(prefs, rng);
            let trial = self.violation_count(loads);
            if trial > violations {
                self.revert(&proposal);
            } else {
                violations = trial;
            }
        }

        log::debug!("feasible allocation reached after {moves} repair moves");
        Ok(())
    }
}
