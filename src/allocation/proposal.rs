//! Single-pair reassignment proposals.

use crate::{allocation::Allocation, inputs::Preferences, rng::ShiftRegisterRng};

/// Attempts at drawing a rank different from the pair's current one before
/// the proposal degenerates to a null move.
const MAX_RANK_DRAWS: usize = 32;

/// Pre-move state of the touched pair; applying `revert` with it restores
/// the allocation exactly.
#[derive(Clone, Copy, Debug)]
pub struct Proposal {
    pub pair: usize,
    prev_project: usize,
    prev_rank: u8,
}

impl Allocation {
    /// Propose moving one random pair to a differently ranked project.
    ///
    /// Draws the pair, then draws ranks until one differs from the pair's
    /// current rank, and reassigns the pair to the first project it ranked
    /// there. The draw order (pair first, then every rank attempt) and the
    /// ascending project scan are fixed: a seeded run must replay the same
    /// proposals. Two degenerate outcomes leave the allocation untouched
    /// and the caller's energy delta at zero: the rank-draw cap runs out,
    /// or the pair never ranked the drawn value.
    pub(crate) fn propose_rank_change(
        &mut self,
        prefs: &Preferences,
        rng: &mut ShiftRegisterRng,
    ) -> Proposal {
        debug_assert_eq!(self.num_pairs(), prefs.num_pairs());

        let pair = rng.index_below(self.num_pairs());
        let mut drawn = None;
        for _ in 0..MAX_RANK_DRAWS {
            let rank = rng.index_below(4) as u8 + 1;
            if rank != self.rank(pair) {
                drawn = Some(rank);
                break;
            }
        }

        let proposal = Proposal {
            pair,
            prev_project: self.project(pair),
            prev_rank: self.rank(pair),
        };

        if let Some(rank) = drawn {
            if let Some(project) = prefs.project_ranked(pair, rank) {
                self.set(pair, project, rank);
            }
        }

        proposal
    }

    /// Undo a proposal, restoring the touched pair's previous slot.
    pub(crate) fn revert(&mut self, proposal: &Proposal) {
        self.set(proposal.pair, proposal.prev_project, proposal.prev_rank);
    }
}

#[cfg(test)]
mod tests {
    use crate::{allocation::Allocation, inputs::Preferences, rng::ShiftRegisterRng};

    // Every pair ranks four distinct projects, so no proposal is null.
    fn fully_ranked_prefs() -> Preferences {
        #[rustfmt::skip]
        let cells = vec![
            1, 2,
            2, 1,
            3, 4,
            4, 3,
        ];
        Preferences::new(4, 2, cells).unwrap()
    }

    #[test]
    fn proposal_touches_exactly_one_pair() {
        let prefs = fully_ranked_prefs();
        let mut rng = ShiftRegisterRng::new(2024).unwrap();
        let mut alloc = Allocation::unseeded(2);
        alloc.set(0, 0, 1);
        alloc.set(1, 1, 1);

        for _ in 0..100 {
            let before = alloc.clone();
            let proposal = alloc.propose_rank_change(&prefs, &mut rng);
            let changed = (0..2)
                .filter(|&pair| {
                    alloc.project(pair) != before.project(pair)
                        || alloc.rank(pair) != before.rank(pair)
                })
                .collect::<Vec<_>>();
            assert_eq!(changed, vec![proposal.pair]);
            assert_ne!(alloc.rank(proposal.pair), before.rank(proposal.pair));
            assert_eq!(
                prefs.rank(alloc.project(proposal.pair), proposal.pair),
                alloc.rank(proposal.pair),
            );
        }
    }

    #[test]
    fn revert_restores_state_exactly() {
        let prefs = fully_ranked_prefs();
        let mut rng = ShiftRegisterRng::new(7).unwrap();
        let mut alloc = Allocation::unseeded(2);
        alloc.set(0, 2, 3);
        alloc.set(1, 1, 1);

        for _ in 0..100 {
            let before = alloc.clone();
            let proposal = alloc.propose_rank_change(&prefs, &mut rng);
            alloc.revert(&proposal);
            assert_eq!(alloc, before);
        }
    }

    #[test]
    fn energy_delta_tracks_only_the_touched_pair() {
        use crate::objective::Weights;

        let prefs = fully_ranked_prefs();
        // Small integer weights keep the energy sums exact.
        let weights = Weights::new([4.0, 3.0, 2.0, 1.0]).unwrap();
        let mut rng = ShiftRegisterRng::new(1009).unwrap();
        let mut alloc = Allocation::unseeded(2);
        alloc.set(0, 0, 1);
        alloc.set(1, 1, 1);

        for _ in 0..50 {
            let before = alloc.clone();
            let before_energy = alloc.energy(&weights);
            let proposal = alloc.propose_rank_change(&prefs, &mut rng);
            let after_energy = alloc.energy(&weights);

            let expected = weights.for_rank(before.rank(proposal.pair))
                - weights.for_rank(alloc.rank(proposal.pair));
            assert_eq!(after_energy - before_energy, expected);
        }
    }

    #[test]
    fn unranked_draw_is_a_null_move() {
        // The single pair only ranked one project, so every proposal lands
        // on a rank it never used and must leave the state untouched.
        let prefs = Preferences::new(2, 1, vec![1, 0]).unwrap();
        let mut rng = ShiftRegisterRng::new(31415).unwrap();
        let mut alloc = Allocation::unseeded(1);
        alloc.set(0, 0, 1);

        for _ in 0..50 {
            let before = alloc.clone();
            alloc.propose_rank_change(&prefs, &mut rng);
            assert_eq!(alloc, before);
        }
    }
}
