//! Energy and constraint-violation counters over an allocation.
//!
//! The counting order in `load_clash_count` (supervisors outer, projects
//! inner, pairs innermost, straight f64 summation) is fixed: identical
//! inputs must produce identical counts.

use crate::{allocation::Allocation, inputs::Workloads, objective::Weights};

impl Allocation {
    /// Energy to minimise: the negated sum of per-pair rank weights.
    /// Unplaced pairs (rank 0) contribute nothing.
    pub fn energy(&self, weights: &Weights) -> f64 {
        -self.entries().map(|(_, _, rank)| weights.for_rank(rank)).sum::<f64>()
    }

    /// Number of unordered pair clashes: pairs `{i,j}` holding the same
    /// project. Zero iff every pair holds a distinct project.
    pub fn clash_count(&self) -> usize {
        let mut count = 0;
        for i in 0..self.num_pairs() {
            for j in (i + 1)..self.num_pairs() {
                if self.project(i) == self.project(j) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Number of overloaded supervisors among the supervisors of `project`.
    ///
    /// A supervisor is overloaded when the loads of all currently assigned
    /// projects they supervise sum strictly above 1.0; a total of exactly
    /// 1.0 is feasible. Supervisors not attached to `project` are ignored,
    /// which makes this a sound local check after moving one pair onto
    /// `project`.
    pub fn load_clash_count(&self, loads: &Workloads, project: usize) -> usize {
        let mut clashes = 0;
        for supervisor in 0..loads.num_supervisors() {
            if loads.weight(project, supervisor) <= 0.0 {
                continue;
            }
            let mut total = 0.0f64;
            for candidate in 0..loads.num_projects() {
                for pair in 0..self.num_pairs() {
                    if self.project(pair) == candidate {
                        total += loads.weight(candidate, supervisor);
                    }
                }
            }
            if total > 1.0 {
                clashes += 1;
            }
        }
        clashes
    }

    /// Global infeasibility measure: pair clashes plus the per-pair
    /// supervisor clashes of every assigned project. Zero iff the
    /// allocation is feasible.
    pub fn violation_count(&self, loads: &Workloads) -> usize {
        let mut count = self.clash_count();
        for pair in 0..self.num_pairs() {
            count += self.load_clash_count(loads, self.project(pair));
        }
        count
    }
}
