//! Dense input grids: ranked choices and supervisor workload weights.

use anyhow::{Result, ensure};

/// Lowest (worst) rank a pair can attach to a project.
pub const MAX_RANK: u8 = 4;

/// P×N grid of ranks: one row per project, one column per pair.
/// A cell holds 0 ("pair did not rank this project") or a rank in 1..=4,
/// and each pair uses each rank at most once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preferences {
    ranks: Vec<u8>, // row-major
    num_projects: usize,
    num_pairs: usize,
}

impl Preferences {
    /// Construct from a row-major cell vector, validating cell values and
    /// the one-project-per-rank rule for every pair.
    pub fn new(num_projects: usize, num_pairs: usize, ranks: Vec<u8>) -> Result<Self> {
        ensure!(num_projects > 0, "[inputs] need at least one project");
        ensure!(num_pairs > 0, "[inputs] need at least one pair");
        ensure!(
            ranks.len() == num_projects * num_pairs,
            "[inputs] choice grid holds {} cells, expected {}x{}",
            ranks.len(),
            num_projects,
            num_pairs,
        );

        for pair in 0..num_pairs {
            let mut taken = [false; MAX_RANK as usize + 1];
            for project in 0..num_projects {
                let rank = ranks[project * num_pairs + pair];
                ensure!(
                    rank <= MAX_RANK,
                    "[inputs] pair {} ranks project {} at {}, expected 0..={}",
                    pair + 1,
                    project + 1,
                    rank,
                    MAX_RANK,
                );
                if rank > 0 {
                    ensure!(
                        !taken[rank as usize],
                        "[inputs] pair {} uses rank {} more than once",
                        pair + 1,
                        rank,
                    );
                    taken[rank as usize] = true;
                }
            }
        }

        Ok(Self { ranks, num_projects, num_pairs })
    }

    #[inline] pub fn num_projects(&self) -> usize { self.num_projects }
    #[inline] pub fn num_pairs(&self) -> usize { self.num_pairs }

    /// Rank pair `pair` attached to project `project` (0 if unranked).
    #[inline]
    pub fn rank(&self, project: usize, pair: usize) -> u8 {
        debug_assert!(project < self.num_projects, "project {} out of range", project);
        debug_assert!(pair < self.num_pairs, "pair {} out of range", pair);
        self.ranks[project * self.num_pairs + pair]
    }

    /// First project (ascending) that `pair` ranked at `rank`, if any.
    /// The scan order is part of the move-generation contract.
    pub fn project_ranked(&self, pair: usize, rank: u8) -> Option<usize> {
        (0..self.num_projects).find(|&project| self.rank(project, pair) == rank)
    }
}

/// P×L grid of workload weights: one row per project, one column per
/// supervisor. A cell holds 0.0 ("does not supervise") or the fractional
/// load in (0,1] the project puts on that supervisor.
#[derive(Clone, Debug, PartialEq)]
pub struct Workloads {
    weights: Vec<f64>, // row-major
    num_projects: usize,
    num_supervisors: usize,
}

impl Workloads {
    /// Construct from a row-major cell vector, validating the weight range.
    pub fn new(num_projects: usize, num_supervisors: usize, weights: Vec<f64>) -> Result<Self> {
        ensure!(num_projects > 0, "[inputs] need at least one project");
        ensure!(num_supervisors > 0, "[inputs] need at least one supervisor");
        ensure!(
            weights.len() == num_projects * num_supervisors,
            "[inputs] workload grid holds {} cells, expected {}x{}",
            weights.len(),
            num_projects,
            num_supervisors,
        );

        for (cell, &weight) in weights.iter().enumerate() {
            ensure!(
                (0.0..=1.0).contains(&weight),
                "[inputs] workload cell ({},{}) holds {}, expected a weight in [0,1]",
                cell / num_supervisors + 1,
                cell % num_supervisors + 1,
                weight,
            );
        }

        Ok(Self { weights, num_projects, num_supervisors })
    }

    #[inline] pub fn num_projects(&self) -> usize { self.num_projects }
    #[inline] pub fn num_supervisors(&self) -> usize { self.num_supervisors }

    /// Load project `project` puts on supervisor `supervisor` (0.0 if none).
    #[inline]
    pub fn weight(&self, project: usize, supervisor: usize) -> f64 {
        debug_assert!(project < self.num_projects, "project {} out of range", project);
        debug_assert!(supervisor < self.num_supervisors, "supervisor {} out of range", supervisor);
        self.weights[project * self.num_supervisors + supervisor]
    }
}

#[cfg(test)]
mod tests {
    use super::{Preferences, Workloads};

    #[test]
    fn rank_lookup_is_row_major() {
        let prefs = Preferences::new(2, 3, vec![1, 2, 0, 2, 0, 4]).unwrap();
        assert_eq!(prefs.rank(0, 0), 1);
        assert_eq!(prefs.rank(0, 1), 2);
        assert_eq!(prefs.rank(0, 2), 0);
        assert_eq!(prefs.rank(1, 0), 2);
        assert_eq!(prefs.rank(1, 1), 0);
        assert_eq!(prefs.rank(1, 2), 4);
    }

    #[test]
    fn project_ranked_scans_ascending() {
        let prefs = Preferences::new(3, 1, vec![0, 2, 1]).unwrap();
        assert_eq!(prefs.project_ranked(0, 1), Some(2));
        assert_eq!(prefs.project_ranked(0, 2), Some(1));
        assert_eq!(prefs.project_ranked(0, 3), None);
        assert_eq!(prefs.project_ranked(0, 4), None);
    }

    #[test]
    fn rejects_bad_choice_grids() {
        assert!(Preferences::new(2, 2, vec![1, 2, 3]).is_err()); // wrong size
        assert!(Preferences::new(2, 1, vec![5, 0]).is_err()); // rank out of range
        assert!(Preferences::new(2, 1, vec![3, 3]).is_err()); // rank reused
        assert!(Preferences::new(0, 1, vec![]).is_err());
    }

    #[test]
    fn duplicate_ranks_allowed_across_pairs() {
        // Two pairs may both use rank 1, just not the same pair twice.
        assert!(Preferences::new(1, 2, vec![1, 1]).is_ok());
    }

    #[test]
    fn weight_lookup_is_row_major() {
        let loads = Workloads::new(2, 2, vec![0.5, 0.0, 1.0, 0.25]).unwrap();
        assert_eq!(loads.weight(0, 0), 0.5);
        assert_eq!(loads.weight(0, 1), 0.0);
        assert_eq!(loads.weight(1, 0), 1.0);
        assert_eq!(loads.weight(1, 1), 0.25);
    }

    #[test]
    fn rejects_bad_workload_grids() {
        assert!(Workloads::new(2, 1, vec![0.5]).is_err()); // wrong size
        assert!(Workloads::new(1, 1, vec![1.5]).is_err()); // above cap
        assert!(Workloads::new(1, 1, vec![-0.1]).is_err()); // negative
        assert!(Workloads::new(1, 1, vec![1.0]).is_ok()); // cap itself is legal
    }
}
