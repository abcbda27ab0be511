//! Preference weighting: how much each rank is worth to the energy.
//!
//! The energy of an allocation is the negated sum of per-pair rank weights,
//! so lower (more negative) is better and first choices pull hardest.

use anyhow::{Result, ensure};

use crate::inputs::MAX_RANK;

/// Per-rank weight table with `w₁ > w₂ > w₃ > w₄ > 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weights {
    by_rank: [f64; MAX_RANK as usize],
}

impl Weights {
    /// Construct from explicit per-rank weights, best rank first.
    /// Weights must be positive and strictly decreasing.
    pub fn new(by_rank: [f64; MAX_RANK as usize]) -> Result<Self> {
        ensure!(
            by_rank.iter().all(|&w| w > 0.0),
            "[objective] rank weights must be positive, got {:?}",
            by_rank,
        );
        ensure!(
            by_rank.windows(2).all(|pair| pair[0] > pair[1]),
            "[objective] rank weights must strictly decrease, got {:?}",
            by_rank,
        );
        Ok(Self { by_rank })
    }

    /// The standard schedule: a first choice is worth `100/N` and the rest
    /// follow the 4.7 / 4.15 / 3 / 2.35 grading scale.
    pub fn standard(num_pairs: usize) -> Self {
        assert!(num_pairs > 0, "need at least one pair");
        let base = 100.0 / num_pairs as f64;
        Self {
            by_rank: [
                base,
                base * (4.15 / 4.7),
                base * (3.0 / 4.7),
                base * (2.35 / 4.7),
            ],
        }
    }

    /// Weight of a rank; ranks outside 1..=4 (unassigned pairs) weigh 0.
    #[inline]
    pub fn for_rank(&self, rank: u8) -> f64 {
        match rank {
            1..=MAX_RANK => self.by_rank[rank as usize - 1],
            _ => 0.0,
        }
    }
}
