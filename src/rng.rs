//! Combined shift-register pseudorandom generator.
//!
//! Two independent R-sequences with lag/tap pairs (250,103) and (521,168)
//! over 31-bit integers are XORed together and scaled to a double in [0,1).
//! All arithmetic is fixed to 31-bit integer semantics, so identically
//! seeded generators replay the same stream on any platform.

use anyhow::{Result, ensure};

const LAG1: usize = 250;
const TAP1: usize = 103;
const LAG2: usize = 521;
const TAP2: usize = 168;

/// Largest 31-bit integer, the congruential modulus.
const MODULUS: i32 = 2_147_483_647;
const MODULUS_F: f64 = 2_147_483_647.0;
/// Scale from a 31-bit integer to a double in [0,1).
const SCALE: f64 = 4.656_612_875_245_796_9e-10;
const MULTIPLIER: f64 = 16807.0;

/// Empty runs of the congruential generator before it seeds the registers.
const CONGRUENTIAL_WARM_STEPS: usize = 10_000;
/// Steps each shift register advances before the first draw is handed out.
const REGISTER_WARM_STEPS: usize = 100_000;

/// Seedable generator of reproducible uniform doubles in [0,1).
#[derive(Clone, Debug)]
pub struct ShiftRegisterRng {
    state1: [i32; LAG1],
    state2: [i32; LAG2],
    cursor1: usize,
    cursor2: usize,
}

/// Captured generator state; restoring it replays the stream from the
/// point of capture.
#[derive(Clone, Debug)]
pub struct RngSnapshot {
    state1: [i32; LAG1],
    state2: [i32; LAG2],
    cursor1: usize,
    cursor2: usize,
}

impl ShiftRegisterRng {
    /// Build a generator from a positive seed in (0, 2³¹-1).
    ///
    /// A congruential generator is warmed up and fills both register
    /// buffers, bit columns are forced linearly independent, and each
    /// register is advanced past its warm-up window before use.
    pub fn new(seed: i32) -> Result<Self> {
        ensure!(
            seed > 0 && seed < MODULUS,
            "[rng] seed must lie in (0, {}), got {}",
            MODULUS,
            seed,
        );

        let mut rmod = seed as f64;
        for _ in 0..CONGRUENTIAL_WARM_STEPS {
            congruential_step(&mut rmod);
        }

        let mut state1 = [0i32; LAG1];
        let mut state2 = [0i32; LAG2];
        for slot in state1.iter_mut() {
            *slot = congruential_step(&mut rmod);
        }
        for slot in state2.iter_mut() {
            *slot = congruential_step(&mut rmod);
        }

        // Ones on the main diagonal of the bit-column matrix, zeroes above,
        // so the columns are linearly independent for both registers.
        let mut imask1: i32 = 1;
        let mut imask2: i32 = MODULUS;
        for i in (1..=30).rev() {
            state1[i] = (state1[i] | imask1) & imask2;
            state2[i] = (state2[i] | imask1) & imask2;
            imask2 ^= imask1;
            imask1 *= 2;
        }
        state1[0] = imask1;
        state2[0] = imask1;

        let mut rng = Self { state1, state2, cursor1: 0, cursor2: 0 };
        for _ in 0..REGISTER_WARM_STEPS {
            rng.step1();
            rng.step2();
        }
        Ok(rng)
    }

    /// Next uniform double in [0,1).
    #[inline]
    pub fn next_uniform(&mut self) -> f64 {
        SCALE * ((self.step1() ^ self.step2()) as f64)
    }

    /// Reduce the next uniform draw to an index in `0..bound`.
    ///
    /// The reduction (single-precision scale by 10⁴, truncate, modulo) is
    /// part of the reproducible stream contract; callers that replay index
    /// sequences rely on this exact form. `bound` must lie in 1..=10000.
    #[inline]
    pub fn index_below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0 && bound <= 10_000, "bound {} out of range", bound);
        let scaled = (self.next_uniform() as f32) * 10_000.0;
        (scaled as i32 % bound as i32) as usize
    }

    /// Capture the full generator state.
    pub fn snapshot(&self) -> RngSnapshot {
        RngSnapshot {
            state1: self.state1,
            state2: self.state2,
            cursor1: self.cursor1,
            cursor2: self.cursor2,
        }
    }

    /// Rewind to a previously captured state.
    pub fn restore(&mut self, snapshot: &RngSnapshot) {
        self.state1 = snapshot.state1;
        self.state2 = snapshot.state2;
        self.cursor1 = snapshot.cursor1;
        self.cursor2 = snapshot.cursor2;
    }

    // x[k] = x[k-250] ^ x[k-103]; the buffer holds the last 250 values with
    // the cursor on the oldest.
    #[inline]
    fn step1(&mut self) -> i32 {
        let next = self.state1[self.cursor1] ^ self.state1[(self.cursor1 + LAG1 - TAP1) % LAG1];
        self.state1[self.cursor1] = next;
        self.cursor1 = (self.cursor1 + 1) % LAG1;
        next
    }

    // x[k] = x[k-521] ^ x[k-168].
    #[inline]
    fn step2(&mut self) -> i32 {
        let next = self.state2[self.cursor2] ^ self.state2[(self.cursor2 + LAG2 - TAP2) % LAG2];
        self.state2[self.cursor2] = next;
        self.cursor2 = (self.cursor2 + 1) % LAG2;
        next
    }
}

/// One step of the 31-bit congruential generator `x ← 16807·x mod 2³¹`,
/// computed in doubles with explicit truncation so it stays exact.
#[inline]
fn congruential_step(rmod: &mut f64) -> i32 {
    *rmod *= MULTIPLIER;
    *rmod -= ((*rmod * SCALE) as i32 as f64) * MODULUS_F;
    let value = (*rmod + 0.1) as i32;
    *rmod = value as f64;
    value
}

#[cfg(test)]
mod tests {
    use super::ShiftRegisterRng;

    #[test]
    fn rejects_out_of_range_seeds() {
        assert!(ShiftRegisterRng::new(0).is_err());
        assert!(ShiftRegisterRng::new(-3).is_err());
        assert!(ShiftRegisterRng::new(i32::MAX).is_err());
        assert!(ShiftRegisterRng::new(1).is_ok());
        assert!(ShiftRegisterRng::new(i32::MAX - 1).is_ok());
    }

    #[test]
    fn draws_lie_in_unit_interval() {
        let mut rng = ShiftRegisterRng::new(12345).unwrap();
        for _ in 0..10_000 {
            let u = rng.next_uniform();
            assert!((0.0..1.0).contains(&u), "draw {} outside [0,1)", u);
        }
    }

    #[test]
    fn identical_seeds_replay_identical_streams() {
        let mut a = ShiftRegisterRng::new(12345).unwrap();
        let mut b = ShiftRegisterRng::new(12345).unwrap();
        for _ in 0..1_000 {
            assert_eq!(a.next_uniform().to_bits(), b.next_uniform().to_bits());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = ShiftRegisterRng::new(12345).unwrap();
        let mut b = ShiftRegisterRng::new(54321).unwrap();
        let diverged = (0..100).any(|_| a.next_uniform() != b.next_uniform());
        assert!(diverged);
    }

    #[test]
    fn draws_are_roughly_centered() {
        let mut rng = ShiftRegisterRng::new(777).unwrap();
        let mean = (0..10_000).map(|_| rng.next_uniform()).sum::<f64>() / 10_000.0;
        assert!((0.45..0.55).contains(&mean), "mean {} far from 1/2", mean);
    }

    #[test]
    fn index_below_stays_in_bounds() {
        let mut rng = ShiftRegisterRng::new(99).unwrap();
        for bound in [1usize, 2, 4, 24, 10_000] {
            for _ in 0..500 {
                assert!(rng.index_below(bound) < bound);
            }
        }
    }

    #[test]
    fn snapshot_restore_replays() {
        let mut rng = ShiftRegisterRng::new(4242).unwrap();
        rng.next_uniform();
        let snapshot = rng.snapshot();
        let first = (0..32).map(|_| rng.next_uniform()).collect::<Vec<_>>();
        rng.restore(&snapshot);
        let second = (0..32).map(|_| rng.next_uniform()).collect::<Vec<_>>();
        assert_eq!(first, second);
    }
}
