//! Deterministic random number generation.
//!
//! RULE: Nothing in the generator may call any platform RNG.
//! All randomness flows through one CampaignRng built from the
//! run seed and passed by `&mut` to every step that draws.
//!
//! The order of draws is part of the reproducibility contract:
//! same seed + same draw sequence = identical dataset. Never
//! reorder calls in generator.rs or metrics.rs.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// The single seeded generator for a run.
pub struct CampaignRng {
    inner: Pcg64Mcg,
}

impl CampaignRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Roll a float in [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Roll an integer in [lo, hi], both ends inclusive.
    pub fn int_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        assert!(hi >= lo, "empty range {lo}..={hi}");
        match hi.abs_diff(lo).checked_add(1) {
            Some(width) => lo.wrapping_add_unsigned(self.next_u64_below(width)),
            // Full i64 span: every u64 maps to exactly one value.
            None => lo.wrapping_add_unsigned(self.inner.next_u64()),
        }
    }

    /// Pick one element uniformly. Panics on an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let index = self.next_u64_below(items.len() as u64) as usize;
        &items[index]
    }
}
