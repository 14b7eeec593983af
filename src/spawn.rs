//! Random placement for newly created particles.
//!
//! All randomness in the engine flows through one [`SpawnContext`], so a
//! seeded simulation is reproducible tick for tick.

use glam::DVec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Rectangular vessel the particles live in, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vessel {
    pub width: f64,
    pub height: f64,
}

impl Vessel {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Center point of the vessel.
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// RNG plus helpers for the spawn patterns the engine needs.
#[derive(Debug)]
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Deterministic context for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Context seeded from OS entropy, different on every run.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    // ========== Random primitives ==========

    /// Random f64 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Bernoulli trial: `true` with the given probability.
    ///
    /// Probabilities above 1 always succeed, at or below 0 never do.
    #[inline]
    pub fn chance(&mut self, probability: f64) -> bool {
        self.random() < probability
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    // ========== Position helpers ==========

    /// Random point keeping a particle of `radius` fully inside the vessel.
    ///
    /// An axis narrower than the particle collapses to its midpoint.
    pub fn random_in_vessel(&mut self, vessel: Vessel, radius: f64) -> DVec2 {
        DVec2::new(
            self.span(radius, vessel.width - radius),
            self.span(radius, vessel.height - radius),
        )
    }

    fn span(&mut self, lo: f64, hi: f64) -> f64 {
        if hi > lo {
            self.rng.gen_range(lo..hi)
        } else {
            (lo + hi) * 0.5
        }
    }

    // ========== Velocity helpers ==========

    /// Random drift velocity, each axis uniform in `(-1, 1)`.
    pub fn random_velocity(&mut self) -> DVec2 {
        DVec2::new(
            (self.random() - 0.5) * 2.0,
            (self.random() - 0.5) * 2.0,
        )
    }
}

/// Average of a set of positions. Empty input yields the origin.
pub fn centroid(points: &[DVec2]) -> DVec2 {
    if points.is_empty() {
        return DVec2::ZERO;
    }
    points.iter().copied().sum::<DVec2>() / points.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_in_vessel_bounds() {
        let mut ctx = SpawnContext::seeded(7);
        let vessel = Vessel::new(200.0, 100.0);
        for _ in 0..500 {
            let p = ctx.random_in_vessel(vessel, 8.0);
            assert!(p.x >= 8.0 && p.x <= 192.0);
            assert!(p.y >= 8.0 && p.y <= 92.0);
        }
    }

    #[test]
    fn test_tiny_vessel_collapses_to_center() {
        let mut ctx = SpawnContext::seeded(1);
        let vessel = Vessel::new(10.0, 10.0);
        let p = ctx.random_in_vessel(vessel, 8.0);
        assert_eq!(p, vessel.center());
        assert_eq!(p, DVec2::new(5.0, 5.0));
    }

    #[test]
    fn test_random_velocity_range() {
        let mut ctx = SpawnContext::seeded(3);
        for _ in 0..500 {
            let v = ctx.random_velocity();
            assert!(v.x > -1.0 && v.x < 1.0);
            assert!(v.y > -1.0 && v.y < 1.0);
        }
    }

    #[test]
    fn test_seeded_contexts_agree() {
        let mut a = SpawnContext::seeded(42);
        let mut b = SpawnContext::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.random(), b.random());
        }
    }

    #[test]
    fn test_centroid() {
        let c = centroid(&[DVec2::new(0.0, 0.0), DVec2::new(3.0, 0.0), DVec2::new(0.0, 3.0)]);
        assert!((c - DVec2::new(1.0, 1.0)).length() < 1e-12);
        assert_eq!(centroid(&[]), DVec2::ZERO);
    }
}
