//! Population accounting: counts, concentrations and the reaction quotient.
//!
//! Everything here is derived from the particle collection on demand. There
//! is no running total to drift out of sync.

use crate::mode::{Mode, Scheme};
use crate::species::Species;
use crate::store::ParticleStore;
use serde::Serialize;

/// Per-species population that corresponds to a concentration of 1.0.
///
/// This is the size of each species at reset, not a live total.
pub const INITIAL_POPULATION: usize = 10;

/// Particle count for every species.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PopulationCounts {
    counts: [usize; Species::count() as usize],
}

impl PopulationCounts {
    /// Tally a store in one pass.
    pub fn tally(store: &ParticleStore) -> Self {
        let mut counts = [0usize; Species::count() as usize];
        for particle in store.all() {
            counts[u32::from(particle.species) as usize] += 1;
        }
        Self { counts }
    }

    #[inline]
    pub fn get(&self, species: Species) -> usize {
        self.counts[u32::from(species) as usize]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Normalized concentration: `count / INITIAL_POPULATION`.
    pub fn concentration(&self, species: Species) -> f64 {
        self.get(species) as f64 / INITIAL_POPULATION as f64
    }

    /// Share of the whole vessel taken by `species`, `0.0` when empty.
    pub fn fraction(&self, species: Species) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.get(species) as f64 / total as f64,
        }
    }

    /// Reaction quotient for the given scheme.
    ///
    /// A zero denominator gives `+∞`, read downstream as "shift left".
    pub fn quotient(&self, scheme: Scheme) -> f64 {
        let a = self.get(Species::A) as f64;
        let b = self.get(Species::B) as f64;
        let c = self.get(Species::C) as f64;
        let d = self.get(Species::D) as f64;

        let (numerator, denominator) = match scheme {
            Scheme::Combination => (c, a * b),
            Scheme::GasPhase => (c * d, a * b * b),
        };

        if denominator == 0.0 {
            f64::INFINITY
        } else {
            numerator / denominator
        }
    }
}

/// Concentrations of the species shown in the readout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Concentrations {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// Result of one accounting pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Accounting {
    pub counts: PopulationCounts,
    pub concentrations: Concentrations,
    pub q_value: f64,
}

/// Recount the store and derive concentrations and Q for `mode`.
pub fn recompute(mode: Mode, store: &ParticleStore) -> Accounting {
    let counts = PopulationCounts::tally(store);
    Accounting {
        counts,
        concentrations: Concentrations {
            a: counts.concentration(Species::A),
            b: counts.concentration(Species::B),
            c: counts.concentration(Species::C),
        },
        q_value: counts.quotient(mode.scheme()),
    }
}
