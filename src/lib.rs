//! # Le Chatelier - particle-population reaction engine
//!
//! Simulates a closed reaction vessel in which every molecule is a particle.
//! The reaction quotient Q is derived from live particle counts, compared
//! against the equilibrium constant K, and the vessel responds to
//! perturbations the way Le Chatelier's principle predicts.
//!
//! ## Quick Start
//!
//! ```
//! use lechatelier::prelude::*;
//!
//! let mut sim = Simulation::new().with_seed(42).with_mode(Mode::Temperature);
//!
//! // Heat the exothermic A + B ⇌ C: three C break back into A and B.
//! assert_eq!(sim.set_temperature(80.0), 3);
//!
//! for _ in 0..100 {
//!     sim.tick(600.0, 400.0, 3.0);
//! }
//!
//! let state = sim.equilibrium_state();
//! println!("Q = {:.2}, K = {:.2}, shift: {}", state.q_value, state.k_value, state.shift_direction);
//! ```
//!
//! ## Core Concepts
//!
//! ### Modes and schemes
//!
//! A [`Mode`] selects the experiment. Concentration, temperature and catalyst
//! modes run `A + B ⇌ C`; pressure mode runs the gas-phase `A + 2B ⇌ C + D`.
//! Switching modes resets the vessel.
//!
//! ### Ticks
//!
//! [`Simulation::tick`] moves every particle, tries one forward and one
//! reverse conversion between nearby particles, and refreshes the
//! [`EquilibriumState`]. The [`TickLoop`] runs ticks at a fixed interval.
//!
//! ### Perturbations
//!
//! Adding or removing species, changing temperature or pressure, adding an
//! inert gas and toggling a catalyst all apply immediate stoichiometric
//! conversions and refresh the state.
//!
//! ### Rendering
//!
//! The engine draws nothing. [`Simulation::vertices`] returns
//! [`ParticleVertex`] data that can be uploaded as-is with `bytemuck`, and
//! [`Simulation::readout`] formats the data panel.

pub mod accounting;
pub mod challenge;
pub mod config;
pub mod equilibrium;
pub mod error;
pub mod mode;
pub mod motion;
pub mod particle;
mod perturb;
pub mod reaction;
pub mod readout;
mod simulation;
pub mod spawn;
pub mod species;
pub mod store;
pub mod time;

pub use bytemuck;
pub use glam::{DVec2, Vec3};
pub use lechatelier_derive::ParticleType;

pub use accounting::PopulationCounts;
pub use challenge::{Challenge, Verdict};
pub use config::SimConfig;
pub use equilibrium::{EquilibriumState, ShiftDirection};
pub use error::{ConfigError, SimulationError};
pub use mode::{Mode, Scheme};
pub use particle::{Particle, ParticleId, ParticleVertex};
pub use perturb::{pressure_conversions, pressure_tenths, temperature_conversions};
pub use readout::Readout;
pub use simulation::{Controls, RefreshObserver, SimStats, Simulation, NEUTRAL_SLIDER};
pub use species::Species;
pub use time::TickLoop;

/// Convenient re-exports for common usage.
///
/// ```
/// use lechatelier::prelude::*;
/// ```
pub mod prelude {
    pub use crate::challenge::{Challenge, Verdict};
    pub use crate::config::SimConfig;
    pub use crate::equilibrium::{EquilibriumState, ShiftDirection};
    pub use crate::error::{ConfigError, SimulationError};
    pub use crate::mode::{Mode, Scheme};
    pub use crate::particle::{Particle, ParticleId, ParticleVertex};
    pub use crate::readout::Readout;
    pub use crate::simulation::{Controls, SimStats, Simulation};
    pub use crate::species::Species;
    pub use crate::time::TickLoop;
    pub use crate::ParticleType;
    pub use glam::DVec2;
}
