//! User perturbations.
//!
//! Every handler changes the vessel by a fixed stoichiometric rule and then
//! runs the refresh chain. Conversions that run out of source particles stop
//! early; partial application is the normal outcome, not an error.
//!
//! | Handler | Rule |
//! |---------|------|
//! | `add_species` / `remove_species` | one particle in or out |
//! | `set_temperature` | `floor(\|T − 50\| / 10)` conversions, hot shifts left |
//! | `set_pressure` | `floor(\|P − 1\| × 5)` conversions, high pressure shifts right |
//! | `add_inert_gas` | inert batch, Q and K untouched |
//! | `toggle_catalyst` | velocities ×2 or ×½, composition untouched |

use crate::equilibrium::{EquilibriumState, NEUTRAL_TEMPERATURE};
use crate::error::SimulationError;
use crate::mode::{Mode, Scheme};
use crate::particle::ParticleId;
use crate::reaction::Direction;
use crate::simulation::{Simulation, NEUTRAL_SLIDER};
use crate::spawn::{SpawnContext, Vessel};
use crate::species::Species;
use crate::store::ParticleStore;

/// Temperature change (slider units) per converted particle group.
const TEMPERATURE_STEP: f64 = 10.0;

/// Converted particle groups per atm away from 1.0.
const GROUPS_PER_ATM: i64 = 5;

/// Slider units per atm.
const PRESSURE_SLIDER_SCALE: f64 = 50.0;

/// Velocity multiplier applied when a catalyst is added.
const CATALYST_SPEEDUP: f64 = 2.0;

/// Pressure in tenths of an atm for a slider position, rounded to one decimal.
pub fn pressure_tenths(slider: f64) -> i64 {
    (slider * 10.0 / PRESSURE_SLIDER_SCALE).round() as i64
}

/// Number of groups a temperature setting converts.
pub fn temperature_conversions(temperature: f64) -> usize {
    ((temperature - NEUTRAL_TEMPERATURE).abs() / TEMPERATURE_STEP).floor() as usize
}

/// Number of groups a pressure (in tenths of an atm) converts.
///
/// Works on integer tenths so that e.g. 1.2 atm converts exactly one group.
/// Float arithmetic would give `floor(0.19999999999999996 * 5) = 0` there, so
/// 1.2 and 1.4 atm deliberately convert one group more than a float version.
pub fn pressure_conversions(tenths: i64) -> usize {
    ((tenths - 10).abs() * GROUPS_PER_ATM / 10) as usize
}

/// Convert up to `groups` sets of `consume` into `produce`.
///
/// Each group resolves its particles against the current collection before
/// anything is removed, then removes them by identity in one pass. Products
/// land at random spots in the vessel. Returns the number of groups converted.
pub fn convert_groups(
    store: &mut ParticleStore,
    ctx: &mut SpawnContext,
    vessel: Vessel,
    consume: &[Species],
    produce: &[Species],
    groups: usize,
) -> usize {
    for done in 0..groups {
        let Some(ids) = select_group(store, consume) else {
            return done;
        };
        store.remove_all(&ids);
        for &species in produce {
            store.create(species, vessel, ctx);
        }
    }
    groups
}

/// First particles (insertion order) covering `species`, with multiplicity.
fn select_group(store: &ParticleStore, species: &[Species]) -> Option<Vec<ParticleId>> {
    let mut picked: Vec<ParticleId> = Vec::with_capacity(species.len());
    for &wanted in species {
        let next = store
            .of_species(wanted)
            .find(|p| !picked.contains(&p.id))?;
        picked.push(next.id);
    }
    Some(picked)
}

impl Simulation {
    fn check_individual(&self, species: Species, action: &'static str) -> Result<(), SimulationError> {
        if species.is_reactive() && self.mode.scheme().involves(species) {
            Ok(())
        } else {
            Err(SimulationError::UnsupportedSpecies { species, action })
        }
    }

    /// Convert whole reaction groups in one direction of the current scheme.
    fn shift(&mut self, direction: Direction, groups: usize) -> usize {
        let scheme = self.mode.scheme();
        let (consume, produce) = match direction {
            Direction::Forward => (scheme.reactants(), scheme.products()),
            Direction::Reverse => (scheme.products(), scheme.reactants()),
        };
        let converted = convert_groups(
            &mut self.store,
            &mut self.spawn,
            self.vessel,
            consume,
            produce,
            groups,
        );
        if converted < groups {
            log::debug!(
                "{:?} shift of {} stopped after {} groups",
                direction,
                scheme.equation(),
                converted
            );
        }
        converted
    }

    /// Add one particle of a species taking part in the current reaction.
    pub fn add_species(&mut self, species: Species) -> Result<ParticleId, SimulationError> {
        self.check_individual(species, "added")?;
        let id = self.store.create(species, self.vessel, &mut self.spawn);
        log::debug!("added {}", species);
        self.refresh();
        Ok(id)
    }

    /// Remove one particle of a species taking part in the current reaction.
    ///
    /// Returns `Ok(false)` without refreshing when none is left.
    pub fn remove_species(&mut self, species: Species) -> Result<bool, SimulationError> {
        self.check_individual(species, "removed")?;
        if !self.store.remove_one(|p| p.species == species) {
            return Ok(false);
        }
        log::debug!("removed {}", species);
        self.refresh();
        Ok(true)
    }

    /// Set the temperature (slider units, neutral at 50) and shift accordingly.
    ///
    /// Returns the number of groups converted.
    pub fn set_temperature(&mut self, value: f64) -> usize {
        self.state.temperature = value;
        self.controls.temperature_slider = value;

        let groups = temperature_conversions(value);
        let converted = if groups == 0 || self.mode.scheme() != Scheme::Combination {
            0
        } else if value > NEUTRAL_TEMPERATURE {
            // Exothermic: heat is absorbed by running in reverse.
            self.shift(Direction::Reverse, groups)
        } else {
            self.shift(Direction::Forward, groups)
        };

        log::debug!("temperature {} converted {}/{} groups", value, converted, groups);
        self.refresh();
        converted
    }

    /// Set the pressure from a slider position (pressure = slider / 50, one decimal).
    ///
    /// Only the gas-phase reaction responds; returns the number of groups converted.
    pub fn set_pressure(&mut self, slider: f64) -> usize {
        let tenths = pressure_tenths(slider);
        self.state.pressure = tenths as f64 / 10.0;
        self.controls.pressure_slider = slider;

        let groups = pressure_conversions(tenths);
        let converted = if groups == 0 || self.mode.scheme() != Scheme::GasPhase {
            0
        } else if tenths > 10 {
            // Fewer gas moles on the product side.
            self.shift(Direction::Forward, groups)
        } else {
            self.shift(Direction::Reverse, groups)
        };

        log::debug!(
            "pressure {:.1} atm converted {}/{} groups",
            self.state.pressure,
            converted,
            groups
        );
        self.refresh();
        converted
    }

    /// Add a batch of inert gas at constant volume.
    ///
    /// Counts and concentrations are updated; Q, K and the shift verdict are not.
    pub fn add_inert_gas(&mut self) -> usize {
        let batch = self.config.inert_batch;
        for _ in 0..batch {
            self.store.create(Species::Inert, self.vessel, &mut self.spawn);
        }
        log::debug!("added {} inert particles", batch);
        self.refresh_population();
        batch
    }

    /// Add or remove the catalyst. Returns whether a catalyst is now present.
    ///
    /// Reactive particles speed up or slow down by the same factor, so
    /// toggling twice restores every velocity.
    pub fn toggle_catalyst(&mut self) -> bool {
        let present = !self.state.catalyst_present;
        self.state.catalyst_present = present;

        let factor = if present {
            CATALYST_SPEEDUP
        } else {
            CATALYST_SPEEDUP.recip()
        };
        for particle in self.store.all_mut() {
            if particle.species.is_reactive() {
                particle.velocity *= factor;
            }
        }

        log::debug!("catalyst {}", if present { "added" } else { "removed" });
        self.notify();
        present
    }

    /// Switch experiments. Always performs a full [`reset`](Self::reset).
    pub fn set_mode(&mut self, mode: Mode) {
        log::info!("switching mode {} -> {}", self.mode, mode);
        self.mode = mode;
        self.reset();
    }

    /// Restore defaults and regenerate the population for the current mode.
    ///
    /// The equilibrium state is left at its defaults until the next refresh.
    pub fn reset(&mut self) {
        self.state = EquilibriumState::default();
        self.controls.temperature_slider = NEUTRAL_SLIDER;
        self.controls.pressure_slider = NEUTRAL_SLIDER;
        self.populate();
        log::info!(
            "reset {} ({}) with {} particles",
            self.mode,
            self.mode.scheme().equation(),
            self.store.len()
        );
        self.notify();
    }
}
