//! Equilibrium constant, shift verdict and the published equilibrium state.

use crate::accounting::Accounting;
use crate::mode::Mode;
use serde::Serialize;
use std::fmt;

/// Temperature (slider units) at which K equals its base value.
pub const NEUTRAL_TEMPERATURE: f64 = 50.0;

/// Equilibrium constant outside of temperature effects.
pub const BASE_K: f64 = 1.0;

/// Temperature span over which K changes by a factor of e.
const K_TEMPERATURE_SCALE: f64 = 25.0;

/// Predicted direction the equilibrium moves in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum ShiftDirection {
    /// Toward reactants (`Q > K`).
    Left,
    /// Toward products (`Q < K`).
    Right,
    /// At equilibrium.
    #[default]
    None,
}

impl ShiftDirection {
    /// Compare the reaction quotient against the equilibrium constant.
    pub fn from_quotients(q: f64, k: f64) -> Self {
        if q > k {
            ShiftDirection::Left
        } else if q < k {
            ShiftDirection::Right
        } else {
            ShiftDirection::None
        }
    }

    /// Long-form label for the readout.
    pub fn description(self) -> &'static str {
        match self {
            ShiftDirection::Left => "Left (toward reactants)",
            ShiftDirection::Right => "Right (toward products)",
            ShiftDirection::None => "None (at equilibrium)",
        }
    }
}

impl fmt::Display for ShiftDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Equilibrium constant for `mode` at `temperature`.
///
/// Only temperature mode models a (exothermic) temperature dependence:
/// `K = 1.0 * exp((50 - T) / 25)`, so K falls as the vessel heats up.
pub fn k_value(mode: Mode, temperature: f64) -> f64 {
    if mode.is_temperature_dependent() {
        BASE_K * ((NEUTRAL_TEMPERATURE - temperature) / K_TEMPERATURE_SCALE).exp()
    } else {
        BASE_K
    }
}

/// Snapshot of everything the readout shows.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EquilibriumState {
    pub concentration_a: f64,
    pub concentration_b: f64,
    pub concentration_c: f64,
    /// Temperature in slider units (neutral at 50).
    pub temperature: f64,
    /// Pressure in atm.
    pub pressure: f64,
    pub catalyst_present: bool,
    pub k_value: f64,
    pub q_value: f64,
    pub shift_direction: ShiftDirection,
}

impl Default for EquilibriumState {
    fn default() -> Self {
        Self {
            concentration_a: 1.0,
            concentration_b: 1.0,
            concentration_c: 1.0,
            temperature: 25.0,
            pressure: 1.0,
            catalyst_present: false,
            k_value: BASE_K,
            q_value: 1.0,
            shift_direction: ShiftDirection::None,
        }
    }
}

impl EquilibriumState {
    /// Copy counts-derived values in without touching Q, K or the verdict.
    pub fn apply_population(&mut self, accounting: &Accounting) {
        self.concentration_a = accounting.concentrations.a;
        self.concentration_b = accounting.concentrations.b;
        self.concentration_c = accounting.concentrations.c;
    }

    /// Full refresh: concentrations, Q, K and the shift verdict.
    pub fn refresh(&mut self, mode: Mode, accounting: &Accounting) {
        self.apply_population(accounting);
        self.q_value = accounting.q_value;
        self.k_value = k_value(mode, self.temperature);
        self.shift_direction = ShiftDirection::from_quotients(self.q_value, self.k_value);
    }
}
