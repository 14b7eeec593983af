//! Display strings for the data panel.
//!
//! Numbers are formatted the way the panel shows them: concentrations and
//! quotients to two decimals, pressure to one. Infinite Q prints as `inf`.

use crate::equilibrium::EquilibriumState;
use crate::simulation::Simulation;
use crate::species::Species;
use serde::Serialize;

/// One concentration bar: share of the vessel and its color.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bar {
    pub species: Species,
    /// Fraction of all particles, `0.0..=1.0`.
    pub fraction: f64,
    pub color: &'static str,
}

/// Everything the data panel shows, pre-formatted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Readout {
    pub equation: &'static str,
    pub concentration_a: String,
    pub concentration_b: String,
    pub concentration_c: String,
    pub k_value: String,
    pub q_value: String,
    pub shift_direction: &'static str,
    pub temperature: String,
    pub pressure: String,
    /// Canvas scale factor; the vessel shrinks as pressure rises.
    pub vessel_scale: f64,
    pub catalyst_button: &'static str,
    pub bars: Vec<Bar>,
}

/// Displayed °C below the temperature slider value (slider 50 reads 25°C).
pub const DISPLAY_TEMPERATURE_OFFSET: f64 = 25.0;

/// Temperature label for a slider position.
pub fn temperature_label(slider: f64) -> String {
    format!("{:.0}°C", slider - DISPLAY_TEMPERATURE_OFFSET)
}

/// Smallest pressure used when scaling the vessel.
const MIN_SCALE_PRESSURE: f64 = 0.1;

/// Scale factor `1 / pressure`, with pressure floored at 0.1 atm.
pub fn vessel_scale(pressure: f64) -> f64 {
    pressure.max(MIN_SCALE_PRESSURE).recip()
}

/// Label for the catalyst toggle, naming the action it performs next.
pub fn catalyst_button_label(catalyst_present: bool) -> &'static str {
    if catalyst_present {
        "Remove Catalyst"
    } else {
        "Add Catalyst"
    }
}

impl Readout {
    /// Format a state snapshot. Bars are left empty.
    ///
    /// The temperature label comes from the slider position, not from
    /// `state.temperature`, which sits at 25 after a reset.
    pub fn from_state(state: &EquilibriumState, temperature_slider: f64, equation: &'static str) -> Self {
        Self {
            equation,
            concentration_a: format!("{:.2}", state.concentration_a),
            concentration_b: format!("{:.2}", state.concentration_b),
            concentration_c: format!("{:.2}", state.concentration_c),
            k_value: format!("{:.2}", state.k_value),
            q_value: format!("{:.2}", state.q_value),
            shift_direction: state.shift_direction.description(),
            temperature: temperature_label(temperature_slider),
            pressure: format!("{:.1} atm", state.pressure),
            vessel_scale: vessel_scale(state.pressure),
            catalyst_button: catalyst_button_label(state.catalyst_present),
            bars: Vec::new(),
        }
    }
}

impl Simulation {
    /// Build the data panel for the current state.
    pub fn readout(&self) -> Readout {
        let scheme = self.mode.scheme();
        let mut readout =
            Readout::from_state(&self.state, self.controls.temperature_slider, scheme.equation());
        // One bar per distinct species of the scheme, in equation order.
        for &species in scheme.reactants().iter().chain(scheme.products()) {
            if readout.bars.iter().any(|bar| bar.species == species) {
                continue;
            }
            readout.bars.push(Bar {
                species,
                fraction: self.counts.fraction(species),
                color: species.hex_color(),
            });
        }
        readout
    }
}
