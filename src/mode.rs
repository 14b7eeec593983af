//! Reaction modes and the stoichiometric scheme each one runs.
//!
//! A mode decides three things at once: which species the vessel starts
//! with, which reaction equation every conversion follows, and which
//! formula the reaction quotient uses. Switching modes therefore always
//! rebuilds the population from scratch.

use crate::species::Species;
use crate::ParticleType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The active experiment.
#[derive(
    ParticleType, Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize,
)]
pub enum Mode {
    /// Add and remove species, `A + B ⇌ C`.
    #[default]
    Concentration,
    /// Heat or cool an exothermic `A + B ⇌ C`.
    Temperature,
    /// Compress or expand the gas-phase `A + 2B ⇌ C + D`.
    Pressure,
    /// Speed up both directions of `A + B ⇌ C`.
    Catalyst,
}

/// Stoichiometric scheme selected by a [`Mode`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Scheme {
    /// `A + B ⇌ C`
    Combination,
    /// `A + 2B ⇌ C + D`
    GasPhase,
}

impl Scheme {
    /// Reaction equation as displayed to the user.
    pub fn equation(self) -> &'static str {
        match self {
            Scheme::Combination => "A + B ⇌ C",
            Scheme::GasPhase => "A + 2B ⇌ C + D",
        }
    }

    /// Species created per round of the initial population, in creation order.
    pub fn initial_round(self) -> &'static [Species] {
        match self {
            Scheme::Combination => &[Species::A, Species::B, Species::C],
            Scheme::GasPhase => &[Species::A, Species::B, Species::B, Species::C, Species::D],
        }
    }

    /// Left-hand side of the equation, with multiplicity.
    pub fn reactants(self) -> &'static [Species] {
        match self {
            Scheme::Combination => &[Species::A, Species::B],
            Scheme::GasPhase => &[Species::A, Species::B, Species::B],
        }
    }

    /// Right-hand side of the equation, with multiplicity.
    pub fn products(self) -> &'static [Species] {
        match self {
            Scheme::Combination => &[Species::C],
            Scheme::GasPhase => &[Species::C, Species::D],
        }
    }

    /// Whether `species` appears in this scheme's equation.
    pub fn involves(self, species: Species) -> bool {
        self.initial_round().contains(&species)
    }
}

impl Mode {
    /// The reaction scheme this mode runs.
    pub fn scheme(self) -> Scheme {
        match self {
            Mode::Pressure => Scheme::GasPhase,
            Mode::Concentration | Mode::Temperature | Mode::Catalyst => Scheme::Combination,
        }
    }

    /// Whether equilibrium constant K depends on temperature in this mode.
    #[inline]
    pub fn is_temperature_dependent(self) -> bool {
        self == Mode::Temperature
    }

    /// Educational text shown beside the vessel.
    pub fn explanation(self) -> &'static [&'static str] {
        match self {
            Mode::Concentration => &[
                "Le Chatelier's principle states that when a system at equilibrium is subjected to a change in concentration, the equilibrium will shift to counteract that change.",
                "Adding reactants (A or B): Shifts equilibrium to the right, producing more C.",
                "Removing reactants (A or B): Shifts equilibrium to the left, consuming less C.",
                "Adding products (C): Shifts equilibrium to the left, producing more A and B.",
                "Removing products (C): Shifts equilibrium to the right, consuming more A and B.",
            ],
            Mode::Temperature => &[
                "For this exothermic reaction (one that releases heat), temperature changes affect the equilibrium position:",
                "Increasing temperature: Shifts equilibrium to the left (toward reactants), as the system tries to absorb the added heat.",
                "Decreasing temperature: Shifts equilibrium to the right (toward products), as the system tries to generate more heat.",
                "For endothermic reactions (those that absorb heat), the effects would be reversed.",
            ],
            Mode::Pressure => &[
                "For gaseous reactions, pressure changes affect the equilibrium position based on the number of gas molecules on each side:",
                "Increasing pressure: Shifts equilibrium toward the side with fewer gas molecules.",
                "Decreasing pressure: Shifts equilibrium toward the side with more gas molecules.",
                "Adding inert gas at constant volume: No effect on equilibrium position.",
            ],
            Mode::Catalyst => &[
                "A catalyst affects the rate of a reaction but does not change the position of equilibrium:",
                "With catalyst: Both forward and reverse reactions are sped up equally.",
                "Effect on equilibrium: Equilibrium is reached faster, but the final concentrations remain the same.",
                "Catalysts lower the activation energy for both the forward and reverse reactions.",
            ],
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
