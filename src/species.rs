//! Species tags and their display palette.

use crate::ParticleType;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A particle's reactive role.
///
/// `A` and `B` are reactants, `C` and `D` are products. `Inert` particles
/// move with the rest but never react and never enter the reaction quotient.
#[derive(
    ParticleType, Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize,
)]
pub enum Species {
    A,
    B,
    C,
    D,
    Inert,
}

impl Species {
    /// Whether this species takes part in any reaction.
    #[inline]
    pub fn is_reactive(self) -> bool {
        self != Species::Inert
    }

    /// Display color as a hex string.
    pub fn hex_color(self) -> &'static str {
        match self {
            Species::A => "#e74c3c",
            Species::B => "#3498db",
            Species::C => "#2ecc71",
            Species::D => "#f39c12",
            Species::Inert => "#95a5a6",
        }
    }

    /// Display color as linear RGB in `0.0..=1.0`.
    pub fn color(self) -> Vec3 {
        hex_to_rgb(self.hex_color())
    }

    /// Short label drawn on top of the particle.
    pub fn label(self) -> &'static str {
        match self {
            Species::Inert => "inert",
            other => other.name(),
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parse a `#rrggbb` string into RGB components.
fn hex_to_rgb(hex: &str) -> Vec3 {
    let digits = hex.trim_start_matches('#');
    let channel = |i: usize| {
        digits
            .get(i..i + 2)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(0) as f32
            / 255.0
    };
    Vec3::new(channel(0), channel(2), channel(4))
}
