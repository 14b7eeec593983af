//! Particle representation and its render-side vertex form.

use crate::species::Species;
use bytemuck::{Pod, Zeroable};
use glam::DVec2;
use serde::Serialize;

/// Stable identity assigned by the store when a particle is created.
///
/// Ids increase monotonically and are never reused within one store, so
/// removing by id stays correct no matter how the collection shifts.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
pub struct ParticleId(pub u64);

/// A single molecule in the vessel.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Particle {
    pub id: ParticleId,
    pub species: Species,
    /// Position in vessel pixels, origin at the top-left corner.
    pub position: DVec2,
    /// Displacement per tick at speed factor 1.
    pub velocity: DVec2,
    pub radius: f64,
}

impl Particle {
    /// Euclidean distance between the two particle centers.
    #[inline]
    pub fn distance_to(&self, other: &Particle) -> f64 {
        self.position.distance(other.position)
    }

    /// Whether `other` is strictly closer than `range`.
    #[inline]
    pub fn within(&self, other: &Particle, range: f64) -> bool {
        self.distance_to(other) < range
    }

    /// Pack this particle into its render form.
    pub fn to_vertex(&self) -> ParticleVertex {
        ParticleVertex {
            position: self.position.as_vec2().to_array(),
            radius: self.radius as f32,
            species: self.species.into(),
            color: self.species.color().to_array(),
            _pad: 0,
        }
    }
}

/// Tightly packed particle data for a renderer.
///
/// Layout is `#[repr(C)]` and `Pod`, so a slice of vertices can be cast to
/// bytes with [`bytemuck::cast_slice`] and uploaded as-is.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 2],
    pub radius: f32,
    /// Species tag as produced by `u32::from(Species)`.
    pub species: u32,
    pub color: [f32; 3],
    pub _pad: u32,
}

impl ParticleVertex {
    /// Species this vertex was built from.
    pub fn species(&self) -> Species {
        Species::from(self.species)
    }
}
