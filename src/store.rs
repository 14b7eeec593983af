//! The particle collection.
//!
//! Particles are kept in insertion order. Greedy reaction matching scans in
//! that order, so it is part of the observable behavior. Removal always goes
//! through [`ParticleId`]: callers resolve every particle they want gone
//! against one snapshot and hand the ids over in a single call.

use crate::particle::{Particle, ParticleId};
use crate::spawn::{SpawnContext, Vessel};
use crate::species::Species;
use glam::DVec2;

/// Owns every particle in the vessel.
#[derive(Clone, Debug)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    next_id: u64,
    radius: f64,
}

impl ParticleStore {
    /// Empty store whose particles all share `radius`.
    pub fn new(radius: f64) -> Self {
        Self {
            particles: Vec::new(),
            next_id: 0,
            radius,
        }
    }

    /// Radius given to every particle created by this store.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    fn allocate_id(&mut self) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create a particle at a random spot in the vessel with a random drift.
    pub fn create(&mut self, species: Species, vessel: Vessel, ctx: &mut SpawnContext) -> ParticleId {
        let position = ctx.random_in_vessel(vessel, self.radius);
        self.create_at(species, position, ctx)
    }

    /// Create a particle at an exact position with a random drift.
    pub fn create_at(&mut self, species: Species, position: DVec2, ctx: &mut SpawnContext) -> ParticleId {
        let velocity = ctx.random_velocity();
        let id = self.allocate_id();
        self.particles.push(Particle {
            id,
            species,
            position,
            velocity,
            radius: self.radius,
        });
        id
    }

    /// Remove the first particle (in insertion order) matching `predicate`.
    ///
    /// Returns `false` and leaves the store untouched when nothing matches.
    pub fn remove_one<F>(&mut self, predicate: F) -> bool
    where
        F: Fn(&Particle) -> bool,
    {
        match self.particles.iter().position(predicate) {
            Some(index) => {
                self.particles.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove the particle with the given id.
    pub fn remove_specific(&mut self, id: ParticleId) -> bool {
        self.remove_one(|p| p.id == id)
    }

    /// Remove every listed particle in one pass. Returns how many were found.
    ///
    /// Ids that are not present are ignored.
    pub fn remove_all(&mut self, ids: &[ParticleId]) -> usize {
        let before = self.particles.len();
        self.particles.retain(|p| !ids.contains(&p.id));
        before - self.particles.len()
    }

    /// All particles of `species`, in insertion order.
    pub fn of_species(&self, species: Species) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(move |p| p.species == species)
    }

    pub fn count_by(&self, species: Species) -> usize {
        self.of_species(species).count()
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id == id)
    }

    /// Every particle, in insertion order.
    #[inline]
    pub fn all(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn all_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Drop every particle. Ids keep increasing afterwards.
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
