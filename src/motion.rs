//! Straight-line motion with elastic wall bounces.
//!
//! Motion knows nothing about chemistry: inert and reactive particles move
//! the same way.

use crate::particle::Particle;
use crate::spawn::Vessel;
use crate::store::ParticleStore;

/// Advance every particle by one tick.
pub fn integrate(store: &mut ParticleStore, vessel: Vessel, speed_factor: f64) {
    for particle in store.all_mut() {
        step_particle(particle, vessel, speed_factor);
    }
}

/// Move one particle, bounce it off the walls and clamp it inside.
pub fn step_particle(particle: &mut Particle, vessel: Vessel, speed_factor: f64) {
    let r = particle.radius;
    particle.position += particle.velocity * speed_factor;

    let p = &mut particle.position;
    let v = &mut particle.velocity;

    if p.x - r < 0.0 || p.x + r > vessel.width {
        v.x = -v.x;
    }
    if p.y - r < 0.0 || p.y + r > vessel.height {
        v.y = -v.y;
    }

    // Same tick as the bounce, so nothing ends up past a wall.
    p.x = (vessel.width - r).min(p.x).max(r);
    p.y = (vessel.height - r).min(p.y).max(r);
}
