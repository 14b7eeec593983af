//! The simulation context object.
//!
//! [`Simulation`] owns the particle collection, the equilibrium state and
//! the RNG. Every entry point takes `&mut self`, which is what keeps ticks
//! and user perturbations from ever overlapping.

use crate::accounting::{self, PopulationCounts};
use crate::config::SimConfig;
use crate::equilibrium::EquilibriumState;
use crate::error::SimulationError;
use crate::mode::Mode;
use crate::motion;
use crate::particle::{Particle, ParticleVertex};
use crate::reaction::{Direction, ReactionConditions, ReactionStepper};
use crate::spawn::{SpawnContext, Vessel};
use crate::species::Species;
use crate::store::ParticleStore;
use std::fmt;

/// Slider position at which temperature and pressure are neutral.
pub const NEUTRAL_SLIDER: f64 = 50.0;

/// Callback run after every refresh, e.g. to redraw the readout.
pub type RefreshObserver = Box<dyn FnMut(&EquilibriumState)>;

/// Positions of the user-facing controls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Controls {
    pub temperature_slider: f64,
    pub pressure_slider: f64,
    pub speed_level: u32,
}

/// Running totals since the simulation was created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    pub ticks: u64,
    pub forward_reactions: u64,
    pub reverse_reactions: u64,
}

/// A Le Chatelier reaction vessel.
///
/// Use method chaining to configure, then drive it with [`tick`](Self::tick)
/// and the perturbation methods.
///
/// ```
/// use lechatelier::prelude::*;
///
/// let mut sim = Simulation::new().with_seed(1);
/// sim.add_species(Species::A).unwrap();
/// assert_eq!(sim.counts().get(Species::A), 11);
/// sim.tick(600.0, 400.0, 3.0);
/// ```
pub struct Simulation {
    pub(crate) config: SimConfig,
    pub(crate) mode: Mode,
    pub(crate) store: ParticleStore,
    pub(crate) spawn: SpawnContext,
    pub(crate) state: EquilibriumState,
    pub(crate) counts: PopulationCounts,
    pub(crate) controls: Controls,
    pub(crate) vessel: Vessel,
    pub(crate) stepper: ReactionStepper,
    pub(crate) stats: SimStats,
    pub(crate) observers: Vec<RefreshObserver>,
}

impl Simulation {
    /// Create a simulation with the default configuration.
    pub fn new() -> Self {
        Self::build(SimConfig::default())
    }

    /// Create a simulation from a validated configuration.
    pub fn from_config(config: SimConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimConfig) -> Self {
        let spawn = match config.seed {
            Some(seed) => SpawnContext::seeded(seed),
            None => SpawnContext::from_entropy(),
        };
        let mut sim = Self {
            mode: config.mode,
            store: ParticleStore::new(config.particle_radius),
            spawn,
            state: EquilibriumState::default(),
            counts: PopulationCounts::default(),
            controls: Controls {
                temperature_slider: NEUTRAL_SLIDER,
                pressure_slider: NEUTRAL_SLIDER,
                speed_level: config.speed_level,
            },
            vessel: Vessel::new(config.vessel_width, config.vessel_height),
            stepper: ReactionStepper::new(config.base_reaction_rate, config.proximity_factor),
            stats: SimStats::default(),
            observers: Vec::new(),
            config,
        };
        sim.reset();
        sim
    }

    /// Start in `mode` instead of the configured one.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.config.mode = mode;
        self.set_mode(mode);
        self
    }

    /// Reseed the RNG and rebuild the population deterministically.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self.spawn = SpawnContext::seeded(seed);
        self.reset();
        self
    }

    /// Set the vessel size and rebuild the population inside it.
    pub fn with_vessel(mut self, width: f64, height: f64) -> Self {
        self.config.vessel_width = width;
        self.config.vessel_height = height;
        self.vessel = Vessel::new(width, height);
        self.reset();
        self
    }

    /// Register a callback run after every refresh.
    pub fn on_refresh<F>(&mut self, observer: F)
    where
        F: FnMut(&EquilibriumState) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    // ========== Tick ==========

    /// Advance by one tick: motion, then reactions, then a refresh.
    pub fn tick(&mut self, vessel_width: f64, vessel_height: f64, speed_factor: f64) {
        self.vessel = Vessel::new(vessel_width, vessel_height);
        motion::integrate(&mut self.store, self.vessel, speed_factor);

        let conditions = ReactionConditions {
            mode: self.mode,
            speed_factor,
            catalyst_present: self.state.catalyst_present,
            temperature: self.state.temperature,
        };

        let Self {
            mode,
            store,
            spawn,
            state,
            counts,
            stepper,
            observers,
            stats,
            ..
        } = self;

        let outcome = stepper.step(store, spawn, &conditions, |store, conversion| {
            match conversion.direction {
                Direction::Forward => stats.forward_reactions += 1,
                Direction::Reverse => stats.reverse_reactions += 1,
            }
            refresh_chain(*mode, store, state, counts, observers);
        });

        stats.ticks += 1;
        log::trace!(
            "tick {} rate={:.3} conversions={}",
            stats.ticks,
            outcome.rate,
            outcome.conversions()
        );
        self.refresh();
    }

    /// Tick with the current vessel and the speed level as speed factor.
    pub fn step(&mut self) {
        let Vessel { width, height } = self.vessel;
        self.tick(width, height, self.speed_factor());
    }

    // ========== Refresh chain ==========

    /// Recount, recompute Q and K, and notify observers.
    pub(crate) fn refresh(&mut self) {
        refresh_chain(
            self.mode,
            &self.store,
            &mut self.state,
            &mut self.counts,
            &mut self.observers,
        );
    }

    /// Recount and update concentrations only, then notify observers.
    pub(crate) fn refresh_population(&mut self) {
        let accounting = accounting::recompute(self.mode, &self.store);
        self.counts = accounting.counts;
        self.state.apply_population(&accounting);
        self.notify();
    }

    pub(crate) fn notify(&mut self) {
        for observer in self.observers.iter_mut() {
            observer(&self.state);
        }
    }

    /// Regenerate the initial population for the current mode.
    pub(crate) fn populate(&mut self) {
        self.store.clear();
        let round = self.mode.scheme().initial_round();
        for _ in 0..self.config.initial_population {
            for &species in round {
                self.store.create(species, self.vessel, &mut self.spawn);
            }
        }
        self.counts = PopulationCounts::tally(&self.store);
    }

    // ========== Controls ==========

    /// Select a discrete speed level in `1..=max_speed_level`.
    pub fn set_speed_level(&mut self, level: u32) -> Result<(), SimulationError> {
        let max = self.config.max_speed_level;
        if !(1..=max).contains(&level) {
            return Err(SimulationError::SpeedLevel { level, max });
        }
        self.controls.speed_level = level;
        Ok(())
    }

    /// Speed factor applied by [`step`](Self::step).
    pub fn speed_factor(&self) -> f64 {
        self.controls.speed_level as f64
    }

    /// Change the vessel size used for spawning and by [`step`](Self::step).
    pub fn resize(&mut self, width: f64, height: f64) {
        self.vessel = Vessel::new(width, height);
    }

    // ========== Published state ==========

    /// Every particle, for rendering.
    pub fn particles(&self) -> &[Particle] {
        self.store.all()
    }

    /// Render-ready copy of every particle.
    pub fn vertices(&self) -> Vec<ParticleVertex> {
        self.store.all().iter().map(Particle::to_vertex).collect()
    }

    /// Snapshot of the equilibrium readout values.
    pub fn equilibrium_state(&self) -> EquilibriumState {
        self.state
    }

    /// Population as of the last refresh.
    pub fn counts(&self) -> PopulationCounts {
        self.counts
    }

    pub fn count_by(&self, species: Species) -> usize {
        self.store.count_by(species)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn stats(&self) -> SimStats {
        self.stats
    }

    pub fn vessel(&self) -> Vessel {
        self.vessel
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("mode", &self.mode)
            .field("particles", &self.store.len())
            .field("state", &self.state)
            .field("controls", &self.controls)
            .field("stats", &self.stats)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Accounting, then the evaluator, then the observers.
fn refresh_chain(
    mode: Mode,
    store: &ParticleStore,
    state: &mut EquilibriumState,
    counts: &mut PopulationCounts,
    observers: &mut [RefreshObserver],
) {
    let accounting = accounting::recompute(mode, store);
    *counts = accounting.counts;
    state.refresh(mode, &accounting);
    for observer in observers.iter_mut() {
        observer(&*state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_initial_population_per_mode() {
        let sim = Simulation::new().with_seed(1);
        assert_eq!(sim.particles().len(), 30);
        for species in [Species::A, Species::B, Species::C] {
            assert_eq!(sim.count_by(species), 10);
        }

        let sim = Simulation::new().with_seed(1).with_mode(Mode::Pressure);
        assert_eq!(sim.count_by(Species::A), 10);
        assert_eq!(sim.count_by(Species::B), 20);
        assert_eq!(sim.count_by(Species::C), 10);
        assert_eq!(sim.count_by(Species::D), 10);
    }

    #[test]
    fn test_particles_spawn_inside_vessel() {
        let sim = Simulation::new().with_seed(2).with_vessel(200.0, 120.0);
        for p in sim.particles() {
            assert!(p.position.x >= p.radius && p.position.x <= 200.0 - p.radius);
            assert!(p.position.y >= p.radius && p.position.y <= 120.0 - p.radius);
        }
    }

    #[test]
    fn test_tick_notifies_and_counts() {
        let mut sim = Simulation::new().with_seed(3);
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        sim.on_refresh(move |_| seen.set(seen.get() + 1));

        for _ in 0..50 {
            sim.tick(600.0, 400.0, 3.0);
        }

        let stats = sim.stats();
        assert_eq!(stats.ticks, 50);
        let conversions = stats.forward_reactions + stats.reverse_reactions;
        assert_eq!(calls.get() as u64, 50 + conversions);
    }

    #[test]
    fn test_tick_refresh_matches_population() {
        let mut sim = Simulation::new().with_seed(4);
        for _ in 0..200 {
            sim.tick(600.0, 400.0, 5.0);
        }
        let state = sim.equilibrium_state();
        let a = sim.count_by(Species::A) as f64;
        let b = sim.count_by(Species::B) as f64;
        let c = sim.count_by(Species::C) as f64;
        assert!((state.concentration_a - a / 10.0).abs() < 1e-12);
        if a * b > 0.0 {
            assert!((state.q_value - c / (a * b)).abs() < 1e-12);
        } else {
            assert_eq!(state.q_value, f64::INFINITY);
        }
    }

    #[test]
    fn test_speed_level_bounds() {
        let mut sim = Simulation::new().with_seed(5);
        assert!(sim.set_speed_level(5).is_ok());
        assert_eq!(sim.speed_factor(), 5.0);
        assert!(matches!(
            sim.set_speed_level(0),
            Err(SimulationError::SpeedLevel { level: 0, max: 5 })
        ));
        assert!(sim.set_speed_level(6).is_err());
        assert_eq!(sim.controls().speed_level, 5);
    }

    #[test]
    fn test_from_config_validates() {
        let config = SimConfig {
            vessel_width: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            Simulation::from_config(config),
            Err(SimulationError::Config(_))
        ));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let run = || {
            let mut sim = Simulation::new().with_seed(99);
            for _ in 0..100 {
                sim.step();
            }
            sim.particles().to_vec()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_vertices_mirror_particles() {
        let sim = Simulation::new().with_seed(6);
        let vertices = sim.vertices();
        assert_eq!(vertices.len(), sim.particles().len());
        assert_eq!(vertices[0].species(), sim.particles()[0].species);
    }
}
