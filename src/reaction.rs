//! Per-tick proximity reactions.
//!
//! Each tick the stepper runs two independent Bernoulli trials, one per
//! direction, with the same probability. A successful trial performs at most
//! one conversion. Matching is greedy and follows insertion order: the first
//! reactant that has a partner in range reacts.
//!
//! | Scheme | Forward | Reverse |
//! |--------|---------|---------|
//! | `A + B ⇌ C` | first A with a B in range | uniformly random C |
//! | `A + 2B ⇌ C + D` | first A with two Bs in range | first C with a D in range |

use crate::mode::{Mode, Scheme};
use crate::particle::ParticleId;
use crate::spawn::{centroid, SpawnContext};
use crate::species::Species;
use crate::store::ParticleStore;
use glam::DVec2;

/// Reaction probability per tick at speed factor 1.
pub const BASE_REACTION_RATE: f64 = 0.05;

/// Reaction range as a multiple of the particle radius.
pub const PROXIMITY_FACTOR: f64 = 3.0;

/// Rate multiplier while a catalyst is present.
pub const CATALYST_RATE_MULTIPLIER: f64 = 3.0;

/// Fewer particles than this and the stepper does nothing.
pub const MIN_REACTING_POPULATION: usize = 3;

/// Which way a conversion ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Reactants to products.
    Forward,
    /// Products to reactants.
    Reverse,
}

/// One completed conversion.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversion {
    pub direction: Direction,
    /// Particles removed, as resolved before anything changed.
    pub consumed: Vec<ParticleId>,
    /// Particles created, in creation order.
    pub produced: Vec<ParticleId>,
    /// Where the reaction happened.
    pub site: DVec2,
}

/// Conditions in the vessel that the reaction rate depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReactionConditions {
    pub mode: Mode,
    pub speed_factor: f64,
    pub catalyst_present: bool,
    /// Temperature in slider units.
    pub temperature: f64,
}

/// What a tick of the stepper did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepOutcome {
    pub rate: f64,
    pub forward: Option<Conversion>,
    pub reverse: Option<Conversion>,
}

impl StepOutcome {
    pub fn conversions(&self) -> usize {
        self.forward.is_some() as usize + self.reverse.is_some() as usize
    }
}

/// Runs the probabilistic proximity reactions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReactionStepper {
    pub base_rate: f64,
    pub proximity_factor: f64,
}

impl Default for ReactionStepper {
    fn default() -> Self {
        Self {
            base_rate: BASE_REACTION_RATE,
            proximity_factor: PROXIMITY_FACTOR,
        }
    }
}

impl ReactionStepper {
    pub fn new(base_rate: f64, proximity_factor: f64) -> Self {
        Self {
            base_rate,
            proximity_factor,
        }
    }

    /// Per-direction probability of attempting a conversion this tick.
    pub fn rate(&self, conditions: &ReactionConditions) -> f64 {
        let mut rate = self.base_rate * conditions.speed_factor;
        if conditions.catalyst_present {
            rate *= CATALYST_RATE_MULTIPLIER;
        }
        if conditions.mode.is_temperature_dependent() {
            rate *= 1.0 + (conditions.temperature - 25.0) / 50.0;
        }
        rate
    }

    /// Distance below which two particles in `store` may react.
    pub fn proximity(&self, store: &ParticleStore) -> f64 {
        self.proximity_factor * store.radius()
    }

    /// Run one tick of reactions.
    ///
    /// `on_conversion` is called right after each successful conversion,
    /// before the next trial, so observers always see the current population.
    pub fn step<F>(
        &self,
        store: &mut ParticleStore,
        ctx: &mut SpawnContext,
        conditions: &ReactionConditions,
        mut on_conversion: F,
    ) -> StepOutcome
    where
        F: FnMut(&ParticleStore, &Conversion),
    {
        if store.len() < MIN_REACTING_POPULATION {
            return StepOutcome::default();
        }

        let rate = self.rate(conditions);
        let scheme = conditions.mode.scheme();
        let mut outcome = StepOutcome {
            rate,
            ..Default::default()
        };

        if ctx.chance(rate) {
            outcome.forward = self.forward(scheme, store, ctx);
            if let Some(conversion) = &outcome.forward {
                log::debug!("forward {} at {:?}", scheme.equation(), conversion.site);
                on_conversion(store, conversion);
            }
        }

        if ctx.chance(rate) {
            outcome.reverse = self.reverse(scheme, store, ctx);
            if let Some(conversion) = &outcome.reverse {
                log::debug!("reverse {} at {:?}", scheme.equation(), conversion.site);
                on_conversion(store, conversion);
            }
        }

        outcome
    }

    /// Attempt one reactants-to-products conversion.
    pub fn forward(&self, scheme: Scheme, store: &mut ParticleStore, ctx: &mut SpawnContext) -> Option<Conversion> {
        match scheme {
            Scheme::Combination => self.combine(store, ctx),
            Scheme::GasPhase => self.combine_gas(store, ctx),
        }
    }

    /// Attempt one products-to-reactants conversion.
    pub fn reverse(&self, scheme: Scheme, store: &mut ParticleStore, ctx: &mut SpawnContext) -> Option<Conversion> {
        match scheme {
            Scheme::Combination => self.dissociate(store, ctx),
            Scheme::GasPhase => self.dissociate_gas(store, ctx),
        }
    }

    /// `A + B → C`, C at the midpoint.
    fn combine(&self, store: &mut ParticleStore, ctx: &mut SpawnContext) -> Option<Conversion> {
        let range = self.proximity(store);
        let (consumed, site) = store.of_species(Species::A).find_map(|a| {
            store
                .of_species(Species::B)
                .find(|b| a.within(b, range))
                .map(|b| (vec![a.id, b.id], (a.position + b.position) * 0.5))
        })?;

        store.remove_all(&consumed);
        let c = store.create_at(Species::C, site, ctx);
        Some(Conversion {
            direction: Direction::Forward,
            consumed,
            produced: vec![c],
            site,
        })
    }

    /// `A + 2B → C + D`, products around the centroid of the three reactants.
    fn combine_gas(&self, store: &mut ParticleStore, ctx: &mut SpawnContext) -> Option<Conversion> {
        let range = self.proximity(store);
        let r = store.radius();
        let (consumed, site) = store.of_species(Species::A).find_map(|a| {
            let nearby: Vec<_> = store
                .of_species(Species::B)
                .filter(|b| a.within(b, range))
                .take(2)
                .collect();
            if nearby.len() < 2 {
                return None;
            }
            let site = centroid(&[a.position, nearby[0].position, nearby[1].position]);
            Some((vec![a.id, nearby[0].id, nearby[1].id], site))
        })?;

        store.remove_all(&consumed);
        let c = store.create_at(Species::C, site, ctx);
        let d = store.create_at(Species::D, site + DVec2::splat(r), ctx);
        Some(Conversion {
            direction: Direction::Forward,
            consumed,
            produced: vec![c, d],
            site,
        })
    }

    /// `C → A + B`, from a uniformly chosen C.
    fn dissociate(&self, store: &mut ParticleStore, ctx: &mut SpawnContext) -> Option<Conversion> {
        let r = store.radius();
        let candidates: Vec<_> = store.of_species(Species::C).map(|c| (c.id, c.position)).collect();
        if candidates.is_empty() {
            return None;
        }
        let (id, site) = candidates[ctx.index(candidates.len())];

        store.remove_specific(id);
        let a = store.create_at(Species::A, site - DVec2::new(r, 0.0), ctx);
        let b = store.create_at(Species::B, site + DVec2::new(r, 0.0), ctx);
        Some(Conversion {
            direction: Direction::Reverse,
            consumed: vec![id],
            produced: vec![a, b],
            site,
        })
    }

    /// `C + D → A + 2B`, reactants spread around the midpoint.
    fn dissociate_gas(&self, store: &mut ParticleStore, ctx: &mut SpawnContext) -> Option<Conversion> {
        let range = self.proximity(store);
        let r = store.radius();
        let (consumed, site) = store.of_species(Species::C).find_map(|c| {
            store
                .of_species(Species::D)
                .find(|d| c.within(d, range))
                .map(|d| (vec![c.id, d.id], (c.position + d.position) * 0.5))
        })?;

        store.remove_all(&consumed);
        let offset = DVec2::splat(r);
        let a = store.create_at(Species::A, site, ctx);
        let b1 = store.create_at(Species::B, site + offset, ctx);
        let b2 = store.create_at(Species::B, site - offset, ctx);
        Some(Conversion {
            direction: Direction::Reverse,
            consumed,
            produced: vec![a, b1, b2],
            site,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounting::PopulationCounts;

    fn place(store: &mut ParticleStore, ctx: &mut SpawnContext, species: Species, x: f64, y: f64) -> ParticleId {
        store.create_at(species, DVec2::new(x, y), ctx)
    }

    fn conditions(mode: Mode) -> ReactionConditions {
        ReactionConditions {
            mode,
            speed_factor: 3.0,
            catalyst_present: false,
            temperature: 25.0,
        }
    }

    /// Atoms under the mapping A=1, B=1, C=A+B.
    fn atoms(store: &ParticleStore) -> usize {
        let counts = PopulationCounts::tally(store);
        counts.get(Species::A) + counts.get(Species::B) + 2 * counts.get(Species::C)
    }

    #[test]
    fn test_rate_modifiers() {
        let stepper = ReactionStepper::default();
        let mut cond = conditions(Mode::Concentration);
        assert!((stepper.rate(&cond) - 0.15).abs() < 1e-12);

        cond.catalyst_present = true;
        assert!((stepper.rate(&cond) - 0.45).abs() < 1e-12);

        let mut hot = conditions(Mode::Temperature);
        hot.temperature = 75.0;
        assert!((stepper.rate(&hot) - 0.30).abs() < 1e-12);

        // Temperature only matters in temperature mode.
        let mut other = conditions(Mode::Catalyst);
        other.temperature = 75.0;
        assert!((stepper.rate(&other) - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_inert_never_matches() {
        let mut store = ParticleStore::new(8.0);
        let mut ctx = SpawnContext::seeded(1);
        let stepper = ReactionStepper::default();
        let a = place(&mut store, &mut ctx, Species::A, 100.0, 100.0);
        let inert = place(&mut store, &mut ctx, Species::Inert, 105.0, 100.0);
        let d = place(&mut store, &mut ctx, Species::D, 100.0, 105.0);

        for scheme in [Scheme::Combination, Scheme::GasPhase] {
            assert!(stepper.forward(scheme, &mut store, &mut ctx).is_none());
            assert!(stepper.reverse(scheme, &mut store, &mut ctx).is_none());
        }
        assert_eq!(store.len(), 3);
        for id in [a, inert, d] {
            assert!(store.get(id).is_some());
        }

        // A real partner next to the inert particle reacts; the inert one stays.
        place(&mut store, &mut ctx, Species::B, 100.0, 95.0);
        let conversion = stepper
            .forward(Scheme::Combination, &mut store, &mut ctx)
            .expect("A and B in range");
        assert!(!conversion.consumed.contains(&inert));
        assert_eq!(store.get(inert).map(|p| p.species), Some(Species::Inert));
    }

    #[test]
    fn test_combine_takes_first_pair_in_range() {
        let mut store = ParticleStore::new(8.0);
        let mut ctx = SpawnContext::seeded(1);
        let far_a = place(&mut store, &mut ctx, Species::A, 10.0, 10.0);
        let a = place(&mut store, &mut ctx, Species::A, 100.0, 100.0);
        let far_b = place(&mut store, &mut ctx, Species::B, 300.0, 300.0);
        let b = place(&mut store, &mut ctx, Species::B, 110.0, 100.0);

        let conversion = ReactionStepper::default()
            .forward(Scheme::Combination, &mut store, &mut ctx)
            .expect("pair in range");

        assert_eq!(conversion.consumed, vec![a, b]);
        assert!(store.get(far_a).is_some());
        assert!(store.get(far_b).is_some());
        let c = store.get(conversion.produced[0]).unwrap();
        assert_eq!(c.species, Species::C);
        assert_eq!(c.position, DVec2::new(105.0, 100.0));
    }

    #[test]
    fn test_combine_needs_strict_proximity() {
        let mut store = ParticleStore::new(8.0);
        let mut ctx = SpawnContext::seeded(1);
        place(&mut store, &mut ctx, Species::A, 100.0, 100.0);
        place(&mut store, &mut ctx, Species::B, 124.0, 100.0);
        let stepper = ReactionStepper::default();
        assert!(stepper.forward(Scheme::Combination, &mut store, &mut ctx).is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_combination_conversions_conserve_atoms() {
        let mut store = ParticleStore::new(8.0);
        let mut ctx = SpawnContext::seeded(2);
        for i in 0..10 {
            let x = 20.0 + i as f64 * 40.0;
            place(&mut store, &mut ctx, Species::A, x, 50.0);
            place(&mut store, &mut ctx, Species::B, x + 5.0, 50.0);
            place(&mut store, &mut ctx, Species::C, x, 200.0);
        }
        let stepper = ReactionStepper::default();
        let start = atoms(&store);
        for _ in 0..5 {
            assert!(stepper.forward(Scheme::Combination, &mut store, &mut ctx).is_some());
            assert_eq!(atoms(&store), start);
            assert!(stepper.reverse(Scheme::Combination, &mut store, &mut ctx).is_some());
            assert_eq!(atoms(&store), start);
        }
    }

    #[test]
    fn test_dissociate_places_products_beside_site() {
        let mut store = ParticleStore::new(8.0);
        let mut ctx = SpawnContext::seeded(4);
        let c = place(&mut store, &mut ctx, Species::C, 50.0, 60.0);
        let conversion = ReactionStepper::default()
            .reverse(Scheme::Combination, &mut store, &mut ctx)
            .unwrap();
        assert_eq!(conversion.consumed, vec![c]);
        let a = store.get(conversion.produced[0]).unwrap();
        let b = store.get(conversion.produced[1]).unwrap();
        assert_eq!((a.species, a.position), (Species::A, DVec2::new(42.0, 60.0)));
        assert_eq!((b.species, b.position), (Species::B, DVec2::new(58.0, 60.0)));
    }

    #[test]
    fn test_dissociate_without_product_is_noop() {
        let mut store = ParticleStore::new(8.0);
        let mut ctx = SpawnContext::seeded(4);
        place(&mut store, &mut ctx, Species::A, 50.0, 60.0);
        assert!(ReactionStepper::default()
            .reverse(Scheme::Combination, &mut store, &mut ctx)
            .is_none());
    }

    #[test]
    fn test_gas_forward_removes_exact_instances() {
        let mut store = ParticleStore::new(8.0);
        let mut ctx = SpawnContext::seeded(6);
        let lone_b = place(&mut store, &mut ctx, Species::B, 400.0, 400.0);
        let b1 = place(&mut store, &mut ctx, Species::B, 105.0, 100.0);
        let a = place(&mut store, &mut ctx, Species::A, 100.0, 100.0);
        let b2 = place(&mut store, &mut ctx, Species::B, 100.0, 106.0);
        let b3 = place(&mut store, &mut ctx, Species::B, 95.0, 100.0);

        let conversion = ReactionStepper::default()
            .forward(Scheme::GasPhase, &mut store, &mut ctx)
            .unwrap();

        assert_eq!(conversion.consumed, vec![a, b1, b2]);
        assert!(store.get(lone_b).is_some());
        assert!(store.get(b3).is_some());

        let counts = PopulationCounts::tally(&store);
        assert_eq!(counts.get(Species::A), 0);
        assert_eq!(counts.get(Species::B), 2);
        assert_eq!(counts.get(Species::C), 1);
        assert_eq!(counts.get(Species::D), 1);

        let c = store.get(conversion.produced[0]).unwrap();
        let d = store.get(conversion.produced[1]).unwrap();
        assert_eq!(d.position - c.position, DVec2::splat(8.0));
    }

    #[test]
    fn test_gas_forward_needs_two_b() {
        let mut store = ParticleStore::new(8.0);
        let mut ctx = SpawnContext::seeded(6);
        place(&mut store, &mut ctx, Species::A, 100.0, 100.0);
        place(&mut store, &mut ctx, Species::B, 105.0, 100.0);
        place(&mut store, &mut ctx, Species::B, 300.0, 100.0);
        assert!(ReactionStepper::default()
            .forward(Scheme::GasPhase, &mut store, &mut ctx)
            .is_none());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_gas_reverse() {
        let mut store = ParticleStore::new(8.0);
        let mut ctx = SpawnContext::seeded(8);
        let c = place(&mut store, &mut ctx, Species::C, 100.0, 100.0);
        let d = place(&mut store, &mut ctx, Species::D, 110.0, 100.0);
        let conversion = ReactionStepper::default()
            .reverse(Scheme::GasPhase, &mut store, &mut ctx)
            .unwrap();
        assert_eq!(conversion.consumed, vec![c, d]);
        let species: Vec<_> = conversion
            .produced
            .iter()
            .map(|id| store.get(*id).unwrap().species)
            .collect();
        assert_eq!(species, vec![Species::A, Species::B, Species::B]);
        let b1 = store.get(conversion.produced[1]).unwrap().position;
        let b2 = store.get(conversion.produced[2]).unwrap().position;
        assert_ne!(b1, b2);
    }

    #[test]
    fn test_step_skips_small_populations() {
        let mut store = ParticleStore::new(8.0);
        let mut ctx = SpawnContext::seeded(8);
        place(&mut store, &mut ctx, Species::A, 100.0, 100.0);
        place(&mut store, &mut ctx, Species::B, 101.0, 100.0);
        let mut cond = conditions(Mode::Concentration);
        cond.speed_factor = 100.0;
        let outcome = ReactionStepper::default().step(&mut store, &mut ctx, &cond, |_, _| {
            panic!("no conversion expected")
        });
        assert_eq!(outcome, StepOutcome::default());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_step_reports_each_conversion() {
        let mut store = ParticleStore::new(8.0);
        let mut ctx = SpawnContext::seeded(10);
        place(&mut store, &mut ctx, Species::A, 100.0, 100.0);
        place(&mut store, &mut ctx, Species::B, 104.0, 100.0);
        place(&mut store, &mut ctx, Species::C, 300.0, 300.0);

        // Rate above 1 makes both trials certain.
        let mut cond = conditions(Mode::Concentration);
        cond.speed_factor = 40.0;

        let mut seen = Vec::new();
        let outcome = ReactionStepper::default().step(&mut store, &mut ctx, &cond, |store, conversion| {
            seen.push((conversion.direction, store.len()));
        });

        assert_eq!(outcome.conversions(), 2);
        assert_eq!(seen, vec![(Direction::Forward, 2), (Direction::Reverse, 3)]);
    }
}
