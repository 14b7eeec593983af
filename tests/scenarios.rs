//! End-to-end scenarios driving the public API.

use lechatelier::prelude::*;

fn atoms(sim: &Simulation) -> (usize, usize) {
    // A carries one A atom, B one B atom, C one of each.
    let a = sim.count_by(Species::A) + sim.count_by(Species::C);
    let b = sim.count_by(Species::B) + sim.count_by(Species::C);
    (a, b)
}

#[test]
fn test_counts_sum_to_total() {
    let mut sim = Simulation::new().with_seed(10).with_mode(Mode::Pressure);
    sim.add_inert_gas();
    for _ in 0..100 {
        sim.tick(600.0, 400.0, 4.0);
        let sum: usize = Species::ALL.iter().map(|&s| sim.count_by(s)).sum();
        assert_eq!(sum, sim.particles().len());
        assert_eq!(sim.counts().total(), sum);
        assert_eq!(sim.count_by(Species::Inert), 5);
    }
}

#[test]
fn test_ticks_conserve_atoms() {
    let mut sim = Simulation::new().with_seed(11);
    let before = atoms(&sim);
    for _ in 0..300 {
        sim.tick(300.0, 200.0, 5.0);
        assert_eq!(atoms(&sim), before);
    }
    let stats = sim.stats();
    assert!(stats.forward_reactions + stats.reverse_reactions > 0);
}

#[test]
fn test_double_catalyst_toggle_restores_state() {
    let mut sim = Simulation::new().with_seed(12).with_mode(Mode::Catalyst);
    sim.tick(600.0, 400.0, 1.0);
    let particles = sim.particles().to_vec();
    let state = sim.equilibrium_state();

    assert!(sim.toggle_catalyst());
    assert!(!sim.toggle_catalyst());

    assert_eq!(sim.particles(), &particles[..]);
    let after = sim.equilibrium_state();
    assert_eq!(after.concentration_a, state.concentration_a);
    assert_eq!(after.concentration_c, state.concentration_c);
    assert!(!after.catalyst_present);
}

#[test]
fn test_neutral_temperature() {
    for mode in Mode::ALL {
        let mut sim = Simulation::new().with_seed(13).with_mode(mode);
        let before = sim.particles().len();
        assert_eq!(sim.set_temperature(50.0), 0);
        assert_eq!(sim.equilibrium_state().k_value, 1.0);
        assert_eq!(sim.particles().len(), before);
    }
}

#[test]
fn test_hot_vessel_lowers_k() {
    let mut sim = Simulation::new().with_seed(14).with_mode(Mode::Temperature);
    sim.set_temperature(90.0);
    let k = sim.equilibrium_state().k_value;
    assert!((k - 0.2019).abs() < 1e-3);
    assert!(k < 1.0);
}

#[test]
fn test_adding_reactant() {
    let mut sim = Simulation::new().with_seed(15);
    sim.add_species(Species::A).unwrap();
    assert_eq!(sim.count_by(Species::A), 11);
    let state = sim.equilibrium_state();
    assert!((state.q_value - 0.0909).abs() < 1e-4);
    assert_eq!(state.shift_direction, ShiftDirection::Right);
    assert_eq!(sim.readout().q_value, "0.09");
}

#[test]
fn test_high_pressure_converts_two_groups() {
    let mut sim = Simulation::new().with_seed(16).with_mode(Mode::Pressure);
    assert_eq!(sim.set_pressure(75.0), 2);
    assert_eq!(sim.equilibrium_state().pressure, 1.5);
    assert_eq!(sim.count_by(Species::A), 8);
    assert_eq!(sim.count_by(Species::B), 16);
    assert_eq!(sim.count_by(Species::C), 12);
    assert_eq!(sim.count_by(Species::D), 12);
}

#[test]
fn test_inert_gas_never_moves_quotients() {
    let mut sim = Simulation::new().with_seed(17).with_mode(Mode::Pressure);
    sim.tick(600.0, 400.0, 3.0);
    for _ in 0..3 {
        let before = sim.equilibrium_state();
        sim.add_inert_gas();
        let after = sim.equilibrium_state();
        assert_eq!(after.q_value, before.q_value);
        assert_eq!(after.k_value, before.k_value);
    }
    assert_eq!(sim.count_by(Species::Inert), 15);
}

#[test]
fn test_empty_product_side() {
    let mut sim = Simulation::new().with_seed(18);
    for _ in 0..10 {
        sim.remove_species(Species::A).unwrap();
    }
    let state = sim.equilibrium_state();
    assert_eq!(state.q_value, f64::INFINITY);
    assert_eq!(state.shift_direction, ShiftDirection::Left);
}

#[test]
fn test_mode_switch_resets() {
    let mut sim = Simulation::new().with_seed(19);
    sim.add_inert_gas();
    sim.toggle_catalyst();
    sim.set_mode(Mode::Pressure);
    assert_eq!(sim.particles().len(), 50);
    assert_eq!(sim.count_by(Species::Inert), 0);
    assert!(!sim.equilibrium_state().catalyst_present);
    assert_eq!(sim.readout().equation, "A + 2B ⇌ C + D");
}

#[test]
fn test_config_drives_simulation() {
    let config = SimConfig::from_json(r#"{ "mode": "Temperature", "seed": 5, "initial_population": 4 }"#).unwrap();
    let sim = Simulation::from_config(config).unwrap();
    assert_eq!(sim.mode(), Mode::Temperature);
    assert_eq!(sim.particles().len(), 12);
}
