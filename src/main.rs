//! Headless runner.
//!
//! Runs the selected experiment through a scripted sequence of
//! perturbations and prints the data panel after each phase.
//!
//! ```text
//! RUST_LOG=debug lechatelier --mode pressure --ticks 200 --seed 7
//! ```

use clap::{Parser, ValueEnum};
use lechatelier::prelude::*;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Concentration,
    Temperature,
    Pressure,
    Catalyst,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Mode {
        match arg {
            ModeArg::Concentration => Mode::Concentration,
            ModeArg::Temperature => Mode::Temperature,
            ModeArg::Pressure => Mode::Pressure,
            ModeArg::Catalyst => Mode::Catalyst,
        }
    }
}

#[derive(Parser)]
#[command(name = "lechatelier")]
#[command(about = "Le Chatelier equilibrium-shift reaction vessel", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Experiment to run (overrides the config)
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Ticks to run after each perturbation
    #[arg(short, long, default_value_t = 100)]
    ticks: u64,

    /// RNG seed (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Sleep the configured tick interval between ticks
    #[arg(long, default_value_t = false)]
    realtime: bool,

    /// Finish with a random challenge question
    #[arg(long, default_value_t = false)]
    challenge: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config.mode = mode.into();
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let mut sim = Simulation::from_config(config)?;
    let mut ticker = if cli.realtime {
        TickLoop::for_simulation(&sim)
    } else {
        TickLoop::new(Duration::ZERO)
    };

    log::info!("running {} for {} ticks per phase", sim.mode(), cli.ticks);
    for line in sim.mode().explanation() {
        println!("{line}");
    }

    run_phase(&mut sim, &mut ticker, cli.ticks, "initial");
    for phase in script(sim.mode()) {
        let label = phase.apply(&mut sim)?;
        run_phase(&mut sim, &mut ticker, cli.ticks, &label);
    }

    let stats = sim.stats();
    println!(
        "\n{} ticks, {} forward and {} reverse reactions",
        stats.ticks, stats.forward_reactions, stats.reverse_reactions
    );

    if cli.challenge {
        let challenge = sim.challenge();
        println!("\n{}", challenge.question);
        for (i, option) in challenge.options.iter().enumerate() {
            println!("  {}. {}", i + 1, option);
        }
        if let Some(answer) = challenge.correct_option() {
            println!("Answer: {answer}");
        }
    }
    Ok(())
}

/// One scripted perturbation.
enum Phase {
    Add(Species),
    Remove(Species),
    Temperature(f64),
    Pressure(f64),
    InertGas,
    Catalyst,
}

impl Phase {
    fn apply(&self, sim: &mut Simulation) -> Result<String, SimulationError> {
        let label = match *self {
            Phase::Add(species) => {
                sim.add_species(species)?;
                format!("add {species}")
            }
            Phase::Remove(species) => {
                let removed = sim.remove_species(species)?;
                format!("remove {species} ({})", if removed { "ok" } else { "none left" })
            }
            Phase::Temperature(value) => {
                let converted = sim.set_temperature(value);
                format!("temperature {value} ({converted} conversions)")
            }
            Phase::Pressure(slider) => {
                let converted = sim.set_pressure(slider);
                format!("pressure slider {slider} ({converted} conversions)")
            }
            Phase::InertGas => format!("inert gas (+{})", sim.add_inert_gas()),
            Phase::Catalyst => {
                let present = sim.toggle_catalyst();
                format!("catalyst {}", if present { "on" } else { "off" })
            }
        };
        Ok(label)
    }
}

fn script(mode: Mode) -> Vec<Phase> {
    match mode {
        Mode::Concentration => vec![
            Phase::Add(Species::A),
            Phase::Add(Species::A),
            Phase::Remove(Species::C),
        ],
        Mode::Temperature => vec![Phase::Temperature(90.0), Phase::Temperature(10.0)],
        Mode::Pressure => vec![Phase::Pressure(75.0), Phase::InertGas, Phase::Pressure(25.0)],
        Mode::Catalyst => vec![Phase::Catalyst, Phase::Catalyst],
    }
}

fn run_phase(sim: &mut Simulation, ticker: &mut TickLoop, ticks: u64, label: &str) {
    ticker.start();
    ticker.run(sim, |_, frame| {
        if frame >= ticks {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    print_readout(sim, label);
}

fn print_readout(sim: &Simulation, label: &str) {
    let r = sim.readout();
    println!("\n== {label} ==");
    println!("{}", r.equation);
    println!(
        "[A] {}  [B] {}  [C] {}",
        r.concentration_a, r.concentration_b, r.concentration_c
    );
    println!("K {}  Q {}  shift: {}", r.k_value, r.q_value, r.shift_direction);
    println!(
        "T {}  P {}  scale {:.2}  catalyst: {}",
        r.temperature,
        r.pressure,
        r.vessel_scale,
        sim.equilibrium_state().catalyst_present
    );
    let bars: Vec<String> = r
        .bars
        .iter()
        .map(|bar| format!("{} {:.0}%", bar.species, bar.fraction * 100.0))
        .collect();
    println!("{}", bars.join("  "));
}
