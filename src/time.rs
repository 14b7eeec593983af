//! Fixed-interval tick loop.
//!
//! Drives a [`Simulation`] at a steady cadence (30 ms by default). The
//! running flag is checked before each tick; clearing it stops the loop
//! after the current tick finishes. Nothing interrupts a tick midway.
//!
//! # Example
//!
//! ```
//! use lechatelier::prelude::*;
//! use std::ops::ControlFlow;
//! use std::time::Duration;
//!
//! let mut sim = Simulation::new().with_seed(1);
//! let mut ticker = TickLoop::new(Duration::ZERO);
//! ticker.start();
//! let ticks = ticker.run(&mut sim, |_, frame| {
//!     if frame >= 10 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
//! });
//! assert_eq!(ticks, 10);
//! ```

use crate::simulation::Simulation;
use std::ops::ControlFlow;
use std::thread;
use std::time::{Duration, Instant};

/// Default delay between ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(30);

/// Runs ticks at a fixed interval.
#[derive(Debug)]
pub struct TickLoop {
    /// Delay between two ticks.
    interval: Duration,
    /// Cleared to stop rescheduling.
    running: bool,
    /// Paused loops keep running but skip ticks.
    paused: bool,
    /// Ticks run since start.
    frame_count: u64,
    /// When the loop was last started.
    start: Instant,
}

impl TickLoop {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: false,
            paused: false,
            frame_count: 0,
            start: Instant::now(),
        }
    }

    /// Loop using the simulation's configured interval.
    pub fn for_simulation(sim: &Simulation) -> Self {
        Self::new(Duration::from_millis(sim.config().tick_interval_ms))
    }

    /// Set the running flag and reset the frame counter.
    pub fn start(&mut self) {
        self.running = true;
        self.paused = false;
        self.frame_count = 0;
        self.start = Instant::now();
        log::debug!("tick loop started at {:?}", self.interval);
    }

    /// Clear the running flag. Takes effect before the next tick.
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("tick loop stopped after {} ticks", self.frame_count);
        }
        self.running = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Ticks run since the last start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Wall time since the last start.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Run one tick if running and not paused. Returns whether a tick ran.
    pub fn step(&mut self, sim: &mut Simulation) -> bool {
        if !self.running || self.paused {
            return false;
        }
        sim.step();
        self.frame_count += 1;
        true
    }

    /// Tick until stopped or until `after_tick` breaks, sleeping the interval
    /// between ticks. Returns immediately when stopped or paused.
    ///
    /// `after_tick` receives the simulation and the frame count after each
    /// tick. Returns the number of ticks run by this call.
    pub fn run<F>(&mut self, sim: &mut Simulation, mut after_tick: F) -> u64
    where
        F: FnMut(&mut Simulation, u64) -> ControlFlow<()>,
    {
        let first = self.frame_count;
        while self.step(sim) {
            if after_tick(sim, self.frame_count).is_break() {
                self.stop();
                break;
            }
            if !self.interval.is_zero() {
                thread::sleep(self.interval);
            }
        }
        self.frame_count - first
    }
}

impl Default for TickLoop {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_loop_is_stopped() {
        let ticker = TickLoop::default();
        assert!(!ticker.is_running());
        assert_eq!(ticker.frame(), 0);
        assert_eq!(ticker.interval(), Duration::from_millis(30));
    }

    #[test]
    fn test_step_requires_running() {
        let mut sim = Simulation::new().with_seed(1);
        let mut ticker = TickLoop::new(Duration::ZERO);
        assert!(!ticker.step(&mut sim));
        assert_eq!(sim.stats().ticks, 0);

        ticker.start();
        assert!(ticker.step(&mut sim));
        assert_eq!(sim.stats().ticks, 1);
    }

    #[test]
    fn test_pause_skips_ticks() {
        let mut sim = Simulation::new().with_seed(1);
        let mut ticker = TickLoop::new(Duration::ZERO);
        ticker.start();
        ticker.pause();
        assert!(!ticker.step(&mut sim));
        ticker.toggle_pause();
        assert!(ticker.step(&mut sim));
        assert_eq!(ticker.frame(), 1);
    }

    #[test]
    fn test_run_stops_on_break() {
        let mut sim = Simulation::new().with_seed(2);
        let mut ticker = TickLoop::new(Duration::ZERO);
        ticker.start();
        let ran = ticker.run(&mut sim, |_, frame| {
            if frame == 25 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(ran, 25);
        assert!(!ticker.is_running());
        assert_eq!(sim.stats().ticks, 25);
    }

    #[test]
    fn test_run_without_start_does_nothing() {
        let mut sim = Simulation::new().with_seed(2);
        let mut ticker = TickLoop::new(Duration::ZERO);
        assert_eq!(ticker.run(&mut sim, |_, _| ControlFlow::Continue(())), 0);
    }
}
