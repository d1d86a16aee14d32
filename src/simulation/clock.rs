//! Generation clock, decoupled from the render frame rate
//!
//! The host calls `tick` once per animation frame. The clock decides whether
//! a generation step is due, then always hands the world to the render
//! callback exactly once.

use crate::core::error::Result;
use crate::world::{Seed, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockState {
    /// Not running; the world was cleared on entry
    Stopped,
    /// Not running; the world is preserved
    Paused,
    Playing,
}

#[derive(Debug, Clone)]
pub struct Clock {
    state: ClockState,
    step_interval_ms: u64,
    last_tick: Option<f64>,
    last_step: Option<f64>,
}

impl Clock {
    pub fn new(step_interval_ms: u64) -> Self {
        Self {
            state: ClockState::Stopped,
            step_interval_ms,
            last_tick: None,
            last_step: None,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == ClockState::Playing
    }

    /// Milliseconds between generation steps
    pub fn interval(&self) -> u64 {
        self.step_interval_ms
    }

    pub fn last_tick(&self) -> Option<f64> {
        self.last_tick
    }

    pub fn last_step(&self) -> Option<f64> {
        self.last_step
    }

    pub fn play(&mut self) {
        if self.state != ClockState::Playing {
            tracing::debug!(from = ?self.state, "Clock playing");
            self.state = ClockState::Playing;
        }
    }

    /// Only a playing clock can be paused
    pub fn pause(&mut self) {
        if self.state == ClockState::Playing {
            tracing::debug!("Clock paused");
            self.state = ClockState::Paused;
        }
    }

    /// Pause when playing, play otherwise
    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Stop and clear the world
    pub fn stop(&mut self, world: &mut World) {
        tracing::debug!(from = ?self.state, "Clock stopped");
        self.state = ClockState::Stopped;
        world.clear();
    }

    /// Stop, then put the world back into its initial state
    pub fn begin(&mut self, world: &mut World, seed: &Seed) -> Result<()> {
        self.stop(world);
        world.reset_generation();
        seed.apply(world)
    }

    /// `begin`, then play straight away
    pub fn restart(&mut self, world: &mut World, seed: &Seed) -> Result<()> {
        self.begin(world, seed)?;
        self.play();
        Ok(())
    }

    /// Negative intervals are ignored
    pub fn set_interval(&mut self, ms: i64) {
        match u64::try_from(ms) {
            Ok(ms) => {
                tracing::debug!(interval_ms = ms, "Step interval set");
                self.step_interval_ms = ms;
            }
            Err(_) => tracing::debug!(interval_ms = ms, "Rejected negative step interval"),
        }
    }

    /// Shift the interval by `delta`, never going below zero
    pub fn adjust_interval(&mut self, delta: i64) {
        self.step_interval_ms = if delta >= 0 {
            self.step_interval_ms.saturating_add(delta as u64)
        } else {
            self.step_interval_ms.saturating_sub(delta.unsigned_abs())
        };
        tracing::debug!(interval_ms = self.step_interval_ms, "Step interval adjusted");
    }

    /// Drive one animation frame
    ///
    /// Performs at most one generation step: after a long stall the clock
    /// resumes from `timestamp` instead of catching up on missed steps.
    /// Timestamps equal to or behind the last step never step. Non-finite
    /// timestamps only render. Returns whether a step happened.
    pub fn tick<F>(&mut self, timestamp: f64, world: &mut World, mut render: F) -> bool
    where
        F: FnMut(&World),
    {
        if !timestamp.is_finite() {
            render(world);
            return false;
        }

        let last_step = *self.last_step.get_or_insert(timestamp);
        self.last_tick.get_or_insert(timestamp);

        let stepped = self.state == ClockState::Playing
            && timestamp - last_step >= self.step_interval_ms as f64;
        if stepped {
            world.advance_generation();
            self.last_step = Some(timestamp);
        }

        render(world);
        self.last_tick = Some(timestamp);
        stepped
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(120)
    }
}
