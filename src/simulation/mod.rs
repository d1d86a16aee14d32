//! Composition root tying the world, its clock and the viewport together
//!
//! Nothing here is global: the host owns a `Simulation` and passes it (or
//! its parts) to whatever needs them.

pub mod clock;

pub use clock::{Clock, ClockState};

use crate::core::config::LifeConfig;
use crate::core::error::Result;
use crate::render::Viewport;
use crate::world::{Seed, World};

pub struct Simulation {
    pub world: World,
    pub clock: Clock,
    pub viewport: Viewport,
    /// Initial state restored by `begin` and `restart`
    seed: Seed,
}

impl Simulation {
    /// Dead world, stopped clock, centered viewport at 100%
    pub fn new(width: u32, height: u32, step_interval_ms: u64, seed: Seed) -> Self {
        let world = World::new(width, height);
        let viewport = Viewport::for_world(&world);
        Self {
            world,
            clock: Clock::new(step_interval_ms),
            viewport,
            seed,
        }
    }

    /// Build from validated configuration and apply the seed
    pub fn from_config(config: &LifeConfig) -> Result<Self> {
        config.validate()?;

        let mut sim = Self::new(
            config.world.width,
            config.world.height,
            config.clock.step_interval_ms,
            config.seed.seed(),
        );
        sim.viewport.set_zoom(config.view.zoom_percent);

        if config.clock.autoplay {
            sim.restart()?;
        } else {
            sim.begin()?;
        }
        Ok(sim)
    }

    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    /// Replace the initial state used by later `begin` / `restart` calls
    pub fn set_seed(&mut self, seed: Seed) {
        self.seed = seed;
    }

    pub fn begin(&mut self) -> Result<()> {
        self.clock.begin(&mut self.world, &self.seed)
    }

    pub fn restart(&mut self) -> Result<()> {
        self.clock.restart(&mut self.world, &self.seed)
    }

    pub fn stop(&mut self) {
        self.clock.stop(&mut self.world);
    }

    /// Set the cell under a pixel of the last rendered frame
    pub fn paint(&mut self, px: u32, py: u32, alive: bool) {
        let cell = self.viewport.screen_to_world(px, py);
        self.world.set(cell.x as i32, cell.y as i32, alive);
    }

    /// Drive one animation frame
    ///
    /// Steps the world if due, recomputes the viewport frame and hands both
    /// to `render`. Returns whether a generation step happened.
    pub fn tick<F>(&mut self, timestamp: f64, mut render: F) -> bool
    where
        F: FnMut(&World, &Viewport),
    {
        let Self {
            world,
            clock,
            viewport,
            ..
        } = self;

        clock.tick(timestamp, world, |world| {
            viewport.recompute_frame();
            render(world, viewport);
        })
    }
}
