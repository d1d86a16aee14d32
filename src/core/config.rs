//! Runtime configuration with documented defaults
//!
//! Loaded from a TOML file; every field is optional and falls back to the
//! values below. Command-line flags in the binary override individual fields
//! after loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{LifeError, Result};
use crate::render::viewport::MIN_ZOOM_FACTOR;
use crate::world::patterns::Seed;

/// Largest grid side accepted from configuration. `World` itself accepts
/// anything that fits in an `i32`.
pub const MAX_DIMENSION: u32 = 1 << 14;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifeConfig {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

/// Grid dimensions (fixed for the lifetime of a run)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Generation cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Minimum milliseconds between two generation steps
    ///
    /// At 120ms the simulation runs at a little over 8 generations per
    /// second regardless of how fast frames are drawn. 0 means one
    /// generation per frame.
    #[serde(default = "default_step_interval_ms")]
    pub step_interval_ms: u64,

    /// Start playing immediately after seeding
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            step_interval_ms: default_step_interval_ms(),
            autoplay: default_autoplay(),
        }
    }
}

/// Camera and input feel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Initial zoom in percent (100 = whole grid on screen)
    #[serde(default = "default_zoom_percent")]
    pub zoom_percent: f64,

    /// Zoom delta applied per tick while a zoom key is held
    ///
    /// Fed to `Viewport::adjust_zoom`, which multiplies by `1 + rate / 5`,
    /// so 0.1 zooms by 2% per tick.
    #[serde(default = "default_zoom_rate")]
    pub zoom_rate: f64,

    /// Pan input units per tick while a pan key is held
    ///
    /// Scaled by the viewport's pan stride, so the on-screen speed stays
    /// roughly constant at every zoom level.
    #[serde(default = "default_pan_speed")]
    pub pan_speed: i32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            zoom_percent: default_zoom_percent(),
            zoom_rate: default_zoom_rate(),
            pan_speed: default_pan_speed(),
        }
    }
}

/// Initial world state used by `begin` and `restart`
///
/// A pattern name wins over the random soup; the name `"empty"` gives a
/// blank grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default)]
    pub pattern: Option<String>,
    /// Probability of each cell starting alive in the random soup
    #[serde(default = "default_density")]
    pub density: f64,
    /// RNG seed for the random soup
    #[serde(default)]
    pub rng_seed: u64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            pattern: None,
            density: default_density(),
            rng_seed: 0,
        }
    }
}

impl SeedConfig {
    /// Resolve the configured initial state
    pub fn seed(&self) -> Seed {
        match self.pattern.as_deref() {
            Some(name) if name.eq_ignore_ascii_case("empty") => Seed::Empty,
            Some(name) => Seed::Pattern {
                name: name.to_string(),
            },
            None => Seed::Random {
                density: self.density,
                seed: self.rng_seed,
            },
        }
    }
}

fn default_width() -> u32 {
    160
}

fn default_height() -> u32 {
    96
}

fn default_step_interval_ms() -> u64 {
    120
}

fn default_autoplay() -> bool {
    true
}

fn default_zoom_percent() -> f64 {
    100.0
}

fn default_zoom_rate() -> f64 {
    0.1
}

fn default_pan_speed() -> i32 {
    1
}

fn default_density() -> f64 {
    0.25
}

impl LifeConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: LifeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            width = config.world.width,
            height = config.world.height,
            "Loaded config"
        );
        Ok(config)
    }

    /// Check configuration for values the core would otherwise have to clamp
    pub fn validate(&self) -> Result<()> {
        for (axis, value) in [("width", self.world.width), ("height", self.world.height)] {
            if value == 0 || value > MAX_DIMENSION {
                return Err(LifeError::InvalidConfig(format!(
                    "world.{} must be in 1..={} (got {})",
                    axis, MAX_DIMENSION, value
                )));
            }
        }

        if !self.view.zoom_percent.is_finite() || self.view.zoom_percent < MIN_ZOOM_FACTOR * 100.0 {
            return Err(LifeError::InvalidConfig(format!(
                "view.zoom_percent must be at least {} (got {})",
                MIN_ZOOM_FACTOR * 100.0,
                self.view.zoom_percent
            )));
        }

        if !self.view.zoom_rate.is_finite() {
            return Err(LifeError::InvalidConfig("view.zoom_rate must be finite".into()));
        }

        if !(0.0..=1.0).contains(&self.seed.density) {
            return Err(LifeError::InvalidConfig(format!(
                "seed.density must be within [0, 1] (got {})",
                self.seed.density
            )));
        }

        Ok(())
    }
}
