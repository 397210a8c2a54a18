//! Simulation configuration, read once at startup.
//!
//! Every field has a default, so `{}` is a valid config:
//!
//! ```
//! use thermofluid_engine::domain::config::SimConfig;
//!
//! let config = SimConfig::from_json(r#"{ "width": 320, "height": 200, "gravity": 0 }"#).unwrap();
//! assert_eq!(config.width, 320);
//! assert_eq!(config.ticks_per_second, 60);
//! ```

use serde::Deserialize;

use crate::domain::fluids::{CatalogRoot, FluidTable};
use crate::error::{Result, SimError};

pub const DEFAULT_WIDTH: u32 = 900;
pub const DEFAULT_HEIGHT: u32 = 900;
pub const DEFAULT_COARSENESS: u32 = 3;
pub const DEFAULT_TICKS_PER_SECOND: u32 = 60;
pub const DEFAULT_INITIAL_TEMPERATURE: f64 = 273.0;
/// Negative is towards y = 0
pub const DEFAULT_GRAVITY: f64 = -1.0;
/// Fraction of velocity kept each tick
pub const DEFAULT_FRICTION: f64 = 0.9;
pub const DEFAULT_RESTITUTION: f64 = 0.5;
pub const DEFAULT_MAX_SPEED: f64 = 50.0;
pub const DEFAULT_MAX_PARTICLES: usize = 10_000;
pub const DEFAULT_COOL_FACTOR: f64 = 0.9;
pub const DEFAULT_HEAT_FACTOR: f64 = 1.1;
pub const DEFAULT_HEAT_CEILING: f64 = 10_000.0;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimConfig {
    pub width: u32,
    pub height: u32,
    /// Grid cells are `2^coarseness` domain units wide
    pub coarseness: u32,
    pub ticks_per_second: u32,
    /// Ticks allowed per loop iteration before leftover time is carried
    pub max_ticks_per_frame: u32,
    pub initial_temperature: f64,
    pub gravity: f64,
    pub friction: f64,
    pub restitution: f64,
    /// Velocity ceiling applied before each move
    pub max_speed: f64,
    /// Spawns beyond this population are dropped
    pub max_particles: usize,
    pub seed: u64,
    pub heat_display: bool,
    pub cool_factor: f64,
    pub heat_factor: f64,
    pub heat_ceiling: f64,
    pub seed_particles: Vec<SeedGroup>,
    /// Replaces the built-in fluid presets when present
    pub fluids: Option<CatalogRoot>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            coarseness: DEFAULT_COARSENESS,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            max_ticks_per_frame: 1,
            initial_temperature: DEFAULT_INITIAL_TEMPERATURE,
            gravity: DEFAULT_GRAVITY,
            friction: DEFAULT_FRICTION,
            restitution: DEFAULT_RESTITUTION,
            max_speed: DEFAULT_MAX_SPEED,
            max_particles: DEFAULT_MAX_PARTICLES,
            seed: 12345,
            heat_display: false,
            cool_factor: DEFAULT_COOL_FACTOR,
            heat_factor: DEFAULT_HEAT_FACTOR,
            heat_ceiling: DEFAULT_HEAT_CEILING,
            seed_particles: Vec::new(),
            fluids: None,
        }
    }
}

/// A batch of particles placed at startup
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedGroup {
    /// Fluid key, e.g. `"water"`
    pub fluid: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default)]
    pub anchored: bool,
    #[serde(flatten)]
    pub placement: Placement,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", untagged)]
pub enum Placement {
    /// Explicit particles
    Points { points: Vec<SeedPoint> },
    /// `count` particles uniformly inside `region` (whole domain when absent)
    Random {
        count: usize,
        #[serde(default)]
        region: Option<Region>,
    },
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub vx: f64,
    #[serde(default)]
    pub vy: f64,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

fn default_temperature() -> f64 {
    DEFAULT_INITIAL_TEMPERATURE
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Fluid table for this config: the override catalog or the presets
    pub fn fluid_table(&self) -> Result<FluidTable> {
        match &self.fluids {
            Some(catalog) => FluidTable::from_catalog(catalog.clone()),
            None => Ok(FluidTable::from_builtin()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < 2 || self.height < 2 {
            return Err(SimError::InvalidConfig(format!(
                "domain must be at least 2x2, got {}x{}",
                self.width, self.height
            )));
        }
        if self.coarseness >= 31 {
            return Err(SimError::InvalidConfig(format!("coarseness too large: {}", self.coarseness)));
        }
        if self.ticks_per_second == 0 {
            return Err(SimError::InvalidConfig("ticks_per_second must be > 0".to_string()));
        }
        if self.max_ticks_per_frame == 0 {
            return Err(SimError::InvalidConfig("max_ticks_per_frame must be > 0".to_string()));
        }
        check_finite("initial_temperature", self.initial_temperature)?;
        check_finite("gravity", self.gravity)?;
        check_range("friction", self.friction, 0.0, 1.0)?;
        check_range("restitution", self.restitution, 0.0, 1.0)?;
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(SimError::InvalidConfig("max_speed must be finite and > 0".to_string()));
        }
        let (max_x, max_y) = self.max_coords();
        if self.max_speed >= max_x.min(max_y) {
            return Err(SimError::InvalidConfig(format!(
                "max_speed {} must be below the smaller domain extent {}",
                self.max_speed,
                max_x.min(max_y)
            )));
        }
        check_range("cool_factor", self.cool_factor, 0.0, f64::MAX)?;
        check_range("heat_factor", self.heat_factor, 0.0, f64::MAX)?;
        check_finite("heat_ceiling", self.heat_ceiling)?;

        for group in &self.seed_particles {
            check_finite("seed temperature", group.temperature)?;
            match &group.placement {
                Placement::Points { points } => {
                    for pt in points {
                        if !self.contains(pt.x, pt.y) || !(pt.vx.is_finite() && pt.vy.is_finite()) {
                            return Err(SimError::InvalidConfig(format!(
                                "seed point ({}, {}) outside [0, {max_x}] x [0, {max_y}]",
                                pt.x, pt.y
                            )));
                        }
                    }
                }
                Placement::Random { region: Some(r), .. } => {
                    let fits = r.w >= 0.0
                        && r.h >= 0.0
                        && self.contains(r.x, r.y)
                        && self.contains(r.x + r.w, r.y + r.h);
                    if !fits {
                        return Err(SimError::InvalidConfig(format!("seed region {r:?} extends past the domain")));
                    }
                }
                Placement::Random { region: None, .. } => {}
            }
        }
        Ok(())
    }

    /// Largest coordinate on each axis
    pub fn max_coords(&self) -> (f64, f64) {
        (
            self.width.saturating_sub(1) as f64,
            self.height.saturating_sub(1) as f64,
        )
    }

    /// Whether `(x, y)` lies inside `[0, width - 1] x [0, height - 1]`
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (max_x, max_y) = self.max_coords();
        (0.0..=max_x).contains(&x) && (0.0..=max_y).contains(&y)
    }
}

fn check_finite(name: &str, v: f64) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidConfig(format!("{name} must be finite")))
    }
}

fn check_range(name: &str, v: f64, lo: f64, hi: f64) -> Result<()> {
    if v.is_finite() && v >= lo && v <= hi {
        Ok(())
    } else {
        Err(SimError::InvalidConfig(format!("{name} must be within [{lo}, {hi}], got {v}")))
    }
}
