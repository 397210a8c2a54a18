//! Simulation - owns the particles, the temperature grid and the fluid table
//!
//! `SimulationCore` only orchestrates: per-particle rules live in
//! `systems/physics` and `systems/temperature`, the heat field in
//! `spatial/temperature_grid.rs`. Submodules here hold the thin tick,
//! command, seeding, render and loop layers.

use rand::rngs::StdRng;

use crate::domain::config::{SimConfig, DEFAULT_MAX_SPEED};
use crate::domain::fluids::FluidTable;
use crate::domain::particle::Particle;
use crate::error::Result;
use crate::spatial::TemperatureGrid;
use crate::systems::physics::IntegrationParams;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "runner/ticker.rs"]
mod ticker;
#[path = "runner/runner.rs"]
mod runner;
mod facade;

pub use commands::Command;
pub use facade::World;
pub use perf_stats::PerfStats;
pub use runner::{Presenter, SimulationLoop};
pub use ticker::Ticker;

use perf_timer::PerfTimer;

/// Flat buffers handed to a renderer. Rebuilt on demand, never read by the tick.
#[derive(Default)]
pub(crate) struct RenderBuffers {
    /// `[x0, y0, x1, y1, ...]`
    positions: Vec<f32>,
    /// ABGR, one per particle
    colors: Vec<u32>,
    /// ABGR, one per grid cell, row-major
    grid_colors: Vec<u32>,
}

/// Read-only view of one frame for a presenter
#[derive(Clone, Copy)]
pub struct FrameView<'a> {
    pub particles: &'a [Particle],
    pub grid: &'a TemperatureGrid,
    pub heat_display: bool,
    pub tick: u64,
}

/// The simulation state
pub struct SimulationCore {
    config: SimConfig,
    fluids: FluidTable,
    grid: TemperatureGrid,
    particles: Vec<Particle>,
    integration: IntegrationParams,

    // Settings
    gravity: f64,
    heat_display: bool,

    // State
    tick: u64,
    rng: StdRng,
    spawns_dropped_total: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,

    render: RenderBuffers,
}

impl SimulationCore {
    /// Build a simulation from a validated config and place its seed particles
    pub fn new(config: SimConfig) -> Result<Self> {
        init::create_simulation_core(config)
    }

    /// Default config with the given domain size and no particles.
    /// The speed ceiling shrinks to half the smaller extent on tiny domains.
    pub fn with_size(width: u32, height: u32) -> Result<Self> {
        let extent = width.min(height).saturating_sub(1) as f64;
        Self::new(SimConfig {
            width,
            height,
            max_speed: DEFAULT_MAX_SPEED.min(extent / 2.0),
            ..SimConfig::default()
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(SimConfig::from_json(json)?)
    }

    pub fn config(&self) -> &SimConfig { &self.config }

    pub fn fluids(&self) -> &FluidTable { &self.fluids }

    pub fn grid(&self) -> &TemperatureGrid { &self.grid }

    pub fn particles(&self) -> &[Particle] { &self.particles }

    pub fn width(&self) -> u32 { self.config.width }

    pub fn height(&self) -> u32 { self.config.height }

    pub fn particle_count(&self) -> usize { self.particles.len() }

    pub fn tick(&self) -> u64 { self.tick }

    pub fn heat_display(&self) -> bool { self.heat_display }

    /// Spawns discarded by the population cap since startup
    pub fn spawns_dropped_total(&self) -> u64 { self.spawns_dropped_total }

    pub fn frame_view(&self) -> FrameView<'_> {
        FrameView {
            particles: &self.particles,
            grid: &self.grid,
            heat_display: self.heat_display,
            tick: self.tick,
        }
    }

    /// Advance the simulation by one tick
    pub fn step(&mut self) {
        step::step(self);
    }

    /// Run `n` ticks back to back
    pub fn step_n(&mut self, n: u32) {
        for _ in 0..n {
            step::step(self);
        }
    }

    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last step snapshot (timings are zero when perf is disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    pub fn gravity(&self) -> f64 {
        settings::get_gravity(self)
    }

    pub fn set_gravity(&mut self, gravity: f64) {
        settings::set_gravity(self, gravity);
    }

    pub fn apply_command(&mut self, command: Command) {
        commands::apply_command(self, command);
    }

    /// Flip between material and temperature colouring
    pub fn toggle_heat_display(&mut self) {
        commands::toggle_heat_display(self);
    }

    pub fn cool_domain(&mut self) {
        commands::cool_domain(self);
    }

    pub fn heat_domain(&mut self) {
        commands::heat_domain(self);
    }

    /// Add one particle of the fluid named `fluid_key`. Returns its index.
    pub fn add_particle(&mut self, x: f64, y: f64, vx: f64, vy: f64, temperature: f64, fluid_key: &str) -> Result<usize> {
        commands::add_particle(self, x, y, vx, vy, temperature, fluid_key)
    }

    pub fn set_anchored(&mut self, index: usize, anchored: bool) -> bool {
        commands::set_anchored(self, index, anchored)
    }

    /// Remove all particles and reset the grid to the initial temperature
    pub fn clear(&mut self) {
        commands::clear(self);
    }

    /// Fill the particle position/colour buffers. Returns the particle count.
    pub fn extract_particles(&mut self) -> usize {
        render_extract::extract_particles(self)
    }

    /// Fill the grid colour buffer. Returns the cell count.
    pub fn extract_grid_colors(&mut self) -> usize {
        render_extract::extract_grid_colors(self)
    }

    pub fn particle_positions(&self) -> &[f32] { &self.render.positions }

    pub fn particle_colors(&self) -> &[u32] { &self.render.colors }

    pub fn grid_colors(&self) -> &[u32] { &self.render.grid_colors }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
