use std::time::Duration;

use wasm_bindgen::prelude::*;

use super::perf_stats::PerfStats;
use super::{SimulationCore, Ticker};

fn to_js(e: crate::error::SimError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct World {
    core: SimulationCore,
    ticker: Ticker,
}

impl World {
    fn wrap(core: SimulationCore) -> Self {
        let ticker = Ticker::new(core.config().ticks_per_second, core.config().max_ticks_per_frame);
        Self { core, ticker }
    }
}

#[wasm_bindgen]
impl World {
    /// Create a world with default settings and no particles
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Result<World, JsValue> {
        SimulationCore::with_size(width, height).map(World::wrap).map_err(to_js)
    }

    /// Create a world from a JSON config (see `SimConfig`)
    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(json: String) -> Result<World, JsValue> {
        SimulationCore::from_json(&json).map(World::wrap).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.core.particle_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn tick(&self) -> u64 { self.core.tick() }

    #[wasm_bindgen(getter)]
    pub fn heat_display(&self) -> bool { self.core.heat_display() }

    #[wasm_bindgen(getter)]
    pub fn grid_width(&self) -> u32 { self.core.grid().width() }

    #[wasm_bindgen(getter)]
    pub fn grid_height(&self) -> u32 { self.core.grid().height() }

    /// Enable or disable per-step timings (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    pub fn set_gravity(&mut self, gravity: f64) {
        self.core.set_gravity(gravity);
    }

    pub fn get_gravity(&self) -> f64 {
        self.core.gravity()
    }

    /// Step the simulation forward by one tick
    pub fn step(&mut self) {
        self.core.step();
    }

    /// Feed wall time since the last call; runs the ticks that are due
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        let elapsed = Duration::try_from_secs_f64(elapsed_ms / 1000.0).unwrap_or(Duration::ZERO);
        let ticks = self.ticker.advance(elapsed);
        self.core.step_n(ticks);
        ticks
    }

    pub fn toggle_heat_display(&mut self) {
        self.core.toggle_heat_display();
    }

    pub fn cool_domain(&mut self) {
        self.core.cool_domain();
    }

    pub fn heat_domain(&mut self) {
        self.core.heat_domain();
    }

    /// Add a particle; returns its index
    pub fn add_particle(
        &mut self,
        x: f64,
        y: f64,
        vx: f64,
        vy: f64,
        temperature: f64,
        fluid: String,
    ) -> Result<u32, JsValue> {
        self.core
            .add_particle(x, y, vx, vy, temperature, &fluid)
            .map(|idx| idx as u32)
            .map_err(to_js)
    }

    pub fn set_anchored(&mut self, index: u32, anchored: bool) -> bool {
        self.core.set_anchored(index as usize, anchored)
    }

    /// Clear all particles
    pub fn clear(&mut self) {
        self.core.clear();
        self.ticker.reset();
    }

    /// JSON array of fluid keys, indexed by fluid id
    pub fn get_fluid_keys_json(&self) -> Result<String, JsValue> {
        let keys: Vec<&str> = self.core.fluids().iter().map(|(_, f)| f.key.as_str()).collect();
        serde_json::to_string(&keys).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    // === RENDER BUFFERS ===

    /// Refresh particle buffers; returns the particle count
    pub fn extract_particles(&mut self) -> u32 {
        self.core.extract_particles() as u32
    }

    /// `[x, y]` f32 pairs, 2 * count elements
    pub fn particle_positions_ptr(&self) -> *const f32 {
        self.core.particle_positions().as_ptr()
    }

    pub fn particle_positions_len(&self) -> usize {
        self.core.particle_positions().len()
    }

    /// ABGR u32, one per particle
    pub fn particle_colors_ptr(&self) -> *const u32 {
        self.core.particle_colors().as_ptr()
    }

    pub fn particle_colors_len(&self) -> usize {
        self.core.particle_colors().len()
    }

    /// Refresh the shaded grid colours; returns the cell count
    pub fn extract_grid_colors(&mut self) -> u32 {
        self.core.extract_grid_colors() as u32
    }

    pub fn grid_colors_ptr(&self) -> *const u32 {
        self.core.grid_colors().as_ptr()
    }

    pub fn grid_colors_len(&self) -> usize {
        self.core.grid_colors().len()
    }
}
