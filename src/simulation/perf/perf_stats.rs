use wasm_bindgen::prelude::*;

/// Per-tick timings and counters. Timings stay at zero unless perf metrics
/// are enabled; counters are always filled.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) heat_exchange_ms: f64,
    pub(super) phase_ms: f64,
    pub(super) free_body_ms: f64,
    pub(super) interactions_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) diffuse_ms: f64,
    pub(super) particle_count: u32,
    pub(super) phase_changes: u32,
    pub(super) influenced_pairs: u32,
    pub(super) spawned: u32,
    pub(super) spawns_dropped: u32,
    pub(super) grid_size: u32,
    pub(super) total_heat: f64,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn heat_exchange_ms(&self) -> f64 { self.heat_exchange_ms }
    #[wasm_bindgen(getter)]
    pub fn phase_ms(&self) -> f64 { self.phase_ms }
    #[wasm_bindgen(getter)]
    pub fn free_body_ms(&self) -> f64 { self.free_body_ms }
    #[wasm_bindgen(getter)]
    pub fn interactions_ms(&self) -> f64 { self.interactions_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn diffuse_ms(&self) -> f64 { self.diffuse_ms }
    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.particle_count }
    #[wasm_bindgen(getter)]
    pub fn phase_changes(&self) -> u32 { self.phase_changes }
    #[wasm_bindgen(getter)]
    pub fn influenced_pairs(&self) -> u32 { self.influenced_pairs }
    #[wasm_bindgen(getter)]
    pub fn spawned(&self) -> u32 { self.spawned }
    #[wasm_bindgen(getter)]
    pub fn spawns_dropped(&self) -> u32 { self.spawns_dropped }
    #[wasm_bindgen(getter)]
    pub fn grid_size(&self) -> u32 { self.grid_size }
    /// Sum of all grid cells after the tick (perf mode only)
    #[wasm_bindgen(getter)]
    pub fn total_heat(&self) -> f64 { self.total_heat }
}
