//! Thermofluid Engine - thermal particle-fluid simulation in WASM
//!
//! Particles of a few fluids attract and repel through a spring-like stress
//! law, trade heat with a coarse diffusing temperature grid, and switch to
//! their paired state (water <-> steam, oil <-> gas) across a boiling point.
//!
//! Architecture:
//! - core/        - Vec2 and colour packing
//! - domain/      - Fluid table, particles, configuration
//! - spatial/     - Temperature grid
//! - systems/     - Physics and temperature passes
//! - simulation/  - Orchestration, commands, render buffers, loop, wasm facade

pub mod core;
pub mod error;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Thread pool initialization for browser builds with shared memory
#[cfg(all(feature = "parallel", target_arch = "wasm32", target_feature = "atomics"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"Thermofluid WASM engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use domain::config::SimConfig;
pub use domain::fluids::{FluidId, FluidProps, FluidTable};
pub use domain::particle::Particle;
pub use error::{Result, SimError};
pub use simulation::{Command, FrameView, PerfStats, Presenter, SimulationCore, SimulationLoop, Ticker, World};
pub use spatial::TemperatureGrid;

// Fluid ids of the built-in table, for JS
#[wasm_bindgen]
pub fn fluid_water() -> u8 { domain::fluids::FLUID_WATER }
#[wasm_bindgen]
pub fn fluid_steam() -> u8 { domain::fluids::FLUID_STEAM }
#[wasm_bindgen]
pub fn fluid_oil() -> u8 { domain::fluids::FLUID_OIL }
#[wasm_bindgen]
pub fn fluid_gas() -> u8 { domain::fluids::FLUID_GAS }
