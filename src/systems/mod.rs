//! Simulation systems

pub mod physics;
pub mod temperature;
