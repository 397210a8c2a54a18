//! Domain model - fluids, particles, configuration

pub mod config;
pub mod fluids;
pub mod particle;
