//! Spatial data structures

pub mod temperature_grid;

pub use temperature_grid::TemperatureGrid;
