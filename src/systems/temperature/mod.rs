//! Temperature System - particle/grid heat exchange and phase changes
//!
//! - Heat exchange runs serially in particle order. Several particles often
//!   share one grid cell, and every exchange debits that cell, so a parallel
//!   pass would race on it. Serial order keeps the cell debit equal to the
//!   sum of particle gains.
//! - Phase changes only touch the particle itself and run in parallel.

mod color;
mod phase_changes;

pub use color::{color_for, shaded};
pub use phase_changes::apply_phase_changes;

use crate::domain::fluids::FluidTable;
use crate::domain::particle::Particle;
use crate::spatial::TemperatureGrid;

/// Exchange heat between every particle and the cell under it
pub fn exchange_heat_pass(particles: &mut [Particle], fluids: &FluidTable, grid: &mut TemperatureGrid) {
    for p in particles.iter_mut() {
        p.exchange_heat(fluids, grid);
    }
}
