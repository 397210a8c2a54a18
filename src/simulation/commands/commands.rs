use tracing::debug;

use crate::core::Vec2;
use crate::domain::particle::Particle;
use crate::error::{Result, SimError};

use super::SimulationCore;

/// Input commands a host can queue between ticks
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    ToggleHeatDisplay,
    CoolDomain,
    HeatDomain,
    SetGravity(f64),
    Clear,
}

pub(super) fn apply_command(sim: &mut SimulationCore, command: Command) {
    match command {
        Command::ToggleHeatDisplay => toggle_heat_display(sim),
        Command::CoolDomain => cool_domain(sim),
        Command::HeatDomain => heat_domain(sim),
        Command::SetGravity(g) => sim.set_gravity(g),
        Command::Clear => clear(sim),
    }
}

pub(super) fn toggle_heat_display(sim: &mut SimulationCore) {
    sim.heat_display = !sim.heat_display;
    // Recolour now so the next frame is consistent without waiting a tick
    for p in sim.particles.iter_mut() {
        p.refresh_color(&sim.fluids, sim.heat_display);
    }
    debug!(heat_display = sim.heat_display, "heat display toggled");
}

pub(super) fn cool_domain(sim: &mut SimulationCore) {
    sim.grid.scale_all(sim.config.cool_factor, sim.config.heat_ceiling);
}

pub(super) fn heat_domain(sim: &mut SimulationCore) {
    sim.grid.scale_all(sim.config.heat_factor, sim.config.heat_ceiling);
}

pub(super) fn add_particle(
    sim: &mut SimulationCore,
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    temperature: f64,
    fluid_key: &str,
) -> Result<usize> {
    let fluid = sim
        .fluids
        .id_by_key(fluid_key)
        .ok_or_else(|| SimError::UnknownFluid(fluid_key.to_string()))?;

    let position = Vec2::new(x, y);
    let velocity = Vec2::new(vx, vy);
    if !(position.is_finite() && velocity.is_finite() && temperature.is_finite()) {
        return Err(SimError::InvalidParticle(format!(
            "non-finite state at ({x}, {y}), v=({vx}, {vy}), t={temperature}"
        )));
    }
    if !sim.config.contains(x, y) {
        let (max_x, max_y) = sim.config.max_coords();
        return Err(SimError::InvalidParticle(format!(
            "({x}, {y}) is outside [0, {max_x}] x [0, {max_y}]"
        )));
    }
    if sim.particles.len() >= sim.config.max_particles {
        return Err(SimError::InvalidParticle(format!(
            "population cap of {} reached",
            sim.config.max_particles
        )));
    }

    let mut p = Particle::new(position, velocity, temperature, fluid);
    p.refresh_color(&sim.fluids, sim.heat_display);
    sim.particles.push(p);
    Ok(sim.particles.len() - 1)
}

pub(super) fn set_anchored(sim: &mut SimulationCore, index: usize, anchored: bool) -> bool {
    match sim.particles.get_mut(index) {
        Some(p) => {
            p.anchored = anchored;
            if anchored {
                p.velocity = Vec2::ZERO;
            }
            true
        }
        None => false,
    }
}

pub(super) fn clear(sim: &mut SimulationCore) {
    sim.particles.clear();
    sim.grid.fill(sim.config.initial_temperature);
}
