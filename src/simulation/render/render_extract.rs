use crate::systems::temperature::{color_for, shaded};

use super::SimulationCore;

pub(super) fn extract_particles(sim: &mut SimulationCore) -> usize {
    let n = sim.particles.len();
    let render = &mut sim.render;
    render.positions.clear();
    render.positions.reserve(n * 2);
    render.colors.clear();
    render.colors.reserve(n);

    for p in &sim.particles {
        render.positions.push(p.position.x as f32);
        render.positions.push(p.position.y as f32);
        render.colors.push(p.color);
    }
    n
}

/// Grid cells are drawn at half brightness behind the particles
pub(super) fn extract_grid_colors(sim: &mut SimulationCore) -> usize {
    let cells = sim.grid.cells();
    let out = &mut sim.render.grid_colors;
    out.resize(cells.len(), 0);
    for (dst, &t) in out.iter_mut().zip(cells) {
        *dst = shaded(color_for(t));
    }
    cells.len()
}
