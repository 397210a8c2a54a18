use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::core::Vec2;
use crate::domain::config::{Placement, Region, SeedGroup, SimConfig};
use crate::domain::particle::Particle;
use crate::error::{Result, SimError};
use crate::spatial::TemperatureGrid;
use crate::systems::physics::{Bounds, IntegrationParams};

use super::perf_stats::PerfStats;
use super::{RenderBuffers, SimulationCore};

pub(super) fn create_simulation_core(config: SimConfig) -> Result<SimulationCore> {
    config.validate()?;
    let fluids = config.fluid_table()?;

    let grid = TemperatureGrid::new(
        config.width,
        config.height,
        config.coarseness,
        config.initial_temperature,
    );

    let mut sim = SimulationCore {
        fluids,
        grid,
        particles: Vec::new(),
        integration: IntegrationParams {
            bounds: Bounds::for_domain(config.width, config.height),
            restitution: config.restitution,
            max_speed: config.max_speed,
        },
        gravity: config.gravity,
        heat_display: config.heat_display,
        tick: 0,
        rng: StdRng::seed_from_u64(config.seed),
        spawns_dropped_total: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
        render: RenderBuffers::default(),
        config,
    };

    let groups = sim.config.seed_particles.clone();
    for group in &groups {
        seed_group(&mut sim, group)?;
    }

    info!(
        width = sim.config.width,
        height = sim.config.height,
        grid_cells = sim.grid.size(),
        fluids = sim.fluids.len(),
        particles = sim.particles.len(),
        "simulation created"
    );
    Ok(sim)
}

fn seed_group(sim: &mut SimulationCore, group: &SeedGroup) -> Result<()> {
    let fluid = sim
        .fluids
        .id_by_key(&group.fluid)
        .ok_or_else(|| SimError::UnknownFluid(group.fluid.clone()))?;

    let mut placed = Vec::new();
    match &group.placement {
        Placement::Points { points } => {
            for point in points {
                placed.push(Particle::new(
                    Vec2::new(point.x, point.y),
                    Vec2::new(point.vx, point.vy),
                    group.temperature,
                    fluid,
                ));
            }
        }
        Placement::Random { count, region } => {
            let (max_x, max_y) = sim.config.max_coords();
            let region = region.unwrap_or(Region {
                x: 0.0,
                y: 0.0,
                w: max_x,
                h: max_y,
            });
            for _ in 0..*count {
                let x = region.x + sim.rng.gen::<f64>() * region.w;
                let y = region.y + sim.rng.gen::<f64>() * region.h;
                placed.push(Particle::at_rest(x, y, group.temperature, fluid));
            }
        }
    }

    let room = sim.config.max_particles.saturating_sub(sim.particles.len());
    if placed.len() > room {
        warn!(fluid = %group.fluid, requested = placed.len(), room, "seed group truncated by population cap");
        placed.truncate(room);
    }

    for mut p in placed {
        if group.anchored {
            p = p.anchored();
        }
        p.refresh_color(&sim.fluids, sim.heat_display);
        sim.particles.push(p);
    }
    Ok(())
}
