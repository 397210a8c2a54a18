use tracing::{debug, warn};

use crate::domain::particle::Particle;
use crate::systems::physics::{apply_impulses, free_body_pass, integration_pass, interaction_pass};
use crate::systems::temperature::{apply_phase_changes, exchange_heat_pass};

use super::{PerfTimer, SimulationCore};

pub(super) fn step(sim: &mut SimulationCore) {
    let perf_on = sim.perf_enabled;
    sim.perf_stats.reset();
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };

    // Heat exchange stays serial: particles sharing a cell must see each
    // other's updates in index order.
    let t0 = perf_on.then(PerfTimer::start);
    exchange_heat_pass(&mut sim.particles, &sim.fluids, &mut sim.grid);
    if let Some(t) = t0 {
        sim.perf_stats.heat_exchange_ms = t.elapsed_ms();
    }

    let t0 = perf_on.then(PerfTimer::start);
    let phase_changes = apply_phase_changes(&mut sim.particles, &sim.fluids, sim.heat_display);
    if let Some(t) = t0 {
        sim.perf_stats.phase_ms = t.elapsed_ms();
    }

    let t0 = perf_on.then(PerfTimer::start);
    free_body_pass(&mut sim.particles, sim.gravity, sim.config.friction);
    if let Some(t) = t0 {
        sim.perf_stats.free_body_ms = t.elapsed_ms();
    }

    let t0 = perf_on.then(PerfTimer::start);
    let interactions = interaction_pass(&sim.particles, &sim.fluids, sim.config.seed, sim.tick);
    apply_impulses(&mut sim.particles, &interactions.impulses);
    let (spawned, dropped) = merge_spawns(sim, interactions.spawns);
    if let Some(t) = t0 {
        sim.perf_stats.interactions_ms = t.elapsed_ms();
    }

    let t0 = perf_on.then(PerfTimer::start);
    integration_pass(&mut sim.particles, &sim.integration);
    if let Some(t) = t0 {
        sim.perf_stats.integrate_ms = t.elapsed_ms();
    }

    let t0 = perf_on.then(PerfTimer::start);
    sim.grid.diffuse();
    if let Some(t) = t0 {
        sim.perf_stats.diffuse_ms = t.elapsed_ms();
    }

    sim.tick += 1;

    let stats = &mut sim.perf_stats;
    stats.particle_count = sim.particles.len() as u32;
    stats.phase_changes = phase_changes;
    stats.influenced_pairs = interactions.influenced_pairs.min(u32::MAX as u64) as u32;
    stats.spawned = spawned as u32;
    stats.spawns_dropped = dropped as u32;
    stats.grid_size = sim.grid.size() as u32;
    if perf_on {
        stats.total_heat = sim.grid.total_heat();
        if let Some(start) = step_start {
            stats.step_ms = start.elapsed_ms();
        }
    }

    debug!(
        tick = sim.tick,
        particles = sim.particles.len(),
        phase_changes,
        spawned,
        "step"
    );
}

/// Append pending spawns up to the population cap. Returns (added, dropped).
fn merge_spawns(sim: &mut SimulationCore, spawns: Vec<Particle>) -> (usize, usize) {
    let room = sim.config.max_particles.saturating_sub(sim.particles.len());
    let total = spawns.len();
    let added = total.min(room);
    sim.particles.extend(spawns.into_iter().take(added));

    let dropped = total - added;
    if dropped > 0 {
        sim.spawns_dropped_total += dropped as u64;
        warn!(
            tick = sim.tick,
            dropped,
            max_particles = sim.config.max_particles,
            "population cap reached, spawns dropped"
        );
    }
    (added, dropped)
}
