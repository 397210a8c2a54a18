use super::perf_stats::PerfStats;
use super::SimulationCore;

pub(super) fn enable_perf_metrics(sim: &mut SimulationCore, enabled: bool) {
    sim.perf_enabled = enabled;
}

pub(super) fn get_perf_stats(sim: &SimulationCore) -> PerfStats {
    sim.perf_stats.clone()
}

pub(super) fn set_gravity(sim: &mut SimulationCore, gravity: f64) {
    if gravity.is_finite() {
        sim.gravity = gravity;
    }
}

pub(super) fn get_gravity(sim: &SimulationCore) -> f64 {
    sim.gravity
}
