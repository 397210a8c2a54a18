//! Pairwise stress interactions
//!
//! Every particle looks at every other particle through an immutable
//! snapshot. Impulses and spawned particles are collected per source and
//! applied only after the whole pass, in source order, so results do not
//! depend on how the pass was scheduled across threads.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::Vec2;
use crate::domain::fluids::FluidTable;
use crate::domain::particle::Particle;

/// What a source particle does to one target
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PairAction {
    /// Out of range, coincident, or an anchored target
    Skip,
    /// New particle at this position
    Spawn(Vec2),
    /// Velocity change for the target
    Influence(Vec2),
}

/// Signed stretch of a pair: positive is tension, negative is compression
#[inline]
pub fn stress(distance: f64, natural_distance: f64) -> f64 {
    distance - natural_distance
}

/// Point at `natural_distance` from `from`, on the way to `to`
#[inline]
pub fn spawn_position(from: Vec2, to: Vec2, natural_distance: f64) -> Vec2 {
    from + (to - from).normalize() * natural_distance
}

/// Evaluate the ordered pair (source -> target).
///
/// `roll` is only drawn when a spawn is possible (positive tension and a
/// non-zero elasticity), so its closure is called at most once.
#[inline]
pub fn interact_pair<R: FnMut() -> f64>(
    fluids: &FluidTable,
    source: &Particle,
    target: &Particle,
    mut roll: R,
) -> PairAction {
    let offset = target.position - source.position;
    let distance = offset.length();
    if distance <= 0.0 || !distance.is_finite() {
        return PairAction::Skip;
    }

    let natural_distance = fluids.natural_distance(source.fluid, target.fluid);
    let stress = stress(distance, natural_distance);
    if stress > fluids.max_stress(source.fluid, target.fluid) {
        return PairAction::Skip;
    }

    let elasticity = fluids.fluid(source.fluid).elasticity;
    if stress > 0.0 && elasticity > 0.0 && roll() < elasticity * stress {
        return PairAction::Spawn(spawn_position(source.position, target.position, natural_distance));
    }

    if target.anchored {
        return PairAction::Skip;
    }

    // Pull together under tension, push apart under compression
    let direction = (source.position - target.position).normalize();
    PairAction::Influence(direction * (fluids.strength(source.fluid, target.fluid) * stress))
}

/// Result of one interaction pass, not yet applied
#[derive(Debug, Default)]
pub struct InteractionResult {
    /// Velocity change per particle, indexed like the input slice
    pub impulses: Vec<Vec2>,
    /// Particles to add after the pass, in source order
    pub spawns: Vec<Particle>,
    /// Pairs that exchanged a force
    pub influenced_pairs: u64,
}

#[derive(Default)]
struct SourceOutcome {
    impulses: Vec<(usize, Vec2)>,
    spawns: Vec<Particle>,
}

/// Per-source RNG stream derived from the run seed, tick and source index
#[inline]
fn source_rng(seed: u64, tick: u64, source: usize) -> StdRng {
    let mixed = seed
        ^ tick.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (source as u64).wrapping_add(1).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    StdRng::seed_from_u64(mixed)
}

fn interact_source(
    particles: &[Particle],
    fluids: &FluidTable,
    seed: u64,
    tick: u64,
    i: usize,
) -> SourceOutcome {
    let source = &particles[i];
    let mut rng: Option<StdRng> = None;
    let mut out = SourceOutcome::default();

    for (j, target) in particles.iter().enumerate() {
        if j == i {
            continue;
        }
        let action = interact_pair(fluids, source, target, || {
            rng.get_or_insert_with(|| source_rng(seed, tick, i)).gen::<f64>()
        });
        match action {
            PairAction::Skip => {}
            PairAction::Influence(impulse) => out.impulses.push((j, impulse)),
            PairAction::Spawn(position) => {
                let mut child = Particle::new(position, source.velocity, source.temperature, source.fluid);
                child.color = source.color;
                out.spawns.push(child);
            }
        }
    }
    out
}

/// Evaluate all ordered pairs against the current snapshot
pub fn interaction_pass(particles: &[Particle], fluids: &FluidTable, seed: u64, tick: u64) -> InteractionResult {
    let n = particles.len();

    #[cfg(feature = "parallel")]
    let outcomes: Vec<SourceOutcome> = (0..n)
        .into_par_iter()
        .map(|i| interact_source(particles, fluids, seed, tick, i))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<SourceOutcome> = (0..n)
        .map(|i| interact_source(particles, fluids, seed, tick, i))
        .collect();

    let mut result = InteractionResult {
        impulses: vec![Vec2::ZERO; n],
        spawns: Vec::new(),
        influenced_pairs: 0,
    };
    for outcome in outcomes {
        result.influenced_pairs += outcome.impulses.len() as u64;
        for (j, impulse) in outcome.impulses {
            result.impulses[j] += impulse;
        }
        result.spawns.extend(outcome.spawns);
    }
    result
}

/// Add accumulated impulses to particle velocities
pub fn apply_impulses(particles: &mut [Particle], impulses: &[Vec2]) {
    for (p, impulse) in particles.iter_mut().zip(impulses) {
        p.velocity += *impulse;
    }
}
