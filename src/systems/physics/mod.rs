//! Particle physics - free-body update, stress interactions and integration
//!
//! Pass order within a tick:
//! 1. `free_body_pass` (gravity + friction, per particle)
//! 2. `interaction_pass` against a snapshot, then `apply_impulses`
//! 3. `integration_pass` (move + wall reflection)

mod forces;
mod integrate;
mod interactions;

pub use forces::{apply_free_body, free_body_pass};
pub use integrate::{integrate_particle, integration_pass, reflect_axis, Bounds, IntegrationParams};
pub use interactions::{
    apply_impulses, interact_pair, interaction_pass, spawn_position, stress, InteractionResult, PairAction,
};
