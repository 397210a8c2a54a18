#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::fluids::FluidTable;
use crate::domain::particle::Particle;

/// Refresh display colours, then move each particle to the fluid its
/// temperature calls for. Returns the number of particles that changed phase.
///
/// Colour is refreshed before the phase check, so a particle that boils this
/// tick still shows its old fluid colour until the next one.
pub fn apply_phase_changes(particles: &mut [Particle], fluids: &FluidTable, heat_display: bool) -> u32 {
    let update = |p: &mut Particle| -> u32 {
        p.refresh_color(fluids, heat_display);
        p.update_phase(fluids) as u32
    };

    #[cfg(feature = "parallel")]
    {
        particles.par_iter_mut().map(update).sum()
    }
    #[cfg(not(feature = "parallel"))]
    {
        particles.iter_mut().map(update).sum()
    }
}
