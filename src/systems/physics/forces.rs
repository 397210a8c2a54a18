#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::Vec2;
use crate::domain::particle::Particle;

/// Gravity then viscous damping: `v = (v + (0, gravity)) * friction`
#[inline(always)]
pub fn apply_free_body(particle: &mut Particle, gravity: f64, friction: f64) {
    particle.velocity = (particle.velocity + Vec2::new(0.0, gravity)) * friction;
}

pub fn free_body_pass(particles: &mut [Particle], gravity: f64, friction: f64) {
    #[cfg(feature = "parallel")]
    {
        particles
            .par_iter_mut()
            .for_each(|p| apply_free_body(p, gravity, friction));
    }
    #[cfg(not(feature = "parallel"))]
    {
        for p in particles.iter_mut() {
            apply_free_body(p, gravity, friction);
        }
    }
}
