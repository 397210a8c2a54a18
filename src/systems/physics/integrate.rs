#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::Vec2;
use crate::domain::particle::Particle;

/// Largest coordinate on each axis; positions live in `[0, max_x] x [0, max_y]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Domain of `width x height` units
    pub fn for_domain(width: u32, height: u32) -> Self {
        Self {
            max_x: (width.max(1) - 1) as f64,
            max_y: (height.max(1) - 1) as f64,
        }
    }
}

/// Integration constants shared by every particle in a pass
#[derive(Clone, Copy, Debug)]
pub struct IntegrationParams {
    pub bounds: Bounds,
    pub restitution: f64,
    pub max_speed: f64,
}

/// Fold a coordinate that crossed a boundary plane back into `[0, max]`.
///
/// At or below 0 the coordinate is mirrored about 0; at or above `max` it is
/// mirrored about `max`. Either way the velocity component flips sign and is
/// scaled by `restitution`. An overshoot larger than the domain is clamped
/// after the single fold, so the result always lies in `[0, max]`.
#[inline]
pub fn reflect_axis(coord: f64, vel: f64, max: f64, restitution: f64) -> (f64, f64) {
    let folded = if coord <= 0.0 {
        -coord
    } else if coord >= max {
        2.0 * max - coord
    } else {
        return (coord, vel);
    };
    (folded.clamp(0.0, max), -vel * restitution)
}

/// Advance one particle by its velocity and bounce it off the domain walls
#[inline]
pub fn integrate_particle(particle: &mut Particle, params: &IntegrationParams) {
    if particle.anchored {
        particle.velocity = Vec2::ZERO;
        return;
    }

    let velocity = particle.velocity.clamp_length(params.max_speed);
    let moved = particle.position + velocity;

    let (x, vx) = reflect_axis(moved.x, velocity.x, params.bounds.max_x, params.restitution);
    let (y, vy) = reflect_axis(moved.y, velocity.y, params.bounds.max_y, params.restitution);

    particle.position = Vec2::new(x, y);
    particle.velocity = Vec2::new(vx, vy);
}

pub fn integration_pass(particles: &mut [Particle], params: &IntegrationParams) {
    #[cfg(feature = "parallel")]
    {
        particles
            .par_iter_mut()
            .for_each(|p| integrate_particle(p, params));
    }
    #[cfg(not(feature = "parallel"))]
    {
        for p in particles.iter_mut() {
            integrate_particle(p, params);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fluids::FLUID_WATER;

    fn params() -> IntegrationParams {
        IntegrationParams {
            bounds: Bounds::for_domain(100, 100),
            restitution: 0.5,
            max_speed: 50.0,
        }
    }

    #[test]
    fn reflect_below_zero() {
        assert_eq!(reflect_axis(-5.0, -3.0, 99.0, 0.5), (5.0, 1.5));
    }

    #[test]
    fn reflect_above_max() {
        let (c, v) = reflect_axis(101.0, 4.0, 99.0, 0.5);
        assert_eq!(c, 97.0);
        assert_eq!(v, -2.0);
    }

    #[test]
    fn inside_is_untouched() {
        assert_eq!(reflect_axis(42.0, -7.0, 99.0, 0.5), (42.0, -7.0));
    }

    #[test]
    fn integration_reflects_only_the_crossing_axis() {
        let mut p = Particle::new(Vec2::new(50.0, -2.0), Vec2::new(1.0, -3.0), 273.0, FLUID_WATER);
        integrate_particle(&mut p, &params());
        assert_eq!(p.position, Vec2::new(51.0, 5.0));
        assert_eq!(p.velocity, Vec2::new(1.0, 1.5));
    }

    #[test]
    fn anchored_particles_stay_put() {
        let mut p = Particle::new(Vec2::new(10.0, 10.0), Vec2::new(4.0, 4.0), 273.0, FLUID_WATER);
        p.anchored = true;
        integrate_particle(&mut p, &params());
        assert_eq!(p.position, Vec2::new(10.0, 10.0));
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn speed_is_capped() {
        let mut p = Particle::new(Vec2::new(50.0, 50.0), Vec2::new(400.0, 0.0), 273.0, FLUID_WATER);
        let mut params = params();
        params.max_speed = 10.0;
        integrate_particle(&mut p, &params);
        assert_eq!(p.position, Vec2::new(60.0, 50.0));
        assert_eq!(p.velocity, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn overshoot_past_the_far_wall_is_clamped() {
        // 5000 folds to -4802, which is still outside
        assert_eq!(reflect_axis(5000.0, 2.0, 99.0, 0.5), (0.0, -1.0));
        assert_eq!(reflect_axis(-300.0, -4.0, 99.0, 0.5), (99.0, 2.0));
    }

    #[test]
    fn long_step_in_a_small_domain_lands_inside() {
        let params = IntegrationParams {
            bounds: Bounds::for_domain(20, 20),
            restitution: 0.5,
            max_speed: 50.0,
        };
        let mut p = Particle::new(Vec2::new(10.0, 4.5), Vec2::new(0.0, -45.0), 273.0, FLUID_WATER);
        integrate_particle(&mut p, &params);
        assert!((0.0..=19.0).contains(&p.position.y), "y = {}", p.position.y);
        assert_eq!(p.velocity.y, 22.5);
    }
}
