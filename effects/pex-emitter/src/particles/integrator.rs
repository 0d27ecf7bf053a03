//! Per-particle physics update

use glam::Vec2;

use super::particle::Particle;
use crate::config::EmitterType;

/// Emitter-wide values every particle update reads
#[derive(Debug, Clone, Copy)]
pub struct Integration {
    pub emitter_type: EmitterType,
    /// Current emitter origin (radial particles orbit it)
    pub source_position: Vec2,
    /// Constant acceleration (gravity mode)
    pub gravity: Vec2,
    /// Death radius (radial mode)
    pub min_radius: f32,
}

impl Integration {
    /// Age one particle by `dt` and integrate it if it survives
    ///
    /// Returns `false` when the particle's time ran out; it is left
    /// untouched and must be retired by the caller.
    pub fn step(&self, particle: &mut Particle, dt: f32) -> bool {
        if !particle.age(dt) {
            return false;
        }

        match self.emitter_type {
            EmitterType::Radial => self.update_radial(particle, dt),
            EmitterType::Gravity => self.update_gravity(particle, dt),
        }
        particle.update_appearance(dt);

        true
    }

    /// Orbit the source position on a shrinking radius
    ///
    /// Crossing `min_radius` only zeroes the time to live, so the particle is
    /// retired on the following tick.
    fn update_radial(&self, particle: &mut Particle, dt: f32) {
        particle.angle += particle.angular_speed * dt;
        particle.radius -= particle.radius_delta * dt;

        let (sin, cos) = particle.angle.sin_cos();
        particle.position = self.source_position - Vec2::new(cos, sin) * particle.radius;

        if particle.radius < self.min_radius {
            particle.time_to_live = 0.0;
        }
    }

    /// Accelerate relative to the particle's spawn anchor
    fn update_gravity(&self, particle: &mut Particle, dt: f32) {
        let offset = particle.start_position;
        let mut relative = particle.position - offset;

        let radial = if relative == Vec2::ZERO {
            Vec2::ZERO
        } else {
            relative.normalize()
        };
        let tangential = radial.perp() * particle.tangential_acceleration;
        let radial = radial * particle.radial_acceleration;

        particle.direction += (radial + tangential + self.gravity) * dt;
        relative += particle.direction * dt;
        particle.position = relative + offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gravity_integration(gravity: Vec2) -> Integration {
        Integration {
            emitter_type: EmitterType::Gravity,
            source_position: Vec2::ZERO,
            gravity,
            min_radius: 0.0,
        }
    }

    #[test]
    fn test_expired_particle_is_not_integrated() {
        let integration = gravity_integration(Vec2::new(0.0, -10.0));
        let mut p = Particle {
            time_to_live: 0.05,
            direction: Vec2::new(1.0, 0.0),
            ..Default::default()
        };

        assert!(!integration.step(&mut p, 0.1));
        assert_eq!(p.position, Vec2::ZERO);
        assert_eq!(p.direction, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_gravity_accelerates() {
        let integration = gravity_integration(Vec2::new(0.0, -10.0));
        let mut p = Particle {
            time_to_live: 10.0,
            direction: Vec2::new(5.0, 0.0),
            ..Default::default()
        };

        assert!(integration.step(&mut p, 1.0));
        assert!(p.direction.abs_diff_eq(Vec2::new(5.0, -10.0), 1e-5));
        assert!(p.position.abs_diff_eq(Vec2::new(5.0, -10.0), 1e-5));
    }

    #[test]
    fn test_radial_acceleration_pushes_away_from_anchor() {
        let integration = gravity_integration(Vec2::ZERO);
        let mut p = Particle {
            time_to_live: 10.0,
            position: Vec2::new(13.0, 10.0),
            start_position: Vec2::new(10.0, 10.0),
            radial_acceleration: 2.0,
            ..Default::default()
        };

        integration.step(&mut p, 1.0);
        assert!(p.direction.abs_diff_eq(Vec2::new(2.0, 0.0), 1e-5));
        assert!(p.position.abs_diff_eq(Vec2::new(15.0, 10.0), 1e-5));
    }

    #[test]
    fn test_tangential_acceleration_is_perpendicular() {
        let integration = gravity_integration(Vec2::ZERO);
        let mut p = Particle {
            time_to_live: 10.0,
            position: Vec2::new(1.0, 0.0),
            tangential_acceleration: 3.0,
            ..Default::default()
        };

        integration.step(&mut p, 1.0);
        assert!(p.direction.abs_diff_eq(Vec2::new(0.0, 3.0), 1e-5));
    }

    #[test]
    fn test_particle_at_anchor_has_no_radial_force() {
        let integration = gravity_integration(Vec2::ZERO);
        let mut p = Particle {
            time_to_live: 10.0,
            radial_acceleration: 100.0,
            tangential_acceleration: 100.0,
            ..Default::default()
        };

        integration.step(&mut p, 0.5);
        assert_eq!(p.direction, Vec2::ZERO);
        assert_eq!(p.position, Vec2::ZERO);
    }

    #[test]
    fn test_radial_orbit_position() {
        let integration = Integration {
            emitter_type: EmitterType::Radial,
            source_position: Vec2::new(100.0, 100.0),
            gravity: Vec2::ZERO,
            min_radius: 0.0,
        };
        let mut p = Particle {
            time_to_live: 10.0,
            radius: 50.0,
            radius_delta: 0.0,
            angle: 0.0,
            angular_speed: std::f32::consts::FRAC_PI_2,
            ..Default::default()
        };

        integration.step(&mut p, 1.0);
        assert!(p.position.abs_diff_eq(Vec2::new(100.0, 50.0), 1e-3));
    }

    #[test]
    fn test_radial_death_is_delayed_one_tick() {
        let integration = Integration {
            emitter_type: EmitterType::Radial,
            source_position: Vec2::ZERO,
            gravity: Vec2::ZERO,
            min_radius: 10.0,
        };
        let lifespan = 2.0;
        let mut p = Particle {
            time_to_live: lifespan,
            radius: 100.0,
            radius_delta: 100.0 / lifespan,
            ..Default::default()
        };
        let dt = 0.13;

        let mut previous = p.radius;
        let mut ticks = 0;
        while p.radius >= 10.0 {
            assert!(integration.step(&mut p, dt));
            assert!(p.radius < previous);
            assert!((previous - p.radius - 6.5).abs() < 1e-3);
            previous = p.radius;
            ticks += 1;
        }

        // 100 - 14 * 6.5 = 9.0
        assert_eq!(ticks, 14);
        assert_eq!(p.time_to_live, 0.0);
        assert!(!integration.step(&mut p, dt));
    }
}
