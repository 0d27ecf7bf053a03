//! Individual particle representation

use glam::{Vec2, Vec4};

/// A single particle in the pool
///
/// Slots are plain values that get overwritten in place on spawn and on
/// swap-removal, so every field is reinitialised by the spawner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Particle {
    /// Current position
    pub position: Vec2,
    /// Velocity (gravity mode)
    pub direction: Vec2,
    /// Emitter origin at spawn time, the frame gravity-mode forces act in
    pub start_position: Vec2,
    /// Current color (RGBA)
    pub color: Vec4,
    /// Color change per second
    pub delta_color: Vec4,
    /// Current rotation in radians
    pub rotation: f32,
    /// Rotation change per second (radians)
    pub rotation_delta: f32,
    /// Acceleration away from `start_position`
    pub radial_acceleration: f32,
    /// Acceleration perpendicular to the radial direction
    pub tangential_acceleration: f32,
    /// Orbit radius (radial mode)
    pub radius: f32,
    /// Orbit radius shrink per second (radial mode)
    pub radius_delta: f32,
    /// Orbit angle in radians (radial mode)
    pub angle: f32,
    /// Orbit angle change per second (radial mode)
    pub angular_speed: f32,
    /// Current edge length, used for both width and height
    pub size: f32,
    /// Size change per second
    pub size_delta: f32,
    /// Remaining lifetime in seconds
    pub time_to_live: f32,
}

impl Particle {
    /// Check if the particle still has time to live
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.time_to_live > 0.0
    }

    /// Consume `dt` seconds of lifetime, returning whether the particle survives
    #[inline]
    pub fn age(&mut self, dt: f32) -> bool {
        self.time_to_live -= dt;
        self.is_alive()
    }

    /// Move color, size and rotation toward their end-of-life values
    pub fn update_appearance(&mut self, dt: f32) {
        self.color += self.delta_color * dt;
        self.size = (self.size + self.size_delta * dt).max(0.0);
        self.rotation += self.rotation_delta * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_age() {
        let mut p = Particle {
            time_to_live: 1.0,
            ..Default::default()
        };
        assert!(p.is_alive());
        assert!(p.age(0.5));
        assert!(!p.age(0.5));
        assert!(!p.is_alive());
    }

    #[test]
    fn test_default_particle_is_dead() {
        assert!(!Particle::default().is_alive());
    }

    #[test]
    fn test_size_never_negative() {
        let mut p = Particle {
            size: 1.0,
            size_delta: -10.0,
            ..Default::default()
        };
        p.update_appearance(0.5);
        assert_eq!(p.size, 0.0);
    }

    #[test]
    fn test_color_reaches_finish_color_at_end_of_life() {
        let start = Vec4::new(1.0, 0.0, 0.0, 1.0);
        let finish = Vec4::new(0.0, 1.0, 0.0, 1.0);
        let lifespan = 2.0;
        let mut p = Particle {
            color: start,
            delta_color: (finish - start) / lifespan,
            time_to_live: lifespan,
            ..Default::default()
        };

        for _ in 0..20 {
            p.update_appearance(0.1);
        }

        assert!(p.color.abs_diff_eq(finish, 1e-5), "color was {:?}", p.color);
    }

    #[test]
    fn test_rotation_accumulates() {
        let mut p = Particle {
            rotation: 0.0,
            rotation_delta: std::f32::consts::PI,
            ..Default::default()
        };
        p.update_appearance(0.5);
        assert!((p.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
