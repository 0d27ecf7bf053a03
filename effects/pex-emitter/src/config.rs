//! Emitter configuration record
//!
//! `EmitterConfig` holds every emission parameter of one effect exactly as the
//! design tool authored it. Angles are in degrees and times in seconds; the
//! emitter converts at spawn time. Decoding effect files into this record is
//! left to the caller (see the `serde-support` feature).

use glam::{Vec2, Vec4};

use crate::blend::BlendFactor;
use crate::error::{EmitterError, Result};

/// Physics model applied to every particle of an emitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub enum EmitterType {
    /// Linear motion under gravity plus radial/tangential acceleration
    #[default]
    Gravity,
    /// Orbit around the source position while the radius shrinks
    Radial,
}

impl EmitterType {
    /// Convert from the design tool's emitter type code
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Gravity),
            1 => Ok(Self::Radial),
            other => Err(EmitterError::UnknownEmitterType(other)),
        }
    }
}

impl TryFrom<u8> for EmitterType {
    type Error = EmitterError;

    fn try_from(value: u8) -> Result<Self> {
        Self::from_u8(value)
    }
}

impl From<EmitterType> for u8 {
    fn from(value: EmitterType) -> Self {
        match value {
            EmitterType::Gravity => 0,
            EmitterType::Radial => 1,
        }
    }
}

/// RGBA color with channels in 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Channels as `(r, g, b, a)`
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.red, self.green, self.blue, self.alpha)
    }
}

/// Complete set of emission parameters for one effect
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct EmitterConfig {
    /// Physics model
    pub emitter_type: EmitterType,

    /// Initial emitter origin
    pub source_position: Vec2,
    /// Per-axis spawn jitter around the origin
    pub source_position_variance: Vec2,

    /// Emission angle (degrees)
    pub angle: f32,
    pub angle_variance: f32,
    /// Initial speed along the emission angle
    pub speed: f32,
    pub speed_variance: f32,

    /// Acceleration away from the spawn anchor (gravity mode)
    pub radial_acceleration: f32,
    pub radial_accel_variance: f32,
    /// Acceleration perpendicular to the radial direction (gravity mode)
    pub tangential_acceleration: f32,
    pub tangential_accel_variance: f32,
    /// Constant acceleration (gravity mode)
    pub gravity: Vec2,

    /// Average particle lifespan (seconds)
    pub particle_lifespan: f32,
    pub particle_lifespan_variance: f32,

    pub start_color: Color,
    pub start_color_variance: Color,
    pub finish_color: Color,
    pub finish_color_variance: Color,

    pub start_particle_size: f32,
    pub start_particle_size_variance: f32,
    pub finish_particle_size: f32,
    pub finish_particle_size_variance: f32,

    /// Pool capacity, fixed for the emitter's life
    pub max_particles: usize,
    /// Emission duration in seconds, `-1` for an infinite emitter
    pub duration: f32,

    /// Spawn rotation (degrees)
    pub rotation_start: f32,
    pub rotation_start_variance: f32,
    /// Rotation at end of life (degrees)
    pub rotation_end: f32,
    pub rotation_end_variance: f32,

    /// Spawn orbit radius (radial mode)
    pub max_radius: f32,
    pub max_radius_variance: f32,
    /// Particles die once their orbit radius drops below this (radial mode)
    pub min_radius: f32,
    /// Authored radius speed. Kept for round-tripping; the shrink rate
    /// actually used is `max_radius / time_to_live`.
    pub radius_speed: f32,
    /// Orbit speed (degrees per second, radial mode)
    pub rotate_per_second: f32,
    pub rotate_per_second_variance: f32,

    pub blend_func_source: BlendFactor,
    pub blend_func_destination: BlendFactor,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            emitter_type: EmitterType::Gravity,
            source_position: Vec2::ZERO,
            source_position_variance: Vec2::ZERO,
            angle: 90.0,
            angle_variance: 0.0,
            speed: 100.0,
            speed_variance: 0.0,
            radial_acceleration: 0.0,
            radial_accel_variance: 0.0,
            tangential_acceleration: 0.0,
            tangential_accel_variance: 0.0,
            gravity: Vec2::ZERO,
            particle_lifespan: 1.0,
            particle_lifespan_variance: 0.0,
            start_color: Color::WHITE,
            start_color_variance: Color::TRANSPARENT,
            finish_color: Color::new(1.0, 1.0, 1.0, 0.0),
            finish_color_variance: Color::TRANSPARENT,
            start_particle_size: 32.0,
            start_particle_size_variance: 0.0,
            finish_particle_size: 32.0,
            finish_particle_size_variance: 0.0,
            max_particles: 100,
            duration: -1.0,
            rotation_start: 0.0,
            rotation_start_variance: 0.0,
            rotation_end: 0.0,
            rotation_end_variance: 0.0,
            max_radius: 100.0,
            max_radius_variance: 0.0,
            min_radius: 0.0,
            radius_speed: 0.0,
            rotate_per_second: 0.0,
            rotate_per_second_variance: 0.0,
            blend_func_source: BlendFactor::One,
            blend_func_destination: BlendFactor::OneMinusSrcAlpha,
        }
    }
}

impl EmitterConfig {
    /// Check the record before an emitter is built from it
    pub fn validate(&self) -> Result<()> {
        if self.max_particles == 0 {
            return Err(EmitterError::ZeroCapacity);
        }

        for (field, value) in self.scalar_fields() {
            if !value.is_finite() {
                return Err(EmitterError::NonFinite { field, value });
            }
        }

        let non_negative = [
            ("particleLifespan", self.particle_lifespan),
            ("particleLifespanVariance", self.particle_lifespan_variance),
            ("startParticleSize", self.start_particle_size),
            ("finishParticleSize", self.finish_particle_size),
            ("minRadius", self.min_radius),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(EmitterError::Negative { field, value });
            }
        }

        if self.duration < 0.0 && self.duration != -1.0 {
            return Err(EmitterError::InvalidDuration(self.duration));
        }

        Ok(())
    }

    /// Whether the emitter keeps emitting until stopped explicitly
    pub fn is_infinite(&self) -> bool {
        self.duration < 0.0
    }

    /// Particles per second that exhaust the pool over one average lifespan
    ///
    /// A zero lifespan yields a rate of zero, which suppresses emission.
    pub fn emission_rate(&self) -> f32 {
        if self.particle_lifespan > 0.0 {
            self.max_particles as f32 / self.particle_lifespan
        } else {
            0.0
        }
    }

    fn scalar_fields(&self) -> [(&'static str, f32); 47] {
        [
            ("sourcePosition.x", self.source_position.x),
            ("sourcePosition.y", self.source_position.y),
            ("sourcePositionVariance.x", self.source_position_variance.x),
            ("sourcePositionVariance.y", self.source_position_variance.y),
            ("angle", self.angle),
            ("angleVariance", self.angle_variance),
            ("speed", self.speed),
            ("speedVariance", self.speed_variance),
            ("radialAcceleration", self.radial_acceleration),
            ("radialAccelVariance", self.radial_accel_variance),
            ("tangentialAcceleration", self.tangential_acceleration),
            ("tangentialAccelVariance", self.tangential_accel_variance),
            ("gravity.x", self.gravity.x),
            ("gravity.y", self.gravity.y),
            ("particleLifespan", self.particle_lifespan),
            ("particleLifespanVariance", self.particle_lifespan_variance),
            ("startColor.red", self.start_color.red),
            ("startColor.green", self.start_color.green),
            ("startColor.blue", self.start_color.blue),
            ("startColor.alpha", self.start_color.alpha),
            ("startColorVariance.red", self.start_color_variance.red),
            ("startColorVariance.green", self.start_color_variance.green),
            ("startColorVariance.blue", self.start_color_variance.blue),
            ("startColorVariance.alpha", self.start_color_variance.alpha),
            ("finishColor.red", self.finish_color.red),
            ("finishColor.green", self.finish_color.green),
            ("finishColor.blue", self.finish_color.blue),
            ("finishColor.alpha", self.finish_color.alpha),
            ("finishColorVariance.red", self.finish_color_variance.red),
            ("finishColorVariance.green", self.finish_color_variance.green),
            ("finishColorVariance.blue", self.finish_color_variance.blue),
            ("finishColorVariance.alpha", self.finish_color_variance.alpha),
            ("startParticleSize", self.start_particle_size),
            ("startParticleSizeVariance", self.start_particle_size_variance),
            ("finishParticleSize", self.finish_particle_size),
            ("finishParticleSizeVariance", self.finish_particle_size_variance),
            ("duration", self.duration),
            ("rotationStart", self.rotation_start),
            ("rotationStartVariance", self.rotation_start_variance),
            ("rotationEnd", self.rotation_end),
            ("rotationEndVariance", self.rotation_end_variance),
            ("maxRadius", self.max_radius),
            ("maxRadiusVariance", self.max_radius_variance),
            ("minRadius", self.min_radius),
            ("radiusSpeed", self.radius_speed),
            ("rotatePerSecond", self.rotate_per_second),
            ("rotatePerSecondVariance", self.rotate_per_second_variance),
        ]
    }
}
