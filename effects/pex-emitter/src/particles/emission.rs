//! Emission schedule and particle initialisation

use glam::{Vec2, Vec4};
use rand::Rng;

use super::particle::Particle;
use crate::config::{Color, EmitterConfig};

/// Slack when counting whole emission intervals, so accumulated rounding in
/// `emit_counter` does not cost a particle
const EMISSION_EPSILON: f32 = 1e-4;

/// Outcome of one scheduler tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleTick {
    /// Particles to spawn this tick
    pub spawn: usize,
    /// The emitter's duration ran out during this tick
    pub expired: bool,
}

/// Time accumulator deciding how many particles are due
#[derive(Debug, Clone)]
pub struct EmissionScheduler {
    active: bool,
    elapsed_time: f32,
    emit_counter: f32,
    emission_rate: f32,
    duration: f32,
}

impl EmissionScheduler {
    /// Create an inactive scheduler; `duration < 0` means emit forever
    pub fn new(duration: f32) -> Self {
        Self {
            active: false,
            elapsed_time: 0.0,
            emit_counter: 0.0,
            emission_rate: 0.0,
            duration,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Seconds since the emitter was (re)started
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    /// Particles per second
    pub fn emission_rate(&self) -> f32 {
        self.emission_rate
    }

    /// Fractional particles carried over to the next tick, in seconds
    pub fn emit_counter(&self) -> f32 {
        self.emit_counter
    }

    /// Restart the schedule from zero with a new rate
    pub fn reset(&mut self, emission_rate: f32) {
        self.active = true;
        self.elapsed_time = 0.0;
        self.emit_counter = 0.0;
        self.emission_rate = emission_rate;
    }

    /// Resume emission without touching accumulated state
    pub fn start(&mut self) {
        self.active = true;
    }

    /// Stop emission; live particles are not affected
    pub fn stop(&mut self) {
        self.active = false;
        self.elapsed_time = 0.0;
        self.emit_counter = 0.0;
    }

    /// Advance the schedule by `dt` seconds
    ///
    /// `live` and `capacity` describe the pool before this tick's spawns; the
    /// returned spawn count never exceeds the free slots.
    pub fn tick(&mut self, dt: f32, live: usize, capacity: usize) -> ScheduleTick {
        if !self.active {
            return ScheduleTick::default();
        }

        let mut spawn = 0;
        let free = capacity.saturating_sub(live);
        if self.emission_rate > 0.0 && free > 0 {
            self.emit_counter += dt;

            let due = (self.emit_counter * self.emission_rate + EMISSION_EPSILON).floor();
            spawn = (due.max(0.0) as usize).min(free);

            let interval = 1.0 / self.emission_rate;
            self.emit_counter = (self.emit_counter - spawn as f32 * interval).max(0.0);
        }

        self.elapsed_time += dt;

        let expired = self.duration >= 0.0 && self.elapsed_time > self.duration;
        if expired {
            self.stop();
        }

        ScheduleTick { spawn, expired }
    }
}

/// Uniform draw over `[-1, 1]`
#[inline]
pub fn random_minus_one_to_one<R: Rng>(rng: &mut R) -> f32 {
    rng.random_range(-1.0..=1.0)
}

/// Build a freshly spawned particle at `source_position`
pub fn create_particle<R: Rng>(
    config: &EmitterConfig,
    source_position: Vec2,
    rng: &mut R,
) -> Particle {
    let time_to_live = (config.particle_lifespan
        + config.particle_lifespan_variance * random_minus_one_to_one(rng))
    .max(0.0);

    let jitter = Vec2::new(random_minus_one_to_one(rng), random_minus_one_to_one(rng));
    let position = source_position + config.source_position_variance * jitter;

    let angle = (config.angle + config.angle_variance * random_minus_one_to_one(rng)).to_radians();
    let speed = config.speed + config.speed_variance * random_minus_one_to_one(rng);
    let direction = Vec2::from_angle(angle) * speed;

    let radius = config.max_radius + config.max_radius_variance * random_minus_one_to_one(rng);
    let angular_speed = (config.rotate_per_second
        + config.rotate_per_second_variance * random_minus_one_to_one(rng))
    .to_radians();

    let radial_acceleration = config.radial_acceleration
        + config.radial_accel_variance * random_minus_one_to_one(rng);
    let tangential_acceleration = config.tangential_acceleration
        + config.tangential_accel_variance * random_minus_one_to_one(rng);

    let start_size = (config.start_particle_size
        + config.start_particle_size_variance * random_minus_one_to_one(rng))
    .max(0.0);
    let finish_size = (config.finish_particle_size
        + config.finish_particle_size_variance * random_minus_one_to_one(rng))
    .max(0.0);

    let start_color = vary_color(config.start_color, config.start_color_variance, rng);
    let finish_color = vary_color(config.finish_color, config.finish_color_variance, rng);

    let start_rotation = (config.rotation_start
        + config.rotation_start_variance * random_minus_one_to_one(rng))
    .to_radians();
    let end_rotation = (config.rotation_end
        + config.rotation_end_variance * random_minus_one_to_one(rng))
    .to_radians();

    Particle {
        position,
        direction,
        start_position: source_position,
        color: start_color,
        delta_color: (finish_color - start_color) * per_second(time_to_live),
        rotation: start_rotation,
        rotation_delta: (end_rotation - start_rotation) * per_second(time_to_live),
        radial_acceleration,
        tangential_acceleration,
        radius,
        radius_delta: config.max_radius * per_second(time_to_live),
        angle,
        angular_speed,
        size: start_size,
        size_delta: (finish_size - start_size) * per_second(time_to_live),
        time_to_live,
    }
}

/// `1 / time_to_live`, or zero for particles that die on their first tick
#[inline]
fn per_second(time_to_live: f32) -> f32 {
    if time_to_live > 0.0 {
        1.0 / time_to_live
    } else {
        0.0
    }
}

fn vary_color<R: Rng>(base: Color, variance: Color, rng: &mut R) -> Vec4 {
    let draw = Vec4::new(
        random_minus_one_to_one(rng),
        random_minus_one_to_one(rng),
        random_minus_one_to_one(rng),
        random_minus_one_to_one(rng),
    );
    base.to_vec4() + variance.to_vec4() * draw
}
