//! Particle emitter runtime state

use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::FLOATS_PER_PARTICLE;
use super::emission::{EmissionScheduler, create_particle};
use super::integrator::Integration;
use super::observer::EmitterObserver;
use super::particle::Particle;
use super::pool::ParticlePool;
use crate::blend::{BlendState, TextureInfo};
use crate::config::{EmitterConfig, EmitterType};
use crate::error::Result;

/// Runtime particle emitter
///
/// Owns a fixed-capacity pool, the emission schedule and the observer that
/// mirrors pool mutations. Nothing is allocated after construction.
#[derive(Debug)]
pub struct ParticleEmitter<O: EmitterObserver = ()> {
    /// Emission parameters, never mutated after construction
    config: EmitterConfig,
    /// Blend state resolved from the configured factors and the texture
    blend: BlendState,
    /// Live particles
    pool: ParticlePool,
    /// Spawn timing and duration tracking
    scheduler: EmissionScheduler,
    /// Current emitter origin
    source_position: Vec2,
    /// Random number generator
    rng: StdRng,
    /// Receives spawn/retire notifications
    observer: O,
}

impl<O: EmitterObserver> ParticleEmitter<O> {
    /// Create an emitter from a loaded configuration record
    ///
    /// `texture` describes the particle texture as decoded by the caller. The
    /// emitter starts active with an empty pool.
    pub fn new(config: EmitterConfig, texture: TextureInfo, observer: O) -> Result<Self> {
        Self::with_rng(config, texture, observer, StdRng::from_os_rng())
    }

    /// Create an emitter whose random draws are reproducible
    pub fn with_seed(
        config: EmitterConfig,
        texture: TextureInfo,
        observer: O,
        seed: u64,
    ) -> Result<Self> {
        Self::with_rng(config, texture, observer, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        config: EmitterConfig,
        texture: TextureInfo,
        observer: O,
        rng: StdRng,
    ) -> Result<Self> {
        config.validate()?;

        let blend = BlendState::resolve(
            config.blend_func_source,
            config.blend_func_destination,
            texture,
        );

        let mut emitter = Self {
            pool: ParticlePool::new(config.max_particles),
            scheduler: EmissionScheduler::new(config.duration),
            source_position: config.source_position,
            blend,
            rng,
            observer,
            config,
        };
        emitter.reset();

        log::debug!(
            "Created {:?} emitter: capacity {}, {:.2} particles/s, blend {} ({} -> {})",
            emitter.config.emitter_type,
            emitter.capacity(),
            emitter.emission_rate(),
            emitter.blend.mode,
            emitter.blend.source,
            emitter.blend.destination
        );

        Ok(emitter)
    }

    /// Get the configuration record
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Get the physics model
    pub fn emitter_type(&self) -> EmitterType {
        self.config.emitter_type
    }

    /// Get the resolved blend state
    pub fn blend(&self) -> &BlendState {
        &self.blend
    }

    /// Get the current number of live particles
    pub fn particle_count(&self) -> usize {
        self.pool.len()
    }

    /// Get the maximum number of particles
    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Whether new particles are being emitted
    pub fn is_active(&self) -> bool {
        self.scheduler.is_active()
    }

    /// Seconds since the emitter was last reset or stopped
    pub fn elapsed_time(&self) -> f32 {
        self.scheduler.elapsed_time()
    }

    /// Particles emitted per second while active
    pub fn emission_rate(&self) -> f32 {
        self.scheduler.emission_rate()
    }

    /// Current emitter origin
    pub fn source_position(&self) -> Vec2 {
        self.source_position
    }

    /// Move the emitter origin
    ///
    /// Gravity-mode particles keep moving relative to where they spawned;
    /// radial-mode particles orbit the new origin from the next tick on.
    pub fn set_source_position(&mut self, position: Vec2) {
        self.source_position = position;
    }

    /// Live particles, indexed like the observer notifications
    pub fn particles(&self) -> &[Particle] {
        self.pool.live()
    }

    /// Live particle at `index`
    pub fn particle(&self, index: usize) -> Option<&Particle> {
        self.pool.get(index)
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consume the emitter and return its observer
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Advance the simulation by `dt` seconds
    ///
    /// Spawns whatever the schedule says is due, then ages and integrates
    /// every live particle exactly once. A dead particle is swapped out with
    /// the last live one and the cursor stays put, so the swapped-in particle
    /// is processed next.
    pub fn advance(&mut self, dt: f32) {
        debug_assert!(dt >= 0.0, "negative time step {dt}");
        if dt.is_nan() || dt < 0.0 {
            return;
        }

        let tick = self
            .scheduler
            .tick(dt, self.pool.len(), self.pool.capacity());
        for _ in 0..tick.spawn {
            if !self.spawn_particle() {
                break;
            }
        }
        if tick.expired {
            log::debug!(
                "Emitter duration {:.2}s elapsed, stopping emission with {} particles live",
                self.config.duration,
                self.pool.len()
            );
        }

        let integration = Integration {
            emitter_type: self.config.emitter_type,
            source_position: self.source_position,
            gravity: self.config.gravity,
            min_radius: self.config.min_radius,
        };

        let mut index = 0;
        while index < self.pool.len() {
            let alive = match self.pool.get_mut(index) {
                Some(particle) => integration.step(particle, dt),
                None => break,
            };

            if alive {
                index += 1;
            } else {
                self.retire_particle(index);
            }
        }
    }

    /// Restart the emitter from scratch
    ///
    /// Reactivates emission, zeroes the elapsed time, restores the configured
    /// source position and retires every live particle.
    pub fn reset(&mut self) {
        self.scheduler.stop();
        self.source_position = self.config.source_position;

        while !self.pool.is_empty() {
            let last = self.pool.len() - 1;
            self.retire_particle(last);
        }

        self.scheduler.reset(self.config.emission_rate());
        log::trace!("Emitter reset, {:.2} particles/s", self.emission_rate());
    }

    /// Resume emission, keeping live particles and the source position
    pub fn start(&mut self) {
        self.scheduler.start();
    }

    /// Stop emitting; live particles keep aging until they die
    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    /// Spawn up to `count` particles immediately, independent of the schedule
    ///
    /// Returns how many were spawned; a full pool silently caps the burst.
    pub fn emit(&mut self, count: usize) -> usize {
        let mut spawned = 0;
        while spawned < count && self.spawn_particle() {
            spawned += 1;
        }
        spawned
    }

    /// Pack live particles for upload into a caller-owned buffer
    ///
    /// Each particle takes `FLOATS_PER_PARTICLE` floats:
    /// `x, y, size, rotation, r, g, b, a`. Returns the number of particles
    /// written, which is limited by the buffer length.
    pub fn fill_instance_data(&self, out: &mut [f32]) -> usize {
        let mut written = 0;
        for (chunk, particle) in out
            .chunks_exact_mut(FLOATS_PER_PARTICLE)
            .zip(self.pool.live())
        {
            chunk[0] = particle.position.x;
            chunk[1] = particle.position.y;
            chunk[2] = particle.size;
            chunk[3] = particle.rotation;
            chunk[4] = particle.color.x;
            chunk[5] = particle.color.y;
            chunk[6] = particle.color.z;
            chunk[7] = particle.color.w;
            written += 1;
        }
        written
    }

    /// Claim a slot, initialise it and notify the observer
    fn spawn_particle(&mut self) -> bool {
        let Some(index) = self.pool.spawn() else {
            return false;
        };

        let particle = create_particle(&self.config, self.source_position, &mut self.rng);
        if let Some(slot) = self.pool.get_mut(index) {
            *slot = particle;
        }
        self.observer.particle_spawned(index);
        true
    }

    /// Swap-remove the particle at `index` and notify the observer
    fn retire_particle(&mut self, index: usize) {
        if self.pool.retire(index) {
            self.observer.particle_retired(index);
        }
    }
}
