//! Particle system runtime
//!
//! This module provides fixed-capacity particle emission and simulation for
//! particle designer effects. It implements the two emitter types (gravity
//! and radial) described by an [`EmitterConfig`](crate::EmitterConfig).
//!
//! # Architecture
//!
//! - `Particle`: Individual particle with position, direction, color, size, rotation
//! - `ParticlePool`: Fixed-capacity storage with swap-compaction removal
//! - `EmissionScheduler`: Decides how many particles are due each tick
//! - `Integration`: Per-particle physics for both emitter types
//! - `ParticleEmitter`: Runtime state for a single emitter
//! - `EmitterObserver`: Spawn/retire notifications for the renderer
//!
//! # Usage
//!
//! ```rust,ignore
//! use pex_emitter::{EventQueue, ParticleEmitter, TextureInfo};
//!
//! // Create emitter from a loaded configuration record
//! let queue = EventQueue::for_capacity(config.max_particles);
//! let mut emitter = ParticleEmitter::new(config, TextureInfo::new(true, false), queue)?;
//!
//! // Update each frame
//! emitter.advance(dt);
//! for event in emitter.observer_mut().drain() {
//!     // mirror spawns/retires onto sprites
//! }
//!
//! // Get particle data for GPU upload
//! let written = emitter.fill_instance_data(&mut buffer);
//! ```

mod emission;
mod emitter;
mod integrator;
mod observer;
mod particle;
mod pool;

pub use emission::{EmissionScheduler, ScheduleTick, create_particle, random_minus_one_to_one};
pub use emitter::ParticleEmitter;
pub use integrator::Integration;
pub use observer::{EmitterEvent, EmitterObserver, EventQueue};
pub use particle::Particle;
pub use pool::ParticlePool;

/// Floats per particle written by `ParticleEmitter::fill_instance_data`
/// - 0..2: position.xy
/// - 2: size
/// - 3: rotation (radians)
/// - 4..8: color.rgba
pub const FLOATS_PER_PARTICLE: usize = 8;
