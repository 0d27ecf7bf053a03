//! 2D particle emitter simulation for particle designer effects
//!
//! The crate consumes a fully loaded [`EmitterConfig`] plus two texture flags
//! and simulates the effect tick by tick. It performs no I/O and never
//! allocates after an emitter has been built.

pub mod blend;
pub mod config;
pub mod error;
pub mod particles;

// Re-export common types
pub use blend::{BlendFactor, BlendMode, BlendState, TextureInfo};
pub use config::{Color, EmitterConfig, EmitterType};
pub use error::{EmitterError, Result};
pub use particles::{
    EmitterEvent, EmitterObserver, EventQueue, FLOATS_PER_PARTICLE, Particle, ParticleEmitter,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
