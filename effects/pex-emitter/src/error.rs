use thiserror::Error;

/// Error types for emitter configuration and construction
///
/// The simulation itself never fails: every error here is raised while a
/// configuration record is validated, before an emitter exists.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmitterError {
    /// The pool capacity must hold at least one particle
    #[error("Invalid capacity: maxParticles must be at least 1")]
    ZeroCapacity,

    /// A numeric field holds NaN or infinity
    #[error("Invalid value for '{field}': {value} is not finite")]
    NonFinite { field: &'static str, value: f32 },

    /// A field that must not be negative is negative
    #[error("Invalid value for '{field}': {value} must not be negative")]
    Negative { field: &'static str, value: f32 },

    /// The duration is negative but not the `-1` infinite marker
    #[error("Invalid duration: {0} (use -1 for an infinite emitter)")]
    InvalidDuration(f32),

    /// Blend factor code outside the GL enumeration
    #[error("Unknown blend factor code: {0}")]
    UnknownBlendFactor(u32),

    /// Emitter type code outside {0 = gravity, 1 = radial}
    #[error("Unknown emitter type code: {0}")]
    UnknownEmitterType(u8),
}

/// Result type using EmitterError
pub type Result<T> = std::result::Result<T, EmitterError>;
