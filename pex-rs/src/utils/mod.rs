//! Shared utilities for the pex-rs CLI

pub mod effect;
pub mod format;
pub mod table;
pub mod texture;

pub use effect::*;
pub use format::*;
pub use table::*;
pub use texture::*;
