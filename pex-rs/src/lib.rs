//! pex-rs library
//!
//! This library provides the command implementations and effect/texture
//! loading helpers behind the pex-rs CLI.

pub mod cli;
pub mod commands;
pub mod utils;
