//! Command implementations

pub mod blend;
pub mod info;
pub mod simulate;
