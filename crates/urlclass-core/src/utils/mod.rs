//! Small helpers shared across modules.

pub mod chunk;

pub use chunk::split;
