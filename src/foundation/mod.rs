//! Crate-wide building blocks: error taxonomy and the deterministic RNG.

pub mod error;
pub mod rng;
