//! World Kernel: authoritative robot world state, noisy motion, range-limited sensing.
//!
//! # Invariants
//! - Robot position stays inside `[0, world_size]` after every accepted move.
//! - Rejected moves leave the world exactly as it was.
//! - Every random draw comes from the world's own seeded noise source.

pub mod noise;
pub mod world;

pub use noise::NoiseSource;
pub use world::{WorldEvent, WorldState};
