//! Shared types for the landmark world simulator.
//!
//! # Invariants
//! - Types here are plain data; they carry no reference to live world state.
//! - Serialized shapes are the dataset contract: measurements are
//!   `[index, dx, dy]`, motions `[dx, dy]`, entries `[measurements, motion]`.

pub mod config;
pub mod types;

pub use config::{ConfigError, SimConfig, UNLIMITED_RANGE};
pub use types::{DatasetEntry, Measurement, Motion, WorldView, describe_robot};
