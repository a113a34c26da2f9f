//! Dataset recording: time-stepped (measurements, motion) pairs.
//!
//! # Invariants
//! - Each step senses before it moves; measurements describe the pose the
//!   motion starts from.
//! - Entries log the commanded motion, never the noisy realized one.
//! - Datasets are append-only and in-memory.

mod recorder;
mod walk;

pub use recorder::{Dataset, Recorder};
pub use walk::{WalkParams, generate_random_walk};

use slamsim_common::ConfigError;

/// Errors from dataset generation.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid walk parameters: {0}")]
    InvalidParams(String),
    #[error("not every landmark was observed after {attempts} attempts")]
    LandmarksNotCovered { attempts: usize },
    #[error("no in-bounds heading found at step {step} after {retries} retries")]
    Stuck { step: usize, retries: usize },
}
