use serde::{Deserialize, Serialize};
use slamsim_common::{DatasetEntry, Motion, SimConfig};
use slamsim_kernel::WorldState;

use crate::{Dataset, RecordError};

/// Parameters for a random-walk data run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkParams {
    /// Number of poses in the run; the dataset holds `steps - 1` entries.
    pub steps: usize,
    pub num_landmarks: usize,
    /// Length of every commanded motion.
    pub distance: f64,
    /// Full walks to try before giving up on observing every landmark.
    pub max_attempts: usize,
    /// Fresh headings to try at a single step before giving up.
    pub max_move_retries: usize,
}

impl Default for WalkParams {
    fn default() -> Self {
        Self {
            steps: 20,
            num_landmarks: 5,
            distance: 20.0,
            max_attempts: 100,
            max_move_retries: 1000,
        }
    }
}

impl WalkParams {
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.steps == 0 {
            return Err(RecordError::InvalidParams("steps must be at least 1".into()));
        }
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(RecordError::InvalidParams(format!(
                "distance must be finite and non-negative, got {}",
                self.distance
            )));
        }
        if self.max_attempts == 0 {
            return Err(RecordError::InvalidParams(
                "max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Drive a robot on a random walk until every landmark has been observed.
///
/// The robot keeps a heading until a move is rejected at the world edge, then
/// draws new headings until one is accepted. Each entry logs the command that
/// was accepted. A walk that misses a landmark is discarded; the next attempt
/// starts over in a fresh world, robot at the center, with new landmarks.
/// Attempt `n` is seeded from `seed` by `n - 1` splitmix64 steps, so the
/// first attempt uses `seed` itself.
///
/// Returns the world of the successful attempt in its final state together
/// with the dataset.
pub fn generate_random_walk(
    config: SimConfig,
    params: &WalkParams,
    seed: u64,
) -> Result<(WorldState, Dataset), RecordError> {
    params.validate()?;
    config.validate()?;

    let _span = tracing::info_span!("random_walk", seed, steps = params.steps).entered();
    let mut attempt_seed = seed;
    for attempt in 1..=params.max_attempts {
        if attempt > 1 {
            attempt_seed = splitmix64(attempt_seed);
        }
        let mut world = WorldState::with_seed(config, attempt_seed)?;
        world.generate_landmarks(params.num_landmarks);

        let dataset = walk_once(&mut world, params)?;
        let seen = dataset.landmarks_seen(params.num_landmarks);
        let missing = seen.iter().filter(|s| !**s).count();
        if missing == 0 {
            tracing::debug!(attempt, entries = dataset.len(), "every landmark observed");
            return Ok((world, dataset));
        }
        tracing::debug!(attempt, missing, "landmarks not covered, restarting walk");
    }

    Err(RecordError::LandmarksNotCovered {
        attempts: params.max_attempts,
    })
}

fn walk_once(world: &mut WorldState, params: &WalkParams) -> Result<Dataset, RecordError> {
    let mut dataset = Dataset::new();
    let mut motion = heading_motion(world, params.distance);

    for step in 0..params.steps - 1 {
        let measurements = world.sense();
        let mut retries = 0;
        while !world.move_by(motion.dx, motion.dy) {
            if retries == params.max_move_retries {
                return Err(RecordError::Stuck { step, retries });
            }
            retries += 1;
            motion = heading_motion(world, params.distance);
        }
        dataset.push(DatasetEntry {
            measurements,
            motion,
        });
    }

    Ok(dataset)
}

/// Splitmix64 step used to derive per-attempt seeds.
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

fn heading_motion(world: &mut WorldState, distance: f64) -> Motion {
    let heading = world.noise_mut().heading();
    Motion::new(heading.cos() * distance, heading.sin() * distance)
}
