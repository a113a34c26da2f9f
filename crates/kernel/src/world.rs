use glam::DVec2;
use serde::{Deserialize, Serialize};
use slamsim_common::{ConfigError, Measurement, SimConfig, WorldView, describe_robot};

use crate::noise::NoiseSource;

/// An event record produced by every mutation to the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// The landmark set was replaced. Indices from earlier generations are void.
    LandmarksGenerated { generation: u64, count: usize },
    /// The robot moved.
    Moved { from: DVec2, to: DVec2 },
    /// A move was refused because the noisy destination left the world.
    MoveRejected { at: DVec2, candidate: DVec2 },
}

/// The authoritative state of one simulated robot world.
///
/// All mutations go through explicit operations. Position stays inside
/// `[0, world_size]` on both axes; every noise draw comes from the world's
/// own seeded [`NoiseSource`], so the same seed and the same sequence of
/// calls produce identical results.
#[derive(Debug, Clone)]
pub struct WorldState {
    config: SimConfig,
    position: DVec2,
    landmarks: Vec<DVec2>,
    /// Bumped whenever the landmark set is replaced.
    generation: u64,
    noise: NoiseSource,
    /// Append-only event log of all mutations.
    event_log: Vec<WorldEvent>,
}

impl WorldState {
    /// Create a world with seed 0.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        Self::with_seed(config, 0)
    }

    /// Create a world with a specific seed for reproducible runs.
    ///
    /// The robot starts at the exact center and the landmark set is empty.
    pub fn with_seed(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let half = config.world_size / 2.0;
        Ok(Self {
            config,
            position: DVec2::new(half, half),
            landmarks: Vec::new(),
            generation: 0,
            noise: NoiseSource::new(seed),
            event_log: Vec::new(),
        })
    }

    /// Side length of the square world.
    pub fn world_size(&self) -> f64 {
        self.config.world_size
    }

    /// Current robot position.
    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Landmarks of the current generation, in identity order.
    pub fn landmarks(&self) -> &[DVec2] {
        &self.landmarks
    }

    /// Number of landmarks in the current generation.
    pub fn landmark_count(&self) -> usize {
        self.landmarks.len()
    }

    /// Number of times the landmark set has been replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Access the noise source, e.g. for drivers that draw headings from the
    /// same reproducible stream.
    pub fn noise_mut(&mut self) -> &mut NoiseSource {
        &mut self.noise
    }

    /// Attempt to move by `(dx, dy)` plus uniform motion noise on each axis.
    ///
    /// Returns `false` and leaves the position untouched when the noisy
    /// destination falls outside `[0, world_size]` on either axis. There is
    /// no clamping and no partial motion.
    pub fn move_by(&mut self, dx: f64, dy: f64) -> bool {
        let scale = self.config.motion_noise;
        let nx = self.noise.scaled(scale);
        let ny = self.noise.scaled(scale);
        let candidate = self.position + DVec2::new(dx + nx, dy + ny);

        let bounds = 0.0..=self.config.world_size;
        if !bounds.contains(&candidate.x) || !bounds.contains(&candidate.y) {
            tracing::debug!(
                x = candidate.x,
                y = candidate.y,
                "move rejected: destination outside world"
            );
            self.event_log.push(WorldEvent::MoveRejected {
                at: self.position,
                candidate,
            });
            return false;
        }

        self.event_log.push(WorldEvent::Moved {
            from: self.position,
            to: candidate,
        });
        self.position = candidate;
        true
    }

    /// Observe every landmark in range, with noise, in landmark index order.
    ///
    /// A landmark must be in range by its true distance, and again by its
    /// noisy measured distance, to be reported. Only the noise source
    /// advances; position and landmarks are untouched.
    pub fn sense(&mut self) -> Vec<Measurement> {
        let limited = !self.config.unlimited_range();
        let range = self.config.measurement_range;
        let scale = self.config.measurement_noise;

        let mut measurements = Vec::new();
        for (index, landmark) in self.landmarks.iter().enumerate() {
            let offset = *landmark - self.position;
            if limited && offset.length() > range {
                continue;
            }
            let nx = self.noise.scaled(scale);
            let ny = self.noise.scaled(scale);
            let measured = offset + DVec2::new(nx, ny);
            if limited && measured.length() > range {
                continue;
            }
            measurements.push(Measurement::new(index, measured.x, measured.y));
        }

        tracing::trace!(
            observed = measurements.len(),
            total = self.landmarks.len(),
            "sensed"
        );
        measurements
    }

    /// Replace the landmark set with `count` random lattice points in the world.
    ///
    /// Each coordinate is uniform over `[0, world_size]` rounded to the
    /// nearest integer.
    pub fn generate_landmarks(&mut self, count: usize) {
        let size = self.config.world_size;
        let landmarks = (0..count)
            .map(|_| {
                let x = (self.noise.uniform() * size).round();
                let y = (self.noise.uniform() * size).round();
                DVec2::new(x, y)
            })
            .collect();
        self.replace_landmarks(landmarks);
    }

    /// Replace the landmark set with explicit positions (scripted scenarios).
    pub fn place_landmarks(&mut self, landmarks: impl IntoIterator<Item = DVec2>) {
        self.replace_landmarks(landmarks.into_iter().collect());
    }

    fn replace_landmarks(&mut self, landmarks: Vec<DVec2>) {
        self.landmarks = landmarks;
        self.generation += 1;
        tracing::debug!(
            generation = self.generation,
            count = self.landmarks.len(),
            "landmarks replaced"
        );
        self.event_log.push(WorldEvent::LandmarksGenerated {
            generation: self.generation,
            count: self.landmarks.len(),
        });
    }

    /// Owned snapshot of position, bounds and landmarks for renderers.
    pub fn view(&self) -> WorldView {
        WorldView {
            world_size: self.config.world_size,
            position: self.position.to_array(),
            landmarks: self.landmarks.iter().map(|l| l.to_array()).collect(),
        }
    }

    /// Human-readable one-line description of the robot.
    pub fn describe(&self) -> String {
        describe_robot(self.position.to_array())
    }

    /// Compute a deterministic hash of position and landmarks for comparison.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.generation.to_le_bytes());
        mix(&mut h, &self.position.x.to_le_bytes());
        mix(&mut h, &self.position.y.to_le_bytes());
        for l in &self.landmarks {
            mix(&mut h, &l.x.to_le_bytes());
            mix(&mut h, &l.y.to_le_bytes());
        }
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slamsim_common::UNLIMITED_RANGE;

    fn small_noiseless(range: f64) -> WorldState {
        WorldState::new(SimConfig::noiseless(10.0, range)).unwrap()
    }

    #[test]
    fn world_starts_centered_and_empty() {
        let w = WorldState::new(SimConfig::default()).unwrap();
        assert_eq!(w.position(), DVec2::new(50.0, 50.0));
        assert_eq!(w.landmark_count(), 0);
        assert_eq!(w.generation(), 0);
        assert!(w.events().is_empty());
    }

    #[test]
    fn invalid_config_fails_fast() {
        let config = SimConfig {
            world_size: -1.0,
            ..SimConfig::default()
        };
        assert!(WorldState::new(config).is_err());
    }

    #[test]
    fn sense_landmark_at_robot() {
        let mut w = small_noiseless(5.0);
        w.place_landmarks([DVec2::new(5.0, 5.0)]);
        assert_eq!(w.sense(), vec![Measurement::new(0, 0.0, 0.0)]);
    }

    #[test]
    fn sense_far_landmark_is_empty() {
        let mut w = small_noiseless(5.0);
        w.place_landmarks([DVec2::new(20.0, 20.0)]);
        assert!(w.sense().is_empty());
    }

    #[test]
    fn noiseless_move_succeeds() {
        let mut w = small_noiseless(5.0);
        assert!(w.move_by(1.0, 2.0));
        assert_eq!(w.position(), DVec2::new(6.0, 7.0));
    }

    #[test]
    fn out_of_bounds_move_rejected() {
        let mut w = small_noiseless(5.0);
        assert!(!w.move_by(10.0, 10.0));
        assert_eq!(w.position(), DVec2::new(5.0, 5.0));
        assert_eq!(
            w.events(),
            &[WorldEvent::MoveRejected {
                at: DVec2::new(5.0, 5.0),
                candidate: DVec2::new(15.0, 15.0),
            }]
        );
    }

    #[test]
    fn move_to_exact_edge_is_accepted() {
        let mut w = small_noiseless(5.0);
        assert!(w.move_by(5.0, -5.0));
        assert_eq!(w.position(), DVec2::new(10.0, 0.0));
    }

    #[test]
    fn noisy_moves_never_leave_world() {
        let config = SimConfig {
            world_size: 10.0,
            motion_noise: 2.0,
            ..SimConfig::default()
        };
        let mut w = WorldState::with_seed(config, 5).unwrap();
        for i in 0..2000 {
            let before = w.position();
            let step = if i % 2 == 0 { 3.0 } else { -2.5 };
            let moved = w.move_by(step, -step);
            let p = w.position();
            assert!((0.0..=10.0).contains(&p.x) && (0.0..=10.0).contains(&p.y));
            if !moved {
                assert_eq!(p, before);
            }
        }
    }

    #[test]
    fn interior_move_eventually_succeeds() {
        let config = SimConfig {
            world_size: 10.0,
            motion_noise: 1.0,
            ..SimConfig::default()
        };
        let mut w = WorldState::with_seed(config, 9).unwrap();
        let succeeded = (0..100).any(|_| w.move_by(0.0, 0.0));
        assert!(succeeded);
    }

    #[test]
    fn sense_indices_are_valid() {
        let mut w = WorldState::with_seed(SimConfig::default(), 3).unwrap();
        w.generate_landmarks(25);
        for _ in 0..50 {
            for m in w.sense() {
                assert!(m.landmark < w.landmark_count());
            }
            w.move_by(1.0, -1.0);
        }
    }

    #[test]
    fn unlimited_range_sees_every_landmark() {
        let config = SimConfig {
            measurement_range: UNLIMITED_RANGE,
            measurement_noise: 5.0,
            ..SimConfig::default()
        };
        let mut w = WorldState::with_seed(config, 17).unwrap();
        w.generate_landmarks(12);
        for _ in 0..20 {
            let seen: Vec<usize> = w.sense().iter().map(|m| m.landmark).collect();
            assert_eq!(seen, (0..12).collect::<Vec<_>>());
        }
    }

    #[test]
    fn noiseless_range_boundary_is_inclusive() {
        let mut w = small_noiseless(5.0);
        // distances from (5,5): 5.0 exactly, then just beyond
        w.place_landmarks([DVec2::new(8.0, 9.0), DVec2::new(8.0, 9.5)]);
        let seen = w.sense();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], Measurement::new(0, 3.0, 4.0));
    }

    #[test]
    fn reported_measurements_are_within_range() {
        let config = SimConfig {
            world_size: 10.0,
            measurement_range: 5.0,
            measurement_noise: 2.0,
            motion_noise: 0.0,
        };
        let mut dropped = 0;
        for seed in 0..200 {
            let mut w = WorldState::with_seed(config, seed).unwrap();
            // true distance 4.9, inside range
            w.place_landmarks([DVec2::new(9.9, 5.0)]);
            let seen = w.sense();
            for m in &seen {
                assert!(m.offset().length() <= 5.0);
            }
            if seen.is_empty() {
                dropped += 1;
            }
        }
        // noise pushes an in-range landmark out of range some of the time
        assert!(dropped > 0);
    }

    #[test]
    fn empty_landmarks_sense_empty() {
        let mut w = WorldState::new(SimConfig::default()).unwrap();
        assert!(w.sense().is_empty());
    }

    #[test]
    fn generated_landmarks_are_lattice_points_in_world() {
        let mut w = WorldState::with_seed(SimConfig::default(), 21).unwrap();
        w.generate_landmarks(40);
        assert_eq!(w.landmark_count(), 40);
        for l in w.landmarks() {
            assert_eq!(l.x, l.x.round());
            assert_eq!(l.y, l.y.round());
            assert!((0.0..=100.0).contains(&l.x) && (0.0..=100.0).contains(&l.y));
        }
    }

    #[test]
    fn regeneration_replaces_landmarks() {
        let mut w = WorldState::with_seed(SimConfig::default(), 4).unwrap();
        w.generate_landmarks(5);
        w.generate_landmarks(3);
        assert_eq!(w.landmark_count(), 3);
        assert_eq!(w.generation(), 2);
        assert_eq!(w.events().len(), 2);
    }

    #[test]
    fn same_seed_same_run() {
        let mut w1 = WorldState::with_seed(SimConfig::default(), 42).unwrap();
        let mut w2 = WorldState::with_seed(SimConfig::default(), 42).unwrap();
        w1.generate_landmarks(10);
        w2.generate_landmarks(10);
        for _ in 0..30 {
            assert_eq!(w1.sense(), w2.sense());
            assert_eq!(w1.move_by(2.0, 1.0), w2.move_by(2.0, 1.0));
        }
        assert_eq!(w1.state_hash(), w2.state_hash());
        assert_eq!(w1.events(), w2.events());
    }

    #[test]
    fn different_seeds_diverge() {
        let mut w1 = WorldState::with_seed(SimConfig::default(), 1).unwrap();
        let mut w2 = WorldState::with_seed(SimConfig::default(), 2).unwrap();
        w1.generate_landmarks(10);
        w2.generate_landmarks(10);
        assert_ne!(w1.state_hash(), w2.state_hash());
    }

    #[test]
    fn view_is_detached_snapshot() {
        let mut w = small_noiseless(5.0);
        w.place_landmarks([DVec2::new(1.0, 2.0)]);
        let view = w.view();
        w.move_by(1.0, 1.0);
        assert_eq!(view.position, [5.0, 5.0]);
        assert_eq!(view.landmarks, vec![[1.0, 2.0]]);
        assert_eq!(view.world_size, 10.0);
    }

    #[test]
    fn describe_formats_position() {
        let w = small_noiseless(5.0);
        assert_eq!(w.describe(), "Robot: [x=5.00000 y=5.00000]");
    }

    #[test]
    fn drain_events_clears_log() {
        let mut w = small_noiseless(5.0);
        w.move_by(1.0, 0.0);
        let events = w.drain_events();
        assert_eq!(events.len(), 1);
        assert!(w.events().is_empty());
    }
}
