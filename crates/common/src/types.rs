use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A single landmark observation relative to the robot.
///
/// `landmark` is a back-reference into the world's landmark sequence for the
/// generation the measurement was taken in. Serialized as the tuple
/// `[landmark, dx, dy]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "(usize, f64, f64)", from = "(usize, f64, f64)")]
pub struct Measurement {
    pub landmark: usize,
    pub dx: f64,
    pub dy: f64,
}

impl Measurement {
    pub fn new(landmark: usize, dx: f64, dy: f64) -> Self {
        Self { landmark, dx, dy }
    }

    /// Measured offset from the robot to the landmark.
    pub fn offset(&self) -> DVec2 {
        DVec2::new(self.dx, self.dy)
    }
}

impl From<Measurement> for (usize, f64, f64) {
    fn from(m: Measurement) -> Self {
        (m.landmark, m.dx, m.dy)
    }
}

impl From<(usize, f64, f64)> for Measurement {
    fn from((landmark, dx, dy): (usize, f64, f64)) -> Self {
        Self { landmark, dx, dy }
    }
}

/// A commanded displacement. Serialized as `[dx, dy]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "(f64, f64)", from = "(f64, f64)")]
pub struct Motion {
    pub dx: f64,
    pub dy: f64,
}

impl Motion {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.dx, self.dy)
    }
}

impl From<Motion> for (f64, f64) {
    fn from(m: Motion) -> Self {
        (m.dx, m.dy)
    }
}

impl From<(f64, f64)> for Motion {
    fn from((dx, dy): (f64, f64)) -> Self {
        Self { dx, dy }
    }
}

/// One time step of a dataset: what the robot saw, then what it was told to do.
///
/// Measurements correspond to the pose *before* `motion` is applied.
/// Serialized as `[[measurements...], [dx, dy]]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "(Vec<Measurement>, Motion)", from = "(Vec<Measurement>, Motion)")]
pub struct DatasetEntry {
    pub measurements: Vec<Measurement>,
    pub motion: Motion,
}

impl From<DatasetEntry> for (Vec<Measurement>, Motion) {
    fn from(e: DatasetEntry) -> Self {
        (e.measurements, e.motion)
    }
}

impl From<(Vec<Measurement>, Motion)> for DatasetEntry {
    fn from((measurements, motion): (Vec<Measurement>, Motion)) -> Self {
        Self {
            measurements,
            motion,
        }
    }
}

/// Read-only snapshot of the world for renderers and loggers.
///
/// Owned plain numbers; holding one never borrows the live world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldView {
    pub world_size: f64,
    pub position: [f64; 2],
    pub landmarks: Vec<[f64; 2]>,
}

impl WorldView {
    /// Human-readable one-line description of the robot.
    pub fn describe(&self) -> String {
        describe_robot(self.position)
    }
}

/// Format a robot position as `Robot: [x=… y=…]` with five decimals.
pub fn describe_robot([x, y]: [f64; 2]) -> String {
    format!("Robot: [x={x:.5} y={y:.5}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurement_serializes_as_tuple() {
        let m = Measurement::new(3, 1.5, -2.0);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[3,1.5,-2.0]");
        let back: Measurement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn dataset_entry_shape() {
        let entry = DatasetEntry {
            measurements: vec![Measurement::new(0, 0.0, 1.0)],
            motion: Motion::new(2.0, 3.0),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, "[[[0,0.0,1.0]],[2.0,3.0]]");
    }

    #[test]
    fn empty_entry_has_no_measurements() {
        let entry = DatasetEntry::default();
        assert!(entry.measurements.is_empty());
        assert_eq!(entry.motion, Motion::new(0.0, 0.0));
    }

    #[test]
    fn view_describes_robot() {
        let view = WorldView {
            world_size: 10.0,
            position: [1.25, 7.0],
            landmarks: Vec::new(),
        };
        assert_eq!(view.describe(), "Robot: [x=1.25000 y=7.00000]");
    }

    #[test]
    fn offset_matches_fields() {
        let m = Measurement::new(1, 4.0, -3.0);
        assert_eq!(m.offset().length(), 5.0);
    }
}
