use serde::{Deserialize, Serialize};
use slamsim_common::{DatasetEntry, Motion};
use slamsim_kernel::WorldState;

/// An ordered, in-memory sequence of time steps.
///
/// Serializes as a plain array of entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    entries: Vec<DatasetEntry>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one time step. Entries are never modified after writing.
    pub fn push(&mut self, entry: DatasetEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[DatasetEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DatasetEntry> {
        self.entries.iter()
    }

    /// Total number of measurements across all steps.
    pub fn measurement_count(&self) -> usize {
        self.entries.iter().map(|e| e.measurements.len()).sum()
    }

    /// Which of `landmark_count` landmarks appear in at least one step.
    pub fn landmarks_seen(&self, landmark_count: usize) -> Vec<bool> {
        let mut seen = vec![false; landmark_count];
        for m in self.entries.iter().flat_map(|e| &e.measurements) {
            if let Some(flag) = seen.get_mut(m.landmark) {
                *flag = true;
            }
        }
        seen
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a DatasetEntry;
    type IntoIter = std::slice::Iter<'a, DatasetEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Records sense-then-move steps against a world.
///
/// Holds nothing but the accumulated dataset; the world is borrowed per step.
#[derive(Debug, Default)]
pub struct Recorder {
    dataset: Dataset,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sense, then attempt `motion`, then log the commanded motion.
    ///
    /// The entry is appended whether or not the move was accepted; the
    /// returned flag reports the move outcome.
    pub fn step(&mut self, world: &mut WorldState, motion: Motion) -> bool {
        let measurements = world.sense();
        let moved = world.move_by(motion.dx, motion.dy);
        self.dataset.push(DatasetEntry {
            measurements,
            motion,
        });
        moved
    }

    /// Record one step per command and return the dataset.
    pub fn record(
        world: &mut WorldState,
        commands: impl IntoIterator<Item = Motion>,
    ) -> Dataset {
        let _span = tracing::info_span!("record").entered();
        let mut recorder = Self::new();
        let mut rejected = 0usize;
        for motion in commands {
            if !recorder.step(world, motion) {
                rejected += 1;
            }
        }
        tracing::debug!(steps = recorder.dataset.len(), rejected, "recording finished");
        recorder.finish()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn finish(self) -> Dataset {
        self.dataset
    }
}
