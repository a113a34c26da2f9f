use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded noise source owned by a single world.
///
/// ChaCha8 keeps the stream identical across platforms, so a seed fully
/// determines a run.
#[derive(Debug, Clone)]
pub struct NoiseSource {
    rng: ChaCha8Rng,
}

impl NoiseSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniform sample in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform sample in `[-1, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.uniform() * 2.0 - 1.0
    }

    /// Uniform sample in `[-scale, scale)`.
    #[inline]
    pub fn scaled(&mut self, scale: f64) -> f64 {
        self.unit() * scale
    }

    /// Uniform heading in `[0, 2π)`.
    #[inline]
    pub fn heading(&mut self) -> f64 {
        self.uniform() * std::f64::consts::TAU
    }
}
