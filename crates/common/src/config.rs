use serde::{Deserialize, Serialize};

/// Sentinel measurement range meaning "every landmark is in range".
pub const UNLIMITED_RANGE: f64 = -1.0;

/// Construction parameters for a simulated world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Side length of the square world.
    pub world_size: f64,
    /// Maximum sensing radius, or [`UNLIMITED_RANGE`].
    pub measurement_range: f64,
    /// Scale of the uniform noise added to each motion axis.
    pub motion_noise: f64,
    /// Scale of the uniform noise added to each measured offset axis.
    pub measurement_noise: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_size: 100.0,
            measurement_range: 30.0,
            motion_noise: 1.0,
            measurement_noise: 1.0,
        }
    }
}

/// Errors from configuration validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("world size must be finite and positive, got {0}")]
    WorldSize(f64),
    #[error("measurement range must be -1 or a finite value >= 0, got {0}")]
    MeasurementRange(f64),
    #[error("{name} must be finite and non-negative, got {value}")]
    Noise { name: &'static str, value: f64 },
}

impl SimConfig {
    /// Noise-free configuration, useful for exact geometric checks.
    pub fn noiseless(world_size: f64, measurement_range: f64) -> Self {
        Self {
            world_size,
            measurement_range,
            motion_noise: 0.0,
            measurement_noise: 0.0,
        }
    }

    /// Whether the measurement range is the unlimited sentinel.
    pub fn unlimited_range(&self) -> bool {
        self.measurement_range == UNLIMITED_RANGE
    }

    /// Check every parameter; the first violation wins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.world_size.is_finite() || self.world_size <= 0.0 {
            return Err(ConfigError::WorldSize(self.world_size));
        }
        if !self.unlimited_range()
            && !(self.measurement_range.is_finite() && self.measurement_range >= 0.0)
        {
            return Err(ConfigError::MeasurementRange(self.measurement_range));
        }
        for (name, value) in [
            ("motion noise", self.motion_noise),
            ("measurement noise", self.measurement_noise),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Noise { name, value });
            }
        }
        Ok(())
    }
}
