//! Generation configuration and validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by configuration validation (and by builders handed
/// degenerate inputs). Generation never starts once one of these is detected.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("grid must be at least 1x1 cells (got {0}x{1})")]
    EmptyGrid(u32, u32),
    #[error("scale must be positive and finite (got {0})")]
    InvalidScale(f64),
    #[error("octaves must be at least 1")]
    ZeroOctaves,
    #[error("{0} must be finite (got {1})")]
    NonFinite(&'static str, f64),
    #[error("buffer length {0} does not match grid dimensions {1}x{2}")]
    LengthMismatch(usize, u32, u32),
}

/// Configuration for one terrain generation run.
///
/// Immutable once generation starts; every run receives its own copy and no
/// state is shared between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Grid width in cells. The height field has `width + 1` vertex columns.
    pub width: u32,
    /// Grid height in cells. The height field has `height + 1` vertex rows.
    pub height: u32,
    /// Noise frequency divisor; larger values stretch features. Must be > 0.
    pub scale: f64,
    /// Number of fractal octaves to accumulate (1-8 typical).
    pub octaves: u32,
    /// Amplitude decay per octave (0.4-0.6 typical).
    pub persistence: f64,
    /// Frequency growth per octave (typically 2.0).
    pub lacunarity: f64,
    /// Noise-space translation along x.
    pub offset_x: f64,
    /// Noise-space translation along y.
    pub offset_y: f64,
    /// Seed for the noise permutation; identical seeds reproduce identical
    /// terrain bit for bit.
    pub seed: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            scale: 20.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            offset_x: 100.0,
            offset_y: 100.0,
            seed: 0,
        }
    }
}

impl GenerationConfig {
    /// Creates a configuration with the given seed and default parameters.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Checks every parameter before any sampling happens.
    ///
    /// Rejects empty grids, non-positive or non-finite `scale`, zero
    /// `octaves`, and non-finite octave/offset parameters (a single
    /// non-finite parameter would poison every height in the field).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid(self.width, self.height));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        if self.octaves == 0 {
            return Err(ConfigError::ZeroOctaves);
        }
        for (name, value) in [
            ("persistence", self.persistence),
            ("lacunarity", self.lacunarity),
            ("offset_x", self.offset_x),
            ("offset_y", self.offset_y),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite(name, value));
            }
        }
        Ok(())
    }
}
