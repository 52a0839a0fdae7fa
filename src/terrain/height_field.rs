//! Height field storage.

use serde::{Deserialize, Serialize};

use super::config::ConfigError;

/// A `(width + 1) x (height + 1)` grid of heights, one per mesh vertex,
/// stored row-major.
///
/// `width` and `height` count grid cells; the vertex grid is one larger in
/// each direction so that cells and their corner vertices share indexing.
/// Fields are read-only after construction: a generation run produces a fresh
/// `HeightField` and never mutates a published one. Every entry is finite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeightField {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) values: Vec<f32>,
}

impl HeightField {
    /// Wraps an existing row-major buffer, checking its length against the
    /// vertex grid implied by `width` x `height` cells.
    pub fn from_raw(width: u32, height: u32, values: Vec<f32>) -> Result<Self, ConfigError> {
        let expected = (width as usize + 1) * (height as usize + 1);
        if values.len() != expected {
            return Err(ConfigError::LengthMismatch(values.len(), width, height));
        }
        debug_assert!(values.iter().all(|v| v.is_finite()));
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of vertex columns (`width + 1`).
    pub fn vertex_cols(&self) -> u32 {
        self.width + 1
    }

    /// Number of vertex rows (`height + 1`).
    pub fn vertex_rows(&self) -> u32 {
        self.height + 1
    }

    /// Total number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.values.len()
    }

    /// Returns the height at vertex (x, y).
    ///
    /// # Panics
    /// Panics in debug builds if x or y is out of bounds.
    pub fn get(&self, x: u32, y: u32) -> f32 {
        debug_assert!(x <= self.width && y <= self.height);
        self.values[(y * (self.width + 1) + x) as usize]
    }

    /// The raw row-major buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Computes the (min, max) height over the whole field.
    pub fn height_range(&self) -> (f32, f32) {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for &h in &self.values {
            min = min.min(h);
            max = max.max(h);
        }
        (min, max)
    }

    /// Iterates over all (x, y) vertex coordinates in row-major order.
    pub fn vertex_coords(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let cols = self.width + 1;
        let rows = self.height + 1;
        (0..rows).flat_map(move |y| (0..cols).map(move |x| (x, y)))
    }
}
