//! Biome band definitions.

use serde::{Deserialize, Serialize};

/// One classification band: a closed height interval mapped to a name and a
/// fill color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Biome {
    pub name: String,
    /// Lower bound of the band, inclusive.
    pub min_height: f32,
    /// Upper bound of the band, inclusive. Must be >= `min_height`.
    pub max_height: f32,
    /// RGBA color used by texture synthesis.
    pub color: [u8; 4],
}

impl Biome {
    /// Creates a band. `min_height` must not exceed `max_height`.
    pub fn new(name: &str, min_height: f32, max_height: f32, color: [u8; 4]) -> Self {
        debug_assert!(min_height <= max_height);
        Self {
            name: name.to_string(),
            min_height,
            max_height,
            color,
        }
    }

    /// Returns true if `height` lies inside the closed interval, bounds
    /// included.
    pub fn contains(&self, height: f32) -> bool {
        self.min_height <= height && height <= self.max_height
    }
}

/// Ordered list of biome bands.
///
/// Order is precedence: where bands overlap, the earlier entry wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BiomeTable {
    biomes: Vec<Biome>,
}

impl BiomeTable {
    /// Wraps an ordered band list. Tables are limited to `u16::MAX` entries
    /// (classification stores `u16` indices).
    pub fn new(biomes: Vec<Biome>) -> Self {
        debug_assert!(biomes.len() <= u16::MAX as usize);
        Self { biomes }
    }

    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }

    /// Returns the band at `index`.
    pub fn get(&self, index: u16) -> Option<&Biome> {
        self.biomes.get(index as usize)
    }

    /// Iterates the bands in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = &Biome> {
        self.biomes.iter()
    }

    /// Index of the first band whose interval contains `height`, or None if
    /// no band matches.
    pub fn classify_height(&self, height: f32) -> Option<u16> {
        self.biomes
            .iter()
            .position(|b| b.contains(height))
            .map(|i| i as u16)
    }

    /// A small band set covering the output range of default fractal
    /// configurations (amplitude sum 1.875 with four octaves at persistence
    /// 0.5), from deep water up to snow.
    pub fn earth_like() -> Self {
        Self::new(vec![
            Biome::new("deep water", -2.0, -0.35, [8, 54, 119, 255]),
            Biome::new("shallow water", -0.35, -0.05, [36, 120, 186, 255]),
            Biome::new("sand", -0.05, 0.05, [214, 200, 138, 255]),
            Biome::new("grassland", 0.05, 0.45, [98, 160, 82, 255]),
            Biome::new("forest", 0.45, 0.85, [48, 112, 62, 255]),
            Biome::new("rock", 0.85, 1.3, [139, 132, 126, 255]),
            Biome::new("snow", 1.3, 2.0, [240, 245, 250, 255]),
        ])
    }
}
