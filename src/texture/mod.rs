//! Texture synthesis from biome maps.
//!
//! Resolves every classified cell against the biome table and writes its
//! color into an RGBA pixel buffer, one pixel per cell. Unassigned cells are
//! surfaced as an error unless the caller supplies a default biome; they are
//! never painted with an arbitrary color.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::biomes::{Biome, BiomeMap, BiomeTable};
use crate::cancel::CancelFlag;
use crate::error::GenerationError;
use crate::terrain::ConfigError;

/// RGBA8 pixel buffer, `width x height`, row-major, one pixel per biome-map
/// cell. Read-only after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Texture {
    /// Wraps an existing row-major RGBA8 buffer, checking its length against
    /// the `width` x `height` pixel grid.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ConfigError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(ConfigError::LengthMismatch(pixels.len(), width, height));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Texture width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Texture height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the RGBA color of pixel (x, y).
    ///
    /// # Panics
    /// Panics in debug builds if x or y is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        debug_assert!(x < self.width && y < self.height);
        let offset = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
            self.pixels[offset + 3],
        ]
    }

    /// The raw row-major RGBA8 byte buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}

/// Synthesizes the color texture for a fully classified biome map.
///
/// Fails with [`GenerationError::UnassignedCell`] if any cell carries no
/// biome, listing every affected coordinate. Cells are checked before any
/// pixel is written, so a failed call publishes no partial texture.
pub fn synthesize(map: &BiomeMap, table: &BiomeTable) -> Result<Texture, GenerationError> {
    synthesize_cancellable(map, table, &CancelFlag::new())
}

/// Cancellable variant of [`synthesize`]; the flag is polled between rows.
pub fn synthesize_cancellable(
    map: &BiomeMap,
    table: &BiomeTable,
    cancel: &CancelFlag,
) -> Result<Texture, GenerationError> {
    let unresolved = unresolved_cells(map, table);
    if !unresolved.is_empty() {
        return Err(GenerationError::unassigned(unresolved));
    }

    // Every cell resolves, so the fallback color is never consulted.
    let texture = fill_pixels(map, table, [0; 4], cancel);
    if cancel.is_cancelled() {
        return Err(GenerationError::Cancelled);
    }
    Ok(texture)
}

/// Synthesizes the texture, painting unassigned cells with the default
/// biome's color instead of failing.
pub fn synthesize_with_default(map: &BiomeMap, table: &BiomeTable, default: &Biome) -> Texture {
    fill_pixels(map, table, default.color, &CancelFlag::new())
}

/// Cancellable variant of [`synthesize_with_default`].
pub fn synthesize_with_default_cancellable(
    map: &BiomeMap,
    table: &BiomeTable,
    default: &Biome,
    cancel: &CancelFlag,
) -> Result<Texture, GenerationError> {
    let texture = fill_pixels(map, table, default.color, cancel);
    if cancel.is_cancelled() {
        return Err(GenerationError::Cancelled);
    }
    Ok(texture)
}

/// Coordinates of every cell that resolves to no biome, row-major. Covers
/// both unassigned cells and indices that fall outside `table` (possible only
/// when a map is resolved against a different table than it was built from).
fn unresolved_cells(map: &BiomeMap, table: &BiomeTable) -> Vec<(u32, u32)> {
    map.cells()
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.and_then(|index| table.get(index)).is_none())
        .map(|(i, _)| (i as u32 % map.width(), i as u32 / map.width()))
        .collect()
}

fn fill_pixels(map: &BiomeMap, table: &BiomeTable, fallback: [u8; 4], cancel: &CancelFlag) -> Texture {
    let width = map.width() as usize;
    let height = map.height() as usize;

    let mut pixels = vec![0u8; width * height * 4];
    if width > 0 {
        pixels
            .par_chunks_mut(width * 4)
            .zip(map.cells().par_chunks(width))
            .for_each(|(pixel_row, cell_row)| {
                if cancel.is_cancelled() {
                    return;
                }
                for (pixel, cell) in pixel_row.chunks_exact_mut(4).zip(cell_row) {
                    let color = cell
                        .and_then(|index| table.get(index))
                        .map(|biome| biome.color)
                        .unwrap_or(fallback);
                    pixel.copy_from_slice(&color);
                }
            });
    }

    Texture {
        width: map.width(),
        height: map.height(),
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biomes::classify;
    use crate::terrain::HeightField;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const GRAY: [u8; 4] = [120, 120, 120, 255];

    fn map_from_heights(width: u32, height: u32, table: &BiomeTable, heights: Vec<f32>) -> BiomeMap {
        let field = HeightField::from_raw(width, height, heights).unwrap();
        classify(&field, table)
    }

    #[test]
    fn fully_assigned_map_yields_solid_texture() {
        let table = BiomeTable::new(vec![Biome::new("red", -1.0, 1.0, RED)]);
        let map = map_from_heights(2, 2, &table, vec![0.0; 9]);

        let texture = synthesize(&map, &table).unwrap();

        assert_eq!(texture.width(), 2);
        assert_eq!(texture.height(), 2);
        assert_eq!(texture.as_bytes().len(), 16);
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(texture.pixel(x, y), RED);
            }
        }
    }

    #[test]
    fn each_pixel_takes_its_cells_biome_color() {
        let table = BiomeTable::new(vec![
            Biome::new("low", -1.0, 0.0, BLUE),
            Biome::new("high", 0.0, 1.0, RED),
        ]);
        // Cell heights (top-left corners): -0.5, 0.5 / 0.5, -0.5.
        let map = map_from_heights(
            2,
            2,
            &table,
            vec![-0.5, 0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.0, 0.0],
        );

        let texture = synthesize(&map, &table).unwrap();

        assert_eq!(texture.pixel(0, 0), BLUE);
        assert_eq!(texture.pixel(1, 0), RED);
        assert_eq!(texture.pixel(0, 1), RED);
        assert_eq!(texture.pixel(1, 1), BLUE);
    }

    #[test]
    fn unassigned_cell_is_reported_not_painted() {
        let table = BiomeTable::new(vec![Biome::new("band", -1.0, 1.0, RED)]);
        // Cell (1, 0) sits at height 5.0, outside the band.
        let map = map_from_heights(
            2,
            2,
            &table,
            vec![0.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        );

        let err = synthesize(&map, &table).unwrap_err();
        match err {
            GenerationError::UnassignedCell {
                count,
                first_x,
                first_y,
                cells,
            } => {
                assert_eq!(count, 1);
                assert_eq!((first_x, first_y), (1, 0));
                assert_eq!(cells, vec![(1, 0)]);
            }
            other => panic!("expected UnassignedCell, got {other}"),
        }
    }

    #[test]
    fn default_biome_fills_unassigned_cells() {
        let table = BiomeTable::new(vec![Biome::new("band", -1.0, 1.0, RED)]);
        let map = map_from_heights(
            2,
            2,
            &table,
            vec![0.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        );

        let default = Biome::new("bedrock", f32::MIN, f32::MAX, GRAY);
        let texture = synthesize_with_default(&map, &table, &default);

        assert_eq!(texture.pixel(0, 0), RED);
        assert_eq!(texture.pixel(1, 0), GRAY);
        assert_eq!(texture.pixel(0, 1), RED);
        assert_eq!(texture.pixel(1, 1), RED);
    }

    #[test]
    fn synthesis_is_deterministic() {
        let table = BiomeTable::earth_like();
        let heights = (0..25).map(|i| (i as f32 * 0.31).sin()).collect::<Vec<_>>();
        let map = map_from_heights(4, 4, &table, heights);

        let a = synthesize(&map, &table).unwrap();
        let b = synthesize(&map, &table).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn pixel_buffer_is_row_major() {
        let table = BiomeTable::new(vec![
            Biome::new("low", -1.0, 0.0, BLUE),
            Biome::new("high", 0.0, 1.0, RED),
        ]);
        // 2x1 cells: left cell low, right cell high.
        let map = map_from_heights(2, 1, &table, vec![-0.5, 0.5, 0.0, 0.0, 0.0, 0.0]);

        let texture = synthesize(&map, &table).unwrap();
        assert_eq!(&texture.as_bytes()[0..4], &BLUE);
        assert_eq!(&texture.as_bytes()[4..8], &RED);
    }

    #[test]
    fn from_raw_checks_buffer_length() {
        assert!(matches!(
            Texture::from_raw(2, 2, vec![0; 15]),
            Err(ConfigError::LengthMismatch(15, 2, 2))
        ));
        assert!(Texture::from_raw(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn cancelled_flag_yields_no_texture() {
        let cancel = CancelFlag::new();
        cancel.cancel();

        let table = BiomeTable::new(vec![Biome::new("band", -1.0, 1.0, RED)]);
        let map = map_from_heights(2, 2, &table, vec![0.0; 9]);

        let result = synthesize_cancellable(&map, &table, &cancel);
        assert!(matches!(result, Err(GenerationError::Cancelled)));
    }
}
