//! Biome classification over height fields.
//!
//! Scans the ordered biome table per cell and assigns the first band whose
//! closed interval contains the cell's height. Cells matching no band carry
//! an explicit unassigned tag; the classifier itself never fails on them,
//! callers choose between erroring and a default biome at texture time.

mod config;

pub use config::{Biome, BiomeTable};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cancel::CancelFlag;
use crate::error::GenerationError;
use crate::terrain::HeightField;

/// Per-cell classification result: `width x height` cells, row-major, each
/// holding the table index of its biome or None for unassigned.
///
/// A cell's height is the sample at its top-left corner vertex, so cell
/// (x, y) and vertex (x, y) share coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiomeMap {
    width: u32,
    height: u32,
    cells: Vec<Option<u16>>,
}

impl BiomeMap {
    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the biome table index assigned to cell (x, y), or None if the
    /// cell is unassigned.
    ///
    /// # Panics
    /// Panics in debug builds if x or y is out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u16> {
        debug_assert!(x < self.width && y < self.height);
        self.cells[(y * self.width + x) as usize]
    }

    /// Resolves the biome assigned to cell (x, y) against `table`.
    pub fn biome<'t>(&self, table: &'t BiomeTable, x: u32, y: u32) -> Option<&'t Biome> {
        self.get(x, y).and_then(|index| table.get(index))
    }

    /// The raw row-major cell buffer.
    pub fn cells(&self) -> &[Option<u16>] {
        &self.cells
    }

    /// Returns true if every cell carries a biome.
    pub fn is_fully_assigned(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Coordinates of every unassigned cell, row-major.
    pub fn unassigned_cells(&self) -> Vec<(u32, u32)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| (i as u32 % self.width, i as u32 / self.width))
            .collect()
    }
}

/// Classifies every cell of `field` against `table`, first match wins.
///
/// Never fails: unmatched cells come back as explicit unassigned entries.
pub fn classify(field: &HeightField, table: &BiomeTable) -> BiomeMap {
    BiomeMap {
        width: field.width(),
        height: field.height(),
        cells: classify_rows(field, table, &CancelFlag::new()),
    }
}

/// Cancellable variant of [`classify`]; the flag is polled between rows.
pub fn classify_cancellable(
    field: &HeightField,
    table: &BiomeTable,
    cancel: &CancelFlag,
) -> Result<BiomeMap, GenerationError> {
    let cells = classify_rows(field, table, cancel);
    if cancel.is_cancelled() {
        return Err(GenerationError::Cancelled);
    }
    Ok(BiomeMap {
        width: field.width(),
        height: field.height(),
        cells,
    })
}

fn classify_rows(
    field: &HeightField,
    table: &BiomeTable,
    cancel: &CancelFlag,
) -> Vec<Option<u16>> {
    let width = field.width() as usize;
    let height = field.height() as usize;

    let mut cells = vec![None; width * height];
    if width == 0 {
        return cells;
    }

    cells.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        if cancel.is_cancelled() {
            return;
        }
        for (x, cell) in row.iter_mut().enumerate() {
            let h = field.get(x as u32, y as u32);
            *cell = table.classify_height(h);
        }
    });

    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_3x3(values: [f32; 9]) -> HeightField {
        HeightField::from_raw(2, 2, values.to_vec()).unwrap()
    }

    fn single_band(min: f32, max: f32) -> BiomeTable {
        BiomeTable::new(vec![Biome::new("band", min, max, [200, 10, 10, 255])])
    }

    #[test]
    fn boundary_heights_are_inclusive() {
        // Cell heights come from top-left corners: 0.25, 0.75 / 0.5, 1.0.
        let field = field_3x3([0.25, 0.75, 0.0, 0.5, 1.0, 0.0, 0.0, 0.0, 0.0]);
        let map = classify(&field, &single_band(0.25, 0.75));

        assert_eq!(map.get(0, 0), Some(0));
        assert_eq!(map.get(1, 0), Some(0));
        assert_eq!(map.get(0, 1), Some(0));
        assert_eq!(map.get(1, 1), None);
    }

    #[test]
    fn first_listed_biome_wins_where_bands_overlap() {
        let table = BiomeTable::new(vec![
            Biome::new("red", -1.0, 1.0, [255, 0, 0, 255]),
            Biome::new("blue", -1.0, 1.0, [0, 0, 255, 255]),
        ]);
        let field = field_3x3([0.0; 9]);
        let map = classify(&field, &table);

        assert!(map.cells().iter().all(|c| *c == Some(0)));
    }

    #[test]
    fn out_of_band_heights_stay_unassigned() {
        let field = field_3x3([5.0; 9]);
        let map = classify(&field, &single_band(-1.0, 1.0));

        assert!(!map.is_fully_assigned());
        assert_eq!(
            map.unassigned_cells(),
            vec![(0, 0), (1, 0), (0, 1), (1, 1)]
        );
    }

    #[test]
    fn cell_reads_its_top_left_vertex() {
        // Only the (0, 0) vertex is inside the band; the other corners of the
        // single cell are far outside and must not influence the result.
        let field = HeightField::from_raw(1, 1, vec![0.0, 9.0, 9.0, 9.0]).unwrap();
        let table = single_band(-0.5, 0.5);
        let map = classify(&field, &table);

        assert_eq!(map.get(0, 0), Some(0));
        assert_eq!(map.biome(&table, 0, 0).unwrap().name, "band");
    }

    #[test]
    fn classification_is_deterministic() {
        let field = field_3x3([0.1, 0.9, 0.0, -0.3, 0.5, 0.0, 0.0, 0.0, 0.0]);
        let table = BiomeTable::earth_like();

        let a = classify(&field, &table);
        let b = classify(&field, &table);
        assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn empty_table_leaves_everything_unassigned() {
        let field = field_3x3([0.0; 9]);
        let map = classify(&field, &BiomeTable::default());

        assert_eq!(map.unassigned_cells().len(), 4);
    }

    #[test]
    fn cancelled_flag_yields_no_map() {
        let cancel = CancelFlag::new();
        cancel.cancel();

        let field = field_3x3([0.0; 9]);
        let result = classify_cancellable(&field, &single_band(-1.0, 1.0), &cancel);
        assert!(matches!(result, Err(GenerationError::Cancelled)));
    }
}
