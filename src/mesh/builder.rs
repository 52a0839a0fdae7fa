//! Grid triangulation and normal computation.

use glam::Vec3;
use rayon::prelude::*;

use crate::cancel::CancelFlag;
use crate::error::GenerationError;
use crate::terrain::{ConfigError, HeightField};

/// Triangle mesh conforming to a height field.
///
/// `positions` and `normals` have one entry per height-field vertex, in the
/// same row-major order (`i = x + y * (width + 1)`); `indices` holds six
/// entries per grid cell, two counter-clockwise triangles seen from above.
#[derive(Debug, Clone)]
pub struct TerrainMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Builds the triangle mesh for a height field.
///
/// Vertex (x, y) sits at `(x, field[x, y], y)`. Each cell emits two
/// triangles, `(top_left, bottom_left, top_right)` and `(top_right,
/// bottom_left, bottom_right)`; with +Y as the up axis this winding gives
/// every face normal a strictly positive Y component. Per-vertex normals
/// average the normalized face normals of the sharing triangles.
pub fn build_mesh(field: &HeightField) -> Result<TerrainMesh, GenerationError> {
    build_mesh_cancellable(field, &CancelFlag::new())
}

/// Cancellable variant of [`build_mesh`]; the flag is polled between rows.
pub fn build_mesh_cancellable(
    field: &HeightField,
    cancel: &CancelFlag,
) -> Result<TerrainMesh, GenerationError> {
    if field.width() == 0 || field.height() == 0 {
        return Err(ConfigError::EmptyGrid(field.width(), field.height()).into());
    }

    let width = field.width() as usize;
    let height = field.height() as usize;
    let cols = width + 1;

    let mut positions = vec![Vec3::ZERO; field.vertex_count()];
    positions.par_chunks_mut(cols).enumerate().for_each(|(y, row)| {
        if cancel.is_cancelled() {
            return;
        }
        for (x, slot) in row.iter_mut().enumerate() {
            *slot = Vec3::new(x as f32, field.get(x as u32, y as u32), y as f32);
        }
    });
    if cancel.is_cancelled() {
        return Err(GenerationError::Cancelled);
    }

    let mut indices = vec![0u32; width * height * 6];
    indices
        .par_chunks_mut(width * 6)
        .enumerate()
        .for_each(|(y, row)| {
            if cancel.is_cancelled() {
                return;
            }
            for x in 0..width {
                let top_left = (y * cols + x) as u32;
                let top_right = top_left + 1;
                let bottom_left = top_left + cols as u32;
                let bottom_right = bottom_left + 1;

                row[x * 6..(x + 1) * 6].copy_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        });
    if cancel.is_cancelled() {
        return Err(GenerationError::Cancelled);
    }

    let normals = vertex_normals(&positions, &indices, width * 6, cancel)?;

    Ok(TerrainMesh {
        positions,
        normals,
        indices,
    })
}

/// Accumulates normalized face normals onto the vertices of each triangle,
/// then normalizes the per-vertex sums.
///
/// Every face normal here has a positive Y component (the triangulation fixes
/// the XZ orientation of each triangle), so no accumulated sum can cancel to
/// zero.
fn vertex_normals(
    positions: &[Vec3],
    indices: &[u32],
    indices_per_row: usize,
    cancel: &CancelFlag,
) -> Result<Vec<Vec3>, GenerationError> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for row in indices.chunks(indices_per_row) {
        if cancel.is_cancelled() {
            return Err(GenerationError::Cancelled);
        }
        for tri in row.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let face = (positions[b] - positions[a])
                .cross(positions[c] - positions[a])
                .normalize();
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }
    }

    for n in &mut normals {
        *n = n.normalize();
    }
    Ok(normals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_field(width: u32, height: u32) -> HeightField {
        let len = (width as usize + 1) * (height as usize + 1);
        HeightField::from_raw(width, height, vec![0.0; len]).unwrap()
    }

    fn bumpy_field(width: u32, height: u32) -> HeightField {
        let len = (width as usize + 1) * (height as usize + 1);
        let values = (0..len).map(|i| (i as f32 * 0.37).sin() * 2.0).collect();
        HeightField::from_raw(width, height, values).unwrap()
    }

    #[test]
    fn two_by_two_grid_counts() {
        let mesh = build_mesh(&flat_field(2, 2)).unwrap();

        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(mesh.normals.len(), 9);
        assert_eq!(mesh.indices.len(), 24);
        assert_eq!(mesh.triangle_count(), 8);
    }

    #[test]
    fn indices_stay_below_vertex_count() {
        let mesh = build_mesh(&bumpy_field(5, 3)).unwrap();
        let count = mesh.vertex_count() as u32;

        assert_eq!(mesh.indices.len(), 5 * 3 * 6);
        assert!(mesh.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn single_cell_indices_match_layout() {
        let mesh = build_mesh(&flat_field(1, 1)).unwrap();
        // top_left 0, top_right 1, bottom_left 2, bottom_right 3
        assert_eq!(mesh.indices, vec![0, 2, 1, 1, 2, 3]);
    }

    #[test]
    fn positions_follow_grid_and_heights() {
        let field =
            HeightField::from_raw(2, 1, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let mesh = build_mesh(&field).unwrap();

        assert_eq!(mesh.positions[0], Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(mesh.positions[2], Vec3::new(2.0, 2.0, 0.0));
        assert_eq!(mesh.positions[3], Vec3::new(0.0, 3.0, 1.0));
        assert_eq!(mesh.positions[5], Vec3::new(2.0, 5.0, 1.0));
    }

    #[test]
    fn flat_field_normals_point_up() {
        let mesh = build_mesh(&flat_field(3, 3)).unwrap();
        for (i, n) in mesh.normals.iter().enumerate() {
            assert_eq!(*n, Vec3::Y, "normal {i} is {n:?}");
        }
    }

    #[test]
    fn face_winding_sign_is_consistent() {
        let mesh = build_mesh(&bumpy_field(6, 4)).unwrap();

        for tri in mesh.indices.chunks_exact(3) {
            let a = mesh.positions[tri[0] as usize];
            let b = mesh.positions[tri[1] as usize];
            let c = mesh.positions[tri[2] as usize];
            let cross = (b - a).cross(c - a);
            assert!(cross.y > 0.0, "face normal flipped: {cross:?}");
        }
    }

    #[test]
    fn vertex_normals_are_unit_length() {
        let mesh = build_mesh(&bumpy_field(4, 4)).unwrap();
        for n in &mesh.normals {
            assert!((n.length() - 1.0).abs() < 1e-5, "non-unit normal {n:?}");
        }
    }

    #[test]
    fn sloped_field_tilts_normals_against_slope() {
        // Heights rise one unit per +x step; every face normal is
        // (-1, 1, 0) / sqrt(2), and so is every averaged vertex normal.
        let values = (0..3)
            .flat_map(|_| (0..3).map(|x| x as f32))
            .collect::<Vec<_>>();
        let field = HeightField::from_raw(2, 2, values).unwrap();
        let mesh = build_mesh(&field).unwrap();

        let expected = Vec3::new(-1.0, 1.0, 0.0).normalize();
        for n in &mesh.normals {
            assert!((*n - expected).length() < 1e-6, "normal {n:?}");
        }
    }

    #[test]
    fn empty_grid_is_rejected() {
        let degenerate = HeightField::from_raw(0, 2, vec![0.0; 3]).unwrap();
        let result = build_mesh(&degenerate);
        assert!(matches!(result, Err(GenerationError::InvalidConfiguration(_))));
    }

    #[test]
    fn cancelled_flag_yields_no_mesh() {
        let cancel = CancelFlag::new();
        cancel.cancel();

        let result = build_mesh_cancellable(&flat_field(4, 4), &cancel);
        assert!(matches!(result, Err(GenerationError::Cancelled)));
    }
}
