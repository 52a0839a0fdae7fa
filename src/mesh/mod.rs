//! Mesh construction from height fields.

mod builder;

pub use builder::{build_mesh, build_mesh_cancellable, TerrainMesh};
