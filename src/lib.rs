//! Procedural terrain synthesis pipeline.
//!
//! This crate turns grid dimensions and fractal noise parameters into a
//! height field, a triangulated mesh conforming to it, a per-cell biome
//! classification, and an RGBA color texture derived from that
//! classification. Generation is one-shot, deterministic for a given
//! configuration (seed included), and row-parallel; rendering, asset binding
//! and scene wiring are left to the host, which calls [`generate`] and binds
//! the returned buffers itself.

pub mod biomes;
pub mod cancel;
pub mod error;
pub mod export;
pub mod mesh;
pub mod pipeline;
pub mod terrain;
pub mod texture;

pub use biomes::{classify, classify_cancellable, Biome, BiomeMap, BiomeTable};
pub use cancel::CancelFlag;
pub use error::GenerationError;
pub use export::ExportError;
pub use mesh::{build_mesh, build_mesh_cancellable, TerrainMesh};
pub use pipeline::{
    generate, generate_cancellable, BiomeStage, GenerationStage, HeightFieldStage, MeshStage,
    Pipeline, StageId, Terrain, TextureStage,
};
pub use terrain::{
    generate_height_field, generate_height_field_cancellable, ConfigError, GenerationConfig,
    HeightField, NoiseSampler,
};
pub use texture::{synthesize, synthesize_with_default, Texture};
