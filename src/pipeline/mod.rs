//! Pipeline module for orchestrating terrain generation stages.
//!
//! Provides a trait-based architecture for modular generation stages that
//! can be composed into a complete terrain generation pipeline, plus the
//! [`generate`] entry point running all of them over a fresh [`Terrain`]
//! artifact.

mod artifact;
mod stage;

pub use artifact::Terrain;
pub use stage::{
    generate, generate_cancellable, BiomeStage, GenerationStage, HeightFieldStage, MeshStage,
    Pipeline, StageId, TextureStage,
};
