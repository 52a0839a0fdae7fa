//! Per-run terrain artifact.

use serde::{Deserialize, Serialize};

use crate::biomes::{BiomeMap, BiomeTable};
use crate::mesh::TerrainMesh;
use crate::terrain::{GenerationConfig, HeightField};
use crate::texture::Texture;

/// Holds the immutable inputs and the stage outputs of one generation run.
///
/// A fresh artifact starts with every output slot `None`; each stage fills
/// its own slot exactly once. When a run fails partway, the outputs of
/// completed stages remain and later slots stay `None`, so the mesh can
/// outlive a failed texture synthesis. Reconfiguration means a new artifact,
/// never mutation of a published one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terrain {
    /// Generation parameters, immutable for the lifetime of the run.
    pub config: GenerationConfig,
    /// Ordered biome table used for classification and texturing.
    pub biomes: BiomeTable,
    /// Height field (populated by the height-field stage).
    #[serde(skip)]
    pub height_field: Option<HeightField>,
    /// Triangle mesh (populated by the mesh stage).
    #[serde(skip)]
    pub mesh: Option<TerrainMesh>,
    /// Per-cell classification (populated by the biome stage).
    #[serde(skip)]
    pub biome_map: Option<BiomeMap>,
    /// RGBA color texture (populated by the texture stage).
    #[serde(skip)]
    pub texture: Option<Texture>,
}

impl Terrain {
    /// Creates an empty artifact for the given inputs.
    pub fn new(config: GenerationConfig, biomes: BiomeTable) -> Self {
        Self {
            config,
            biomes,
            height_field: None,
            mesh: None,
            biome_map: None,
            texture: None,
        }
    }

    /// Returns true once every stage output is populated.
    pub fn is_complete(&self) -> bool {
        self.height_field.is_some()
            && self.mesh.is_some()
            && self.biome_map.is_some()
            && self.texture.is_some()
    }
}
