//! Generation stage trait and pipeline orchestration.

use crate::biomes::{classify_cancellable, Biome, BiomeTable};
use crate::cancel::CancelFlag;
use crate::error::GenerationError;
use crate::mesh::build_mesh_cancellable;
use crate::terrain::{generate_height_field_cancellable, GenerationConfig, HeightField};
use crate::texture::{synthesize_cancellable, synthesize_with_default_cancellable};

use super::artifact::Terrain;

/// Unique identifier for generation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Fractal height field generation.
    HeightField,
    /// Grid triangulation with normals.
    Mesh,
    /// Per-cell biome classification.
    Biomes,
    /// Texture synthesis from the biome map.
    Texture,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::HeightField => "height-field",
            StageId::Mesh => "mesh",
            StageId::Biomes => "biomes",
            StageId::Texture => "texture",
        }
    }
}

/// Trait for implementing generation stages.
///
/// Each stage reads the inputs held by the [`Terrain`] artifact (and the
/// outputs of its prerequisite stages) and fills its own output slot. The
/// trait-based design keeps the stages independently testable and lets hosts
/// compose partial pipelines, e.g. geometry-only runs with no classification.
pub trait GenerationStage: Send + Sync {
    /// Returns the unique identifier for this stage.
    fn id(&self) -> StageId;

    /// Returns a human-readable name for the stage.
    fn name(&self) -> &str;

    /// Returns the stage IDs that must be executed before this stage.
    fn dependencies(&self) -> &[StageId] {
        &[]
    }

    /// Executes the stage, writing its output into `terrain`.
    ///
    /// The flag is polled between row batches; a cancelled stage returns
    /// [`GenerationError::Cancelled`] and leaves its output slot empty.
    fn execute(&self, terrain: &mut Terrain, cancel: &CancelFlag) -> Result<(), GenerationError>;
}

/// Orchestrates generation stages into a complete pipeline.
///
/// Stages run in insertion order. Before each one executes, its declared
/// dependencies must already have completed, otherwise the run aborts with
/// [`GenerationError::MissingDependency`]. A failed stage also aborts the
/// run; outputs of completed stages stay on the artifact, later slots stay
/// empty.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn GenerationStage>>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stage to the pipeline.
    pub fn add_stage<S: GenerationStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Executes all stages in order on the given artifact.
    pub fn run(&self, terrain: &mut Terrain) -> Result<(), GenerationError> {
        self.run_cancellable(terrain, &CancelFlag::new())
    }

    /// Cancellable variant of [`run`](Self::run); the flag is handed to every
    /// stage and polled between row batches.
    pub fn run_cancellable(
        &self,
        terrain: &mut Terrain,
        cancel: &CancelFlag,
    ) -> Result<(), GenerationError> {
        let mut completed: Vec<StageId> = Vec::new();

        for stage in &self.stages {
            for dep in stage.dependencies() {
                if !completed.contains(dep) {
                    return Err(GenerationError::MissingDependency(
                        stage.name().to_string(),
                        dep.name().to_string(),
                    ));
                }
            }

            log::debug!("running stage '{}'", stage.name());
            stage.execute(terrain, cancel)?;
            completed.push(stage.id());
        }

        Ok(())
    }
}

/// Resolves the height field a dependent stage reads, reporting the missing
/// prerequisite when a stage is executed out of order.
fn require_height_field<'t>(
    terrain: &'t Terrain,
    stage: &str,
) -> Result<&'t HeightField, GenerationError> {
    terrain.height_field.as_ref().ok_or_else(|| {
        GenerationError::MissingDependency(
            stage.to_string(),
            StageId::HeightField.name().to_string(),
        )
    })
}

/// Height field generation stage: validates the configuration, then runs the
/// fractal accumulation.
pub struct HeightFieldStage;

impl GenerationStage for HeightFieldStage {
    fn id(&self) -> StageId {
        StageId::HeightField
    }

    fn name(&self) -> &str {
        "Height Field Generation"
    }

    fn execute(&self, terrain: &mut Terrain, cancel: &CancelFlag) -> Result<(), GenerationError> {
        let field = generate_height_field_cancellable(&terrain.config, cancel)?;
        terrain.height_field = Some(field);
        Ok(())
    }
}

/// Mesh construction stage: triangulates the height field and computes
/// per-vertex normals.
pub struct MeshStage;

impl GenerationStage for MeshStage {
    fn id(&self) -> StageId {
        StageId::Mesh
    }

    fn name(&self) -> &str {
        "Mesh Construction"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::HeightField]
    }

    fn execute(&self, terrain: &mut Terrain, cancel: &CancelFlag) -> Result<(), GenerationError> {
        let field = require_height_field(terrain, self.name())?;
        let mesh = build_mesh_cancellable(field, cancel)?;
        terrain.mesh = Some(mesh);
        Ok(())
    }
}

/// Biome classification stage: assigns each cell the first matching band
/// from the artifact's biome table.
pub struct BiomeStage;

impl GenerationStage for BiomeStage {
    fn id(&self) -> StageId {
        StageId::Biomes
    }

    fn name(&self) -> &str {
        "Biome Classification"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::HeightField]
    }

    fn execute(&self, terrain: &mut Terrain, cancel: &CancelFlag) -> Result<(), GenerationError> {
        let field = require_height_field(terrain, self.name())?;
        let map = classify_cancellable(field, &terrain.biomes, cancel)?;
        terrain.biome_map = Some(map);
        Ok(())
    }
}

/// Texture synthesis stage.
///
/// Without a default biome, any unassigned cell fails the stage with
/// [`GenerationError::UnassignedCell`]. With one, unassigned cells take the
/// default biome's color.
#[derive(Default)]
pub struct TextureStage {
    pub default_biome: Option<Biome>,
}

impl TextureStage {
    /// Creates the erroring variant: unassigned cells fail the stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the fallback variant painting unassigned cells with `biome`.
    pub fn with_default_biome(biome: Biome) -> Self {
        Self {
            default_biome: Some(biome),
        }
    }
}

impl GenerationStage for TextureStage {
    fn id(&self) -> StageId {
        StageId::Texture
    }

    fn name(&self) -> &str {
        "Texture Synthesis"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Biomes]
    }

    fn execute(&self, terrain: &mut Terrain, cancel: &CancelFlag) -> Result<(), GenerationError> {
        let map = terrain.biome_map.as_ref().ok_or_else(|| {
            GenerationError::MissingDependency(
                self.name().to_string(),
                StageId::Biomes.name().to_string(),
            )
        })?;

        let texture = match &self.default_biome {
            Some(default) => {
                synthesize_with_default_cancellable(map, &terrain.biomes, default, cancel)?
            }
            None => synthesize_cancellable(map, &terrain.biomes, cancel)?,
        };
        terrain.texture = Some(texture);
        Ok(())
    }
}

/// Runs the full four-stage pipeline over a fresh artifact.
///
/// This is the entry point external collaborators call: height field, mesh,
/// biome map and texture come back together on the returned [`Terrain`]. On
/// any failure the error is returned instead; hosts that want the outputs of
/// completed stages to survive a failure drive a [`Pipeline`] over their own
/// artifact.
pub fn generate(config: GenerationConfig, biomes: BiomeTable) -> Result<Terrain, GenerationError> {
    generate_cancellable(config, biomes, &CancelFlag::new())
}

/// Cancellable variant of [`generate`].
pub fn generate_cancellable(
    config: GenerationConfig,
    biomes: BiomeTable,
    cancel: &CancelFlag,
) -> Result<Terrain, GenerationError> {
    let mut pipeline = Pipeline::new();
    pipeline
        .add_stage(HeightFieldStage)
        .add_stage(MeshStage)
        .add_stage(BiomeStage)
        .add_stage(TextureStage::new());

    let mut terrain = Terrain::new(config, biomes);
    pipeline.run_cancellable(&mut terrain, cancel)?;

    if let Some(mesh) = &terrain.mesh {
        log::info!(
            "generated {}x{} terrain: {} vertices, {} triangles",
            terrain.config.width,
            terrain.config.height,
            mesh.vertex_count(),
            mesh.triangle_count(),
        );
    }

    Ok(terrain)
}
