//! Error taxonomy shared by all generation entry points.

use thiserror::Error;

use crate::terrain::ConfigError;

/// Errors reported by the generation pipeline and its component functions.
///
/// Every variant carries enough context to diagnose the failure (the
/// offending parameter, the affected cell coordinates, the stage ordering
/// violation). None of them are recovered from silently.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The configuration was rejected before any sampling took place.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// One or more cells matched no biome band and no default biome was
    /// supplied. `cells` lists every affected coordinate in row-major order.
    #[error("{count} cell(s) matched no biome band; first unassigned cell at ({first_x}, {first_y})")]
    UnassignedCell {
        count: usize,
        first_x: u32,
        first_y: u32,
        cells: Vec<(u32, u32)>,
    },

    /// Cooperative cancellation was observed between row batches. No partial
    /// output was published.
    #[error("generation cancelled")]
    Cancelled,

    /// A pipeline stage was scheduled before one of its prerequisites.
    #[error("stage '{0}' requires '{1}' to run first")]
    MissingDependency(String, String),
}

impl GenerationError {
    /// Builds the aggregated unassigned-cell error from the offending
    /// coordinates. `cells` must be non-empty.
    pub(crate) fn unassigned(cells: Vec<(u32, u32)>) -> Self {
        debug_assert!(!cells.is_empty());
        let (first_x, first_y) = cells.first().copied().unwrap_or((0, 0));
        Self::UnassignedCell {
            count: cells.len(),
            first_x,
            first_y,
            cells,
        }
    }
}
