//! Height field generation from fractal noise.

use rayon::prelude::*;

use super::config::GenerationConfig;
use super::height_field::HeightField;
use super::sampler::{to_signed, NoiseSampler};
use crate::cancel::CancelFlag;
use crate::error::GenerationError;

/// Generates the height field described by `config`.
///
/// Validates the configuration before any sampling happens, then accumulates
/// the fractal octave sum for every vertex. Rows are filled in parallel;
/// each vertex depends only on its own coordinates, so the result is
/// bit-identical across runs and thread counts.
pub fn generate_height_field(config: &GenerationConfig) -> Result<HeightField, GenerationError> {
    generate_height_field_cancellable(config, &CancelFlag::new())
}

/// Cancellable variant of [`generate_height_field`].
///
/// The flag is polled between row batches. A cancelled run returns
/// [`GenerationError::Cancelled`] and the partial buffer is dropped, never
/// returned.
pub fn generate_height_field_cancellable(
    config: &GenerationConfig,
    cancel: &CancelFlag,
) -> Result<HeightField, GenerationError> {
    config.validate()?;

    let sampler = NoiseSampler::new(config.seed);
    let cols = config.width as usize + 1;
    let rows = config.height as usize + 1;

    let mut values = vec![0.0f32; cols * rows];
    values.par_chunks_mut(cols).enumerate().for_each(|(y, row)| {
        if cancel.is_cancelled() {
            return;
        }
        for (x, slot) in row.iter_mut().enumerate() {
            *slot = fractal_height(&sampler, config, x as f64, y as f64);
        }
    });

    if cancel.is_cancelled() {
        return Err(GenerationError::Cancelled);
    }

    Ok(HeightField {
        width: config.width,
        height: config.height,
        values,
    })
}

/// Accumulates the octave sum for one vertex.
///
/// The sum is left unnormalized and unclamped; callers that want a height
/// multiplier apply it themselves (export normalization covers file output).
/// The signed remap happens exactly once per raw sample, here.
fn fractal_height(sampler: &NoiseSampler, config: &GenerationConfig, x: f64, y: f64) -> f32 {
    let mut height = 0.0f64;
    let mut amplitude = 1.0f64;
    let mut frequency = 1.0f64;

    for _ in 0..config.octaves {
        let sample_x = (x + config.offset_x) / config.scale * frequency;
        let sample_y = (y + config.offset_y) / config.scale * frequency;
        height += to_signed(sampler.sample(sample_x, sample_y)) * amplitude;
        frequency *= config.lacunarity;
        amplitude *= config.persistence;
    }

    height as f32
}
