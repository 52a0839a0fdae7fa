//! Terrain generation module.
//!
//! Provides the generation configuration, the coherent noise sampler, and the
//! height field produced by fractal octave accumulation.

mod config;
mod height_field;
mod heightmap;
mod sampler;

pub use config::{ConfigError, GenerationConfig};
pub use height_field::HeightField;
pub use heightmap::{generate_height_field, generate_height_field_cancellable};
pub use sampler::{to_signed, NoiseSampler};
