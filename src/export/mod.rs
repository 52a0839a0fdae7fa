//! Export module for saving generated terrain data to files.
//!
//! Supports 16-bit grayscale PNG heightmaps and RGBA texture PNGs for
//! inspection, plus raw little-endian buffers (f32 heights, RGBA8 pixels)
//! usable as golden-file test fixtures or for engine imports.

mod png;
mod raw;

use thiserror::Error;

pub use png::{export_height_field_png, export_texture_png, HeightPngOptions, TexturePngOptions};
pub use raw::{
    expected_height_field_size, expected_texture_size, read_height_field_r32, read_texture_rgba8,
    write_height_field_r32, write_texture_rgba8,
};

/// Errors that can occur while writing or reading export files.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid height range: min ({0}) >= max ({1})")]
    InvalidHeightRange(f32, f32),
    #[error("File length {0} does not match a {1}x{2} grid")]
    LengthMismatch(usize, u32, u32),
}
