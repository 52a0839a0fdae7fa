//! Raw little-endian buffer export, the canonical fixture format.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::terrain::HeightField;
use crate::texture::Texture;

use super::ExportError;

/// Writes the height field as row-major little-endian f32 values.
pub fn write_height_field_r32(field: &HeightField, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for &height in field.as_slice() {
        writer.write_all(&height.to_le_bytes())?;
    }

    writer.flush()?;
    Ok(())
}

/// Reads a height field written by [`write_height_field_r32`].
///
/// `width` and `height` are grid cell counts; the file must hold exactly
/// `(width + 1) * (height + 1)` little-endian f32 values, row-major.
pub fn read_height_field_r32(
    path: &Path,
    width: u32,
    height: u32,
) -> Result<HeightField, ExportError> {
    let data = std::fs::read(path)?;
    let expected = expected_height_field_size(width, height) as usize;
    if data.len() != expected {
        return Err(ExportError::LengthMismatch(data.len(), width, height));
    }

    let values = data
        .chunks_exact(4)
        .map(|bytes| f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        .collect();
    HeightField::from_raw(width, height, values)
        .map_err(|_| ExportError::LengthMismatch(data.len(), width, height))
}

/// Writes the texture as row-major RGBA8 bytes.
pub fn write_texture_rgba8(texture: &Texture, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(texture.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Reads a texture written by [`write_texture_rgba8`].
///
/// The file must hold exactly `width * height` RGBA8 pixels, row-major.
pub fn read_texture_rgba8(path: &Path, width: u32, height: u32) -> Result<Texture, ExportError> {
    let data = std::fs::read(path)?;
    let expected = expected_texture_size(width, height) as usize;
    if data.len() != expected {
        return Err(ExportError::LengthMismatch(data.len(), width, height));
    }

    let len = data.len();
    Texture::from_raw(width, height, data)
        .map_err(|_| ExportError::LengthMismatch(len, width, height))
}

/// Returns the expected file size in bytes for a height field fixture of the
/// given grid cell counts.
pub fn expected_height_field_size(width: u32, height: u32) -> u64 {
    (width as u64 + 1) * (height as u64 + 1) * 4
}

/// Returns the expected file size in bytes for a texture fixture.
pub fn expected_texture_size(width: u32, height: u32) -> u64 {
    width as u64 * height as u64 * 4
}
