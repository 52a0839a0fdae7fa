//! PNG export for height fields and textures.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma};

use crate::terrain::HeightField;
use crate::texture::Texture;

use super::ExportError;

/// Options for height field PNG export.
///
/// The `[min_height, max_height]` range is the explicit scaling step applied
/// to the unnormalized fractal sums before quantization; heights outside the
/// range are clamped.
#[derive(Debug, Clone)]
pub struct HeightPngOptions {
    /// Height mapped to black.
    pub min_height: f32,
    /// Height mapped to white.
    pub max_height: f32,
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for HeightPngOptions {
    fn default() -> Self {
        Self {
            min_height: -1.0,
            max_height: 1.0,
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

impl HeightPngOptions {
    /// Creates options spanning the field's own height range.
    pub fn auto_range(field: &HeightField) -> Self {
        let (min, max) = field.height_range();
        Self {
            min_height: min,
            max_height: max,
            ..Default::default()
        }
    }
}

/// Options for texture PNG export.
#[derive(Debug, Clone)]
pub struct TexturePngOptions {
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for TexturePngOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

/// Exports a height field as a 16-bit grayscale PNG.
///
/// One pixel per vertex, so the image is `(width + 1) x (height + 1)` for a
/// `width x height` cell grid. Rejects `min_height >= max_height`.
pub fn export_height_field_png(
    field: &HeightField,
    path: &Path,
    options: &HeightPngOptions,
) -> Result<(), ExportError> {
    let min = options.min_height;
    let max = options.max_height;

    if min >= max {
        return Err(ExportError::InvalidHeightRange(min, max));
    }

    let cols = field.vertex_cols();
    let rows = field.vertex_rows();
    let range = max - min;

    let mut img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::new(cols, rows);
    for (x, y) in field.vertex_coords() {
        let normalized = ((field.get(x, y) - min) / range).clamp(0.0, 1.0);
        let value = (normalized * 65535.0) as u16;
        img.put_pixel(x, y, Luma([value]));
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);

    // The encoder wants bytes, not u16 samples.
    let byte_slice: &[u8] = bytemuck::cast_slice(img.as_raw());
    encoder.write_image(byte_slice, cols, rows, image::ExtendedColorType::L16)?;

    Ok(())
}

/// Exports a synthesized texture as an RGBA8 PNG, one pixel per cell.
pub fn export_texture_png(
    texture: &Texture,
    path: &Path,
    options: &TexturePngOptions,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);

    encoder.write_image(
        texture.as_bytes(),
        texture.width(),
        texture.height(),
        image::ExtendedColorType::Rgba8,
    )?;

    Ok(())
}
