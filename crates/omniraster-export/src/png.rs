//! PNG export through the `image` crate

use image::{ImageBuffer, ImageEncoder, RgbImage};
use omniraster_core::{
    error::{ExportError, Result},
    traits::Exporter,
    types::BitmapData,
};

use crate::rgb_bytes;

/// Encode an image as an 8-bit RGB PNG
pub fn encode_bitmap_to_png(image: &BitmapData) -> Result<Vec<u8>> {
    let rgb = rgb_bytes(image)?;
    let img: RgbImage = ImageBuffer::from_raw(image.width, image.height, rgb).ok_or_else(|| {
        ExportError::EncodingFailed("Failed to create image buffer from RGB data".into())
    })?;

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );
    encoder
        .write_image(img.as_raw(), image.width, image.height, image::ExtendedColorType::Rgb8)
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    Ok(png_data)
}

/// PNG exporter
///
/// ```
/// use omniraster_export::PngExporter;
/// use omniraster_core::{BitmapData, Exporter};
///
/// let png = PngExporter::new().export(&BitmapData::filled(4, 4, [0, 0, 0]))?;
/// assert_eq!(&png[1..4], b"PNG");
/// # Ok::<(), omniraster_core::RasterError>(())
/// ```
pub struct PngExporter;

impl PngExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for PngExporter {
    fn name(&self) -> &'static str {
        "png"
    }

    fn export(&self, image: &BitmapData) -> Result<Vec<u8>> {
        encode_bitmap_to_png(image)
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn mime_type(&self) -> &'static str {
        "image/png"
    }
}

impl Default for PngExporter {
    fn default() -> Self {
        Self::new()
    }
}
