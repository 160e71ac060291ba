//! Export rendered screens to image files
//!
//! PNM needs nothing but a header and the pixel bytes, which makes it handy
//! for golden-image tests. PNG goes through the `image` crate.

use std::io::Write;
use std::path::Path;

use omniraster_core::{
    error::{ExportError, Result},
    traits::Exporter,
    types::{BitmapData, BitmapFormat},
};

pub mod png;

pub use png::PngExporter;

/// PNM pixmap exporter
pub struct PnmExporter {
    format: PnmFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PnmFormat {
    /// P3, decimal text
    Ascii,
    /// P6, raw bytes
    Binary,
}

impl PnmExporter {
    pub fn new(format: PnmFormat) -> Self {
        Self { format }
    }

    /// ASCII PPM (P3)
    pub fn ppm() -> Self {
        Self::new(PnmFormat::Ascii)
    }

    /// Binary PPM (P6)
    pub fn ppm_binary() -> Self {
        Self::new(PnmFormat::Binary)
    }

    pub fn format(&self) -> PnmFormat {
        self.format
    }

    fn export_bitmap(&self, image: &BitmapData) -> Result<Vec<u8>> {
        let rgb = rgb_bytes(image)?;
        let mut output = Vec::with_capacity(rgb.len() * 4 + 20);
        match self.format {
            PnmFormat::Ascii => {
                writeln!(&mut output, "P3")?;
                writeln!(&mut output, "{} {}", image.width, image.height)?;
                writeln!(&mut output, "255")?;
                for row in rgb.chunks((image.width as usize * 3).max(1)) {
                    for px in row.chunks_exact(3) {
                        write!(&mut output, "{} {} {} ", px[0], px[1], px[2])?;
                    }
                    writeln!(&mut output)?;
                }
            },
            PnmFormat::Binary => {
                write!(&mut output, "P6\n{} {}\n255\n", image.width, image.height)?;
                output.extend_from_slice(&rgb);
            },
        }
        Ok(output)
    }
}

/// Pixel bytes as packed RGB, checked against the image size
pub(crate) fn rgb_bytes(image: &BitmapData) -> Result<Vec<u8>> {
    let pixels = image.width as usize * image.height as usize;
    let expected = pixels * image.format.bytes_per_pixel();
    if image.data.len() < expected {
        return Err(ExportError::EncodingFailed(format!(
            "Buffer too small: expected {} bytes for {}x{} {:?}, got {}",
            expected,
            image.width,
            image.height,
            image.format,
            image.data.len()
        ))
        .into());
    }
    Ok(match image.format {
        BitmapFormat::Rgb8 => image.data[..expected].to_vec(),
        BitmapFormat::Gray8 => image.data[..expected].iter().flat_map(|&g| [g, g, g]).collect(),
    })
}

impl Exporter for PnmExporter {
    fn name(&self) -> &'static str {
        match self.format {
            PnmFormat::Ascii => "ppm",
            PnmFormat::Binary => "ppm-binary",
        }
    }

    fn export(&self, image: &BitmapData) -> Result<Vec<u8>> {
        self.export_bitmap(image)
    }

    fn extension(&self) -> &'static str {
        "ppm"
    }

    fn mime_type(&self) -> &'static str {
        "image/x-portable-pixmap"
    }
}

impl Default for PnmExporter {
    fn default() -> Self {
        Self::ppm_binary()
    }
}

/// Pick an exporter from an output file extension
pub fn exporter_for_path(path: &Path) -> Result<Box<dyn Exporter>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => Ok(Box::new(PngExporter::new())),
        "ppm" | "pnm" => Ok(Box::new(PnmExporter::ppm_binary())),
        other => Err(ExportError::FormatNotSupported(format!("no exporter for extension '{other}'")).into()),
    }
}

/// Encode `image` for `path` and write it
pub fn write_image(image: &BitmapData, path: &Path) -> Result<()> {
    let exporter = exporter_for_path(path)?;
    let bytes = exporter.export(image)?;
    std::fs::write(path, &bytes)
        .map_err(|e| ExportError::WriteFailed(format!("{}: {}", path.display(), e)))?;
    log::debug!(
        "wrote {}x{} {} to {} ({} bytes)",
        image.width,
        image.height,
        exporter.name(),
        path.display(),
        bytes.len()
    );
    Ok(())
}
