//! The contracts every renderer and exporter speaks
//!
//! Renderers are looked up by name and then called with the same inputs no
//! matter which hardware mode they emulate. Exporters turn the finished
//! image into file bytes.
//!
//! ```
//! use omniraster_core::config::PaletteConfig;
//! use omniraster_core::traits::Renderer;
//! use omniraster_core::types::{BitmapData, RenderInput, RendererDescriptor};
//! use omniraster_core::Result;
//!
//! struct Blank;
//!
//! impl Renderer for Blank {
//!     fn name(&self) -> &'static str {
//!         "blank"
//!     }
//!
//!     fn descriptor(&self) -> RendererDescriptor {
//!         RendererDescriptor::new("blank", 1)
//!     }
//!
//!     fn render(&self, input: &RenderInput, config: &PaletteConfig) -> Result<BitmapData> {
//!         Ok(BitmapData::filled(
//!             input.bytes_per_row as u32,
//!             input.num_rows as u32,
//!             config.preferences.empty_background_color,
//!         ))
//!     }
//! }
//! ```

use crate::config::PaletteConfig;
use crate::types::{BitmapData, RenderInput, RendererDescriptor};
use crate::Result;

/// Draws a byte buffer as an RGB image
pub trait Renderer: Send + Sync {
    /// Display name, also the lookup key
    fn name(&self) -> &'static str;

    /// Geometry of the output
    fn descriptor(&self) -> RendererDescriptor;

    /// Some modes need the row width rounded, e.g. to a multiple of the
    /// bitplane count
    fn validate_bytes_per_row(&self, bytes_per_row: usize) -> usize {
        bytes_per_row
    }

    /// Render the input; the result is owned by the caller
    fn render(&self, input: &RenderInput, config: &PaletteConfig) -> Result<BitmapData>;
}

/// Writes a rendered image in some file format
pub trait Exporter: Send + Sync {
    /// Name of the exporter
    fn name(&self) -> &'static str;

    /// Encode the image
    fn export(&self, image: &BitmapData) -> Result<Vec<u8>>;

    /// File extension for this format
    fn extension(&self) -> &'static str;

    /// MIME type for this format
    fn mime_type(&self) -> &'static str;
}
