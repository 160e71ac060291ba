//! Omniraster Core: bytes and styles in, RGB pixels out
//!
//! This crate turns a raw byte buffer from an 8-bit machine, plus a parallel
//! buffer of per-byte style flags, into an RGB image that looks like the
//! original hardware would have shown it. Atari ANTIC and GTIA modes,
//! Apple ][ hi-res, and generic bitplane layouts are all covered, and every
//! pixel is tinted according to whether its byte is selected, matched,
//! commented, or marked as data.
//!
//! ## The Pipeline
//!
//! 1. **Palette** - color registers become RGB and grow four styled variants
//! 2. **Unpack** - bytes become per-pixel color indices for the chosen mode
//! 3. **Compose** - style flags pick one of the five palettes per pixel
//! 4. **Scale** - integer upscaling restores the hardware aspect ratio
//!
//! Text modes add a font bake step: glyphs are drawn once per palette and
//! then stamped into the output by table lookup.
//!
//! ## Render Something
//!
//! ```
//! use omniraster_core::{bitmap, config::PaletteConfig, RenderInput, Renderer};
//!
//! let renderer = bitmap::find_bitmap_renderer("B/W, 1bpp, on=white")?;
//! let data = [0b1010_1010];
//! let style = [0];
//! let input = RenderInput::new(&data, &style, 1, 1)?;
//! let image = renderer.render(&input, &PaletteConfig::default())?;
//! assert_eq!((image.width, image.height), (8, 1));
//! assert_eq!(image.pixel(0, 0), &[255, 255, 255]);
//! # Ok::<(), omniraster_core::RasterError>(())
//! ```
//!
//! ## The Traits
//!
//! - [`Renderer`] - anything that draws a byte buffer to an image
//! - [`Exporter`] - anything that turns an image into file bytes

pub mod bitmap;
pub mod bits;
pub mod cache;
pub mod char_map;
pub mod color;
pub mod compose;
pub mod config;
pub mod error;
pub mod font;
pub mod font_cache;
pub mod jumpman;
pub mod palette_cache;
pub mod style;
pub mod text;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use error::{RasterError, Result};
pub use traits::{Exporter, Renderer};
pub use types::{BitmapData, BitmapFormat, RenderInput, RendererDescriptor, Rgb};

/// The data structures shared by every stage
pub mod types {
    use crate::error::{RasterError, Result};
    use crate::style::IGNORE_MASK;

    /// A 24-bit color
    pub type Rgb = [u8; 3];

    /// Raw pixel data
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct BitmapData {
        pub width: u32,
        pub height: u32,
        pub format: BitmapFormat,
        pub data: Vec<u8>,
    }

    /// How pixels are arranged in the bitmap
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum BitmapFormat {
        Rgb8,
        Gray8,
    }

    impl BitmapFormat {
        pub fn bytes_per_pixel(self) -> usize {
            match self {
                BitmapFormat::Rgb8 => 3,
                BitmapFormat::Gray8 => 1,
            }
        }
    }

    impl BitmapData {
        /// An RGB image filled with one color
        pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
            let count = width as usize * height as usize;
            let mut data = Vec::with_capacity(count * 3);
            for _ in 0..count {
                data.extend_from_slice(&color);
            }
            Self {
                width,
                height,
                format: BitmapFormat::Rgb8,
                data,
            }
        }

        /// Bytes of the pixel at `(x, y)`
        pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
            let bpp = self.format.bytes_per_pixel();
            let i = (y as usize * self.width as usize + x as usize) * bpp;
            &self.data[i..i + bpp]
        }

        pub fn set_pixel(&mut self, x: u32, y: u32, value: &[u8]) {
            let bpp = self.format.bytes_per_pixel();
            let i = (y as usize * self.width as usize + x as usize) * bpp;
            self.data[i..i + bpp].copy_from_slice(&value[..bpp]);
        }

        /// Iterate RGB pixels in row-major order
        pub fn rgb_pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
            self.data.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
        }
    }

    /// One render request: the bytes, their styles, and the screen geometry
    #[derive(Debug, Clone, Copy)]
    pub struct RenderInput<'a> {
        pub data: &'a [u8],
        pub style: &'a [u8],
        pub bytes_per_row: usize,
        pub num_rows: usize,
        count: usize,
    }

    impl<'a> RenderInput<'a> {
        /// Validate the buffers and geometry; every byte counts as valid
        pub fn new(
            data: &'a [u8],
            style: &'a [u8],
            bytes_per_row: usize,
            num_rows: usize,
        ) -> Result<Self> {
            if data.len() != style.len() {
                return Err(RasterError::StyleLengthMismatch {
                    data: data.len(),
                    style: style.len(),
                });
            }
            if bytes_per_row == 0 {
                return Err(RasterError::InvalidGeometry {
                    bytes_per_row,
                    num_rows,
                });
            }
            Ok(Self {
                data,
                style,
                bytes_per_row,
                num_rows,
                count: data.len(),
            })
        }

        /// Limit the number of valid bytes; anything past the data is clamped
        pub fn with_count(mut self, count: usize) -> Self {
            self.count = count.min(self.data.len());
            self
        }

        /// Number of bytes that produce content pixels
        pub fn count(&self) -> usize {
            self.count
        }

        /// Data byte at `index`, zero past the end
        #[inline]
        pub fn byte(&self, index: usize) -> u8 {
            self.data.get(index).copied().unwrap_or(0)
        }

        /// Style byte at `index`, zero past the end
        #[inline]
        pub fn style_at(&self, index: usize) -> u8 {
            self.style.get(index).copied().unwrap_or(0)
        }

        #[inline]
        pub fn is_valid(&self, index: usize) -> bool {
            index < self.count
        }
    }

    /// Static description of a renderer's geometry
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RendererDescriptor {
        pub name: &'static str,
        pub pixels_per_byte: usize,
        pub bitplanes: usize,
        pub scale_width: usize,
        pub scale_height: usize,
        pub ignore_mask: u8,
    }

    impl RendererDescriptor {
        pub const fn new(name: &'static str, pixels_per_byte: usize) -> Self {
            Self {
                name,
                pixels_per_byte,
                bitplanes: 1,
                scale_width: 1,
                scale_height: 1,
                ignore_mask: IGNORE_MASK,
            }
        }

        pub const fn scaled(mut self, scale_width: usize, scale_height: usize) -> Self {
            self.scale_width = scale_width;
            self.scale_height = scale_height;
            self
        }

        pub const fn with_bitplanes(mut self, bitplanes: usize) -> Self {
            self.bitplanes = bitplanes;
            self
        }
    }
}
