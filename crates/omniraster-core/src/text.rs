//! Text-mode renderers: bytes are glyph numbers, each drawn as a cell
//!
//! A [`FontRenderer`] names a hardware text mode and its aspect correction.
//! Pair it with glyph data through [`FontRenderer::with_font`] to get a
//! [`TextRenderer`], which implements [`Renderer`] like the bitmap modes.
//!
//! ```
//! use omniraster_core::config::PaletteConfig;
//! use omniraster_core::text::find_font_renderer;
//! use omniraster_core::{RenderInput, Renderer};
//!
//! let antic5 = find_font_renderer("Antic 5 (40x12, 5 color)")?;
//! let text = antic5.with_font(vec![0u8; 1024]);
//! let data = [0x21, 0x22];
//! let style = [0, 0];
//! let input = RenderInput::new(&data, &style, 2, 1)?;
//! let image = text.render(&input, &PaletteConfig::default())?;
//! assert_eq!((image.width, image.height), (16, 16));
//! # Ok::<(), omniraster_core::RasterError>(())
//! ```

use std::sync::Arc;

use crate::bits::intscale;
use crate::char_map::CharacterMapping;
use crate::config::PaletteConfig;
use crate::error::{RasterError, Result};
use crate::font::{BakedFont, FontDefinition, FontMode, GlyphHalf};
use crate::font_cache::FontCache;
use crate::style::StyleClass;
use crate::traits::Renderer;
use crate::types::{BitmapData, RenderInput, RendererDescriptor};

/// A named text mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontRenderer {
    name: &'static str,
    mode: FontMode,
    scale_width: usize,
    scale_height: usize,
}

impl FontRenderer {
    pub const fn new(name: &'static str, mode: FontMode) -> Self {
        Self {
            name,
            mode,
            scale_width: 1,
            scale_height: 1,
        }
    }

    pub const fn scaled(mut self, scale_width: usize, scale_height: usize) -> Self {
        self.scale_width = scale_width;
        self.scale_height = scale_height;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn mode(&self) -> FontMode {
        self.mode
    }

    pub fn descriptor(&self) -> RendererDescriptor {
        let (char_w, _) = self.mode.char_size();
        RendererDescriptor::new(self.name, char_w).scaled(self.scale_width, self.scale_height)
    }

    /// Attach glyph data
    pub fn with_font(self, glyph_bytes: impl Into<Arc<[u8]>>) -> TextRenderer {
        self.with_font_definition(FontDefinition::for_mode(glyph_bytes, self.mode))
    }

    /// Attach the mode's ROM font
    pub fn with_default_font(self) -> TextRenderer {
        self.with_font_definition(self.mode.default_font())
    }

    pub fn with_font_definition(self, font: FontDefinition) -> TextRenderer {
        TextRenderer {
            renderer: self,
            font,
            mapping: CharacterMapping::Internal,
            zoom: 1,
            reverse: false,
        }
    }
}

/// A text mode with its font, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRenderer {
    renderer: FontRenderer,
    font: FontDefinition,
    mapping: CharacterMapping,
    zoom: usize,
    reverse: bool,
}

impl TextRenderer {
    pub fn with_mapping(mut self, mapping: CharacterMapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// Extra integer magnification on top of the mode's aspect correction
    pub fn with_zoom(mut self, zoom: usize) -> Self {
        self.zoom = zoom.max(1);
        self
    }

    /// Swap colors in GR.0, or show the second flash frame on Apple ][
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn font(&self) -> &FontDefinition {
        &self.font
    }

    pub fn font_renderer(&self) -> &FontRenderer {
        &self.renderer
    }

    /// The five glyph tables for `config`, shared through the process-wide
    /// font cache when it is enabled
    pub fn baked_font(&self, config: &PaletteConfig) -> Arc<BakedFont> {
        self.baked_font_in(FontCache::global(), config)
    }

    pub fn baked_font_in(&self, cache: &FontCache, config: &PaletteConfig) -> Arc<BakedFont> {
        cache.get_or_bake(&self.font.glyph_bytes, self.renderer.mode, config, self.reverse)
    }

    /// Stamp glyphs from an already baked font
    pub fn render_baked(&self, input: &RenderInput, font: &BakedFont, config: &PaletteConfig) -> BitmapData {
        let (char_w, char_h) = font.char_size();
        let bytes_per_row = input.bytes_per_row;
        let mut image = BitmapData::filled(
            (bytes_per_row * char_w) as u32,
            (input.num_rows * char_h) as u32,
            config.preferences.background_color,
        );
        let stride = bytes_per_row * char_w * 3;
        let cell = char_w * 3;

        for row in 0..input.num_rows {
            for col in 0..bytes_per_row {
                let index = row * bytes_per_row + col;
                if !input.is_valid(index) {
                    continue;
                }
                let glyph = self.mapping.map(input.byte(index)) as usize;
                let table = font.for_class(StyleClass::from_style(input.style_at(index)));
                for y in 0..char_h {
                    let dest = (row * char_h + y) * stride + col * cell;
                    image.data[dest..dest + cell].copy_from_slice(table.glyph_row(glyph, y));
                }
            }
        }
        image
    }
}

impl Renderer for TextRenderer {
    fn name(&self) -> &'static str {
        self.renderer.name
    }

    fn descriptor(&self) -> RendererDescriptor {
        self.renderer
            .descriptor()
            .scaled(self.renderer.scale_width * self.zoom, self.renderer.scale_height * self.zoom)
    }

    fn render(&self, input: &RenderInput, config: &PaletteConfig) -> Result<BitmapData> {
        let font = self.baked_font(config);
        let image = self.render_baked(input, &font, config);
        log::debug!(
            "{}: {}x{} cells, {} valid, zoom {}",
            self.renderer.name,
            input.bytes_per_row,
            input.num_rows,
            input.count(),
            self.zoom
        );
        Ok(intscale(
            image,
            self.zoom * self.renderer.scale_height,
            self.zoom * self.renderer.scale_width,
        ))
    }
}

/// Every text mode, in menu order
pub static FONT_RENDERERS: &[FontRenderer] = &[
    FontRenderer::new("Antic 2 (Gr 0)", FontMode::Gr0),
    FontRenderer::new("Antic 4 (40x24, 5 color)", FontMode::Antic4),
    FontRenderer::new("Antic 5 (40x12, 5 color)", FontMode::Antic4).scaled(1, 2),
    FontRenderer::new("Antic 6 (Gr 1) Uppercase and Numbers", FontMode::Antic6(GlyphHalf::Upper)).scaled(2, 1),
    FontRenderer::new("Antic 6 (Gr 1) Lowercase and Symbols", FontMode::Antic6(GlyphHalf::Lower)).scaled(2, 1),
    FontRenderer::new("Antic 7 (Gr 2) Uppercase and Numbers", FontMode::Antic6(GlyphHalf::Upper)).scaled(2, 2),
    FontRenderer::new("Antic 7 (Gr 2) Lowercase and Symbols", FontMode::Antic6(GlyphHalf::Lower)).scaled(2, 2),
    FontRenderer::new("Apple ][", FontMode::Apple2),
];

/// Look up a text mode by display name
pub fn find_font_renderer(name: &str) -> Result<FontRenderer> {
    FONT_RENDERERS
        .iter()
        .find(|r| r.name == name)
        .copied()
        .ok_or_else(|| RasterError::RendererNotFound(name.to_string()))
}
