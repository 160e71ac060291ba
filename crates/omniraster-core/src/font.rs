//! Font baker: glyph bytes to pre-colored glyph images
//!
//! Text modes draw the same few hundred glyphs over and over, so each font is
//! drawn once per style palette into a [`GlyphTable`] and then stamped into
//! the screen by lookup. A [`BakedFont`] holds the five tables for the five
//! style classes.
//!
//! Glyph data is eight bytes per glyph, one byte per row, most significant
//! bit leftmost, except Apple ][ fonts where bit 0 is leftmost and bit 7 is
//! unused. Short data is zero padded and long data truncated to what the mode
//! expects; baking never fails.

use std::sync::Arc;

use crate::bits::intwscale;
use crate::color::{gr0_colors, PaletteSet};
use crate::config::PaletteConfig;
use crate::style::StyleClass;
use crate::types::{BitmapData, Rgb};

const GLYPH_BYTES: usize = 8;
const WHITE: Rgb = [255, 255, 255];
const BLACK: Rgb = [0, 0, 0];

/// Which half of an Atari font GR.1 and GR.2 draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphHalf {
    /// Glyphs 0..63: uppercase, digits, punctuation
    Upper,
    /// Glyphs 64..127: lowercase and graphics symbols
    Lower,
}

/// How glyph bits become colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontMode {
    /// One bit per pixel, inverse video in the top 128 slots
    Gr0,
    /// Two bits per pixel, four double-width pixels per row
    Antic4,
    /// One bit per pixel, 64 glyphs in four foreground colors
    Antic6(GlyphHalf),
    /// Seven pixels per row with inverse and flashing ranges
    Apple2,
}

impl FontMode {
    /// Width and height of a baked glyph
    pub const fn char_size(self) -> (usize, usize) {
        match self {
            FontMode::Apple2 => (7, 8),
            _ => (8, 8),
        }
    }

    /// Glyph data bytes after padding, for an input of `len` bytes
    pub fn expected_bytes(self, len: usize) -> usize {
        match self {
            FontMode::Apple2 if len >= 2048 => 2048,
            FontMode::Apple2 if len > 1024 => 2048,
            _ => 1024,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            FontMode::Gr0 => "gr0",
            FontMode::Antic4 => "antic4",
            FontMode::Antic6(GlyphHalf::Upper) => "antic6-upper",
            FontMode::Antic6(GlyphHalf::Lower) => "antic6-lower",
            FontMode::Apple2 => "apple2",
        }
    }
}

/// A font as loaded from disk or taken from [`BUILTIN_FONTS`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontDefinition {
    pub name: String,
    pub glyph_bytes: Arc<[u8]>,
    pub char_bit_width: usize,
    pub char_bit_height: usize,
    pub num_glyphs: usize,
    /// Only the top 128 slots hold normal glyphs; the rest are inverse and
    /// flashing copies
    pub has_blink: bool,
}

impl FontDefinition {
    /// An 8x8 Atari font
    pub fn atari(glyph_bytes: impl Into<Arc<[u8]>>) -> Self {
        let glyph_bytes = glyph_bytes.into();
        Self {
            name: String::from("custom"),
            num_glyphs: glyph_bytes.len() / GLYPH_BYTES,
            glyph_bytes,
            char_bit_width: 8,
            char_bit_height: 8,
            has_blink: false,
        }
    }

    /// A 7x8 Apple ][ font; 128 glyphs or fewer get inverse and flash ranges
    pub fn apple2(glyph_bytes: impl Into<Arc<[u8]>>) -> Self {
        let glyph_bytes = glyph_bytes.into();
        Self {
            name: String::from("custom"),
            num_glyphs: glyph_bytes.len() / GLYPH_BYTES,
            has_blink: glyph_bytes.len() <= 1024,
            glyph_bytes,
            char_bit_width: 7,
            char_bit_height: 8,
        }
    }

    /// The definition shape the given mode expects for these bytes
    pub fn for_mode(glyph_bytes: impl Into<Arc<[u8]>>, mode: FontMode) -> Self {
        match mode {
            FontMode::Apple2 => Self::apple2(glyph_bytes),
            _ => Self::atari(glyph_bytes),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// A font shipped inside the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinFont {
    pub name: &'static str,
    pub glyph_bytes: &'static [u8],
    pub apple2: bool,
}

impl BuiltinFont {
    pub fn definition(&self) -> FontDefinition {
        let glyphs: Arc<[u8]> = Arc::from(self.glyph_bytes);
        let font = if self.apple2 {
            FontDefinition::apple2(glyphs)
        } else {
            FontDefinition::atari(glyphs)
        };
        font.named(self.name)
    }
}

/// The 1024 byte Atari OS ROM character set
pub const ATARI_DEFAULT_FONT: BuiltinFont = BuiltinFont {
    name: "8x8 Atari Default Font",
    glyph_bytes: include_bytes!("../fonts/atari_default.fnt"),
    apple2: false,
};

pub const ATARI_COMPUTER_FONT: BuiltinFont = BuiltinFont {
    name: "8x8 Atari Custom Computer Font",
    glyph_bytes: include_bytes!("../fonts/atari_computer.fnt"),
    apple2: false,
};

/// 128 glyphs; inverse and flashing copies are derived when baking
pub const APPLE2_DEFAULT_FONT: BuiltinFont = BuiltinFont {
    name: "7x8 Apple ][ Default Font",
    glyph_bytes: include_bytes!("../fonts/apple2_default.fnt"),
    apple2: true,
};

/// All 256 glyphs including mouse text, no flashing
pub const APPLE2_MOUSETEXT_FONT: BuiltinFont = BuiltinFont {
    name: "7x8 Apple ][ Font w/Mouse Text",
    glyph_bytes: include_bytes!("../fonts/apple2_mousetext.fnt"),
    apple2: true,
};

pub static BUILTIN_FONTS: &[BuiltinFont] = &[
    ATARI_DEFAULT_FONT,
    ATARI_COMPUTER_FONT,
    APPLE2_DEFAULT_FONT,
    APPLE2_MOUSETEXT_FONT,
];

/// Look up a built-in font by name, ignoring case
pub fn find_builtin_font(name: &str) -> Option<&'static BuiltinFont> {
    BUILTIN_FONTS.iter().find(|f| f.name.eq_ignore_ascii_case(name))
}

impl FontMode {
    /// The ROM font a mode shows when no font is loaded
    pub fn default_font(self) -> FontDefinition {
        match self {
            FontMode::Apple2 => APPLE2_DEFAULT_FONT.definition(),
            _ => ATARI_DEFAULT_FONT.definition(),
        }
    }
}

/// Glyph images for every slot, stored as one tall strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphTable {
    pub char_w: usize,
    pub char_h: usize,
    pub num_slots: usize,
    strip: BitmapData,
}

impl GlyphTable {
    fn new(char_w: usize, char_h: usize, num_slots: usize) -> Self {
        Self {
            char_w,
            char_h,
            num_slots,
            strip: BitmapData::filled(char_w as u32, (char_h * num_slots) as u32, BLACK),
        }
    }

    #[inline]
    fn set(&mut self, slot: usize, x: usize, y: usize, rgb: Rgb) {
        self.strip
            .set_pixel(x as u32, (slot * self.char_h + y) as u32, &rgb);
    }

    /// Color of one pixel of one slot
    pub fn pixel(&self, slot: usize, x: usize, y: usize) -> Rgb {
        let p = self.strip.pixel(x as u32, (slot * self.char_h + y) as u32);
        [p[0], p[1], p[2]]
    }

    /// RGB bytes of row `y` of `slot`
    #[inline]
    pub fn glyph_row(&self, slot: usize, y: usize) -> &[u8] {
        let stride = self.char_w * 3;
        let start = (slot * self.char_h + y) * stride;
        &self.strip.data[start..start + stride]
    }

    /// Repeat every column `factor` times
    fn widen(self, factor: usize) -> Self {
        Self {
            char_w: self.char_w * factor,
            char_h: self.char_h,
            num_slots: self.num_slots,
            strip: intwscale(self.strip, factor),
        }
    }
}

/// The registers one bake draws with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontColors {
    /// PCOLR0..3, COLPF0..3, COLBK
    pub registers: Vec<Rgb>,
    pub text_fg: Rgb,
    pub text_bg: Rgb,
}

impl FontColors {
    #[inline]
    fn register(&self, index: usize) -> Rgb {
        self.registers
            .get(index)
            .or_else(|| self.registers.first())
            .copied()
            .unwrap_or(BLACK)
    }
}

fn pad_glyph_bytes(glyph_bytes: &[u8], mode: FontMode) -> Vec<u8> {
    let mut data = glyph_bytes.to_vec();
    data.resize(mode.expected_bytes(glyph_bytes.len()), 0);
    data
}

#[inline]
fn glyph_bit(data: &[u8], glyph: usize, row: usize, col: usize) -> bool {
    (data[glyph * GLYPH_BYTES + row] >> (7 - col)) & 1 == 1
}

/// Draw every glyph slot of `glyph_bytes` with one set of colors
///
/// `reverse` swaps foreground and background in GR.0; for Apple ][ fonts
/// with a flashing range it selects the second flash frame.
pub fn bake_font(glyph_bytes: &[u8], mode: FontMode, colors: &FontColors, reverse: bool) -> GlyphTable {
    let data = pad_glyph_bytes(glyph_bytes, mode);
    match mode {
        FontMode::Gr0 => bake_gr0(&data, colors, reverse),
        FontMode::Antic4 => bake_antic4(&data, colors).widen(2),
        FontMode::Antic6(half) => bake_antic6(&data, half, colors),
        FontMode::Apple2 => bake_apple2(&data, colors, reverse),
    }
}

fn bake_gr0(data: &[u8], colors: &FontColors, reverse: bool) -> GlyphTable {
    let (fg, bg) = if reverse {
        (colors.text_bg, colors.text_fg)
    } else {
        (colors.text_fg, colors.text_bg)
    };
    let mut table = GlyphTable::new(8, 8, 256);
    for glyph in 0..128 {
        for y in 0..8 {
            for x in 0..8 {
                let on = glyph_bit(data, glyph, y, x);
                table.set(glyph, x, y, if on { fg } else { bg });
                table.set(glyph + 128, x, y, if on { bg } else { fg });
            }
        }
    }
    table
}

// Bit pairs 00/01/10/11 select COLBK/COLPF0/COLPF1/COLPF2; inverse glyphs
// use COLPF3 for 11.
fn bake_antic4(data: &[u8], colors: &FontColors) -> GlyphTable {
    let [pf0, pf1, pf2, pf3, bak] = [4, 5, 6, 7, 8].map(|i| colors.register(i));
    let mut table = GlyphTable::new(4, 8, 256);
    for glyph in 0..128 {
        for y in 0..8 {
            let b = data[glyph * GLYPH_BYTES + y];
            for x in 0..4 {
                let (normal, inverse) = match (b >> (6 - 2 * x)) & 3 {
                    0 => (bak, bak),
                    1 => (pf0, pf0),
                    2 => (pf1, pf1),
                    _ => (pf2, pf3),
                };
                table.set(glyph, x, y, normal);
                table.set(glyph + 128, x, y, inverse);
            }
        }
    }
    table
}

fn bake_antic6(data: &[u8], half: GlyphHalf, colors: &FontColors) -> GlyphTable {
    let first = match half {
        GlyphHalf::Upper => 0,
        GlyphHalf::Lower => 64,
    };
    let bg = colors.register(8);
    let mut table = GlyphTable::new(8, 8, 256);
    for band in 0..4 {
        let fg = colors.register(4 + band);
        for glyph in 0..64 {
            for y in 0..8 {
                for x in 0..8 {
                    let on = glyph_bit(data, first + glyph, y, x);
                    table.set(band * 64 + glyph, x, y, if on { fg } else { bg });
                }
            }
        }
    }
    table
}

fn bake_apple2(data: &[u8], colors: &FontColors, reverse: bool) -> GlyphTable {
    let (fg, bg) = (colors.text_fg, colors.text_bg);
    let mut table = GlyphTable::new(7, 8, 256);
    let draw = |table: &mut GlyphTable, slot: usize, glyph: usize, inverse: bool| {
        for y in 0..8 {
            let b = data[glyph * GLYPH_BYTES + y];
            for x in 0..7 {
                let on = (b >> x) & 1 == 1;
                table.set(slot, x, y, if on != inverse { fg } else { bg });
            }
        }
    };

    if data.len() >= 256 * GLYPH_BYTES {
        for glyph in 0..256 {
            draw(&mut table, glyph, glyph, false);
        }
    } else {
        for glyph in 0..128 {
            draw(&mut table, 128 + glyph, glyph, false);
        }
        for glyph in 0..64 {
            draw(&mut table, glyph, glyph, true);
            draw(&mut table, 64 + glyph, glyph, !reverse);
        }
    }
    table
}

/// Five glyph tables for one font, one per style class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BakedFont {
    pub mode: FontMode,
    pub normal: GlyphTable,
    pub highlight: GlyphTable,
    pub matched: GlyphTable,
    pub comment: GlyphTable,
    pub data: GlyphTable,
}

impl BakedFont {
    /// Bake `glyph_bytes` against the registers and preferences in `config`
    pub fn new(glyph_bytes: &[u8], mode: FontMode, config: &PaletteConfig, reverse: bool) -> Self {
        let [normal, highlight, matched, comment, data] =
            styled_colors(&normal_colors(mode, config), config)
                .map(|colors| bake_font(glyph_bytes, mode, &colors, reverse));
        let font = Self {
            mode,
            normal,
            highlight,
            matched,
            comment,
            data,
        };
        log::debug!(
            "baked {} font from {} bytes: {} slots of {}x{}",
            mode.name(),
            glyph_bytes.len(),
            font.normal.num_slots,
            font.normal.char_w,
            font.normal.char_h
        );
        font
    }

    pub fn for_class(&self, class: StyleClass) -> &GlyphTable {
        match class {
            StyleClass::Normal => &self.normal,
            StyleClass::Data => &self.data,
            StyleClass::Comment => &self.comment,
            StyleClass::Match => &self.matched,
            StyleClass::Highlight => &self.highlight,
        }
    }

    /// Width and height of one baked glyph
    pub fn char_size(&self) -> (usize, usize) {
        (self.normal.char_w, self.normal.char_h)
    }
}

/// Unstyled colors for a mode: the nine registers, plus white on black for
/// Apple ][ or the GR.0 pair otherwise
pub fn normal_colors(mode: FontMode, config: &PaletteConfig) -> FontColors {
    let indices: Vec<usize> = (0..9).collect();
    let registers = config.select_registers(&indices);
    let (text_fg, text_bg) = match mode {
        FontMode::Apple2 => (WHITE, BLACK),
        _ => {
            let (fg, bg) = gr0_colors(&config.antic_color_registers);
            let converted = config.convert(&[fg, bg]);
            (converted[0], converted[1])
        },
    };
    FontColors {
        registers,
        text_fg,
        text_bg,
    }
}

/// The five styled variants of `normal` in the order normal, highlight,
/// match, comment, data
pub fn styled_colors(normal: &FontColors, config: &PaletteConfig) -> [FontColors; 5] {
    let registers: PaletteSet = config.palette_set(normal.registers.clone());
    let text = config.palette_set(vec![normal.text_fg, normal.text_bg]);
    [
        StyleClass::Normal,
        StyleClass::Highlight,
        StyleClass::Match,
        StyleClass::Comment,
        StyleClass::Data,
    ]
    .map(|class| FontColors {
        registers: registers.for_class(class).to_vec(),
        text_fg: text.for_class(class)[0],
        text_bg: text.for_class(class)[1],
    })
}
