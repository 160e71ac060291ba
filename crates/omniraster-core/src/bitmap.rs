//! Bitmap renderers: one byte convention per hardware mode
//!
//! Each renderer is a [`BitmapMode`] plus a display name and an integer
//! aspect correction. Rendering unpacks the bytes into a [`PixelGrid`] of
//! register indices, lets the style composer pick palettes, then scales.
//! The two memory-map modes skip the register step and compute RGB directly
//! from the byte value.
//!
//! Renderers are found by their display name:
//!
//! ```
//! use omniraster_core::bitmap::find_bitmap_renderer;
//! use omniraster_core::Renderer;
//!
//! let gtia = find_bitmap_renderer("GTIA 9 (4bpp, 16 luminances, 1 color)").unwrap();
//! assert_eq!(gtia.descriptor().scale_width, 4);
//! assert!(find_bitmap_renderer("Antic Q").is_err());
//! ```

use crate::bits::{bit_reverse, intscale, unpack_bits};
use crate::color::PaletteSet;
use crate::compose::{compose, PixelGrid};
use crate::config::PaletteConfig;
use crate::error::{RasterError, Result};
use crate::style::SELECTED_BIT_MASK;
use crate::traits::Renderer;
use crate::types::{BitmapData, RenderInput, RendererDescriptor, Rgb};

const BLACK: Rgb = [0, 0, 0];
const WHITE: Rgb = [255, 255, 255];

/// Where a 1bpp mode gets its off/on colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonoColors {
    /// Off is white, on is black
    OnBlack,
    /// Off is black, on is white
    OnWhite,
    /// Off and on come from these register indices
    Registers([usize; 2]),
}

/// Plane weight order for bitplane modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    /// Plane `k` carries bit `k` of the color index
    Little,
    /// Plane `k` carries bit `N - 1 - k`
    Big,
}

/// How a 4bpp nibble becomes a color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FourBppPalette {
    /// Registers 0..15
    Direct,
    /// Luminance 0..15 on the background hue
    Gtia9,
    /// The nine hardware registers, rest black
    Gtia10,
    /// Hue 0..15 at the background luminance
    Gtia11,
}

/// Byte-to-pixel convention of a bitmap renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitmapMode {
    Mono(MonoColors),
    TwoBpp([usize; 4]),
    FourBpp(FourBppPalette),
    Apple2Linear(MonoColors),
    Apple2ScreenOrder(MonoColors),
    Apple2Artifacting,
    Bitplanes {
        planes: usize,
        endian: Endian,
        interleave: bool,
    },
    BytePerPixel,
    MemoryMap,
    MemoryAccess,
}

impl BitmapMode {
    pub const fn pixels_per_byte(&self) -> usize {
        match self {
            BitmapMode::Mono(_) | BitmapMode::Bitplanes { .. } => 8,
            BitmapMode::TwoBpp(_) => 4,
            BitmapMode::FourBpp(_) => 2,
            BitmapMode::Apple2Linear(_)
            | BitmapMode::Apple2ScreenOrder(_)
            | BitmapMode::Apple2Artifacting => 7,
            BitmapMode::BytePerPixel | BitmapMode::MemoryMap | BitmapMode::MemoryAccess => 1,
        }
    }

    pub const fn bitplanes(&self) -> usize {
        match self {
            BitmapMode::Bitplanes { planes, .. } => *planes,
            _ => 1,
        }
    }
}

/// A named bitmap mode with its aspect correction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapRenderer {
    name: &'static str,
    mode: BitmapMode,
    scale_width: usize,
    scale_height: usize,
}

impl BitmapRenderer {
    pub const fn new(name: &'static str, mode: BitmapMode) -> Self {
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

    pub fn mode(&self) -> BitmapMode {
        self.mode
    }

    /// The RGB registers this mode indexes into
    pub fn registers(&self, config: &PaletteConfig) -> Vec<Rgb> {
        match self.mode {
            BitmapMode::Mono(colors)
            | BitmapMode::Apple2Linear(colors)
            | BitmapMode::Apple2ScreenOrder(colors) => mono_registers(colors, config),
            BitmapMode::TwoBpp(regs) => config.select_registers(&regs),
            BitmapMode::FourBpp(palette) => four_bpp_registers(palette, config),
            BitmapMode::Apple2Artifacting => ARTIFACT_COLORS.to_vec(),
            BitmapMode::Bitplanes { planes, .. } => {
                let indices: Vec<usize> = (0..1usize << planes).collect();
                config.select_registers(&indices)
            },
            BitmapMode::BytePerPixel => config.rgb_registers(),
            BitmapMode::MemoryMap | BitmapMode::MemoryAccess => Vec::new(),
        }
    }

    /// Unpack the input into register indices without color lookup
    pub fn unpack(&self, input: &RenderInput) -> PixelGrid {
        let bpr = self.validate_bytes_per_row(input.bytes_per_row);
        match self.mode {
            BitmapMode::Mono(_) => unpack_linear(input, bpr, unpack_bits),
            BitmapMode::TwoBpp(_) => unpack_linear(input, bpr, |b| {
                [b >> 6, (b >> 4) & 3, (b >> 2) & 3, b & 3]
            }),
            BitmapMode::FourBpp(_) => unpack_linear(input, bpr, |b| [b >> 4, b & 0x0f]),
            BitmapMode::Apple2Linear(_) => unpack_linear(input, bpr, apple2_pixels),
            BitmapMode::Apple2ScreenOrder(_) => unpack_apple2_screen(input),
            BitmapMode::Apple2Artifacting => unpack_apple2_artifacting(input, bpr),
            BitmapMode::Bitplanes {
                planes,
                endian,
                interleave,
            } => unpack_bitplanes(input, bpr, planes, endian, interleave),
            BitmapMode::BytePerPixel => unpack_linear(input, bpr, |b| [b]),
            BitmapMode::MemoryMap | BitmapMode::MemoryAccess => PixelGrid::new(bpr, input.num_rows),
        }
    }
}

impl Renderer for BitmapRenderer {
    fn name(&self) -> &'static str {
        self.name
    }

    fn descriptor(&self) -> RendererDescriptor {
        RendererDescriptor::new(self.name, self.mode.pixels_per_byte())
            .with_bitplanes(self.mode.bitplanes())
            .scaled(self.scale_width, self.scale_height)
    }

    fn validate_bytes_per_row(&self, bytes_per_row: usize) -> usize {
        match self.mode {
            BitmapMode::Bitplanes { planes, .. } => bytes_per_row.div_ceil(planes) * planes,
            BitmapMode::Apple2ScreenOrder(_) => APPLE2_BYTES_PER_ROW,
            _ => bytes_per_row,
        }
    }

    fn render(&self, input: &RenderInput, config: &PaletteConfig) -> Result<BitmapData> {
        let palettes = config.palette_set(self.registers(config));
        self.render_with_palettes(input, config, &palettes)
    }
}

impl BitmapRenderer {
    /// Render with palettes the caller already built from [`Self::registers`]
    pub fn render_with_palettes(
        &self,
        input: &RenderInput,
        config: &PaletteConfig,
        palettes: &PaletteSet,
    ) -> Result<BitmapData> {
        let empty = config.preferences.empty_background_color;
        let image = match self.mode {
            BitmapMode::MemoryMap => memory_map_image(input, config),
            BitmapMode::MemoryAccess => memory_access_image(input, config),
            _ => compose(&self.unpack(input), palettes, empty),
        };
        log::debug!(
            "{}: {}x{} unscaled from {} bytes ({} valid), scale {}x{}",
            self.name,
            image.width,
            image.height,
            input.data.len(),
            input.count(),
            self.scale_width,
            self.scale_height
        );
        Ok(intscale(image, self.scale_height, self.scale_width))
    }
}

fn mono_registers(colors: MonoColors, config: &PaletteConfig) -> Vec<Rgb> {
    match colors {
        MonoColors::OnBlack => vec![WHITE, BLACK],
        MonoColors::OnWhite => vec![BLACK, WHITE],
        MonoColors::Registers(regs) => config.select_registers(&regs),
    }
}

fn four_bpp_registers(palette: FourBppPalette, config: &PaletteConfig) -> Vec<Rgb> {
    let antic = &config.antic_color_registers;
    match palette {
        FourBppPalette::Direct => {
            let indices: Vec<usize> = (0..16).collect();
            config.select_registers(&indices)
        },
        FourBppPalette::Gtia9 => {
            let hue = antic[8] & 0xf0;
            let values: Vec<u8> = (0..16).map(|lum| hue | lum).collect();
            config.convert(&values)
        },
        FourBppPalette::Gtia10 => {
            let mut values = antic.to_vec();
            values.resize(16, 0);
            config.convert(&values)
        },
        FourBppPalette::Gtia11 => {
            let lum = antic[8] & 0x0f;
            let values: Vec<u8> = (0..16).map(|hue| (hue << 4) | lum).collect();
            config.convert(&values)
        },
    }
}

fn unpack_linear<const P: usize>(
    input: &RenderInput,
    bytes_per_row: usize,
    pixels_of: impl Fn(u8) -> [u8; P],
) -> PixelGrid {
    let mut grid = PixelGrid::new(bytes_per_row * P, input.num_rows);
    for row in 0..input.num_rows {
        for col in 0..bytes_per_row {
            let index = row * bytes_per_row + col;
            if !input.is_valid(index) {
                continue;
            }
            let style = input.style_at(index);
            for (k, &p) in pixels_of(input.byte(index)).iter().enumerate() {
                grid.set(col * P + k, row, p, style);
            }
        }
    }
    grid
}

/// Apple ][ hi-res: bit 0 is the leftmost pixel, bit 7 is not displayed
fn apple2_pixels(b: u8) -> [u8; 7] {
    let bits = unpack_bits(bit_reverse(b));
    [bits[0], bits[1], bits[2], bits[3], bits[4], bits[5], bits[6]]
}

const APPLE2_BYTES_PER_ROW: usize = 40;
const APPLE2_ROWS: usize = 192;

/// Byte offset of hi-res screen line `y` within the 8K page
pub fn apple2_row_offset(y: usize) -> usize {
    let a = y / 64;
    let d = y - 64 * a;
    let b = d / 8;
    let c = d - 8 * b;
    1024 * c + 128 * b + 40 * a
}

fn unpack_apple2_screen(input: &RenderInput) -> PixelGrid {
    let mut grid = PixelGrid::new(APPLE2_BYTES_PER_ROW * 7, APPLE2_ROWS);
    for y in 0..APPLE2_ROWS {
        let start = apple2_row_offset(y);
        for col in 0..APPLE2_BYTES_PER_ROW {
            let index = start + col;
            if !input.is_valid(index) {
                continue;
            }
            let style = input.style_at(index);
            for (k, &p) in apple2_pixels(input.byte(index)).iter().enumerate() {
                grid.set(col * 7 + k, y, p, style);
            }
        }
    }
    grid
}

const ARTIFACT_BLACK: u8 = 0;
const ARTIFACT_WHITE: u8 = 1;
const ARTIFACT_VIOLET: u8 = 2;
const ARTIFACT_GREEN: u8 = 3;
const ARTIFACT_BLUE: u8 = 4;
const ARTIFACT_ORANGE: u8 = 5;

/// Black, white, violet, green, blue, orange
pub const ARTIFACT_COLORS: [Rgb; 6] = [
    BLACK,
    WHITE,
    [159, 0, 253],
    [32, 192, 0],
    [0, 128, 255],
    [240, 80, 0],
];

// Within a row, bytes pair up on even boundaries and their 14 visible bits
// form seven two-pixel cells. A cell with only its left bit lit is violet
// (blue when the owning byte's high bit is set), only its right bit is green
// (orange). Lit bits with a lit neighbor are white.
fn unpack_apple2_artifacting(input: &RenderInput, bytes_per_row: usize) -> PixelGrid {
    let width = bytes_per_row * 7;
    let mut grid = PixelGrid::new(width, input.num_rows);
    let padded = bytes_per_row + bytes_per_row % 2;
    let mut bits = vec![0u8; padded * 7];
    let mut warm = vec![false; padded * 7];

    for row in 0..input.num_rows {
        let row_start = row * bytes_per_row;
        for col in 0..padded {
            let b = if col < bytes_per_row {
                input.byte(row_start + col)
            } else {
                0
            };
            let pixels = apple2_pixels(b);
            for k in 0..7 {
                bits[col * 7 + k] = pixels[k];
                warm[col * 7 + k] = b & 0x80 != 0;
            }
        }

        for cell in 0..bits.len() / 2 {
            let left = cell * 2;
            let right = left + 1;
            let lit_before = left > 0 && bits[left - 1] == 1;
            let lit_after = right + 1 < bits.len() && bits[right + 1] == 1;
            let color = match (bits[left], bits[right]) {
                (0, 0) => ARTIFACT_BLACK,
                (1, 1) => ARTIFACT_WHITE,
                (1, 0) if lit_before => ARTIFACT_WHITE,
                (1, 0) if warm[left] => ARTIFACT_BLUE,
                (1, 0) => ARTIFACT_VIOLET,
                (_, _) if lit_after => ARTIFACT_WHITE,
                (_, _) if warm[left] => ARTIFACT_ORANGE,
                (_, _) => ARTIFACT_GREEN,
            };
            for x in [left, right] {
                if x >= width {
                    continue;
                }
                let index = row_start + x / 7;
                if input.is_valid(index) {
                    grid.set(x, row, color, input.style_at(index));
                }
            }
        }
    }
    grid
}

fn unpack_bitplanes(
    input: &RenderInput,
    bytes_per_row: usize,
    planes: usize,
    endian: Endian,
    interleave: bool,
) -> PixelGrid {
    let groups = bytes_per_row / planes;
    let mut grid = PixelGrid::new(groups * 8, input.num_rows);
    let mut indices = vec![0usize; planes];

    for row in 0..input.num_rows {
        let row_start = row * bytes_per_row;
        for group in 0..groups {
            for (plane, index) in indices.iter_mut().enumerate() {
                *index = if interleave {
                    row_start + plane * groups + group
                } else {
                    row_start + group * planes + plane
                };
            }
            if !indices.iter().all(|&i| input.is_valid(i)) {
                continue;
            }
            let style = indices.iter().fold(0u8, |s, &i| s | input.style_at(i));
            for bit in 0..8 {
                let mut value = 0u8;
                for (plane, &index) in indices.iter().enumerate() {
                    let weight = match endian {
                        Endian::Little => plane,
                        Endian::Big => planes - 1 - plane,
                    };
                    value |= ((input.byte(index) >> (7 - bit)) & 1) << weight;
                }
                grid.set(group * 8 + bit, row, value, style);
            }
        }
    }
    grid
}

fn memory_map_image(input: &RenderInput, config: &PaletteConfig) -> BitmapData {
    let prefs = &config.preferences;
    let bpr = input.bytes_per_row;
    let mut image = BitmapData::filled(bpr as u32, input.num_rows as u32, prefs.empty_background_color);
    let tint = prefs.highlight_background_color;
    for row in 0..input.num_rows {
        for col in 0..bpr {
            let index = row * bpr + col;
            if !input.is_valid(index) {
                continue;
            }
            let c = (input.byte(index) ^ 0xff) as u16;
            let rgb = if input.style_at(index) & SELECTED_BIT_MASK != 0 {
                [
                    ((tint[0] as u16 * c) >> 8) as u8,
                    ((tint[1] as u16 * c) >> 8) as u8,
                    ((tint[2] as u16 * c) >> 8) as u8,
                ]
            } else {
                [c as u8; 3]
            };
            image.set_pixel(col as u32, row as u32, &rgb);
        }
    }
    image
}

/// Access-type flags in priority order with their heatmap colors
pub const ACCESS_TYPE_COLORS: [(u8, Rgb); 5] = [
    (0x10, [255, 0, 255]), // display list
    (0x08, [0, 0, 255]),   // video
    (0x04, [255, 255, 0]), // execute
    (0x02, [255, 0, 0]),   // write
    (0x01, [0, 255, 0]),   // read
];

// The style channel carries access-type flags here; the data byte is the
// access intensity.
fn memory_access_image(input: &RenderInput, config: &PaletteConfig) -> BitmapData {
    let prefs = &config.preferences;
    let bpr = input.bytes_per_row;
    let mut image = BitmapData::filled(bpr as u32, input.num_rows as u32, prefs.empty_background_color);
    for row in 0..input.num_rows {
        for col in 0..bpr {
            let index = row * bpr + col;
            if !input.is_valid(index) {
                continue;
            }
            let flags = input.style_at(index);
            let base = ACCESS_TYPE_COLORS
                .iter()
                .find(|(flag, _)| flags & flag != 0)
                .map(|(_, rgb)| *rgb)
                .unwrap_or(BLACK);
            let c = input.byte(index) as u16;
            let mut rgb = [
                (base[0] as u16 * c / 256) as u8,
                (base[1] as u16 * c / 256) as u8,
                (base[2] as u16 * c / 256) as u8,
            ];
            if flags & SELECTED_BIT_MASK != 0 {
                rgb = crate::color::get_blended_color_registers(&[rgb], prefs.highlight_background_color)[0];
            }
            image.set_pixel(col as u32, row as u32, &rgb);
        }
    }
    image
}

const fn planes(name: &'static str, planes: usize, endian: Endian, interleave: bool) -> BitmapRenderer {
    BitmapRenderer::new(
        name,
        BitmapMode::Bitplanes {
            planes,
            endian,
            interleave,
        },
    )
}

/// Every bitmap renderer, in menu order
pub static BITMAP_RENDERERS: &[BitmapRenderer] = &[
    BitmapRenderer::new("B/W, 1bpp, on=black", BitmapMode::Mono(MonoColors::OnBlack)),
    BitmapRenderer::new("B/W, 1bpp, on=white", BitmapMode::Mono(MonoColors::OnWhite)),
    BitmapRenderer::new("Player/Missile, normal width", BitmapMode::Mono(MonoColors::OnBlack)).scaled(2, 1),
    BitmapRenderer::new("Player/Missile, double width", BitmapMode::Mono(MonoColors::OnBlack)).scaled(4, 1),
    BitmapRenderer::new("Player/Missile, quad width", BitmapMode::Mono(MonoColors::OnBlack)).scaled(8, 1),
    BitmapRenderer::new("B/W, Apple 2, Linear", BitmapMode::Apple2Linear(MonoColors::OnWhite)),
    // Always a full 280x192 hi-res page, whatever the row geometry asked for
    BitmapRenderer::new("B/W, Apple 2, Screen Order", BitmapMode::Apple2ScreenOrder(MonoColors::OnWhite)),
    BitmapRenderer::new("Apple 2 (artifacting colors)", BitmapMode::Apple2Artifacting),
    BitmapRenderer::new("Antic B (Gr 6, 1bpp)", BitmapMode::Mono(MonoColors::Registers([8, 4]))).scaled(2, 2),
    BitmapRenderer::new("Antic C (Gr 6+, 1bpp)", BitmapMode::Mono(MonoColors::Registers([8, 4]))).scaled(2, 1),
    BitmapRenderer::new("Antic D (Gr 7, 2bpp)", BitmapMode::TwoBpp([8, 4, 5, 6])).scaled(2, 2),
    BitmapRenderer::new("Antic E (Gr 7+, 2bpp)", BitmapMode::TwoBpp([8, 4, 5, 6])).scaled(2, 1),
    BitmapRenderer::new("GTIA 9 (4bpp, 16 luminances, 1 color)", BitmapMode::FourBpp(FourBppPalette::Gtia9)).scaled(4, 1),
    BitmapRenderer::new("GTIA 10 (4bpp, 9 colors)", BitmapMode::FourBpp(FourBppPalette::Gtia10)).scaled(4, 1),
    BitmapRenderer::new("GTIA 11 (4bpp, 1 luminance, 16 colors)", BitmapMode::FourBpp(FourBppPalette::Gtia11)).scaled(4, 1),
    BitmapRenderer::new("2bpp", BitmapMode::TwoBpp([0, 1, 2, 3])),
    BitmapRenderer::new("4bpp", BitmapMode::FourBpp(FourBppPalette::Direct)),
    planes("2 Bit Planes (little endian)", 2, Endian::Little, false),
    planes("2 Bit Planes (little endian, interleave by line)", 2, Endian::Little, true),
    planes("2 Bit Planes (big endian)", 2, Endian::Big, false),
    planes("2 Bit Planes (big endian, interleave by line)", 2, Endian::Big, true),
    planes("3 Bit Planes (little endian)", 3, Endian::Little, false),
    planes("3 Bit Planes (little endian, interleave by line)", 3, Endian::Little, true),
    planes("3 Bit Planes (big endian)", 3, Endian::Big, false),
    planes("3 Bit Planes (big endian, interleave by line)", 3, Endian::Big, true),
    planes("4 Bit Planes (little endian)", 4, Endian::Little, false),
    planes("4 Bit Planes (little endian, interleave by line)", 4, Endian::Little, true),
    planes("4 Bit Planes (big endian)", 4, Endian::Big, false),
    planes("4 Bit Planes (big endian, interleave by line)", 4, Endian::Big, true),
    BitmapRenderer::new("Intermediate Mode 1 Byte Per Pixel", BitmapMode::BytePerPixel),
    BitmapRenderer::new("1Bpp Greyscale", BitmapMode::MemoryMap),
    BitmapRenderer::new("Memory Access", BitmapMode::MemoryAccess),
];

/// Look up a bitmap renderer by display name
pub fn find_bitmap_renderer(name: &str) -> Result<BitmapRenderer> {
    BITMAP_RENDERERS
        .iter()
        .find(|r| r.name == name)
        .copied()
        .ok_or_else(|| RasterError::RendererNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{DATA_BIT_MASK, SELECTED_BIT_MASK};

    fn render_one(renderer: &BitmapRenderer, data: &[u8], bpr: usize, rows: usize) -> BitmapData {
        let style = vec![0u8; data.len()];
        let input = RenderInput::new(data, &style, bpr, rows).unwrap();
        renderer.render(&input, &PaletteConfig::default()).unwrap()
    }

    fn explicit(regs: &[Rgb]) -> PaletteConfig {
        PaletteConfig {
            color_registers: Some(regs.to_vec()),
            ..Default::default()
        }
    }

    #[test]
    fn test_registry_names_are_unique() {
        for (i, a) in BITMAP_RENDERERS.iter().enumerate() {
            for b in &BITMAP_RENDERERS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_unknown_name_is_renderer_not_found() {
        let err = find_bitmap_renderer("Antic Z").unwrap_err();
        assert!(matches!(err, RasterError::RendererNotFound(ref n) if n == "Antic Z"));
    }

    #[test]
    fn test_on_black_draws_set_bits_black() {
        let r = find_bitmap_renderer("B/W, 1bpp, on=black").unwrap();
        let image = render_one(&r, &[0b1000_0001], 1, 1);
        assert_eq!(image.pixel(0, 0), &BLACK);
        assert_eq!(image.pixel(1, 0), &WHITE);
        assert_eq!(image.pixel(7, 0), &BLACK);
    }

    #[test]
    fn test_player_missile_widths() {
        for (name, w) in [
            ("Player/Missile, normal width", 16),
            ("Player/Missile, double width", 32),
            ("Player/Missile, quad width", 64),
        ] {
            let r = find_bitmap_renderer(name).unwrap();
            let image = render_one(&r, &[0xff], 1, 1);
            assert_eq!((image.width, image.height), (w, 1), "{name}");
        }
    }

    #[test]
    fn test_four_bpp_nibbles() {
        let regs: Vec<Rgb> = (0..16).map(|i| [i * 10, 0, 0]).collect();
        let r = find_bitmap_renderer("4bpp").unwrap();
        let data = [0x3c];
        let style = [0];
        let input = RenderInput::new(&data, &style, 1, 1).unwrap();
        let image = r.render(&input, &explicit(&regs)).unwrap();
        assert_eq!(image.pixel(0, 0), &[30, 0, 0]);
        assert_eq!(image.pixel(1, 0), &[120, 0, 0]);
    }

    #[test]
    fn test_antic_d_uses_background_then_playfields() {
        let config = PaletteConfig::default();
        let r = find_bitmap_renderer("Antic D (Gr 7, 2bpp)").unwrap();
        let data = [0b00_01_10_11];
        let style = [0];
        let input = RenderInput::new(&data, &style, 1, 1).unwrap();
        let image = r.render(&input, &config).unwrap();
        assert_eq!((image.width, image.height), (8, 2));
        let expected = config.select_registers(&[8, 4, 5, 6]);
        for (i, rgb) in expected.iter().enumerate() {
            assert_eq!(image.pixel(i as u32 * 2, 1), rgb, "pixel {i}");
        }
    }

    #[test]
    fn test_gtia9_luminance_ramp() {
        let config = PaletteConfig {
            antic_color_registers: [0, 0, 0, 0, 0, 0, 0, 0, 0x46],
            ..Default::default()
        };
        let r = find_bitmap_renderer("GTIA 9 (4bpp, 16 luminances, 1 color)").unwrap();
        let data = [0x0f];
        let style = [0];
        let input = RenderInput::new(&data, &style, 1, 1).unwrap();
        let image = r.render(&input, &config).unwrap();
        assert_eq!((image.width, image.height), (8, 1));
        assert_eq!(image.pixel(0, 0), &config.convert(&[0x40])[0]);
        assert_eq!(image.pixel(4, 0), &config.convert(&[0x4f])[0]);
    }

    #[test]
    fn test_gtia11_hue_ramp() {
        let config = PaletteConfig {
            antic_color_registers: [0, 0, 0, 0, 0, 0, 0, 0, 0x46],
            ..Default::default()
        };
        let r = find_bitmap_renderer("GTIA 11 (4bpp, 1 luminance, 16 colors)").unwrap();
        let regs = r.registers(&config);
        assert_eq!(regs[3], config.convert(&[0x36])[0]);
    }

    #[test]
    fn test_gtia10_pads_with_black_register() {
        let config = PaletteConfig::default();
        let r = find_bitmap_renderer("GTIA 10 (4bpp, 9 colors)").unwrap();
        let regs = r.registers(&config);
        assert_eq!(regs.len(), 16);
        assert_eq!(regs[9], config.convert(&[0])[0]);
    }

    #[test]
    fn test_apple2_linear_lsb_is_leftmost() {
        let r = find_bitmap_renderer("B/W, Apple 2, Linear").unwrap();
        let image = render_one(&r, &[0x81], 1, 1);
        assert_eq!(image.width, 7);
        assert_eq!(image.pixel(0, 0), &WHITE);
        for x in 1..7 {
            assert_eq!(image.pixel(x, 0), &BLACK, "high bit is not displayed");
        }
    }

    #[test]
    fn test_apple2_row_offsets() {
        assert_eq!(apple2_row_offset(0), 0);
        assert_eq!(apple2_row_offset(1), 1024);
        assert_eq!(apple2_row_offset(8), 128);
        assert_eq!(apple2_row_offset(64), 40);
        assert_eq!(apple2_row_offset(191), 1024 * 7 + 128 * 7 + 80);
    }

    #[test]
    fn test_apple2_screen_order_places_rows() {
        let r = find_bitmap_renderer("B/W, Apple 2, Screen Order").unwrap();
        let mut data = vec![0u8; 8192];
        data[1024] = 0x01;
        let image = render_one(&r, &data, 40, 192);
        assert_eq!((image.width, image.height), (280, 192));
        assert_eq!(image.pixel(0, 1), &WHITE);
        assert_eq!(image.pixel(0, 0), &BLACK);
    }

    #[test]
    fn test_artifact_colors() {
        let r = find_bitmap_renderer("Apple 2 (artifacting colors)").unwrap();
        // Alternating bits: 0b0101_0101 lights even columns (left cells)
        let image = render_one(&r, &[0x55, 0x2a], 2, 1);
        assert_eq!(image.pixel(0, 0), &ARTIFACT_COLORS[ARTIFACT_VIOLET as usize]);
        let image = render_one(&r, &[0xd5, 0xaa], 2, 1);
        assert_eq!(image.pixel(0, 0), &ARTIFACT_COLORS[ARTIFACT_BLUE as usize]);
        let image = render_one(&r, &[0x2a, 0x55], 2, 1);
        assert_eq!(image.pixel(0, 0), &ARTIFACT_COLORS[ARTIFACT_GREEN as usize]);
        let image = render_one(&r, &[0xaa, 0xd5], 2, 1);
        assert_eq!(image.pixel(0, 0), &ARTIFACT_COLORS[ARTIFACT_ORANGE as usize]);
        let image = render_one(&r, &[0x7f, 0x7f], 2, 1);
        assert!(image.rgb_pixels().all(|p| p == WHITE));
        let image = render_one(&r, &[0x00, 0x80], 2, 1);
        assert!(image.rgb_pixels().all(|p| p == BLACK));
    }

    #[test]
    fn test_two_planes_little_endian() {
        let regs = [[0, 0, 0], [1, 1, 1], [2, 2, 2], [3, 3, 3]];
        let r = find_bitmap_renderer("2 Bit Planes (little endian)").unwrap();
        let data = [0b1100_0000, 0b1010_0000];
        let style = [0, 0];
        let input = RenderInput::new(&data, &style, 2, 1).unwrap();
        let image = r.render(&input, &explicit(&regs)).unwrap();
        assert_eq!(image.width, 8);
        assert_eq!(image.pixel(0, 0), &[3, 3, 3]);
        assert_eq!(image.pixel(1, 0), &[1, 1, 1], "plane 0 is weight 1");
        assert_eq!(image.pixel(2, 0), &[2, 2, 2], "plane 1 is weight 2");
        assert_eq!(image.pixel(3, 0), &[0, 0, 0]);

        let r = find_bitmap_renderer("2 Bit Planes (big endian)").unwrap();
        let image = r.render(&input, &explicit(&regs)).unwrap();
        assert_eq!(image.pixel(1, 0), &[2, 2, 2], "plane 0 is weight 2");
        assert_eq!(image.pixel(2, 0), &[1, 1, 1]);
    }

    #[test]
    fn test_interleaved_planes_take_strips() {
        let regs = [[0, 0, 0], [1, 1, 1], [2, 2, 2], [3, 3, 3]];
        let r = find_bitmap_renderer("2 Bit Planes (little endian, interleave by line)").unwrap();
        // Row of 4 bytes: plane 0 strip = [0x80, 0x00], plane 1 strip = [0x00, 0x80]
        let data = [0x80, 0x00, 0x00, 0x80];
        let style = [0; 4];
        let input = RenderInput::new(&data, &style, 4, 1).unwrap();
        let image = r.render(&input, &explicit(&regs)).unwrap();
        assert_eq!(image.width, 16);
        assert_eq!(image.pixel(0, 0), &[1, 1, 1]);
        assert_eq!(image.pixel(8, 0), &[2, 2, 2]);
    }

    #[test]
    fn test_bitplanes_round_row_width_and_pad() {
        let r = find_bitmap_renderer("3 Bit Planes (little endian)").unwrap();
        assert_eq!(r.validate_bytes_per_row(4), 6);
        let image = render_one(&r, &[0xff, 0xff, 0xff, 0xff], 4, 1);
        assert_eq!(image.width, 16);
        let empty = PaletteConfig::default().preferences.empty_background_color;
        assert_eq!(image.pixel(15, 0), &empty, "group with missing bytes is empty");
    }

    #[test]
    fn test_bitplane_style_is_or_of_group() {
        let prefs = PaletteConfig::default();
        let r = find_bitmap_renderer("2 Bit Planes (little endian)").unwrap();
        let data = [0, 0];
        let style = [0, SELECTED_BIT_MASK];
        let input = RenderInput::new(&data, &style, 2, 1).unwrap();
        let image = r.render(&input, &prefs).unwrap();
        let palettes = prefs.palette_set(r.registers(&prefs));
        assert_eq!(image.pixel(0, 0), &palettes.highlight[0]);
    }

    #[test]
    fn test_memory_map_greyscale_and_selection() {
        let config = PaletteConfig::default();
        let r = find_bitmap_renderer("1Bpp Greyscale").unwrap();
        let data = [0x00, 0xff, 0x0f, 0x10];
        let style = [0, 0, SELECTED_BIT_MASK, 0];
        let input = RenderInput::new(&data, &style, 2, 2).unwrap().with_count(3);
        let image = r.render(&input, &config).unwrap();
        assert_eq!(image.pixel(0, 0), &[255, 255, 255]);
        assert_eq!(image.pixel(1, 0), &[0, 0, 0]);
        let hl = config.preferences.highlight_background_color;
        let c = 0xf0u16;
        assert_eq!(
            image.pixel(0, 1),
            &[((hl[0] as u16 * c) >> 8) as u8, ((hl[1] as u16 * c) >> 8) as u8, ((hl[2] as u16 * c) >> 8) as u8]
        );
        assert_eq!(image.pixel(1, 1), &config.preferences.empty_background_color);
    }

    #[test]
    fn test_memory_access_heatmap() {
        let r = find_bitmap_renderer("Memory Access").unwrap();
        let data = [0xff, 0x80, 0x80, 0x40];
        let style = [0x01, 0x02, 0x06, 0x00];
        let input = RenderInput::new(&data, &style, 4, 1).unwrap();
        let image = r.render(&input, &PaletteConfig::default()).unwrap();
        assert_eq!(image.pixel(0, 0), &[0, 254, 0]);
        assert_eq!(image.pixel(1, 0), &[127, 0, 0]);
        assert_eq!(image.pixel(2, 0), &[127, 127, 0], "execute outranks write");
        assert_eq!(image.pixel(3, 0), &[0, 0, 0]);
    }

    #[test]
    fn test_byte_per_pixel_uses_extended_registers() {
        let config = PaletteConfig::default();
        let r = find_bitmap_renderer("Intermediate Mode 1 Byte Per Pixel").unwrap();
        let data = [8, 24, 200];
        let style = [0, DATA_BIT_MASK, 0];
        let input = RenderInput::new(&data, &style, 3, 1).unwrap();
        let image = r.render(&input, &config).unwrap();
        let palettes = config.palette_set(config.rgb_registers());
        assert_eq!(image.pixel(0, 0), &palettes.normal[8]);
        assert_eq!(image.pixel(1, 0), &palettes.data[24]);
        assert_eq!(image.pixel(2, 0), &palettes.normal[0], "out of range register");
    }
}
