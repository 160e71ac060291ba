//! Palettes: hardware color numbers to RGB, plus the blended style variants
//!
//! An Atari color number packs a hue in the high nibble and a luminance in
//! the low nibble. The two color standards turn that into RGB through YIQ;
//! NTSC uses a measured I/Q lookup per hue while PAL rotates a fixed
//! chroma vector. Both tables are computed once per process.
//!
//! On top of the base registers every renderer needs four more palettes
//! (highlight, match, comment, data) so that styled bytes stay readable
//! against the editor's own background colors.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::config::Preferences;
use crate::style::StyleClass;
use crate::types::Rgb;

/// Which analog video standard the color numbers are decoded with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorStandard {
    #[default]
    Ntsc,
    Pal,
}

impl ColorStandard {
    /// The 256-entry RGB table for this standard
    pub fn table(self) -> &'static [Rgb; 256] {
        static NTSC: OnceLock<[Rgb; 256]> = OnceLock::new();
        static PAL: OnceLock<[Rgb; 256]> = OnceLock::new();
        match self {
            ColorStandard::Ntsc => NTSC.get_or_init(|| build_table(ntsc_iq)),
            ColorStandard::Pal => PAL.get_or_init(|| build_table(pal_iq)),
        }
    }

    /// Convert one hardware color number
    #[inline]
    pub fn to_rgb(self, value: u8) -> Rgb {
        self.table()[value as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorStandard::Ntsc => "NTSC",
            ColorStandard::Pal => "PAL",
        }
    }
}

/// Measured I/Q per hue, in units of full scale
const NTSC_IQ_LOOKUP: [[f64; 2]; 16] = [
    [0.000, 0.000],
    [0.144, -0.189],
    [0.231, -0.081],
    [0.243, 0.032],
    [0.217, 0.121],
    [0.117, 0.216],
    [0.021, 0.233],
    [-0.066, 0.196],
    [-0.139, 0.134],
    [-0.182, 0.062],
    [-0.175, -0.022],
    [-0.136, -0.100],
    [-0.069, -0.150],
    [0.005, -0.159],
    [0.071, -0.125],
    [0.124, -0.089],
];

fn ntsc_iq(hue: usize) -> (f64, f64) {
    let [i, q] = NTSC_IQ_LOOKUP[hue];
    (i * 255.0, q * 255.0)
}

fn pal_iq(hue: usize) -> (f64, f64) {
    if hue == 0 {
        return (0.0, 0.0);
    }
    let phase = ((hue as f64 - 1.0) * 25.7 - 15.0).to_radians();
    (50.0 * phase.cos(), 50.0 * phase.sin())
}

fn clamp_channel(v: f64) -> u8 {
    if v < 0.0 {
        0
    } else if v > 255.0 {
        255
    } else {
        v as u8
    }
}

fn build_table(iq: fn(usize) -> (f64, f64)) -> [Rgb; 256] {
    let mut table = [[0u8; 3]; 256];
    for (value, entry) in table.iter_mut().enumerate() {
        let hue = (value >> 4) & 0x0f;
        let lum = value & 0x0f;
        let y = 255.0 * (lum as f64 + 1.0) / 16.0;
        let (i, q) = iq(hue);
        let r = y + 0.956 * i + 0.621 * q;
        let g = y - 0.272 * i - 0.647 * q;
        let b = y - 1.107 * i + 1.704 * q;
        *entry = [clamp_channel(r), clamp_channel(g), clamp_channel(b)];
    }
    log::debug!("built 256-entry color table");
    table
}

/// Atari power-up values for the nine color registers
///
/// Order is PCOLR0..3, COLPF0..3, COLBK. The player colors are normally zero
/// at power-up but get distinguishable values here.
pub const POWERUP_COLORS: [u8; 9] = [4, 30, 68, 213, 40, 202, 148, 70, 0];

/// Look up each hardware color number in the chosen standard's table
pub fn get_color_registers(antic_indices: &[u8], standard: ColorStandard) -> Vec<Rgb> {
    antic_indices.iter().map(|&c| standard.to_rgb(c)).collect()
}

/// Registers padded to 16 with greys, then followed by 16 dimmed copies
///
/// Index `16 + k` is register `k` pushed toward mid grey, which is what the
/// Jumpman editor uses to fade out everything but the active layer.
pub fn extended_color_registers(antic_indices: &[u8], standard: ColorStandard) -> Vec<Rgb> {
    let mut registers = get_color_registers(antic_indices, standard);
    registers.truncate(16);
    for i in registers.len()..16 {
        let grey = (i * 16) as u8;
        registers.push([grey, grey, grey]);
    }
    let dimmed: Vec<Rgb> = registers
        .iter()
        .map(|c| [c[0] / 4 + 64, c[1] / 4 + 64, c[2] / 4 + 64])
        .collect();
    registers.extend(dimmed);
    registers
}

/// 50/50 average of each register with `bg`
pub fn get_blended_color_registers(registers: &[Rgb], bg: Rgb) -> Vec<Rgb> {
    registers.iter().map(|c| blend(*c, bg)).collect()
}

/// Darken each register by the distance from the window background to the
/// data background
pub fn get_dimmed_color_registers(registers: &[Rgb], window_bg: Rgb, data_bg: Rgb) -> Vec<Rgb> {
    let delta = [
        window_bg[0] as i16 - data_bg[0] as i16,
        window_bg[1] as i16 - data_bg[1] as i16,
        window_bg[2] as i16 - data_bg[2] as i16,
    ];
    registers
        .iter()
        .map(|c| {
            [
                (c[0] as i16 - delta[0]).clamp(0, 255) as u8,
                (c[1] as i16 - delta[1]).clamp(0, 255) as u8,
                (c[2] as i16 - delta[2]).clamp(0, 255) as u8,
            ]
        })
        .collect()
}

#[inline]
fn blend(a: Rgb, b: Rgb) -> Rgb {
    [
        ((a[0] as u16 + b[0] as u16) / 2) as u8,
        ((a[1] as u16 + b[1] as u16) / 2) as u8,
        ((a[2] as u16 + b[2] as u16) / 2) as u8,
    ]
}

/// GR.0 text colors: foreground takes the hue of the background and the
/// luminance of COLPF1
///
/// Accepts either the five playfield registers (PF0..3, BK) or the full
/// nine. Returns `(fg, bg)` as hardware color numbers.
pub fn gr0_colors(colors: &[u8]) -> (u8, u8) {
    let (bg_index, lum_index) = if colors.len() == 5 { (2, 1) } else { (6, 5) };
    let bg = colors.get(bg_index).copied().unwrap_or(0);
    let lum = colors.get(lum_index).copied().unwrap_or(0);
    ((bg & 0xf0) | (lum & 0x0f), bg)
}

/// Five parallel register arrays, one per style class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteSet {
    pub normal: Vec<Rgb>,
    pub highlight: Vec<Rgb>,
    pub matched: Vec<Rgb>,
    pub comment: Vec<Rgb>,
    pub data: Vec<Rgb>,
}

impl PaletteSet {
    /// Derive the four styled variants from `normal`
    pub fn new(normal: Vec<Rgb>, prefs: &Preferences) -> Self {
        let highlight = get_blended_color_registers(&normal, prefs.highlight_background_color);
        let matched = get_blended_color_registers(&normal, prefs.match_background_color);
        let comment = get_blended_color_registers(&normal, prefs.comment_background_color);
        let data = get_dimmed_color_registers(
            &normal,
            prefs.background_color,
            prefs.data_background_color,
        );
        Self {
            normal,
            highlight,
            matched,
            comment,
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.normal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normal.is_empty()
    }

    /// The register array for one style class
    pub fn for_class(&self, class: StyleClass) -> &[Rgb] {
        match class {
            StyleClass::Normal => &self.normal,
            StyleClass::Data => &self.data,
            StyleClass::Comment => &self.comment,
            StyleClass::Match => &self.matched,
            StyleClass::Highlight => &self.highlight,
        }
    }

    /// Color for `index` under `class`; out-of-range indices fall back to 0
    #[inline]
    pub fn color(&self, class: StyleClass, index: usize) -> Rgb {
        let regs = self.for_class(class);
        regs.get(index)
            .or_else(|| regs.first())
            .copied()
            .unwrap_or([0, 0, 0])
    }
}
