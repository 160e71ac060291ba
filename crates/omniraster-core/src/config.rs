//! Caller-supplied rendering configuration
//!
//! `Preferences` carries the editor's background colors that the styled
//! palettes are blended against; `PaletteConfig` adds the hardware color
//! registers. Both load from JSON so the same settings can be shared with
//! the command line tool.
//!
//! # Example
//!
//! ```
//! use omniraster_core::config::PaletteConfig;
//!
//! let config: PaletteConfig = serde_json::from_str(
//!     r#"{ "color_standard": "pal", "antic_color_registers": [0, 0, 0, 0, 40, 202, 148, 70, 0] }"#,
//! ).unwrap();
//! assert_eq!(config.preferences.background_color, [255, 255, 255]);
//! ```

use serde::{Deserialize, Serialize};

use crate::color::{self, ColorStandard, PaletteSet, POWERUP_COLORS};
use crate::error::{RasterError, Result};
use crate::types::Rgb;

/// Background colors used to derive the styled palettes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub highlight_background_color: Rgb,
    pub match_background_color: Rgb,
    pub comment_background_color: Rgb,
    pub background_color: Rgb,
    pub data_background_color: Rgb,
    pub empty_background_color: Rgb,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            highlight_background_color: [100, 200, 230],
            match_background_color: [255, 255, 180],
            comment_background_color: [255, 180, 200],
            background_color: [255, 255, 255],
            data_background_color: [224, 224, 224],
            empty_background_color: [160, 160, 160],
        }
    }
}

/// Hardware color state plus preferences
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Explicit RGB registers; when present they override the ANTIC lookup
    /// for modes that index registers directly (bitplanes, 2bpp, 4bpp)
    pub color_registers: Option<Vec<Rgb>>,
    /// PCOLR0..3, COLPF0..3, COLBK
    pub antic_color_registers: [u8; 9],
    pub color_standard: ColorStandard,
    pub preferences: Preferences,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            color_registers: None,
            antic_color_registers: POWERUP_COLORS,
            color_standard: ColorStandard::Ntsc,
            preferences: Preferences::default(),
        }
    }
}

impl PaletteConfig {
    /// Parse a JSON configuration
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| RasterError::ConfigError(e.to_string()))
    }

    /// The full 32-entry register table in RGB
    ///
    /// Explicit `color_registers` win; otherwise the ANTIC registers are
    /// converted, padded to 16 with greys, and followed by dimmed copies.
    pub fn rgb_registers(&self) -> Vec<Rgb> {
        match &self.color_registers {
            Some(regs) if !regs.is_empty() => regs.clone(),
            _ => color::extended_color_registers(&self.antic_color_registers, self.color_standard),
        }
    }

    /// Pick registers by index out of [`Self::rgb_registers`]
    pub fn select_registers(&self, indices: &[usize]) -> Vec<Rgb> {
        let all = self.rgb_registers();
        indices
            .iter()
            .map(|&i| all.get(i).or_else(|| all.first()).copied().unwrap_or([0, 0, 0]))
            .collect()
    }

    /// Convert hardware color numbers through the configured standard
    pub fn convert(&self, antic_values: &[u8]) -> Vec<Rgb> {
        color::get_color_registers(antic_values, self.color_standard)
    }

    /// Build the five palettes for a register array
    pub fn palette_set(&self, registers: Vec<Rgb>) -> PaletteSet {
        PaletteSet::new(registers, &self.preferences)
    }
}
