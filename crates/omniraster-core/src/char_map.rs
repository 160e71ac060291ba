//! Byte value to glyph number mappings
//!
//! Atari fonts store glyphs in the hardware's internal order, which differs
//! from ATASCII in the first 96 codes. Screen memory holds internal codes,
//! but a file full of text holds ATASCII, so the font renderer needs both.

use std::sync::OnceLock;

/// Which translation to apply before looking up a glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterMapping {
    /// Bytes are already glyph numbers (screen memory)
    #[default]
    Internal,
    /// Bytes are ATASCII text
    Atascii,
}

impl CharacterMapping {
    /// The 256-entry translation table
    pub fn table(self) -> &'static [u8; 256] {
        static IDENTITY: OnceLock<[u8; 256]> = OnceLock::new();
        match self {
            CharacterMapping::Internal => IDENTITY.get_or_init(|| std::array::from_fn(|i| i as u8)),
            CharacterMapping::Atascii => atascii_to_internal(),
        }
    }

    #[inline]
    pub fn map(self, byte: u8) -> u8 {
        self.table()[byte as usize]
    }
}

/// ATASCII code to internal glyph number; the inverse-video bit is kept
pub fn atascii_to_internal() -> &'static [u8; 256] {
    static TABLE: OnceLock<[u8; 256]> = OnceLock::new();
    TABLE.get_or_init(|| {
        std::array::from_fn(|i| {
            let low = (i & 0x7f) as u8;
            let mapped = match low {
                0x00..=0x1f => low + 0x40,
                0x20..=0x5f => low - 0x20,
                _ => low,
            };
            mapped | (i as u8 & 0x80)
        })
    })
}
