//! Per-byte style flags and the class they resolve to
//!
//! Every data byte travels with a style byte. The renderers only care about
//! four of its flags, and when several are set at once the highest-ranked
//! one decides which palette the pixel is drawn from:
//!
//! highlight (selected) > match > comment > data > normal

/// Three bits reserved for disassembly region typing
pub const USER_BIT_MASK: u8 = 0x07;
/// Byte differs from a comparison segment
pub const DIFF_BIT_MASK: u8 = 0x08;
/// Byte is part of a search match
pub const MATCH_BIT_MASK: u8 = 0x10;
/// Byte carries a comment
pub const COMMENT_BIT_MASK: u8 = 0x20;
/// Byte is marked as data by the disassembler
pub const DATA_BIT_MASK: u8 = 0x40;
/// Byte is in the current selection
pub const SELECTED_BIT_MASK: u8 = 0x80;

/// Bits that make a byte non-normal: everything except user and diff bits
pub const IGNORE_MASK: u8 = !USER_BIT_MASK & !DIFF_BIT_MASK;

/// Which of the five palettes a pixel is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleClass {
    Normal,
    Data,
    Comment,
    Match,
    Highlight,
}

impl StyleClass {
    /// Resolve a style byte using the fixed precedence
    #[inline]
    pub fn from_style(style: u8) -> Self {
        StyleMasks::from_style(style).class()
    }
}

/// Boolean masks for one pixel, each already excluding higher-ranked classes
///
/// Exactly one field is `true` for any style value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleMasks {
    pub highlight: bool,
    pub matched: bool,
    pub comment: bool,
    pub data: bool,
    pub normal: bool,
}

impl StyleMasks {
    #[inline]
    pub fn from_style(s: u8) -> Self {
        let highlight = s & SELECTED_BIT_MASK == SELECTED_BIT_MASK;
        let matched = s & MATCH_BIT_MASK == MATCH_BIT_MASK && !highlight;
        let comment = s & COMMENT_BIT_MASK == COMMENT_BIT_MASK && !(highlight || matched);
        let data = s & DATA_BIT_MASK == DATA_BIT_MASK && !(highlight || matched || comment);
        let normal = !(highlight || matched || comment || data);
        Self {
            highlight,
            matched,
            comment,
            data,
            normal,
        }
    }

    #[inline]
    pub fn class(&self) -> StyleClass {
        if self.highlight {
            StyleClass::Highlight
        } else if self.matched {
            StyleClass::Match
        } else if self.comment {
            StyleClass::Comment
        } else if self.data {
            StyleClass::Data
        } else {
            StyleClass::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignore_mask_value() {
        assert_eq!(IGNORE_MASK, 0xf0);
    }

    #[test]
    fn test_user_and_diff_bits_are_normal() {
        for s in 0..=0x0f {
            assert_eq!(s & IGNORE_MASK, 0);
            assert_eq!(StyleClass::from_style(s), StyleClass::Normal, "style {s:#04x}");
        }
    }

    #[test]
    fn test_precedence_order() {
        let all = SELECTED_BIT_MASK | MATCH_BIT_MASK | COMMENT_BIT_MASK | DATA_BIT_MASK;
        assert_eq!(StyleClass::from_style(all), StyleClass::Highlight);
        assert_eq!(StyleClass::from_style(all & !SELECTED_BIT_MASK), StyleClass::Match);
        assert_eq!(
            StyleClass::from_style(COMMENT_BIT_MASK | DATA_BIT_MASK),
            StyleClass::Comment
        );
        assert_eq!(StyleClass::from_style(DATA_BIT_MASK | 0x03), StyleClass::Data);
    }

    #[test]
    fn test_masks_partition_every_style() {
        for s in 0..=255u8 {
            let m = StyleMasks::from_style(s);
            let set = [m.highlight, m.matched, m.comment, m.data, m.normal]
                .iter()
                .filter(|b| **b)
                .count();
            assert_eq!(set, 1, "style {s:#04x} must land in exactly one class");
            assert_eq!(m.class(), StyleClass::from_style(s));
        }
    }

    #[test]
    fn test_only_flag_bits_leave_normal() {
        for s in 0..=255u8 {
            let normal = StyleMasks::from_style(s).normal;
            assert_eq!(normal, s & (SELECTED_BIT_MASK | MATCH_BIT_MASK | COMMENT_BIT_MASK | DATA_BIT_MASK) == 0);
        }
    }
}
