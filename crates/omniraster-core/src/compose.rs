//! Style composer: per-pixel color index plus style to RGB
//!
//! Renderers first unpack bytes into a grid of register indices, carrying the
//! style byte and a validity flag for every pixel. Composing walks that grid
//! once, evaluates the precedence masks of each style, and pulls the RGB
//! value from the palette of the one mask that is set. Invalid pixels (past the valid byte count) become the
//! empty background.

use crate::color::PaletteSet;
use crate::style::StyleMasks;
use crate::types::{BitmapData, Rgb};

/// Unpacked pixels before color lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    pub width: usize,
    pub height: usize,
    /// Register index per pixel
    pub pixels: Vec<u8>,
    /// Style byte per pixel
    pub styles: Vec<u8>,
    /// False for pixels past the valid byte count
    pub valid: Vec<bool>,
}

impl PixelGrid {
    /// A grid with every pixel invalid
    pub fn new(width: usize, height: usize) -> Self {
        let len = width * height;
        Self {
            width,
            height,
            pixels: vec![0; len],
            styles: vec![0; len],
            valid: vec![false; len],
        }
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, pixel: u8, style: u8) {
        let i = y * self.width + x;
        self.pixels[i] = pixel;
        self.styles[i] = style;
        self.valid[i] = true;
    }
}

/// Resolve every pixel of `grid` to RGB
pub fn compose(grid: &PixelGrid, palettes: &PaletteSet, empty: Rgb) -> BitmapData {
    let mut data = Vec::with_capacity(grid.pixels.len() * 3);
    for i in 0..grid.pixels.len() {
        let rgb = if grid.valid[i] {
            let masks = StyleMasks::from_style(grid.styles[i]);
            palettes.color(masks.class(), grid.pixels[i] as usize)
        } else {
            empty
        };
        data.extend_from_slice(&rgb);
    }
    BitmapData {
        width: grid.width as u32,
        height: grid.height as u32,
        format: crate::types::BitmapFormat::Rgb8,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preferences;
    use crate::style::{COMMENT_BIT_MASK, DATA_BIT_MASK, MATCH_BIT_MASK, SELECTED_BIT_MASK};

    #[test]
    fn test_compose_picks_palette_by_class() {
        let prefs = Preferences::default();
        let palettes = PaletteSet::new(vec![[0, 0, 0], [200, 100, 50]], &prefs);
        let mut grid = PixelGrid::new(6, 1);
        grid.set(0, 0, 1, 0);
        grid.set(1, 0, 1, DATA_BIT_MASK);
        grid.set(2, 0, 1, COMMENT_BIT_MASK | DATA_BIT_MASK);
        grid.set(3, 0, 1, MATCH_BIT_MASK | COMMENT_BIT_MASK);
        grid.set(4, 0, 1, SELECTED_BIT_MASK | MATCH_BIT_MASK);

        let image = compose(&grid, &palettes, [9, 9, 9]);
        assert_eq!(image.pixel(0, 0), &palettes.normal[1]);
        assert_eq!(image.pixel(1, 0), &palettes.data[1]);
        assert_eq!(image.pixel(2, 0), &palettes.comment[1]);
        assert_eq!(image.pixel(3, 0), &palettes.matched[1]);
        assert_eq!(image.pixel(4, 0), &palettes.highlight[1]);
        assert_eq!(image.pixel(5, 0), &[9, 9, 9], "unset pixel is empty background");
    }
}
