//! Per-viewer palette cache with explicit invalidation
//!
//! Deriving the five palettes is cheap but not free, and a viewer redraws far
//! more often than its colors change. The cache keeps the last [`PaletteSet`]
//! and rebuilds it only after [`PaletteCache::mark_dirty`], which every
//! setter that affects palettes calls, or when a renderer asks for a
//! different register array.

use crate::bitmap::BitmapRenderer;
use crate::color::{ColorStandard, PaletteSet};
use crate::config::PaletteConfig;
use crate::error::Result;
use crate::types::{BitmapData, RenderInput, Rgb};

struct CachedPalettes {
    registers: Vec<Rgb>,
    palettes: PaletteSet,
}

/// The palettes of one viewer
pub struct PaletteCache {
    config: PaletteConfig,
    cached: Option<CachedPalettes>,
    dirty: bool,
    rebuilds: usize,
}

impl PaletteCache {
    pub fn new(config: PaletteConfig) -> Self {
        Self {
            config,
            cached: None,
            dirty: true,
            rebuilds: 0,
        }
    }

    pub fn config(&self) -> &PaletteConfig {
        &self.config
    }

    /// Force the next lookup to rebuild
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// How many times the palettes have been rebuilt
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    pub fn set_color_registers(&mut self, registers: Option<Vec<Rgb>>) {
        self.config.color_registers = registers;
        self.mark_dirty();
    }

    pub fn set_antic_color_registers(&mut self, registers: [u8; 9]) {
        self.config.antic_color_registers = registers;
        self.mark_dirty();
    }

    pub fn set_color_standard(&mut self, standard: ColorStandard) {
        self.config.color_standard = standard;
        self.mark_dirty();
    }

    pub fn set_highlight_background_color(&mut self, color: Rgb) {
        self.config.preferences.highlight_background_color = color;
        self.mark_dirty();
    }

    pub fn set_match_background_color(&mut self, color: Rgb) {
        self.config.preferences.match_background_color = color;
        self.mark_dirty();
    }

    pub fn set_comment_background_color(&mut self, color: Rgb) {
        self.config.preferences.comment_background_color = color;
        self.mark_dirty();
    }

    pub fn set_background_color(&mut self, color: Rgb) {
        self.config.preferences.background_color = color;
        self.mark_dirty();
    }

    pub fn set_data_background_color(&mut self, color: Rgb) {
        self.config.preferences.data_background_color = color;
        self.mark_dirty();
    }

    /// Empty cells are filled at render time; the palettes stay valid
    pub fn set_empty_background_color(&mut self, color: Rgb) {
        self.config.preferences.empty_background_color = color;
    }

    fn refresh<'a>(
        config: &PaletteConfig,
        cached: &'a mut Option<CachedPalettes>,
        dirty: &mut bool,
        rebuilds: &mut usize,
        registers: Vec<Rgb>,
    ) -> &'a PaletteSet {
        let fresh = matches!(cached.as_ref(), Some(c) if !*dirty && c.registers == registers);
        if !fresh {
            *cached = None;
            *dirty = false;
        }
        let entry = cached.get_or_insert_with(|| {
            log::debug!("rebuilding palettes for {} registers", registers.len());
            *rebuilds += 1;
            CachedPalettes {
                palettes: config.palette_set(registers.clone()),
                registers,
            }
        });
        &entry.palettes
    }

    /// The palettes for `registers`, rebuilt only when needed
    pub fn palette_set(&mut self, registers: Vec<Rgb>) -> &PaletteSet {
        Self::refresh(&self.config, &mut self.cached, &mut self.dirty, &mut self.rebuilds, registers)
    }

    /// Render through the cached palettes
    pub fn render(&mut self, renderer: &BitmapRenderer, input: &RenderInput) -> Result<BitmapData> {
        let registers = renderer.registers(&self.config);
        let palettes = Self::refresh(&self.config, &mut self.cached, &mut self.dirty, &mut self.rebuilds, registers);
        renderer.render_with_palettes(input, &self.config, palettes)
    }
}

impl Default for PaletteCache {
    fn default() -> Self {
        Self::new(PaletteConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::find_bitmap_renderer;
    use crate::Renderer;

    #[test]
    fn test_rebuilds_only_when_dirty() {
        let mut cache = PaletteCache::default();
        let regs = vec![[0, 0, 0], [255, 255, 255]];
        let first = cache.palette_set(regs.clone()).normal.clone();
        assert_eq!(cache.palette_set(regs.clone()).normal, first);
        assert_eq!(cache.rebuild_count(), 1);

        cache.set_highlight_background_color([255, 0, 0]);
        assert!(cache.is_dirty());
        assert_eq!(cache.palette_set(regs.clone()).highlight[0], [127, 0, 0]);
        assert_eq!(cache.rebuild_count(), 2);
        assert!(!cache.is_dirty());
    }

    #[test]
    fn test_every_palette_setter_marks_dirty() {
        let mut cache = PaletteCache::default();
        let regs = vec![[1, 2, 3]];
        let setters: [fn(&mut PaletteCache); 8] = [
            |c| c.set_color_registers(Some(vec![[9, 9, 9]])),
            |c| c.set_antic_color_registers([0; 9]),
            |c| c.set_color_standard(ColorStandard::Pal),
            |c| c.set_highlight_background_color([1, 1, 1]),
            |c| c.set_match_background_color([1, 1, 1]),
            |c| c.set_comment_background_color([1, 1, 1]),
            |c| c.set_background_color([1, 1, 1]),
            |c| c.set_data_background_color([1, 1, 1]),
        ];
        for (i, set) in setters.iter().enumerate() {
            cache.palette_set(regs.clone());
            set(&mut cache);
            assert!(cache.is_dirty(), "setter {i}");
        }
        cache.palette_set(regs.clone());
        cache.set_empty_background_color([0, 0, 0]);
        assert!(!cache.is_dirty());
    }

    #[test]
    fn test_register_change_rebuilds() {
        let mut cache = PaletteCache::default();
        cache.palette_set(vec![[0, 0, 0]]);
        cache.palette_set(vec![[1, 1, 1]]);
        assert_eq!(cache.rebuild_count(), 2);
    }

    #[test]
    fn test_cached_render_matches_direct_render() {
        let renderer = find_bitmap_renderer("Antic E (Gr 7+, 2bpp)").unwrap();
        let data = [0x1b, 0xe4];
        let style = [0, 0x80];
        let input = RenderInput::new(&data, &style, 2, 1).unwrap();

        let mut cache = PaletteCache::default();
        let cached = cache.render(&renderer, &input).unwrap();
        let again = cache.render(&renderer, &input).unwrap();
        let direct = renderer.render(&input, &PaletteConfig::default()).unwrap();
        assert_eq!(cached, direct);
        assert_eq!(again, direct);
        assert_eq!(cache.rebuild_count(), 1);
    }
}
