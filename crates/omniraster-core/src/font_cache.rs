//! Baked-font cache
//!
//! A baked font depends on the glyph bytes, the font mode, the registers and
//! background colors it was drawn with, and the reverse flag. All of those go
//! into the key, so a palette or font change simply misses and bakes afresh.
//!
//! Each cache carries its own on/off switch. A disabled cache bakes on every
//! call and stores nothing. The process-wide cache starts disabled unless
//! `OMNIRASTER_CACHE` is set to a true value when it is first used.
//!
//! ```
//! use omniraster_core::font::{FontMode, ATARI_DEFAULT_FONT};
//! use omniraster_core::font_cache::FontCache;
//! use omniraster_core::config::PaletteConfig;
//! use std::sync::Arc;
//!
//! let cache = FontCache::new();
//! cache.set_enabled(true);
//! let glyphs: Arc<[u8]> = Arc::from(ATARI_DEFAULT_FONT.glyph_bytes);
//! let config = PaletteConfig::default();
//! let first = cache.get_or_bake(&glyphs, FontMode::Gr0, &config, false);
//! let again = cache.get_or_bake(&glyphs, FontMode::Gr0, &config, false);
//! assert!(Arc::ptr_eq(&first, &again));
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use crate::cache::{CacheMetrics, MultiLevelCache};
use crate::config::PaletteConfig;
use crate::font::{BakedFont, FontMode};

/// Environment variable that switches on the process-wide cache
pub const CACHE_ENV_VAR: &str = "OMNIRASTER_CACHE";

/// Identity of one bake
///
/// The glyph bytes are held, not hashed, so two fonts only share an entry
/// when their bytes are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontCacheKey {
    pub mode: FontMode,
    pub glyphs: Arc<[u8]>,
    pub palette: PaletteConfig,
    pub reverse: bool,
}

impl FontCacheKey {
    pub fn new(glyphs: &Arc<[u8]>, mode: FontMode, config: &PaletteConfig, reverse: bool) -> Self {
        Self {
            mode,
            glyphs: Arc::clone(glyphs),
            palette: config.clone(),
            reverse,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Baked fonts shared between renders
pub struct FontCache {
    cache: MultiLevelCache<FontCacheKey, Arc<BakedFont>>,
    enabled: AtomicBool,
}

impl FontCache {
    /// An enabled cache with room for 8 hot and 64 warm fonts
    pub fn new() -> Self {
        Self::with_capacity(8, 64)
    }

    pub fn with_capacity(l1: usize, l2: usize) -> Self {
        Self {
            cache: MultiLevelCache::new(l1, l2),
            enabled: AtomicBool::new(true),
        }
    }

    /// A cache that starts enabled only when `OMNIRASTER_CACHE` says so
    pub fn from_env() -> Self {
        let cache = Self::new();
        let enabled = std::env::var(CACHE_ENV_VAR).is_ok_and(|v| parse_flag(&v));
        if enabled {
            log::info!("font caching enabled via {CACHE_ENV_VAR}");
        }
        cache.enabled.store(enabled, Ordering::SeqCst);
        cache
    }

    /// The process-wide cache used by text renderers
    pub fn global() -> &'static FontCache {
        static GLOBAL: OnceLock<FontCache> = OnceLock::new();
        GLOBAL.get_or_init(FontCache::from_env)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Switch caching on or off; switching off drops every entry
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
        if !enabled {
            self.cache.clear();
        }
        log::debug!("font caching {}", if enabled { "enabled" } else { "disabled" });
    }

    pub fn get(&self, key: &FontCacheKey) -> Option<Arc<BakedFont>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: FontCacheKey, font: Arc<BakedFont>) {
        self.cache.insert(key, font);
    }

    /// Return the cached bake or bake now, remembering it when enabled
    pub fn get_or_bake(
        &self,
        glyphs: &Arc<[u8]>,
        mode: FontMode,
        config: &PaletteConfig,
        reverse: bool,
    ) -> Arc<BakedFont> {
        if !self.is_enabled() {
            return Arc::new(BakedFont::new(glyphs, mode, config, reverse));
        }
        let key = FontCacheKey::new(glyphs, mode, config, reverse);
        if let Some(font) = self.get(&key) {
            log::debug!("font cache hit for {} font of {} bytes", mode.name(), glyphs.len());
            return font;
        }
        let font = Arc::new(BakedFont::new(glyphs, mode, config, reverse));
        self.insert(key, Arc::clone(&font));
        font
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    pub fn hit_rate(&self) -> f64 {
        self.cache.hit_rate()
    }

    pub fn metrics(&self) -> CacheMetrics {
        self.cache.metrics()
    }
}

impl Default for FontCache {
    fn default() -> Self {
        Self::new()
    }
}
