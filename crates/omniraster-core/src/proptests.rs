use crate::bitmap::{apple2_row_offset, find_bitmap_renderer, BitmapMode, BitmapRenderer, BITMAP_RENDERERS};
use crate::bits::{intscale, BIT_REVERSE_TABLE};
use crate::config::PaletteConfig;
use crate::style::{StyleClass, SELECTED_BIT_MASK};
use crate::types::{BitmapData, RenderInput, Rgb};
use crate::Renderer;
use proptest::prelude::*;

fn palette_renderers() -> impl Iterator<Item = &'static BitmapRenderer> {
    BITMAP_RENDERERS.iter().filter(|r| {
        !matches!(
            r.mode(),
            BitmapMode::MemoryMap | BitmapMode::MemoryAccess | BitmapMode::Apple2ScreenOrder(_)
        )
    })
}

/// Byte indices an unscaled pixel is built from; it is drawn only when all
/// of them are below the count
fn source_bytes(r: &BitmapRenderer, x: usize, y: usize, bytes_per_row: usize) -> Vec<usize> {
    match r.mode() {
        BitmapMode::Apple2ScreenOrder(_) => vec![apple2_row_offset(y) + x / 7],
        BitmapMode::Bitplanes {
            planes, interleave, ..
        } => {
            let groups = bytes_per_row / planes;
            let group = x / 8;
            (0..planes)
                .map(|plane| {
                    if interleave {
                        y * bytes_per_row + plane * groups + group
                    } else {
                        y * bytes_per_row + group * planes + plane
                    }
                })
                .collect()
        },
        mode => vec![y * bytes_per_row + x / mode.pixels_per_byte()],
    }
}

fn screen() -> impl Strategy<Value = (usize, usize, Vec<u8>)> {
    (1usize..=4, 1usize..=6).prop_flat_map(|(groups, rows)| {
        let bpr = groups * 12;
        (Just(bpr), Just(rows), prop::collection::vec(any::<u8>(), bpr * rows))
    })
}

// Property: output shape is rows * scale_h by bytes * pixels_per_byte * scale_w
proptest! {
    #[test]
    fn prop_output_shape(bpr in 1usize..=24, rows in 1usize..=8, len in 0usize..=200, seed in any::<u8>()) {
        let data: Vec<u8> = (0..len).map(|i| (i as u8).wrapping_mul(31) ^ seed).collect();
        let style = vec![0u8; len];
        let input = RenderInput::new(&data, &style, bpr, rows).unwrap();
        let config = PaletteConfig::default();
        for renderer in palette_renderers() {
            let d = renderer.descriptor();
            let image = renderer.render(&input, &config).unwrap();
            let width = renderer.validate_bytes_per_row(bpr) * d.pixels_per_byte / d.bitplanes * d.scale_width;
            prop_assert_eq!(image.width as usize, width, "{}", d.name);
            prop_assert_eq!(image.height as usize, rows * d.scale_height, "{}", d.name);
            prop_assert_eq!(image.data.len(), width * rows * d.scale_height * 3);
        }
    }
}

// Property: with no style bits every pixel comes from the normal palette
proptest! {
    #[test]
    fn prop_unstyled_uses_normal_palette((bpr, rows, data) in screen()) {
        let style = vec![0u8; data.len()];
        let input = RenderInput::new(&data, &style, bpr, rows).unwrap();
        let config = PaletteConfig::default();
        for renderer in palette_renderers() {
            let palettes = config.palette_set(renderer.registers(&config));
            let image = renderer.render(&input, &config).unwrap();
            for rgb in image.rgb_pixels() {
                prop_assert!(palettes.normal.contains(&rgb), "{}: {:?}", renderer.name(), rgb);
            }
        }
    }
}

// Property: bytes at or past the count render as the empty background
proptest! {
    #[test]
    fn prop_past_count_is_empty((bpr, rows, data) in screen(), count in 0usize..=300) {
        let style = vec![0u8; data.len()];
        let input = RenderInput::new(&data, &style, bpr, rows).unwrap().with_count(count);
        let config = PaletteConfig::default();
        let empty = config.preferences.empty_background_color;
        for renderer in BITMAP_RENDERERS {
            let d = renderer.descriptor();
            let image = renderer.render(&input, &config).unwrap();
            for y in 0..image.height as usize {
                for x in 0..image.width as usize {
                    let sources = source_bytes(renderer, x / d.scale_width, y / d.scale_height, bpr);
                    if sources.iter().any(|&i| i >= input.count()) {
                        prop_assert_eq!(image.pixel(x as u32, y as u32), &empty[..], "{} at ({}, {})", d.name, x, y);
                    }
                }
            }
        }
    }
}

// Property: a pixel whose bytes are all below the count is never left empty
// when the empty color is one no palette can produce
proptest! {
    #[test]
    fn prop_before_count_is_drawn((bpr, rows, data) in screen(), count in 0usize..=300) {
        let style = vec![0u8; data.len()];
        let input = RenderInput::new(&data, &style, bpr, rows).unwrap().with_count(count);
        let mut config = PaletteConfig::default();
        config.preferences.empty_background_color = [1, 254, 3];
        for renderer in palette_renderers() {
            let d = renderer.descriptor();
            let image = renderer.render(&input, &config).unwrap();
            for y in 0..image.height as usize {
                for x in 0..image.width as usize {
                    let sources = source_bytes(renderer, x / d.scale_width, y / d.scale_height, bpr);
                    if sources.iter().all(|&i| i < input.count()) {
                        prop_assert_ne!(image.pixel(x as u32, y as u32), &[1u8, 254, 3][..], "{} at ({}, {})", d.name, x, y);
                    }
                }
            }
        }
    }
}

// Property: selection beats every other style bit
proptest! {
    #[test]
    fn prop_selection_wins((bpr, rows, data) in screen(), extra in any::<u8>()) {
        let style = vec![SELECTED_BIT_MASK | extra; data.len()];
        prop_assert_eq!(StyleClass::from_style(style[0]), StyleClass::Highlight);
        let input = RenderInput::new(&data, &style, bpr, rows).unwrap();
        let config = PaletteConfig::default();
        for renderer in palette_renderers() {
            let palettes = config.palette_set(renderer.registers(&config));
            let image = renderer.render(&input, &config).unwrap();
            for rgb in image.rgb_pixels() {
                prop_assert!(palettes.highlight.contains(&rgb), "{}: {:?}", renderer.name(), rgb);
            }
        }
    }
}

// Property: scaling by one after scaling by two changes nothing
proptest! {
    #[test]
    fn prop_intscale_identity(w in 1u32..=16, h in 1u32..=16, seed in any::<u8>()) {
        let data: Vec<u8> = (0..(w * h * 3) as usize).map(|i| (i as u8) ^ seed).collect();
        let image = BitmapData { width: w, height: h, format: crate::BitmapFormat::Rgb8, data };
        let doubled = intscale(image.clone(), 2, 2);
        prop_assert_eq!((doubled.width, doubled.height), (w * 2, h * 2));
        prop_assert_eq!(doubled.pixel(2 * w - 1, 2 * h - 1), image.pixel(w - 1, h - 1));
        prop_assert_eq!(intscale(doubled.clone(), 1, 1), doubled);
    }
}

// Property: swapping the 1bpp on/off colors is the same as inverting the data
proptest! {
    #[test]
    fn prop_mono_swap_is_not((bpr, rows, data) in screen()) {
        let style = vec![0u8; data.len()];
        let inverted: Vec<u8> = data.iter().map(|b| !b).collect();
        let config = PaletteConfig::default();
        let on_black = find_bitmap_renderer("B/W, 1bpp, on=black").unwrap();
        let on_white = find_bitmap_renderer("B/W, 1bpp, on=white").unwrap();
        let a = on_black.render(&RenderInput::new(&data, &style, bpr, rows).unwrap(), &config).unwrap();
        let b = on_white.render(&RenderInput::new(&inverted, &style, bpr, rows).unwrap(), &config).unwrap();
        prop_assert_eq!(a, b);
    }
}

// Property: the bit reverse table is its own inverse
proptest! {
    #[test]
    fn prop_bit_reverse_involution(b in any::<u8>()) {
        prop_assert_eq!(BIT_REVERSE_TABLE[BIT_REVERSE_TABLE[b as usize] as usize], b);
        prop_assert_eq!(b.count_ones(), BIT_REVERSE_TABLE[b as usize].count_ones());
    }
}

// Property: empty data renders an all-empty image of the requested shape
proptest! {
    #[test]
    fn prop_empty_data_is_background(bpr in 1usize..=8, rows in 1usize..=4) {
        let config = PaletteConfig::default();
        let empty: Rgb = config.preferences.empty_background_color;
        let input = RenderInput::new(&[], &[], bpr, rows).unwrap();
        for renderer in palette_renderers() {
            let image = renderer.render(&input, &config).unwrap();
            prop_assert!(image.rgb_pixels().all(|p| p == empty), "{}", renderer.name());
        }
    }
}
