//! End-to-end rendering scenarios, one per hardware family

use omniraster_core::bitmap::{apple2_row_offset, find_bitmap_renderer, BitmapMode, BitmapRenderer, MonoColors};
use omniraster_core::color::get_blended_color_registers;
use omniraster_core::config::PaletteConfig;
use omniraster_core::font::{bake_font, FontColors, FontMode};
use omniraster_core::jumpman::{is_bad_harvest_position, DrawObject, ObjectKind, Playfield, HARVEST_OVERLAY_COLOR};
use omniraster_core::style::{COMMENT_BIT_MASK, SELECTED_BIT_MASK};
use omniraster_core::{RenderInput, Renderer, Rgb};

const BLACK: Rgb = [0, 0, 0];
const WHITE: Rgb = [255, 255, 255];

fn row(image: &omniraster_core::BitmapData, y: u32) -> Vec<Rgb> {
    (0..image.width)
        .map(|x| {
            let p = image.pixel(x, y);
            [p[0], p[1], p[2]]
        })
        .collect()
}

#[test]
fn test_one_bit_per_pixel_single_byte() {
    let renderer = find_bitmap_renderer("B/W, 1bpp, on=white").unwrap();
    let input = RenderInput::new(&[0b1010_1010], &[0], 1, 1).unwrap().with_count(1);
    let image = renderer.render(&input, &PaletteConfig::default()).unwrap();

    assert_eq!((image.width, image.height), (8, 1));
    let expected: Vec<Rgb> = (0..8).map(|x| if x % 2 == 0 { WHITE } else { BLACK }).collect();
    assert_eq!(row(&image, 0), expected);
}

#[test]
fn test_two_bit_per_pixel_selection_highlight() {
    let registers: Vec<Rgb> = vec![[10, 20, 30], [40, 50, 60], [200, 100, 0], [0, 90, 250]];
    let mut config = PaletteConfig {
        color_registers: Some(registers.clone()),
        ..Default::default()
    };
    config.preferences.highlight_background_color = [255, 255, 0];

    let renderer = find_bitmap_renderer("2bpp").unwrap();
    let input = RenderInput::new(&[0b0001_1011], &[SELECTED_BIT_MASK], 1, 1).unwrap();
    let image = renderer.render(&input, &config).unwrap();

    assert_eq!(image.width, 4);
    assert_eq!(row(&image, 0), get_blended_color_registers(&registers, [255, 255, 0]));
}

#[test]
fn test_apple2_linear_with_swapped_colors() {
    let renderer = BitmapRenderer::new("apple 2 on black", BitmapMode::Apple2Linear(MonoColors::OnBlack));
    let input = RenderInput::new(&[0x7f], &[0], 1, 1).unwrap();
    let image = renderer.render(&input, &PaletteConfig::default()).unwrap();

    assert_eq!((image.width, image.height), (7, 1));
    assert_eq!(row(&image, 0), vec![BLACK; 7]);
}

#[test]
fn test_apple2_screen_order_row_offsets() {
    assert_eq!(apple2_row_offset(0), 0);
    assert_eq!(apple2_row_offset(1), 1024);
    assert_eq!(apple2_row_offset(8), 128);
    assert_eq!(apple2_row_offset(64), 40);
    assert_eq!(apple2_row_offset(191), 1024 * 7 + 128 * 7 + 80);

    // A lit byte at offset 1024 shows up on screen line 1 only
    let mut data = vec![0u8; 8192];
    data[1024] = 0x7f;
    let style = vec![0u8; data.len()];
    let renderer = find_bitmap_renderer("B/W, Apple 2, Screen Order").unwrap();
    let input = RenderInput::new(&data, &style, 40, 192).unwrap();
    let image = renderer.render(&input, &PaletteConfig::default()).unwrap();

    assert_eq!((image.width, image.height), (280, 192));
    assert_eq!(&row(&image, 1)[..7], &[WHITE; 7]);
    assert_eq!(row(&image, 0)[0], BLACK);
    assert_eq!(row(&image, 64)[0], BLACK);
}

#[test]
fn test_antic4_font_bake() {
    let glyph = [0x00, 0x55, 0xaa, 0xff, 0x00, 0x55, 0xaa, 0xff];
    let mut registers = vec![BLACK; 9];
    let bak = [0, 0, 0];
    let pf = [[50, 0, 0], [0, 100, 0], [0, 0, 150], [200, 200, 0]];
    registers[4..8].copy_from_slice(&pf);
    registers[8] = bak;
    let colors = FontColors {
        registers,
        text_fg: WHITE,
        text_bg: BLACK,
    };

    let table = bake_font(&glyph, FontMode::Antic4, &colors, false);
    assert_eq!((table.char_w, table.char_h), (8, 8));
    for x in 0..8 {
        assert_eq!(table.pixel(0, x, 0), bak, "row 0 is background");
        assert_eq!(table.pixel(0, x, 1), pf[0], "01 pairs are COLPF0");
        assert_eq!(table.pixel(0, x, 7), pf[2], "11 pairs are COLPF2");
        assert_eq!(table.pixel(128, x, 7), pf[3], "inverse 11 pairs are COLPF3");
    }
}

#[test]
fn test_jumpman_harvest_grid() {
    for x in 16..=22 {
        assert!(is_bad_harvest_position(x, 0, 0, 0), "x = {x}");
    }
    assert!(is_bad_harvest_position(0, 0, 0, 0));
    assert!(is_bad_harvest_position(0, 1, 0, 0));
    assert!(!is_bad_harvest_position(0, 3, 0, 0));

    let mut field = Playfield::new();
    field.draw_object(&DrawObject::new(ObjectKind::Peanut, 16, 10, 1), 0, false).unwrap();
    assert_ne!(field.style_at(17, 11) & COMMENT_BIT_MASK, 0);

    let config = PaletteConfig::default();
    let image = field.render(&config).unwrap();
    let cross = Playfield::registers(&config)[6];
    let tinted = get_blended_color_registers(&[cross], HARVEST_OVERLAY_COLOR)[0];
    assert_eq!(image.pixel(17, 11), &tinted[..], "center of the X is tinted red");
}

#[test]
fn test_zero_count_is_all_empty() {
    let config = PaletteConfig::default();
    let empty = config.preferences.empty_background_color;
    let renderer = find_bitmap_renderer("Antic D (Gr 7, 2bpp)").unwrap();
    let input = RenderInput::new(&[0xff; 4], &[0; 4], 2, 2).unwrap().with_count(0);
    let image = renderer.render(&input, &config).unwrap();
    assert_eq!((image.width, image.height), (16, 4));
    assert!(image.rgb_pixels().all(|p| p == empty));
}
