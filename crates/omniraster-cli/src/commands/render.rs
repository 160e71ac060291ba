//! Render command: a binary file through one renderer to an image file

use crate::cli::RenderArgs;
use crate::commands::{load_config, read_from};
use omniraster_core::bitmap::find_bitmap_renderer;
use omniraster_core::font::find_builtin_font;
use omniraster_core::font_cache::FontCache;
use omniraster_core::text::find_font_renderer;
use omniraster_core::{RenderInput, Renderer, Result};
use omniraster_export::write_image;

/// Bitmap renderers by name first, then font renderers
///
/// `--font` names a built-in font or a glyph file; without it the mode's ROM
/// font is used.
fn select_renderer(args: &RenderArgs) -> Result<Box<dyn Renderer>> {
    if let Ok(renderer) = find_bitmap_renderer(&args.mode) {
        return Ok(Box::new(renderer));
    }
    let font_renderer = find_font_renderer(&args.mode)?;
    let text = match args.font.as_deref() {
        None => font_renderer.with_default_font(),
        Some(font) => match find_builtin_font(font) {
            Some(builtin) => font_renderer.with_font_definition(builtin.definition()),
            None => font_renderer.with_font(std::fs::read(font)?),
        },
    };
    log::debug!("{} with font {}", args.mode, text.font().name);
    Ok(Box::new(
        text.with_mapping(args.mapping.into())
            .with_zoom(args.zoom)
            .with_reverse(args.reverse),
    ))
}

pub fn run(args: &RenderArgs) -> Result<()> {
    if args.cache {
        FontCache::global().set_enabled(true);
    }
    let config = load_config(args.config.as_deref())?;
    let renderer = select_renderer(args)?;

    let data = read_from(&args.input, args.offset)?;
    let mut style = match &args.style {
        Some(path) => read_from(path, args.offset)?,
        None => Vec::new(),
    };
    style.resize(data.len(), 0);

    let bytes_per_row = renderer.validate_bytes_per_row(args.bytes_per_row);
    let rows = args
        .rows
        .unwrap_or_else(|| data.len().div_ceil(bytes_per_row.max(1)).max(1));
    let input = RenderInput::new(&data, &style, bytes_per_row, rows)?;

    if !args.quiet {
        eprintln!("Omniraster v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Rendering {} bytes with {}...", data.len(), renderer.name());
    }

    let image = renderer.render(&input, &config)?;
    write_image(&image, &args.output)?;

    if !args.quiet {
        eprintln!(
            "Wrote {}x{} image to {}",
            image.width,
            image.height,
            args.output.display()
        );
        if args.cache {
            let metrics = FontCache::global().metrics();
            eprintln!(
                "Font cache: {} lookups, {:.0}% hits",
                metrics.total_requests,
                FontCache::global().hit_rate() * 100.0
            );
        }
    }
    Ok(())
}
