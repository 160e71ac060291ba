//! Info command: what can be rendered and written

use crate::cli::InfoArgs;
use omniraster_core::bitmap::BITMAP_RENDERERS;
use omniraster_core::font::BUILTIN_FONTS;
use omniraster_core::text::FONT_RENDERERS;
use omniraster_core::{Renderer, Result};

pub fn run(args: &InfoArgs) -> Result<()> {
    let show_all = !args.bitmaps && !args.fonts && !args.formats;

    println!("Omniraster v{}", env!("CARGO_PKG_VERSION"));
    println!();

    if show_all || args.bitmaps {
        println!("Bitmap renderers:");
        for r in BITMAP_RENDERERS {
            let d = r.descriptor();
            println!(
                "  {:<50} {} px/byte, scale {}x{}",
                d.name, d.pixels_per_byte, d.scale_width, d.scale_height
            );
        }
        println!();
    }

    if show_all || args.fonts {
        println!("Font renderers:");
        for r in FONT_RENDERERS {
            let d = r.descriptor();
            println!(
                "  {:<50} scale {}x{}, default font: {}",
                d.name,
                d.scale_width,
                d.scale_height,
                r.mode().default_font().name
            );
        }
        println!();
        println!("Built-in fonts (--font):");
        for f in BUILTIN_FONTS {
            println!("  {:<50} {} bytes", f.name, f.glyph_bytes.len());
        }
        println!();
    }

    if show_all || args.formats {
        println!("Output formats:");
        println!("  png               - Portable Network Graphics");
        println!("  ppm               - Portable Pixmap (binary P6)");
    }

    Ok(())
}
