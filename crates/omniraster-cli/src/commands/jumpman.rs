//! Jumpman command: draw a level's objects, flag unreachable peanuts

use crate::cli::JumpmanArgs;
use crate::commands::{load_config, read_from};
use omniraster_core::jumpman::{check_harvest, parse_level, Playfield};
use omniraster_core::Result;
use omniraster_export::write_image;

pub fn run(args: &JumpmanArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let table = read_from(&args.input, args.offset)?;
    let mut objects = parse_level(&table);
    let report = check_harvest(&mut objects, args.hx, args.hy);

    let mut field = Playfield::new();
    field.set_harvest_offset(args.hx, args.hy);
    field.draw_objects(&objects, &[])?;
    if args.grid {
        field.draw_harvest_grid();
    }
    let image = field.render(&config)?;
    write_image(&image, &args.output)?;

    if !args.quiet {
        eprintln!("{} objects drawn to {}", objects.len(), args.output.display());
        if !report.is_ok() {
            eprintln!(
                "Harvest problems: {} shared grid squares, {} peanuts on grid borders",
                report.duplicates.len(),
                report.bad_locations
            );
        }
    }
    Ok(())
}
