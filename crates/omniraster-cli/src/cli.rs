//! Command-line argument definitions

use clap::{Parser, Subcommand, ValueEnum};
use omniraster_core::char_map::CharacterMapping;
use std::path::PathBuf;

/// Omniraster - render raw 8-bit computer memory as images
#[derive(Parser, Debug)]
#[command(name = "omniraster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List renderers and output formats
    #[command(alias = "i")]
    Info(InfoArgs),

    /// Render a binary file to an image
    #[command(alias = "r")]
    Render(Box<RenderArgs>),

    /// Render a Jumpman level object table
    Jumpman(JumpmanArgs),
}

#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// List bitmap renderers
    #[arg(long)]
    pub bitmaps: bool,

    /// List font renderers
    #[arg(long)]
    pub fonts: bool,

    /// List output formats
    #[arg(long)]
    pub formats: bool,
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Raw bytes to render
    pub input: PathBuf,

    /// Renderer display name, see `omniraster info`
    #[arg(short = 'm', long = "mode", default_value = "B/W, 1bpp, on=black")]
    pub mode: String,

    /// Bytes per screen row
    #[arg(short = 'w', long = "bytes-per-row", default_value = "40")]
    pub bytes_per_row: usize,

    /// Number of rows (default: enough to show the whole file)
    #[arg(short = 'r', long = "rows")]
    pub rows: Option<usize>,

    /// Skip this many bytes of the input
    #[arg(long = "offset", default_value = "0")]
    pub offset: usize,

    /// Style bytes, one per input byte; missing bytes are unstyled
    #[arg(short = 's', long = "style")]
    pub style: Option<PathBuf>,

    /// Built-in font name or glyph file for font renderers (default: the
    /// mode's ROM font)
    #[arg(short = 'f', long = "font")]
    pub font: Option<String>,

    /// How text bytes map to glyphs
    #[arg(long = "mapping", value_enum, default_value = "internal")]
    pub mapping: MappingArg,

    /// Inverse text, or the second flash frame for Apple fonts
    #[arg(long = "reverse")]
    pub reverse: bool,

    /// Extra integer zoom for font renderers
    #[arg(short = 'z', long = "zoom", default_value = "1")]
    pub zoom: usize,

    /// Palette configuration (JSON)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Keep baked fonts between renders
    #[arg(long = "cache")]
    pub cache: bool,

    /// Output image (.png or .ppm)
    #[arg(short = 'o', long = "output", default_value = "out.png")]
    pub output: PathBuf,

    /// Silent mode
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

#[derive(Parser, Debug)]
pub struct JumpmanArgs {
    /// Level object table (0xfc/0xfd/0xfe commands, 0xff terminated)
    pub input: PathBuf,

    /// Skip this many bytes of the input
    #[arg(long = "offset", default_value = "0")]
    pub offset: usize,

    /// Harvest grid x offset
    #[arg(long = "hx", default_value = "0")]
    pub hx: u8,

    /// Harvest grid y offset
    #[arg(long = "hy", default_value = "0")]
    pub hy: u8,

    /// Overlay the harvest grid in red
    #[arg(long = "grid")]
    pub grid: bool,

    /// Palette configuration (JSON)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Output image (.png or .ppm)
    #[arg(short = 'o', long = "output", default_value = "level.png")]
    pub output: PathBuf,

    /// Silent mode
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MappingArg {
    Internal,
    Atascii,
}

impl From<MappingArg> for CharacterMapping {
    fn from(arg: MappingArg) -> Self {
        match arg {
            MappingArg::Internal => CharacterMapping::Internal,
            MappingArg::Atascii => CharacterMapping::Atascii,
        }
    }
}
