//! Jumpman level playfield
//!
//! A Jumpman level is a list of drawing objects: runs of girders, ladders,
//! ropes, and peanuts, each repeated `count` times along a step vector.
//! Objects are drawn into a 160x88 buffer of ANTIC register numbers (one
//! byte per pixel, background is register 8) alongside a style buffer and a
//! pick buffer that remembers which object covers each pixel.
//!
//! Peanuts are collected through a coarse harvest grid. A peanut whose
//! corner lands in the border strips of that grid would crash the game when
//! collected, so such peanuts are drawn as a red X and the grid itself can
//! be overlaid in red with [`Playfield::draw_harvest_grid`].

use std::collections::BTreeSet;

use crate::bitmap::find_bitmap_renderer;
use crate::color::extended_color_registers;
use crate::config::PaletteConfig;
use crate::error::{RasterError, Result};
use crate::style::{COMMENT_BIT_MASK, MATCH_BIT_MASK, SELECTED_BIT_MASK};
use crate::traits::Renderer;
use crate::types::{BitmapData, RenderInput, Rgb};

pub const PLAYFIELD_WIDTH: usize = 160;
pub const PLAYFIELD_HEIGHT: usize = 88;

/// COLBK, the value of an empty playfield pixel
pub const BACKGROUND_REGISTER: u8 = 8;

/// Added to a pixel to draw it from the dimmed half of the register table
pub const DIM_OFFSET: u8 = 0x10;

/// Tint of the harvest overlay and of misplaced peanuts
pub const HARVEST_OVERLAY_COLOR: Rgb = [255, 0, 0];

/// Renderer the finished playfield goes through
pub const PLAYFIELD_RENDERER: &str = "Intermediate Mode 1 Byte Per Pixel";

const WHITE: Rgb = [255, 255, 255];

/// Drawing-code color numbers to ANTIC register numbers; 4 is the player
fn register_for_code(code: u8) -> Option<u8> {
    match code {
        0 => Some(8),
        1 => Some(4),
        2 => Some(5),
        3 => Some(6),
        4 => Some(0),
        _ => None,
    }
}

const GIRDER_CODES: &[u8] = &[
    4, 0, 0, 1, 1, 1, 1, //
    4, 0, 1, 1, 0, 1, 0, //
    4, 0, 2, 1, 1, 1, 1, //
    0xff,
];

const LADDER_CODES: &[u8] = &[
    2, 0, 0, 2, 2, //
    2, 6, 0, 2, 2, //
    2, 0, 1, 2, 2, //
    2, 6, 1, 2, 2, //
    8, 0, 2, 2, 2, 2, 2, 2, 2, 2, 2, //
    2, 0, 3, 2, 2, //
    2, 6, 3, 2, 2, //
    0xff,
];

const UP_ROPE_CODES: &[u8] = &[
    1, 0, 0, 1, //
    1, 1, 1, 1, //
    1, 0, 2, 1, //
    1, 1, 3, 1, //
    0xff,
];

const DOWN_ROPE_CODES: &[u8] = &[
    1, 0, 0, 2, //
    1, 0, 1, 2, //
    1, 1, 2, 2, //
    1, 1, 3, 2, //
    0xff,
];

const PEANUT_CODES: &[u8] = &[
    4, 0, 0, 0, 3, 3, 0, //
    4, 0, 1, 3, 0, 0, 3, //
    4, 0, 2, 0, 3, 3, 0, //
    0xff,
];

const RESPAWN_CODES: &[u8] = &[
    6, 0, 0, 4, 4, 4, 4, 4, 4, //
    6, 0, 1, 4, 0, 0, 0, 0, 4, //
    6, 0, 2, 4, 0, 0, 0, 0, 4, //
    6, 0, 3, 4, 0, 0, 0, 0, 4, //
    6, 0, 4, 4, 0, 0, 0, 0, 4, //
    6, 0, 5, 4, 4, 4, 4, 4, 4, //
    0xff,
];

const ERASE_GIRDER_CODES: &[u8] = &[
    4, 0, 0, 0, 0, 0, 0, //
    4, 0, 1, 0, 0, 0, 0, //
    4, 0, 2, 0, 0, 0, 0, //
    0xff,
];

const ERASE_LADDER_CODES: &[u8] = &[
    8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    8, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, //
    8, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, //
    8, 0, 3, 0, 0, 0, 0, 0, 0, 0, 0, //
    0xff,
];

const ERASE_ROPE_CODES: &[u8] = &[
    2, 0, 0, 0, 0, //
    2, 0, 1, 0, 0, //
    2, 0, 2, 0, 0, //
    2, 0, 3, 0, 0, //
    0xff,
];

/// The X drawn in place of a misplaced peanut
const ERROR_CODES: &[u8] = &[
    6, 0, 0, 3, 0, 0, 0, 0, 3, //
    6, 0, 1, 0, 3, 0, 0, 3, 0, //
    6, 0, 2, 0, 0, 3, 3, 0, 0, //
    6, 0, 3, 0, 3, 0, 0, 3, 0, //
    6, 0, 4, 3, 0, 0, 0, 0, 3, //
    0xff,
];
const ERROR_ORIGIN: (i32, i32) = (-1, -1);

/// Ring of match bits drawn around peanuts that trigger painting
const TRIGGER_CIRCLE: [[bool; 8]; 7] = {
    const O: bool = false;
    const X: bool = true;
    [
        [O, O, X, X, X, X, O, O],
        [O, X, O, O, O, O, X, O],
        [X, O, O, O, O, O, O, X],
        [X, O, O, O, O, O, O, X],
        [X, O, O, O, O, O, O, X],
        [O, X, O, O, O, O, X, O],
        [O, O, X, X, X, X, O, O],
    ]
};

/// Every kind of object the level editor knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Girder,
    Ladder,
    UpRope,
    DownRope,
    Peanut,
    Respawn,
    EraseGirder,
    EraseLadder,
    EraseRope,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 9] = [
        ObjectKind::Girder,
        ObjectKind::Ladder,
        ObjectKind::UpRope,
        ObjectKind::DownRope,
        ObjectKind::Peanut,
        ObjectKind::Respawn,
        ObjectKind::EraseGirder,
        ObjectKind::EraseLadder,
        ObjectKind::EraseRope,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ObjectKind::Girder => "girder",
            ObjectKind::Ladder => "ladder",
            ObjectKind::UpRope => "uprope",
            ObjectKind::DownRope => "downrope",
            ObjectKind::Peanut => "peanut",
            ObjectKind::Respawn => "jumpman",
            ObjectKind::EraseGirder => "girder_erase",
            ObjectKind::EraseLadder => "ladder_erase",
            ObjectKind::EraseRope => "rope_erase",
        }
    }

    /// Size of one unit, which is also the default step between units
    pub const fn default_step(self) -> (i32, i32) {
        match self {
            ObjectKind::Girder | ObjectKind::Peanut | ObjectKind::EraseGirder => (4, 3),
            ObjectKind::Ladder | ObjectKind::EraseLadder => (8, 4),
            ObjectKind::UpRope | ObjectKind::DownRope | ObjectKind::EraseRope => (2, 4),
            ObjectKind::Respawn => (6, 0),
        }
    }

    /// Address of the object's drawing routine in the game image
    pub const fn address(self) -> Option<u16> {
        match self {
            ObjectKind::Girder => Some(0x4000),
            ObjectKind::EraseGirder => Some(0x4016),
            ObjectKind::Ladder => Some(0x402c),
            ObjectKind::EraseLadder => Some(0x4056),
            ObjectKind::Peanut => Some(0x4083),
            ObjectKind::UpRope => Some(0x40af),
            ObjectKind::DownRope => Some(0x40c0),
            ObjectKind::EraseRope => Some(0x40d1),
            ObjectKind::Respawn => None,
        }
    }

    pub fn from_address(address: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.address() == Some(address))
    }

    /// Collectible objects take part in the harvest grid
    pub const fn is_single(self) -> bool {
        matches!(self, ObjectKind::Peanut)
    }

    pub const fn drawing_codes(self) -> &'static [u8] {
        match self {
            ObjectKind::Girder => GIRDER_CODES,
            ObjectKind::Ladder => LADDER_CODES,
            ObjectKind::UpRope => UP_ROPE_CODES,
            ObjectKind::DownRope => DOWN_ROPE_CODES,
            ObjectKind::Peanut => PEANUT_CODES,
            ObjectKind::Respawn => RESPAWN_CODES,
            ObjectKind::EraseGirder => ERASE_GIRDER_CODES,
            ObjectKind::EraseLadder => ERASE_LADDER_CODES,
            ObjectKind::EraseRope => ERASE_ROPE_CODES,
        }
    }

    /// Offset from the object position to the shape's top left corner
    pub const fn relative_origin(self) -> (i32, i32) {
        match self {
            ObjectKind::Respawn => (0, -5),
            _ => (0, 0),
        }
    }
}

/// A rectangular stamp decoded from drawing codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub width: usize,
    pub height: usize,
    /// Register per cell; only meaningful where `drawn` is set
    pub pixels: Vec<u8>,
    pub drawn: Vec<bool>,
    pub origin: (i32, i32),
}

impl Shape {
    /// Decode `[n, dx, dy, n codes]*` runs terminated by `0xff`
    pub fn from_codes(codes: &[u8], origin: (i32, i32)) -> Result<Self> {
        let mut runs = Vec::new();
        let mut index = 0;
        while index < codes.len() && codes[index] != 0xff {
            let (Some(&n), Some(&xoff), Some(&yoff)) = (codes.get(index), codes.get(index + 1), codes.get(index + 2)) else {
                return Err(RasterError::InvalidDrawingCodes(format!("short run header at {index}")));
            };
            index += 3;
            let n = n as usize;
            let colors = codes.get(index..index + n).ok_or_else(|| {
                RasterError::InvalidDrawingCodes(format!("{n} pixels expected at {index}"))
            })?;
            runs.push((xoff as i8 as i32, yoff as i8 as i32, colors));
            index += n;
        }

        let (mut xmin, mut ymin, mut xmax, mut ymax) = (0i32, 0i32, 0i32, 0i32);
        for &(x, y, colors) in &runs {
            xmin = xmin.min(x);
            ymin = ymin.min(y);
            xmax = xmax.max(x + colors.len() as i32 - 1);
            ymax = ymax.max(y);
        }
        let width = (xmax - xmin + 1) as usize;
        let height = (ymax - ymin + 1) as usize;
        let mut pixels = vec![0u8; width * height];
        let mut drawn = vec![false; width * height];
        for (x, y, colors) in runs {
            let row = (y - ymin) as usize;
            for (k, &code) in colors.iter().enumerate() {
                let register = register_for_code(code).ok_or_else(|| {
                    RasterError::InvalidDrawingCodes(format!("unknown color {code}"))
                })?;
                let i = row * width + (x - xmin) as usize + k;
                pixels[i] = register;
                drawn[i] = true;
            }
        }
        Ok(Self {
            width,
            height,
            pixels,
            drawn,
            origin,
        })
    }

    pub fn for_kind(kind: ObjectKind) -> Result<Self> {
        Self::from_codes(kind.drawing_codes(), kind.relative_origin())
    }

    pub fn error_marker() -> Result<Self> {
        Self::from_codes(ERROR_CODES, ERROR_ORIGIN)
    }
}

/// Harvest grid test for one position
///
/// The game tests `x` in playfield pixels and `y` in player lines, which are
/// twice as fine, hence the doubling.
pub fn is_bad_harvest_position(x: i32, y: i32, hx: u8, hy: u8) -> bool {
    (x + 0x30 + hx as i32) & 0x1f < 7 || (2 * y + 0x20 + hy as i32) & 0x1f < 5
}

/// One placed object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawObject {
    pub kind: ObjectKind,
    pub x: i32,
    pub y: i32,
    pub count: usize,
    pub dx: i32,
    pub dy: i32,
    /// Routine called when the peanut is collected
    pub trigger_function: Option<u16>,
    /// Objects drawn when the peanut is collected
    pub trigger_painting: Vec<DrawObject>,
    /// Set by [`check_harvest`] for peanuts the game cannot collect
    pub error: bool,
}

impl DrawObject {
    pub fn new(kind: ObjectKind, x: i32, y: i32, count: usize) -> Self {
        let (dx, dy) = kind.default_step();
        Self {
            kind,
            x,
            y,
            count,
            dx,
            dy,
            trigger_function: None,
            trigger_painting: Vec::new(),
            error: false,
        }
    }

    pub fn with_step(mut self, dx: i32, dy: i32) -> Self {
        self.dx = dx;
        self.dy = dy;
        self
    }

    pub fn with_trigger_function(mut self, address: u16) -> Self {
        self.trigger_function = Some(address);
        self
    }

    pub fn with_trigger_painting(mut self, objects: Vec<DrawObject>) -> Self {
        self.trigger_painting = objects;
        self
    }

    /// Screen x; positions stored as unsigned bytes wrap to negative
    pub fn screen_x(&self) -> i32 {
        if self.x < PLAYFIELD_WIDTH as i32 {
            self.x
        } else {
            self.x - 256
        }
    }

    /// Grid square identity the game uses to find a collected peanut
    pub fn harvest_checksum(&self, hx: u8, hy: u8) -> u8 {
        let x = (self.x + 0x30 + hx as i32) & 0xe0;
        let y = ((self.y * 2 + 0x20 + hy as i32) & 0xe0) / 0x10;
        (x | y) as u8
    }

    /// Either corner of the first unit is on a harvest border
    pub fn is_bad_location(&self, hx: u8, hy: u8) -> bool {
        let (w, h) = self.kind.default_step();
        is_bad_harvest_position(self.x, self.y, hx, hy)
            || is_bad_harvest_position(self.x + w - 1, self.y + h - 1, hx, hy)
    }
}

/// Problems found by [`check_harvest`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestReport {
    /// Checksums claimed by more than one peanut
    pub duplicates: BTreeSet<u8>,
    pub bad_locations: usize,
}

impl HarvestReport {
    pub fn is_ok(&self) -> bool {
        self.duplicates.is_empty() && self.bad_locations == 0
    }
}

/// Validate every peanut, including those painted by triggers, and flag the
/// ones the game would mishandle
pub fn check_harvest(objects: &mut [DrawObject], hx: u8, hy: u8) -> HarvestReport {
    fn collect(objects: &[DrawObject], hx: u8, hy: u8, seen: &mut BTreeSet<u8>, report: &mut HarvestReport) {
        for obj in objects {
            if obj.kind.is_single() {
                let grid = obj.harvest_checksum(hx, hy);
                if !seen.insert(grid) {
                    report.duplicates.insert(grid);
                }
                if obj.is_bad_location(hx, hy) {
                    report.bad_locations += 1;
                }
            }
            collect(&obj.trigger_painting, hx, hy, seen, report);
        }
    }

    fn mark(objects: &mut [DrawObject], hx: u8, hy: u8, duplicates: &BTreeSet<u8>) {
        for obj in objects.iter_mut() {
            if obj.kind.is_single() {
                obj.error = duplicates.contains(&obj.harvest_checksum(hx, hy)) || obj.is_bad_location(hx, hy);
            }
            mark(&mut obj.trigger_painting, hx, hy, duplicates);
        }
    }

    let mut report = HarvestReport::default();
    collect(objects, hx, hy, &mut BTreeSet::new(), &mut report);
    mark(objects, hx, hy, &report.duplicates);
    if !report.is_ok() {
        log::warn!(
            "harvest grid problems: {} duplicate squares, {} border peanuts",
            report.duplicates.len(),
            report.bad_locations
        );
    }
    report
}

/// Decode a level's object table
///
/// `0xfc lo hi` selects the object at that address, `0xfd x y` moves,
/// `0xfe dx dy` sets the signed step, any value below `0xfb` draws that many
/// units, and `0xff` ends the table.
pub fn parse_level(data: &[u8]) -> Vec<DrawObject> {
    let mut objects = Vec::new();
    let (mut x, mut y, mut dx, mut dy) = (0i32, 0i32, 0i32, 0i32);
    let mut kind = None;
    let mut index = 0;
    while index < data.len() {
        let c = data[index];
        index += 1;
        match c {
            0xff => break,
            0xfc..=0xfe => {
                let (Some(&a), Some(&b)) = (data.get(index), data.get(index + 1)) else {
                    log::warn!("level table truncated at {index}");
                    break;
                };
                index += 2;
                match c {
                    0xfc => {
                        let address = u16::from_le_bytes([a, b]);
                        kind = ObjectKind::from_address(address);
                        if kind.is_none() {
                            log::warn!("no built-in object at ${address:04x}");
                        }
                    },
                    0xfd => (x, y) = (a as i32, b as i32),
                    _ => (dx, dy) = (a as i8 as i32, b as i8 as i32),
                }
            },
            0xfb => {},
            count => {
                if let Some(kind) = kind {
                    objects.push(DrawObject::new(kind, x, y, count as usize).with_step(dx, dy));
                }
            },
        }
    }
    objects
}

/// Encode objects as a level table, grouping consecutive objects of a kind
pub fn painting_table(objects: &[DrawObject]) -> Vec<u8> {
    let mut data = Vec::new();
    let mut current = None;
    let mut step = None;
    for obj in objects {
        let Some(address) = obj.kind.address() else {
            continue;
        };
        if current != Some(obj.kind) {
            data.extend_from_slice(&[0xfc, address as u8, (address >> 8) as u8]);
            current = Some(obj.kind);
        }
        if step != Some((obj.dx, obj.dy)) {
            data.extend_from_slice(&[0xfe, obj.dx as u8, obj.dy as u8]);
            step = Some((obj.dx, obj.dy));
        }
        data.extend_from_slice(&[0xfd, obj.x as u8, obj.y as u8, obj.count as u8]);
    }
    data.push(0xff);
    data
}

/// The 160x88 indexed playfield with its style and pick buffers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playfield {
    pixels: Vec<u8>,
    style: Vec<u8>,
    pick: Vec<Option<usize>>,
    harvest_offset: (u8, u8),
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new()
    }
}

impl Playfield {
    pub fn new() -> Self {
        let len = PLAYFIELD_WIDTH * PLAYFIELD_HEIGHT;
        Self {
            pixels: vec![BACKGROUND_REGISTER; len],
            style: vec![0; len],
            pick: vec![None; len],
            harvest_offset: (0, 0),
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(BACKGROUND_REGISTER);
        self.style.fill(0);
        self.pick.fill(None);
    }

    pub fn set_harvest_offset(&mut self, hx: u8, hy: u8) {
        self.harvest_offset = (hx, hy);
    }

    pub fn harvest_offset(&self) -> (u8, u8) {
        self.harvest_offset
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn styles(&self) -> &[u8] {
        &self.style
    }

    #[inline]
    fn index(x: usize, y: usize) -> usize {
        y * PLAYFIELD_WIDTH + x
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[Self::index(x, y)]
    }

    pub fn style_at(&self, x: usize, y: usize) -> u8 {
        self.style[Self::index(x, y)]
    }

    /// Index of the object drawn last at `(x, y)`
    pub fn pick_at(&self, x: usize, y: usize) -> Option<usize> {
        self.pick[Self::index(x, y)]
    }

    fn stamp(&mut self, shape: &Shape, obj: &DrawObject, pick_index: usize, style: u8, highlight: bool) {
        let mut x = obj.screen_x() + shape.origin.0;
        let mut y = obj.y + shape.origin.1;
        for unit in 0..obj.count {
            let right = x + shape.width as i32 - 1;
            let bottom = y + shape.height as i32 - 1;
            if x < 0 || y < 0 || right >= PLAYFIELD_WIDTH as i32 || bottom >= PLAYFIELD_HEIGHT as i32 {
                log::debug!("{} unit {unit} off screen at {x},{y}", obj.kind.name());
            } else {
                for sy in 0..shape.height {
                    for sx in 0..shape.width {
                        let i = Self::index(x as usize + sx, y as usize + sy);
                        let s = sy * shape.width + sx;
                        if shape.drawn[s] {
                            self.pixels[i] = shape.pixels[s];
                        }
                        if highlight {
                            self.style[i] = SELECTED_BIT_MASK;
                        }
                        self.style[i] |= style;
                        self.pick[i] = Some(pick_index);
                    }
                }
            }
            x += obj.dx;
            y += obj.dy;
        }
    }

    fn draw_trigger_circle(&mut self, obj: &DrawObject) {
        let x0 = obj.x - 2;
        let y0 = obj.y - 2;
        for (cy, row) in TRIGGER_CIRCLE.iter().enumerate() {
            for (cx, &set) in row.iter().enumerate() {
                let x = x0 + cx as i32;
                let y = y0 + cy as i32;
                if set && (0..PLAYFIELD_WIDTH as i32).contains(&x) && (0..PLAYFIELD_HEIGHT as i32).contains(&y) {
                    self.style[Self::index(x as usize, y as usize)] |= MATCH_BIT_MASK;
                }
            }
        }
    }

    /// Draw one object, recording `pick_index` under every unit
    ///
    /// Peanuts on a harvest border, or already flagged by [`check_harvest`],
    /// are drawn as an X carrying the comment bit.
    pub fn draw_object(&mut self, obj: &DrawObject, pick_index: usize, highlight: bool) -> Result<()> {
        let (hx, hy) = self.harvest_offset;
        let misplaced = obj.kind.is_single() && (obj.error || obj.is_bad_location(hx, hy));
        let (shape, mut style) = if misplaced {
            (Shape::error_marker()?, COMMENT_BIT_MASK)
        } else {
            (Shape::for_kind(obj.kind)?, 0)
        };
        if obj.trigger_function.is_some() {
            style |= MATCH_BIT_MASK;
        }
        self.stamp(&shape, obj, pick_index, style, highlight);
        if !obj.trigger_painting.is_empty() {
            self.draw_trigger_circle(obj);
        }
        Ok(())
    }

    /// Draw a list of objects; the pick index is the position in `objects`
    pub fn draw_objects(&mut self, objects: &[DrawObject], highlight: &[usize]) -> Result<()> {
        for (i, obj) in objects.iter().enumerate() {
            self.draw_object(obj, i, highlight.contains(&i))?;
        }
        log::debug!("drew {} jumpman objects", objects.len());
        Ok(())
    }

    /// Move every pixel to the dimmed register range
    pub fn fade(&mut self) {
        for p in &mut self.pixels {
            *p |= DIM_OFFSET;
        }
    }

    /// Show the objects painted by `root` on top of a faded level
    ///
    /// The root peanut stays visible in the comment color and only the
    /// painted objects remain pickable.
    pub fn show_trigger_layer(&mut self, root: &DrawObject, highlight: &[usize]) -> Result<()> {
        self.fade();
        self.draw_object(root, 0, true)?;
        for s in &mut self.style {
            if *s & SELECTED_BIT_MASK != 0 {
                *s |= COMMENT_BIT_MASK;
            }
            *s &= !(MATCH_BIT_MASK | SELECTED_BIT_MASK);
        }
        self.pick.fill(None);
        self.draw_objects(&root.trigger_painting, highlight)
    }

    /// Mark every pixel that fails the harvest test with the comment bit
    pub fn draw_harvest_grid(&mut self) {
        let (hx, hy) = self.harvest_offset;
        for y in 0..PLAYFIELD_HEIGHT {
            for x in 0..PLAYFIELD_WIDTH {
                if is_bad_harvest_position(x as i32, y as i32, hx, hy) {
                    self.style[Self::index(x, y)] |= COMMENT_BIT_MASK;
                }
            }
        }
    }

    /// The 32 registers the playfield indexes, with player 0 forced to
    /// white so the respawn marker shows
    pub fn registers(config: &PaletteConfig) -> Vec<Rgb> {
        let mut registers = extended_color_registers(&config.antic_color_registers, config.color_standard);
        registers[0] = WHITE;
        registers[16] = [WHITE[0] / 4 + 64, WHITE[1] / 4 + 64, WHITE[2] / 4 + 64];
        registers
    }

    /// Render to RGB through the one-byte-per-pixel renderer
    pub fn render(&self, config: &PaletteConfig) -> Result<BitmapData> {
        let renderer = find_bitmap_renderer(PLAYFIELD_RENDERER)?;
        let mut config = config.clone();
        config.color_registers = Some(Self::registers(&config));
        config.preferences.comment_background_color = HARVEST_OVERLAY_COLOR;
        let input = RenderInput::new(&self.pixels, &self.style, PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT)?;
        renderer.render(&input, &config)
    }
}
