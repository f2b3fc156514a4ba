//! Shared boundary types for the animation engine.
//!
//! This module defines the two key data contracts:
//! - Scene → Renderer (in-memory): `ResolvedFrame` containing `DrawOp`s
//! - Renderer → Encoder / Preview: `Grid` of `Cell`s sized by a `TerminalContract`

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared style and geometry primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    0xFF
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(0xFF, 0xFF, 0xFF, 0xFF);
    /// White with zero alpha; the starting tint of every fade-in.
    pub const TRANSPARENT: Rgba = Rgba::new(0xFF, 0xFF, 0xFF, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    pub fn rgb(self) -> Rgb {
        Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

/// Opaque color as stored in rendered cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 0xFF,
        g: 0xFF,
        b: 0xFF,
    };
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    /// Saturates at the edges of the coordinate space.
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

/// Top-left corner plus extent, in scene pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.x.saturating_add(self.width / 2),
            self.y.saturating_add(self.height / 2),
        )
    }

    /// A box of the given size whose center is `center`.
    pub fn centered_on(center: Point, width: i32, height: i32) -> Self {
        Bounds {
            x: center.x.saturating_sub(width / 2),
            y: center.y.saturating_sub(height / 2),
            width,
            height,
        }
    }
}

/// How a text object's anchor x relates to the rendered text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

// ---------------------------------------------------------------------------
// Backend handles (opaque, owned by the asset registry)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub usize);

/// A loaded texture as seen by scene construction: its handle plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    pub id: TextureId,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    pub id: FontId,
    pub size: i32,
}

// ---------------------------------------------------------------------------
// Scene → Renderer boundary (in-memory only, never serialized)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Texture {
        texture: TextureId,
        dest: Bounds,
        tint: Rgba,
    },
    Text {
        font: FontId,
        content: String,
        anchor: Point,
        align: TextAlign,
        tint: Rgba,
    },
    Line {
        start: Point,
        end: Point,
        color: Rgba,
    },
}

/// Everything that should be drawn for one frame, back to front.
#[derive(Debug, Clone)]
pub struct ResolvedFrame {
    pub index: usize,
    pub background: Rgba,
    pub ops: Vec<DrawOp>,
}

// ---------------------------------------------------------------------------
// Renderer → Encoder / Preview boundary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalContract {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Cell {
    pub fn blank(bg: Rgb) -> Self {
        Cell { ch: ' ', fg: bg, bg }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::blank(Rgb::default())
    }
}

/// A rendered frame: `height` rows of `width` cells.
pub type Grid = Vec<Vec<Cell>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub x: u16,
    pub y: u16,
    pub cell: Cell,
}
