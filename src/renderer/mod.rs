//! Renderer — the deterministic cell rasterizer.
//!
//! Takes `ResolvedFrame`s (in-memory, from the scene) and paints them onto a
//! fixed-size grid of terminal cells. Scene pixels are scaled onto the
//! `TerminalContract`; draw operations are applied in the order given, so
//! later operations paint over earlier ones.
//!
//! The renderer is pure and stateless. Given the same frame, it always
//! produces the same grid. It knows nothing about time or animation.

pub mod assets;

use log::warn;

use crate::types::{
    Bounds, Cell, CellChange, DrawOp, FontId, Grid, Point, ResolvedFrame, Rgb, Rgba, TextAlign,
    TerminalContract,
};
use assets::{Assets, Shape, TextureDef};

pub struct Renderer {
    contract: TerminalContract,
    scene_width: i32,
    scene_height: i32,
    assets: Assets,
}

impl Renderer {
    pub fn new(contract: TerminalContract, scene_size: (i32, i32), assets: Assets) -> Self {
        Renderer {
            contract,
            scene_width: scene_size.0.max(1),
            scene_height: scene_size.1.max(1),
            assets,
        }
    }

    pub fn contract(&self) -> TerminalContract {
        self.contract
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    /// Size of `content` in scene pixels: one cell per character, one font
    /// size tall.
    pub fn text_extent(&self, font: FontId, content: &str) -> (i32, i32) {
        let chars = content.chars().count() as i64;
        let width = chars * self.scene_width as i64 / self.contract.width.max(1) as i64;
        let height = match self.assets.font(font) {
            Some(def) => def.size,
            None => self.scene_height / self.contract.height.max(1) as i32,
        };
        (width as i32, height)
    }

    /// Rasterize a resolved frame onto a fresh grid.
    pub fn render(&self, frame: &ResolvedFrame) -> Grid {
        let w = self.contract.width as usize;
        let h = self.contract.height as usize;
        let mut grid = vec![vec![Cell::blank(frame.background.rgb()); w]; h];

        for op in &frame.ops {
            match op {
                DrawOp::Texture {
                    texture,
                    dest,
                    tint,
                } => match self.assets.texture(*texture) {
                    Some(def) => self.paint_texture(&mut grid, def, dest, *tint),
                    None => warn!("frame {}: unknown texture {:?}", frame.index, texture),
                },
                DrawOp::Text {
                    font,
                    content,
                    anchor,
                    align,
                    tint,
                } => self.paint_text(&mut grid, *font, content, *anchor, *align, *tint),
                DrawOp::Line { start, end, color } => {
                    self.paint_line(&mut grid, *start, *end, *color)
                }
            }
        }

        grid
    }

    /// Compute a cell-level diff between two grids.
    pub fn diff(prev: &[Vec<Cell>], next: &[Vec<Cell>]) -> Vec<CellChange> {
        let mut changes = Vec::new();
        for (y, (prev_row, next_row)) in prev.iter().zip(next.iter()).enumerate() {
            for (x, (prev_cell, next_cell)) in prev_row.iter().zip(next_row.iter()).enumerate() {
                if prev_cell != next_cell {
                    changes.push(CellChange {
                        x: x as u16,
                        y: y as u16,
                        cell: *next_cell,
                    });
                }
            }
        }
        changes
    }

    // -----------------------------------------------------------------------
    // Coordinate mapping
    // -----------------------------------------------------------------------

    /// The cell containing scene pixel `(x, y)`. May lie outside the grid.
    fn cell_of(&self, x: i32, y: i32) -> (i64, i64) {
        let col = (x as i64 * self.contract.width as i64).div_euclid(self.scene_width as i64);
        let row = (y as i64 * self.contract.height as i64).div_euclid(self.scene_height as i64);
        (col, row)
    }

    fn px_per_col(&self) -> f32 {
        self.scene_width as f32 / self.contract.width.max(1) as f32
    }

    fn px_per_row(&self) -> f32 {
        self.scene_height as f32 / self.contract.height.max(1) as f32
    }

    fn cell_mut<'g>(grid: &'g mut Grid, col: i64, row: i64) -> Option<&'g mut Cell> {
        if col < 0 || row < 0 {
            return None;
        }
        grid.get_mut(row as usize)?.get_mut(col as usize)
    }

    // -----------------------------------------------------------------------
    // Primitives
    // -----------------------------------------------------------------------

    fn paint_texture(&self, grid: &mut Grid, def: &TextureDef, dest: &Bounds, tint: Rgba) {
        if tint.a == 0 || dest.width <= 0 || dest.height <= 0 {
            return;
        }
        let color = modulate(def.color, tint);
        let right = (dest.x as i64 + dest.width as i64 - 1).min(i32::MAX as i64) as i32;
        let bottom = (dest.y as i64 + dest.height as i64 - 1).min(i32::MAX as i64) as i32;
        let (c0, r0) = self.cell_of(dest.x, dest.y);
        let (c1, r1) = self.cell_of(right, bottom);

        // Only the part of the box that lands on the grid is visited.
        let c0 = c0.max(0);
        let r0 = r0.max(0);
        let c1 = c1.min(self.contract.width as i64 - 1);
        let r1 = r1.min(self.contract.height as i64 - 1);

        let (ppc, ppr) = (self.px_per_col(), self.px_per_row());
        let rx = dest.width as f32 / 2.0;
        let ry = dest.height as f32 / 2.0;
        let ex = dest.x as f32 + rx;
        let ey = dest.y as f32 + ry;

        for row in r0..=r1 {
            for col in c0..=c1 {
                if def.shape == Shape::Ellipse {
                    let dx = ((col as f32 + 0.5) * ppc - ex) / rx;
                    let dy = ((row as f32 + 0.5) * ppr - ey) / ry;
                    if dx * dx + dy * dy > 1.0 {
                        continue;
                    }
                }
                if let Some(cell) = Self::cell_mut(grid, col, row) {
                    cell.bg = blend(cell.bg, color, tint.a);
                    cell.fg = blend(cell.fg, color, tint.a);
                }
            }
        }
    }

    fn paint_text(
        &self,
        grid: &mut Grid,
        font: FontId,
        content: &str,
        anchor: Point,
        align: TextAlign,
        tint: Rgba,
    ) {
        if tint.a == 0 {
            return;
        }
        let (width, _) = self.text_extent(font, content);
        let left = match align {
            TextAlign::Left => anchor.x,
            TextAlign::Center => anchor.x - width / 2,
            TextAlign::Right => anchor.x - width,
        };
        let (col0, row) = self.cell_of(left, anchor.y);
        for (i, ch) in content.chars().enumerate() {
            if let Some(cell) = Self::cell_mut(grid, col0 + i as i64, row) {
                cell.ch = ch;
                cell.fg = blend(cell.bg, tint.rgb(), tint.a);
            }
        }
    }

    /// Bresenham over cells, with a glyph picked from the overall slope.
    fn paint_line(&self, grid: &mut Grid, start: Point, end: Point, color: Rgba) {
        if color.a == 0 {
            return;
        }
        let (x0, y0) = self.cell_of(start.x, start.y);
        let (x1, y1) = self.cell_of(end.x, end.y);
        let ch = line_glyph(x1 - x0, y1 - y0);

        let max = (
            self.contract.width as i64 - 1,
            self.contract.height as i64 - 1,
        );
        let Some(((mut x, mut y), (x1, y1))) = clip_segment((x0, y0), (x1, y1), max) else {
            return;
        };

        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = (x1 - x).signum();
        let sy = (y1 - y).signum();
        let mut err = dx + dy;

        loop {
            if let Some(cell) = Self::cell_mut(grid, x, y) {
                cell.ch = ch;
                cell.fg = blend(cell.bg, color.rgb(), color.a);
            }
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

/// Clip a cell-space segment to `(0, 0)..=max` (Liang-Barsky).
fn clip_segment(
    from: (i64, i64),
    to: (i64, i64),
    max: (i64, i64),
) -> Option<((i64, i64), (i64, i64))> {
    if max.0 < 0 || max.1 < 0 {
        return None;
    }
    let (x0, y0) = (from.0 as f64, from.1 as f64);
    let (dx, dy) = ((to.0 - from.0) as f64, (to.1 - from.1) as f64);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

    let edges = [
        (-dx, x0),
        (dx, max.0 as f64 - x0),
        (-dy, y0),
        (dy, max.1 as f64 - y0),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f64| {
        (
            ((x0 + t * dx).round() as i64).clamp(0, max.0),
            ((y0 + t * dy).round() as i64).clamp(0, max.1),
        )
    };
    Some((at(t0), at(t1)))
}

fn line_glyph(dx: i64, dy: i64) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ax == 0 && ay == 0 {
        '·'
    } else if ax > 2 * ay {
        '─'
    } else if ay > 2 * ax {
        '│'
    } else if dx.signum() == dy.signum() {
        '╲'
    } else {
        '╱'
    }
}

/// Alpha-composite `over` onto `under`.
fn blend(under: Rgb, over: Rgb, alpha: u8) -> Rgb {
    let a = alpha as u16;
    let mix = |u: u8, o: u8| ((o as u16 * a + u as u16 * (255 - a) + 127) / 255) as u8;
    Rgb {
        r: mix(under.r, over.r),
        g: mix(under.g, over.g),
        b: mix(under.b, over.b),
    }
}

/// Multiply a texture's base color by a tint.
fn modulate(base: Rgb, tint: Rgba) -> Rgb {
    let mul = |b: u8, t: u8| ((b as u16 * t as u16 + 127) / 255) as u8;
    Rgb {
        r: mul(base.r, tint.r),
        g: mul(base.g, tint.g),
        b: mul(base.b, tint.b),
    }
}
