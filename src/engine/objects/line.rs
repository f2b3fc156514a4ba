use crate::types::{DrawOp, Point, Rgba};

use super::Resolve;

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2,
            (self.start.y + self.end.y) / 2,
        )
    }
}

impl Resolve for Line {
    fn resolve(&self, color: Rgba, ops: &mut Vec<DrawOp>) {
        ops.push(DrawOp::Line {
            start: self.start,
            end: self.end,
            color,
        });
    }
}
