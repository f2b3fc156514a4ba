use crate::types::{Bounds, DrawOp, Point, Rgba, TextureId};

use super::Resolve;

/// A backend texture drawn into a mutable bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub texture: TextureId,
    pub bounds: Bounds,
}

impl Image {
    /// Center of the bounding box.
    pub fn anchor(&self) -> Point {
        self.bounds.center()
    }

    /// Keep the size, move the box so its center is `point`.
    pub fn center_on(&mut self, point: Point) {
        self.bounds = Bounds::centered_on(point, self.bounds.width, self.bounds.height);
    }
}

impl Resolve for Image {
    fn resolve(&self, color: Rgba, ops: &mut Vec<DrawOp>) {
        ops.push(DrawOp::Texture {
            texture: self.texture,
            dest: self.bounds,
            tint: color,
        });
    }
}
