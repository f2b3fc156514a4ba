//! Scene object types and their resolve implementations.
//!
//! Each object variant lives in its own module with its struct definition and
//! `Resolve` implementation side by side. The attributes every variant shares
//! (depth and color) live on `SceneObject`.

mod image;
mod line;
mod text;

pub use image::Image;
pub use line::Line;
pub use text::Text;

use serde::{Deserialize, Serialize};

use crate::types::{DrawOp, Point, Rgba};

use super::store::Id;

pub type ObjectId = Id<SceneObject>;

/// Emit the draw instructions for one object in its current state.
pub trait Resolve {
    fn resolve(&self, color: Rgba, ops: &mut Vec<DrawOp>);
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Draw order; lower depths are drawn first.
    pub depth: i32,
    /// Tint for images and text, stroke color for lines.
    pub color: Rgba,
    pub kind: ObjectKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    Image(Image),
    Text(Text),
    Line(Line),
}

/// A coordinate pair inside an object that a move can animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointField {
    /// Top-left corner of an image's bounding box.
    Origin,
    /// Anchor point of a text object.
    Anchor,
    /// First endpoint of a line.
    Start,
    /// Second endpoint of a line.
    End,
}

impl SceneObject {
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            ObjectKind::Image(_) => "image",
            ObjectKind::Text(_) => "text",
            ObjectKind::Line(_) => "line",
        }
    }

    /// The point other objects are colocated onto.
    pub fn anchor(&self) -> Point {
        match &self.kind {
            ObjectKind::Image(o) => o.anchor(),
            ObjectKind::Text(o) => o.anchor,
            ObjectKind::Line(o) => o.midpoint(),
        }
    }

    /// The field a colocate writes when this object is the destination.
    /// Lines have no single position and cannot be colocated onto.
    pub fn position_field(&self) -> Option<PointField> {
        match &self.kind {
            ObjectKind::Image(_) => Some(PointField::Origin),
            ObjectKind::Text(_) => Some(PointField::Anchor),
            ObjectKind::Line(_) => None,
        }
    }

    /// Move the object so that its anchor lands on `point`.
    ///
    /// Returns `false` for lines, which have no single position.
    pub fn place_at(&mut self, point: Point) -> bool {
        match &mut self.kind {
            ObjectKind::Image(o) => {
                o.center_on(point);
                true
            }
            ObjectKind::Text(o) => {
                o.anchor = point;
                true
            }
            ObjectKind::Line(_) => false,
        }
    }

    pub fn has_field(&self, field: PointField) -> bool {
        self.point(field).is_some()
    }

    pub fn point(&self, field: PointField) -> Option<Point> {
        match (&self.kind, field) {
            (ObjectKind::Image(o), PointField::Origin) => Some(o.bounds.origin()),
            (ObjectKind::Text(o), PointField::Anchor) => Some(o.anchor),
            (ObjectKind::Line(o), PointField::Start) => Some(o.start),
            (ObjectKind::Line(o), PointField::End) => Some(o.end),
            _ => None,
        }
    }

    pub fn set_point(&mut self, field: PointField, value: Point) -> bool {
        match (&mut self.kind, field) {
            (ObjectKind::Image(o), PointField::Origin) => {
                o.bounds.x = value.x;
                o.bounds.y = value.y;
            }
            (ObjectKind::Text(o), PointField::Anchor) => o.anchor = value,
            (ObjectKind::Line(o), PointField::Start) => o.start = value,
            (ObjectKind::Line(o), PointField::End) => o.end = value,
            _ => return false,
        }
        true
    }

    /// Emit this object's draw instructions with its current color.
    pub fn resolve(&self, ops: &mut Vec<DrawOp>) {
        match &self.kind {
            ObjectKind::Image(o) => o.resolve(self.color, ops),
            ObjectKind::Text(o) => o.resolve(self.color, ops),
            ObjectKind::Line(o) => o.resolve(self.color, ops),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Bounds, FontId, TextAlign, TextureId};

    fn image(x: i32, y: i32, w: i32, h: i32) -> SceneObject {
        SceneObject {
            depth: 0,
            color: Rgba::WHITE,
            kind: ObjectKind::Image(Image {
                texture: TextureId(0),
                bounds: Bounds {
                    x,
                    y,
                    width: w,
                    height: h,
                },
            }),
        }
    }

    fn line(start: Point, end: Point) -> SceneObject {
        SceneObject {
            depth: 0,
            color: Rgba::WHITE,
            kind: ObjectKind::Line(Line { start, end }),
        }
    }

    #[test]
    fn anchor_per_variant() {
        assert_eq!(image(10, 20, 64, 32).anchor(), Point::new(42, 36));
        assert_eq!(
            line(Point::new(0, 0), Point::new(11, -5)).anchor(),
            Point::new(5, -2)
        );

        let text = SceneObject {
            depth: 0,
            color: Rgba::WHITE,
            kind: ObjectKind::Text(Text {
                font: FontId(0),
                content: "A".into(),
                anchor: Point::new(7, 8),
                align: TextAlign::Left,
            }),
        };
        assert_eq!(text.anchor(), Point::new(7, 8));
    }

    #[test]
    fn place_at_recenters_images_and_rejects_lines() {
        let mut img = image(0, 0, 64, 32);
        assert!(img.place_at(Point::new(100, 100)));
        assert_eq!(img.point(PointField::Origin), Some(Point::new(68, 84)));
        assert_eq!(img.anchor(), Point::new(100, 100));

        let mut l = line(Point::new(0, 0), Point::new(2, 2));
        assert!(!l.place_at(Point::new(5, 5)));
        assert_eq!(l.position_field(), None);
    }

    #[test]
    fn fields_belong_to_their_variant() {
        let mut img = image(0, 0, 4, 4);
        assert!(img.has_field(PointField::Origin));
        assert!(!img.has_field(PointField::End));
        assert!(!img.set_point(PointField::Anchor, Point::new(1, 1)));

        let mut l = line(Point::new(0, 0), Point::new(2, 2));
        assert!(l.set_point(PointField::End, Point::new(9, 9)));
        assert_eq!(l.point(PointField::End), Some(Point::new(9, 9)));
        assert_eq!(l.point(PointField::Start), Some(Point::new(0, 0)));
    }
}
