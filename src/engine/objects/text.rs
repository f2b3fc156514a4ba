use crate::types::{DrawOp, FontId, Point, Rgba, TextAlign};

use super::Resolve;

/// A single line of text. The content is fixed at creation; only the anchor
/// and color change during playback.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub font: FontId,
    pub content: String,
    /// Vertical center of the text; horizontal meaning depends on `align`.
    pub anchor: Point,
    pub align: TextAlign,
}

impl Resolve for Text {
    fn resolve(&self, color: Rgba, ops: &mut Vec<DrawOp>) {
        ops.push(DrawOp::Text {
            font: self.font,
            content: self.content.clone(),
            anchor: self.anchor,
            align: self.align,
            tint: color,
        });
    }
}
