use crate::engine::objects::{ObjectId, PointField, SceneObject};
use crate::engine::store::Store;
use crate::types::Point;

use super::Tick;
use super::interp::{lerp_point, smoothstep};

/// Smoothstep-eased move of one coordinate pair of an object.
#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    pub target: ObjectId,
    pub field: PointField,
    /// Absolute destination, or an offset from the activation position when
    /// `relative` is set.
    pub to: Point,
    pub relative: bool,
    /// Start and absolute destination resolved at the last activation.
    pub path: Option<(Point, Point)>,
}

impl Move {
    pub fn new(target: ObjectId, field: PointField, to: Point, relative: bool) -> Self {
        Move {
            target,
            field,
            to,
            relative,
            path: None,
        }
    }

    /// The destination resolved at the last activation.
    pub fn resolved_target(&self) -> Option<Point> {
        self.path.map(|(_, to)| to)
    }
}

impl Tick for Move {
    fn activate(&mut self, objects: &mut Store<SceneObject>) {
        let Some(start) = objects.get(self.target).point(self.field) else {
            panic!("move of {:?} on {}, which has no such field", self.field, self.target);
        };
        let to = if self.relative { start + self.to } else { self.to };
        self.path = Some((start, to));
    }

    fn advance(&mut self, completion: f32, objects: &mut Store<SceneObject>) {
        let Some((start, to)) = self.path else { return };
        let value = lerp_point(start, to, smoothstep(completion));
        objects.get_mut(self.target).set_point(self.field, value);
    }
}
