use crate::engine::objects::{ObjectId, PointField, SceneObject};
use crate::engine::store::Store;
use crate::types::Point;

use super::Tick;

/// One-shot: put `destination`'s anchor on `source`'s anchor plus `offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct Colocate {
    pub source: ObjectId,
    pub destination: ObjectId,
    pub offset: Point,
    /// The destination's position field, fixed when the event is created.
    pub field: PointField,
}

impl Tick for Colocate {
    fn activate(&mut self, objects: &mut Store<SceneObject>) {
        let point = objects.get(self.source).anchor() + self.offset;
        if !objects.get_mut(self.destination).place_at(point) {
            panic!("colocate onto {}, which has no single position", self.destination);
        }
    }

    fn advance(&mut self, _completion: f32, _objects: &mut Store<SceneObject>) {}
}
