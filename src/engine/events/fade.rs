use crate::engine::objects::{ObjectId, SceneObject};
use crate::engine::store::Store;
use crate::types::Rgba;

use super::Tick;
use super::interp::lerp_color;

/// Linear per-channel fade of an object's color.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorFade {
    pub target: ObjectId,
    pub to: Rgba,
    /// Color observed at the last activation.
    pub from: Option<Rgba>,
}

impl ColorFade {
    pub fn new(target: ObjectId, to: Rgba) -> Self {
        ColorFade {
            target,
            to,
            from: None,
        }
    }
}

impl Tick for ColorFade {
    fn activate(&mut self, objects: &mut Store<SceneObject>) {
        self.from = Some(objects.get(self.target).color);
    }

    fn advance(&mut self, completion: f32, objects: &mut Store<SceneObject>) {
        // Not activated during this pass (playback started mid-window).
        let Some(from) = self.from else { return };
        objects.get_mut(self.target).color = lerp_color(from, self.to, completion);
    }
}
