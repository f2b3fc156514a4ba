//! Source scene types — the human-authored JSON format.
//!
//! These types define *what exists* and *how it changes*, not how it is
//! drawn. `SourceScene::build` registers the assets, creates the objects and
//! schedules the events through the regular `Scene` construction API, so
//! every invariant the API enforces applies to authored files too.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::renderer::assets::{Assets, FontDef, TextureDef};
use crate::types::{Font, Point, Rgba, TextAlign, Texture};

use super::error::SceneError;
use super::objects::{ObjectId, PointField};
use super::scene::Scene;

fn default_background() -> Rgba {
    Rgba::new(32, 32, 32, 255)
}

fn default_white() -> Rgba {
    Rgba::WHITE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceScene {
    pub width: i32,
    pub height: i32,
    #[serde(default = "default_background")]
    pub background: Rgba,
    /// Minimum playback length; events may extend it.
    #[serde(default)]
    pub length_in_frames: usize,
    #[serde(default)]
    pub assets: SourceAssets,
    pub objects: Vec<SourceObject>,
    #[serde(default)]
    pub events: Vec<SourceEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceAssets {
    #[serde(default)]
    pub textures: Vec<TextureDef>,
    #[serde(default)]
    pub fonts: Vec<FontDef>,
}

/// A frame window used by the convenience forms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Window {
    pub begin: usize,
    pub length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceObject {
    Image {
        name: String,
        texture: String,
        center: Point,
        #[serde(default = "default_white")]
        tint: Rgba,
        #[serde(default)]
        depth: i32,
        /// Start transparent and fade in to opaque white.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fade_in: Option<Window>,
    },
    Text {
        name: String,
        font: String,
        content: String,
        anchor: Point,
        #[serde(default)]
        align: TextAlign,
        #[serde(default = "default_white")]
        color: Rgba,
        #[serde(default)]
        depth: i32,
        /// Start transparent and fade in to `color`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fade_in: Option<Window>,
    },
    Line {
        name: String,
        start: Point,
        end: Point,
        #[serde(default = "default_white")]
        color: Rgba,
        #[serde(default)]
        depth: i32,
        /// Grow from `start` to `end` during the window.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        draw: Option<Window>,
    },
}

impl SourceObject {
    pub fn name(&self) -> &str {
        match self {
            SourceObject::Image { name, .. }
            | SourceObject::Text { name, .. }
            | SourceObject::Line { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceEvent {
    Fade {
        target: String,
        to: Rgba,
        begin: usize,
        length: usize,
    },
    Move {
        target: String,
        point: PointField,
        to: Point,
        #[serde(default)]
        relative: bool,
        begin: usize,
        length: usize,
    },
    Colocate {
        source: String,
        destination: String,
        #[serde(default)]
        offset: Point,
        begin: usize,
    },
}

impl SourceScene {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Build the playable scene and the assets it draws with.
    pub fn build(&self) -> Result<(Scene, Assets), SceneError> {
        let mut assets = Assets::new();
        for def in &self.assets.textures {
            assets.add_texture(def.clone());
        }
        for def in &self.assets.fonts {
            assets.add_font(def.clone());
        }

        let mut scene = Scene::new(self.width, self.height, self.background);
        scene.extend_to(self.length_in_frames);

        let mut names: HashMap<&str, ObjectId> = HashMap::new();
        for object in &self.objects {
            let id = add_object(&mut scene, &assets, object)?;
            if names.insert(object.name(), id).is_some() {
                return Err(SceneError::DuplicateName {
                    name: object.name().to_string(),
                });
            }
        }

        let lookup = |name: &str| {
            names
                .get(name)
                .copied()
                .ok_or_else(|| SceneError::UnknownObject {
                    name: name.to_string(),
                })
        };

        for event in &self.events {
            match event {
                SourceEvent::Fade {
                    target,
                    to,
                    begin,
                    length,
                } => scene.add_fade(lookup(target)?, *to, *begin, *length)?,
                SourceEvent::Move {
                    target,
                    point,
                    to,
                    relative,
                    begin,
                    length,
                } => scene.add_move(lookup(target)?, *point, *to, *relative, *begin, *length)?,
                SourceEvent::Colocate {
                    source,
                    destination,
                    offset,
                    begin,
                } => scene.add_colocate(lookup(source)?, lookup(destination)?, *offset, *begin)?,
            }
        }

        Ok((scene, assets))
    }
}

fn texture(assets: &Assets, name: &str) -> Result<Texture, SceneError> {
    assets
        .texture_named(name)
        .ok_or_else(|| SceneError::UnknownTexture {
            name: name.to_string(),
        })
}

fn font(assets: &Assets, name: &str) -> Result<Font, SceneError> {
    assets.font_named(name).ok_or_else(|| SceneError::UnknownFont {
        name: name.to_string(),
    })
}

fn add_object(
    scene: &mut Scene,
    assets: &Assets,
    object: &SourceObject,
) -> Result<ObjectId, SceneError> {
    match object {
        SourceObject::Image {
            texture: tex,
            center,
            tint,
            depth,
            fade_in,
            ..
        } => {
            let tex = texture(assets, tex)?;
            match fade_in {
                Some(w) => scene.fade_in_image(&tex, *center, *depth, w.begin, w.length),
                None => scene.add_image(&tex, *tint, *center, *depth),
            }
        }
        SourceObject::Text {
            font: f,
            content,
            anchor,
            align,
            color,
            depth,
            fade_in,
            ..
        } => {
            let f = font(assets, f)?;
            match fade_in {
                Some(w) => scene.fade_in_text(
                    &f,
                    content.as_str(),
                    *color,
                    *anchor,
                    *align,
                    *depth,
                    w.begin,
                    w.length,
                ),
                None => scene.add_text(&f, content.as_str(), *color, *anchor, *align, *depth),
            }
        }
        SourceObject::Line {
            start,
            end,
            color,
            depth,
            draw,
            ..
        } => match draw {
            Some(w) => scene.draw_line(*color, *start, *end, *depth, w.begin, w.length),
            None => scene.add_line(*color, *start, *end, *depth),
        },
    }
}
