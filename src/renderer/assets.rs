//! Asset registry — the textures and fonts a scene draws with.
//!
//! The registry owns the definitions; scenes only ever see the copyable
//! `Texture`/`Font` handles it hands out.

use serde::{Deserialize, Serialize};

use crate::types::{Font, FontId, Rgb, Texture, TextureId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    #[default]
    Rect,
    /// Only the ellipse inscribed in the bounding box is painted.
    Ellipse,
}

fn default_texture_color() -> Rgb {
    Rgb::WHITE
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureDef {
    pub name: String,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub shape: Shape,
    /// Base color; multiplied by the drawing object's tint.
    #[serde(default = "default_texture_color")]
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontDef {
    pub name: String,
    pub size: i32,
}

#[derive(Debug, Clone, Default)]
pub struct Assets {
    textures: Vec<TextureDef>,
    fonts: Vec<FontDef>,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_texture(&mut self, def: TextureDef) -> Texture {
        let handle = Texture {
            id: TextureId(self.textures.len()),
            width: def.width,
            height: def.height,
        };
        self.textures.push(def);
        handle
    }

    pub fn add_font(&mut self, def: FontDef) -> Font {
        let handle = Font {
            id: FontId(self.fonts.len()),
            size: def.size,
        };
        self.fonts.push(def);
        handle
    }

    pub fn texture(&self, id: TextureId) -> Option<&TextureDef> {
        self.textures.get(id.0)
    }

    pub fn font(&self, id: FontId) -> Option<&FontDef> {
        self.fonts.get(id.0)
    }

    pub fn texture_named(&self, name: &str) -> Option<Texture> {
        let index = self.textures.iter().position(|t| t.name == name)?;
        let def = &self.textures[index];
        Some(Texture {
            id: TextureId(index),
            width: def.width,
            height: def.height,
        })
    }

    pub fn font_named(&self, name: &str) -> Option<Font> {
        let index = self.fonts.iter().position(|f| f.name == name)?;
        Some(Font {
            id: FontId(index),
            size: self.fonts[index].size,
        })
    }
}
