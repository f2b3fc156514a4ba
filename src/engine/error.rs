//! Errors raised while building a scene.
//!
//! Scenes are assembled once by trusted authoring code, so every variant here
//! is a misuse of the construction API rather than a runtime condition.

use thiserror::Error;

use super::events::Field;
use super::objects::{ObjectId, PointField};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("{object} is a {kind} and has no {field:?} point")]
    FieldMismatch {
        object: ObjectId,
        kind: &'static str,
        field: PointField,
    },

    #[error("cannot colocate onto line {object}: lines have no single position")]
    ColocateOntoLine { object: ObjectId },

    #[error(
        "{kind} on {object} writes {field} during frames {new_window:?}, \
         overlapping an existing writer during frames {existing_window:?}"
    )]
    ConflictingWriters {
        kind: &'static str,
        object: ObjectId,
        field: Field,
        existing_window: (usize, usize),
        new_window: (usize, usize),
    },

    #[error("event window starting at frame {begin} with length {length} runs past the last frame")]
    WindowOverflow { begin: usize, length: usize },

    #[error("scene is finalized; objects and events can no longer be added")]
    Finalized,

    #[error("unknown object: {name}")]
    UnknownObject { name: String },

    #[error("duplicate object name: {name}")]
    DuplicateName { name: String },

    #[error("unknown texture: {name}")]
    UnknownTexture { name: String },

    #[error("unknown font: {name}")]
    UnknownFont { name: String },
}
