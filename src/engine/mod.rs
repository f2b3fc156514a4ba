//! Engine — the scene/timeline evaluator.
//!
//! Holds the object graph and the timeline of events that animate it, and
//! turns the state at a frame index into a `ResolvedFrame` of draw
//! instructions.
//!
//! The engine understands time, animation and draw order. It never deals
//! with terminals, cells or encoders.

pub mod error;
pub mod events;
pub mod objects;
pub mod scene;
pub mod source;
pub mod store;

pub use error::SceneError;
pub use objects::{ObjectId, PointField};
pub use scene::Scene;
