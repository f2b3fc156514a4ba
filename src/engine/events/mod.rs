//! Timeline events and the per-frame tick.
//!
//! Every event owns a frame window `[begin, begin + length]`. The first frame
//! of the window is the activation frame, where the event snapshots whatever
//! it needs from the objects it targets; every later frame in the window
//! applies the event's interpolation law. Outside the window the event does
//! nothing.
//!
//! Events never hold references into object storage. They name objects by
//! `ObjectId` and re-resolve the field they touch each time they run.

mod colocate;
mod fade;
pub mod interp;
mod movement;

pub use colocate::Colocate;
pub use fade::ColorFade;
pub use movement::Move;

use std::fmt;

use super::objects::{ObjectId, PointField, SceneObject};
use super::store::Store;

/// The two phases of an interpolation law.
pub trait Tick {
    /// Capture start state at the activation frame.
    fn activate(&mut self, objects: &mut Store<SceneObject>);
    /// Apply the law at `completion` in `(0, 1]`.
    fn advance(&mut self, completion: f32, objects: &mut Store<SceneObject>);
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEvent {
    pub begin: usize,
    /// Duration in frames; zero means the event applies entirely at `begin`.
    pub length: usize,
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    ColorFade(ColorFade),
    Move(Move),
    Colocate(Colocate),
}

/// A mutable attribute of an object, as far as write conflicts are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Color,
    Point(PointField),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Color => f.write_str("color"),
            Field::Point(p) => write!(f, "{p:?}"),
        }
    }
}

impl TimelineEvent {
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            EventKind::ColorFade(_) => "fade",
            EventKind::Move(_) => "move",
            EventKind::Colocate(_) => "colocate",
        }
    }

    /// Last frame of the window (inclusive).
    pub fn end(&self) -> usize {
        self.begin.saturating_add(self.length)
    }

    /// Frames the scene must play for this event to be reached.
    pub fn frames_needed(&self) -> usize {
        match self.kind {
            EventKind::Colocate(_) => self.begin.saturating_add(1),
            _ => self.end(),
        }
    }

    /// The object attribute this event writes.
    pub fn written(&self) -> (ObjectId, Field) {
        match &self.kind {
            EventKind::ColorFade(e) => (e.target, Field::Color),
            EventKind::Move(e) => (e.target, Field::Point(e.field)),
            EventKind::Colocate(e) => (e.destination, Field::Point(e.field)),
        }
    }

    /// Inclusive range of frames on which this event writes its field.
    ///
    /// The activation frame of a non-empty window only reads, so it is not
    /// part of the range.
    pub fn write_window(&self) -> (usize, usize) {
        if self.length == 0 {
            (self.begin, self.begin)
        } else {
            (self.begin.saturating_add(1), self.end())
        }
    }

    /// The frame on which a non-empty window snapshots its field.
    pub fn snapshot_frame(&self) -> Option<usize> {
        (self.length > 0).then_some(self.begin)
    }

    /// Whether `self` snapshots the field on a frame where `writer` also
    /// writes it. Both begin on that frame, so evaluation order alone would
    /// decide whether the write survives.
    pub fn snapshots_under(&self, writer: &TimelineEvent) -> bool {
        writer.length == 0 && self.snapshot_frame() == Some(writer.begin)
    }

    /// Forget the state captured at the last activation.
    pub fn reset(&mut self) {
        match &mut self.kind {
            EventKind::ColorFade(e) => e.from = None,
            EventKind::Move(e) => e.path = None,
            EventKind::Colocate(_) => {}
        }
    }

    pub fn tick(&mut self, t: usize, objects: &mut Store<SceneObject>) {
        if t < self.begin || t > self.end() {
            return;
        }

        let law: &mut dyn Tick = match &mut self.kind {
            EventKind::ColorFade(e) => e,
            EventKind::Move(e) => e,
            EventKind::Colocate(e) => e,
        };

        if t == self.begin {
            law.activate(objects);
            if self.length == 0 {
                law.advance(1.0, objects);
            }
            return;
        }

        law.advance(interp::completion(t - self.begin, self.length), objects);
    }
}
