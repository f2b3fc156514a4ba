//! The scene: objects, the timeline that animates them, and playback state.

use log::debug;

use crate::types::{Bounds, DrawOp, Font, Point, ResolvedFrame, Rgba, TextAlign, Texture};

use super::error::SceneError;
use super::events::{Colocate, ColorFade, EventKind, Move, TimelineEvent};
use super::objects::{Image, Line, ObjectId, ObjectKind, PointField, SceneObject, Text};
use super::store::Store;

pub struct Scene {
    pub width: i32,
    pub height: i32,
    pub background: Rgba,
    objects: Store<SceneObject>,
    events: Vec<TimelineEvent>,
    draw_order: Vec<ObjectId>,
    length_in_frames: usize,
    /// Object state captured by `finalize`, restored by `rewind`.
    pristine: Option<Vec<SceneObject>>,
}

impl Scene {
    pub fn new(width: i32, height: i32, background: Rgba) -> Self {
        Scene {
            width,
            height,
            background,
            objects: Store::new(),
            events: Vec::new(),
            draw_order: Vec::new(),
            length_in_frames: 0,
            pristine: None,
        }
    }

    pub fn length_in_frames(&self) -> usize {
        self.length_in_frames
    }

    /// Play at least `frames` frames, e.g. to hold the final state on screen.
    pub fn extend_to(&mut self, frames: usize) {
        self.length_in_frames = self.length_in_frames.max(frames);
    }

    pub fn object(&self, id: ObjectId) -> &SceneObject {
        self.objects.get(id)
    }

    pub fn objects(&self) -> &Store<SceneObject> {
        &self.objects
    }

    /// Events in evaluation order (sorted by begin frame once finalized).
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Object ids in draw order (sorted by depth once finalized).
    pub fn draw_order(&self) -> &[ObjectId] {
        &self.draw_order
    }

    pub fn is_finalized(&self) -> bool {
        self.pristine.is_some()
    }

    // -----------------------------------------------------------------------
    // Objects
    // -----------------------------------------------------------------------

    /// Add an image of the texture's size centered on `center`.
    pub fn add_image(
        &mut self,
        texture: &Texture,
        tint: Rgba,
        center: Point,
        depth: i32,
    ) -> Result<ObjectId, SceneError> {
        let image = Image {
            texture: texture.id,
            bounds: Bounds::centered_on(center, texture.width, texture.height),
        };

        self.push_object(SceneObject {
            depth,
            color: tint,
            kind: ObjectKind::Image(image),
        })
    }

    pub fn add_text(
        &mut self,
        font: &Font,
        content: impl Into<String>,
        color: Rgba,
        anchor: Point,
        align: TextAlign,
        depth: i32,
    ) -> Result<ObjectId, SceneError> {
        self.push_object(SceneObject {
            depth,
            color,
            kind: ObjectKind::Text(Text {
                font: font.id,
                content: content.into(),
                anchor,
                align,
            }),
        })
    }

    pub fn add_line(
        &mut self,
        color: Rgba,
        start: Point,
        end: Point,
        depth: i32,
    ) -> Result<ObjectId, SceneError> {
        self.push_object(SceneObject {
            depth,
            color,
            kind: ObjectKind::Line(Line { start, end }),
        })
    }

    fn push_object(&mut self, object: SceneObject) -> Result<ObjectId, SceneError> {
        self.ensure_open()?;
        let id = self.objects.push(object);
        self.draw_order.push(id);
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    pub fn add_fade(
        &mut self,
        target: ObjectId,
        to: Rgba,
        begin: usize,
        length: usize,
    ) -> Result<(), SceneError> {
        self.push_event(TimelineEvent {
            begin,
            length,
            kind: EventKind::ColorFade(ColorFade::new(target, to)),
        })
    }

    /// Move one point of `target` to `to`, or by `to` when `relative`.
    pub fn add_move(
        &mut self,
        target: ObjectId,
        field: PointField,
        to: Point,
        relative: bool,
        begin: usize,
        length: usize,
    ) -> Result<(), SceneError> {
        let object = self.objects.get(target);
        if !object.has_field(field) {
            return Err(SceneError::FieldMismatch {
                object: target,
                kind: object.kind_name(),
                field,
            });
        }
        self.push_event(TimelineEvent {
            begin,
            length,
            kind: EventKind::Move(Move::new(target, field, to, relative)),
        })
    }

    /// At frame `begin`, put `destination` on `source`'s anchor plus `offset`.
    pub fn add_colocate(
        &mut self,
        source: ObjectId,
        destination: ObjectId,
        offset: Point,
        begin: usize,
    ) -> Result<(), SceneError> {
        let Some(field) = self.objects.get(destination).position_field() else {
            return Err(SceneError::ColocateOntoLine {
                object: destination,
            });
        };
        self.push_event(TimelineEvent {
            begin,
            length: 0,
            kind: EventKind::Colocate(Colocate {
                source,
                destination,
                offset,
                field,
            }),
        })
    }

    fn push_event(&mut self, event: TimelineEvent) -> Result<(), SceneError> {
        self.ensure_open()?;

        let reach = match event.kind {
            EventKind::Colocate(_) => 1,
            _ => event.length,
        };
        if event.begin.checked_add(reach).is_none() {
            return Err(SceneError::WindowOverflow {
                begin: event.begin,
                length: event.length,
            });
        }

        let written = event.written();
        let (lo, hi) = event.write_window();
        if let Some(existing) = self.events.iter().find(|e| {
            let (elo, ehi) = e.write_window();
            e.written() == written
                && (lo.max(elo) <= hi.min(ehi)
                    || e.snapshots_under(&event)
                    || event.snapshots_under(e))
        }) {
            return Err(SceneError::ConflictingWriters {
                kind: event.kind_name(),
                object: written.0,
                field: written.1,
                existing_window: existing.write_window(),
                new_window: (lo, hi),
            });
        }

        self.extend_to(event.frames_needed());
        self.events.push(event);
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), SceneError> {
        if self.is_finalized() {
            return Err(SceneError::Finalized);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Convenience constructors
    // -----------------------------------------------------------------------

    /// An image that starts fully transparent and fades in to opaque white.
    pub fn fade_in_image(
        &mut self,
        texture: &Texture,
        center: Point,
        depth: i32,
        begin: usize,
        length: usize,
    ) -> Result<ObjectId, SceneError> {
        let id = self.add_image(texture, Rgba::TRANSPARENT, center, depth)?;
        self.add_fade(id, Rgba::WHITE, begin, length)?;
        Ok(id)
    }

    /// Text that starts fully transparent and fades in to `color`.
    #[allow(clippy::too_many_arguments)]
    pub fn fade_in_text(
        &mut self,
        font: &Font,
        content: impl Into<String>,
        color: Rgba,
        anchor: Point,
        align: TextAlign,
        depth: i32,
        begin: usize,
        length: usize,
    ) -> Result<ObjectId, SceneError> {
        let hidden = Rgba { a: 0, ..color };
        let id = self.add_text(font, content, hidden, anchor, align, depth)?;
        self.add_fade(id, color, begin, length)?;
        Ok(id)
    }

    /// A line that grows from `start` to `end` over `length` frames.
    pub fn draw_line(
        &mut self,
        color: Rgba,
        start: Point,
        end: Point,
        depth: i32,
        begin: usize,
        length: usize,
    ) -> Result<ObjectId, SceneError> {
        let id = self.add_line(Rgba::TRANSPARENT, start, start, depth)?;
        self.add_fade(id, color, begin, 2)?;
        self.add_move(id, PointField::End, end, false, begin, length)?;
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Playback
    // -----------------------------------------------------------------------

    /// Fix draw and evaluation order. Safe to call more than once.
    ///
    /// Objects are ordered by depth and events by begin frame; both sorts are
    /// stable, so ties keep insertion order.
    pub fn finalize(&mut self) {
        let objects = &self.objects;
        self.draw_order.sort_by_key(|&id| objects.get(id).depth);
        self.events.sort_by_key(|e| e.begin);

        if self.pristine.is_none() {
            self.pristine = Some(self.objects.as_slice().to_vec());
            debug!(
                "finalized scene: {} objects, {} events, {} frames",
                self.objects.len(),
                self.events.len(),
                self.length_in_frames,
            );
        }
    }

    /// Evaluate every event against frame `t`.
    pub fn tick(&mut self, t: usize) {
        let Scene {
            events, objects, ..
        } = self;
        for event in events.iter_mut() {
            event.tick(t, objects);
        }
    }

    /// Restore the object state captured at finalize.
    pub fn rewind(&mut self) {
        if let Some(pristine) = &self.pristine {
            self.objects.replace_all(pristine.clone());
        }
        for event in &mut self.events {
            event.reset();
        }
    }

    /// Rewind, then replay every frame up to and including `t`.
    pub fn seek(&mut self, t: usize) {
        self.rewind();
        for frame in 0..=t {
            self.tick(frame);
        }
    }

    /// The draw list for the current object state, back to front.
    pub fn resolve(&self, t: usize) -> ResolvedFrame {
        let mut ops: Vec<DrawOp> = Vec::with_capacity(self.draw_order.len());
        for &id in &self.draw_order {
            self.objects.get(id).resolve(&mut ops);
        }
        ResolvedFrame {
            index: t,
            background: self.background,
            ops,
        }
    }
}
