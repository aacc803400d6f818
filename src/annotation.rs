//! Per-image annotation storage.
//!
//! Two independent [`AnnotationSet`]s exist, one per image slot. They are
//! never merged, and clearing only ever touches the active slot.

use dualview_ui::{Color, Point};

use crate::model::{Shape, ShapeKind, Slot};

/// Ordered shapes for one image slot. Insertion order is draw order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationSet {
    shapes: Vec<Shape>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    fn clear(&mut self) -> usize {
        let removed = self.shapes.len();
        self.shapes.clear();
        removed
    }
}

/// A shape being drawn; not part of any set until committed.
#[derive(Debug, Clone)]
struct DrawingSession {
    slot: Slot,
    shape: Shape,
}

/// Storage for both slots' annotations plus the in-progress shape.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    sets: [AnnotationSet; 2],
    active: Slot,
    drawing: Option<DrawingSession>,
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self {
            sets: [AnnotationSet::new(), AnnotationSet::new()],
            active: Slot::One,
            drawing: None,
        }
    }

    /// Make `slot` the target of drawing and clear commands.
    ///
    /// Shapes are neither cleared nor copied. An in-progress shape belonging
    /// to the other slot is discarded.
    pub fn select(&mut self, slot: Slot) {
        if self.active == slot {
            return;
        }
        if self.drawing.as_ref().is_some_and(|d| d.slot != slot) {
            log::debug!("Discarding in-progress shape on {} (slot switched)", self.active);
            self.drawing = None;
        }
        self.active = slot;
    }

    pub fn active_slot(&self) -> Slot {
        self.active
    }

    pub fn set(&self, slot: Slot) -> &AnnotationSet {
        &self.sets[slot.index()]
    }

    pub fn active_set(&self) -> &AnnotationSet {
        self.set(self.active)
    }

    /// Open a new shape for the active slot.
    pub fn begin_shape(&mut self, kind: ShapeKind, start: Point, color: Color) {
        if self.drawing.is_some() {
            log::debug!("Replacing unfinished shape with a new one");
        }
        self.drawing = Some(DrawingSession {
            slot: self.active,
            shape: Shape::begin(kind, start, color),
        });
    }

    /// Grow the in-progress shape. Returns false when nothing is being drawn.
    pub fn extend_shape(&mut self, point: Point) -> bool {
        match &mut self.drawing {
            Some(session) => {
                session.shape.extend(point);
                true
            }
            None => false,
        }
    }

    /// Append the in-progress shape to the active slot's set.
    ///
    /// Returns the slot that received it.
    pub fn commit_shape(&mut self) -> Option<Slot> {
        let session = self.drawing.take()?;
        let slot = self.active;
        log::debug!(
            "Committed {:?} to {} ({} shapes)",
            session.shape.kind(),
            slot,
            self.sets[slot.index()].len() + 1
        );
        self.sets[slot.index()].push(session.shape);
        Some(slot)
    }

    /// Drop the in-progress shape. Returns the slot it was drawn for.
    pub fn discard_shape(&mut self) -> Option<Slot> {
        self.drawing.take().map(|session| session.slot)
    }

    /// Empty the active slot's set. The other slot is untouched.
    ///
    /// Returns the number of shapes removed.
    pub fn clear_active(&mut self) -> usize {
        self.sets[self.active.index()].clear()
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing.is_some()
    }

    pub fn in_progress(&self) -> Option<&Shape> {
        self.drawing.as_ref().map(|d| &d.shape)
    }

    /// The in-progress shape, if it is being drawn for `slot`.
    pub fn in_progress_for(&self, slot: Slot) -> Option<&Shape> {
        self.drawing
            .as_ref()
            .filter(|d| d.slot == slot)
            .map(|d| &d.shape)
    }
}
