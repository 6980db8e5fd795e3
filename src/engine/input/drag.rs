// Drag-and-drop gesture tracking

use crate::core::math::Rect;
use glam::Vec2;

/// Where a drag may start, and what it carries
#[derive(Debug, Clone, PartialEq)]
pub struct DragSource {
    pub rect: Rect,
    pub payload: String,
}

/// Hit areas for the current frame
///
/// Rebuilt by the game every frame; a zone set to `None` is inert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropZones {
    pub source: Option<DragSource>,
    pub target: Option<Rect>,
}

/// Outcome of a completed gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Released over the drop target, carrying the payload
    Dropped(String),
    /// Released anywhere else
    Cancelled,
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    payload: String,
    position: Vec2,
}

/// Tracks one drag at a time
#[derive(Debug, Default)]
pub struct DragTracker {
    active: Option<ActiveDrag>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Button pressed; starts a drag if the cursor is over the source.
    /// Returns the payload picked up.
    pub fn press(&mut self, cursor: Vec2, zones: &DropZones) -> Option<&str> {
        if self.active.is_some() {
            return None;
        }
        let source = zones.source.as_ref().filter(|s| s.rect.contains(cursor))?;
        self.active = Some(ActiveDrag {
            payload: source.payload.clone(),
            position: cursor,
        });
        self.payload()
    }

    pub fn motion(&mut self, cursor: Vec2) {
        if let Some(drag) = &mut self.active {
            drag.position = cursor;
        }
    }

    /// Button released; ends the drag, if any
    pub fn release(&mut self, cursor: Vec2, zones: &DropZones) -> Option<DragOutcome> {
        let drag = self.active.take()?;
        match zones.target {
            Some(target) if target.contains(cursor) => Some(DragOutcome::Dropped(drag.payload)),
            _ => Some(DragOutcome::Cancelled),
        }
    }

    /// Abandon a drag without producing an outcome
    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn payload(&self) -> Option<&str> {
        self.active.as_ref().map(|d| d.payload.as_str())
    }

    /// Where the dragged preview should be centered
    pub fn position(&self) -> Option<Vec2> {
        self.active.as_ref().map(|d| d.position)
    }
}
