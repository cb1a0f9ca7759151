// ABOUTME: Pointer drag gesture state machine.
// ABOUTME: Turns absolute pointer positions into per-event relative deltas.

use pane_core::Point;

use crate::intersection::IntersectionId;
use crate::splitter::SplitterId;

/// What a gesture is dragging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragTarget {
    Splitter(SplitterId),
    Intersection(IntersectionId),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging { target: DragTarget, last: Point },
}

/// Movement since the previous pointer event
#[derive(Debug, Clone, PartialEq)]
pub struct DragStep {
    pub target: DragTarget,
    pub dx: f32,
    pub dy: f32,
}

/// Tracks one pointer from press to release.
///
/// Deltas are relative to the previous event, never to the press position,
/// so each move must be applied exactly once and in arrival order.
#[derive(Debug, Default)]
pub struct DragGesture {
    state: GestureState,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    pub fn target(&self) -> Option<&DragTarget> {
        match &self.state {
            GestureState::Dragging { target, .. } => Some(target),
            GestureState::Idle => None,
        }
    }

    /// Pointer pressed on `target`. Any previous gesture is discarded.
    pub fn begin(&mut self, target: DragTarget, at: Point) {
        self.state = GestureState::Dragging { target, last: at };
    }

    /// Pointer moved. Returns the step to apply, or None when idle or unmoved.
    pub fn update(&mut self, at: Point) -> Option<DragStep> {
        let GestureState::Dragging { target, last } = &mut self.state else {
            return None;
        };
        let dx = at.x - last.x;
        let dy = at.y - last.y;
        *last = at;
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        tracing::trace!("Drag step dx={} dy={}", dx, dy);
        Some(DragStep {
            target: target.clone(),
            dx,
            dy,
        })
    }

    /// Pointer released or capture lost. Returns what was being dragged.
    pub fn end(&mut self) -> Option<DragTarget> {
        match std::mem::take(&mut self.state) {
            GestureState::Dragging { target, .. } => Some(target),
            GestureState::Idle => None,
        }
    }
}
