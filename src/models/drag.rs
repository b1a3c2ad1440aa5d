// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drag tracking for text overlays.
//!
//! A drag is a three-step sequence (begin, any number of moves, end) and is
//! modelled as `Idle -> Dragging(session) -> Idle`. The session holds the
//! pointer and annotation positions captured at the start; every move is
//! computed from those, never from the previous move, so rounding does not
//! accumulate.

use super::annotation::{AnnotationId, Position};
use crate::util::geometry::{self, Extent};
use egui::{Pos2, Vec2};

/// Capability to measure an annotation's rendered box in canvas percent.
///
/// Returns `None` while the annotation has not been laid out yet or has a
/// zero size.
pub trait Measure {
    fn measure(&self, id: AnnotationId) -> Option<Extent>;
}

/// Data captured when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub annotation_id: AnnotationId,
    pub pointer_start: Pos2,
    pub start_position: Position,
}

impl DragSession {
    /// Position for the pointer at `pointer`, or `None` when it cannot be
    /// computed without producing a non-finite value.
    pub fn target_position(&self, pointer: Pos2, canvas: Vec2, extent: Option<Extent>) -> Option<Position> {
        let extent = extent?;
        let delta = pointer - self.pointer_start;
        let dx = geometry::pixels_to_percent(delta.x, canvas.x)?;
        let dy = geometry::pixels_to_percent(delta.y, canvas.y)?;

        let moved = Position::new(self.start_position.x + dx, self.start_position.y + dy);
        let clamped = geometry::clamp_to_frame(moved, extent);
        (clamped.x.is_finite() && clamped.y.is_finite()).then_some(clamped)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session),
        }
    }

    /// Start a new session, replacing any active one.
    pub fn begin(&mut self, annotation_id: AnnotationId, pointer_start: Pos2, start_position: Position) {
        *self = DragState::Dragging(DragSession {
            annotation_id,
            pointer_start,
            start_position,
        });
    }

    /// Return to idle, yielding the session that was active (if any).
    pub fn end(&mut self) -> Option<DragSession> {
        match std::mem::take(self) {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session),
        }
    }
}
