// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines a text overlay, its position in the canvas
//! percentage frame, and the factory that stamps out new overlays from the
//! configured defaults.

use crate::config::AnnotationDefaults;
use uuid::Uuid;

/// Opaque identifier of an annotation, unique within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnnotationId(Uuid);

impl AnnotationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AnnotationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-left corner of an annotation, in percent of the canvas (0.0 to 100.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A positioned, styled text overlay.
///
/// Annotations are values: every change produces a new record which the
/// collection swaps in by identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    id: AnnotationId,
    pub text: String,
    pub position: Position,
    /// Font size in viewport-width units (1.0 = 1% of the window width).
    pub font_size_vw: f32,
    /// `#rrggbb`
    pub color: String,
}

impl Annotation {
    pub fn id(&self) -> AnnotationId {
        self.id
    }

    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    pub fn with_position(&self, position: Position) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }

    pub fn with_font_size(&self, font_size_vw: f32) -> Self {
        Self {
            font_size_vw,
            ..self.clone()
        }
    }

    pub fn with_color(&self, color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            ..self.clone()
        }
    }
}

/// Creates annotations from configured defaults.
#[derive(Debug, Clone)]
pub struct AnnotationFactory {
    defaults: AnnotationDefaults,
}

impl AnnotationFactory {
    pub fn new(defaults: AnnotationDefaults) -> Self {
        Self { defaults }
    }

    pub fn create(&self) -> Annotation {
        Annotation {
            id: AnnotationId::new(),
            text: self.defaults.text.clone(),
            position: Position::new(self.defaults.x, self.defaults.y),
            font_size_vw: self.defaults.font_size_vw,
            color: self.defaults.color.clone(),
        }
    }
}

impl Default for AnnotationFactory {
    fn default() -> Self {
        Self::new(AnnotationDefaults::default())
    }
}
