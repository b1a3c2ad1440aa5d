// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Ordered collection of annotations.

use super::annotation::{Annotation, AnnotationId};

/// Annotations in insertion order. Later entries paint on top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationCollection {
    annotations: Vec<Annotation>,
}

impl AnnotationCollection {
    pub fn push(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id() == id)
    }

    pub fn contains(&self, id: AnnotationId) -> bool {
        self.get(id).is_some()
    }

    /// Swap in a new record for the annotation with the same identifier.
    ///
    /// Returns `false` (and changes nothing) when no such annotation exists.
    pub fn replace(&mut self, annotation: Annotation) -> bool {
        match self.annotations.iter_mut().find(|a| a.id() == annotation.id()) {
            Some(slot) => {
                *slot = annotation;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn clear(&mut self) {
        self.annotations.clear();
    }
}
