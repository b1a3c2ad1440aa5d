// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Canvas model: the coordinate frame, its annotations and the selection.
//!
//! The canvas knows nothing about pixels except during a drag, where the
//! pointer displacement is converted into its percentage frame using the
//! rendered size handed in by the UI.

use super::annotation::{Annotation, AnnotationFactory, AnnotationId, Position};
use super::collection::AnnotationCollection;
use super::drag::{DragSession, DragState, Measure};
use crate::util::geometry::{self, DEFAULT_ASPECT_RATIO};
use egui::{Pos2, Vec2};

#[derive(Debug, Default)]
pub struct CanvasModel {
    /// Natural pixel size of the background image
    image_size: Option<(u32, u32)>,
    annotations: AnnotationCollection,
    selected: Option<AnnotationId>,
    drag: DragState,
}

impl CanvasModel {
    /// Install a new background image, dropping every annotation.
    pub fn set_image(&mut self, width: u32, height: u32) {
        self.image_size = Some((width, height));
        self.annotations.clear();
        self.selected = None;
        self.drag = DragState::Idle;
    }

    pub fn has_image(&self) -> bool {
        self.image_size.is_some()
    }

    /// Width/height ratio of the frame: the image's, or 4:3 without one.
    pub fn aspect_ratio(&self) -> f32 {
        self.image_size
            .map(|(w, h)| geometry::aspect_ratio(w, h))
            .unwrap_or(DEFAULT_ASPECT_RATIO)
    }

    pub fn annotations(&self) -> &AnnotationCollection {
        &self.annotations
    }

    /// Add a new annotation and select it. Requires an image.
    pub fn add_annotation(&mut self, factory: &AnnotationFactory) -> Option<AnnotationId> {
        if !self.has_image() {
            return None;
        }
        let annotation = factory.create();
        let id = annotation.id();
        self.annotations.push(annotation);
        self.selected = Some(id);
        log::info!("Added text element, total: {}", self.annotations.len());
        Some(id)
    }

    pub fn select(&mut self, id: AnnotationId) -> bool {
        if !self.annotations.contains(id) {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<AnnotationId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Annotation> {
        self.selected.and_then(|id| self.annotations.get(id))
    }

    /// Replace an annotation by identifier.
    pub fn update(&mut self, annotation: Annotation) -> bool {
        self.annotations.replace(annotation)
    }

    /// Start dragging `id` from `pointer`. Unknown identifiers are ignored.
    pub fn begin_drag(&mut self, id: AnnotationId, pointer: Pos2) -> bool {
        let Some(start) = self.annotations.get(id).map(|a| a.position) else {
            return false;
        };
        if let Some(previous) = self.drag.session() {
            log::debug!("Drag of {:?} replaced by a new drag", previous.annotation_id);
        }
        self.selected = Some(id);
        self.drag.begin(id, pointer, start);
        true
    }

    /// Move the dragged annotation for the pointer at `pointer`.
    ///
    /// `canvas` is the rendered size of the frame in pixels. Returns the new
    /// position, or `None` when no drag is active or the move was discarded.
    pub fn update_drag(&mut self, pointer: Pos2, canvas: Vec2, measure: &dyn Measure) -> Option<Position> {
        let session = *self.drag.session()?;
        let current = self.annotations.get(session.annotation_id)?;

        let extent = measure.measure(session.annotation_id);
        let position = session.target_position(pointer, canvas, extent)?;
        let updated = current.with_position(position);
        self.annotations.replace(updated);
        Some(position)
    }

    /// Finish the active drag, if any.
    pub fn end_drag(&mut self) -> Option<DragSession> {
        let session = self.drag.end()?;
        if let Some(annotation) = self.annotations.get(session.annotation_id) {
            log::info!(
                "Moved text element to ({:.1}%, {:.1}%)",
                annotation.position.x,
                annotation.position.y
            );
        }
        Some(session)
    }

    pub fn dragging_id(&self) -> Option<AnnotationId> {
        self.drag.session().map(|s| s.annotation_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::geometry::Extent;
    use std::collections::HashMap;

    /// Fixed extents per annotation; anything else is unmeasurable.
    #[derive(Default)]
    struct FakeMeasure(HashMap<AnnotationId, Extent>);

    impl Measure for FakeMeasure {
        fn measure(&self, id: AnnotationId) -> Option<Extent> {
            self.0.get(&id).copied()
        }
    }

    const CANVAS: Vec2 = Vec2::new(400.0, 300.0);

    fn canvas_with_image() -> CanvasModel {
        let mut canvas = CanvasModel::default();
        canvas.set_image(800, 600);
        canvas
    }

    fn measured(id: AnnotationId, width: f32, height: f32) -> FakeMeasure {
        let mut measure = FakeMeasure::default();
        measure.0.insert(id, Extent { width, height });
        measure
    }

    #[test]
    fn test_aspect_ratio_follows_image() {
        let mut canvas = CanvasModel::default();
        assert_eq!(canvas.aspect_ratio(), 4.0 / 3.0);
        canvas.set_image(1000, 500);
        assert_eq!(canvas.aspect_ratio(), 2.0);
    }

    #[test]
    fn test_add_requires_image_and_selects() {
        let factory = AnnotationFactory::default();
        let mut canvas = CanvasModel::default();
        assert_eq!(canvas.add_annotation(&factory), None);

        canvas.set_image(10, 10);
        let id = canvas.add_annotation(&factory).unwrap();
        assert_eq!(canvas.selected_id(), Some(id));
        assert_eq!(canvas.selected().unwrap().position, Position::new(40.0, 40.0));
    }

    #[test]
    fn test_new_image_resets_everything() {
        let mut canvas = canvas_with_image();
        let id = canvas.add_annotation(&AnnotationFactory::default()).unwrap();
        canvas.begin_drag(id, Pos2::ZERO);

        canvas.set_image(20, 10);

        assert!(canvas.annotations().is_empty());
        assert_eq!(canvas.selected_id(), None);
        assert_eq!(canvas.dragging_id(), None);
    }

    #[test]
    fn test_select_unknown_is_ignored() {
        let mut canvas = canvas_with_image();
        let id = canvas.add_annotation(&AnnotationFactory::default()).unwrap();
        assert!(!canvas.select(AnnotationId::new()));
        assert_eq!(canvas.selected_id(), Some(id));
    }

    #[test]
    fn test_drag_scenario() {
        let mut canvas = canvas_with_image();
        let id = canvas.add_annotation(&AnnotationFactory::default()).unwrap();
        let measure = measured(id, 10.0, 5.0);

        assert!(canvas.begin_drag(id, Pos2::new(200.0, 150.0)));
        canvas.update_drag(Pos2::new(205.0, 150.0), CANVAS, &measure);
        canvas.update_drag(Pos2::new(210.0, 150.0), CANVAS, &measure);
        canvas.end_drag();

        let position = canvas.annotations().get(id).unwrap().position;
        assert_eq!(position, Position::new(42.5, 40.0));
    }

    #[test]
    fn test_drag_stays_inside_frame() {
        let mut canvas = canvas_with_image();
        let id = canvas.add_annotation(&AnnotationFactory::default()).unwrap();
        let (width, height) = (25.0, 12.0);
        let measure = measured(id, width, height);

        canvas.begin_drag(id, Pos2::ZERO);
        for pointer in [
            Pos2::new(1_000.0, 1_000.0),
            Pos2::new(-1_000.0, 50.0),
            Pos2::new(399.0, -299.0),
            Pos2::new(240.0, 180.0),
        ] {
            canvas.update_drag(pointer, CANVAS, &measure);
            let p = canvas.annotations().get(id).unwrap().position;
            assert!((0.0..=100.0 - width).contains(&p.x), "x out of bounds: {}", p.x);
            assert!((0.0..=100.0 - height).contains(&p.y), "y out of bounds: {}", p.y);
        }
        canvas.end_drag();
    }

    #[test]
    fn test_unmeasurable_drag_keeps_position() {
        let mut canvas = canvas_with_image();
        let id = canvas.add_annotation(&AnnotationFactory::default()).unwrap();

        canvas.begin_drag(id, Pos2::ZERO);
        let moved = canvas.update_drag(Pos2::new(40.0, 40.0), CANVAS, &FakeMeasure::default());
        canvas.end_drag();

        assert_eq!(moved, None);
        assert_eq!(canvas.annotations().get(id).unwrap().position, Position::new(40.0, 40.0));
    }

    #[test]
    fn test_second_drag_uses_its_own_start() {
        let factory = AnnotationFactory::default();
        let mut canvas = canvas_with_image();
        let first = canvas.add_annotation(&factory).unwrap();
        let second = canvas.add_annotation(&factory).unwrap();
        let moved_second = canvas.annotations().get(second).unwrap().with_position(Position::new(10.0, 10.0));
        canvas.update(moved_second);

        let mut measure = measured(first, 5.0, 5.0);
        measure.0.insert(second, Extent { width: 5.0, height: 5.0 });

        canvas.begin_drag(first, Pos2::ZERO);
        canvas.update_drag(Pos2::new(40.0, 0.0), CANVAS, &measure);

        canvas.begin_drag(second, Pos2::new(100.0, 100.0));
        assert_eq!(canvas.dragging_id(), Some(second));
        assert_eq!(canvas.selected_id(), Some(second));
        canvas.update_drag(Pos2::new(140.0, 100.0), CANVAS, &measure);
        canvas.end_drag();

        assert_eq!(canvas.annotations().get(first).unwrap().position, Position::new(50.0, 40.0));
        assert_eq!(canvas.annotations().get(second).unwrap().position, Position::new(20.0, 10.0));
    }

    #[test]
    fn test_begin_unknown_and_end_idle_are_noops() {
        let mut canvas = canvas_with_image();
        assert!(!canvas.begin_drag(AnnotationId::new(), Pos2::ZERO));
        assert_eq!(canvas.dragging_id(), None);
        assert!(canvas.end_drag().is_none());
        assert!(canvas.end_drag().is_none());
    }

    #[test]
    fn test_update_without_drag_is_ignored() {
        let mut canvas = canvas_with_image();
        let id = canvas.add_annotation(&AnnotationFactory::default()).unwrap();
        let measure = measured(id, 5.0, 5.0);
        assert_eq!(canvas.update_drag(Pos2::new(50.0, 50.0), CANVAS, &measure), None);
    }
}
