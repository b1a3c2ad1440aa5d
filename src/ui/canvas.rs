// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for the image and its text overlays.
//!
//! This module lays out the canvas frame with the image's aspect ratio,
//! paints every annotation at its percentage position, records each
//! annotation's rendered size for drag clamping, and turns pointer input
//! into canvas actions.

use crate::models::annotation::{Annotation, AnnotationId};
use crate::models::canvas::CanvasModel;
use crate::models::drag::Measure;
use crate::util::color;
use crate::util::geometry::{self, Extent};
use egui::{Color32, CursorIcon, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use std::collections::HashMap;

/// Space between a label's box and its text.
const LABEL_PADDING: f32 = 4.0;
/// Smallest box, so short or empty labels can still be grabbed.
const LABEL_MIN_SIZE: f32 = 20.0;
/// Largest rendered font size. A single glyph must fit the font atlas.
pub const MAX_FONT_POINTS: f32 = 256.0;

/// Result of canvas interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasAction {
    Select(AnnotationId),
    BeginDrag(AnnotationId, Pos2),
    UpdateDrag(Pos2),
    EndDrag,
    CommitText(AnnotationId, String),
}

/// Text being edited directly on the canvas.
#[derive(Debug, Clone)]
struct InlineEdit {
    id: AnnotationId,
    buffer: String,
    focus_requested: bool,
}

/// Per-frame layout of the canvas, kept between frames.
#[derive(Debug, Default)]
pub struct CanvasView {
    /// Rendered canvas size in pixels
    canvas_size: Vec2,
    /// Rendered label boxes in screen space
    label_rects: HashMap<AnnotationId, Rect>,
    inline_edit: Option<InlineEdit>,
}

impl Measure for CanvasView {
    fn measure(&self, id: AnnotationId) -> Option<Extent> {
        let rect = self.label_rects.get(&id)?;
        Extent::from_pixels(rect.size(), self.canvas_size)
    }
}

impl CanvasView {
    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    /// Where a label was drawn in the last frame.
    pub fn label_rect(&self, id: AnnotationId) -> Option<Rect> {
        self.label_rects.get(&id).copied()
    }

    /// Drop layout state belonging to a previous image.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Font size in points for a `vw` size: 1 vw is 1% of the window width.
///
/// Only the rendered size is limited; the stored `vw` value is untouched.
pub fn font_points(font_size_vw: f32, window_width: f32) -> f32 {
    let points = geometry::percent_to_pixels(font_size_vw, window_width);
    if points.is_nan() {
        return 1.0;
    }
    points.clamp(1.0, MAX_FONT_POINTS)
}

/// Display the canvas and collect pointer interactions.
pub fn show(
    ui: &mut egui::Ui,
    view: &mut CanvasView,
    canvas: &CanvasModel,
    image_texture: Option<&egui::TextureHandle>,
) -> Vec<CanvasAction> {
    let mut actions = Vec::new();

    let outer = ui.available_rect_before_wrap();
    let frame_size = geometry::fit_frame(outer.size(), canvas.aspect_ratio());
    let frame_rect = Rect::from_center_size(outer.center(), frame_size);
    ui.allocate_rect(outer, Sense::hover());

    view.canvas_size = frame_rect.size();
    view.label_rects.clear();

    let painter = ui.painter_at(frame_rect);
    painter.rect_filled(frame_rect, 6.0, ui.visuals().faint_bg_color);

    let Some(texture) = image_texture.filter(|_| canvas.has_image()) else {
        view.inline_edit = None;
        show_placeholder(&painter, frame_rect, ui.visuals().weak_text_color());
        return actions;
    };

    painter.image(
        texture.id(),
        frame_rect,
        Rect::from_min_max(Pos2::ZERO, egui::pos2(1.0, 1.0)),
        Color32::WHITE,
    );

    let window_width = ui.ctx().screen_rect().width();
    let selected = canvas.selected_id();
    let dragging = canvas.dragging_id();

    // Inline edit of an annotation that no longer exists is dropped
    if view
        .inline_edit
        .as_ref()
        .is_some_and(|edit| !canvas.annotations().contains(edit.id))
    {
        view.inline_edit = None;
    }

    for annotation in canvas.annotations().iter() {
        let id = annotation.id();
        let text_color = color::parse_hex(&annotation.color).unwrap_or(Color32::DARK_GRAY);
        let font = FontId::proportional(font_points(annotation.font_size_vw, window_width));

        let galley = ui.fonts(|fonts| {
            fonts.layout(annotation.text.clone(), font.clone(), text_color, f32::INFINITY)
        });
        let box_size = (galley.size() + Vec2::splat(2.0 * LABEL_PADDING))
            .max(Vec2::splat(LABEL_MIN_SIZE));
        let label_rect = Rect::from_min_size(label_origin(frame_rect, annotation), box_size);
        view.label_rects.insert(id, label_rect);

        let is_selected = selected == Some(id);
        let editing = view.inline_edit.as_ref().is_some_and(|e| e.id == id);

        if editing {
            if let Some(commit) = show_inline_edit(ui, view, label_rect, font, text_color) {
                actions.push(commit);
            }
        } else {
            painter.galley(label_rect.min + Vec2::splat(LABEL_PADDING), galley, text_color);
        }

        if is_selected {
            let outline = ui.visuals().selection.stroke.color;
            painter.extend(dashed_outline(label_rect, Stroke::new(1.0, outline)));
        }

        if editing {
            continue;
        }

        let response = ui.interact(label_rect, ui.id().with(("annotation", id)), Sense::click_and_drag());

        let started = response.drag_started();
        if started {
            let origin = ui.input(|i| i.pointer.press_origin());
            if let Some(pointer) = origin.or(response.interact_pointer_pos()) {
                actions.push(CanvasAction::BeginDrag(id, pointer));
            }
        }
        if response.dragged() && (started || dragging == Some(id)) {
            if let Some(pointer) = response.interact_pointer_pos() {
                actions.push(CanvasAction::UpdateDrag(pointer));
            }
        }
        if response.drag_stopped() {
            actions.push(CanvasAction::EndDrag);
        }

        if response.double_clicked() && is_selected {
            view.inline_edit = Some(InlineEdit {
                id,
                buffer: annotation.text.clone(),
                focus_requested: false,
            });
        } else if response.clicked() && !is_selected {
            actions.push(CanvasAction::Select(id));
        }

        if dragging == Some(id) {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        } else if response.hovered() {
            ui.ctx().set_cursor_icon(if is_selected { CursorIcon::Text } else { CursorIcon::Grab });
        }
    }

    actions
}

/// Top-left corner of an annotation's box in screen space.
fn label_origin(frame_rect: Rect, annotation: &Annotation) -> Pos2 {
    frame_rect.min
        + Vec2::new(
            geometry::percent_to_pixels(annotation.position.x, frame_rect.width()),
            geometry::percent_to_pixels(annotation.position.y, frame_rect.height()),
        )
}

fn show_inline_edit(
    ui: &mut egui::Ui,
    view: &mut CanvasView,
    rect: Rect,
    font: FontId,
    text_color: Color32,
) -> Option<CanvasAction> {
    let edit = view.inline_edit.as_mut()?;
    let response = ui.put(
        rect,
        egui::TextEdit::multiline(&mut edit.buffer)
            .font(font)
            .text_color(text_color)
            .frame(false)
            .desired_rows(1)
            .desired_width(rect.width()),
    );
    if !edit.focus_requested {
        response.request_focus();
        edit.focus_requested = true;
        return None;
    }
    if response.lost_focus() {
        let edit = view.inline_edit.take()?;
        return Some(CanvasAction::CommitText(edit.id, edit.buffer));
    }
    None
}

fn show_placeholder(painter: &egui::Painter, rect: Rect, color: Color32) {
    painter.text(
        rect.center() - Vec2::new(0.0, 12.0),
        egui::Align2::CENTER_CENTER,
        "Your Image Will Appear Here",
        FontId::proportional(20.0),
        color,
    );
    painter.text(
        rect.center() + Vec2::new(0.0, 14.0),
        egui::Align2::CENTER_CENTER,
        "Upload an image to begin adding and editing text.",
        FontId::proportional(13.0),
        color,
    );
}

/// Dashed rectangle around a selected label.
fn dashed_outline(rect: Rect, stroke: Stroke) -> Vec<egui::Shape> {
    let points = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
        rect.left_top(),
    ];
    egui::Shape::dashed_line(&points, stroke, 4.0, 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::annotation::AnnotationFactory;
    use egui::{Event, Modifiers, PointerButton, RawInput};

    const SCREEN: Vec2 = Vec2::new(1280.0, 800.0);

    fn loaded_canvas(font_size_vw: f32) -> (CanvasModel, AnnotationId) {
        let mut canvas = CanvasModel::default();
        canvas.set_image(400, 300);
        let id = canvas.add_annotation(&AnnotationFactory::default()).unwrap();
        let resized = canvas.selected().unwrap().with_font_size(font_size_vw);
        canvas.update(resized);
        (canvas, id)
    }

    fn test_texture(ctx: &egui::Context) -> egui::TextureHandle {
        let image = egui::ColorImage::new([4, 3], Color32::WHITE);
        ctx.load_texture("test_image", image, egui::TextureOptions::LINEAR)
    }

    /// Run one frame showing the canvas in a central panel.
    fn run_frame(
        ctx: &egui::Context,
        view: &mut CanvasView,
        canvas: &CanvasModel,
        texture: &egui::TextureHandle,
        time: f64,
        events: Vec<Event>,
    ) -> Vec<CanvasAction> {
        let input = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, SCREEN)),
            time: Some(time),
            events,
            ..Default::default()
        };
        let mut actions = Vec::new();
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                actions = show(ui, view, canvas, Some(texture));
            });
        });
        actions
    }

    /// Apply actions the way the application does.
    fn apply(canvas: &mut CanvasModel, view: &CanvasView, actions: &[CanvasAction]) {
        for action in actions {
            match action {
                CanvasAction::BeginDrag(id, pointer) => {
                    canvas.begin_drag(*id, *pointer);
                }
                CanvasAction::UpdateDrag(pointer) => {
                    canvas.update_drag(*pointer, view.canvas_size(), view);
                }
                CanvasAction::EndDrag => {
                    canvas.end_drag();
                }
                CanvasAction::Select(id) => {
                    canvas.select(*id);
                }
                CanvasAction::CommitText(..) => {}
            }
        }
    }

    fn button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn test_font_points_scale_with_window() {
        assert!((font_points(3.0, 1000.0) - 30.0).abs() < 0.001);
        assert!((font_points(3.0, 2000.0) - 60.0).abs() < 0.001);
        assert_eq!(font_points(0.01, 10.0), 1.0);
    }

    #[test]
    fn test_font_points_are_capped() {
        assert_eq!(font_points(1000.0, 1280.0), MAX_FONT_POINTS);
        assert_eq!(font_points(1e30, 1280.0), MAX_FONT_POINTS);
        assert_eq!(font_points(f32::INFINITY, 1280.0), MAX_FONT_POINTS);
        assert_eq!(font_points(f32::NAN, 1280.0), 1.0);
    }

    #[test]
    fn test_huge_font_renders() {
        let ctx = egui::Context::default();
        let texture = test_texture(&ctx);
        let mut view = CanvasView::default();

        for font_size_vw in [1000.0, 1e30] {
            let (canvas, id) = loaded_canvas(font_size_vw);
            let actions = run_frame(&ctx, &mut view, &canvas, &texture, 0.0, Vec::new());

            assert!(actions.is_empty());
            let rect = view.label_rect(id).unwrap();
            assert!(rect.width().is_finite() && rect.height().is_finite());
            // The stored size is not touched by rendering
            assert_eq!(canvas.selected().unwrap().font_size_vw, font_size_vw);
        }
    }

    #[test]
    fn test_pointer_drag_moves_label() {
        let ctx = egui::Context::default();
        let texture = test_texture(&ctx);
        let mut view = CanvasView::default();
        let (mut canvas, id) = loaded_canvas(3.0);
        canvas.deselect();

        // Lay out once so the label can be hit
        let actions = run_frame(&ctx, &mut view, &canvas, &texture, 0.0, Vec::new());
        assert!(actions.is_empty());
        let press = view.label_rect(id).unwrap().center();

        let actions = run_frame(
            &ctx,
            &mut view,
            &canvas,
            &texture,
            0.1,
            vec![Event::PointerMoved(press), button(press, true)],
        );
        assert!(actions.is_empty());

        let first = press + Vec2::new(40.0, 0.0);
        let actions = run_frame(&ctx, &mut view, &canvas, &texture, 0.2, vec![Event::PointerMoved(first)]);
        assert_eq!(
            actions,
            vec![CanvasAction::BeginDrag(id, press), CanvasAction::UpdateDrag(first)]
        );
        apply(&mut canvas, &view, &actions);
        assert_eq!(canvas.dragging_id(), Some(id));
        assert_eq!(canvas.selected_id(), Some(id));

        let second = press + Vec2::new(80.0, 0.0);
        let actions = run_frame(&ctx, &mut view, &canvas, &texture, 0.3, vec![Event::PointerMoved(second)]);
        assert_eq!(actions, vec![CanvasAction::UpdateDrag(second)]);
        apply(&mut canvas, &view, &actions);

        let actions = run_frame(&ctx, &mut view, &canvas, &texture, 0.4, vec![button(second, false)]);
        assert_eq!(actions, vec![CanvasAction::EndDrag]);
        apply(&mut canvas, &view, &actions);
        assert_eq!(canvas.dragging_id(), None);

        let moved = canvas.annotations().get(id).unwrap();
        let expected_x = 40.0 + 80.0 / view.canvas_size().x * 100.0;
        assert!((moved.position.x - expected_x).abs() < 0.01);
        assert!((moved.position.y - 40.0).abs() < 0.01);
    }

    #[test]
    fn test_view_measures_in_percent() {
        let id = AnnotationId::new();
        let mut view = CanvasView {
            canvas_size: Vec2::new(400.0, 200.0),
            ..CanvasView::default()
        };
        assert_eq!(view.measure(id), None);

        view.label_rects
            .insert(id, Rect::from_min_size(egui::pos2(5.0, 5.0), Vec2::new(40.0, 20.0)));
        assert_eq!(view.measure(id), Some(Extent { width: 10.0, height: 10.0 }));

        view.canvas_size = Vec2::ZERO;
        assert_eq!(view.measure(id), None);
    }

    #[test]
    fn test_label_origin() {
        let frame = Rect::from_min_size(egui::pos2(10.0, 20.0), Vec2::new(400.0, 300.0));
        let annotation = crate::models::annotation::AnnotationFactory::default().create();
        assert_eq!(label_origin(frame, &annotation), egui::pos2(170.0, 140.0));
    }
}
