// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editing of the selected annotation's text, size and color.
//!
//! The editor keeps the field buffers shown in the properties panel. Every
//! accepted change is committed to the canvas immediately as a full-record
//! replacement; there is no unsaved state.

use super::annotation::{Annotation, AnnotationId};
use super::canvas::CanvasModel;
use crate::error::EditError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationEditor {
    target: Option<AnnotationId>,
    pub text: String,
    pub font_size: String,
    pub color: String,
}

/// Parse a font size, accepting only positive finite numbers.
pub fn parse_font_size(input: &str) -> Result<f32, EditError> {
    match input.trim().parse::<f32>() {
        Ok(size) if size.is_finite() && size > 0.0 => Ok(size),
        _ => Err(EditError::InvalidFontSize(input.to_string())),
    }
}

impl AnnotationEditor {
    pub fn target(&self) -> Option<AnnotationId> {
        self.target
    }

    /// Bring the buffers in line with the current selection.
    ///
    /// Switching to another annotation resets every field. For the same
    /// annotation, a field is only rewritten when it no longer matches the
    /// stored value, so a font size typed as `"3.50"` is not reformatted
    /// while it is being edited.
    pub fn sync(&mut self, selected: Option<&Annotation>) {
        let Some(annotation) = selected else {
            *self = Self::default();
            return;
        };

        if self.target != Some(annotation.id()) {
            self.load(annotation);
            return;
        }
        if self.text != annotation.text {
            self.text = annotation.text.clone();
        }
        if parse_font_size(&self.font_size).ok() != Some(annotation.font_size_vw) {
            self.font_size = format_font_size(annotation.font_size_vw);
        }
        if self.color != annotation.color {
            self.color = annotation.color.clone();
        }
    }

    fn load(&mut self, annotation: &Annotation) {
        self.target = Some(annotation.id());
        self.text = annotation.text.clone();
        self.font_size = format_font_size(annotation.font_size_vw);
        self.color = annotation.color.clone();
    }

    pub fn set_text(&mut self, canvas: &mut CanvasModel, text: &str) -> Result<(), EditError> {
        let updated = canvas.selected().ok_or(EditError::NoSelection)?.with_text(text);
        self.text = updated.text.clone();
        canvas.update(updated);
        Ok(())
    }

    /// Apply a font size typed by the user.
    ///
    /// Invalid input leaves the annotation alone and puts the stored size
    /// back into the buffer.
    pub fn set_font_size(&mut self, canvas: &mut CanvasModel, input: &str) -> Result<f32, EditError> {
        let current = canvas.selected().ok_or(EditError::NoSelection)?;
        let size = match parse_font_size(input) {
            Ok(size) => size,
            Err(e) => {
                self.font_size = format_font_size(current.font_size_vw);
                return Err(e);
            }
        };
        let updated = current.with_font_size(size);
        self.font_size = input.to_string();
        canvas.update(updated);
        Ok(size)
    }

    pub fn set_color(&mut self, canvas: &mut CanvasModel, color: &str) -> Result<(), EditError> {
        let updated = canvas.selected().ok_or(EditError::NoSelection)?.with_color(color);
        self.color = updated.color.clone();
        canvas.update(updated);
        Ok(())
    }
}

fn format_font_size(size: f32) -> String {
    format!("{}", size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::AnnotationFactory;

    fn setup() -> (CanvasModel, AnnotationEditor, AnnotationId) {
        let mut canvas = CanvasModel::default();
        canvas.set_image(100, 100);
        let id = canvas.add_annotation(&AnnotationFactory::default()).unwrap();
        let mut editor = AnnotationEditor::default();
        editor.sync(canvas.selected());
        (canvas, editor, id)
    }

    #[test]
    fn test_parse_font_size() {
        assert_eq!(parse_font_size("3.5"), Ok(3.5));
        assert_eq!(parse_font_size(" 2 "), Ok(2.0));
        for bad in ["0", "-1", "abc", "", "NaN", "inf"] {
            assert!(parse_font_size(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_sync_loads_selection() {
        let (_, editor, id) = setup();
        assert_eq!(editor.target(), Some(id));
        assert_eq!(editor.text, "New Text");
        assert_eq!(editor.font_size, "3");
        assert_eq!(editor.color, "#333333");
    }

    #[test]
    fn test_sync_without_selection_clears() {
        let (_, mut editor, _) = setup();
        editor.sync(None);
        assert_eq!(editor, AnnotationEditor::default());
    }

    #[test]
    fn test_switching_selection_resets_fields() {
        let (mut canvas, mut editor, first) = setup();
        editor.set_text(&mut canvas, "first").unwrap();

        let second = canvas.add_annotation(&AnnotationFactory::default()).unwrap();
        editor.sync(canvas.selected());
        assert_eq!(editor.target(), Some(second));
        assert_eq!(editor.text, "New Text");

        canvas.select(first);
        editor.sync(canvas.selected());
        assert_eq!(editor.text, "first");
    }

    #[test]
    fn test_edits_commit_immediately() {
        let (mut canvas, mut editor, id) = setup();

        editor.set_text(&mut canvas, "Hello\nWorld").unwrap();
        assert_eq!(editor.set_font_size(&mut canvas, "4.5"), Ok(4.5));
        editor.set_color(&mut canvas, "#ff0000").unwrap();

        let annotation = canvas.annotations().get(id).unwrap();
        assert_eq!(annotation.text, "Hello\nWorld");
        assert_eq!(annotation.font_size_vw, 4.5);
        assert_eq!(annotation.color, "#ff0000");
    }

    #[test]
    fn test_invalid_font_size_is_rejected() {
        let (mut canvas, mut editor, id) = setup();

        for bad in ["0", "-1", "abc"] {
            editor.font_size = bad.to_string();
            let result = editor.set_font_size(&mut canvas, bad);
            assert_eq!(result, Err(EditError::InvalidFontSize(bad.to_string())));
            assert_eq!(canvas.annotations().get(id).unwrap().font_size_vw, 3.0);
            assert_eq!(editor.font_size, "3");
        }
    }

    #[test]
    fn test_sync_keeps_equivalent_font_text() {
        let (mut canvas, mut editor, _) = setup();
        editor.set_font_size(&mut canvas, "3.50").unwrap();
        editor.sync(canvas.selected());
        assert_eq!(editor.font_size, "3.50");
    }

    #[test]
    fn test_sync_picks_up_external_changes() {
        let (mut canvas, mut editor, _) = setup();
        let changed = canvas.selected().unwrap().with_text("edited on canvas");
        canvas.update(changed);
        editor.sync(canvas.selected());
        assert_eq!(editor.text, "edited on canvas");
    }

    #[test]
    fn test_edit_without_selection() {
        let (mut canvas, mut editor, _) = setup();
        canvas.deselect();
        assert_eq!(editor.set_text(&mut canvas, "x"), Err(EditError::NoSelection));
        assert_eq!(editor.set_font_size(&mut canvas, "2"), Err(EditError::NoSelection));
        assert_eq!(editor.set_color(&mut canvas, "#000000"), Err(EditError::NoSelection));
    }
}
