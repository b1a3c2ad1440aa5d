// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Text properties panel.
//!
//! This module provides the panel for editing the selected text element's
//! content, font size and color.

use crate::error::EditError;
use crate::models::project::Project;
use crate::util::color;
use egui::Color32;

/// Display the editor for the selected annotation.
///
/// Returns the first rejected edit of this frame, if any.
pub fn show(ui: &mut egui::Ui, project: &mut Project) -> Option<EditError> {
    let mut rejected = None;

    if project.canvas.selected().is_none() {
        ui.heading("Text Editor");
        ui.add_space(4.0);
        ui.label(
            egui::RichText::new(
                "Select a text element on the image to edit its properties, or add a new text element.",
            )
            .weak(),
        );
        return None;
    }

    ui.heading("Edit Text Properties");
    ui.add_space(4.0);

    ui.label("Content");
    let mut text = project.editor.text.clone();
    let response = ui.add(
        egui::TextEdit::multiline(&mut text)
            .hint_text("Enter text here")
            .desired_rows(3)
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        rejected = project.set_text(&text).err();
    }

    ui.separator();

    egui::Grid::new("text_style").num_columns(2).spacing([12.0, 6.0]).show(ui, |ui| {
        ui.label("Font Size (vw)");
        ui.label("Color");
        ui.end_row();

        let mut size = project.editor.font_size.clone();
        let response = ui.add(egui::TextEdit::singleline(&mut size).desired_width(80.0));
        if response.changed() {
            if let Err(e) = project.set_font_size(&size) {
                log::warn!("Rejected font size: {}", e);
                rejected.get_or_insert(e);
            }
        }

        let mut picked = color::parse_hex(&project.editor.color).unwrap_or(Color32::DARK_GRAY);
        if egui::color_picker::color_edit_button_srgba(ui, &mut picked, egui::color_picker::Alpha::Opaque)
            .changed()
        {
            if let Err(e) = project.set_color(&color::to_hex(picked)) {
                rejected.get_or_insert(e);
            }
        }
        ui.end_row();
    });

    rejected
}
