// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Read-only display of the extracted text.

use crate::models::extraction::ExtractionState;

/// Display the extracted text. Returns `true` when "copy" was clicked.
pub fn show(ui: &mut egui::Ui, extraction: &ExtractionState) -> bool {
    let mut copy = false;

    ui.heading("Extracted Text");
    ui.label(egui::RichText::new("Text identified in the image by AI.").weak());
    ui.add_space(4.0);

    if extraction.is_pending() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(egui::RichText::new("Extracting text...").weak());
        });
        return false;
    }

    match extraction.text() {
        Some(text) if text.trim().is_empty() => {
            ui.label(egui::RichText::new("No text found in the image.").weak());
        }
        Some(text) => {
            egui::ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
                // A &str buffer makes the field read-only but still selectable
                let mut view = text;
                ui.add(
                    egui::TextEdit::multiline(&mut view)
                        .font(egui::TextStyle::Monospace)
                        .desired_width(f32::INFINITY),
                );
            });
            let width = ui.available_width();
            if ui
                .add(egui::Button::new("Copy Extracted Text").min_size(egui::vec2(width, 28.0)))
                .clicked()
            {
                copy = true;
            }
        }
        None => {
            ui.label(
                egui::RichText::new(
                    "No text extracted yet, or the image does not contain recognizable text.",
                )
                .weak(),
            );
        }
    }

    copy
}
