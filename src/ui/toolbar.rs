// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main controls: image upload, adding text and extraction.

/// What the user asked for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    ChooseImage,
    AddText,
    ExtractText,
}

/// Inputs that decide which controls are enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolbarState {
    pub has_image: bool,
    pub uploading: bool,
    pub extracting: bool,
}

impl ToolbarState {
    pub fn is_busy(&self) -> bool {
        self.uploading || self.extracting
    }
}

/// Display the controls and report the clicked one.
pub fn show(ui: &mut egui::Ui, state: ToolbarState) -> ToolbarAction {
    let mut action = ToolbarAction::None;
    let full_width = egui::vec2(ui.available_width(), 28.0);

    ui.label("Upload Image");
    let upload_label = if state.uploading { "Processing..." } else { "⬆ Choose Image" };
    if ui
        .add_enabled(!state.is_busy(), egui::Button::new(upload_label).min_size(full_width))
        .clicked()
    {
        action = ToolbarAction::ChooseImage;
    }

    if !state.has_image {
        if !state.is_busy() {
            ui.add_space(30.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("Upload an image to start your creation.").weak());
            });
        }
        return action;
    }

    ui.add_space(8.0);
    if ui
        .add_enabled(!state.is_busy(), egui::Button::new("+ Add Text Layer").min_size(full_width))
        .clicked()
    {
        action = ToolbarAction::AddText;
    }

    action
}

/// Display the extraction trigger. Disabled while anything is pending.
pub fn show_extract_button(ui: &mut egui::Ui, state: ToolbarState) -> ToolbarAction {
    let full_width = egui::vec2(ui.available_width(), 28.0);
    let mut action = ToolbarAction::None;

    let label = if state.extracting {
        "Extracting Text..."
    } else {
        "Extract Text from Image"
    };
    let enabled = state.has_image && !state.is_busy();
    if ui.add_enabled(enabled, egui::Button::new(label).min_size(full_width)).clicked() {
        action = ToolbarAction::ExtractText;
    }

    action
}
