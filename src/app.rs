// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the eframe::App trait. It owns the session model, runs image loading and
//! text extraction in the background, and routes UI actions into the model.

use crate::config::AppConfig;
use crate::error::{ExtractionError, UploadError};
use crate::io::clipboard::{ClipboardSink, SystemClipboard};
use crate::io::extraction::{self, TextExtractor};
use crate::io::media::{self, DecodedImage};
use crate::models::annotation::AnnotationFactory;
use crate::models::extraction::ExtractionOutcome;
use crate::models::project::Project;
use crate::ui::canvas::{self, CanvasAction, CanvasView};
use crate::ui::notices::Notices;
use crate::ui::toolbar::{self, ToolbarAction, ToolbarState};
use crate::ui::{extracted, properties};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;

/// Main application state.
pub struct TypeSnapApp {
    /// Session data: image, annotations, editor and extraction state
    project: Project,

    /// Loaded image texture for display
    image_texture: Option<egui::TextureHandle>,

    /// Canvas layout from the last frame
    canvas_view: CanvasView,

    /// Receiver for background image loading
    image_loader: Option<Receiver<Result<DecodedImage, UploadError>>>,

    /// Receiver for the in-flight extraction
    extraction_result: Option<Receiver<Result<String, ExtractionError>>>,

    extractor: Arc<dyn TextExtractor>,
    clipboard: Box<dyn ClipboardSink>,
    notices: Notices,
}

impl TypeSnapApp {
    /// Create a new application instance from configuration.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            project: Project::new(AnnotationFactory::new(config.annotation.clone())),
            image_texture: None,
            canvas_view: CanvasView::default(),
            image_loader: None,
            extraction_result: None,
            extractor: extraction::from_config(&config.extraction),
            clipboard: Box::new(SystemClipboard::default()),
            notices: Notices::new(config.notices.seconds),
        }
    }

    fn toolbar_state(&self) -> ToolbarState {
        ToolbarState {
            has_image: self.project.image().is_some(),
            uploading: self.image_loader.is_some(),
            extracting: self.project.extraction.is_pending(),
        }
    }

    /// Check the file type and load the image in the background.
    ///
    /// `declared_mime` is the content type supplied with the file, if any.
    pub fn open_image(&mut self, path: PathBuf, declared_mime: Option<&str>, now: f64) {
        if self.toolbar_state().is_busy() {
            log::warn!("Ignoring {} while busy", path.display());
            self.notices.info(
                now,
                "Busy",
                "Please wait for the current upload or extraction to finish.",
            );
            return;
        }

        let content_type = match media::check_content_type(&path, declared_mime) {
            Ok(content_type) => content_type,
            Err(e) => {
                log::warn!("{}", e);
                self.notices.error(
                    now,
                    "Invalid File Type",
                    "Please upload an image file (e.g., PNG, JPG, GIF).",
                );
                return;
            }
        };

        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);

        // Spawn background thread for loading
        std::thread::spawn(move || {
            let result = media::load_image(&path, &content_type);
            let _ = sender.send(result);
        });
    }

    /// Check for a completed image load.
    fn poll_image_loader(&mut self, ctx: &egui::Context, now: f64) {
        let Some(receiver) = &self.image_loader else {
            return;
        };
        let result = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(UploadError::Io(std::io::Error::other(
                "image loader stopped without a result",
            ))),
        };
        self.image_loader = None;

        match result {
            Ok(loaded) => {
                let size = [loaded.source.width as usize, loaded.source.height as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
                let texture = ctx.load_texture("uploaded_image", color_image, egui::TextureOptions::LINEAR);

                self.image_texture = Some(texture);
                self.canvas_view.reset();
                // A result for the previous image would be meaningless
                self.extraction_result = None;
                self.project.load_image(loaded.source);

                self.notices.info(
                    now,
                    "Image Uploaded",
                    "You can now add text or extract text from the image.",
                );
            }
            Err(e) => {
                self.notices.error(now, "Error", format!("An error occurred while reading the file: {}", e));
            }
        }
    }

    fn start_extraction(&mut self, now: f64) {
        match self.project.begin_extraction() {
            Ok(data_uri) => {
                log::info!("Starting text extraction");
                self.extraction_result = Some(extraction::spawn(self.extractor.clone(), data_uri));
            }
            Err(ExtractionError::NoImage) => {
                self.notices.error(now, "No Image", "Please upload an image first.");
            }
            Err(e) => log::warn!("Extraction not started: {}", e),
        }
    }

    /// Check for a finished extraction.
    fn poll_extraction(&mut self, now: f64) {
        let Some(receiver) = &self.extraction_result else {
            return;
        };
        let result = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(ExtractionError::Disconnected),
        };
        self.extraction_result = None;

        if let Some(outcome) = self.project.finish_extraction(result) {
            report_extraction(&mut self.notices, now, outcome);
        }
    }

    fn copy_extracted_text(&mut self, now: f64) {
        let text = self.project.extraction.text().unwrap_or_default();
        copy_to_clipboard(self.clipboard.as_mut(), text, &mut self.notices, now);
    }

    fn apply_canvas_actions(&mut self, actions: Vec<CanvasAction>) {
        for action in actions {
            match action {
                CanvasAction::Select(id) => {
                    self.project.select(id);
                }
                CanvasAction::BeginDrag(id, pointer) => {
                    self.project.canvas.begin_drag(id, pointer);
                }
                CanvasAction::UpdateDrag(pointer) => {
                    let size = self.canvas_view.canvas_size();
                    self.project.canvas.update_drag(pointer, size, &self.canvas_view);
                }
                CanvasAction::EndDrag => {
                    self.project.canvas.end_drag();
                }
                CanvasAction::CommitText(id, text) => {
                    self.project.commit_inline_text(id, &text);
                }
            }
        }
    }

    fn choose_image(&mut self, now: f64) {
        // Open native file picker
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp", "bmp", "tiff", "tif"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            self.open_image(path, None, now);
        }
    }
}

/// Turn an extraction outcome into a notice.
fn report_extraction(notices: &mut Notices, now: f64, outcome: ExtractionOutcome) {
    match outcome {
        ExtractionOutcome::TextFound => {
            notices.info(now, "Text Extracted", "AI has extracted text from the image.");
        }
        ExtractionOutcome::NoTextFound => {
            notices.info(now, "No Text Found", "AI could not find any text in the image.");
        }
        ExtractionOutcome::Failed(e) => {
            log::error!("Error extracting text: {}", e);
            notices.error(now, "Extraction Failed", "Could not extract text from image.");
        }
    }
}

/// Copy text and report the result. Empty text is not copied.
fn copy_to_clipboard(sink: &mut dyn ClipboardSink, text: &str, notices: &mut Notices, now: f64) {
    if text.is_empty() {
        return;
    }
    match sink.copy(text) {
        Ok(()) => notices.info(now, "Success", "Extracted text copied to clipboard!"),
        Err(e) => {
            log::error!("{}", e);
            notices.error(now, "Copy Failed", "Could not copy text.");
        }
    }
}

impl eframe::App for TypeSnapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);

        self.poll_image_loader(ctx, now);
        self.poll_extraction(now);

        // Request repaint while work is pending (to update spinners)
        if self.toolbar_state().is_busy() {
            ctx.request_repaint();
        }

        // Files dropped onto the window
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(file) = dropped.into_iter().next() {
            if let Some(path) = file.path {
                self.open_image(path, Some(file.mime.as_str()), now);
            }
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let idle = !self.toolbar_state().is_busy();
                    if ui.add_enabled(idle, egui::Button::new("Open Image...")).clicked() {
                        self.choose_image(now);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    let state = self.toolbar_state();
                    if ui
                        .add_enabled(state.has_image && !state.is_busy(), egui::Button::new("Add Text"))
                        .clicked()
                    {
                        self.project.add_annotation();
                        ui.close_menu();
                    }
                    let has_selection = self.project.canvas.selected_id().is_some();
                    if ui.add_enabled(has_selection, egui::Button::new("Deselect (Esc)")).clicked() {
                        self.project.canvas.deselect();
                        ui.close_menu();
                    }
                });

                ui.separator();
                ui.label(egui::RichText::new("TypeSnap").strong());
            });
        });

        // Controls panel (right side)
        egui::SidePanel::right("controls")
            .default_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let state = self.toolbar_state();
                    let mut action = toolbar::show(ui, state);

                    if state.has_image {
                        ui.add_space(12.0);
                        self.project.editor.sync(self.project.canvas.selected());
                        if let Some(e) = properties::show(ui, &mut self.project) {
                            self.notices.error(now, "Invalid Input", e.to_string());
                        }

                        ui.add_space(12.0);
                        if toolbar::show_extract_button(ui, state) == ToolbarAction::ExtractText {
                            action = ToolbarAction::ExtractText;
                        }

                        ui.add_space(12.0);
                        if extracted::show(ui, &self.project.extraction) {
                            self.copy_extracted_text(now);
                        }
                    }

                    match action {
                        ToolbarAction::ChooseImage => self.choose_image(now),
                        ToolbarAction::AddText => {
                            self.project.add_annotation();
                        }
                        ToolbarAction::ExtractText => self.start_extraction(now),
                        ToolbarAction::None => {}
                    }
                });
            });

        // Deselect on Escape, unless a text field is being edited
        if !ctx.wants_keyboard_input() && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.project.canvas.deselect();
        }

        // Main canvas (center)
        let canvas_actions = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if self.image_loader.is_some() {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                    return Vec::new();
                }
                canvas::show(
                    ui,
                    &mut self.canvas_view,
                    &self.project.canvas,
                    self.image_texture.as_ref(),
                )
            })
            .inner;

        self.apply_canvas_actions(canvas_actions);

        self.notices.show(ctx);
    }
}
