// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Session state management.
//!
//! This module ties together the loaded image, the canvas with its
//! annotations, the editor buffers and the extraction state. It lives for
//! the page session only; nothing here is written to disk.

use super::annotation::{AnnotationFactory, AnnotationId};
use super::canvas::CanvasModel;
use super::editor::AnnotationEditor;
use super::extraction::{ExtractionOutcome, ExtractionState};
use crate::error::{EditError, ExtractionError};

/// The background image as handed to the canvas and to extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSource {
    pub name: String,
    /// `data:<mime>;base64,<payload>`
    pub data_uri: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Default)]
pub struct Project {
    image: Option<ImageSource>,
    pub canvas: CanvasModel,
    pub editor: AnnotationEditor,
    pub extraction: ExtractionState,
    factory: AnnotationFactory,
}

impl Project {
    pub fn new(factory: AnnotationFactory) -> Self {
        Self {
            factory,
            ..Self::default()
        }
    }

    pub fn image(&self) -> Option<&ImageSource> {
        self.image.as_ref()
    }

    /// Replace the background image. Annotations, selection and extracted
    /// text are all discarded.
    pub fn load_image(&mut self, image: ImageSource) {
        self.canvas.set_image(image.width, image.height);
        self.extraction.reset();
        self.editor.sync(None);
        log::info!("Loaded image: {} ({}x{})", image.name, image.width, image.height);
        self.image = Some(image);
    }

    pub fn add_annotation(&mut self) -> Option<AnnotationId> {
        let id = self.canvas.add_annotation(&self.factory)?;
        self.editor.sync(self.canvas.selected());
        Some(id)
    }

    pub fn select(&mut self, id: AnnotationId) {
        if self.canvas.select(id) {
            self.editor.sync(self.canvas.selected());
        }
    }

    pub fn set_text(&mut self, text: &str) -> Result<(), EditError> {
        self.editor.set_text(&mut self.canvas, text)
    }

    pub fn set_font_size(&mut self, input: &str) -> Result<f32, EditError> {
        self.editor.set_font_size(&mut self.canvas, input)
    }

    pub fn set_color(&mut self, color: &str) -> Result<(), EditError> {
        self.editor.set_color(&mut self.canvas, color)
    }

    /// Commit a text edit made directly on the canvas.
    pub fn commit_inline_text(&mut self, id: AnnotationId, text: &str) -> bool {
        let Some(annotation) = self.canvas.annotations().get(id) else {
            return false;
        };
        if annotation.text == text {
            return false;
        }
        let updated = annotation.with_text(text);
        self.canvas.update(updated);
        self.editor.sync(self.canvas.selected());
        true
    }

    /// Start an extraction, returning the data URI to send.
    pub fn begin_extraction(&mut self) -> Result<String, ExtractionError> {
        let data_uri = self.image.as_ref().ok_or(ExtractionError::NoImage)?.data_uri.clone();
        self.extraction.begin()?;
        Ok(data_uri)
    }

    pub fn finish_extraction(&mut self, result: Result<String, ExtractionError>) -> Option<ExtractionOutcome> {
        self.extraction.finish(result)
    }
}
