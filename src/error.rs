// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for the user-facing operations.
//!
//! None of these are fatal: each one is turned into a notice and a log line
//! by the application, and the state it guards is left untouched.

use thiserror::Error;

/// Failure to bring an image into the session.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("'{0}' is not an image file")]
    NotAnImage(String),
    #[error("failed to read image data: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Rejected edit of the selected annotation.
#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("no text element is selected")]
    NoSelection,
    #[error("font size must be a positive number, got '{0}'")]
    InvalidFontSize(String),
}

/// Failure of the external text extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no image loaded")]
    NoImage,
    #[error("an extraction is already in progress")]
    Busy,
    #[error("no extraction command is configured")]
    NotConfigured,
    #[error("failed to run extraction command: {0}")]
    Io(#[from] std::io::Error),
    #[error("extraction command did not finish within {0:?}")]
    TimedOut(std::time::Duration),
    #[error("extraction command exited with {status}: {stderr}")]
    CommandFailed { status: String, stderr: String },
    #[error("malformed extraction response: {0}")]
    Response(#[from] serde_json::Error),
    #[error("extraction worker stopped without a result")]
    Disconnected,
}

/// Failure to write to the system clipboard.
#[derive(Debug, Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);
