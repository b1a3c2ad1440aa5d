// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image file loading.
//!
//! This module checks the declared content type of a user-supplied file,
//! reads it, encodes it as a data URI for extraction and decodes it into
//! RGBA pixels for display in egui.

use crate::error::UploadError;
use crate::models::project::ImageSource;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use std::path::Path;

/// An image ready for the canvas.
pub struct DecodedImage {
    pub source: ImageSource,
    /// RGBA8, row-major, `width * height * 4` bytes
    pub pixels: Vec<u8>,
}

/// Content type the file claims to have.
///
/// A non-empty MIME string supplied with the file (e.g. by drag and drop)
/// wins; otherwise the type is inferred from the file extension.
pub fn declared_content_type(path: &Path, declared: Option<&str>) -> Option<String> {
    if let Some(mime) = declared.map(str::trim).filter(|m| !m.is_empty()) {
        return Some(mime.to_ascii_lowercase());
    }
    ImageFormat::from_path(path)
        .ok()
        .map(|format| format.to_mime_type().to_string())
}

pub fn is_image_type(content_type: &str) -> bool {
    content_type.starts_with("image/")
}

/// Reject anything that does not declare an image type.
pub fn check_content_type(path: &Path, declared: Option<&str>) -> Result<String, UploadError> {
    match declared_content_type(path, declared) {
        Some(content_type) if is_image_type(&content_type) => Ok(content_type),
        _ => Err(UploadError::NotAnImage(display_name(path))),
    }
}

/// Encode bytes as a self-contained `data:` URI.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Read and decode an image whose content type was already checked.
pub fn load_image(path: &Path, content_type: &str) -> Result<DecodedImage, UploadError> {
    let bytes = std::fs::read(path)?;
    decode_image(display_name(path), content_type, &bytes)
}

pub fn decode_image(name: String, content_type: &str, bytes: &[u8]) -> Result<DecodedImage, UploadError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(DecodedImage {
        source: ImageSource {
            name,
            data_uri: encode_data_uri(content_type, bytes),
            width,
            height,
        },
        pixels: rgba.into_raw(),
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
