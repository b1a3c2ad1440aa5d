// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! System clipboard access for exporting extracted text.

use crate::error::ClipboardError;
use arboard::Clipboard;

/// Somewhere text can be copied to.
pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The OS clipboard.
///
/// The handle is created on first use and kept, since on some platforms the
/// copied contents disappear when it is dropped.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.clipboard.is_none() {
            self.clipboard = Some(Clipboard::new().map_err(|e| ClipboardError(e.to_string()))?);
        }
        let Some(clipboard) = self.clipboard.as_mut() else {
            return Err(ClipboardError("not initialised".to_string()));
        };
        let result = clipboard.set_text(text);
        result.map_err(|e| {
            // Force a fresh handle next time
            self.clipboard = None;
            ClipboardError(e.to_string())
        })
    }
}
