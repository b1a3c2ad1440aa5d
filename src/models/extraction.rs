// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! State of the text extraction: the pending flag and the result buffer.

use crate::error::ExtractionError;

/// What a finished extraction means for the user.
#[derive(Debug)]
pub enum ExtractionOutcome {
    TextFound,
    NoTextFound,
    Failed(ExtractionError),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionState {
    pending: bool,
    text: Option<String>,
}

impl ExtractionState {
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Extracted text of the last successful attempt, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Mark a request as started. Only one may be in flight.
    pub fn begin(&mut self) -> Result<(), ExtractionError> {
        if self.pending {
            return Err(ExtractionError::Busy);
        }
        self.pending = true;
        self.text = None;
        Ok(())
    }

    /// Record the result of the in-flight request.
    ///
    /// Returns `None` when nothing was pending, i.e. the result belongs to
    /// an abandoned request.
    pub fn finish(&mut self, result: Result<String, ExtractionError>) -> Option<ExtractionOutcome> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        let outcome = match result {
            Ok(text) => {
                let outcome = if text.trim().is_empty() {
                    ExtractionOutcome::NoTextFound
                } else {
                    ExtractionOutcome::TextFound
                };
                self.text = Some(text);
                outcome
            }
            Err(e) => ExtractionOutcome::Failed(e),
        };
        Some(outcome)
    }

    /// Forget any pending request and result.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
