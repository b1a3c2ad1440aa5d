// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O boundaries: image files, text extraction and the clipboard.

pub mod clipboard;
pub mod extraction;
pub mod media;
