// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the TypeSnap application.

pub mod canvas;
pub mod extracted;
pub mod notices;
pub mod properties;
pub mod toolbar;
