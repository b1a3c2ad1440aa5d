// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Session data model: annotations, canvas, editor and extraction state.

pub mod annotation;
pub mod canvas;
pub mod collection;
pub mod drag;
pub mod editor;
pub mod extraction;
pub mod project;
