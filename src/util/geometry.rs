// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the coordinate transformations between screen
//! pixels and the canvas percentage frame (0.0 to 100.0 on both axes), and
//! the aspect-ratio fitting used to size the canvas.

use crate::models::annotation::Position;
use egui::Vec2;

/// Aspect ratio used when no image is loaded (4:3).
pub const DEFAULT_ASPECT_RATIO: f32 = 4.0 / 3.0;

/// Size of an annotation's rendered box, in percent of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    /// Convert a pixel size into canvas percentages.
    ///
    /// Returns `None` when either the box or the canvas has no usable size,
    /// which would otherwise produce a non-finite extent.
    pub fn from_pixels(size: Vec2, canvas: Vec2) -> Option<Self> {
        let extent = Self {
            width: pixels_to_percent(size.x, canvas.x)?,
            height: pixels_to_percent(size.y, canvas.y)?,
        };
        (extent.width > 0.0 && extent.height > 0.0).then_some(extent)
    }
}

/// Convert a pixel length into a percentage of `extent_px`.
pub fn pixels_to_percent(length_px: f32, extent_px: f32) -> Option<f32> {
    if !(extent_px.is_finite() && extent_px > 0.0) {
        return None;
    }
    let percent = length_px / extent_px * 100.0;
    percent.is_finite().then_some(percent)
}

/// Convert a percentage of `extent_px` into a pixel length.
pub fn percent_to_pixels(percent: f32, extent_px: f32) -> f32 {
    percent / 100.0 * extent_px
}

/// Clamp a position so a box of `extent` stays inside the 0..100 frame.
///
/// The trailing edge is clamped first, so an oversized box is pinned to the
/// leading edge.
pub fn clamp_to_frame(position: Position, extent: Extent) -> Position {
    Position {
        x: position.x.min(100.0 - extent.width).max(0.0),
        y: position.y.min(100.0 - extent.height).max(0.0),
    }
}

/// Width/height ratio of an image, falling back to 4:3 for degenerate sizes.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        return DEFAULT_ASPECT_RATIO;
    }
    width as f32 / height as f32
}

/// Largest size with the given aspect ratio that fits inside `available`.
pub fn fit_frame(available: Vec2, aspect: f32) -> Vec2 {
    let available_aspect = available.x / available.y;
    if !available_aspect.is_finite() || available.x <= 0.0 || available.y <= 0.0 {
        return Vec2::ZERO;
    }
    if aspect > available_aspect {
        // Wider than the available area - fit to width
        Vec2::new(available.x, available.x / aspect)
    } else {
        // Taller - fit to height
        Vec2::new(available.y * aspect, available.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixels_to_percent() {
        assert_eq!(pixels_to_percent(10.0, 400.0), Some(2.5));
        assert_eq!(pixels_to_percent(10.0, 0.0), None);
        assert_eq!(pixels_to_percent(10.0, f32::NAN), None);
    }

    #[test]
    fn test_percent_to_pixels() {
        assert!((percent_to_pixels(40.0, 400.0) - 160.0).abs() < 0.0001);
    }

    #[test]
    fn test_clamp_to_frame() {
        let extent = Extent { width: 20.0, height: 10.0 };

        let inside = clamp_to_frame(Position { x: 50.0, y: 50.0 }, extent);
        assert_eq!(inside, Position { x: 50.0, y: 50.0 });

        let trailing = clamp_to_frame(Position { x: 95.0, y: 99.0 }, extent);
        assert_eq!(trailing, Position { x: 80.0, y: 90.0 });

        let leading = clamp_to_frame(Position { x: -5.0, y: -1.0 }, extent);
        assert_eq!(leading, Position { x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_clamp_oversized_box_pins_to_origin() {
        let extent = Extent { width: 120.0, height: 150.0 };
        let clamped = clamp_to_frame(Position { x: 30.0, y: 30.0 }, extent);
        assert_eq!(clamped, Position { x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_extent_from_pixels() {
        let extent = Extent::from_pixels(Vec2::new(40.0, 30.0), Vec2::new(400.0, 300.0));
        assert_eq!(extent, Some(Extent { width: 10.0, height: 10.0 }));

        assert_eq!(Extent::from_pixels(Vec2::ZERO, Vec2::new(400.0, 300.0)), None);
        assert_eq!(Extent::from_pixels(Vec2::new(40.0, 30.0), Vec2::ZERO), None);
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(aspect_ratio(1920, 1080), 1920.0 / 1080.0);
        assert_eq!(aspect_ratio(0, 1080), DEFAULT_ASPECT_RATIO);
    }

    #[test]
    fn test_fit_frame() {
        // Wide image in a square area
        let wide = fit_frame(Vec2::new(800.0, 800.0), 2.0);
        assert_eq!(wide, Vec2::new(800.0, 400.0));

        // Tall image in a wide area
        let tall = fit_frame(Vec2::new(800.0, 400.0), 0.5);
        assert_eq!(tall, Vec2::new(200.0, 400.0));

        assert_eq!(fit_frame(Vec2::new(0.0, 400.0), 1.0), Vec2::ZERO);
    }
}
