//! Coordinate spaces and the transforms between them.
//!
//! Three spaces are in play:
//!
//! - **client**: CSS pixels relative to the browser viewport, as reported by
//!   pointer events.
//! - **surface**: CSS pixels relative to the top-left of the drawing surface,
//!   which is always sized to the displayed image.
//! - **normalized**: fractions (0–1) of the displayed image width/height. The
//!   marker model stores only this space, so it is resolution-independent.
//!
//! The renderer, the interaction layer and the measurement engine all go
//! through [`SurfaceSize`] and [`ClientRect`] so the mappings cannot drift.

#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;

use serde::{Deserialize, Serialize};

/// A point in client, surface, or normalized space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`, in the units of the space both share.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Pixel dimensions of the drawing surface (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether the surface has no drawable area.
    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Map a normalized point to surface pixels.
    #[must_use]
    pub fn to_pixel(self, normalized: Point) -> Point {
        Point {
            x: normalized.x * self.width,
            y: normalized.y * self.height,
        }
    }

    /// Map a surface-pixel point to normalized space.
    ///
    /// Returns `None` when the surface is empty.
    #[must_use]
    pub fn to_normalized(self, pixel: Point) -> Option<Point> {
        if self.is_empty() {
            return None;
        }
        Some(Point {
            x: pixel.x / self.width,
            y: pixel.y / self.height,
        })
    }

    /// Pixel distance between two normalized points on this surface.
    #[must_use]
    pub fn pixel_distance(self, a: Point, b: Point) -> f64 {
        self.to_pixel(a).distance_to(self.to_pixel(b))
    }

    /// Surface pixel dimensions rounded for a canvas backing store.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn backing_dims(self) -> (u32, u32) {
        let w = self.width.max(0.0).round().min(f64::from(u32::MAX));
        let h = self.height.max(0.0).round().min(f64::from(u32::MAX));
        (w as u32, h as u32)
    }
}

/// On-screen rectangle of the surface element in client space.
///
/// Mirrors the fields of `Element.getBoundingClientRect()` that matter here.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Convert a client-space point into normalized image space.
    ///
    /// The result is not clamped; callers clamp via the marker model. Returns
    /// `None` when the rectangle has no area (element hidden or detached).
    #[must_use]
    pub fn to_normalized(self, client: Point) -> Option<Point> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return None;
        }
        Some(Point {
            x: (client.x - self.left) / self.width,
            y: (client.y - self.top) / self.height,
        })
    }
}
