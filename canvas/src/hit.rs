#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::coords::{Point, SurfaceSize};
use crate::markers::{MarkerId, MarkerSet};

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub marker: MarkerId,
    /// Pixel distance from the pointer to the marker center.
    pub distance_px: f64,
}

/// Find the marker whose drawn center is nearest to `normalized_pt`, within
/// `radius_px` surface pixels.
///
/// Distances are measured in pixel space so the grab radius is the same on
/// both axes regardless of image aspect. Ties go to the marker that comes
/// first in [`MarkerId::ALL`].
#[must_use]
pub fn hit_test(normalized_pt: Point, markers: &MarkerSet, surface: SurfaceSize, radius_px: f64) -> Option<Hit> {
    if surface.is_empty() {
        return None;
    }
    let pointer_px = surface.to_pixel(normalized_pt);

    let mut best: Option<Hit> = None;
    for id in MarkerId::ALL {
        let center_px = surface.to_pixel(markers.position(id));
        let distance_px = pointer_px.distance_to(center_px);
        if distance_px > radius_px {
            continue;
        }
        if best.is_none_or(|b| distance_px < b.distance_px) {
            best = Some(Hit { marker: id, distance_px });
        }
    }
    best
}
