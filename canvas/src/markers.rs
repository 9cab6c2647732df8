//! Marker model: the four fixed, draggable point annotations.
//!
//! Markers are stored in normalized image coordinates (see [`crate::coords`]).
//! The set is created once with seed positions and only ever repositioned;
//! markers are never added or removed. Every write goes through
//! [`MarkerSet::set_position`], which clamps into the safe margin so a marker
//! can always be seen and grabbed again.
//!
//! Two semantic pairs exist: the calibration pair sits on a reference object
//! of known width, the measurement pair on the quantity of interest.

#[cfg(test)]
#[path = "markers_test.rs"]
mod markers_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    CLAMP_MARGIN, SEED_CALIBRATION_HALF_SPAN, SEED_CALIBRATION_Y, SEED_MEASUREMENT_HALF_SPAN, SEED_MEASUREMENT_Y,
};
use crate::coords::Point;

/// Stable identifier of one of the four markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerId {
    /// Left edge of the reference object.
    ReferenceLeft,
    /// Right edge of the reference object.
    ReferenceRight,
    /// First measured point (left pupil).
    PointA,
    /// Second measured point (right pupil).
    PointB,
}

impl MarkerId {
    /// All ids in enumeration order. Hit-testing breaks ties in this order.
    pub const ALL: [MarkerId; 4] = [Self::ReferenceLeft, Self::ReferenceRight, Self::PointA, Self::PointB];

    /// The pair this marker belongs to.
    #[must_use]
    pub fn pair(self) -> MarkerPair {
        match self {
            Self::ReferenceLeft | Self::ReferenceRight => MarkerPair::Calibration,
            Self::PointA | Self::PointB => MarkerPair::Measurement,
        }
    }

    /// Label drawn next to the marker.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ReferenceLeft => "Card L",
            Self::ReferenceRight => "Card R",
            Self::PointA => "Left pupil",
            Self::PointB => "Right pupil",
        }
    }

    /// Default seed position on a freshly loaded image.
    #[must_use]
    pub fn seed(self) -> Point {
        match self {
            Self::ReferenceLeft => Point::new(0.5 - SEED_CALIBRATION_HALF_SPAN, SEED_CALIBRATION_Y),
            Self::ReferenceRight => Point::new(0.5 + SEED_CALIBRATION_HALF_SPAN, SEED_CALIBRATION_Y),
            Self::PointA => Point::new(0.5 - SEED_MEASUREMENT_HALF_SPAN, SEED_MEASUREMENT_Y),
            Self::PointB => Point::new(0.5 + SEED_MEASUREMENT_HALF_SPAN, SEED_MEASUREMENT_Y),
        }
    }

    fn index(self) -> usize {
        match self {
            Self::ReferenceLeft => 0,
            Self::ReferenceRight => 1,
            Self::PointA => 2,
            Self::PointB => 3,
        }
    }
}

/// The two semantic marker pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerPair {
    /// Markers on the reference object of known width.
    Calibration,
    /// Markers on the distance being measured.
    Measurement,
}

impl MarkerPair {
    /// The two member ids, left first.
    #[must_use]
    pub fn members(self) -> (MarkerId, MarkerId) {
        match self {
            Self::Calibration => (MarkerId::ReferenceLeft, MarkerId::ReferenceRight),
            Self::Measurement => (MarkerId::PointA, MarkerId::PointB),
        }
    }

    /// CSS color shared by both members and their guide-line.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Calibration => "#3B82F6",
            Self::Measurement => "#22C55E",
        }
    }
}

/// A single marker as seen by the renderer and the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub id: MarkerId,
    /// Normalized position, always within the clamp bounds.
    pub position: Point,
    pub color: &'static str,
    pub label: &'static str,
}

/// Clamp one normalized coordinate into `[CLAMP_MARGIN, 1 - CLAMP_MARGIN]`.
///
/// NaN maps to the lower bound.
#[must_use]
pub fn clamp_coord(v: f64) -> f64 {
    if v.is_nan() {
        return CLAMP_MARGIN;
    }
    v.clamp(CLAMP_MARGIN, 1.0 - CLAMP_MARGIN)
}

/// Clamp a normalized point into the safe margin on both axes.
#[must_use]
pub fn clamp_point(p: Point) -> Point {
    Point::new(clamp_coord(p.x), clamp_coord(p.y))
}

/// Fixed-size collection holding exactly one position per [`MarkerId`].
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSet {
    positions: [Point; 4],
}

impl MarkerSet {
    /// Create a set at the default seed positions.
    #[must_use]
    pub fn new() -> Self {
        Self { positions: MarkerId::ALL.map(MarkerId::seed) }
    }

    /// Clamp `(x, y)` into the safe margin and store it for `id`.
    ///
    /// Overlap with other markers is allowed.
    pub fn set_position(&mut self, id: MarkerId, x: f64, y: f64) {
        self.positions[id.index()] = clamp_point(Point::new(x, y));
    }

    /// Current normalized position of `id`.
    #[must_use]
    pub fn position(&self, id: MarkerId) -> Point {
        self.positions[id.index()]
    }

    /// Normalized positions of both members of `pair`.
    #[must_use]
    pub fn pair_positions(&self, pair: MarkerPair) -> (Point, Point) {
        let (a, b) = pair.members();
        (self.position(a), self.position(b))
    }

    /// Full marker view, in enumeration order.
    #[must_use]
    pub fn markers(&self) -> [Marker; 4] {
        MarkerId::ALL.map(|id| Marker {
            id,
            position: self.position(id),
            color: id.pair().color(),
            label: id.label(),
        })
    }

    /// Restore every marker to its seed position.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::new()
    }
}
