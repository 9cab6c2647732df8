//! Measurement engine: reference-scaled distance from the marker model.
//!
//! The calibration pair spans a reference object of known width. Its pixel
//! length gives a millimeters-per-pixel scale, which converts the pixel length
//! of the measurement pair into millimeters.
//!
//! [`calculate`] is a pure function of the marker positions, the reference
//! width and the surface size. It refuses to produce a result when either pair
//! is so short that pixel noise would dominate, and it attaches a soft warning
//! (never a refusal) when the result falls outside the plausible range.

#[cfg(test)]
#[path = "measure_test.rs"]
mod measure_test;

use serde::Serialize;

use crate::config::{MeasureConfig, PlausibleRange};
use crate::coords::SurfaceSize;
use crate::markers::{MarkerPair, MarkerSet};

/// Errors that block a calculation or reject an input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeasureError {
    /// The calibration pair is too short for a stable scale factor.
    #[error(
        "Card markers are too close together ({distance_px:.0}px, need at least {min_px:.0}px). Drag Card L and Card R onto opposite edges of the card."
    )]
    CalibrationMarkersTooClose { distance_px: f64, min_px: f64 },
    /// The measurement pair is too short to measure reliably.
    #[error(
        "Pupil markers are too close together ({distance_px:.0}px, need at least {min_px:.0}px). Drag Left pupil and Right pupil onto the centers of the pupils."
    )]
    MeasurementMarkersTooClose { distance_px: f64, min_px: f64 },
    /// The reference width is not a finite number inside the configured bounds.
    #[error("Reference width must be between {min_mm} and {max_mm} mm (got {value}).")]
    InvalidReferenceWidth { value: f64, min_mm: f64, max_mm: f64 },
    /// No photo has been loaded yet.
    #[error("Upload a photo before calculating.")]
    NoImageLoaded,
    /// The drawing surface has no area, so pixel distances are meaningless.
    #[error("The photo is not visible on screen yet; try again once it has loaded.")]
    EmptySurface,
}

impl MeasureError {
    /// The marker pair the user must adjust, if the error is about one.
    #[must_use]
    pub fn pair(&self) -> Option<MarkerPair> {
        match self {
            Self::CalibrationMarkersTooClose { .. } => Some(MarkerPair::Calibration),
            Self::MeasurementMarkersTooClose { .. } => Some(MarkerPair::Measurement),
            _ => None,
        }
    }
}

/// Known real-world width of the reference object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationReference {
    width_mm: f64,
}

impl CalibrationReference {
    /// Build a reference, rejecting widths outside the configured bounds.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidReferenceWidth`] for non-finite or
    /// out-of-range widths.
    pub fn new(width_mm: f64, config: &MeasureConfig) -> Result<Self, MeasureError> {
        if !config.reference_width_in_bounds(width_mm) {
            return Err(MeasureError::InvalidReferenceWidth {
                value: width_mm,
                min_mm: config.min_reference_width_mm,
                max_mm: config.max_reference_width_mm,
            });
        }
        Ok(Self { width_mm })
    }

    /// The configured default width.
    #[must_use]
    pub fn default_for(config: &MeasureConfig) -> Self {
        Self { width_mm: config.default_reference_width_mm }
    }

    #[must_use]
    pub fn width_mm(self) -> f64 {
        self.width_mm
    }
}

/// Outcome of a successful calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementResult {
    /// Measured distance, rounded to one decimal place.
    pub value_mm: f64,
    /// Whether `value_mm` lies inside the plausible range.
    pub within_plausible_range: bool,
    /// Scale factor derived from the calibration pair.
    pub mm_per_pixel: f64,
    /// Calibration pair length in surface pixels.
    pub calibration_px: f64,
    /// Measurement pair length in surface pixels.
    pub measurement_px: f64,
    /// Range the result was checked against.
    pub plausible_range: PlausibleRange,
}

impl MeasurementResult {
    /// Soft warning for out-of-range results.
    #[must_use]
    pub fn warning(&self) -> Option<RangeWarning> {
        if self.within_plausible_range {
            return None;
        }
        Some(RangeWarning { value_mm: self.value_mm, range: self.plausible_range })
    }

    /// Plain-text form used for the clipboard export.
    #[must_use]
    pub fn clipboard_text(&self) -> String {
        format!("{:.1}", self.value_mm)
    }
}

/// Non-blocking notice that a result is outside the plausible range.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error(
    "{value_mm:.1} mm is outside the typical range of {}-{} mm. Double-check the marker placement before relying on it.",
    .range.min_mm,
    .range.max_mm
)]
pub struct RangeWarning {
    pub value_mm: f64,
    pub range: PlausibleRange,
}

/// Round to one decimal place.
#[must_use]
pub fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Compute the reference-scaled distance between the measurement markers.
///
/// Pixel lengths are taken on `surface`, the size the markers are currently
/// drawn at.
///
/// # Errors
///
/// - [`MeasureError::EmptySurface`] when `surface` has no area.
/// - [`MeasureError::CalibrationMarkersTooClose`] when the calibration pair is
///   shorter than `config.min_calibration_px`.
/// - [`MeasureError::MeasurementMarkersTooClose`] when the measurement pair is
///   shorter than `config.min_measurement_px`.
pub fn calculate(
    markers: &MarkerSet,
    reference: CalibrationReference,
    surface: SurfaceSize,
    config: &MeasureConfig,
) -> Result<MeasurementResult, MeasureError> {
    if surface.is_empty() {
        return Err(MeasureError::EmptySurface);
    }

    let (cal_a, cal_b) = markers.pair_positions(MarkerPair::Calibration);
    let calibration_px = surface.pixel_distance(cal_a, cal_b);
    if calibration_px < config.min_calibration_px {
        return Err(MeasureError::CalibrationMarkersTooClose {
            distance_px: calibration_px,
            min_px: config.min_calibration_px,
        });
    }

    let (meas_a, meas_b) = markers.pair_positions(MarkerPair::Measurement);
    let measurement_px = surface.pixel_distance(meas_a, meas_b);
    if measurement_px < config.min_measurement_px {
        return Err(MeasureError::MeasurementMarkersTooClose {
            distance_px: measurement_px,
            min_px: config.min_measurement_px,
        });
    }

    let mm_per_pixel = reference.width_mm() / calibration_px;
    let value_mm = round_tenth(measurement_px * mm_per_pixel);
    let range = config.plausible_range;

    Ok(MeasurementResult {
        value_mm,
        within_plausible_range: range.contains(value_mm),
        mm_per_pixel,
        calibration_px,
        measurement_px,
        plausible_range: range,
    })
}
