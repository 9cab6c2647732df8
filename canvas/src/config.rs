//! Tunable thresholds for one measurement tool instance.
//!
//! The host may pass a JSON object with any subset of these fields; missing
//! fields take the defaults from [`crate::consts`], which describe the
//! pupillary-distance tool. Other reference-scaled measurements can override
//! the plausible range and the reference width.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_REFERENCE_WIDTH_MM, HIT_RADIUS_PX, MAX_REFERENCE_WIDTH_MM, MAX_UPLOAD_BYTES, MIN_CALIBRATION_PX,
    MIN_MEASUREMENT_PX, MIN_REFERENCE_WIDTH_MM, PLAUSIBLE_MAX_MM, PLAUSIBLE_MIN_MM,
};

/// Error returned by [`MeasureConfig::from_json`] and [`MeasureConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The input was not a JSON object of the expected shape.
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Closed interval `[min_mm, max_mm]` of physically plausible results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlausibleRange {
    pub min_mm: f64,
    pub max_mm: f64,
}

impl PlausibleRange {
    #[must_use]
    pub fn contains(self, value_mm: f64) -> bool {
        (self.min_mm..=self.max_mm).contains(&value_mm)
    }
}

impl Default for PlausibleRange {
    fn default() -> Self {
        Self { min_mm: PLAUSIBLE_MIN_MM, max_mm: PLAUSIBLE_MAX_MM }
    }
}

/// Measurement tool configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MeasureConfig {
    /// Grab radius around each marker, in surface pixels.
    pub hit_radius_px: f64,
    /// Calibration pair distance below which calculation is refused.
    pub min_calibration_px: f64,
    /// Measurement pair distance below which calculation is refused.
    pub min_measurement_px: f64,
    /// Reference width used until the user edits it.
    pub default_reference_width_mm: f64,
    /// Smallest accepted reference width.
    pub min_reference_width_mm: f64,
    /// Largest accepted reference width.
    pub max_reference_width_mm: f64,
    /// Soft sanity range for results.
    pub plausible_range: PlausibleRange,
    /// Largest accepted upload, in bytes.
    pub max_upload_bytes: u64,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            hit_radius_px: HIT_RADIUS_PX,
            min_calibration_px: MIN_CALIBRATION_PX,
            min_measurement_px: MIN_MEASUREMENT_PX,
            default_reference_width_mm: DEFAULT_REFERENCE_WIDTH_MM,
            min_reference_width_mm: MIN_REFERENCE_WIDTH_MM,
            max_reference_width_mm: MAX_REFERENCE_WIDTH_MM,
            plausible_range: PlausibleRange::default(),
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl MeasureConfig {
    /// Parse and validate a JSON config. An empty or whitespace-only string
    /// yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a value fails [`Self::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field for a usable value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("hitRadiusPx", self.hit_radius_px)?;
        positive("minCalibrationPx", self.min_calibration_px)?;
        positive("minMeasurementPx", self.min_measurement_px)?;
        positive("minReferenceWidthMm", self.min_reference_width_mm)?;
        positive("maxReferenceWidthMm", self.max_reference_width_mm)?;
        if self.min_reference_width_mm > self.max_reference_width_mm {
            return Err(ConfigError::Invalid(format!(
                "minReferenceWidthMm ({}) exceeds maxReferenceWidthMm ({})",
                self.min_reference_width_mm, self.max_reference_width_mm
            )));
        }
        if !self.reference_width_in_bounds(self.default_reference_width_mm) {
            return Err(ConfigError::Invalid(format!(
                "defaultReferenceWidthMm ({}) outside [{}, {}]",
                self.default_reference_width_mm, self.min_reference_width_mm, self.max_reference_width_mm
            )));
        }
        let range = self.plausible_range;
        if !(range.min_mm.is_finite() && range.max_mm.is_finite()) || range.min_mm > range.max_mm {
            return Err(ConfigError::Invalid(format!(
                "plausibleRange [{}, {}] is not a finite ordered interval",
                range.min_mm, range.max_mm
            )));
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid("maxUploadBytes must be non-zero".into()));
        }
        Ok(())
    }

    /// Whether `width_mm` is an acceptable reference width.
    #[must_use]
    pub fn reference_width_in_bounds(&self, width_mm: f64) -> bool {
        width_mm.is_finite() && (self.min_reference_width_mm..=self.max_reference_width_mm).contains(&width_mm)
    }
}

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{field} must be a positive number, got {value}")))
    }
}
