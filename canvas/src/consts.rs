//! Shared numeric constants for the canvas crate.

// ── Marker model ────────────────────────────────────────────────

/// Normalized margin kept between a marker and the image edge.
pub const CLAMP_MARGIN: f64 = 0.02;

/// Normalized y of the calibration pair seed (roughly 2/3 down the image).
pub const SEED_CALIBRATION_Y: f64 = 0.67;

/// Normalized x offsets of the calibration pair seed, either side of center.
pub const SEED_CALIBRATION_HALF_SPAN: f64 = 0.15;

/// Normalized y of the measurement pair seed (roughly 1/3 down the image).
pub const SEED_MEASUREMENT_Y: f64 = 0.33;

/// Normalized x offsets of the measurement pair seed. Closer than calibration.
pub const SEED_MEASUREMENT_HALF_SPAN: f64 = 0.10;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space grab radius in pixels around a marker center.
pub const HIT_RADIUS_PX: f64 = 20.0;

// ── Measurement ─────────────────────────────────────────────────

/// Calibration pair pixel distance below which the scale is rejected.
pub const MIN_CALIBRATION_PX: f64 = 20.0;

/// Measurement pair pixel distance below which the result is rejected.
pub const MIN_MEASUREMENT_PX: f64 = 10.0;

/// ID-1 card width (credit/debit cards, ISO/IEC 7810).
pub const DEFAULT_REFERENCE_WIDTH_MM: f64 = 85.6;

/// Smallest reference width accepted from the width control.
pub const MIN_REFERENCE_WIDTH_MM: f64 = 10.0;

/// Largest reference width accepted from the width control.
pub const MAX_REFERENCE_WIDTH_MM: f64 = 300.0;

/// Lower bound of the typical adult pupillary distance.
pub const PLAUSIBLE_MIN_MM: f64 = 40.0;

/// Upper bound of the typical adult pupillary distance.
pub const PLAUSIBLE_MAX_MM: f64 = 80.0;

// ── Ingestion ───────────────────────────────────────────────────

/// Upload cap applied before decoding (25 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024;

// ── Rendering ───────────────────────────────────────────────────

/// Marker disc radius in surface pixels.
pub const MARKER_RADIUS_PX: f64 = 12.0;

/// Marker center dot radius in surface pixels.
pub const MARKER_DOT_RADIUS_PX: f64 = 3.0;

/// Opacity of the marker disc fill.
pub const MARKER_FILL_ALPHA: f64 = 0.3;

/// Ring outline width in surface pixels.
pub const MARKER_RING_WIDTH_PX: f64 = 2.0;

/// Guide-line dash pattern (on, off) in surface pixels.
pub const GUIDE_DASH_PX: [f64; 2] = [6.0, 4.0];

/// Guide-line stroke width in surface pixels.
pub const GUIDE_LINE_WIDTH_PX: f64 = 1.5;

/// Vertical gap between the top of a marker disc and its label baseline.
pub const LABEL_GAP_PX: f64 = 6.0;
