//! Rendering: draws the photo and marker overlay to a drawing surface.
//!
//! [`draw`] is the only entry point. It reads the marker model and the current
//! surface size and issues draw calls through the [`Surface`] trait; it keeps
//! no state of its own, so calling it twice with the same inputs produces the
//! same calls. The browser binding implements [`Surface`] for
//! [`web_sys::CanvasRenderingContext2d`]; tests implement it with a recorder.
//!
//! All fallible surface calls propagate errors via `Result<(), S::Error>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, ImageBitmap};

use crate::consts::{
    GUIDE_DASH_PX, GUIDE_LINE_WIDTH_PX, LABEL_GAP_PX, MARKER_DOT_RADIUS_PX, MARKER_FILL_ALPHA, MARKER_RADIUS_PX,
    MARKER_RING_WIDTH_PX,
};
use crate::coords::{Point, SurfaceSize};
use crate::markers::{Marker, MarkerPair, MarkerSet};

/// Label fill color.
const LABEL_FILL: &str = "#111827";

/// Label outline color, for legibility on any background.
const LABEL_OUTLINE: &str = "#FFFFFF";

/// Label outline width in surface pixels.
const LABEL_OUTLINE_PX: f64 = 3.0;

/// Label font.
const LABEL_FONT: &str = "bold 12px sans-serif";

/// Drawing primitives the overlay needs.
///
/// Coordinates are surface pixels. Colors are CSS color strings.
pub trait Surface {
    /// Error raised by the backend.
    type Error;
    /// Bitmap type the backend can draw.
    type Image;

    /// Resize the backing store to exactly `size`.
    fn set_size(&mut self, size: SurfaceSize) -> Result<(), Self::Error>;

    /// Clear the whole surface.
    fn clear(&mut self, size: SurfaceSize);

    /// Draw `image` stretched to fill `size`.
    fn draw_image(&mut self, image: &Self::Image, size: SurfaceSize) -> Result<(), Self::Error>;

    /// Fill a disc with `color` at opacity `alpha`.
    fn fill_circle(&mut self, center: Point, radius: f64, color: &str, alpha: f64) -> Result<(), Self::Error>;

    /// Stroke a circle outline.
    fn stroke_circle(&mut self, center: Point, radius: f64, color: &str, width: f64) -> Result<(), Self::Error>;

    /// Stroke a dashed straight line.
    fn dashed_line(&mut self, from: Point, to: Point, color: &str, width: f64, dash: &[f64]) -> Result<(), Self::Error>;

    /// Draw centered text with an outline beneath the fill.
    fn outlined_text(&mut self, text: &str, at: Point, fill: &str, outline: &str) -> Result<(), Self::Error>;
}

/// Draw the full scene: photo, markers, then pair guide-lines.
///
/// # Errors
///
/// Returns the first error reported by `surface`.
pub fn draw<S: Surface>(
    surface: &mut S,
    image: Option<&S::Image>,
    markers: &MarkerSet,
    size: SurfaceSize,
) -> Result<(), S::Error> {
    // Layer 1: match the displayed image exactly, so normalized coordinates
    // scale straight into surface pixels.
    surface.set_size(size)?;
    surface.clear(size);
    if size.is_empty() {
        return Ok(());
    }

    // Layer 2: photo.
    if let Some(image) = image {
        surface.draw_image(image, size)?;
    }

    // Layer 3: markers.
    for marker in markers.markers() {
        draw_marker(surface, &marker, size)?;
    }

    // Layer 4: guide-lines between each pair.
    for pair in [MarkerPair::Calibration, MarkerPair::Measurement] {
        let (a, b) = markers.pair_positions(pair);
        surface.dashed_line(
            size.to_pixel(a),
            size.to_pixel(b),
            pair.color(),
            GUIDE_LINE_WIDTH_PX,
            &GUIDE_DASH_PX,
        )?;
    }

    Ok(())
}

fn draw_marker<S: Surface>(surface: &mut S, marker: &Marker, size: SurfaceSize) -> Result<(), S::Error> {
    let center = size.to_pixel(marker.position);

    surface.fill_circle(center, MARKER_RADIUS_PX, marker.color, MARKER_FILL_ALPHA)?;
    surface.stroke_circle(center, MARKER_RADIUS_PX, marker.color, MARKER_RING_WIDTH_PX)?;
    surface.fill_circle(center, MARKER_DOT_RADIUS_PX, marker.color, 1.0)?;

    let label_at = Point::new(center.x, center.y - MARKER_RADIUS_PX - LABEL_GAP_PX);
    surface.outlined_text(marker.label, label_at, LABEL_FILL, LABEL_OUTLINE)
}

// =============================================================
// Browser backend
// =============================================================

impl Surface for CanvasRenderingContext2d {
    type Error = JsValue;
    type Image = ImageBitmap;

    fn set_size(&mut self, size: SurfaceSize) -> Result<(), JsValue> {
        let canvas = self
            .canvas()
            .ok_or_else(|| JsValue::from_str("rendering context is not attached to a canvas"))?;
        let (w, h) = size.backing_dims();
        // Assigning width/height wipes the canvas even when unchanged, so skip no-ops.
        if canvas.width() != w {
            canvas.set_width(w);
        }
        if canvas.height() != h {
            canvas.set_height(h);
        }
        Ok(())
    }

    fn clear(&mut self, size: SurfaceSize) {
        self.clear_rect(0.0, 0.0, size.width, size.height);
    }

    fn draw_image(&mut self, image: &ImageBitmap, size: SurfaceSize) -> Result<(), JsValue> {
        self.draw_image_with_image_bitmap_and_dw_and_dh(image, 0.0, 0.0, size.width, size.height)
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str, alpha: f64) -> Result<(), JsValue> {
        self.save();
        self.set_global_alpha(alpha);
        self.set_fill_style_str(color);
        self.begin_path();
        self.arc(center.x, center.y, radius, 0.0, 2.0 * PI)?;
        self.fill();
        self.restore();
        Ok(())
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, color: &str, width: f64) -> Result<(), JsValue> {
        self.save();
        self.set_stroke_style_str(color);
        self.set_line_width(width);
        self.begin_path();
        self.arc(center.x, center.y, radius, 0.0, 2.0 * PI)?;
        self.stroke();
        self.restore();
        Ok(())
    }

    fn dashed_line(&mut self, from: Point, to: Point, color: &str, width: f64, dash: &[f64]) -> Result<(), JsValue> {
        let pattern = dash.iter().copied().map(JsValue::from_f64).collect::<js_sys::Array>();
        self.save();
        self.set_stroke_style_str(color);
        self.set_line_width(width);
        self.set_line_dash(&pattern)?;
        self.begin_path();
        self.move_to(from.x, from.y);
        self.line_to(to.x, to.y);
        self.stroke();
        self.restore();
        Ok(())
    }

    fn outlined_text(&mut self, text: &str, at: Point, fill: &str, outline: &str) -> Result<(), JsValue> {
        self.save();
        self.set_font(LABEL_FONT);
        self.set_text_align("center");
        self.set_text_baseline("bottom");
        self.set_line_width(LABEL_OUTLINE_PX);
        self.set_stroke_style_str(outline);
        self.stroke_text(text, at.x, at.y)?;
        self.set_fill_style_str(fill);
        self.fill_text(text, at.x, at.y)?;
        self.restore();
        Ok(())
    }
}
