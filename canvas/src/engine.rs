use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageBitmap};

use crate::config::MeasureConfig;
use crate::coords::{ClientRect, Point, SurfaceSize};
use crate::hit::hit_test;
use crate::ingest::{IngestError, SourceImage};
use crate::input::{Button, InputState, PointerSource};
use crate::markers::{Marker, MarkerId, MarkerPair, MarkerSet};
use crate::measure::{self, CalibrationReference, MeasureError, MeasurementResult};
use crate::render;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

const CURSOR_DEFAULT: &str = "default";
const CURSOR_GRAB: &str = "grab";
const CURSOR_GRABBING: &str = "grabbing";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The scene changed; call [`Engine::render`].
    RenderNeeded,
    /// Set the CSS cursor on the canvas element.
    SetCursor(String),
    /// A displayed result (and the inline message next to it) is stale.
    ResultCleared,
}

/// Workflow position of the tool session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    /// No photo yet.
    #[default]
    Upload,
    /// Photo loaded; markers are editable.
    Annotate,
    /// A result is on display.
    Result,
}

/// Serializable view of the session for the page shell.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub stage: Stage,
    pub image: Option<SourceImage>,
    pub surface: SurfaceSize,
    pub markers: [Marker; 4],
    pub reference_width_mm: f64,
    pub result: Option<MeasurementResult>,
    pub warning: Option<String>,
    pub error: Option<String>,
    pub error_pair: Option<MarkerPair>,
}

/// Core engine state: everything that does not need the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub config: MeasureConfig,
    pub markers: MarkerSet,
    pub input: InputState,
    /// Displayed image bounds in CSS pixels; the surface is sized to match.
    pub surface: SurfaceSize,
    pub image: Option<SourceImage>,
    pub reference: CalibrationReference,
    pub result: Option<MeasurementResult>,
    pub last_error: Option<MeasureError>,
    pub stage: Stage,
    hovered: Option<MarkerId>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(MeasureConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: MeasureConfig) -> Self {
        let reference = CalibrationReference::default_for(&config);
        Self {
            config,
            markers: MarkerSet::new(),
            input: InputState::default(),
            surface: SurfaceSize::default(),
            image: None,
            reference,
            result: None,
            last_error: None,
            stage: Stage::Upload,
            hovered: None,
        }
    }

    // --- Image lifecycle ---

    /// Make `image` the working photo, displayed at `displayed` bounds.
    ///
    /// Markers return to their seeds and any result or error is dropped. The
    /// reference width is kept.
    pub fn load_image(&mut self, image: SourceImage, displayed: SurfaceSize) -> Vec<Action> {
        let had_result = self.result.is_some();
        self.markers.reset();
        self.input = InputState::Idle;
        self.hovered = None;
        self.result = None;
        self.last_error = None;
        self.image = Some(image);
        self.surface = displayed;
        self.set_stage(Stage::Annotate);
        log::debug!(
            "loaded {}x{} photo, displayed at {:.0}x{:.0}",
            image.natural_width,
            image.natural_height,
            displayed.width,
            displayed.height
        );

        let mut actions = vec![Action::SetCursor(CURSOR_DEFAULT.into())];
        if had_result {
            actions.push(Action::ResultCleared);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Record a rejected upload. State is left untouched.
    pub fn reject_upload(&self, err: &IngestError) {
        log::warn!("upload rejected: {err}");
    }

    /// Follow a change in displayed bounds. Normalized marker positions are
    /// unaffected.
    pub fn set_surface_size(&mut self, size: SurfaceSize) -> Vec<Action> {
        if size == self.surface {
            return Vec::new();
        }
        self.surface = size;
        vec![Action::RenderNeeded]
    }

    /// Back to the upload stage with a fresh session.
    pub fn reset(&mut self) -> Vec<Action> {
        let had_result = self.result.is_some();
        *self = Self::new(self.config.clone());
        log::debug!("session reset");

        let mut actions = vec![Action::SetCursor(CURSOR_DEFAULT.into())];
        if had_result {
            actions.push(Action::ResultCleared);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Reference width ---

    /// Replace the reference width.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidReferenceWidth`] and keeps the previous
    /// width when `width_mm` is outside the configured bounds.
    pub fn set_reference_width(&mut self, width_mm: f64) -> Result<Vec<Action>, MeasureError> {
        let reference = CalibrationReference::new(width_mm, &self.config)?;
        if reference == self.reference {
            return Ok(Vec::new());
        }
        self.reference = reference;
        Ok(self.invalidate_result())
    }

    // --- Input events ---

    /// Start a drag if `client` lands on a marker.
    ///
    /// Ignored with no photo loaded, for non-primary buttons, and while a drag
    /// is already active (a second finger does not steal the marker).
    pub fn on_pointer_down(&mut self, client: Point, rect: ClientRect, button: Button) -> Vec<Action> {
        if self.image.is_none() || button != Button::Primary || self.input.grabbed().is_some() {
            return Vec::new();
        }
        let Some(normalized) = rect.to_normalized(client) else {
            return Vec::new();
        };
        let Some(hit) = hit_test(normalized, &self.markers, self.surface, self.config.hit_radius_px) else {
            return Vec::new();
        };

        self.input = InputState::DraggingMarker { id: hit.marker, moved: false };
        self.hovered = Some(hit.marker);
        log::debug!("drag start: {:?} ({:.1}px from center)", hit.marker, hit.distance_px);
        vec![Action::SetCursor(CURSOR_GRABBING.into())]
    }

    /// Move the grabbed marker, or update hover feedback while idle.
    pub fn on_pointer_move(&mut self, client: Point, rect: ClientRect) -> Vec<Action> {
        let normalized = rect.to_normalized(client);
        match self.input {
            InputState::DraggingMarker { id, .. } => {
                let Some(p) = normalized else {
                    return Vec::new();
                };
                self.markers.set_position(id, p.x, p.y);
                self.input = InputState::DraggingMarker { id, moved: true };
                let mut actions = self.invalidate_result();
                actions.push(Action::RenderNeeded);
                actions
            }
            InputState::Idle => {
                if self.image.is_none() {
                    return Vec::new();
                }
                let over = normalized
                    .and_then(|p| hit_test(p, &self.markers, self.surface, self.config.hit_radius_px))
                    .map(|hit| hit.marker);
                if over == self.hovered {
                    return Vec::new();
                }
                self.hovered = over;
                let cursor = if over.is_some() { CURSOR_GRAB } else { CURSOR_DEFAULT };
                vec![Action::SetCursor(cursor.into())]
            }
        }
    }

    /// End the drag. The pointer is still over the released marker.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        match self.end_drag() {
            Some(id) => {
                self.hovered = Some(id);
                vec![Action::SetCursor(CURSOR_GRAB.into())]
            }
            None => Vec::new(),
        }
    }

    /// End the drag because the pointer left the surface.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        let was_dragging = self.end_drag().is_some();
        let was_hovering = self.hovered.take().is_some();
        if was_dragging || was_hovering {
            vec![Action::SetCursor(CURSOR_DEFAULT.into())]
        } else {
            Vec::new()
        }
    }

    // --- Measurement ---

    /// Measure the current marker layout and record the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::NoImageLoaded`] before the first upload, and
    /// otherwise whatever [`measure::calculate`] reports. The error is also
    /// kept as [`Self::last_error`].
    pub fn calculate(&mut self) -> Result<MeasurementResult, MeasureError> {
        let outcome = if self.image.is_none() {
            Err(MeasureError::NoImageLoaded)
        } else {
            measure::calculate(&self.markers, self.reference, self.surface, &self.config)
        };

        match &outcome {
            Ok(result) => {
                self.result = Some(*result);
                self.last_error = None;
                self.set_stage(Stage::Result);
                if let Some(warning) = result.warning() {
                    log::warn!("{warning}");
                }
            }
            Err(err) => {
                log::warn!("calculation failed: {err}");
                self.result = None;
                self.last_error = Some(err.clone());
                if self.stage == Stage::Result {
                    self.set_stage(Stage::Annotate);
                }
            }
        }
        outcome
    }

    /// Leave the result view and return to marker editing. Markers are kept.
    pub fn remeasure(&mut self) -> Vec<Action> {
        self.last_error = None;
        self.invalidate_result()
    }

    // --- Queries ---

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn result(&self) -> Option<MeasurementResult> {
        self.result
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&MeasureError> {
        self.last_error.as_ref()
    }

    /// The marker currently being dragged, if any.
    #[must_use]
    pub fn grabbed(&self) -> Option<MarkerId> {
        self.input.grabbed()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            stage: self.stage,
            image: self.image,
            surface: self.surface,
            markers: self.markers.markers(),
            reference_width_mm: self.reference.width_mm(),
            result: self.result,
            warning: self.result.and_then(|r| r.warning()).map(|w| w.to_string()),
            error: self.last_error.as_ref().map(ToString::to_string),
            error_pair: self.last_error.as_ref().and_then(MeasureError::pair),
        }
    }

    // --- Internals ---

    fn set_stage(&mut self, stage: Stage) {
        if self.stage != stage {
            log::debug!("stage {:?} -> {:?}", self.stage, stage);
            self.stage = stage;
        }
    }

    fn end_drag(&mut self) -> Option<MarkerId> {
        let InputState::DraggingMarker { id, moved } = self.input else {
            return None;
        };
        self.input = InputState::Idle;
        log::debug!("drag end: {id:?} (moved: {moved})");
        Some(id)
    }

    /// Drop a displayed result after an input it depended on changed.
    fn invalidate_result(&mut self) -> Vec<Action> {
        if self.result.take().is_none() {
            return Vec::new();
        }
        self.set_stage(Stage::Annotate);
        vec![Action::ResultCleared]
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    bitmap: Option<ImageBitmap>,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    ///
    /// # Errors
    ///
    /// Fails if the canvas cannot provide a 2D rendering context.
    pub fn new(canvas: HtmlCanvasElement, config: MeasureConfig) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx, bitmap: None, core: EngineCore::new(config) })
    }

    // --- Image lifecycle ---

    /// Adopt a decoded bitmap as the working photo, fitted into the container.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::EmptyImage`] for a zero-sized bitmap; the
    /// previous photo stays in place.
    pub fn load_bitmap(
        &mut self,
        bitmap: ImageBitmap,
        max_width: f64,
        max_height: Option<f64>,
    ) -> Result<Vec<Action>, IngestError> {
        let image = match SourceImage::new(bitmap.width(), bitmap.height()) {
            Ok(image) => image,
            Err(err) => {
                bitmap.close();
                self.core.reject_upload(&err);
                return Err(err);
            }
        };
        if let Some(old) = self.bitmap.replace(bitmap) {
            old.close();
        }
        let displayed = image.fit_within(max_width, max_height);
        Ok(self.core.load_image(image, displayed))
    }

    /// Refit the photo after the container changed size.
    pub fn resize(&mut self, max_width: f64, max_height: Option<f64>) -> Vec<Action> {
        match self.core.image {
            Some(image) => self.core.set_surface_size(image.fit_within(max_width, max_height)),
            None => Vec::new(),
        }
    }

    pub fn reset(&mut self) -> Vec<Action> {
        if let Some(old) = self.bitmap.take() {
            old.close();
        }
        self.core.reset()
    }

    // --- Input events ---

    pub fn on_pointer_down<P: PointerSource + ?Sized>(&mut self, event: &P) -> Vec<Action> {
        let Some(client) = event.client_point() else {
            return Vec::new();
        };
        let rect = self.client_rect();
        self.core.on_pointer_down(client, rect, event.button())
    }

    pub fn on_pointer_move<P: PointerSource + ?Sized>(&mut self, event: &P) -> Vec<Action> {
        let Some(client) = event.client_point() else {
            return Vec::new();
        };
        let rect = self.client_rect();
        self.core.on_pointer_move(client, rect)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.core.on_pointer_up()
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    fn client_rect(&self) -> ClientRect {
        let r = self.canvas.get_bounding_client_rect();
        ClientRect::new(r.left(), r.top(), r.width(), r.height())
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Propagates any error thrown by the 2D context.
    pub fn render(&mut self) -> Result<(), JsValue> {
        render::draw(&mut self.ctx, self.bitmap.as_ref(), &self.core.markers, self.core.surface)
    }

    // --- Delegated operations ---

    /// See [`EngineCore::set_reference_width`].
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidReferenceWidth`] for out-of-bounds widths.
    pub fn set_reference_width(&mut self, width_mm: f64) -> Result<Vec<Action>, MeasureError> {
        self.core.set_reference_width(width_mm)
    }

    /// See [`EngineCore::calculate`].
    ///
    /// # Errors
    ///
    /// Returns the [`MeasureError`] that blocked the calculation.
    pub fn calculate(&mut self) -> Result<MeasurementResult, MeasureError> {
        self.core.calculate()
    }

    pub fn remeasure(&mut self) -> Vec<Action> {
        self.core.remeasure()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.core.snapshot()
    }
}
