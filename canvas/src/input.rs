//! Input model: pointer extraction, mouse buttons, and the drag state machine.
//!
//! Mouse, pointer and touch events are unified behind [`PointerSource`], which
//! yields client coordinates and nothing else. The drag algorithm in
//! [`crate::engine`] only ever sees those coordinates, so it is the same on
//! every platform binding.
//!
//! [`InputState`] holds the one active gesture. Only a single marker can be
//! grabbed at a time; the state is set on pointer-down and cleared on
//! pointer-up or pointer-leave within the same synchronous handler.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::coords::Point;
use crate::markers::MarkerId;

/// Anything that can report where the pointer is in client space.
pub trait PointerSource {
    /// Client-space pointer position, or `None` if the event carries none
    /// (e.g. a touch event with an empty touch list).
    fn client_point(&self) -> Option<Point>;

    /// Which button initiated the event. Touches count as [`Button::Primary`].
    fn button(&self) -> Button {
        Button::Primary
    }
}

impl PointerSource for Point {
    fn client_point(&self) -> Option<Point> {
        Some(*self)
    }
}

impl PointerSource for web_sys::MouseEvent {
    fn client_point(&self) -> Option<Point> {
        Some(Point::new(f64::from(self.client_x()), f64::from(self.client_y())))
    }

    fn button(&self) -> Button {
        Button::from_dom(self.button())
    }
}

impl PointerSource for web_sys::PointerEvent {
    fn client_point(&self) -> Option<Point> {
        PointerSource::client_point(&**self)
    }

    fn button(&self) -> Button {
        PointerSource::button(&**self)
    }
}

impl PointerSource for web_sys::TouchEvent {
    /// First active touch, falling back to the changed touches so that
    /// `touchend` still reports where the finger lifted.
    fn client_point(&self) -> Option<Point> {
        self.touches()
            .get(0)
            .or_else(|| self.changed_touches().get(0))
            .map(|t| Point::new(f64::from(t.client_x()), f64::from(t.client_y())))
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// State of the drag state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A marker is grabbed and follows the pointer.
    DraggingMarker {
        /// The grabbed marker.
        id: MarkerId,
        /// Whether any pointer-move has repositioned the marker yet.
        moved: bool,
    },
}

impl InputState {
    /// The grabbed marker, if a drag is in progress.
    #[must_use]
    pub fn grabbed(self) -> Option<MarkerId> {
        match self {
            Self::Idle => None,
            Self::DraggingMarker { id, .. } => Some(id),
        }
    }
}
