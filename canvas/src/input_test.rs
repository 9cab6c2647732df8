use super::*;

/// Source that reports its first recorded point, if any.
struct FirstPoint {
    points: Vec<Point>,
}

impl PointerSource for FirstPoint {
    fn client_point(&self) -> Option<Point> {
        self.points.first().copied()
    }
}

/// Base event with an inherent `button()` of a different type, shaped like
/// `web_sys::MouseEvent`.
struct RawMouse {
    at: Point,
    code: i16,
}

impl RawMouse {
    fn button(&self) -> i16 {
        self.code
    }
}

impl PointerSource for RawMouse {
    fn client_point(&self) -> Option<Point> {
        Some(self.at)
    }

    fn button(&self) -> Button {
        Button::from_dom(RawMouse::button(self))
    }
}

/// Derived event that derefs to its base, shaped like `web_sys::PointerEvent`.
struct RawPointer(RawMouse);

impl std::ops::Deref for RawPointer {
    type Target = RawMouse;

    fn deref(&self) -> &RawMouse {
        &self.0
    }
}

impl PointerSource for RawPointer {
    fn client_point(&self) -> Option<Point> {
        PointerSource::client_point(&**self)
    }

    fn button(&self) -> Button {
        PointerSource::button(&**self)
    }
}

fn read<P: PointerSource + ?Sized>(source: &P) -> (Option<Point>, Button) {
    (source.client_point(), source.button())
}

// =============================================================
// PointerSource
// =============================================================

#[test]
fn point_is_its_own_pointer_source() {
    let p = Point::new(12.0, 34.0);
    assert_eq!(p.client_point(), Some(p));
}

#[test]
fn default_button_is_primary() {
    assert_eq!(Point::new(0.0, 0.0).button(), Button::Primary);
}

#[test]
fn source_without_points_reports_none() {
    let source = FirstPoint { points: Vec::new() };
    assert!(source.client_point().is_none());
}

#[test]
fn source_reports_first_point() {
    let source = FirstPoint { points: vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)] };
    assert_eq!(source.client_point(), Some(Point::new(1.0, 2.0)));
}

#[test]
fn source_without_button_override_is_primary() {
    let source = FirstPoint { points: vec![Point::new(1.0, 2.0)] };
    assert_eq!(source.button(), Button::Primary);
}

#[test]
fn derived_event_delegates_to_base_trait_impl() {
    let ev = RawPointer(RawMouse { at: Point::new(5.0, 6.0), code: 2 });
    assert_eq!(ev.client_point(), Some(Point::new(5.0, 6.0)));
    assert_eq!(ev.button(), Button::Secondary);
}

#[test]
fn derived_event_reads_the_same_through_dyn_and_generic() {
    let ev = RawPointer(RawMouse { at: Point::new(7.0, 8.0), code: 1 });
    let dynamic: &dyn PointerSource = &ev;
    assert_eq!(read(dynamic), (Some(Point::new(7.0, 8.0)), Button::Middle));
    assert_eq!(read(&ev), read(&*ev));
}

// =============================================================
// Button
// =============================================================

#[test]
fn button_from_dom_codes() {
    assert_eq!(Button::from_dom(0), Button::Primary);
    assert_eq!(Button::from_dom(1), Button::Middle);
    assert_eq!(Button::from_dom(2), Button::Secondary);
}

#[test]
fn button_from_unknown_dom_code_is_primary() {
    assert_eq!(Button::from_dom(4), Button::Primary);
    assert_eq!(Button::from_dom(-1), Button::Primary);
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
}

#[test]
fn idle_grabs_nothing() {
    assert!(InputState::Idle.grabbed().is_none());
}

#[test]
fn dragging_reports_grabbed_marker() {
    let state = InputState::DraggingMarker { id: MarkerId::PointB, moved: false };
    assert_eq!(state.grabbed(), Some(MarkerId::PointB));
}

#[test]
fn input_state_debug_format() {
    let s = format!("{:?}", InputState::DraggingMarker { id: MarkerId::PointA, moved: true });
    assert!(s.contains("DraggingMarker"));
    assert!(s.contains("PointA"));
}
