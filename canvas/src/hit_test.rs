use super::*;

const RADIUS: f64 = 20.0;

fn surface() -> SurfaceSize {
    SurfaceSize::new(400.0, 300.0)
}

/// Normalized point for a surface pixel position.
fn at_px(x: f64, y: f64) -> Point {
    Point::new(x / 400.0, y / 300.0)
}

fn set_px(markers: &mut MarkerSet, id: MarkerId, x: f64, y: f64) {
    let p = at_px(x, y);
    markers.set_position(id, p.x, p.y);
}

fn spread_markers() -> MarkerSet {
    let mut m = MarkerSet::new();
    set_px(&mut m, MarkerId::ReferenceLeft, 100.0, 200.0);
    set_px(&mut m, MarkerId::ReferenceRight, 300.0, 200.0);
    set_px(&mut m, MarkerId::PointA, 150.0, 100.0);
    set_px(&mut m, MarkerId::PointB, 250.0, 100.0);
    m
}

// =============================================================
// Direct hits
// =============================================================

#[test]
fn exact_center_hits_marker() {
    let m = spread_markers();
    let hit = hit_test(at_px(150.0, 100.0), &m, surface(), RADIUS);
    assert_eq!(hit.map(|h| h.marker), Some(MarkerId::PointA));
}

#[test]
fn hit_reports_pixel_distance() {
    let m = spread_markers();
    let hit = hit_test(at_px(253.0, 104.0), &m, surface(), RADIUS);
    assert!(hit.is_some_and(|h| h.marker == MarkerId::PointB && (h.distance_px - 5.0).abs() < 1e-9));
}

#[test]
fn inside_radius_hits() {
    let m = spread_markers();
    let hit = hit_test(at_px(119.0, 200.0), &m, surface(), RADIUS);
    assert_eq!(hit.map(|h| h.marker), Some(MarkerId::ReferenceLeft));
}

#[test]
fn outside_radius_misses() {
    let m = spread_markers();
    assert!(hit_test(at_px(121.0, 200.0), &m, surface(), RADIUS).is_none());
}

#[test]
fn empty_area_misses() {
    let m = spread_markers();
    assert!(hit_test(at_px(200.0, 20.0), &m, surface(), RADIUS).is_none());
}

#[test]
fn radius_measured_in_pixels_not_normalized_units() {
    // 15px right on a wide surface is a small normalized offset but still a hit;
    // the same normalized offset on a narrow surface is farther in pixels.
    let m = spread_markers();
    let wide = SurfaceSize::new(400.0, 300.0);
    let narrow = SurfaceSize::new(4000.0, 300.0);
    let probe = at_px(165.0, 100.0);
    assert!(hit_test(probe, &m, wide, RADIUS).is_some());
    assert!(hit_test(probe, &m, narrow, RADIUS).is_none());
}

// =============================================================
// Selection among candidates
// =============================================================

#[test]
fn nearest_of_two_overlapping_markers_wins() {
    let mut m = spread_markers();
    set_px(&mut m, MarkerId::PointA, 200.0, 150.0);
    set_px(&mut m, MarkerId::PointB, 210.0, 150.0);
    let hit = hit_test(at_px(208.0, 150.0), &m, surface(), RADIUS);
    assert_eq!(hit.map(|h| h.marker), Some(MarkerId::PointB));
}

#[test]
fn coincident_markers_tie_breaks_by_enumeration_order() {
    let mut m = spread_markers();
    set_px(&mut m, MarkerId::ReferenceRight, 200.0, 150.0);
    set_px(&mut m, MarkerId::PointA, 200.0, 150.0);
    let hit = hit_test(at_px(200.0, 150.0), &m, surface(), RADIUS);
    assert_eq!(hit.map(|h| h.marker), Some(MarkerId::ReferenceRight));
}

#[test]
fn empty_surface_never_hits() {
    let m = spread_markers();
    assert!(hit_test(Point::new(0.25, 0.6667), &m, SurfaceSize::default(), RADIUS).is_none());
}

#[test]
fn zero_radius_only_hits_exact_center() {
    let m = spread_markers();
    assert!(hit_test(at_px(150.0, 100.0), &m, surface(), 0.0).is_some());
    assert!(hit_test(at_px(150.5, 100.0), &m, surface(), 0.0).is_none());
}
