#![allow(clippy::float_cmp)]

use super::*;

fn in_bounds(p: Point) -> bool {
    let lo = CLAMP_MARGIN;
    let hi = 1.0 - CLAMP_MARGIN;
    (lo..=hi).contains(&p.x) && (lo..=hi).contains(&p.y)
}

// =============================================================
// MarkerId / MarkerPair
// =============================================================

#[test]
fn all_ids_distinct() {
    for (i, a) in MarkerId::ALL.iter().enumerate() {
        for (j, b) in MarkerId::ALL.iter().enumerate() {
            if i == j {
                assert_eq!(a, b);
            } else {
                assert_ne!(a, b);
            }
        }
    }
}

#[test]
fn reference_ids_belong_to_calibration_pair() {
    assert_eq!(MarkerId::ReferenceLeft.pair(), MarkerPair::Calibration);
    assert_eq!(MarkerId::ReferenceRight.pair(), MarkerPair::Calibration);
}

#[test]
fn point_ids_belong_to_measurement_pair() {
    assert_eq!(MarkerId::PointA.pair(), MarkerPair::Measurement);
    assert_eq!(MarkerId::PointB.pair(), MarkerPair::Measurement);
}

#[test]
fn pair_members_round_trip_through_pair() {
    for pair in [MarkerPair::Calibration, MarkerPair::Measurement] {
        let (a, b) = pair.members();
        assert_eq!(a.pair(), pair);
        assert_eq!(b.pair(), pair);
        assert_ne!(a, b);
    }
}

#[test]
fn pairs_have_distinct_colors() {
    assert_ne!(MarkerPair::Calibration.color(), MarkerPair::Measurement.color());
}

#[test]
fn labels_are_non_empty_and_distinct() {
    let labels = MarkerId::ALL.map(MarkerId::label);
    for (i, a) in labels.iter().enumerate() {
        assert!(!a.is_empty());
        for b in &labels[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn marker_id_serializes_camel_case() {
    let json = serde_json::to_string(&MarkerId::ReferenceLeft).unwrap();
    assert_eq!(json, "\"referenceLeft\"");
    let parsed: MarkerId = serde_json::from_str("\"pointB\"").unwrap();
    assert_eq!(parsed, MarkerId::PointB);
}

// =============================================================
// Seeds
// =============================================================

#[test]
fn seeds_within_clamp_bounds() {
    for id in MarkerId::ALL {
        assert!(in_bounds(id.seed()), "{id:?} seed out of bounds");
    }
}

#[test]
fn calibration_seed_below_measurement_seed() {
    assert!(MarkerId::ReferenceLeft.seed().y > MarkerId::PointA.seed().y);
}

#[test]
fn measurement_seed_pair_closer_than_calibration_pair() {
    let cal = MarkerId::ReferenceLeft.seed().distance_to(MarkerId::ReferenceRight.seed());
    let meas = MarkerId::PointA.seed().distance_to(MarkerId::PointB.seed());
    assert!(meas < cal);
}

#[test]
fn seed_pairs_centered_horizontally() {
    for pair in [MarkerPair::Calibration, MarkerPair::Measurement] {
        let (a, b) = pair.members();
        let mid = (a.seed().x + b.seed().x) / 2.0;
        assert!((mid - 0.5).abs() < 1e-12);
    }
}

// =============================================================
// MarkerSet
// =============================================================

#[test]
fn new_set_has_four_markers() {
    let set = MarkerSet::new();
    let ids = set.markers().map(|m| m.id);
    assert_eq!(ids, MarkerId::ALL);
}

#[test]
fn new_set_is_at_seed_positions() {
    let set = MarkerSet::new();
    for id in MarkerId::ALL {
        assert_eq!(set.position(id), id.seed());
    }
}

#[test]
fn set_position_overwrites_only_target() {
    let mut set = MarkerSet::new();
    set.set_position(MarkerId::PointA, 0.25, 0.75);
    assert_eq!(set.position(MarkerId::PointA), Point::new(0.25, 0.75));
    assert_eq!(set.position(MarkerId::PointB), MarkerId::PointB.seed());
    assert_eq!(set.position(MarkerId::ReferenceLeft), MarkerId::ReferenceLeft.seed());
}

#[test]
fn set_position_clamps_far_off_canvas() {
    let mut set = MarkerSet::new();
    set.set_position(MarkerId::ReferenceRight, -5.0, 17.0);
    let p = set.position(MarkerId::ReferenceRight);
    assert_eq!(p, Point::new(CLAMP_MARGIN, 1.0 - CLAMP_MARGIN));
}

#[test]
fn set_position_clamps_just_outside_unit_square() {
    let mut set = MarkerSet::new();
    for (x, y) in [(0.0, 0.0), (1.0, 1.0), (0.01, 0.99), (1.5, -0.5)] {
        set.set_position(MarkerId::PointB, x, y);
        assert!(in_bounds(set.position(MarkerId::PointB)), "({x}, {y}) escaped clamp");
    }
}

#[test]
fn set_position_non_finite_stays_in_bounds() {
    let mut set = MarkerSet::new();
    set.set_position(MarkerId::PointA, f64::NAN, f64::INFINITY);
    let p = set.position(MarkerId::PointA);
    assert!(in_bounds(p));
    assert_eq!(p.x, CLAMP_MARGIN);
    assert_eq!(p.y, 1.0 - CLAMP_MARGIN);
}

#[test]
fn set_position_allows_overlap() {
    let mut set = MarkerSet::new();
    set.set_position(MarkerId::PointA, 0.5, 0.5);
    set.set_position(MarkerId::PointB, 0.5, 0.5);
    assert_eq!(set.position(MarkerId::PointA), set.position(MarkerId::PointB));
}

#[test]
fn pair_positions_returns_members_in_order() {
    let mut set = MarkerSet::new();
    set.set_position(MarkerId::ReferenceLeft, 0.1, 0.2);
    set.set_position(MarkerId::ReferenceRight, 0.3, 0.4);
    let (a, b) = set.pair_positions(MarkerPair::Calibration);
    assert_eq!(a, Point::new(0.1, 0.2));
    assert_eq!(b, Point::new(0.3, 0.4));
}

#[test]
fn markers_view_carries_pair_color_and_label() {
    let set = MarkerSet::new();
    for marker in set.markers() {
        assert_eq!(marker.color, marker.id.pair().color());
        assert_eq!(marker.label, marker.id.label());
        assert_eq!(marker.position, set.position(marker.id));
    }
}

#[test]
fn markers_view_in_enumeration_order() {
    let ids = MarkerSet::new().markers().map(|m| m.id);
    assert_eq!(ids, MarkerId::ALL);
}

#[test]
fn reset_restores_seeds() {
    let mut set = MarkerSet::new();
    for id in MarkerId::ALL {
        set.set_position(id, 0.9, 0.9);
    }
    set.reset();
    assert_eq!(set, MarkerSet::new());
}

#[test]
fn clamp_coord_identity_inside_bounds() {
    assert_eq!(clamp_coord(0.5), 0.5);
    assert_eq!(clamp_coord(CLAMP_MARGIN), CLAMP_MARGIN);
    assert_eq!(clamp_coord(1.0 - CLAMP_MARGIN), 1.0 - CLAMP_MARGIN);
}
