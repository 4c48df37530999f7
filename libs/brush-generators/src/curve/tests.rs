//! Tests for curve sampling.

use super::*;
use approx::assert_abs_diff_eq;

fn smooth_circle(radius: f64) -> Curve2D {
    // Four-point circle approximation; handle length k * r.
    let k = 0.552_284_749_8 * radius;
    Curve2D::new(vec![
        ControlPoint::smooth(DVec2::new(radius, 0.0), DVec2::new(0.0, k)),
        ControlPoint::smooth(DVec2::new(0.0, radius), DVec2::new(-k, 0.0)),
        ControlPoint::smooth(DVec2::new(-radius, 0.0), DVec2::new(0.0, -k)),
        ControlPoint::smooth(DVec2::new(0.0, -radius), DVec2::new(k, 0.0)),
    ])
}

#[test]
fn straight_square_samples_one_point_per_edge() {
    let square = Curve2D::from_points(&[
        DVec2::new(0.0, 0.0),
        DVec2::new(2.0, 0.0),
        DVec2::new(2.0, 2.0),
        DVec2::new(0.0, 2.0),
    ]);
    let profile = square.sample(8);

    assert_eq!(profile.len(), 4);
    assert_eq!(profile.segments, vec![0, 1, 2, 3]);
    assert_eq!(profile.points[2], DVec2::new(2.0, 2.0));
}

#[test]
fn zero_segments_bypasses_bezier() {
    let profile = smooth_circle(1.0).sample(0);
    assert_eq!(profile.len(), 4);
    assert_eq!(profile.segments, vec![0, 1, 2, 3]);
}

#[test]
fn bezier_edges_emit_segment_count_points() {
    let profile = smooth_circle(1.0).sample(6);

    assert_eq!(profile.len(), 24);
    for (k, segment) in profile.segments.iter().enumerate() {
        assert_eq!(*segment, k / 6);
    }
    // First sample of every edge is the edge start point.
    assert_eq!(profile.points[0], DVec2::new(1.0, 0.0));
    assert_eq!(profile.points[6], DVec2::new(0.0, 1.0));
}

#[test]
fn bezier_samples_lie_near_circle() {
    let profile = smooth_circle(2.0).sample(16);
    for point in &profile.points {
        assert_abs_diff_eq!(point.length(), 2.0, epsilon = 2.0e-3);
    }
    assert_abs_diff_eq!(
        profile.signed_area(),
        std::f64::consts::PI * 4.0,
        epsilon = 0.05
    );
}

#[test]
fn one_bezier_side_bends_the_edge() {
    let mut points = vec![
        ControlPoint::straight(DVec2::new(0.0, 0.0)),
        ControlPoint::straight(DVec2::new(4.0, 0.0)),
        ControlPoint::straight(DVec2::new(0.0, 4.0)),
    ];
    // Outgoing handle of point 0 pulls the first edge downwards.
    points[0].constraint2 = ControlPointConstraint::Bezier;
    points[0].tangent2 = DVec2::new(0.0, 2.0);

    let profile = Curve2D::new(points).sample(4);

    assert_eq!(profile.len(), 4 + 1 + 1);
    assert_eq!(&profile.segments[..4], &[0, 0, 0, 0]);
    assert!(profile.points[1].y < 0.0);
    assert!(profile.points[2].y < 0.0);
}

#[test]
fn cubic_bezier_endpoints() {
    let p0 = DVec2::new(0.0, 0.0);
    let p3 = DVec2::new(3.0, 1.0);
    let a = DVec2::new(1.0, 5.0);
    let b = DVec2::new(2.0, -5.0);
    assert_eq!(cubic_bezier(p0, a, b, p3, 0.0), p0);
    assert_eq!(cubic_bezier(p0, a, b, p3, 1.0), p3);
}

#[test]
fn rectangle_is_counter_clockwise() {
    let rectangle = Curve2D::rectangle(DVec2::new(-1.0, -2.0), DVec2::new(1.0, 2.0));
    assert_eq!(rectangle.len(), 4);
    assert_abs_diff_eq!(rectangle.signed_area(), 8.0);
}

#[test]
fn sampling_is_deterministic() {
    let curve = smooth_circle(3.0);
    assert_eq!(curve.sample(7), curve.sample(7));
}
