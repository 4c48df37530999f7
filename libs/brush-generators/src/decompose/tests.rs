//! Tests for convex decomposition.

use super::*;
use approx::assert_abs_diff_eq;

fn tags(count: usize) -> Vec<usize> {
    (0..count).collect()
}

fn assert_convex(polygon: &ConvexPolygon, counter_clockwise: bool) {
    let n = polygon.len();
    assert!(n >= 3);
    for i in 0..n {
        let a = polygon.vertices[(i + n - 1) % n];
        let b = polygon.vertices[i];
        let c = polygon.vertices[(i + 1) % n];
        let turn = (b - a).perp_dot(c - b);
        if counter_clockwise {
            assert!(turn > 0.0, "reflex vertex {i} in {polygon:?}");
        } else {
            assert!(turn < 0.0, "reflex vertex {i} in {polygon:?}");
        }
    }
}

/// Every tagged edge must run along the source edge it names.
fn assert_tags_follow_source(pieces: &[ConvexPolygon], points: &[DVec2]) {
    let n = points.len();
    for piece in pieces {
        let m = piece.len();
        for k in 0..m {
            if let Some(tag) = piece.segments[k] {
                assert_eq!(piece.vertices[k], points[tag]);
                assert_eq!(piece.vertices[(k + 1) % m], points[(tag + 1) % n]);
            }
        }
    }
}

fn l_shape() -> Vec<DVec2> {
    vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(2.0, 0.0),
        DVec2::new(2.0, 1.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(1.0, 2.0),
        DVec2::new(0.0, 2.0),
    ]
}

fn comb() -> Vec<DVec2> {
    vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(5.0, 0.0),
        DVec2::new(5.0, 3.0),
        DVec2::new(4.0, 3.0),
        DVec2::new(4.0, 1.0),
        DVec2::new(3.0, 1.0),
        DVec2::new(3.0, 3.0),
        DVec2::new(2.0, 3.0),
        DVec2::new(2.0, 1.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(1.0, 3.0),
        DVec2::new(0.0, 3.0),
    ]
}

#[test]
fn convex_square_stays_whole() {
    let points = vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(0.0, 1.0),
    ];
    let pieces = decompose(&points, &tags(4)).unwrap();

    assert_eq!(pieces.len(), 1);
    assert_eq!(pieces[0].len(), 4);
    assert!(pieces[0].segments.iter().all(Option::is_some));
    assert_tags_follow_source(&pieces, &points);
}

#[test]
fn l_shape_splits_in_two() {
    let points = l_shape();
    let pieces = decompose(&points, &tags(points.len())).unwrap();

    assert_eq!(pieces.len(), 2);
    for piece in &pieces {
        assert_convex(piece, true);
    }
    let diagonals: usize = pieces
        .iter()
        .map(|p| p.segments.iter().filter(|s| s.is_none()).count())
        .sum();
    assert_eq!(diagonals, 2);
    assert_tags_follow_source(&pieces, &points);
}

#[test]
fn every_source_edge_survives_once() {
    let points = comb();
    let pieces = decompose(&points, &tags(points.len())).unwrap();

    let mut seen: Vec<usize> = pieces
        .iter()
        .flat_map(|p| p.segments.iter().flatten().copied())
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, tags(points.len()));
}

#[test]
fn area_law_holds() {
    for points in [l_shape(), comb()] {
        let source_area = polygon_signed_area(&points);
        let pieces = decompose(&points, &tags(points.len())).unwrap();
        let total: f64 = pieces.iter().map(ConvexPolygon::signed_area).sum();
        assert_abs_diff_eq!(total, source_area, epsilon = 1e-9);
    }
}

#[test]
fn clockwise_input_keeps_winding_and_tags() {
    let mut points = comb();
    points.reverse();
    let pieces = decompose(&points, &tags(points.len())).unwrap();

    let total: f64 = pieces.iter().map(ConvexPolygon::signed_area).sum();
    assert_abs_diff_eq!(total, polygon_signed_area(&points), epsilon = 1e-9);
    assert!(total < 0.0);
    for piece in &pieces {
        assert_convex(piece, false);
    }
    assert_tags_follow_source(&pieces, &points);
}

#[test]
fn collinear_vertex_is_dropped() {
    let points = vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(2.0, 0.0),
        DVec2::new(2.0, 2.0),
        DVec2::new(0.0, 2.0),
    ];
    let pieces = decompose(&points, &tags(5)).unwrap();

    assert_eq!(pieces.len(), 1);
    assert_eq!(pieces[0].len(), 4);
    let bottom = pieces[0]
        .vertices
        .iter()
        .position(|v| *v == DVec2::new(0.0, 0.0))
        .unwrap();
    assert_eq!(pieces[0].segments[bottom], Some(0));
}

#[test]
fn duplicate_vertex_keeps_tag_of_real_edge() {
    let points = vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(0.0, 1.0),
    ];
    let pieces = decompose(&points, &tags(5)).unwrap();

    assert_eq!(pieces.len(), 1);
    let corner = pieces[0]
        .vertices
        .iter()
        .position(|v| *v == DVec2::new(1.0, 0.0))
        .unwrap();
    assert_eq!(pieces[0].segments[corner], Some(2));
}

#[test]
fn self_intersection_is_rejected() {
    let bowtie = vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(0.0, 1.0),
    ];
    assert!(matches!(
        decompose(&bowtie, &tags(4)),
        Err(DecomposeError::SelfIntersecting { .. })
    ));
}

#[test]
fn too_few_points_are_rejected() {
    let points = vec![DVec2::ZERO, DVec2::X, DVec2::X];
    assert_eq!(
        decompose(&points, &tags(3)),
        Err(DecomposeError::TooFewPoints { count: 2 })
    );

    let line = vec![DVec2::ZERO, DVec2::X, DVec2::X * 2.0];
    assert!(matches!(
        decompose(&line, &tags(3)),
        Err(DecomposeError::TooFewPoints { .. })
    ));
}

#[test]
fn mismatched_tags_are_rejected() {
    assert_eq!(
        decompose(&l_shape(), &tags(2)),
        Err(DecomposeError::MismatchedSegments {
            points: 6,
            segments: 2
        })
    );
}
