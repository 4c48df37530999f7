//! # Tests for Config Constants
//!
//! Unit tests verifying the relationships between the tolerances.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_duplicate_epsilon_smaller_than_collapse_epsilon() {
    assert!(
        DUPLICATE_VERTEX_EPSILON_SQR < COLLAPSED_CORNER_EPSILON_SQR,
        "duplicate vertices must be rarer than collapsed corners"
    );
}

#[test]
fn test_planarity_matches_validator() {
    // A quad accepted as planar by the builder must pass the validator
    assert!(QUAD_PLANARITY_EPSILON <= PLANE_DISTANCE_EPSILON);
}

#[test]
fn test_min_volume_is_small() {
    assert!(MIN_BRUSH_VOLUME > 0.0);
    assert!(MIN_BRUSH_VOLUME < 1.0e-6);
}

// =============================================================================
// SWEEP TESTS
// =============================================================================

#[test]
fn test_segments_for_angle_minimum_one() {
    assert_eq!(segments_for_angle(0.0), 1);
    assert_eq!(segments_for_angle(-10.0), 1);
    assert_eq!(segments_for_angle(f64::NAN), 1);
}

#[test]
fn test_segments_for_angle_is_monotonic() {
    let mut previous = 0;
    for step in 0..=360 {
        let segments = segments_for_angle(step as f64 * 0.5);
        assert!(segments >= previous);
        previous = segments;
    }
}

#[test]
fn test_default_curve_segments_positive() {
    assert!(DEFAULT_CURVE_SEGMENTS > 0);
}

// =============================================================================
// STAIRS TESTS
// =============================================================================

#[test]
fn test_spiral_step_angle_limit() {
    assert!(MAX_SPIRAL_STEP_ANGLE_DEGREES > 0.0);
    assert!(MAX_SPIRAL_STEP_ANGLE_DEGREES < 180.0);
}

#[test]
fn test_cylinder_segment_bounds() {
    assert!(MIN_CYLINDER_SEGMENTS >= 3);
    assert!(MAX_CYLINDER_SEGMENTS >= MIN_CYLINDER_SEGMENTS);
}

#[test]
fn test_step_minimums_positive() {
    assert!(MIN_STEP_HEIGHT > 0.0);
    assert!(MIN_STEP_DEPTH > 0.0);
    assert!(STAIRS_EPSILON < MIN_STEP_HEIGHT);
}
