//! # Polygon Plane
//!
//! Plane representation with signed distances, derived per polygon.

use config::constants::NORMAL_LENGTH_EPSILON;
use glam::DVec3;
use serde::{Deserialize, Serialize};

// =============================================================================
// PLANE
// =============================================================================

/// A plane in 3D space defined by a unit normal and its distance from the
/// origin along that normal.
///
/// Points with `normal.dot(p) > distance` are in front of the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Unit normal vector pointing out of the brush.
    pub normal: DVec3,
    /// Distance from origin along normal.
    pub distance: f64,
}

impl Plane {
    /// Create plane from normal and distance.
    pub fn new(normal: DVec3, distance: f64) -> Self {
        Self { normal, distance }
    }

    /// Create plane from three points.
    ///
    /// Points should be in counter-clockwise order when viewed from front.
    /// Returns `None` for collinear or coincident points.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let normal = (b - a).cross(c - a);
        let length = normal.length();
        if length < NORMAL_LENGTH_EPSILON || !length.is_finite() {
            return None;
        }
        let normal = normal / length;
        Some(Self {
            normal,
            distance: normal.dot(a),
        })
    }

    /// Create the plane of a polygon boundary from its first three
    /// non-collinear vertices.
    ///
    /// The boundary is walked in order: the first vertex, the first vertex
    /// that differs from it, then the first vertex that is not collinear
    /// with those two.
    pub fn from_boundary(points: &[DVec3]) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        let second_index = rest
            .iter()
            .position(|p| (*p - first).length_squared() > NORMAL_LENGTH_EPSILON)?;
        let second = rest[second_index];
        rest[second_index + 1..]
            .iter()
            .find_map(|&third| Self::from_points(first, second, third))
    }

    /// Flip the plane (reverse normal).
    pub fn flip(&self) -> Plane {
        Plane {
            normal: -self.normal,
            distance: -self.distance,
        }
    }

    /// Signed distance from point to plane.
    ///
    /// Positive = front, negative = back, zero = on plane.
    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.distance
    }
}

// =============================================================================
// TESTS
// =============================================================================
