//! # Profile Curves
//!
//! Cyclic 2D control-point curves and their flattening into a polyline
//! that remembers which control-point edge produced each sample.
//!
//! ## Sampling rule
//!
//! For control-point edge `i -> i+1`:
//! - both sides `Straight`, or zero segments: one point (the edge start)
//! - otherwise `segments` cubic Bezier samples at `t = j / segments`
//!
//! Every emitted point is tagged `i`. A tag therefore labels the edge from
//! that point to the next one.

use glam::DVec2;
use serde::{Deserialize, Serialize};

// =============================================================================
// CONTROL POINTS
// =============================================================================

/// How one side of a control point shapes the adjacent curve segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlPointConstraint {
    /// Tangent is ignored; the segment is straight on this side.
    #[default]
    Straight,
    /// Tangent bends the segment.
    Bezier,
}

/// A curve vertex with independent incoming and outgoing tangents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    /// Vertex position.
    pub position: DVec2,
    /// Incoming tangent; the incoming Bezier handle is `position - tangent1`.
    pub tangent1: DVec2,
    /// Outgoing tangent; the outgoing Bezier handle is `position - tangent2`.
    pub tangent2: DVec2,
    /// Constraint of the incoming side.
    pub constraint1: ControlPointConstraint,
    /// Constraint of the outgoing side.
    pub constraint2: ControlPointConstraint,
}

impl ControlPoint {
    /// Sharp corner: both sides straight.
    pub fn straight(position: DVec2) -> Self {
        Self {
            position,
            tangent1: DVec2::ZERO,
            tangent2: DVec2::ZERO,
            constraint1: ControlPointConstraint::Straight,
            constraint2: ControlPointConstraint::Straight,
        }
    }

    /// Smooth point whose curve passes through with direction `tangent`.
    ///
    /// The incoming handle sits at `position - tangent` and the outgoing
    /// handle at `position + tangent`.
    pub fn smooth(position: DVec2, tangent: DVec2) -> Self {
        Self {
            position,
            tangent1: tangent,
            tangent2: -tangent,
            constraint1: ControlPointConstraint::Bezier,
            constraint2: ControlPointConstraint::Bezier,
        }
    }
}

// =============================================================================
// CURVE
// =============================================================================

/// Closed curve: the last control point connects back to the first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Curve2D {
    /// Control points in order.
    pub control_points: Vec<ControlPoint>,
}

impl Curve2D {
    /// Creates a curve from control points.
    pub fn new(control_points: Vec<ControlPoint>) -> Self {
        Self { control_points }
    }

    /// Straight-edged curve through `points`.
    pub fn from_points(points: &[DVec2]) -> Self {
        Self::new(points.iter().copied().map(ControlPoint::straight).collect())
    }

    /// Axis-aligned rectangle, counter-clockwise from `min`.
    pub fn rectangle(min: DVec2, max: DVec2) -> Self {
        Self::from_points(&[
            DVec2::new(min.x, min.y),
            DVec2::new(max.x, min.y),
            DVec2::new(max.x, max.y),
            DVec2::new(min.x, max.y),
        ])
    }

    /// Number of control points, which is also the number of segments.
    pub fn len(&self) -> usize {
        self.control_points.len()
    }

    /// Returns true when the curve has no control points.
    pub fn is_empty(&self) -> bool {
        self.control_points.is_empty()
    }

    /// Signed area of the control polygon; positive when counter-clockwise.
    pub fn signed_area(&self) -> f64 {
        let positions: Vec<DVec2> = self.control_points.iter().map(|p| p.position).collect();
        polygon_signed_area(&positions)
    }

    /// Flattens the curve into a tagged polyline.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brush_generators::Curve2D;
    /// use glam::DVec2;
    ///
    /// let square = Curve2D::rectangle(DVec2::ZERO, DVec2::ONE);
    /// let profile = square.sample(8);
    /// assert_eq!(profile.points.len(), 4);
    /// assert_eq!(profile.segments, vec![0, 1, 2, 3]);
    /// ```
    pub fn sample(&self, segments_per_curve: u32) -> SampledProfile {
        let count = self.control_points.len();
        let mut profile = SampledProfile::default();

        for (i, p1) in self.control_points.iter().enumerate() {
            let p2 = &self.control_points[(i + 1) % count];

            let straight = p1.constraint2 == ControlPointConstraint::Straight
                && p2.constraint1 == ControlPointConstraint::Straight;
            if segments_per_curve == 0 || straight {
                profile.push(p1.position, i);
                continue;
            }

            let handle1 = match p1.constraint2 {
                ControlPointConstraint::Bezier => p1.position - p1.tangent2,
                ControlPointConstraint::Straight => p1.position,
            };
            let handle2 = match p2.constraint1 {
                ControlPointConstraint::Bezier => p2.position - p2.tangent1,
                ControlPointConstraint::Straight => p2.position,
            };

            for j in 0..segments_per_curve {
                let t = j as f64 / segments_per_curve as f64;
                let point = cubic_bezier(p1.position, handle1, handle2, p2.position, t);
                profile.push(point, i);
            }
        }

        profile
    }
}

/// Evaluates a cubic Bezier curve at `t`.
pub fn cubic_bezier(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2, t: f64) -> DVec2 {
    let s = 1.0 - t;
    p0 * (s * s * s) + p1 * (3.0 * s * s * t) + p2 * (3.0 * s * t * t) + p3 * (t * t * t)
}

/// Shoelace signed area; positive for counter-clockwise winding.
pub fn polygon_signed_area(points: &[DVec2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].perp_dot(points[j]);
    }
    area / 2.0
}

// =============================================================================
// SAMPLED PROFILE
// =============================================================================

/// Polyline with provenance: `segments[k]` is the control-point edge that
/// produced `points[k]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampledProfile {
    /// Flattened points in curve order.
    pub points: Vec<DVec2>,
    /// Source segment per point.
    pub segments: Vec<usize>,
}

impl SampledProfile {
    fn push(&mut self, point: DVec2, segment: usize) {
        self.points.push(point);
        self.segments.push(segment);
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true when nothing was sampled.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Signed area of the polyline.
    pub fn signed_area(&self) -> f64 {
        polygon_signed_area(&self.points)
    }
}

#[cfg(test)]
mod tests;
