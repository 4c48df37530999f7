//! Side quad classification.
//!
//! A side wall between ring edge `p -> e` is the quad `v0 v1 v2 v3` with
//! `v0 = ring0[p]`, `v1 = ring0[e]`, `v2 = ring1[e]`, `v3 = ring1[p]`.

use config::constants::{COLLAPSED_CORNER_EPSILON_SQR, NORMAL_LENGTH_EPSILON, QUAD_PLANARITY_EPSILON};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// How a side quad is turned into polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SideTopology {
    /// Both corners collapsed; the caps meet directly. 0 half-edges.
    None,
    /// Planar quad. 4 half-edges.
    Quad,
    /// `v0 == v3`: triangle `v1 v2 v3`. 3 half-edges.
    TriangleNegative,
    /// `v1 == v2`: triangle `v0 v1 v3`. 3 half-edges.
    TrianglePositive,
    /// Non-planar, split along `v1 - v3`. 6 half-edges.
    TrianglesNegative,
    /// Non-planar, split along `v0 - v2`. 6 half-edges.
    TrianglesPositive,
}

impl SideTopology {
    /// Half-edges this side adds after the caps.
    pub fn half_edge_count(self) -> usize {
        match self {
            Self::None => 0,
            Self::TriangleNegative | Self::TrianglePositive => 3,
            Self::Quad => 4,
            Self::TrianglesNegative | Self::TrianglesPositive => 6,
        }
    }

    /// Polygons this side adds after the caps.
    pub fn polygon_count(self) -> usize {
        match self {
            Self::None => 0,
            Self::Quad | Self::TriangleNegative | Self::TrianglePositive => 1,
            Self::TrianglesNegative | Self::TrianglesPositive => 2,
        }
    }

    /// Returns true when the side is split into two triangles.
    pub fn is_split(self) -> bool {
        matches!(self, Self::TrianglesNegative | Self::TrianglesPositive)
    }
}

/// Returns true when the bottom and top vertex of a corner coincide.
#[inline]
pub(crate) fn is_collapsed(bottom: DVec3, top: DVec3) -> bool {
    bottom.distance_squared(top) < COLLAPSED_CORNER_EPSILON_SQR
}

/// Classifies the side quad `v0 v1 v2 v3`.
///
/// # Example
///
/// ```rust
/// use brush_generators::extrude::{classify_side, SideTopology};
/// use glam::DVec3;
///
/// let side = classify_side(
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(1.0, 1.0, 0.0),
///     DVec3::new(0.0, 1.0, 0.0),
/// );
/// assert_eq!(side, SideTopology::Quad);
/// ```
pub fn classify_side(v0: DVec3, v1: DVec3, v2: DVec3, v3: DVec3) -> SideTopology {
    match (is_collapsed(v0, v3), is_collapsed(v1, v2)) {
        (true, true) => return SideTopology::None,
        (true, false) => return SideTopology::TriangleNegative,
        (false, true) => return SideTopology::TrianglePositive,
        (false, false) => {}
    }

    let normal = (v1 - v0).cross(v3 - v0);
    let length = normal.length();
    if length < NORMAL_LENGTH_EPSILON {
        return SideTopology::Quad;
    }

    let distance = (v2 - v0).dot(normal / length);
    if distance.abs() < QUAD_PLANARITY_EPSILON {
        SideTopology::Quad
    } else if distance > 0.0 {
        SideTopology::TrianglesPositive
    } else {
        SideTopology::TrianglesNegative
    }
}
