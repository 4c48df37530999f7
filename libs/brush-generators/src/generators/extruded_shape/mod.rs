//! # Extruded Shape
//!
//! Sweeps a closed 2D profile along a keyframe path.
//!
//! ## Pipeline
//!
//! 1. Sample the curve into a tagged polyline
//! 2. Decompose the polyline into convex pieces
//! 3. For every path sub-segment and every piece, extrude the piece from
//!    the segment's start transform to its end transform
//!
//! Output slot `segment * pieces + piece`. Profile point `(x, y)` sits at
//! local `(x, 0, -y)` so a counter-clockwise profile sweeps outwards along
//! local +Y.
//!
//! ## Surfaces
//!
//! `[bottom, top, segment 0, segment 1, ...]`: one entry per control-point
//! segment. Faces on interior diagonals reuse the bottom surface.

use crate::curve::{Curve2D, SampledProfile};
use crate::decompose::{decompose, ConvexPolygon};
use crate::error::{ExtrusionError, GeneratorResult};
use crate::extrude::{build_extrusion, BOTTOM_SURFACE};
use crate::generators::{
    check_output, check_surfaces, ensure, BrushGenerator, CsgOperation, GeneratedBrush,
    SubMeshWriter,
};
use crate::path::Path;
use brush_mesh::{BrushMesh, BrushSurface};
use config::constants::DEFAULT_CURVE_SEGMENTS;
use glam::{DMat4, DVec2, DVec3};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Profile swept along a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtrudedShapeDefinition {
    /// Closed profile in the path's local XZ plane.
    pub shape: Curve2D,
    /// Keyframes the profile follows.
    pub path: Path,
    /// Samples per curved control-point segment.
    pub curve_segments: u32,
}

impl Default for ExtrudedShapeDefinition {
    /// Unit square swept one unit along +Y.
    fn default() -> Self {
        Self {
            shape: Curve2D::rectangle(DVec2::splat(-0.5), DVec2::splat(0.5)),
            path: Path::default(),
            curve_segments: DEFAULT_CURVE_SEGMENTS,
        }
    }
}

impl BrushGenerator for ExtrudedShapeDefinition {
    fn required_sub_mesh_count(&self) -> GeneratorResult<usize> {
        let pieces = self.pieces()?;
        Ok(pieces.len() * self.path.total_subdivisions())
    }

    fn surface_count(&self) -> usize {
        2 + self.shape.len()
    }

    fn generate(&self, surfaces: &[BrushSurface], output: &mut [GeneratedBrush]) -> GeneratorResult<()> {
        check_surfaces(self.surface_count(), surfaces)?;
        let pieces = self.pieces()?;
        let transforms = self.path.sub_segment_transforms();
        check_output(pieces.len() * transforms.len(), output)?;
        trace!(
            pieces = pieces.len(),
            segments = transforms.len(),
            "generating extruded shape"
        );

        let mut writer = SubMeshWriter::new(output);
        let mut index = 0;
        for (start, end) in &transforms {
            for piece in &pieces {
                writer.write(index, piece.extrude(start, end, surfaces), CsgOperation::Additive);
                index += 1;
            }
        }
        writer.finish()
    }
}

impl ExtrudedShapeDefinition {
    /// Samples the profile.
    pub fn sampled_profile(&self) -> SampledProfile {
        self.shape.sample(self.curve_segments)
    }

    /// Convex pieces of the profile, each wound counter-clockwise.
    fn pieces(&self) -> GeneratorResult<Vec<Piece>> {
        ensure(self.shape.len() >= 3, || {
            format!("shape needs at least 3 control points, got {}", self.shape.len())
        })?;
        let finite = self.shape.control_points.iter().all(|p| {
            p.position.is_finite() && p.tangent1.is_finite() && p.tangent2.is_finite()
        });
        ensure(finite, || "shape contains non-finite values".to_string())?;
        self.path.check()?;

        let profile = self.sampled_profile();
        let polygons = decompose(&profile.points, &profile.segments)?;
        Ok(polygons.into_iter().map(Piece::counter_clockwise).collect())
    }
}

// =============================================================================
// PIECE
// =============================================================================

/// Convex profile piece with the surface of each edge `k -> k + 1`.
#[derive(Debug, Clone, PartialEq)]
struct Piece {
    points: Vec<DVec2>,
    tags: Vec<Option<usize>>,
}

impl Piece {
    fn counter_clockwise(polygon: ConvexPolygon) -> Self {
        let clockwise = polygon.signed_area() < 0.0;
        let ConvexPolygon {
            mut vertices,
            segments,
        } = polygon;
        if !clockwise {
            return Self {
                points: vertices,
                tags: segments,
            };
        }

        let m = vertices.len();
        vertices.reverse();
        let tags = (0..m).map(|k| segments[(2 * m - 2 - k) % m]).collect();
        Self {
            points: vertices,
            tags,
        }
    }

    /// Side surface of ring edge `e`, which runs from point `e - 1` to `e`.
    fn edge_surface(&self, e: usize) -> usize {
        let n = self.tags.len();
        match self.tags[(e + n - 1) % n] {
            Some(segment) => 2 + segment,
            None => BOTTOM_SURFACE,
        }
    }

    fn extrude(
        &self,
        start: &DMat4,
        end: &DMat4,
        surfaces: &[BrushSurface],
    ) -> Result<BrushMesh, ExtrusionError> {
        let local: Vec<DVec3> = self
            .points
            .iter()
            .map(|p| DVec3::new(p.x, 0.0, -p.y))
            .collect();
        let ring0: Vec<DVec3> = local.iter().map(|p| start.transform_point3(*p)).collect();
        let ring1: Vec<DVec3> = local.iter().map(|p| end.transform_point3(*p)).collect();
        let edge_surfaces: Vec<usize> = (0..self.points.len()).map(|e| self.edge_surface(e)).collect();
        // Mirrored keyframe scales flip the sweep.
        build_extrusion(&ring0, &ring1, Some(&edge_surfaces), surfaces, true)
    }
}
