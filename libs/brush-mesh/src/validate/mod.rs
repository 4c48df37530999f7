//! # Brush Validation
//!
//! Structural and geometric checks a brush must pass before it is handed
//! to CSG evaluation. Checks run in a fixed order and stop at the first
//! failure:
//!
//! 1. index ranges (vertices, twins, polygon edge runs)
//! 2. ownership: every half-edge in exactly one polygon of 3+ edges
//! 3. twin symmetry and reversed endpoints
//! 4. planarity of every polygon
//! 5. positive enclosed volume

use crate::error::{ValidationError, ValidationResult};
use crate::mesh::BrushMesh;
use config::constants::MeshTolerances;
use tracing::debug;

impl BrushMesh {
    /// Returns true when the mesh passes every check with default
    /// tolerances.
    pub fn validate(&self) -> bool {
        self.validate_with(&MeshTolerances::default()).is_ok()
    }

    /// Runs every check and reports the first failure.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brush_mesh::{BrushMesh, ValidationError};
    /// use config::constants::MeshTolerances;
    ///
    /// let result = BrushMesh::empty().validate_with(&MeshTolerances::default());
    /// assert_eq!(result, Err(ValidationError::EmptyMesh));
    /// ```
    pub fn validate_with(&self, tolerances: &MeshTolerances) -> ValidationResult<()> {
        if self.vertices().is_empty() || self.polygons().is_empty() || self.half_edges().is_empty()
        {
            return Err(ValidationError::EmptyMesh);
        }

        self.check_indices()?;
        let origins = self.check_ownership()?;
        self.check_twins(&origins, tolerances)?;
        self.check_planarity(tolerances)?;
        if !tolerances.allow_open_boundaries {
            self.check_volume(tolerances)?;
        }
        Ok(())
    }

    /// Consumes the mesh, returning it only if it validates with default
    /// tolerances.
    pub fn validated(self) -> ValidationResult<Self> {
        self.validated_with(&MeshTolerances::default())
    }

    /// Consumes the mesh, returning it only if it validates with
    /// `tolerances`.
    pub fn validated_with(self, tolerances: &MeshTolerances) -> ValidationResult<Self> {
        match self.validate_with(tolerances) {
            Ok(()) => Ok(self),
            Err(error) => {
                debug!(
                    %error,
                    vertices = self.vertex_count(),
                    polygons = self.polygon_count(),
                    "brush mesh rejected"
                );
                Err(error)
            }
        }
    }

    // =========================================================================
    // CHECKS
    // =========================================================================

    fn check_indices(&self) -> ValidationResult<()> {
        let vertex_count = self.vertex_count();
        let half_edge_count = self.half_edge_count();

        for (edge, half_edge) in self.half_edges().iter().enumerate() {
            if half_edge.vertex_index >= vertex_count {
                return Err(ValidationError::InvalidVertexIndex {
                    edge,
                    vertex: half_edge.vertex_index,
                });
            }
            if let Some(twin) = half_edge.twin_index {
                if twin >= half_edge_count {
                    return Err(ValidationError::InvalidTwinIndex { edge, twin });
                }
            }
        }

        for (polygon, p) in self.polygons().iter().enumerate() {
            if p.edge_count < 3 {
                return Err(ValidationError::DegeneratePolygon {
                    polygon,
                    edge_count: p.edge_count,
                });
            }
            let end = p.first_edge + p.edge_count;
            if end > half_edge_count {
                return Err(ValidationError::EdgeRangeOutOfBounds {
                    polygon,
                    first_edge: p.first_edge,
                    end,
                    half_edge_count,
                });
            }
        }
        Ok(())
    }

    /// Verifies single ownership and returns the origin vertex of every
    /// half-edge.
    fn check_ownership(&self) -> ValidationResult<Vec<usize>> {
        let mut owner: Vec<Option<usize>> = vec![None; self.half_edge_count()];
        let mut origins = vec![0; self.half_edge_count()];

        for (polygon, p) in self.polygons().iter().enumerate() {
            for edge in p.edges() {
                if let Some(first) = owner[edge] {
                    return Err(ValidationError::SharedHalfEdge {
                        edge,
                        first,
                        second: polygon,
                    });
                }
                owner[edge] = Some(polygon);
                origins[edge] = self.half_edges()[p.previous_edge(edge)].vertex_index;
            }
        }

        if let Some(edge) = owner.iter().position(Option::is_none) {
            return Err(ValidationError::OrphanHalfEdge { edge });
        }

        for (edge, half_edge) in self.half_edges().iter().enumerate() {
            if origins[edge] == half_edge.vertex_index {
                return Err(ValidationError::ZeroLengthEdge {
                    edge,
                    vertex: half_edge.vertex_index,
                });
            }
        }
        Ok(origins)
    }

    fn check_twins(&self, origins: &[usize], tolerances: &MeshTolerances) -> ValidationResult<()> {
        let half_edges = self.half_edges();

        for (edge, half_edge) in half_edges.iter().enumerate() {
            let Some(twin) = half_edge.twin_index else {
                if tolerances.allow_open_boundaries {
                    continue;
                }
                return Err(ValidationError::OpenBoundary { edge });
            };

            let back = half_edges[twin].twin_index;
            if back != Some(edge) {
                return Err(ValidationError::AsymmetricTwin { edge, twin, back });
            }

            let reversed = origins[twin] == half_edge.vertex_index
                && half_edges[twin].vertex_index == origins[edge];
            if !reversed {
                return Err(ValidationError::MismatchedTwin { edge, twin });
            }
        }
        Ok(())
    }

    fn check_planarity(&self, tolerances: &MeshTolerances) -> ValidationResult<()> {
        let vertices = self.vertices();

        for (polygon, p) in self.polygons().iter().enumerate() {
            let Some(plane) = self.planes().get(polygon).copied().flatten() else {
                return Err(ValidationError::PlanesNotCalculated { polygon });
            };
            for edge in p.edges() {
                let vertex = self.half_edges()[edge].vertex_index;
                let distance = plane.signed_distance(vertices[vertex]).abs();
                if distance > tolerances.plane_distance {
                    return Err(ValidationError::NonPlanarPolygon {
                        polygon,
                        vertex,
                        distance,
                        tolerance: tolerances.plane_distance,
                    });
                }
            }
        }
        Ok(())
    }

    fn check_volume(&self, tolerances: &MeshTolerances) -> ValidationResult<()> {
        let volume = self.volume();
        if volume > tolerances.min_volume {
            Ok(())
        } else {
            Err(ValidationError::NonPositiveVolume {
                volume,
                min_volume: tolerances.min_volume,
            })
        }
    }
}

#[cfg(test)]
mod tests;
