//! # Brush Mesh Data Structure
//!
//! Vertices, polygons and half-edges of one convex-or-concave closed solid,
//! plus the per-polygon planes derived from them.
//!
//! Half-edges of a polygon are stored contiguously in traversal order and
//! each one records the vertex it points *to*. The vertex it starts from is
//! the destination of the previous half-edge of the same polygon.

use crate::plane::Plane;
use crate::surface::{BrushSurface, MaterialId, SurfaceDescription};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::ops::Range;

// =============================================================================
// HALF-EDGE
// =============================================================================

/// Directed edge of one polygon boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalfEdge {
    /// Destination vertex.
    pub vertex_index: usize,
    /// Half-edge running the opposite way on the neighbouring polygon.
    pub twin_index: Option<usize>,
}

impl HalfEdge {
    /// Creates a half-edge ending at `vertex_index` with no twin yet.
    pub fn new(vertex_index: usize) -> Self {
        Self {
            vertex_index,
            twin_index: None,
        }
    }
}

// =============================================================================
// POLYGON
// =============================================================================

/// Face of a brush: a contiguous run of half-edges plus surface metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Index of the first half-edge of the run.
    pub first_edge: usize,
    /// Number of half-edges in the run.
    pub edge_count: usize,
    /// Index into the generator's surface table.
    pub surface_id: usize,
    /// Surface metadata.
    pub description: SurfaceDescription,
    /// Material reference.
    pub material: MaterialId,
}

impl Polygon {
    /// Creates a polygon over `edge_count` half-edges starting at
    /// `first_edge`, with default surface metadata.
    pub fn new(first_edge: usize, edge_count: usize, surface_id: usize) -> Self {
        Self {
            first_edge,
            edge_count,
            surface_id,
            description: SurfaceDescription::default(),
            material: MaterialId::default(),
        }
    }

    /// Copies material and description from a surface table entry.
    pub fn with_surface(mut self, surface: &BrushSurface) -> Self {
        self.material = surface.material;
        self.description = surface.description;
        self
    }

    /// Half-edge index range owned by this polygon.
    #[inline]
    pub fn edges(&self) -> Range<usize> {
        self.first_edge..self.first_edge + self.edge_count
    }

    /// Half-edge preceding `edge` in this polygon's loop.
    ///
    /// `edge` must lie inside [`Polygon::edges`].
    #[inline]
    pub fn previous_edge(&self, edge: usize) -> usize {
        let local = edge - self.first_edge;
        self.first_edge + (local + self.edge_count - 1) % self.edge_count
    }

    /// Half-edge following `edge` in this polygon's loop.
    ///
    /// `edge` must lie inside [`Polygon::edges`].
    #[inline]
    pub fn next_edge(&self, edge: usize) -> usize {
        let local = edge - self.first_edge;
        self.first_edge + (local + 1) % self.edge_count
    }
}

// =============================================================================
// BRUSH MESH
// =============================================================================

/// Closed polyhedral brush in half-edge form.
///
/// Fields are private: a mesh is assembled once with
/// [`BrushMesh::from_parts`] and afterwards only read, or emptied with
/// [`BrushMesh::clear`].
///
/// # Example
///
/// ```rust
/// use brush_mesh::BrushMesh;
///
/// let mesh = BrushMesh::default();
/// assert_eq!(mesh.polygon_count(), 0);
/// assert_eq!(mesh.volume(), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrushMesh {
    vertices: Vec<DVec3>,
    polygons: Vec<Polygon>,
    half_edges: Vec<HalfEdge>,
    planes: Vec<Option<Plane>>,
}

impl BrushMesh {
    /// Creates an empty mesh.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Assembles a mesh and derives its polygon planes.
    ///
    /// No topology checks run here; call [`BrushMesh::validate_with`] or
    /// [`BrushMesh::validated`] before trusting the result.
    pub fn from_parts(
        vertices: Vec<DVec3>,
        polygons: Vec<Polygon>,
        half_edges: Vec<HalfEdge>,
    ) -> Self {
        let mut mesh = Self {
            vertices,
            polygons,
            half_edges,
            planes: Vec::new(),
        };
        mesh.calculate_planes();
        mesh
    }

    /// Returns true if the mesh holds no geometry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.polygons.is_empty() && self.half_edges.is_empty()
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of polygons.
    #[inline]
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Returns the number of half-edges.
    #[inline]
    pub fn half_edge_count(&self) -> usize {
        self.half_edges.len()
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the polygons.
    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Returns a reference to the half-edges.
    #[inline]
    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.half_edges
    }

    /// Returns the per-polygon planes. `None` marks a polygon without three
    /// non-collinear vertices.
    #[inline]
    pub fn planes(&self) -> &[Option<Plane>] {
        &self.planes
    }

    /// Index of the polygon owning `edge`.
    pub fn polygon_of_edge(&self, edge: usize) -> Option<usize> {
        self.polygons
            .iter()
            .position(|polygon| polygon.edges().contains(&edge))
    }

    /// Vertex `edge` starts from.
    pub fn edge_origin(&self, edge: usize) -> Option<usize> {
        let polygon = &self.polygons[self.polygon_of_edge(edge)?];
        self.half_edges
            .get(polygon.previous_edge(edge))
            .map(|half_edge| half_edge.vertex_index)
    }

    /// Boundary positions of `polygon` in traversal order.
    ///
    /// Returns `None` when the polygon refers to half-edges or vertices
    /// outside the mesh.
    pub fn polygon_vertices(&self, polygon: &Polygon) -> Option<Vec<DVec3>> {
        self.half_edges
            .get(polygon.edges())?
            .iter()
            .map(|half_edge| self.vertices.get(half_edge.vertex_index).copied())
            .collect()
    }

    /// Recomputes the plane of every polygon from its first three
    /// non-collinear boundary vertices.
    pub fn calculate_planes(&mut self) {
        self.planes = self
            .polygons
            .iter()
            .map(|polygon| {
                self.polygon_vertices(polygon)
                    .and_then(|points| Plane::from_boundary(&points))
            })
            .collect();
    }

    /// Signed enclosed volume.
    ///
    /// Positive for a closed mesh whose polygons wind counter-clockwise seen
    /// from outside. Polygons with invalid references are skipped.
    pub fn volume(&self) -> f64 {
        let six_volume: f64 = self
            .polygons
            .iter()
            .filter_map(|polygon| self.polygon_vertices(polygon))
            .map(|points| {
                let Some((&apex, rest)) = points.split_first() else {
                    return 0.0;
                };
                rest.windows(2)
                    .map(|pair| apex.dot(pair[0].cross(pair[1])))
                    .sum::<f64>()
            })
            .sum();
        six_volume / 6.0
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        (min, max)
    }

    /// Removes all geometry, leaving an empty mesh.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.polygons.clear();
        self.half_edges.clear();
        self.planes.clear();
    }
}
