//! Contiguous half-edge and polygon allocation for extrusion sides.

use super::SideTopology;
use brush_mesh::{HalfEdge, Polygon};

/// Half-edges of one side that face outside the side itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SideEdges {
    /// Runs along ring0, twin of a bottom cap edge.
    pub bottom: usize,
    /// Runs along ring1, twin of a top cap edge.
    pub top: usize,
    /// Runs down the `p` corner; absent when that corner is collapsed.
    pub left: Option<usize>,
    /// Runs up the `e` corner; absent when that corner is collapsed.
    pub right: Option<usize>,
}

/// Appends side polygons after the two caps.
///
/// Every call takes the quad corners `[v0, v1, v2, v3]` as vertex indices
/// and a polygon template carrying surface metadata.
#[derive(Debug)]
pub(crate) struct HalfEdgeAllocator {
    pub half_edges: Vec<HalfEdge>,
    pub polygons: Vec<Polygon>,
}

impl HalfEdgeAllocator {
    /// Starts with `cap_edges` reserved half-edges for the two caps.
    pub fn new(cap_edges: usize, capacity: usize) -> Self {
        let mut half_edges = Vec::with_capacity(capacity.max(cap_edges));
        half_edges.resize(cap_edges, HalfEdge::new(0));
        Self {
            half_edges,
            polygons: Vec::new(),
        }
    }

    /// Links `a` and `b` as twins.
    pub fn twin(&mut self, a: usize, b: usize) {
        self.half_edges[a].twin_index = Some(b);
        self.half_edges[b].twin_index = Some(a);
    }

    /// Appends the polygons of one side. [`SideTopology::None`] adds
    /// nothing and returns `None`.
    pub fn side(
        &mut self,
        topology: SideTopology,
        corners: [usize; 4],
        template: Polygon,
    ) -> Option<SideEdges> {
        let edges = match topology {
            SideTopology::None => return None,
            SideTopology::Quad => self.quad(corners, template),
            SideTopology::TriangleNegative => self.triangle_negative(corners, template),
            SideTopology::TrianglePositive => self.triangle_positive(corners, template),
            SideTopology::TrianglesNegative => self.triangles_negative(corners, template),
            SideTopology::TrianglesPositive => self.triangles_positive(corners, template),
        };
        Some(edges)
    }

    fn push(&mut self, destinations: &[usize], template: Polygon) -> usize {
        let first = self.half_edges.len();
        self.half_edges
            .extend(destinations.iter().map(|&vertex| HalfEdge::new(vertex)));
        self.polygons.push(Polygon {
            first_edge: first,
            edge_count: destinations.len(),
            ..template
        });
        first
    }

    /// `v0 -> v1 -> v2 -> v3`.
    fn quad(&mut self, [v0, v1, v2, v3]: [usize; 4], template: Polygon) -> SideEdges {
        let s = self.push(&[v1, v2, v3, v0], template);
        SideEdges {
            bottom: s,
            right: Some(s + 1),
            top: s + 2,
            left: Some(s + 3),
        }
    }

    /// `v0 -> v1 -> v2` with `v3` merged into `v0`.
    fn triangle_negative(&mut self, [_, v1, v2, v3]: [usize; 4], template: Polygon) -> SideEdges {
        let s = self.push(&[v1, v2, v3], template);
        SideEdges {
            bottom: s,
            right: Some(s + 1),
            top: s + 2,
            left: None,
        }
    }

    /// `v0 -> v1 -> v3` with `v2` merged into `v1`.
    fn triangle_positive(&mut self, [v0, v1, _, v3]: [usize; 4], template: Polygon) -> SideEdges {
        let s = self.push(&[v1, v3, v0], template);
        SideEdges {
            bottom: s,
            top: s + 1,
            left: Some(s + 2),
            right: None,
        }
    }

    /// Two triangles sharing the `v0 - v2` diagonal.
    fn triangles_positive(&mut self, [v0, v1, v2, v3]: [usize; 4], template: Polygon) -> SideEdges {
        let s = self.push(&[v1, v2, v0], template);
        self.push(&[v2, v3, v0], template);
        self.twin(s + 2, s + 3);
        SideEdges {
            bottom: s,
            right: Some(s + 1),
            top: s + 4,
            left: Some(s + 5),
        }
    }

    /// Two triangles sharing the `v1 - v3` diagonal.
    fn triangles_negative(&mut self, [v0, v1, v2, v3]: [usize; 4], template: Polygon) -> SideEdges {
        let s = self.push(&[v1, v3, v0], template);
        self.push(&[v2, v3, v1], template);
        self.twin(s + 1, s + 5);
        SideEdges {
            bottom: s,
            left: Some(s + 2),
            right: Some(s + 3),
            top: s + 4,
        }
    }
}
