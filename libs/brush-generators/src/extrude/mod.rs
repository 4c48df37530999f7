//! # Extrusion Builder
//!
//! Builds a closed half-edge brush between two corresponding vertex rings.
//!
//! ## Layout
//!
//! ```text
//! polygons:    [bottom cap][top cap][side 0][side 1] ...
//! half-edges:  [0, N) bottom   [N, 2N) top   [2N, ..) sides
//! ```
//!
//! `ring0` becomes the bottom cap (surface 0) and `ring1` the top cap
//! (surface 1). Both rings wind counter-clockwise seen from the `ring1`
//! side. Side `n` walls off ring edge `n - 1 -> n`; its shape is chosen
//! by [`classify_side`].
//!
//! The builder never validates. Callers run
//! [`BrushMesh::validated`](brush_mesh::BrushMesh::validated) on the
//! result.

mod allocator;
mod topology;

pub use topology::{classify_side, SideTopology};

use crate::error::ExtrusionError;
use allocator::{HalfEdgeAllocator, SideEdges};
use brush_mesh::{BrushMesh, BrushSurface, HalfEdge, Polygon};
use config::constants::DUPLICATE_VERTEX_EPSILON_SQR;
use glam::DVec3;
use topology::is_collapsed;
use tracing::trace;

/// Surface id of the cap built from `ring0`.
pub const BOTTOM_SURFACE: usize = 0;

/// Surface id of the cap built from `ring1`.
pub const TOP_SURFACE: usize = 1;

/// Surface id of side `edge` when no per-edge surfaces are given.
#[inline]
pub fn default_edge_surface(edge: usize) -> usize {
    edge + 2
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Builds the brush enclosed between `ring0` and `ring1`.
///
/// `edge_surfaces[n]` selects the surface of the side over ring edge
/// `n - 1 -> n`; `None` uses `n + 2`. Every surface id must index
/// `surfaces`. With `invert_if_needed` the rings swap roles when they wind
/// the wrong way for an outward-facing result.
///
/// # Example
///
/// ```rust
/// use brush_generators::extrude::build_extrusion;
/// use brush_mesh::BrushSurface;
/// use glam::DVec3;
///
/// let ring0 = vec![
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(1.0, 0.0, -1.0),
///     DVec3::new(0.0, 0.0, -1.0),
/// ];
/// let ring1: Vec<DVec3> = ring0.iter().map(|v| *v + DVec3::Y).collect();
/// let surfaces = BrushSurface::numbered_table(6);
///
/// let mesh = build_extrusion(&ring0, &ring1, None, &surfaces, false).unwrap();
/// assert_eq!(mesh.polygon_count(), 6);
/// assert!(mesh.validate());
/// ```
pub fn build_extrusion(
    ring0: &[DVec3],
    ring1: &[DVec3],
    edge_surfaces: Option<&[usize]>,
    surfaces: &[BrushSurface],
    invert_if_needed: bool,
) -> Result<BrushMesh, ExtrusionError> {
    if ring0.len() != ring1.len() {
        return Err(ExtrusionError::RingLengthMismatch {
            ring0: ring0.len(),
            ring1: ring1.len(),
        });
    }
    let mut edge_surfaces = match edge_surfaces {
        Some(ids) if ids.len() != ring0.len() => {
            return Err(ExtrusionError::EdgeSurfaceMismatch {
                ring: ring0.len(),
                edge_surfaces: ids.len(),
            })
        }
        Some(ids) => ids.to_vec(),
        None => (0..ring0.len()).map(default_edge_surface).collect(),
    };

    let mut bottom = ring0.to_vec();
    let mut top = ring1.to_vec();
    remove_degenerate_vertices(&mut bottom, &mut top, &mut edge_surfaces);
    if bottom.len() < 3 {
        return Err(ExtrusionError::TooFewVertices {
            count: bottom.len(),
        });
    }
    if invert_if_needed && is_extrusion_inverted(&bottom, &top) {
        trace!(vertices = bottom.len(), "swapping inverted extrusion rings");
        std::mem::swap(&mut bottom, &mut top);
    }

    assemble(&bottom, &top, &edge_surfaces, surfaces)
}

/// Returns true when `ring1` lies behind `ring0`'s winding normal, so the
/// caps would face inwards.
///
/// Compares the ring normal with the centroid displacement rather than the
/// sweep tangent with a single vertex offset; both agree for the planar,
/// non-degenerate rings built here, and the centroid is not thrown off by
/// one collapsed corner.
pub fn is_extrusion_inverted(ring0: &[DVec3], ring1: &[DVec3]) -> bool {
    let normal = ring_normal(ring0);
    let displacement = centroid(ring1) - centroid(ring0);
    normal.dot(displacement) < 0.0
}

/// Drops ring vertices that repeat the previous vertex in both rings,
/// together with the surface of the zero-length edge ending there.
///
/// The ring is cyclic: trailing vertices repeating the first vertex are
/// dropped too and their edge surface moves to edge 0. All three lists are
/// first cut to their common length.
pub fn remove_degenerate_vertices(
    ring0: &mut Vec<DVec3>,
    ring1: &mut Vec<DVec3>,
    edge_surfaces: &mut Vec<usize>,
) {
    let len = ring0.len().min(ring1.len()).min(edge_surfaces.len());
    ring0.truncate(len);
    ring1.truncate(len);
    edge_surfaces.truncate(len);

    let mut kept = 0;
    for i in 0..len {
        if kept > 0 && repeats(ring0.as_slice(), ring1.as_slice(), i, kept - 1) {
            continue;
        }
        ring0[kept] = ring0[i];
        ring1[kept] = ring1[i];
        edge_surfaces[kept] = edge_surfaces[i];
        kept += 1;
    }
    ring0.truncate(kept);
    ring1.truncate(kept);
    edge_surfaces.truncate(kept);

    while ring0.len() > 1 && repeats(ring0.as_slice(), ring1.as_slice(), ring0.len() - 1, 0) {
        ring0.pop();
        ring1.pop();
        if let Some(surface) = edge_surfaces.pop() {
            edge_surfaces[0] = surface;
        }
    }
}

// =============================================================================
// ASSEMBLY
// =============================================================================

fn assemble(
    ring0: &[DVec3],
    ring1: &[DVec3],
    edge_surfaces: &[usize],
    surfaces: &[BrushSurface],
) -> Result<BrushMesh, ExtrusionError> {
    let n = ring0.len();
    let previous = |e: usize| (e + n - 1) % n;

    // Collapsed corners reuse the ring0 vertex.
    let mut vertices = ring0.to_vec();
    let mut top_index = Vec::with_capacity(n);
    for (i, (&bottom, &top)) in ring0.iter().zip(ring1).enumerate() {
        if is_collapsed(bottom, top) {
            top_index.push(i);
        } else {
            top_index.push(vertices.len());
            vertices.push(top);
        }
    }

    let topologies: Vec<SideTopology> = (0..n)
        .map(|e| {
            let p = previous(e);
            classify_side(ring0[p], ring0[e], ring1[e], ring1[p])
        })
        .collect();
    let side_edges: usize = topologies.iter().map(|t| t.half_edge_count()).sum();

    let mut allocator = HalfEdgeAllocator::new(2 * n, 2 * n + side_edges);
    allocator.polygons.push(
        Polygon::new(0, n, BOTTOM_SURFACE).with_surface(surface(surfaces, BOTTOM_SURFACE)?),
    );
    allocator
        .polygons
        .push(Polygon::new(n, n, TOP_SURFACE).with_surface(surface(surfaces, TOP_SURFACE)?));

    // Bottom cap walks ring0 backwards, top cap walks ring1 forwards.
    for e in 0..n {
        allocator.half_edges[bottom_cap_edge(n, e)] = HalfEdge::new(previous(e));
        allocator.half_edges[top_cap_edge(n, e)] = HalfEdge::new(top_index[e]);
    }

    let mut sides: Vec<Option<SideEdges>> = Vec::with_capacity(n);
    for (e, &topology) in topologies.iter().enumerate() {
        let p = previous(e);
        let (bottom_edge, top_edge) = (bottom_cap_edge(n, e), top_cap_edge(n, e));
        let edges = match topology {
            SideTopology::None => None,
            _ => {
                let template = side_template(surfaces, edge_surfaces[e], topology)?;
                allocator.side(topology, [p, e, top_index[e], top_index[p]], template)
            }
        };
        match edges {
            Some(edges) => {
                allocator.twin(edges.bottom, bottom_edge);
                allocator.twin(edges.top, top_edge);
            }
            None => allocator.twin(bottom_edge, top_edge),
        }
        sides.push(edges);
    }

    // Right edge of side e runs up corner e, left edge of side e + 1 down it.
    for e in 0..n {
        let next = (e + 1) % n;
        if let (Some(side), Some(neighbour)) = (sides[e], sides[next]) {
            if let (Some(right), Some(left)) = (side.right, neighbour.left) {
                allocator.twin(right, left);
            }
        }
    }

    trace!(
        vertices = vertices.len(),
        polygons = allocator.polygons.len(),
        half_edges = allocator.half_edges.len(),
        "extrusion assembled"
    );
    Ok(BrushMesh::from_parts(
        vertices,
        allocator.polygons,
        allocator.half_edges,
    ))
}

/// Bottom cap slot of ring edge `e`; runs `e -> e - 1`.
#[inline]
fn bottom_cap_edge(n: usize, e: usize) -> usize {
    n - 1 - e
}

/// Top cap slot of ring edge `e`; runs `e - 1 -> e`.
#[inline]
fn top_cap_edge(n: usize, e: usize) -> usize {
    n + e
}

/// Polygon template of a side; split sides get their own smoothing group.
fn side_template(
    surfaces: &[BrushSurface],
    surface_id: usize,
    topology: SideTopology,
) -> Result<Polygon, ExtrusionError> {
    let mut template = Polygon::new(0, 0, surface_id).with_surface(surface(surfaces, surface_id)?);
    if topology.is_split() {
        template.description = template
            .description
            .with_smoothing_group(split_smoothing_group(surface_id));
    }
    Ok(template)
}

/// Smoothing group shared by the two halves of a split side.
#[inline]
fn split_smoothing_group(surface_id: usize) -> u32 {
    u32::try_from(surface_id + 1).unwrap_or(u32::MAX)
}

fn surface(surfaces: &[BrushSurface], surface_id: usize) -> Result<&BrushSurface, ExtrusionError> {
    surfaces
        .get(surface_id)
        .ok_or(ExtrusionError::MissingSurface {
            surface_id,
            table_len: surfaces.len(),
        })
}

/// Returns true when vertex `a` repeats vertex `b` in both rings.
fn repeats(ring0: &[DVec3], ring1: &[DVec3], a: usize, b: usize) -> bool {
    ring0[a].distance_squared(ring0[b]) < DUPLICATE_VERTEX_EPSILON_SQR
        && ring1[a].distance_squared(ring1[b]) < DUPLICATE_VERTEX_EPSILON_SQR
}

/// Area-weighted winding normal of a closed ring.
fn ring_normal(ring: &[DVec3]) -> DVec3 {
    let n = ring.len();
    (0..n).map(|i| ring[i].cross(ring[(i + 1) % n])).sum()
}

fn centroid(ring: &[DVec3]) -> DVec3 {
    if ring.is_empty() {
        return DVec3::ZERO;
    }
    ring.iter().copied().sum::<DVec3>() / ring.len() as f64
}
