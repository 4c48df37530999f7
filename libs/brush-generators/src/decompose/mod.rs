//! # Convex Decomposition
//!
//! Splits a simple, possibly concave, closed polyline into convex pieces
//! while keeping track of which source segment each boundary edge came
//! from.
//!
//! ## Algorithm
//!
//! 1. Drop duplicate and collinear vertices
//! 2. Reject self-intersecting outlines (exact `orient2d` predicates)
//! 3. Normalize to counter-clockwise and ear-clip
//! 4. Hertel-Mehlhorn: merge triangles across diagonals while convex
//! 5. Restore the caller's winding
//!
//! Tags follow the edge they label: `segments[k]` describes the edge from
//! vertex `k` to vertex `k + 1`. Interior diagonals carry `None`.

use crate::curve::polygon_signed_area;
use crate::error::DecomposeError;
use config::constants::{COLLINEAR_EPSILON, DUPLICATE_VERTEX_EPSILON_SQR};
use glam::DVec2;
use robust::{orient2d, Coord};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// One convex piece of a decomposed profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvexPolygon {
    /// Vertices in the winding of the input profile.
    pub vertices: Vec<DVec2>,
    /// Source segment of the edge leaving each vertex; `None` for a
    /// diagonal added by the partition.
    pub segments: Vec<Option<usize>>,
}

impl ConvexPolygon {
    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the polygon has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Shoelace signed area.
    pub fn signed_area(&self) -> f64 {
        polygon_signed_area(&self.vertices)
    }
}

/// Decomposes a tagged outline into convex polygons.
///
/// # Example
///
/// ```rust
/// use brush_generators::decompose;
/// use glam::DVec2;
///
/// // L-shape: one reflex corner, two convex pieces.
/// let points = [
///     DVec2::new(0.0, 0.0),
///     DVec2::new(2.0, 0.0),
///     DVec2::new(2.0, 1.0),
///     DVec2::new(1.0, 1.0),
///     DVec2::new(1.0, 2.0),
///     DVec2::new(0.0, 2.0),
/// ];
/// let pieces = decompose(&points, &[0, 1, 2, 3, 4, 5]).unwrap();
/// assert_eq!(pieces.len(), 2);
/// ```
pub fn decompose(
    points: &[DVec2],
    segments: &[usize],
) -> Result<Vec<ConvexPolygon>, DecomposeError> {
    if points.len() != segments.len() {
        return Err(DecomposeError::MismatchedSegments {
            points: points.len(),
            segments: segments.len(),
        });
    }

    let mut outline: Vec<(DVec2, Option<usize>)> = points
        .iter()
        .copied()
        .zip(segments.iter().copied().map(Some))
        .collect();
    remove_duplicates(&mut outline);
    remove_collinear(&mut outline);

    if outline.len() < 3 {
        return Err(DecomposeError::TooFewPoints {
            count: outline.len(),
        });
    }

    let positions: Vec<DVec2> = outline.iter().map(|(p, _)| *p).collect();
    check_simple(&positions)?;

    let area = polygon_signed_area(&positions);
    if area.abs() <= f64::EPSILON {
        return Err(DecomposeError::ZeroArea);
    }
    let clockwise = area < 0.0;
    if clockwise {
        reverse_outline(&mut outline);
    }

    let positions: Vec<DVec2> = outline.iter().map(|(p, _)| *p).collect();
    let tags: Vec<Option<usize>> = outline.iter().map(|(_, tag)| *tag).collect();

    let triangles = ear_clip(&positions, &tags)?;
    let pieces = merge_convex(triangles, &positions);
    trace!(
        vertices = positions.len(),
        pieces = pieces.len(),
        "profile decomposed"
    );

    Ok(pieces
        .into_iter()
        .map(|piece| {
            let mut polygon = ConvexPolygon {
                vertices: piece.indices.iter().map(|&i| positions[i]).collect(),
                segments: piece.tags,
            };
            if clockwise {
                reverse_polygon(&mut polygon);
            }
            polygon
        })
        .collect())
}

// =============================================================================
// CLEANUP
// =============================================================================

/// Removes consecutive duplicates. The merged edge keeps the tag of the
/// edge that still has length.
fn remove_duplicates(outline: &mut Vec<(DVec2, Option<usize>)>) {
    let mut kept: Vec<(DVec2, Option<usize>)> = Vec::with_capacity(outline.len());
    for &(point, tag) in outline.iter() {
        match kept.last_mut() {
            Some(last) if last.0.distance_squared(point) < DUPLICATE_VERTEX_EPSILON_SQR => {
                last.1 = tag;
            }
            _ => kept.push((point, tag)),
        }
    }
    while kept.len() > 1 {
        let first = kept[0].0;
        match kept.last() {
            Some(last) if last.0.distance_squared(first) < DUPLICATE_VERTEX_EPSILON_SQR => {
                kept.pop();
            }
            _ => break,
        }
    }
    *outline = kept;
}

/// Removes vertices whose neighbours make them collinear, including
/// zero-width spikes. The merged edge keeps the tag of its first half.
fn remove_collinear(outline: &mut Vec<(DVec2, Option<usize>)>) {
    let mut i = 0;
    let mut stable = 0;
    while outline.len() >= 3 && stable < outline.len() {
        let n = outline.len();
        let prev = outline[(i + n - 1) % n].0;
        let curr = outline[i].0;
        let next = outline[(i + 1) % n].0;

        let v1 = curr - prev;
        let v2 = next - curr;
        let scale = v1.length() * v2.length();
        if scale <= f64::EPSILON || v1.perp_dot(v2).abs() / scale < COLLINEAR_EPSILON {
            outline.remove(i);
            stable = 0;
            // Re-check the previous vertex against its new neighbour.
            i = if i == 0 { n - 2 } else { i - 1 };
        } else {
            stable += 1;
            i = (i + 1) % n;
        }
    }
}

/// Reverses winding; tags move so they still label the same edges.
fn reverse_outline(outline: &mut [(DVec2, Option<usize>)]) {
    let n = outline.len();
    let tags: Vec<Option<usize>> = outline.iter().map(|(_, tag)| *tag).collect();
    outline.reverse();
    for (k, entry) in outline.iter_mut().enumerate() {
        entry.1 = tags[(2 * n - 2 - k) % n];
    }
}

fn reverse_polygon(polygon: &mut ConvexPolygon) {
    let mut outline: Vec<(DVec2, Option<usize>)> = polygon
        .vertices
        .iter()
        .copied()
        .zip(polygon.segments.iter().copied())
        .collect();
    reverse_outline(&mut outline);
    polygon.vertices = outline.iter().map(|(p, _)| *p).collect();
    polygon.segments = outline.iter().map(|(_, tag)| *tag).collect();
}

// =============================================================================
// PREDICATES
// =============================================================================

fn coord(p: DVec2) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

/// Exact orientation: positive when `a, b, c` turn counter-clockwise.
fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    orient2d(coord(a), coord(b), coord(c))
}

fn on_segment(a: DVec2, b: DVec2, p: DVec2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

fn segments_intersect(a: DVec2, b: DVec2, c: DVec2, d: DVec2) -> bool {
    let o1 = orient(a, b, c);
    let o2 = orient(a, b, d);
    let o3 = orient(c, d, a);
    let o4 = orient(c, d, b);

    if o1 * o2 < 0.0 && o3 * o4 < 0.0 {
        return true;
    }
    (o1 == 0.0 && on_segment(a, b, c))
        || (o2 == 0.0 && on_segment(a, b, d))
        || (o3 == 0.0 && on_segment(c, d, a))
        || (o4 == 0.0 && on_segment(c, d, b))
}

/// Rejects outlines where two non-adjacent edges touch.
fn check_simple(points: &[DVec2]) -> Result<(), DecomposeError> {
    let n = points.len();
    for i in 0..n {
        let (a, b) = (points[i], points[(i + 1) % n]);
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (c, d) = (points[j], points[(j + 1) % n]);
            if segments_intersect(a, b, c, d) {
                return Err(DecomposeError::SelfIntersecting {
                    first: i,
                    second: j,
                });
            }
        }
    }
    Ok(())
}

fn point_in_triangle(p: DVec2, a: DVec2, b: DVec2, c: DVec2) -> bool {
    orient(a, b, p) >= 0.0 && orient(b, c, p) >= 0.0 && orient(c, a, p) >= 0.0
}

// =============================================================================
// EAR CLIPPING
// =============================================================================

/// Convex piece under construction: vertex indices plus per-edge tags.
#[derive(Debug, Clone)]
struct Piece {
    indices: Vec<usize>,
    tags: Vec<Option<usize>>,
}

/// Triangulates a counter-clockwise outline.
fn ear_clip(points: &[DVec2], tags: &[Option<usize>]) -> Result<Vec<Piece>, DecomposeError> {
    let mut remaining: Vec<usize> = (0..points.len()).collect();
    let mut edge_tags: Vec<Option<usize>> = tags.to_vec();
    let mut triangles = Vec::with_capacity(points.len().saturating_sub(2));

    while remaining.len() > 3 {
        let n = remaining.len();
        let ear = (0..n).find(|&i| {
            let prev = (i + n - 1) % n;
            let next = (i + 1) % n;
            let a = points[remaining[prev]];
            let b = points[remaining[i]];
            let c = points[remaining[next]];

            if orient(a, b, c) <= 0.0 {
                return false;
            }
            (0..n)
                .filter(|&j| j != prev && j != i && j != next)
                .all(|j| !point_in_triangle(points[remaining[j]], a, b, c))
        });

        match ear {
            Some(i) => {
                let prev = (i + n - 1) % n;
                let next = (i + 1) % n;
                triangles.push(Piece {
                    indices: vec![remaining[prev], remaining[i], remaining[next]],
                    tags: vec![edge_tags[prev], edge_tags[i], None],
                });
                edge_tags[prev] = None;
                remaining.remove(i);
                edge_tags.remove(i);
            }
            None => {
                // A straight vertex left behind by earlier clips; fold it
                // into its neighbour's edge.
                let flat = (0..n).find(|&i| {
                    let a = points[remaining[(i + n - 1) % n]];
                    let b = points[remaining[i]];
                    let c = points[remaining[(i + 1) % n]];
                    orient(a, b, c) == 0.0
                });
                let Some(i) = flat else {
                    return Err(DecomposeError::TriangulationFailed { remaining: n });
                };
                let prev = (i + n - 1) % n;
                edge_tags[prev] = edge_tags[prev].or(edge_tags[i]);
                remaining.remove(i);
                edge_tags.remove(i);
            }
        }
    }

    if remaining.len() == 3 && orient(points[remaining[0]], points[remaining[1]], points[remaining[2]]) > 0.0
    {
        triangles.push(Piece {
            indices: remaining,
            tags: edge_tags,
        });
    }
    Ok(triangles)
}

// =============================================================================
// HERTEL-MEHLHORN MERGE
// =============================================================================

/// Merges pieces across shared diagonals while the result stays convex.
fn merge_convex(mut pieces: Vec<Piece>, points: &[DVec2]) -> Vec<Piece> {
    let mut merged_any = true;
    while merged_any {
        merged_any = false;
        'search: for a in 0..pieces.len() {
            for edge_a in 0..pieces[a].indices.len() {
                if pieces[a].tags[edge_a].is_some() {
                    continue;
                }
                let Some((b, edge_b)) = find_twin_edge(&pieces, a, edge_a) else {
                    continue;
                };
                let candidate = merge_at_edge(&pieces[a], &pieces[b], edge_a, edge_b);
                if is_strictly_convex(&candidate.indices, points) {
                    let (low, high) = if a < b { (a, b) } else { (b, a) };
                    pieces.swap_remove(high);
                    pieces[low] = candidate;
                    merged_any = true;
                    break 'search;
                }
            }
        }
    }
    pieces
}

/// Finds the piece holding the reverse of `pieces[a]`'s edge `edge_a`.
fn find_twin_edge(pieces: &[Piece], a: usize, edge_a: usize) -> Option<(usize, usize)> {
    let piece = &pieces[a];
    let n = piece.indices.len();
    let from = piece.indices[edge_a];
    let to = piece.indices[(edge_a + 1) % n];

    pieces.iter().enumerate().find_map(|(b, other)| {
        if b == a {
            return None;
        }
        let m = other.indices.len();
        (0..m)
            .find(|&k| other.indices[k] == to && other.indices[(k + 1) % m] == from)
            .map(|k| (b, k))
    })
}

/// Joins two pieces along a shared edge (reversed in `p2`), dropping it.
fn merge_at_edge(p1: &Piece, p2: &Piece, edge1: usize, edge2: usize) -> Piece {
    let n1 = p1.indices.len();
    let n2 = p2.indices.len();
    let mut indices = Vec::with_capacity(n1 + n2 - 2);
    let mut tags = Vec::with_capacity(n1 + n2 - 2);

    // p1 from the end of the shared edge round to its start.
    for k in 1..n1 {
        let i = (edge1 + k) % n1;
        indices.push(p1.indices[i]);
        tags.push(p1.tags[i]);
    }
    indices.push(p1.indices[edge1]);
    tags.push(p2.tags[(edge2 + 1) % n2]);

    // p2 after the shared edge, excluding both shared vertices.
    for k in 2..n2 {
        let i = (edge2 + k) % n2;
        indices.push(p2.indices[i]);
        tags.push(p2.tags[i]);
    }

    Piece { indices, tags }
}

fn is_strictly_convex(indices: &[usize], points: &[DVec2]) -> bool {
    let n = indices.len();
    (0..n).all(|i| {
        let a = points[indices[(i + n - 1) % n]];
        let b = points[indices[i]];
        let c = points[indices[(i + 1) % n]];
        orient(a, b, c) > 0.0
    })
}

#[cfg(test)]
mod tests;
