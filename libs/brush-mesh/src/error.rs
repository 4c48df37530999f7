//! # Validation Errors
//!
//! First failure reported by the brush validator. Every variant carries the
//! indices needed to locate the offending element.

use thiserror::Error;

/// Reasons a brush mesh is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Mesh has no vertices, polygons or half-edges.
    #[error("Mesh is empty")]
    EmptyMesh,

    /// Half-edge points at a vertex outside the vertex list.
    #[error("Half-edge {edge} references missing vertex {vertex}")]
    InvalidVertexIndex { edge: usize, vertex: usize },

    /// Half-edge twin points outside the half-edge list.
    #[error("Half-edge {edge} references missing twin {twin}")]
    InvalidTwinIndex { edge: usize, twin: usize },

    /// Polygon has fewer than three half-edges.
    #[error("Polygon {polygon} has {edge_count} edges (min: 3)")]
    DegeneratePolygon { polygon: usize, edge_count: usize },

    /// Polygon edge run extends past the half-edge list.
    #[error("Polygon {polygon} edge range {first_edge}..{end} exceeds {half_edge_count} half-edges")]
    EdgeRangeOutOfBounds {
        polygon: usize,
        first_edge: usize,
        end: usize,
        half_edge_count: usize,
    },

    /// Two polygons claim the same half-edge.
    #[error("Half-edge {edge} is shared by polygons {first} and {second}")]
    SharedHalfEdge {
        edge: usize,
        first: usize,
        second: usize,
    },

    /// Half-edge is not owned by any polygon.
    #[error("Half-edge {edge} belongs to no polygon")]
    OrphanHalfEdge { edge: usize },

    /// Half-edge has no twin in a mesh that must be closed.
    #[error("Half-edge {edge} has no twin")]
    OpenBoundary { edge: usize },

    /// `twin(twin(e)) != e`.
    #[error("Half-edge {edge} twins {twin}, but {twin} twins {back:?}")]
    AsymmetricTwin {
        edge: usize,
        twin: usize,
        back: Option<usize>,
    },

    /// Twin pair does not run between the same two vertices in opposite
    /// directions.
    #[error("Half-edge {edge} and its twin {twin} do not share reversed endpoints")]
    MismatchedTwin { edge: usize, twin: usize },

    /// Half-edge starts and ends at the same vertex.
    #[error("Half-edge {edge} starts and ends at vertex {vertex}")]
    ZeroLengthEdge { edge: usize, vertex: usize },

    /// Polygon has no three non-collinear vertices, so no plane exists.
    #[error("Polygon {polygon} has no plane")]
    PlanesNotCalculated { polygon: usize },

    /// Polygon vertex lies too far from the polygon plane.
    #[error("Polygon {polygon} vertex {vertex} is {distance} from its plane (max: {tolerance})")]
    NonPlanarPolygon {
        polygon: usize,
        vertex: usize,
        distance: f64,
        tolerance: f64,
    },

    /// Enclosed volume is not positive: inverted or flat brush.
    #[error("Enclosed volume {volume} is not above {min_volume}")]
    NonPositiveVolume { volume: f64, min_volume: f64 },
}

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;
