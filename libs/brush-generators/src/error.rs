//! # Generator Errors
//!
//! Error types for decomposition, extrusion and whole-generator runs.
//!
//! Configuration errors are raised before any output slot is touched.
//! Sub-mesh failures are collected so siblings survive.

use thiserror::Error;

// =============================================================================
// DECOMPOSITION
// =============================================================================

/// Errors from splitting a profile into convex pieces.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecomposeError {
    /// Point and segment-tag arrays differ in length.
    #[error("Profile has {points} points but {segments} segment tags")]
    MismatchedSegments { points: usize, segments: usize },

    /// Fewer than three points remain after cleanup.
    #[error("Profile has {count} usable points (min: 3)")]
    TooFewPoints { count: usize },

    /// Polygon encloses no area.
    #[error("Profile encloses zero area")]
    ZeroArea,

    /// Two non-adjacent edges touch or cross.
    #[error("Profile edges {first} and {second} intersect")]
    SelfIntersecting { first: usize, second: usize },

    /// Ear clipping found no ear.
    #[error("Triangulation failed with {remaining} vertices left")]
    TriangulationFailed { remaining: usize },
}

// =============================================================================
// EXTRUSION
// =============================================================================

/// Errors from building an extrusion mesh.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtrusionError {
    /// Rings have different vertex counts.
    #[error("Ring sizes differ: {ring0} vs {ring1}")]
    RingLengthMismatch { ring0: usize, ring1: usize },

    /// Per-edge surface list does not match the ring size.
    #[error("Ring has {ring} edges but {edge_surfaces} edge surfaces")]
    EdgeSurfaceMismatch { ring: usize, edge_surfaces: usize },

    /// Fewer than three vertices remain after degenerate removal.
    #[error("Ring has {count} distinct vertices (min: 3)")]
    TooFewVertices { count: usize },

    /// Polygon refers to a surface outside the table.
    #[error("Surface {surface_id} is outside the surface table (len: {table_len})")]
    MissingSurface { surface_id: usize, table_len: usize },
}

// =============================================================================
// GENERATOR
// =============================================================================

/// Errors from a whole generator run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeneratorError {
    /// Surface table length does not match what the generator indexes.
    #[error("Surface table has {actual} entries (expected: {expected})")]
    SurfaceCountMismatch { expected: usize, actual: usize },

    /// Output slice length does not match the required sub-mesh count.
    #[error("Output has {actual} slots (required: {expected})")]
    OutputLengthMismatch { expected: usize, actual: usize },

    /// Definition values are out of range.
    #[error("Invalid definition: {message}")]
    InvalidDefinition { message: String },

    /// Geometry collapsed in a way that cannot be resolved locally.
    #[error("Degenerate geometry: {message}")]
    Degenerate { message: String },

    /// Profile decomposition failed.
    #[error("Decomposition failed: {0}")]
    Decompose(#[from] DecomposeError),

    /// Extrusion construction failed.
    #[error("Extrusion failed: {0}")]
    Extrusion(#[from] ExtrusionError),

    /// Some sub-meshes failed validation and were cleared.
    #[error("Sub-meshes {indices:?} failed validation")]
    InvalidSubMeshes { indices: Vec<usize> },
}

impl GeneratorError {
    /// Creates an invalid definition error.
    pub fn invalid_definition(message: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::Degenerate {
            message: message.into(),
        }
    }

    /// Returns true for errors raised before any output was written.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::SurfaceCountMismatch { .. }
                | Self::OutputLengthMismatch { .. }
                | Self::InvalidDefinition { .. }
                | Self::Decompose(_)
        )
    }
}

/// Result type for generator operations.
pub type GeneratorResult<T> = Result<T, GeneratorError>;
