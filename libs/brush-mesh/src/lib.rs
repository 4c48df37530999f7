//! # Brush Mesh
//!
//! Half-edge boundary representation used as the atomic input of boolean
//! CSG evaluation.
//!
//! ## Layout
//!
//! ```text
//! vertices   [DVec3]                        identity = index, local to one mesh
//! polygons   [first_edge, edge_count, ...]  contiguous runs of half-edges
//! half_edges [vertex_index, twin_index]     vertex_index = destination vertex
//! ```
//!
//! ## Lifecycle
//!
//! A generator builds a mesh in one shot with [`BrushMesh::from_parts`],
//! then validates it once. A mesh that fails validation is cleared rather
//! than partially trusted.
//!
//! ```rust
//! use brush_mesh::BrushMesh;
//!
//! let mesh = BrushMesh::empty();
//! assert!(mesh.is_empty());
//! assert!(!mesh.validate());
//! ```

pub mod error;
pub mod mesh;
pub mod plane;
pub mod surface;
pub mod validate;

pub use error::ValidationError;
pub use mesh::{BrushMesh, HalfEdge, Polygon};
pub use plane::Plane;
pub use surface::{BrushSurface, MaterialId, SurfaceDescription, SurfaceFlags, UvMatrix};
