//! # Brush Generators
//!
//! Turns small parametric descriptions into closed half-edge brushes ready
//! for boolean CSG evaluation.
//!
//! ## Pipeline
//!
//! ```text
//! Curve2D ──sample──► SampledProfile ──decompose──► [ConvexPolygon]
//!                                                        │
//! Path ──subdivide──► [(DMat4, DMat4)] ──────────────────┤
//!                                                        ▼
//!                                    build_extrusion ─► BrushMesh ─► validate
//! ```
//!
//! The stairs generators skip the profile stage and feed computed rings
//! straight into [`extrude::build_extrusion`].
//!
//! ## Example
//!
//! ```rust
//! use brush_generators::generators::{BrushGenerator, LinearStairsDefinition};
//! use brush_mesh::BrushSurface;
//!
//! let stairs = LinearStairsDefinition::default();
//! let surfaces = BrushSurface::numbered_table(stairs.surface_count());
//! let brushes = stairs.generate_brushes(&surfaces).expect("default stairs are valid");
//! assert_eq!(brushes.len(), stairs.required_sub_mesh_count().unwrap());
//! ```

pub mod batch;
pub mod curve;
pub mod decompose;
pub mod error;
pub mod extrude;
pub mod generators;
pub mod path;

pub use batch::{generate_batch, GenerationRequest};
pub use curve::{ControlPoint, ControlPointConstraint, Curve2D, SampledProfile};
pub use decompose::{decompose, ConvexPolygon};
pub use error::{DecomposeError, ExtrusionError, GeneratorError};
pub use extrude::{build_extrusion, classify_side, SideTopology};
pub use generators::{BrushGenerator, CsgOperation, GeneratedBrush};
pub use path::{Path, PathPoint};
