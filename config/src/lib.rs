//! # Config Crate
//!
//! Centralized tolerances and tunables for the brush mesh crates.
//! All epsilons used by the extrusion builder, the validator, the sweep
//! evaluator and the stairs generators are defined here so that the
//! numeric behaviour of the whole pipeline can be read in one place.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{QUAD_PLANARITY_EPSILON, segments_for_angle};
//!
//! // A side quad whose fourth vertex is this close to the plane stays a quad
//! let distance: f64 = 1.0e-4;
//! assert!(distance.abs() < QUAD_PLANARITY_EPSILON);
//!
//! // Sweep subdivision for a 45 degree turn
//! assert_eq!(segments_for_angle(45.0), 9);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Pure values, usable from any crate
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
