//! # Batch Generation
//!
//! Runs many independent generator requests in parallel. Generators share
//! no state, so each request gets its own output buffer and results come
//! back in request order.

use crate::error::GeneratorResult;
use crate::generators::{BrushGenerator, GeneratedBrush};
use brush_mesh::BrushSurface;
use rayon::prelude::*;
use tracing::debug;

/// One generator together with the surface table it indexes.
#[derive(Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub generator: &'a dyn BrushGenerator,
    pub surfaces: &'a [BrushSurface],
}

impl<'a> GenerationRequest<'a> {
    /// Creates a request.
    pub fn new(generator: &'a dyn BrushGenerator, surfaces: &'a [BrushSurface]) -> Self {
        Self {
            generator,
            surfaces,
        }
    }
}

impl std::fmt::Debug for GenerationRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("surface_count", &self.surfaces.len())
            .finish_non_exhaustive()
    }
}

/// Generates every request in parallel.
///
/// A failing request does not affect the others.
///
/// # Example
///
/// ```rust
/// use brush_generators::generators::{LinearStairsDefinition, SpiralStairsDefinition};
/// use brush_generators::{generate_batch, GenerationRequest};
/// use brush_mesh::BrushSurface;
///
/// let linear = LinearStairsDefinition::default();
/// let spiral = SpiralStairsDefinition::default();
/// let surfaces = BrushSurface::numbered_table(8);
///
/// let results = generate_batch(&[
///     GenerationRequest::new(&linear, &surfaces),
///     GenerationRequest::new(&spiral, &surfaces),
/// ]);
/// assert_eq!(results.len(), 2);
/// assert!(results.iter().all(|result| result.is_ok()));
/// ```
pub fn generate_batch(requests: &[GenerationRequest<'_>]) -> Vec<GeneratorResult<Vec<GeneratedBrush>>> {
    debug!(requests = requests.len(), "generating brush batch");
    requests
        .par_iter()
        .map(|request| request.generator.generate_brushes(request.surfaces))
        .collect()
}
