//! # Brush Generators
//!
//! Parametric definitions that expand into a fixed, pre-counted list of
//! brushes.
//!
//! ## Contract
//!
//! 1. [`BrushGenerator::required_sub_mesh_count`] is a pure function of the
//!    definition; callers size the output with it.
//! 2. [`BrushGenerator::generate`] checks the surface table, output length
//!    and definition before writing anything.
//! 3. Every written mesh is validated. A failing slot is left empty and
//!    reported through [`GeneratorError::InvalidSubMeshes`]; the other
//!    slots are kept.

mod extruded_shape;
mod linear_stairs;
mod spiral_stairs;

pub use extruded_shape::ExtrudedShapeDefinition;
pub use linear_stairs::{
    LinearStairsDefinition, LinearStairsLayout, LinearStairsSurface, StairsPart, StairsRiserType,
    StairsSide, StairsSideType,
};
pub use spiral_stairs::{
    SpiralStairsDefinition, SpiralStairsLayout, SpiralStairsPart, SpiralStairsSurface,
};

use crate::error::{ExtrusionError, GeneratorError, GeneratorResult};
use brush_mesh::{BrushMesh, BrushSurface};
use config::constants::{MAX_STEP_COUNT, STAIRS_EPSILON};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

// =============================================================================
// OUTPUT TYPES
// =============================================================================

/// How a brush combines with the brushes before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CsgOperation {
    /// Union.
    #[default]
    Additive,
    /// Difference.
    Subtractive,
    /// Intersection.
    Intersecting,
}

/// One generated brush and the operation it is meant for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedBrush {
    /// Validated mesh, or empty when the slot failed.
    pub mesh: BrushMesh,
    /// Boolean operation the evaluator should apply.
    pub operation: CsgOperation,
}

impl GeneratedBrush {
    /// Creates a brush.
    pub fn new(mesh: BrushMesh, operation: CsgOperation) -> Self {
        Self { mesh, operation }
    }
}

/// Axis-aligned box given by two corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    /// Box spanning `min` to `max`.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Extent along each axis.
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Returns true when both corners are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

impl Default for Aabb {
    /// Unit cube at the origin.
    fn default() -> Self {
        Self::new(DVec3::ZERO, DVec3::ONE)
    }
}

/// Contiguous run of output slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotRange {
    pub start: usize,
    pub count: usize,
}

impl SlotRange {
    /// One past the last slot.
    pub fn end(&self) -> usize {
        self.start + self.count
    }

    /// Claims `count` slots at `cursor` (none unless `present`) and
    /// advances the cursor.
    pub(crate) fn take(cursor: &mut usize, present: bool, count: usize) -> Self {
        let range = Self {
            start: *cursor,
            count: if present { count } else { 0 },
        };
        *cursor = range.end();
        range
    }
}

// =============================================================================
// GENERATOR TRAIT
// =============================================================================

/// A definition that expands into brushes.
///
/// # Example
///
/// ```rust
/// use brush_generators::generators::{BrushGenerator, GeneratedBrush, SpiralStairsDefinition};
/// use brush_mesh::BrushSurface;
///
/// let stairs = SpiralStairsDefinition::default();
/// let surfaces = BrushSurface::numbered_table(stairs.surface_count());
/// let mut output = vec![GeneratedBrush::default(); stairs.required_sub_mesh_count().unwrap()];
/// stairs.generate(&surfaces, &mut output).unwrap();
/// assert!(output.iter().all(|brush| brush.mesh.validate()));
/// ```
pub trait BrushGenerator: Send + Sync {
    /// Number of brushes [`BrushGenerator::generate`] writes.
    fn required_sub_mesh_count(&self) -> GeneratorResult<usize>;

    /// Length of the surface table the generator indexes.
    fn surface_count(&self) -> usize;

    /// Writes every brush into `output`, which must hold exactly
    /// [`BrushGenerator::required_sub_mesh_count`] slots.
    fn generate(&self, surfaces: &[BrushSurface], output: &mut [GeneratedBrush])
        -> GeneratorResult<()>;

    /// Allocates the output and generates into it.
    fn generate_brushes(&self, surfaces: &[BrushSurface]) -> GeneratorResult<Vec<GeneratedBrush>> {
        let count = self.required_sub_mesh_count()?;
        let mut output = vec![GeneratedBrush::default(); count];
        self.generate(surfaces, &mut output)?;
        Ok(output)
    }
}

// =============================================================================
// SHARED CHECKS
// =============================================================================

/// Rejects a surface table of the wrong length.
pub(crate) fn check_surfaces(expected: usize, surfaces: &[BrushSurface]) -> GeneratorResult<()> {
    if surfaces.len() != expected {
        return Err(GeneratorError::SurfaceCountMismatch {
            expected,
            actual: surfaces.len(),
        });
    }
    Ok(())
}

/// Rejects an output slice of the wrong length.
pub(crate) fn check_output(expected: usize, output: &[GeneratedBrush]) -> GeneratorResult<()> {
    if output.len() != expected {
        return Err(GeneratorError::OutputLengthMismatch {
            expected,
            actual: output.len(),
        });
    }
    Ok(())
}

/// Fails with `message` unless `condition` holds.
pub(crate) fn ensure(condition: bool, message: impl FnOnce() -> String) -> GeneratorResult<()> {
    if condition {
        Ok(())
    } else {
        Err(GeneratorError::invalid_definition(message()))
    }
}

/// Whole steps of `step_height` that fit in `rise`, at least one.
pub(crate) fn step_count(rise: f64, step_height: f64) -> GeneratorResult<usize> {
    let steps = ((rise + STAIRS_EPSILON) / step_height).floor().max(1.0);
    ensure(steps <= MAX_STEP_COUNT as f64, || {
        format!("{steps} steps exceed the limit of {MAX_STEP_COUNT}")
    })?;
    Ok(steps as usize)
}

// =============================================================================
// SUB-MESH WRITER
// =============================================================================

/// Validates meshes into output slots and remembers which slots failed.
pub(crate) struct SubMeshWriter<'a> {
    output: &'a mut [GeneratedBrush],
    failed: Vec<usize>,
}

impl<'a> SubMeshWriter<'a> {
    pub fn new(output: &'a mut [GeneratedBrush]) -> Self {
        Self {
            output,
            failed: Vec::new(),
        }
    }

    /// Writes `mesh` into slot `index` if it builds and validates;
    /// otherwise leaves the slot empty.
    pub fn write(
        &mut self,
        index: usize,
        mesh: Result<BrushMesh, ExtrusionError>,
        operation: CsgOperation,
    ) {
        let Some(slot) = self.output.get_mut(index) else {
            self.failed.push(index);
            return;
        };
        *slot = GeneratedBrush::default();

        let mesh = match mesh {
            Ok(mesh) => mesh,
            Err(error) => {
                debug!(index, %error, "sub-mesh extrusion failed");
                self.failed.push(index);
                return;
            }
        };
        match mesh.validated() {
            Ok(mesh) => *slot = GeneratedBrush::new(mesh, operation),
            Err(error) => {
                debug!(index, %error, "sub-mesh cleared");
                self.failed.push(index);
            }
        }
    }

    /// Reports the failed slots, if any.
    pub fn finish(self) -> GeneratorResult<()> {
        if self.failed.is_empty() {
            Ok(())
        } else {
            Err(GeneratorError::InvalidSubMeshes {
                indices: self.failed,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> Result<BrushMesh, ExtrusionError> {
        let ring0 = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, -1.0),
            DVec3::new(0.0, 0.0, -1.0),
        ];
        let ring1: Vec<DVec3> = ring0.iter().map(|v| *v + DVec3::Y).collect();
        crate::extrude::build_extrusion(&ring0, &ring1, None, &BrushSurface::numbered_table(6), false)
    }

    fn inside_out_cube() -> Result<BrushMesh, ExtrusionError> {
        let ring1 = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, -1.0),
            DVec3::new(0.0, 0.0, -1.0),
        ];
        let ring0: Vec<DVec3> = ring1.iter().map(|v| *v + DVec3::Y).collect();
        crate::extrude::build_extrusion(&ring0, &ring1, None, &BrushSurface::numbered_table(6), false)
    }

    #[test]
    fn writer_keeps_valid_siblings() {
        let mut output = vec![GeneratedBrush::default(); 3];
        let mut writer = SubMeshWriter::new(&mut output);
        writer.write(0, cube(), CsgOperation::Additive);
        writer.write(1, inside_out_cube(), CsgOperation::Additive);
        writer.write(2, cube(), CsgOperation::Subtractive);

        assert_eq!(
            writer.finish(),
            Err(GeneratorError::InvalidSubMeshes { indices: vec![1] })
        );
        assert!(output[0].mesh.validate());
        assert!(output[1].mesh.is_empty());
        assert_eq!(output[2].operation, CsgOperation::Subtractive);
    }

    #[test]
    fn writer_records_extrusion_errors() {
        let mut output = vec![GeneratedBrush::default(); 1];
        let mut writer = SubMeshWriter::new(&mut output);
        writer.write(0, Err(ExtrusionError::TooFewVertices { count: 2 }), CsgOperation::Additive);
        assert!(writer.finish().is_err());
        assert!(output[0].mesh.is_empty());
    }

    #[test]
    fn length_checks() {
        let surfaces = BrushSurface::numbered_table(3);
        assert!(check_surfaces(3, &surfaces).is_ok());
        assert_eq!(
            check_surfaces(4, &surfaces),
            Err(GeneratorError::SurfaceCountMismatch {
                expected: 4,
                actual: 3
            })
        );
        let output = vec![GeneratedBrush::default(); 2];
        assert!(check_output(2, &output).is_ok());
        assert!(check_output(1, &output).unwrap_err().is_configuration_error());
    }

    #[test]
    fn aabb_size() {
        let bounds = Aabb::new(DVec3::new(-1.0, 0.0, 2.0), DVec3::new(1.0, 3.0, 4.0));
        assert_eq!(bounds.size(), DVec3::new(2.0, 3.0, 2.0));
        assert_eq!(Aabb::default().size(), DVec3::ONE);
    }
}
