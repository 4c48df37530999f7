//! # Surface Metadata
//!
//! Per-polygon surface description and the material/surface table entries
//! generators read from.

use glam::{DVec2, DVec3, DVec4};
use serde::{Deserialize, Serialize};

/// Smoothing group value meaning "not smoothed with any neighbour".
pub const SMOOTHING_GROUP_NONE: u32 = 0;

// =============================================================================
// MATERIAL
// =============================================================================

/// Opaque reference to a brush material owned by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub u32);

// =============================================================================
// SURFACE FLAGS
// =============================================================================

bitflags::bitflags! {
    /// Bitmask of surface behaviour flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct SurfaceFlags: u32 {
        /// No flags set.
        const NONE = 0;
        /// Texture coordinates follow the object instead of world space.
        const TEXTURE_LOCKED_TO_OBJECT = 1 << 0;
        /// Surface is not rendered but still takes part in CSG.
        const HIDDEN = 1 << 1;
    }
}

impl Default for SurfaceFlags {
    fn default() -> Self {
        Self::empty()
    }
}

// =============================================================================
// UV MATRIX
// =============================================================================

/// Planar texture projection: two rows mapping a homogeneous point to UV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvMatrix {
    /// Row producing the U coordinate.
    pub u: DVec4,
    /// Row producing the V coordinate.
    pub v: DVec4,
}

impl UvMatrix {
    /// Identity projection (`u = x`, `v = y`).
    pub const IDENTITY: UvMatrix = UvMatrix {
        u: DVec4::new(1.0, 0.0, 0.0, 0.0),
        v: DVec4::new(0.0, 1.0, 0.0, 0.0),
    };

    /// Projects a plane-space point to texture coordinates.
    pub fn project(&self, point: DVec3) -> DVec2 {
        let p = point.extend(1.0);
        DVec2::new(self.u.dot(p), self.v.dot(p))
    }
}

impl Default for UvMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// =============================================================================
// SURFACE DESCRIPTION
// =============================================================================

/// Per-polygon surface metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceDescription {
    /// Texture projection.
    pub uv_matrix: UvMatrix,
    /// Behaviour flags.
    pub surface_flags: SurfaceFlags,
    /// Polygons sharing a non-zero group shade continuously across their
    /// shared edges.
    pub smoothing_group: u32,
}

impl SurfaceDescription {
    /// Returns a copy assigned to `smoothing_group`.
    pub fn with_smoothing_group(mut self, smoothing_group: u32) -> Self {
        self.smoothing_group = smoothing_group;
        self
    }
}

/// One entry of a generator's material/surface table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BrushSurface {
    /// Material applied to polygons using this entry.
    pub material: MaterialId,
    /// Surface description copied to polygons using this entry.
    pub description: SurfaceDescription,
}

impl BrushSurface {
    /// Surface with `material` and a default description.
    pub fn new(material: MaterialId) -> Self {
        Self {
            material,
            description: SurfaceDescription::default(),
        }
    }

    /// Builds a table of `count` surfaces whose materials are numbered
    /// from zero.
    pub fn numbered_table(count: usize) -> Vec<BrushSurface> {
        (0..count)
            .map(|index| BrushSurface::new(MaterialId(index as u32)))
            .collect()
    }
}
