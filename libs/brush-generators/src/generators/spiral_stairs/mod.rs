//! # Spiral Stairs
//!
//! Steps winding around a vertical axis through `origin`. Angles are
//! measured counter-clockwise seen from above, starting at +x, so a plan
//! point at angle `a` and radius `r` lies at
//! `origin + (r cos a, y, -r sin a)`.
//!
//! Every step occupies one angular sector. Sector outlines are built
//! directly as vertex lists:
//!
//! - **box**: annular quad between the inner and outer radius
//! - **wedge**: triangle through the axis when there is no hole
//! - **sloped wedge / sloped box**: `Smooth` risers whose underside follows
//!   the stair slope
//!
//! There are no separate pyramid primitives: a sloped wedge whose underside
//! meets the top at the axis covers the triangular and square pyramid cases.
//!
//! An outer cylinder (`Intersecting`) and, around a hole, an inner cylinder
//! (`Subtractive`) trim the steps once the brushes are combined.

mod layout;

pub use layout::{SpiralStairsLayout, SpiralStairsPart};

use crate::error::{ExtrusionError, GeneratorResult};
use crate::extrude::build_extrusion;
use crate::generators::{
    check_output, check_surfaces, BrushGenerator, CsgOperation, GeneratedBrush, StairsRiserType,
    SubMeshWriter,
};
use brush_mesh::{BrushMesh, BrushSurface};
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::trace;

// =============================================================================
// DEFINITION
// =============================================================================

/// Surface table entries of the spiral stairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpiralStairsSurface {
    Top = 0,
    Bottom = 1,
    Front = 2,
    Back = 3,
    Inner = 4,
    Outer = 5,
    Tread = 6,
    Step = 7,
}

impl SpiralStairsSurface {
    /// Number of surface table entries.
    pub const COUNT: usize = 8;
}

/// Spiral staircase parameters. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpiralStairsDefinition {
    /// Axis foot point.
    pub origin: DVec3,
    pub height: f64,
    pub outer_diameter: f64,
    /// Hole diameter; below the stairs epsilon the steps meet at the axis.
    pub inner_diameter: f64,
    /// Requested step height; the fitted height divides `height` evenly.
    pub step_height: f64,
    /// Tread thickness; zero disables treads.
    pub tread_height: f64,
    /// Tread overhang in front of the step, measured on the outer circle.
    pub nosing_depth: f64,
    /// Tread overhang past the outer radius.
    pub nosing_width: f64,
    /// Riser thickness for `ThinRiser` and `Smooth`.
    pub riser_depth: f64,
    pub start_angle: f64,
    /// Total turn; negative values wind clockwise and may exceed 360.
    pub rotation: f64,
    pub inner_segments: u32,
    pub outer_segments: u32,
    pub riser_type: StairsRiserType,
}

impl Default for SpiralStairsDefinition {
    fn default() -> Self {
        Self {
            origin: DVec3::ZERO,
            height: 1.0,
            outer_diameter: 4.0,
            inner_diameter: 1.0,
            step_height: 0.2,
            tread_height: 0.03,
            nosing_depth: 0.05,
            nosing_width: 0.05,
            riser_depth: 0.1,
            start_angle: 0.0,
            rotation: 90.0,
            inner_segments: 8,
            outer_segments: 16,
            riser_type: StairsRiserType::ThickRiser,
        }
    }
}

// =============================================================================
// GENERATOR
// =============================================================================

impl BrushGenerator for SpiralStairsDefinition {
    fn required_sub_mesh_count(&self) -> GeneratorResult<usize> {
        Ok(SpiralStairsLayout::new(self)?.total)
    }

    fn surface_count(&self) -> usize {
        SpiralStairsSurface::COUNT
    }

    fn generate(&self, surfaces: &[BrushSurface], output: &mut [GeneratedBrush]) -> GeneratorResult<()> {
        check_surfaces(self.surface_count(), surfaces)?;
        let layout = SpiralStairsLayout::new(self)?;
        check_output(layout.total, output)?;
        trace!(
            steps = layout.step_count,
            step_angle = layout.step_angle.to_degrees(),
            brushes = layout.total,
            "generating spiral stairs"
        );

        let mut writer = SubMeshWriter::new(output);
        for (index, part) in layout.parts().into_iter().enumerate() {
            let (mesh, operation) = self.part_mesh(&layout, part, surfaces);
            writer.write(index, mesh, operation);
        }
        writer.finish()
    }
}

impl SpiralStairsDefinition {
    fn part_mesh(
        &self,
        layout: &SpiralStairsLayout,
        part: SpiralStairsPart,
        surfaces: &[BrushSurface],
    ) -> (Result<BrushMesh, ExtrusionError>, CsgOperation) {
        use SpiralStairsSurface::{Back, Bottom, Front, Inner, Outer, Step, Top, Tread};

        let floor = self.origin.y;
        let inner = if layout.has_hole() {
            layout.inner_radius
        } else {
            0.0
        };
        let outer = layout.outer_radius;
        match part {
            SpiralStairsPart::Riser(k) => {
                let [front, back] = layout.step_angles(k);
                let bottom = floor + layout.step_bottom(k);
                let top = floor + layout.step_top(k);
                let mesh = match self.riser_type {
                    StairsRiserType::ThinRiser => {
                        let span = (self.riser_depth / outer).min(layout.step_angle.abs());
                        let back = front + layout.turn_sign() * span;
                        Sector::new([front, back], [inner, outer], [Step, Back])
                            .plan()
                            .prism(self.origin, bottom, top, [Bottom, Top], surfaces)
                    }
                    StairsRiserType::FillDown => Sector::new([front, back], [inner, outer], [Step, Back])
                        .plan()
                        .prism(self.origin, floor, top, [Bottom, Top], surfaces),
                    StairsRiserType::Smooth => {
                        let underside = [
                            (bottom - self.riser_depth).max(floor),
                            (top - self.riser_depth).max(floor),
                        ];
                        Sector::new([front, back], [inner, outer], [Step, Back])
                            .sloped(self.origin, underside, top, surfaces)
                    }
                    StairsRiserType::ThickRiser | StairsRiserType::None => {
                        Sector::new([front, back], [inner, outer], [Step, Back])
                            .plan()
                            .prism(self.origin, bottom, top, [Bottom, Top], surfaces)
                    }
                };
                (mesh, CsgOperation::Additive)
            }
            SpiralStairsPart::Tread(k) => {
                let [front, back] = layout.step_angles(k);
                let front = front - layout.turn_sign() * self.nosing_depth / outer;
                let top = floor + layout.step_top(k);
                let bottom = (top - self.tread_height).max(floor);
                let mesh = Sector::new([front, back], [inner, outer + self.nosing_width], [Front, Back])
                    .plan()
                    .prism(self.origin, bottom, top, [Bottom, Tread], surfaces);
                (mesh, CsgOperation::Additive)
            }
            SpiralStairsPart::OuterCylinder => {
                let plan = Plan::cylinder(
                    outer + self.nosing_width,
                    self.outer_segments,
                    layout.start_angle,
                    Outer,
                );
                let mesh = plan.prism(self.origin, floor, floor + self.height, [Bottom, Top], surfaces);
                (mesh, CsgOperation::Intersecting)
            }
            SpiralStairsPart::InnerCylinder => {
                let plan = Plan::cylinder(inner, self.inner_segments, layout.start_angle, Inner);
                let mesh = plan.prism(self.origin, floor, floor + self.height, [Bottom, Top], surfaces);
                (mesh, CsgOperation::Subtractive)
            }
        }
    }
}

// =============================================================================
// SECTOR
// =============================================================================

/// Angular sector between two rays, with `lo < hi`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Sector {
    lo: f64,
    hi: f64,
    inner: f64,
    outer: f64,
    lo_tag: SpiralStairsSurface,
    hi_tag: SpiralStairsSurface,
    /// The back ray is `lo`.
    flipped: bool,
}

impl Sector {
    /// Sector from the front ray to the back ray, in either turning
    /// direction. `tags` are the front and back surfaces.
    fn new(angles: [f64; 2], radii: [f64; 2], tags: [SpiralStairsSurface; 2]) -> Self {
        let flipped = angles[0] > angles[1];
        let by_ray = |[front, back]: [f64; 2]| if flipped { [back, front] } else { [front, back] };
        let [lo, hi] = by_ray(angles);
        let (lo_tag, hi_tag) = if flipped {
            (tags[1], tags[0])
        } else {
            (tags[0], tags[1])
        };
        Self {
            lo,
            hi,
            inner: radii[0],
            outer: radii[1],
            lo_tag,
            hi_tag,
            flipped,
        }
    }

    /// Radius of the outer corners, chosen so the outer chord touches the
    /// outer circle.
    fn far(&self) -> f64 {
        self.outer / ((self.hi - self.lo) / 2.0).cos()
    }

    fn is_wedge(&self) -> bool {
        self.inner <= 0.0
    }

    /// Plan outline: a box, or a wedge through the axis.
    fn plan(&self) -> Plan {
        use SpiralStairsSurface::{Inner, Outer};

        let far = self.far();
        if self.is_wedge() {
            Plan {
                points: vec![DVec2::ZERO, polar(self.lo, far), polar(self.hi, far)],
                tags: vec![self.lo_tag, Outer, self.hi_tag],
            }
        } else {
            Plan {
                points: vec![
                    polar(self.lo, self.inner),
                    polar(self.lo, far),
                    polar(self.hi, far),
                    polar(self.hi, self.inner),
                ],
                tags: vec![self.lo_tag, Outer, self.hi_tag, Inner],
            }
        }
    }

    /// Sector with a flat top and an underside sloping from
    /// `underside[0]` at the front ray to `underside[1]` at the back ray.
    fn sloped(
        &self,
        origin: DVec3,
        underside: [f64; 2],
        top: f64,
        surfaces: &[BrushSurface],
    ) -> Result<BrushMesh, ExtrusionError> {
        use SpiralStairsSurface::{Bottom, Inner, Outer, Top};

        let [bottom_lo, bottom_hi] = if self.flipped {
            [underside[1], underside[0]]
        } else {
            underside
        };

        if self.is_wedge() {
            // The axis vertex sits halfway between the two rays.
            let middle = (bottom_lo + bottom_hi) / 2.0;
            let plan = self.plan();
            let bottoms = [middle, bottom_lo, bottom_hi];
            return plan.extrude(origin, &bottoms, top, [Bottom, Top], surfaces);
        }

        // Extruded around the axis from the `lo` face to the `hi` face so
        // the twisted underside is the only side that needs splitting.
        let far = self.far();
        let face = |angle: f64, bottom: f64| -> Vec<DVec3> {
            let (near, outer) = (polar(angle, self.inner), polar(angle, far));
            vec![
                world(origin, near, bottom),
                world(origin, near, top),
                world(origin, outer, top),
                world(origin, outer, bottom),
            ]
        };
        let tags = [Inner, Top, Outer, Bottom];
        let edge_surfaces: Vec<usize> = (0..tags.len())
            .map(|e| 2 + tags[(e + tags.len() - 1) % tags.len()] as usize)
            .collect();
        let table = local_table([self.lo_tag, self.hi_tag], surfaces);
        build_extrusion(
            &face(self.lo, bottom_lo),
            &face(self.hi, bottom_hi),
            Some(&edge_surfaces),
            &table,
            false,
        )
    }
}

// =============================================================================
// PLAN
// =============================================================================

/// Convex outline seen from above, counter-clockwise, with one surface per
/// edge. `tags[k]` labels edge `k -> k + 1`.
#[derive(Debug, Clone, PartialEq)]
struct Plan {
    points: Vec<DVec2>,
    tags: Vec<SpiralStairsSurface>,
}

impl Plan {
    /// Regular polygon with its first vertex at `start`.
    fn cylinder(radius: f64, segments: u32, start: f64, tag: SpiralStairsSurface) -> Self {
        let points = (0..segments)
            .map(|i| polar(start + TAU * f64::from(i) / f64::from(segments), radius))
            .collect();
        Self {
            points,
            tags: vec![tag; segments as usize],
        }
    }

    /// Vertical prism between `bottom` and `top`.
    fn prism(
        &self,
        origin: DVec3,
        bottom: f64,
        top: f64,
        caps: [SpiralStairsSurface; 2],
        surfaces: &[BrushSurface],
    ) -> Result<BrushMesh, ExtrusionError> {
        let bottoms = vec![bottom; self.points.len()];
        self.extrude(origin, &bottoms, top, caps, surfaces)
    }

    /// Vertical extrusion from a per-vertex `bottoms` height up to `top`.
    fn extrude(
        &self,
        origin: DVec3,
        bottoms: &[f64],
        top: f64,
        caps: [SpiralStairsSurface; 2],
        surfaces: &[BrushSurface],
    ) -> Result<BrushMesh, ExtrusionError> {
        let ring0: Vec<DVec3> = self
            .points
            .iter()
            .zip(bottoms)
            .map(|(p, y)| world(origin, *p, *y))
            .collect();
        let ring1: Vec<DVec3> = self.points.iter().map(|p| world(origin, *p, top)).collect();
        let n = self.points.len();
        let edge_surfaces: Vec<usize> = (0..n)
            .map(|e| 2 + self.tags[(e + n - 1) % n] as usize)
            .collect();
        let table = local_table(caps, surfaces);
        build_extrusion(&ring0, &ring1, Some(&edge_surfaces), &table, false)
    }
}

/// Cap surfaces followed by the generator's surface table.
fn local_table(caps: [SpiralStairsSurface; 2], surfaces: &[BrushSurface]) -> Vec<BrushSurface> {
    let mut table = Vec::with_capacity(2 + surfaces.len());
    table.extend(caps.iter().filter_map(|cap| surfaces.get(*cap as usize).copied()));
    table.extend_from_slice(surfaces);
    table
}

#[inline]
fn polar(angle: f64, radius: f64) -> DVec2 {
    DVec2::new(radius * angle.cos(), radius * angle.sin())
}

#[inline]
fn world(origin: DVec3, plan: DVec2, y: f64) -> DVec3 {
    DVec3::new(origin.x + plan.x, y, origin.z - plan.y)
}

#[cfg(test)]
mod tests;
