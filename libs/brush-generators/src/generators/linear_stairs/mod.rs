//! # Linear Stairs
//!
//! Straight staircase filling an axis-aligned box. X runs across the
//! stairs, Y up and Z from the front (`min.z`) to the back.
//!
//! Every part is a convex (y, z) profile extruded across its x-range, so
//! each brush has a left cap, a right cap and one side per profile edge.
//!
//! ```text
//!  y
//!  ▲            ┌────┐ tread
//!  │       ┌────┤    │
//!  │  ┌────┤    │    │ riser
//!  │  │    │    │    │
//!  └──┴────┴────┴────┴──► z
//! ```

mod layout;

pub use layout::{LinearStairsLayout, StairsPart, StairsSide};

use crate::curve::polygon_signed_area;
use crate::error::{ExtrusionError, GeneratorResult};
use crate::extrude::build_extrusion;
use crate::generators::{
    check_output, check_surfaces, Aabb, BrushGenerator, CsgOperation, GeneratedBrush,
    SubMeshWriter,
};
use brush_mesh::{BrushMesh, BrushSurface};
use config::constants::DUPLICATE_VERTEX_EPSILON_SQR;
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};
use tracing::trace;

// =============================================================================
// DEFINITION
// =============================================================================

/// Riser style below each tread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StairsRiserType {
    /// Treads only.
    None,
    /// Slab of `riser_depth` behind each step front.
    ThinRiser,
    /// Block as deep as the step.
    #[default]
    ThickRiser,
    /// Slab following the stair slope, `riser_depth` thick below it.
    Smooth,
    /// Block reaching down to the floor.
    FillDown,
}

/// Side wall style of one side of the stairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StairsSideType {
    #[default]
    None,
    /// Wall below the stair line down to the floor.
    Down,
    /// Wall of `side_height` above the stair line.
    Up,
    DownAndUp,
}

/// Surface table entries of the linear stairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinearStairsSurface {
    Top = 0,
    Bottom = 1,
    Left = 2,
    Right = 3,
    Front = 4,
    Back = 5,
    Tread = 6,
    Step = 7,
}

impl LinearStairsSurface {
    /// Number of surface table entries.
    pub const COUNT: usize = 8;
}

/// Linear staircase parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearStairsDefinition {
    /// Box the stairs fill.
    pub bounds: Aabb,
    /// Requested step height; the fitted height divides the rise evenly.
    pub step_height: f64,
    /// Requested step depth.
    pub step_depth: f64,
    /// Tread thickness; zero disables treads.
    pub tread_height: f64,
    /// Tread overhang towards the front.
    pub nosing_depth: f64,
    /// Tread overhang to the sides.
    pub nosing_width: f64,
    /// Flat block height before the first step.
    pub plateau_height: f64,
    /// Riser thickness for `ThinRiser` and `Smooth`.
    pub riser_depth: f64,
    pub side_width: f64,
    pub side_height: f64,
    pub side_depth: f64,
    pub riser_type: StairsRiserType,
    pub left_side: StairsSideType,
    pub right_side: StairsSideType,
}

impl Default for LinearStairsDefinition {
    fn default() -> Self {
        Self {
            bounds: Aabb::default(),
            step_height: 0.2,
            step_depth: 0.2,
            tread_height: 0.02,
            nosing_depth: 0.02,
            nosing_width: 0.01,
            plateau_height: 0.0,
            riser_depth: 0.03,
            side_width: 0.125,
            side_height: 0.04,
            side_depth: 0.1,
            riser_type: StairsRiserType::ThickRiser,
            left_side: StairsSideType::None,
            right_side: StairsSideType::None,
        }
    }
}

// =============================================================================
// GENERATOR
// =============================================================================

impl BrushGenerator for LinearStairsDefinition {
    fn required_sub_mesh_count(&self) -> GeneratorResult<usize> {
        Ok(LinearStairsLayout::new(self)?.total)
    }

    fn surface_count(&self) -> usize {
        LinearStairsSurface::COUNT
    }

    fn generate(&self, surfaces: &[BrushSurface], output: &mut [GeneratedBrush]) -> GeneratorResult<()> {
        check_surfaces(self.surface_count(), surfaces)?;
        let layout = LinearStairsLayout::new(self)?;
        check_output(layout.total, output)?;
        trace!(
            steps = layout.step_count,
            step_height = layout.step_height,
            brushes = layout.total,
            "generating linear stairs"
        );

        // Caps of the x-extrusion come first, then the generator table.
        let mut table = Vec::with_capacity(2 + surfaces.len());
        table.push(surfaces[LinearStairsSurface::Left as usize]);
        table.push(surfaces[LinearStairsSurface::Right as usize]);
        table.extend_from_slice(surfaces);

        let mut writer = SubMeshWriter::new(output);
        for (index, part) in layout.parts().into_iter().enumerate() {
            let (profile, x) = self.part_profile(&layout, part);
            writer.write(index, profile.extrude(x, &table), CsgOperation::Additive);
        }
        writer.finish()
    }
}

impl LinearStairsDefinition {
    /// Profile and x-range of one part.
    fn part_profile(&self, layout: &LinearStairsLayout, part: StairsPart) -> (Profile, [f64; 2]) {
        use LinearStairsSurface::{Front, Step, Top, Tread};

        let floor = layout.min.y;
        let last = layout.step_count - 1;
        match part {
            StairsPart::Riser(k) => {
                let (front, back) = (layout.step_front(k), layout.step_back(k));
                let (top, bottom) = (layout.step_top(k), layout.step_bottom(k));
                let profile = match self.riser_type {
                    StairsRiserType::ThinRiser => {
                        let z = [front, (front + self.riser_depth).min(back)];
                        Profile::slab(z, [top; 2], [bottom; 2], floor, Top, Step)
                    }
                    StairsRiserType::FillDown => {
                        Profile::slab([front, back], [top; 2], [floor; 2], floor, Top, Step)
                    }
                    StairsRiserType::Smooth => {
                        let z = [front, front + layout.step_depth];
                        let underside = z.map(|z| {
                            layout.stair_line(z) - layout.step_height - self.riser_depth
                        });
                        Profile::slab(z, [top; 2], underside, floor, Top, Step)
                    }
                    StairsRiserType::ThickRiser | StairsRiserType::None => {
                        Profile::slab([front, back], [top; 2], [bottom; 2], floor, Top, Step)
                    }
                };
                (profile, layout.inner_x)
            }
            StairsPart::Tread(k) => {
                let top = layout.step_top(k);
                let z = [
                    (layout.step_front(k) - self.nosing_depth).max(layout.min.z),
                    layout.step_back(k),
                ];
                let bottom = (top - self.tread_height).max(floor);
                let profile = Profile::slab(z, [top; 2], [bottom; 2], floor, Tread, Front);
                (profile, layout.tread_x)
            }
            StairsPart::DownRamp(side) => {
                let z = [layout.min.z, layout.last_step_front()];
                let top = z.map(|z| layout.stair_line(z));
                let bottom = top.map(|y| y - self.side_depth);
                let profile = Profile::slab(z, top, bottom, floor, Top, Front);
                (profile, layout.side_x(side, self.side_width))
            }
            StairsPart::UpRamp(side) => {
                let z = [layout.min.z, layout.last_step_front()];
                let bottom = z.map(|z| layout.stair_line(z));
                let top = bottom.map(|y| y + self.side_height);
                let profile = Profile::slab(z, top, bottom, floor, Top, Front);
                (profile, layout.side_x(side, self.side_width))
            }
            StairsPart::TopCap(side) => {
                let z = [layout.last_step_front(), layout.max.z];
                let bottom = layout.step_top(last);
                let top = bottom + self.side_height;
                let profile = Profile::slab(z, [top; 2], [bottom; 2], floor, Top, Front);
                (profile, layout.side_x(side, self.side_width))
            }
            StairsPart::BottomFiller(side) => {
                let z = [layout.last_step_front(), layout.max.z];
                let top = layout.step_top(last);
                let profile = Profile::slab(z, [top; 2], [floor; 2], floor, Top, Front);
                (profile, layout.side_x(side, self.side_width))
            }
        }
    }
}

// =============================================================================
// PROFILE
// =============================================================================

/// Convex outline in the (y, z) plane with one surface per edge. Point `k`
/// is stored as `DVec2(y, z)` and `tags[k]` labels edge `k -> k + 1`.
/// Counter-clockwise outlines face +x.
#[derive(Debug, Clone, PartialEq)]
struct Profile {
    points: Vec<DVec2>,
    tags: Vec<LinearStairsSurface>,
}

impl Profile {
    /// Slab between a top and a bottom line over `z[0]..z[1]`. The bottom
    /// line is clamped to `floor`, inserting the crossing point when it
    /// dips below.
    fn slab(
        mut z: [f64; 2],
        mut top: [f64; 2],
        mut bottom: [f64; 2],
        floor: f64,
        top_tag: LinearStairsSurface,
        front_tag: LinearStairsSurface,
    ) -> Self {
        use LinearStairsSurface::{Back, Bottom};

        if z[0] > z[1] {
            z.swap(0, 1);
            top.swap(0, 1);
            bottom.swap(0, 1);
        }

        let mut points = vec![
            DVec2::new(top[0], z[0]),
            DVec2::new(top[1], z[1]),
            DVec2::new(bottom[1].max(floor), z[1]),
        ];
        let mut tags = vec![top_tag, Back, Bottom];

        let (below0, below1) = (bottom[0] - floor, bottom[1] - floor);
        if below0 * below1 < 0.0 {
            let t = below1 / (below1 - below0);
            points.push(DVec2::new(floor, z[1] + (z[0] - z[1]) * t));
            tags.push(Bottom);
        }
        points.push(DVec2::new(bottom[0].max(floor), z[0]));
        tags.push(front_tag);

        Self { points, tags }.cleaned()
    }

    /// Drops zero-length edges and restores counter-clockwise winding.
    fn cleaned(self) -> Self {
        let n = self.points.len();
        let (mut points, mut tags) = (Vec::with_capacity(n), Vec::with_capacity(n));
        for k in 0..n {
            let next = self.points[(k + 1) % n];
            if self.points[k].distance_squared(next) >= DUPLICATE_VERTEX_EPSILON_SQR {
                points.push(self.points[k]);
                tags.push(self.tags[k]);
            }
        }

        if polygon_signed_area(&points) < 0.0 {
            let m = points.len();
            points.reverse();
            let reversed: Vec<_> = (0..m).map(|k| tags[(2 * m - 2 - k) % m]).collect();
            tags = reversed;
        }
        Self { points, tags }
    }

    /// Extrudes the outline from `x[0]` (left cap) to `x[1]` (right cap).
    ///
    /// `table` starts with the left and right cap surfaces followed by the
    /// generator's surface table.
    fn extrude(&self, x: [f64; 2], table: &[BrushSurface]) -> Result<BrushMesh, ExtrusionError> {
        let ring = |x: f64| -> Vec<DVec3> {
            self.points
                .iter()
                .map(|p| DVec3::new(x, p.x, p.y))
                .collect()
        };
        let n = self.points.len();
        let edge_surfaces: Vec<usize> = (0..n)
            .map(|e| 2 + self.tags[(e + n - 1) % n] as usize)
            .collect();
        build_extrusion(&ring(x[0]), &ring(x[1]), Some(&edge_surfaces), table, false)
    }
}
