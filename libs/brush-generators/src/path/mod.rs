//! # Sweep Paths
//!
//! Keyframes positioning a profile in space, their interpolation and the
//! subdivision heuristic deciding how many extrusion segments sit between
//! two keyframes.
//!
//! A profile lives in the keyframe's local XZ plane and is swept along
//! local +Y. Keyframe scale therefore applies to local X and Z.

use crate::error::{GeneratorError, GeneratorResult};
use config::constants::{segments_for_angle, ASPECT_RATIO_EPSILON};
use glam::{DMat4, DQuat, DVec2, DVec3, EulerRot};
use serde::{Deserialize, Serialize};

// =============================================================================
// PATH POINT
// =============================================================================

/// One sweep keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    /// Keyframe position.
    pub position: DVec3,
    /// Keyframe orientation.
    pub rotation: DQuat,
    /// Scale of local X (`x`) and local Z (`y`).
    pub scale: DVec2,
}

impl Default for PathPoint {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            scale: DVec2::ONE,
        }
    }
}

impl PathPoint {
    /// Creates a keyframe.
    pub fn new(position: DVec3, rotation: DQuat, scale: DVec2) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Unrotated, unscaled keyframe at `position`.
    pub fn at(position: DVec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Local-to-world transform of this keyframe.
    pub fn transform(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(
            DVec3::new(self.scale.x, 1.0, self.scale.y),
            self.rotation,
            self.position,
        )
    }

    /// X/Z scale aspect ratio.
    fn aspect_ratio(&self) -> f64 {
        self.scale.x / self.scale.y
    }
}

/// Transform between two keyframes at `t` in `[0, 1]`.
///
/// Position and scale are interpolated linearly, rotation spherically;
/// the result scales, then rotates, then translates.
pub fn interpolate(a: &PathPoint, b: &PathPoint, t: f64) -> DMat4 {
    let position = a.position.lerp(b.position, t);
    let rotation = a.rotation.slerp(b.rotation, t);
    let scale = a.scale.lerp(b.scale, t);
    DMat4::from_scale_rotation_translation(DVec3::new(scale.x, 1.0, scale.y), rotation, position)
}

/// Number of extrusion segments needed between `a` and `b`.
///
/// One segment per started 5 degrees of the largest per-axis relative
/// rotation, at least one. When the X/Z aspect ratio changes the count is
/// rounded up to an even number so a midpoint exists.
///
/// # Example
///
/// ```rust
/// use brush_generators::path::{subdivision_count, PathPoint};
/// use glam::{DQuat, DVec3};
///
/// let a = PathPoint::at(DVec3::ZERO);
/// let mut b = PathPoint::at(DVec3::Y);
/// assert_eq!(subdivision_count(&a, &b), 1);
///
/// b.rotation = DQuat::from_rotation_x(88f64.to_radians());
/// assert_eq!(subdivision_count(&a, &b), 18);
/// ```
pub fn subdivision_count(a: &PathPoint, b: &PathPoint) -> u32 {
    let relative = b.rotation * a.rotation.inverse();
    let (x, y, z) = relative.to_euler(EulerRot::XYZ);
    let max_angle = [x, y, z]
        .into_iter()
        .map(|angle| fold_angle(angle.to_degrees()))
        .fold(0.0, f64::max);

    let mut count = segments_for_angle(max_angle);
    let aspect_changed = (a.aspect_ratio() - b.aspect_ratio()).abs() > ASPECT_RATIO_EPSILON;
    if aspect_changed && count % 2 == 1 {
        count += 1;
    }
    count
}

/// Reduces an angle in degrees to its magnitude in `[0, 180]`.
fn fold_angle(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        360.0 - wrapped
    } else {
        wrapped
    }
}

// =============================================================================
// PATH
// =============================================================================

/// Ordered, open sequence of at least two keyframes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    points: Vec<PathPoint>,
}

impl Default for Path {
    /// Unit-length path along +Y.
    fn default() -> Self {
        Self {
            points: vec![PathPoint::at(DVec3::ZERO), PathPoint::at(DVec3::Y)],
        }
    }
}

impl Path {
    /// Creates a path, rejecting fewer than two keyframes or non-finite
    /// values.
    pub fn new(points: Vec<PathPoint>) -> GeneratorResult<Self> {
        let path = Self { points };
        path.check()?;
        Ok(path)
    }

    /// Checks the keyframe invariants.
    pub fn check(&self) -> GeneratorResult<()> {
        if self.points.len() < 2 {
            return Err(GeneratorError::invalid_definition(format!(
                "path needs at least 2 points, got {}",
                self.points.len()
            )));
        }
        let finite = self.points.iter().all(|p| {
            p.position.is_finite() && p.rotation.is_finite() && p.scale.is_finite()
        });
        if !finite {
            return Err(GeneratorError::invalid_definition(
                "path contains non-finite values",
            ));
        }
        if self.points.iter().any(|p| p.scale.x == 0.0 || p.scale.y == 0.0) {
            return Err(GeneratorError::invalid_definition(
                "path scale must be non-zero",
            ));
        }
        Ok(())
    }

    /// Keyframes in order.
    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    /// Subdivision count of every keyframe interval.
    pub fn subdivisions(&self) -> Vec<u32> {
        self.points
            .windows(2)
            .map(|pair| subdivision_count(&pair[0], &pair[1]))
            .collect()
    }

    /// Total number of extrusion segments along the path.
    pub fn total_subdivisions(&self) -> usize {
        self.subdivisions().iter().map(|&count| count as usize).sum()
    }

    /// Start and end transform of every extrusion segment, in path order.
    pub fn sub_segment_transforms(&self) -> Vec<(DMat4, DMat4)> {
        let mut transforms = Vec::with_capacity(self.total_subdivisions());
        for pair in self.points.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let count = subdivision_count(a, b);
            for j in 0..count {
                let t0 = j as f64 / count as f64;
                let t1 = (j + 1) as f64 / count as f64;
                transforms.push((interpolate(a, b, t0), interpolate(a, b, t1)));
            }
        }
        transforms
    }
}
