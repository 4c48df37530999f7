//! Centralized tolerances and tunables shared by the brush crates.
//!
//! Each public item documents its purpose and provides a minimal usage
//! example so that the mesh and generator crates can stay declarative and
//! avoid scattering literals.

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Squared distance below which two consecutive ring vertices are treated
/// as duplicates and removed before an extrusion is built.
///
/// # Examples
/// ```
/// use config::constants::DUPLICATE_VERTEX_EPSILON_SQR;
/// let dx: f64 = 1.0e-4;
/// assert!(dx * dx < DUPLICATE_VERTEX_EPSILON_SQR);
/// ```
pub const DUPLICATE_VERTEX_EPSILON_SQR: f64 = 1.0e-7;

/// Squared distance below which the bottom and top ring vertices of one
/// corner are considered the same point (a collapsed corner).
///
/// # Examples
/// ```
/// use config::constants::{COLLAPSED_CORNER_EPSILON_SQR, DUPLICATE_VERTEX_EPSILON_SQR};
/// assert!(COLLAPSED_CORNER_EPSILON_SQR > DUPLICATE_VERTEX_EPSILON_SQR);
/// ```
pub const COLLAPSED_CORNER_EPSILON_SQR: f64 = 1.0e-4;

/// Distance of the fourth quad vertex to the plane of the other three below
/// which a side quad is emitted as a single planar polygon.
///
/// # Examples
/// ```
/// use config::constants::QUAD_PLANARITY_EPSILON;
/// let distance: f64 = 5.0e-4;
/// assert!(distance.abs() < QUAD_PLANARITY_EPSILON);
/// ```
pub const QUAD_PLANARITY_EPSILON: f64 = 1.0e-3;

/// Maximum distance of a polygon vertex to its polygon plane in a valid
/// brush mesh.
///
/// # Examples
/// ```
/// use config::constants::PLANE_DISTANCE_EPSILON;
/// assert_eq!(PLANE_DISTANCE_EPSILON, 1.0e-3);
/// ```
pub const PLANE_DISTANCE_EPSILON: f64 = 1.0e-3;

/// Smallest enclosed volume accepted for a closed brush mesh.
///
/// # Examples
/// ```
/// use config::constants::MIN_BRUSH_VOLUME;
/// assert!(MIN_BRUSH_VOLUME > 0.0);
/// ```
pub const MIN_BRUSH_VOLUME: f64 = 1.0e-9;

/// Length below which a cross product is treated as zero when looking for a
/// non-collinear vertex triple.
///
/// # Examples
/// ```
/// use config::constants::NORMAL_LENGTH_EPSILON;
/// assert!(NORMAL_LENGTH_EPSILON < 1.0e-6);
/// ```
pub const NORMAL_LENGTH_EPSILON: f64 = 1.0e-10;

/// Relative tolerance used to drop collinear profile vertices before
/// decomposition (cross product divided by the product of edge lengths).
///
/// # Examples
/// ```
/// use config::constants::COLLINEAR_EPSILON;
/// assert!(COLLINEAR_EPSILON > 0.0);
/// ```
pub const COLLINEAR_EPSILON: f64 = 1.0e-9;

// =============================================================================
// SWEEP CONSTANTS
// =============================================================================

/// Largest per-axis rotation, in degrees, covered by one sweep sub-segment.
///
/// # Examples
/// ```
/// use config::constants::MAX_SUBDIVISION_ANGLE_DEGREES;
/// let needed = (90.0_f64 / MAX_SUBDIVISION_ANGLE_DEGREES).ceil();
/// assert_eq!(needed, 18.0);
/// ```
pub const MAX_SUBDIVISION_ANGLE_DEGREES: f64 = 5.0;

/// Tolerance when comparing the X/Z scale aspect ratios of two path points.
///
/// # Examples
/// ```
/// use config::constants::ASPECT_RATIO_EPSILON;
/// assert!(ASPECT_RATIO_EPSILON < 1.0e-3);
/// ```
pub const ASPECT_RATIO_EPSILON: f64 = 1.0e-5;

/// Default number of samples per Bézier control-point segment.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_CURVE_SEGMENTS;
/// assert!(DEFAULT_CURVE_SEGMENTS >= 1);
/// ```
pub const DEFAULT_CURVE_SEGMENTS: u32 = 8;

// =============================================================================
// STAIRS CONSTANTS
// =============================================================================

/// Slack added before flooring the step count so that a height that is an
/// exact multiple of the step height is not lost to rounding.
///
/// # Examples
/// ```
/// use config::constants::STAIRS_EPSILON;
/// let steps = ((1.0_f64 - 0.0 + STAIRS_EPSILON) / 0.2).floor();
/// assert_eq!(steps, 5.0);
/// ```
pub const STAIRS_EPSILON: f64 = 1.0e-4;

/// Smallest step height accepted by the stairs generators.
///
/// # Examples
/// ```
/// use config::constants::MIN_STEP_HEIGHT;
/// assert!(MIN_STEP_HEIGHT > 0.0);
/// ```
pub const MIN_STEP_HEIGHT: f64 = 1.0e-2;

/// Smallest step depth accepted by the linear stairs generator.
///
/// # Examples
/// ```
/// use config::constants::MIN_STEP_DEPTH;
/// assert!(MIN_STEP_DEPTH > 0.0);
/// ```
pub const MIN_STEP_DEPTH: f64 = 1.0e-2;

/// Widest angle, in degrees, one spiral step may span.
///
/// # Examples
/// ```
/// use config::constants::MAX_SPIRAL_STEP_ANGLE_DEGREES;
/// assert!(MAX_SPIRAL_STEP_ANGLE_DEGREES < 180.0);
/// ```
pub const MAX_SPIRAL_STEP_ANGLE_DEGREES: f64 = 120.0;

/// Most steps a stairs generator may emit.
///
/// # Examples
/// ```
/// use config::constants::MAX_STEP_COUNT;
/// assert!(MAX_STEP_COUNT >= 1);
/// ```
pub const MAX_STEP_COUNT: usize = 4096;

/// Fewest segments a capping cylinder may use.
///
/// # Examples
/// ```
/// use config::constants::MIN_CYLINDER_SEGMENTS;
/// assert_eq!(MIN_CYLINDER_SEGMENTS, 3);
/// ```
pub const MIN_CYLINDER_SEGMENTS: u32 = 3;

/// Most segments a capping cylinder may use.
///
/// # Examples
/// ```
/// use config::constants::{MAX_CYLINDER_SEGMENTS, MIN_CYLINDER_SEGMENTS};
/// assert!(MAX_CYLINDER_SEGMENTS > MIN_CYLINDER_SEGMENTS);
/// ```
pub const MAX_CYLINDER_SEGMENTS: u32 = 256;

// =============================================================================
// MESH TOLERANCES
// =============================================================================

/// Immutable snapshot of the tolerances the brush validator applies.
///
/// # Examples
/// ```
/// use config::constants::MeshTolerances;
/// let tolerances = MeshTolerances::default();
/// assert!(tolerances.plane_distance > 0.0);
/// assert!(!tolerances.allow_open_boundaries);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshTolerances {
    /// Maximum vertex distance to its polygon plane.
    pub plane_distance: f64,
    /// Smallest accepted enclosed volume.
    pub min_volume: f64,
    /// Accept half-edges without a twin (open-boundary generators only).
    pub allow_open_boundaries: bool,
}

impl MeshTolerances {
    /// Builds tolerances, rejecting non-positive values.
    ///
    /// # Examples
    /// ```
    /// use config::constants::MeshTolerances;
    /// let tolerances = MeshTolerances::new(1.0e-4, 1.0e-6).expect("valid tolerances");
    /// assert_eq!(tolerances.plane_distance, 1.0e-4);
    /// ```
    pub fn new(plane_distance: f64, min_volume: f64) -> Result<Self, ConfigError> {
        if plane_distance.is_nan() || plane_distance <= 0.0 {
            return Err(ConfigError::InvalidPlaneDistance(plane_distance));
        }
        if min_volume.is_nan() || min_volume <= 0.0 {
            return Err(ConfigError::InvalidMinVolume(min_volume));
        }
        Ok(Self {
            plane_distance,
            min_volume,
            allow_open_boundaries: false,
        })
    }

    /// Returns a copy that tolerates half-edges without a twin.
    pub fn with_open_boundaries(mut self) -> Self {
        self.allow_open_boundaries = true;
        self
    }
}

impl Default for MeshTolerances {
    fn default() -> Self {
        Self {
            plane_distance: PLANE_DISTANCE_EPSILON,
            min_volume: MIN_BRUSH_VOLUME,
            allow_open_boundaries: false,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the plane distance tolerance is zero, negative or NaN.
    InvalidPlaneDistance(f64),
    /// Raised when the minimum volume is zero, negative or NaN.
    InvalidMinVolume(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPlaneDistance(value) => {
                write!(f, "plane distance tolerance must be positive: {value}")
            }
            ConfigError::InvalidMinVolume(value) => {
                write!(f, "minimum volume must be positive: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Number of sweep sub-segments needed to cover `max_angle_degrees` of
/// rotation, never less than one.
///
/// # Examples
/// ```
/// use config::constants::segments_for_angle;
/// assert_eq!(segments_for_angle(0.0), 1);
/// assert_eq!(segments_for_angle(5.0), 1);
/// assert_eq!(segments_for_angle(5.1), 2);
/// assert_eq!(segments_for_angle(180.0), 36);
/// ```
#[inline]
pub fn segments_for_angle(max_angle_degrees: f64) -> u32 {
    let segments = (max_angle_degrees / MAX_SUBDIVISION_ANGLE_DEGREES).ceil();
    if segments.is_finite() && segments > 1.0 {
        segments as u32
    } else {
        1
    }
}
