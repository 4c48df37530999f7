//! Derived spiral stairs layout.

use super::SpiralStairsDefinition;
use crate::error::GeneratorResult;
use crate::generators::{ensure, step_count, SlotRange, StairsRiserType};
use config::constants::{
    MAX_CYLINDER_SEGMENTS, MAX_SPIRAL_STEP_ANGLE_DEGREES, MIN_CYLINDER_SEGMENTS, MIN_STEP_HEIGHT,
    STAIRS_EPSILON,
};

/// One brush of the spiral stairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiralStairsPart {
    Riser(usize),
    Tread(usize),
    OuterCylinder,
    InnerCylinder,
}

/// Layout derived from a [`SpiralStairsDefinition`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralStairsLayout {
    pub step_count: usize,
    /// Step height fitted to the total height.
    pub step_height: f64,
    /// Signed angle per step, radians.
    pub step_angle: f64,
    /// Angle of the first step front, radians.
    pub start_angle: f64,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub risers: SlotRange,
    pub treads: SlotRange,
    /// Slot of the intersecting outer cylinder.
    pub outer_cylinder: usize,
    /// Slot of the subtractive inner cylinder, when there is a hole.
    pub inner_cylinder: Option<usize>,
    pub total: usize,
}

impl SpiralStairsLayout {
    /// Checks `definition` and derives its layout.
    pub fn new(definition: &SpiralStairsDefinition) -> GeneratorResult<Self> {
        check(definition)?;
        let d = definition;

        let step_count = step_count(d.height, d.step_height)?;
        let step_degrees = d.rotation / step_count as f64;
        ensure(step_degrees.abs() <= MAX_SPIRAL_STEP_ANGLE_DEGREES, || {
            format!(
                "step angle {step_degrees} degrees exceeds {MAX_SPIRAL_STEP_ANGLE_DEGREES}"
            )
        })?;
        ensure(step_degrees.abs() > STAIRS_EPSILON, || {
            "rotation per step is zero".to_string()
        })?;

        let outer_radius = d.outer_diameter / 2.0;
        let inner_radius = d.inner_diameter / 2.0;
        let nosing_degrees = (d.nosing_depth / outer_radius).to_degrees();
        ensure(step_degrees.abs() + nosing_degrees < 180.0, || {
            format!("tread spans {} degrees (max: 180)", step_degrees.abs() + nosing_degrees)
        })?;

        let mut cursor = 0;
        let risers = SlotRange::take(&mut cursor, d.riser_type != StairsRiserType::None, step_count);
        let treads = SlotRange::take(&mut cursor, d.tread_height > 0.0, step_count);
        let outer_cylinder = SlotRange::take(&mut cursor, true, 1).start;
        let inner = SlotRange::take(&mut cursor, d.inner_diameter >= STAIRS_EPSILON, 1);

        Ok(Self {
            step_count,
            step_height: d.height / step_count as f64,
            step_angle: step_degrees.to_radians(),
            start_angle: d.start_angle.to_radians(),
            outer_radius,
            inner_radius,
            risers,
            treads,
            outer_cylinder,
            inner_cylinder: (inner.count > 0).then_some(inner.start),
            total: cursor,
        })
    }

    /// Every part in slot order.
    pub fn parts(&self) -> Vec<SpiralStairsPart> {
        let mut parts = Vec::with_capacity(self.total);
        parts.extend((0..self.risers.count).map(SpiralStairsPart::Riser));
        parts.extend((0..self.treads.count).map(SpiralStairsPart::Tread));
        parts.push(SpiralStairsPart::OuterCylinder);
        if self.inner_cylinder.is_some() {
            parts.push(SpiralStairsPart::InnerCylinder);
        }
        parts
    }

    /// Returns true when the stairs wind around a hole.
    pub fn has_hole(&self) -> bool {
        self.inner_cylinder.is_some()
    }

    /// Front and back angle of step `k`, in walking order.
    pub fn step_angles(&self, k: usize) -> [f64; 2] {
        let front = self.start_angle + k as f64 * self.step_angle;
        [front, front + self.step_angle]
    }

    /// Top of step `k` above the origin.
    pub fn step_top(&self, k: usize) -> f64 {
        (k + 1) as f64 * self.step_height
    }

    /// Bottom of step `k` above the origin.
    pub fn step_bottom(&self, k: usize) -> f64 {
        k as f64 * self.step_height
    }

    /// +1 for stairs turning counter-clockwise seen from above, -1 otherwise.
    pub fn turn_sign(&self) -> f64 {
        self.step_angle.signum()
    }
}

fn check(d: &SpiralStairsDefinition) -> GeneratorResult<()> {
    let values = [
        d.height,
        d.outer_diameter,
        d.inner_diameter,
        d.step_height,
        d.tread_height,
        d.nosing_depth,
        d.nosing_width,
        d.riser_depth,
        d.start_angle,
        d.rotation,
    ];
    ensure(values.iter().all(|v| v.is_finite()) && d.origin.is_finite(), || {
        "spiral stairs definition contains non-finite values".to_string()
    })?;
    ensure(d.step_height >= MIN_STEP_HEIGHT, || {
        format!("step height {} (min: {MIN_STEP_HEIGHT})", d.step_height)
    })?;
    ensure(d.height > STAIRS_EPSILON, || {
        format!("height must be positive, got {}", d.height)
    })?;
    ensure(d.inner_diameter >= 0.0 && d.outer_diameter > d.inner_diameter, || {
        format!(
            "diameters must satisfy outer > inner >= 0, got outer {} inner {}",
            d.outer_diameter, d.inner_diameter
        )
    })?;

    let non_negative = [
        ("tread height", d.tread_height),
        ("nosing depth", d.nosing_depth),
        ("nosing width", d.nosing_width),
        ("riser depth", d.riser_depth),
    ];
    for (name, value) in non_negative {
        ensure(value >= 0.0, || format!("{name} must not be negative, got {value}"))?;
    }
    if matches!(d.riser_type, StairsRiserType::ThinRiser | StairsRiserType::Smooth) {
        ensure(d.riser_depth > 0.0, || {
            format!("{:?} riser needs a positive riser depth", d.riser_type)
        })?;
    }

    let segments = MIN_CYLINDER_SEGMENTS..=MAX_CYLINDER_SEGMENTS;
    for (name, value) in [
        ("inner segments", d.inner_segments),
        ("outer segments", d.outer_segments),
    ] {
        ensure(segments.contains(&value), || {
            format!("{name} {value} outside {MIN_CYLINDER_SEGMENTS}..={MAX_CYLINDER_SEGMENTS}")
        })?;
    }
    Ok(())
}
