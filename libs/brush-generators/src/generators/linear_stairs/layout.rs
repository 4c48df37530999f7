//! Derived linear stairs layout: step count, fitted step size and the
//! output slot of every part.

use super::{LinearStairsDefinition, StairsRiserType, StairsSideType};
use crate::error::GeneratorResult;
use crate::generators::{ensure, step_count, SlotRange};
use config::constants::{MIN_STEP_DEPTH, MIN_STEP_HEIGHT, STAIRS_EPSILON};
use glam::DVec3;

/// Which side of the stairs a side part belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StairsSide {
    Left,
    Right,
}

/// One brush of the stairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StairsPart {
    Riser(usize),
    Tread(usize),
    DownRamp(StairsSide),
    UpRamp(StairsSide),
    TopCap(StairsSide),
    BottomFiller(StairsSide),
}

/// Layout derived from a [`LinearStairsDefinition`]. Recomputed on every
/// call, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearStairsLayout {
    /// Number of steps.
    pub step_count: usize,
    /// Step height fitted to the usable height.
    pub step_height: f64,
    /// Step depth, at most the requested depth.
    pub step_depth: f64,
    /// Height covered by the steps, excluding an `Up` side wall.
    pub usable_height: f64,
    /// Flat block below the first step.
    pub plateau_height: f64,
    pub min: DVec3,
    pub max: DVec3,
    /// Riser x-range, inside any `Down` side strips.
    pub inner_x: [f64; 2],
    /// Tread x-range, widened by the nosing and clamped to the bounds.
    pub tread_x: [f64; 2],
    pub risers: SlotRange,
    pub treads: SlotRange,
    /// Left, right.
    pub down_ramps: [SlotRange; 2],
    pub up_ramps: [SlotRange; 2],
    pub top_caps: [SlotRange; 2],
    pub bottom_fillers: [SlotRange; 2],
    /// Total number of brushes.
    pub total: usize,
}

impl LinearStairsLayout {
    /// Checks `definition` and derives its layout.
    pub fn new(definition: &LinearStairsDefinition) -> GeneratorResult<Self> {
        check(definition)?;

        let bounds = definition.bounds;
        let size = bounds.size();
        let sides = [definition.left_side, definition.right_side];
        let usable_height = if sides.iter().any(|side| side.has_up()) {
            size.y - definition.side_height
        } else {
            size.y
        };
        let rise = usable_height - definition.plateau_height;
        ensure(rise > STAIRS_EPSILON, || {
            format!("no height left for steps (plateau {}, usable {usable_height})", definition.plateau_height)
        })?;

        let step_count = step_count(rise, definition.step_height)?;
        let step_height = rise / step_count as f64;
        let step_depth = definition.step_depth.min(size.z / step_count as f64);

        let mut inner_x = [bounds.min.x, bounds.max.x];
        if definition.left_side.has_down() {
            inner_x[0] += definition.side_width;
        }
        if definition.right_side.has_down() {
            inner_x[1] -= definition.side_width;
        }
        ensure(inner_x[1] - inner_x[0] > STAIRS_EPSILON, || {
            format!("side width {} leaves no room for steps", definition.side_width)
        })?;
        let tread_x = [
            (inner_x[0] - definition.nosing_width).max(bounds.min.x),
            (inner_x[1] + definition.nosing_width).min(bounds.max.x),
        ];

        let mut cursor = 0;
        let mut take = |present: bool, count: usize| SlotRange::take(&mut cursor, present, count);

        let ramps = step_count > 1;
        let risers = take(definition.riser_type != StairsRiserType::None, step_count);
        let treads = take(definition.tread_height > 0.0, step_count);
        let down_ramps = sides.map(|side| take(side.has_down() && ramps, 1));
        let up_ramps = sides.map(|side| take(side.has_up() && ramps, 1));
        let top_caps = sides.map(|side| take(side.has_up(), 1));
        let bottom_fillers = sides.map(|side| take(side.has_down(), 1));

        Ok(Self {
            step_count,
            step_height,
            step_depth,
            usable_height,
            plateau_height: definition.plateau_height,
            min: bounds.min,
            max: bounds.max,
            inner_x,
            tread_x,
            risers,
            treads,
            down_ramps,
            up_ramps,
            top_caps,
            bottom_fillers,
            total: cursor,
        })
    }

    /// Every part in slot order.
    pub fn parts(&self) -> Vec<StairsPart> {
        let mut parts = Vec::with_capacity(self.total);
        parts.extend((0..self.risers.count).map(StairsPart::Riser));
        parts.extend((0..self.treads.count).map(StairsPart::Tread));
        let per_side: [(&[SlotRange; 2], fn(StairsSide) -> StairsPart); 4] = [
            (&self.down_ramps, StairsPart::DownRamp),
            (&self.up_ramps, StairsPart::UpRamp),
            (&self.top_caps, StairsPart::TopCap),
            (&self.bottom_fillers, StairsPart::BottomFiller),
        ];
        for (ranges, part) in per_side {
            for (range, side) in ranges.iter().zip([StairsSide::Left, StairsSide::Right]) {
                if range.count > 0 {
                    parts.push(part(side));
                }
            }
        }
        parts
    }

    /// Top of step `k`.
    pub fn step_top(&self, k: usize) -> f64 {
        self.min.y + self.plateau_height + (k + 1) as f64 * self.step_height
    }

    /// Bottom of step `k`; the first step reaches the floor.
    pub fn step_bottom(&self, k: usize) -> f64 {
        if k == 0 {
            self.min.y
        } else {
            self.step_top(k) - self.step_height
        }
    }

    /// Front of step `k`.
    pub fn step_front(&self, k: usize) -> f64 {
        self.min.z + k as f64 * self.step_depth
    }

    /// Back of step `k`; the last step reaches the back of the bounds.
    pub fn step_back(&self, k: usize) -> f64 {
        if k + 1 == self.step_count {
            self.max.z
        } else {
            self.step_front(k) + self.step_depth
        }
    }

    /// Rise per unit of depth.
    pub fn slope(&self) -> f64 {
        self.step_height / self.step_depth
    }

    /// Line through the front top edge of every step.
    pub fn stair_line(&self, z: f64) -> f64 {
        self.min.y + self.plateau_height + self.step_height + self.slope() * (z - self.min.z)
    }

    /// Front of the last step, where the ramps end.
    pub fn last_step_front(&self) -> f64 {
        self.step_front(self.step_count - 1)
    }

    /// Side strip x-range.
    pub fn side_x(&self, side: StairsSide, side_width: f64) -> [f64; 2] {
        match side {
            StairsSide::Left => [self.min.x, self.min.x + side_width],
            StairsSide::Right => [self.max.x - side_width, self.max.x],
        }
    }
}

impl StairsSideType {
    /// Has a wall running under the stairs.
    pub fn has_down(self) -> bool {
        matches!(self, Self::Down | Self::DownAndUp)
    }

    /// Has a wall running above the stairs.
    pub fn has_up(self) -> bool {
        matches!(self, Self::Up | Self::DownAndUp)
    }
}

fn check(definition: &LinearStairsDefinition) -> GeneratorResult<()> {
    let d = definition;
    let values = [
        d.step_height,
        d.step_depth,
        d.tread_height,
        d.nosing_depth,
        d.nosing_width,
        d.plateau_height,
        d.riser_depth,
        d.side_width,
        d.side_height,
        d.side_depth,
    ];
    ensure(values.iter().all(|v| v.is_finite()) && d.bounds.is_finite(), || {
        "stairs definition contains non-finite values".to_string()
    })?;
    ensure(d.step_height >= MIN_STEP_HEIGHT, || {
        format!("step height {} (min: {MIN_STEP_HEIGHT})", d.step_height)
    })?;
    ensure(d.step_depth >= MIN_STEP_DEPTH, || {
        format!("step depth {} (min: {MIN_STEP_DEPTH})", d.step_depth)
    })?;

    let size = d.bounds.size();
    ensure(size.x > 0.0 && size.y > 0.0 && size.z > 0.0, || {
        format!("bounds must have positive size, got {size}")
    })?;
    let non_negative = [
        ("tread height", d.tread_height),
        ("nosing depth", d.nosing_depth),
        ("nosing width", d.nosing_width),
        ("plateau height", d.plateau_height),
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

    let sides = [d.left_side, d.right_side];
    if sides.iter().any(|side| *side != StairsSideType::None) {
        ensure(d.side_width > 0.0 && d.side_width <= size.x, || {
            format!("side width {} outside (0, {}]", d.side_width, size.x)
        })?;
    }
    if sides.iter().any(|side| side.has_up()) {
        ensure(d.side_height > 0.0 && d.side_height < size.y, || {
            format!("side height {} outside (0, {})", d.side_height, size.y)
        })?;
    }
    if sides.iter().any(|side| side.has_down()) {
        ensure(d.side_depth > 0.0, || {
            format!("side depth must be positive, got {}", d.side_depth)
        })?;
    }
    Ok(())
}
