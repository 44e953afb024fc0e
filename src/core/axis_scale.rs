use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::decimals::decimals_for;

/// Ranges at or below this width are treated as a single value.
pub const FLAT_RANGE_EPSILON: f64 = 1e-9;

/// Widening applied below a flat value (towards negative infinity).
const FLAT_WIDEN_LOWER_RATIO: f64 = 0.10;
/// Widening applied above a flat value (towards positive infinity).
const FLAT_WIDEN_UPPER_RATIO: f64 = 0.11;

/// Roughly this many coarse ticks are wanted before refinement kicks in.
const TARGET_TICKS: usize = 10;
const REFINE_BY_TEN_BELOW: usize = 5;

/// Safety cap on every stepping loop; well-conditioned input needs ~12 steps.
const MAX_STEPS: usize = 64;

/// Smallest positive `f64`; floor for increments of subnormal ranges.
const SMALLEST_STEP: f64 = f64::from_bits(1);

/// Autoscaled value axis for one side of one display area.
///
/// A scale starts out empty, accumulates data extrema through [`AxisScale::extend`]
/// and is resolved by [`AxisScale::calc`]. Resolution is atomic: either all of
/// `min`, `max`, `tick` and `pixel` describe a usable axis (`tick > 0`), or the
/// scale is left in the empty sentinel state (`tick == 0`, `pixel == 0`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    min: f64,
    max: f64,
    tick: f64,
    pixel: f64,
    decimals: usize,
    #[serde(default)]
    clamp_min: Option<f64>,
    #[serde(default)]
    clamp_max: Option<f64>,
}

impl Default for AxisScale {
    fn default() -> Self {
        Self::empty()
    }
}

impl AxisScale {
    /// Empty sentinel: no data, `tick == 0`, `pixel == 0`.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            min: f64::MAX,
            max: f64::MIN,
            tick: 0.0,
            pixel: 0.0,
            decimals: 0,
            clamp_min: None,
            clamp_max: None,
        }
    }

    /// Computes a rounded display range for `[raw_min, raw_max]` laid out over
    /// `pixel_length` pixels.
    ///
    /// Never fails. Inverted or non-finite input yields [`AxisScale::empty`].
    /// A single-value range is widened before rounding; a true zero-width range
    /// at `0.0` cannot be widened and also yields the sentinel.
    #[must_use]
    pub fn compute(raw_min: f64, raw_max: f64, pixel_length: f64) -> Self {
        let empty = Self::empty();
        if !raw_min.is_finite()
            || !raw_max.is_finite()
            || !pixel_length.is_finite()
            || raw_min > raw_max
        {
            trace!(raw_min, raw_max, pixel_length, "axis scale input rejected");
            return empty;
        }

        let (lower, upper) = widen_flat_range(raw_min, raw_max);
        if upper <= lower {
            trace!(raw_min, raw_max, "axis scale range collapsed");
            return empty;
        }

        let Some(bounds) = nice_bounds(lower, upper) else {
            trace!(raw_min, raw_max, "axis scale increment degenerate");
            return empty;
        };

        let pixel = if pixel_length > 0.0 {
            pixels_per_unit(pixel_length, bounds.min, bounds.max)
        } else {
            0.0
        };

        Self {
            min: bounds.min,
            max: bounds.max,
            tick: bounds.tick,
            pixel,
            decimals: decimals_for(bounds.tick),
            clamp_min: None,
            clamp_max: None,
        }
    }

    /// Folds one data value into the raw extrema. Non-finite values are ignored.
    pub fn extend(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Drops accumulated extrema and resolved state, keeping clamps.
    pub fn reset(&mut self) {
        *self = Self {
            clamp_min: self.clamp_min,
            clamp_max: self.clamp_max,
            ..Self::empty()
        };
    }

    /// Forces the resolved axis to include the given values.
    ///
    /// `clamp_min` lowers the raw minimum when it is smaller; `clamp_max`
    /// raises the raw maximum when it is larger. Non-finite clamps are dropped.
    pub fn set_clamp(&mut self, clamp_min: Option<f64>, clamp_max: Option<f64>) {
        self.clamp_min = clamp_min.filter(|value| value.is_finite());
        self.clamp_max = clamp_max.filter(|value| value.is_finite());
    }

    #[must_use]
    pub fn clamp(&self) -> (Option<f64>, Option<f64>) {
        (self.clamp_min, self.clamp_max)
    }

    /// Resolves the accumulated extrema (plus clamps) into display parameters.
    pub fn calc(&mut self, pixel_length: f64) {
        let mut raw_min = self.min;
        let mut raw_max = self.max;
        if let Some(clamp_min) = self.clamp_min {
            raw_min = raw_min.min(clamp_min);
        }
        if let Some(clamp_max) = self.clamp_max {
            raw_max = raw_max.max(clamp_max);
        }

        let resolved = Self::compute(raw_min, raw_max, pixel_length);
        *self = Self {
            clamp_min: self.clamp_min,
            clamp_max: self.clamp_max,
            ..resolved
        };
    }

    /// `true` once `calc`/`compute` produced a usable axis.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.tick > 0.0
    }

    /// `true` when at least one value was folded in (or the scale is resolved).
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.min <= self.max
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn tick(&self) -> f64 {
        self.tick
    }

    /// Pixels per data unit; `0` unless the scale is resolved over a positive length.
    #[must_use]
    pub fn pixel(&self) -> f64 {
        self.pixel
    }

    /// Fractional digits to use when formatting tick labels.
    #[must_use]
    pub fn decimals(&self) -> usize {
        self.decimals
    }

    /// Number of tick intervals between `min` and `max`.
    #[must_use]
    pub fn tick_count(&self) -> usize {
        if !self.is_resolved() {
            return 0;
        }
        let span = self.max - self.min;
        let intervals = if span.is_finite() {
            span / self.tick
        } else {
            (self.max / 2.0 - self.min / 2.0) / (self.tick / 2.0)
        };
        intervals.round() as usize
    }

    /// Tick label values from `min` to `max` inclusive.
    #[must_use]
    pub fn tick_values(&self) -> Vec<f64> {
        if !self.is_resolved() {
            return Vec::new();
        }
        (0..=self.tick_count())
            .map(|index| self.min + index as f64 * self.tick)
            .collect()
    }

    /// Distance in pixels from the axis minimum, or `None` on an unresolved scale.
    #[must_use]
    pub fn value_to_pixel(&self, value: f64) -> Option<f64> {
        if !self.is_resolved() || self.pixel <= 0.0 || !value.is_finite() {
            return None;
        }
        Some((value - self.min) * self.pixel)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct NiceBounds {
    min: f64,
    max: f64,
    tick: f64,
}

fn widen_flat_range(raw_min: f64, raw_max: f64) -> (f64, f64) {
    if raw_max - raw_min > FLAT_RANGE_EPSILON {
        return (raw_min, raw_max);
    }
    (
        (raw_min - raw_min.abs() * FLAT_WIDEN_LOWER_RATIO).max(f64::MIN),
        (raw_max + raw_max.abs() * FLAT_WIDEN_UPPER_RATIO).min(f64::MAX),
    )
}

/// `log10(upper - lower)`, also for spans wider than `f64::MAX`.
fn span_log10(lower: f64, upper: f64) -> f64 {
    let span = upper - lower;
    if span.is_finite() {
        span.log10()
    } else {
        (upper / 2.0 - lower / 2.0).log10() + std::f64::consts::LOG10_2
    }
}

/// `pixel_length / (max - min)`, `0` when the ratio is not representable.
fn pixels_per_unit(pixel_length: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    let pixel = if span.is_finite() {
        pixel_length / span
    } else {
        (pixel_length / 2.0) / (max / 2.0 - min / 2.0)
    };
    if pixel.is_finite() { pixel } else { 0.0 }
}

fn nice_bounds(lower: f64, upper: f64) -> Option<NiceBounds> {
    let exponent = span_log10(lower, upper) - (TARGET_TICKS as f64).log10();
    if !exponent.is_finite() {
        return None;
    }
    let mut inc = 10f64.powf(exponent.ceil()).max(SMALLEST_STEP);
    if !inc.is_finite() {
        return None;
    }

    let mut max = ((upper / inc).ceil() * inc).min(f64::MAX);
    if max < upper {
        max = (max + inc).min(f64::MAX);
    }

    let mut min = max;
    let mut ticker = 0;
    while ticker < MAX_STEPS {
        ticker += 1;
        min -= inc;
        if min <= lower {
            break;
        }
    }
    min = min.max(f64::MIN);

    let refined = inc / if ticker < REFINE_BY_TEN_BELOW { 10.0 } else { 2.0 };
    if ticker < TARGET_TICKS && refined > 0.0 {
        inc = refined;

        let mut steps = 0;
        while min + inc <= lower && steps < MAX_STEPS {
            min += inc;
            steps += 1;
        }

        steps = 0;
        while max - inc >= upper && steps < MAX_STEPS {
            max -= inc;
            steps += 1;
        }
    }

    // Precision loss on huge magnitudes can stall the stepping loops.
    Some(NiceBounds {
        min: min.min(lower),
        max: max.max(upper),
        tick: inc,
    })
}
