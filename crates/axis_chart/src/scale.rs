//! Nice-number value scales
//!
//! Turns a raw `[min, max]` domain into human-friendly axis bounds whose tick
//! spacing is always one of `{1, 2, 5, 10} x 10^n`.

use serde::{Deserialize, Serialize};

/// Default upper bound on the number of scale intervals
pub const DEFAULT_MAX_TICKS: usize = 10;

/// Largest accepted `max_ticks`
pub const MAX_TICKS_LIMIT: usize = 1000;

/// Domain bounds are clamped to `[-MAX_DOMAIN_MAGNITUDE, MAX_DOMAIN_MAGNITUDE]`
/// so the span and the rounded bounds stay finite
pub const MAX_DOMAIN_MAGNITUDE: f64 = 1.0e307;

/// Narrowest domain the rounding still resolves; the powers of ten below it
/// are subnormal
pub const MIN_DOMAIN_SPAN: f64 = 1.0e-200;

const MAX_SPACING_STEPS: usize = 64;

/// A rounded value scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scale {
    pub nice_min: f64,
    pub nice_max: f64,
    pub tick_spacing: f64,
}

impl Scale {
    /// The `[0, 1]` scale with a single interval
    pub fn unit() -> Self {
        Self {
            nice_min: 0.0,
            nice_max: 1.0,
            tick_spacing: 1.0,
        }
    }

    /// Distance between the scale bounds
    pub fn span(&self) -> f64 {
        self.nice_max - self.nice_min
    }

    /// Number of intervals between ticks
    pub fn interval_count(&self) -> usize {
        interval_count(self.nice_min, self.nice_max, self.tick_spacing)
    }

    /// Number of ticks, both bounds included
    pub fn tick_count(&self) -> usize {
        self.interval_count() + 1
    }

    /// Tick values from `nice_min` up to `nice_max`
    pub fn values(&self) -> Vec<f64> {
        (0..self.tick_count())
            .map(|i| self.nice_min + i as f64 * self.tick_spacing)
            .collect()
    }

    /// Finite bounds in order, with a positive finite spacing
    pub fn is_well_formed(&self) -> bool {
        self.nice_min.is_finite()
            && self.nice_max.is_finite()
            && self.nice_min <= self.nice_max
            && self.tick_spacing.is_finite()
            && self.tick_spacing > 0.0
    }

    /// Position of `value` within the scale, 0 at `nice_min` and 1 at `nice_max`
    pub fn percent(&self, value: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 {
            return 0.0;
        }
        (value - self.nice_min) / span
    }
}

/// Round `x` to a nice number.
///
/// With `round == false` the result is the smallest nice number not below
/// `x`; with `round == true` it is the nearest one. Non-positive or
/// non-finite input yields 0.
pub fn nice_num(x: f64, round: bool) -> f64 {
    if !x.is_finite() || x <= 0.0 {
        return 0.0;
    }
    let exponent = x.log10().floor();
    let magnitude = 10_f64.powf(exponent);
    let fraction = x / magnitude;

    let nice_fraction = if round {
        if fraction < 1.5 {
            1.0
        } else if fraction < 3.0 {
            2.0
        } else if fraction < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice_fraction * magnitude
}

/// Compute a nice scale covering `[min, max]` with at most `max_ticks` intervals.
///
/// A flat domain (`min == max`) is widened to include zero, and `[0, 0]`
/// becomes `[0, 1]`. Reversed bounds are swapped. `max_ticks` is clamped to
/// `[2, MAX_TICKS_LIMIT]`. Bounds beyond [`MAX_DOMAIN_MAGNITUDE`] are clamped
/// to it, and a domain narrower than [`MIN_DOMAIN_SPAN`] is treated as one
/// that spans a single unit from zero.
pub fn compute_scale(min: f64, max: f64, max_ticks: usize) -> Scale {
    if !min.is_finite() || !max.is_finite() {
        tracing::trace!(min, max, "non-finite scale domain, using unit scale");
        return Scale::unit();
    }

    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    let (mut min, mut max) = (
        min.clamp(-MAX_DOMAIN_MAGNITUDE, MAX_DOMAIN_MAGNITUDE),
        max.clamp(-MAX_DOMAIN_MAGNITUDE, MAX_DOMAIN_MAGNITUDE),
    );
    if min == max {
        tracing::trace!(value = min, "flat scale domain, widening to zero");
        (min, max) = flat_domain(min);
    }
    if max - min < MIN_DOMAIN_SPAN {
        tracing::trace!(min, max, "vanishing scale domain, widening to a unit span");
        (min, max) = unit_domain(min, max);
    }
    let max_ticks = max_ticks.clamp(2, MAX_TICKS_LIMIT);

    let range = nice_num(max - min, false);
    let mut tick_spacing = nice_num(range / (max_ticks - 1) as f64, true);
    let (mut nice_min, mut nice_max) = snap_bounds(min, max, tick_spacing);

    // Flooring and ceiling the bounds can add an interval past the limit
    let mut steps = 0;
    while interval_count(nice_min, nice_max, tick_spacing) > max_ticks
        && steps < MAX_SPACING_STEPS
    {
        tick_spacing = next_nice_step(tick_spacing);
        (nice_min, nice_max) = snap_bounds(min, max, tick_spacing);
        steps += 1;
    }

    let scale = Scale {
        nice_min,
        nice_max,
        tick_spacing,
    };
    if !scale.is_well_formed() {
        tracing::trace!(min, max, "scale computation degenerated, using unit scale");
        return Scale::unit();
    }
    scale
}

/// Compute a scale with [`DEFAULT_MAX_TICKS`]
pub fn compute_default_scale(min: f64, max: f64) -> Scale {
    compute_scale(min, max, DEFAULT_MAX_TICKS)
}

fn flat_domain(value: f64) -> (f64, f64) {
    if value > 0.0 {
        (0.0, value)
    } else if value < 0.0 {
        (value, 0.0)
    } else {
        (0.0, 1.0)
    }
}

fn unit_domain(min: f64, max: f64) -> (f64, f64) {
    if min >= 0.0 {
        (0.0, 1.0)
    } else if max <= 0.0 {
        (-1.0, 0.0)
    } else {
        (-1.0, 1.0)
    }
}

fn snap_bounds(min: f64, max: f64, tick_spacing: f64) -> (f64, f64) {
    (
        (min / tick_spacing).floor() * tick_spacing,
        (max / tick_spacing).ceil() * tick_spacing,
    )
}

fn interval_count(nice_min: f64, nice_max: f64, tick_spacing: f64) -> usize {
    if tick_spacing <= 0.0 {
        return 0;
    }
    let count = ((nice_max - nice_min) / tick_spacing).round();
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

/// The next larger nice spacing: 1 -> 2 -> 5 -> 10
fn next_nice_step(tick_spacing: f64) -> f64 {
    let magnitude = 10_f64.powf(tick_spacing.log10().floor());
    let fraction = tick_spacing / magnitude;
    if fraction < 1.5 {
        2.0 * magnitude
    } else if fraction < 3.5 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    }
}
