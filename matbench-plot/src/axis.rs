//! Logarithmic axes with plain decimal tick labels
//!
//! Limits and ticks are computed here; projecting onto pixels goes through
//! trueno-viz's [`LogScale`].

use trueno_viz::scale::LogScale;

use crate::error::Result;

/// Decades either side of 1 a value may sit and still be plotted
pub const LOG_LIMIT: f64 = 30.0;

/// Fraction of the log-space data range added on each side
const AXIS_MARGIN: f64 = 0.05;

/// Half-width in decades used when all values coincide
const SINGULAR_HALF_WIDTH: f64 = 0.5;

/// Slack for floating-point error when snapping to decades
const DECADE_EPSILON: f64 = 1e-9;

/// A base-10 logarithmic axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogAxis {
    min: f64,
    max: f64,
}

impl Default for LogAxis {
    fn default() -> Self {
        Self { min: 1.0, max: 10.0 }
    }
}

impl LogAxis {
    /// Fits limits around the plottable values of the data
    ///
    /// Values that fail [`is_plottable`] do not influence the limits, so the
    /// limits stay within `10^±(LOG_LIMIT + margin)`. With no usable value
    /// the axis spans `[1, 10]`.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let (lo, hi) = values
            .into_iter()
            .filter(|v| is_plottable(*v))
            .map(f64::log10)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if !lo.is_finite() || !hi.is_finite() {
            return Self::default();
        }

        let (lo, hi) = if hi - lo < DECADE_EPSILON {
            (lo - SINGULAR_HALF_WIDTH, hi + SINGULAR_HALF_WIDTH)
        } else {
            (lo, hi)
        };

        let margin = (hi - lo) * AXIS_MARGIN;
        Self {
            min: 10f64.powf(lo - margin),
            max: 10f64.powf(hi + margin),
        }
    }

    /// Lower and upper limits in data units
    pub fn limits(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Returns `true` if `value` can be drawn inside the limits
    pub fn contains(&self, value: f64) -> bool {
        is_plottable(value) && value >= self.min && value <= self.max
    }

    /// Powers of ten inside the limits
    pub fn major_ticks(&self) -> Vec<f64> {
        let first = (self.min.log10() - DECADE_EPSILON).ceil() as i32;
        let last = (self.max.log10() + DECADE_EPSILON).floor() as i32;
        (first..=last).map(|k| 10f64.powi(k)).collect()
    }

    /// `2..9 x 10^k` inside the limits
    pub fn minor_ticks(&self) -> Vec<f64> {
        let first = self.min.log10().floor() as i32;
        let last = self.max.log10().ceil() as i32;
        let mut ticks = Vec::new();
        for k in first..=last {
            let decade = 10f64.powi(k);
            for m in 2..=9 {
                let value = f64::from(m) * decade;
                if value >= self.min && value <= self.max {
                    ticks.push(value);
                }
            }
        }
        ticks
    }

    /// Ticks that carry a label
    ///
    /// Normally the powers of ten. When fewer than two decades fall inside the
    /// limits the minor ticks are labelled too, so the axis never goes blank.
    pub fn labeled_ticks(&self) -> Vec<f64> {
        let mut ticks = self.major_ticks();
        if ticks.len() < 2 {
            ticks.extend(self.minor_ticks());
            ticks.sort_by(f64::total_cmp);
        }
        ticks
    }

    /// Scale projecting data onto the pixel span `[pixel_lo, pixel_hi]`
    ///
    /// `pixel_lo` corresponds to the lower limit; pass the span reversed for a
    /// vertical axis where pixel rows grow downwards.
    ///
    /// # Errors
    ///
    /// `Render` if trueno-viz rejects the domain.
    pub fn pixel_scale(&self, pixel_lo: f64, pixel_hi: f64) -> Result<LogScale> {
        Ok(LogScale::new(
            (self.min as f32, self.max as f32),
            (pixel_lo as f32, pixel_hi as f32),
        )?)
    }
}

/// Positive, finite and within [`LOG_LIMIT`] decades of 1
pub fn is_plottable(value: f64) -> bool {
    value.is_finite() && value > 0.0 && value.log10().abs() <= LOG_LIMIT
}

/// Formats a tick value in plain decimal notation (`1000`, `1`, `0.05`)
pub fn format_tick(value: f64) -> String {
    if value >= 1.0 {
        format!("{value:.0}")
    } else {
        let decimals = (-value.log10() - DECADE_EPSILON).ceil().max(1.0) as usize;
        format!("{value:.decimals$}")
    }
}
