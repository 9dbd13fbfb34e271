use serde::{Deserialize, Serialize};

use crate::core::ticks::{format_number_tick, nice_domain, tick_step, ticks};
use crate::error::{ChartError, ChartResult};

/// Affine mapping from a numeric domain to a pixel range.
///
/// Immutable: `nice` returns a new scale. A zero-width domain maps every value
/// to the middle of the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (value - self.domain_start) / span
        };
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (pixel - self.range_start) / span
        };
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Returns a copy whose domain is widened to round tick boundaries.
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        let (domain_start, domain_end) = nice_domain(self.domain_start, self.domain_end, count);
        Self {
            domain_start,
            domain_end,
            ..self
        }
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        ticks(self.domain_start, self.domain_end, count)
    }

    #[must_use]
    pub fn tick_step(self, count: usize) -> f64 {
        tick_step(self.domain_start, self.domain_end, count)
    }

    /// Formats a tick value using the precision implied by `count`.
    #[must_use]
    pub fn format_tick(self, value: f64, count: usize) -> String {
        format_number_tick(value, self.tick_step(count))
    }
}

/// Maps an x-axis position to a pixel coordinate.
///
/// Returns `None` for positions the scale does not know (unknown ordinal
/// categories); continuous scales always answer.
pub trait PositionScale<P> {
    fn position(&self, value: &P) -> Option<f64>;
}

impl PositionScale<f64> for LinearScale {
    fn position(&self, value: &f64) -> Option<f64> {
        Some(self.map(*value))
    }
}
