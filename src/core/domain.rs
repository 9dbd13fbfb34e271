//! Extents used to build continuous scales.
//!
//! Every function returns `None` for an empty series; callers decide whether
//! that is an empty chart or an error.

use chrono::{DateTime, Utc};

use crate::core::{BandPoint, CombinedPoint, LinePoint};

/// Line charts always include a zero baseline: `[0, max(value)]`.
#[must_use]
pub fn line_value_domain<P>(points: &[LinePoint<P>]) -> Option<(f64, f64)> {
    points
        .iter()
        .map(|point| point.value)
        .reduce(f64::max)
        .map(|max| (0.0, max))
}

/// Band charts span `[min(low), max(high)]` before nicing.
#[must_use]
pub fn band_value_domain<P>(points: &[BandPoint<P>]) -> Option<(f64, f64)> {
    let first = points.first()?;
    let seed = (first.low(), first.high());
    Some(points.iter().fold(seed, |(lo, hi), point| {
        (lo.min(point.low()), hi.max(point.high()))
    }))
}

/// Earliest and latest position of a time series.
#[must_use]
pub fn time_domain<V>(
    points: &[CombinedPoint<DateTime<Utc>, V>],
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let first = points.first()?.position;
    Some(points.iter().fold((first, first), |(lo, hi), point| {
        (lo.min(point.position), hi.max(point.position))
    }))
}

/// Categories in input order, duplicates included.
#[must_use]
pub fn category_domain<V>(points: &[CombinedPoint<String, V>]) -> Vec<String> {
    points.iter().map(|point| point.position.clone()).collect()
}
