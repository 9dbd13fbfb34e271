use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{BandValue, RawLabel};
use crate::error::{ChartError, ChartResult};

/// One label zipped with the value at the same index.
///
/// `V` is `f64` for line charts and [`BandValue`] for band charts, so the two
/// kinds of point can never be mixed inside one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedPoint<P, V> {
    pub position: P,
    pub value: V,
}

pub type LinePoint<P> = CombinedPoint<P, f64>;
pub type BandPoint<P> = CombinedPoint<P, BandValue>;

impl<P> BandPoint<P> {
    #[must_use]
    pub fn low(&self) -> f64 {
        self.value.low
    }

    #[must_use]
    pub fn high(&self) -> f64 {
        self.value.high
    }
}

/// Per-sample validation applied while combining.
pub trait SeriesValue: Copy {
    fn validate(&self, index: usize) -> ChartResult<()>;
}

impl SeriesValue for f64 {
    fn validate(&self, index: usize) -> ChartResult<()> {
        if !self.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "value #{index} must be finite"
            )));
        }
        Ok(())
    }
}

impl SeriesValue for BandValue {
    fn validate(&self, index: usize) -> ChartResult<()> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "band value #{index} must be finite"
            )));
        }
        if self.low > self.high {
            return Err(ChartError::InvertedBand {
                index,
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }
}

/// How date labels are parsed on time axes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateLabelFormat {
    /// Tries RFC 3339 and a fixed list of common date layouts.
    #[default]
    Auto,
    /// A single `chrono` strftime pattern, e.g. `%d-%b-%y`.
    Pattern(String),
}

const AUTO_DATE_TIME_PATTERNS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

const AUTO_DATE_PATTERNS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%d-%b-%y", "%d-%b-%Y", "%b %d, %Y"];

impl DateLabelFormat {
    #[must_use]
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern(pattern.into())
    }

    /// Parses one label into a UTC instant; `None` when the label is not a date.
    #[must_use]
    pub fn parse(&self, label: &RawLabel) -> Option<DateTime<Utc>> {
        match label {
            RawLabel::Time(time) => Some(*time),
            RawLabel::UnixMillis(millis) => Utc.timestamp_millis_opt(*millis).single(),
            RawLabel::Text(text) => {
                let text = text.trim();
                match self {
                    Self::Pattern(pattern) => parse_with_pattern(text, pattern),
                    Self::Auto => parse_auto(text),
                }
            }
        }
    }
}

fn parse_with_pattern(text: &str, pattern: &str) -> Option<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_str(text, pattern) {
        return Some(time.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, pattern)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_auto(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Some(time.with_timezone(&Utc));
    }
    for pattern in AUTO_DATE_TIME_PATTERNS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(naive.and_utc());
        }
    }
    AUTO_DATE_PATTERNS.iter().find_map(|pattern| {
        NaiveDate::parse_from_str(text, pattern)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    })
}

/// What a time-based chart does with labels that fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InvalidLabelPolicy {
    /// Fail the whole render pass with `InvalidLabelFormat`.
    #[default]
    Reject,
    /// Drop the sample and report its index in the render plan.
    Skip,
}

/// Combined series plus the input indices dropped by `InvalidLabelPolicy::Skip`.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedSeries<P, V> {
    pub points: Vec<CombinedPoint<P, V>>,
    pub skipped: Vec<usize>,
}

pub fn check_shape<L, V>(labels: &[L], values: &[V]) -> ChartResult<()> {
    if labels.len() != values.len() {
        return Err(ChartError::ShapeMismatch {
            labels: labels.len(),
            values: values.len(),
        });
    }
    Ok(())
}

/// Zips labels and values index by index, preserving input order.
pub fn combine<P: Clone, V: SeriesValue>(
    labels: &[P],
    values: &[V],
) -> ChartResult<Vec<CombinedPoint<P, V>>> {
    check_shape(labels, values)?;
    labels
        .iter()
        .zip(values)
        .enumerate()
        .map(|(index, (label, value))| {
            value.validate(index)?;
            Ok(CombinedPoint {
                position: label.clone(),
                value: *value,
            })
        })
        .collect()
}

/// Combines raw labels as ordinal categories.
pub fn combine_categories<V: SeriesValue>(
    labels: &[RawLabel],
    values: &[V],
) -> ChartResult<CombinedSeries<String, V>> {
    check_shape(labels, values)?;
    let categories: Vec<String> = labels.iter().map(RawLabel::category).collect();
    Ok(CombinedSeries {
        points: combine(&categories, values)?,
        skipped: Vec::new(),
    })
}

/// Parses raw labels as dates, then combines them with values.
pub fn combine_time_labels<V: SeriesValue>(
    labels: &[RawLabel],
    values: &[V],
    format: &DateLabelFormat,
    policy: InvalidLabelPolicy,
) -> ChartResult<CombinedSeries<DateTime<Utc>, V>> {
    check_shape(labels, values)?;

    let mut points = Vec::with_capacity(labels.len());
    let mut skipped = Vec::new();
    for (index, (label, value)) in labels.iter().zip(values).enumerate() {
        let Some(position) = format.parse(label) else {
            match policy {
                InvalidLabelPolicy::Reject => {
                    return Err(ChartError::InvalidLabelFormat {
                        index,
                        label: label.category(),
                    });
                }
                InvalidLabelPolicy::Skip => {
                    warn!(index, label = %label.category(), "skipping unparseable date label");
                    skipped.push(index);
                    continue;
                }
            }
        };
        value.validate(index)?;
        points.push(CombinedPoint {
            position,
            value: *value,
        });
    }

    Ok(CombinedSeries { points, skipped })
}
