use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::PositionScale;
use crate::error::{ChartError, ChartResult};

/// Discrete scale placing categories at evenly spaced positions.
///
/// Position `i` is `range_start + i * (span / N)` where `N` is the number of
/// distinct categories; the last category therefore sits one step short of
/// `range_start + span`. Duplicated labels share the position of their first
/// occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdinalScale {
    categories: IndexSet<String>,
    range_start: f64,
    step: f64,
}

impl OrdinalScale {
    pub fn new<I, S>(categories: I, range_start: f64, span: f64) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !range_start.is_finite() || !span.is_finite() || span < 0.0 {
            return Err(ChartError::InvalidData(
                "ordinal range must be finite with span >= 0".to_owned(),
            ));
        }

        let categories: IndexSet<String> = categories.into_iter().map(Into::into).collect();
        let step = if categories.is_empty() {
            0.0
        } else {
            span / categories.len() as f64
        };

        Ok(Self {
            categories,
            range_start,
            step,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn domain(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    /// Output positions, one per category, in domain order.
    #[must_use]
    pub fn positions(&self) -> Vec<f64> {
        (0..self.categories.len())
            .map(|index| self.position_at(index))
            .collect()
    }

    /// First and last output position.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        let last = self.categories.len().saturating_sub(1);
        (self.range_start, self.position_at(last))
    }

    #[must_use]
    pub fn map(&self, category: &str) -> Option<f64> {
        self.categories
            .get_index_of(category)
            .map(|index| self.position_at(index))
    }

    fn position_at(&self, index: usize) -> f64 {
        self.range_start + index as f64 * self.step
    }
}

impl PositionScale<String> for OrdinalScale {
    fn position(&self, value: &String) -> Option<f64> {
        self.map(value)
    }
}
