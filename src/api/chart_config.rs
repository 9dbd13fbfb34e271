use serde::{Deserialize, Serialize};

use crate::core::Margin;
use crate::core::ticks::MAX_TICK_HINT;
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_CHART_WIDTH: f64 = 879.0;
pub const DEFAULT_CHART_HEIGHT: f64 = 804.0;
pub const DEFAULT_CHART_MARGIN: f64 = 50.0;
/// Tick hint used when the configuration leaves it unset (or sets it to zero).
pub const DEFAULT_TICK_COUNT: usize = 10;
pub const BAND_VIEWPORT_OVERFLOW_TOP: f64 = 10.0;
pub const LINE_VIEWPORT_OVERFLOW_TOP: f64 = 25.0;
pub const LINE_DEFAULT_TICK_COUNT: usize = 5;
/// Ceiling applied to configured tick hints.
pub const MAX_TICK_COUNT: usize = MAX_TICK_HINT;

/// Resolved, immutable chart configuration for one chart instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub axis_label_x: Option<String>,
    pub axis_label_y: Option<String>,
    /// Tick hint for axes, gridlines and nicing.
    pub tick_count: Option<usize>,
    /// Room above the plot kept visible for labels overflowing the top tick.
    pub viewport_overflow_top: f64,
}

impl ChartConfig {
    #[must_use]
    pub fn band_defaults() -> Self {
        Self {
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
            margin: Margin::uniform(DEFAULT_CHART_MARGIN),
            axis_label_x: None,
            axis_label_y: None,
            tick_count: None,
            viewport_overflow_top: BAND_VIEWPORT_OVERFLOW_TOP,
        }
    }

    #[must_use]
    pub fn line_defaults() -> Self {
        Self {
            tick_count: Some(LINE_DEFAULT_TICK_COUNT),
            viewport_overflow_top: LINE_VIEWPORT_OVERFLOW_TOP,
            ..Self::band_defaults()
        }
    }

    #[must_use]
    pub fn resolved_tick_count(&self) -> usize {
        match self.tick_count {
            Some(count) if count > 0 => count.min(MAX_TICK_COUNT),
            _ => DEFAULT_TICK_COUNT,
        }
    }
}

/// Caller-supplied partial configuration; every set field wins over defaults.
///
/// `margin` replaces the default margin as a whole.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfigOverrides {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub margin: Option<Margin>,
    pub axis_label_x: Option<String>,
    pub axis_label_y: Option<String>,
    pub tick_count: Option<usize>,
    pub viewport_overflow_top: Option<f64>,
}

impl ChartConfigOverrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config json: {e}")))
    }

    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = Some(margin);
        self
    }

    #[must_use]
    pub fn with_axis_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.axis_label_x = Some(x.into());
        self.axis_label_y = Some(y.into());
        self
    }

    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = Some(tick_count);
        self
    }

    #[must_use]
    pub fn with_viewport_overflow_top(mut self, overflow: f64) -> Self {
        self.viewport_overflow_top = Some(overflow);
        self
    }
}

/// Builds a new configuration from `defaults` with `overrides` applied.
///
/// Neither input is modified.
#[must_use]
pub fn merge_configuration(defaults: &ChartConfig, overrides: &ChartConfigOverrides) -> ChartConfig {
    ChartConfig {
        width: overrides.width.unwrap_or(defaults.width),
        height: overrides.height.unwrap_or(defaults.height),
        margin: overrides.margin.unwrap_or(defaults.margin),
        axis_label_x: overrides
            .axis_label_x
            .clone()
            .or_else(|| defaults.axis_label_x.clone()),
        axis_label_y: overrides
            .axis_label_y
            .clone()
            .or_else(|| defaults.axis_label_y.clone()),
        tick_count: overrides.tick_count.or(defaults.tick_count),
        viewport_overflow_top: overrides
            .viewport_overflow_top
            .unwrap_or(defaults.viewport_overflow_top),
    }
}
