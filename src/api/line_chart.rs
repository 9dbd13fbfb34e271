use tracing::debug;

use crate::core::{
    ContainerSize, DateLabelFormat, Interpolation, InvalidLabelPolicy, LinearScale, RawLabel,
    TimeScale, build_line_path, check_shape, combine_time_labels, line_value_domain, time_domain,
};
use crate::error::ChartResult;
use crate::render::{ChartKind, PathGeometry, RenderPlan};

use super::chart::assemble_plan;
use super::{Chart, ChartConfig, ChartConfigOverrides, merge_configuration};

/// Date layout of line chart labels unless overridden, e.g. `1-May-12`.
pub const LINE_DATE_PATTERN: &str = "%d-%b-%y";

/// Single-series line chart over a time axis with a zero baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    config: ChartConfig,
    date_format: DateLabelFormat,
    label_policy: InvalidLabelPolicy,
    interpolation: Interpolation,
}

impl Default for LineChart {
    fn default() -> Self {
        Self::new(&ChartConfigOverrides::default())
    }
}

impl LineChart {
    /// Line chart with `overrides` merged over the line defaults.
    #[must_use]
    pub fn new(overrides: &ChartConfigOverrides) -> Self {
        Self::from_config(merge_configuration(
            &ChartConfig::line_defaults(),
            overrides,
        ))
    }

    #[must_use]
    pub fn from_config(config: ChartConfig) -> Self {
        Self {
            config,
            date_format: DateLabelFormat::pattern(LINE_DATE_PATTERN),
            label_policy: InvalidLabelPolicy::Reject,
            interpolation: Interpolation::Linear,
        }
    }

    #[must_use]
    pub fn with_date_format(mut self, format: DateLabelFormat) -> Self {
        self.date_format = format;
        self
    }

    /// Sets how unparseable date labels are handled; `Reject` unless changed.
    #[must_use]
    pub fn with_label_policy(mut self, policy: InvalidLabelPolicy) -> Self {
        self.label_policy = policy;
        self
    }

    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    #[must_use]
    pub fn date_format(&self) -> &DateLabelFormat {
        &self.date_format
    }
}

impl Chart for LineChart {
    type Value = f64;

    fn kind(&self) -> ChartKind {
        ChartKind::Line
    }

    fn config(&self) -> &ChartConfig {
        &self.config
    }

    fn render(
        &self,
        labels: &[RawLabel],
        values: &[f64],
        container: ContainerSize,
    ) -> ChartResult<RenderPlan> {
        check_shape(labels, values)?;
        debug!(points = labels.len(), "line render pass");

        let series = combine_time_labels(labels, values, &self.date_format, self.label_policy)?;
        let layout = self.layout(container)?;

        let (Some(y_domain), Some(x_domain)) = (
            line_value_domain(&series.points),
            time_domain(&series.points),
        ) else {
            debug!(skipped = series.skipped.len(), "line chart has no points");
            let mut plan = RenderPlan::empty(ChartKind::Line, layout);
            plan.skipped_labels = series.skipped;
            return Ok(plan);
        };

        let x_scale = TimeScale::new(x_domain, (0.0, layout.inner_width))?;
        let y_scale = LinearScale::new(y_domain, (layout.inner_height, 0.0))?;
        if y_domain.1 <= 0.0 {
            debug!(max = y_domain.1, "line values never rise above the zero baseline");
        }

        let path = build_line_path(&series.points, &x_scale, &y_scale, self.interpolation)?;
        Ok(assemble_plan(
            ChartKind::Line,
            &self.config,
            layout,
            &x_scale,
            &y_scale,
            PathGeometry::Line(path),
            series.skipped,
        ))
    }
}

