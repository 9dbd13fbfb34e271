use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    BandValue, CombinedSeries, ContainerSize, DateLabelFormat, Interpolation, InvalidLabelPolicy,
    LinearScale, OrdinalScale, PositionScale, RawLabel, TimeScale, band_value_domain,
    build_band_envelope, category_domain, check_shape, combine_categories, combine_time_labels,
    time_domain,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{ChartKind, PathGeometry, RenderPlan};

use super::chart::assemble_plan;
use super::{Chart, ChartConfig, ChartConfigOverrides, TickSource, merge_configuration};

/// Y nicing count of an ordinal band chart whose tick hint is unset.
pub const ORDINAL_BAND_NICE_COUNT: usize = 5;

/// X axis used by the band chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BandXAxis {
    /// Labels parsed as dates on a continuous time scale.
    #[default]
    Time,
    /// Labels used verbatim as evenly spaced categories starting at
    /// `margin.left`.
    Ordinal,
}

/// Low/high envelope chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BandChart {
    config: ChartConfig,
    x_axis: BandXAxis,
    date_format: DateLabelFormat,
    label_policy: InvalidLabelPolicy,
    interpolation: Interpolation,
}

impl Default for BandChart {
    fn default() -> Self {
        Self::new(&ChartConfigOverrides::default())
    }
}

impl BandChart {
    /// Band chart with `overrides` merged over the band defaults.
    #[must_use]
    pub fn new(overrides: &ChartConfigOverrides) -> Self {
        Self::from_config(merge_configuration(
            &ChartConfig::band_defaults(),
            overrides,
        ))
    }

    #[must_use]
    pub fn from_config(config: ChartConfig) -> Self {
        Self {
            config,
            x_axis: BandXAxis::default(),
            date_format: DateLabelFormat::Auto,
            label_policy: InvalidLabelPolicy::Reject,
            interpolation: Interpolation::Step,
        }
    }

    #[must_use]
    pub fn with_x_axis(mut self, x_axis: BandXAxis) -> Self {
        self.x_axis = x_axis;
        self
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
    pub fn x_axis(&self) -> BandXAxis {
        self.x_axis
    }

    #[must_use]
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Tick count used to nice the y domain.
    #[must_use]
    pub fn nice_count(&self) -> usize {
        match (self.x_axis, self.config.tick_count) {
            (BandXAxis::Ordinal, None | Some(0)) => ORDINAL_BAND_NICE_COUNT,
            _ => self.config.resolved_tick_count(),
        }
    }

    fn finish<P, X>(
        &self,
        series: CombinedSeries<P, BandValue>,
        container: ContainerSize,
        build_x: impl FnOnce(&CombinedSeries<P, BandValue>, f64, f64) -> ChartResult<X>,
    ) -> ChartResult<RenderPlan>
    where
        X: TickSource + PositionScale<P>,
    {
        let layout = self.layout(container)?;
        let Some(y_domain) = band_value_domain(&series.points) else {
            debug!(skipped = series.skipped.len(), "band chart has no points");
            let mut plan = RenderPlan::empty(ChartKind::Band, layout);
            plan.skipped_labels = series.skipped;
            return Ok(plan);
        };

        let y_scale =
            LinearScale::new(y_domain, (layout.inner_height, 0.0))?.nice(self.nice_count());
        trace!(?y_domain, niced = ?y_scale.domain(), "band y domain");
        let x_scale = build_x(&series, layout.margin.left, layout.inner_width)?;

        let envelope =
            build_band_envelope(&series.points, &x_scale, &y_scale, self.interpolation)?;
        Ok(assemble_plan(
            ChartKind::Band,
            &self.config,
            layout,
            &x_scale,
            &y_scale,
            PathGeometry::Envelope(envelope),
            series.skipped,
        ))
    }
}

impl Chart for BandChart {
    type Value = BandValue;

    fn kind(&self) -> ChartKind {
        ChartKind::Band
    }

    fn config(&self) -> &ChartConfig {
        &self.config
    }

    fn render(
        &self,
        labels: &[RawLabel],
        values: &[BandValue],
        container: ContainerSize,
    ) -> ChartResult<RenderPlan> {
        check_shape(labels, values)?;
        debug!(points = labels.len(), x_axis = ?self.x_axis, "band render pass");

        match self.x_axis {
            BandXAxis::Ordinal => {
                let series = combine_categories(labels, values)?;
                self.finish(series, container, |series, margin_left, inner_width| {
                    OrdinalScale::new(category_domain(&series.points), margin_left, inner_width)
                })
            }
            BandXAxis::Time => {
                let series =
                    combine_time_labels(labels, values, &self.date_format, self.label_policy)?;
                self.finish(series, container, |series, _margin_left, inner_width| {
                    let domain = time_domain(&series.points).ok_or_else(|| {
                        ChartError::InvalidData("time domain needs at least one point".to_owned())
                    })?;
                    TimeScale::new(domain, (0.0, inner_width))
                })
            }
        }
    }
}
