use tracing::debug;

use crate::core::{ContainerSize, Layout, LinearScale, RawLabel, SeriesValue};
use crate::error::ChartResult;
use crate::render::{ChartKind, PathGeometry, RenderPlan};

use super::{AXIS_TICK_COUNT, AxisGenerator, ChartConfig, TickSource};

/// One chart kind's render pipeline.
///
/// `render` is pure: identical inputs produce identical plans, so it can be
/// replayed on every debounced resize.
pub trait Chart {
    type Value: SeriesValue;

    fn kind(&self) -> ChartKind;

    fn config(&self) -> &ChartConfig;

    fn render(
        &self,
        labels: &[RawLabel],
        values: &[Self::Value],
        container: ContainerSize,
    ) -> ChartResult<RenderPlan>;

    /// Layout for the current configuration on a given container.
    fn layout(&self, container: ContainerSize) -> ChartResult<Layout> {
        let config = self.config();
        Layout::compute(
            config.width,
            config.height,
            config.margin,
            config.viewport_overflow_top,
            container,
        )
    }
}

/// Shared tail of every render pass: axes, gridlines, titles and the curve.
///
/// Both axis and gridline builders receive the same scale instances as the
/// curve so every layer lines up.
pub(super) fn assemble_plan<X: TickSource>(
    kind: ChartKind,
    config: &ChartConfig,
    layout: Layout,
    x_scale: &X,
    y_scale: &LinearScale,
    geometry: PathGeometry,
    skipped_labels: Vec<usize>,
) -> RenderPlan {
    let axes = AxisGenerator::new(layout.inner_width, layout.inner_height, AXIS_TICK_COUNT)
        .with_grid_tick_count(config.resolved_tick_count());

    let plan = RenderPlan {
        x_gridlines: Some(axes.vertical_gridlines(x_scale)),
        y_gridlines: Some(axes.horizontal_gridlines(y_scale)),
        x_axis: Some(axes.bottom(x_scale)),
        y_axis: Some(axes.left(y_scale)),
        paths: vec![geometry],
        titles: axes.titles(config),
        skipped_labels,
        ..RenderPlan::empty(kind, layout)
    };
    debug!(
        ?kind,
        inner_width = layout.inner_width,
        inner_height = layout.inner_height,
        vertices = plan.vertex_count(),
        "render plan assembled"
    );
    plan
}
