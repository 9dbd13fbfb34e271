use std::time::Instant;

use tracing::{debug, warn};

use crate::core::{ContainerSize, RawLabel};
use crate::error::ChartResult;
use crate::render::{RenderPlan, Renderer};

use super::{Chart, ResizeController};

/// Synchronous query for the host container's physical size.
pub trait ContainerMeasure {
    fn measure(&self) -> ContainerSize;
}

impl ContainerMeasure for ContainerSize {
    fn measure(&self) -> ContainerSize {
        *self
    }
}

impl<F> ContainerMeasure for F
where
    F: Fn() -> ContainerSize,
{
    fn measure(&self) -> ContainerSize {
        self()
    }
}

/// A mounted chart that re-renders itself after debounced container resizes.
///
/// The host forwards resize notifications with `notify_resize` and calls
/// `poll` from its event loop (for example when the timer reported by
/// `time_until_due` expires). Errors from a resize-triggered pass are returned
/// from `poll` exactly like errors from `mount`.
pub struct ResponsiveChart<C: Chart, R: Renderer, M: ContainerMeasure> {
    chart: C,
    labels: Vec<RawLabel>,
    values: Vec<C::Value>,
    renderer: R,
    measure: M,
    controller: ResizeController,
    render_passes: u64,
}

impl<C: Chart, R: Renderer, M: ContainerMeasure> ResponsiveChart<C, R, M> {
    /// Runs the initial render pass and returns the mounted chart.
    pub fn mount(
        chart: C,
        labels: Vec<RawLabel>,
        values: Vec<C::Value>,
        renderer: R,
        measure: M,
    ) -> ChartResult<Self> {
        let mut mounted = Self {
            chart,
            labels,
            values,
            renderer,
            measure,
            controller: ResizeController::default(),
            render_passes: 0,
        };
        mounted.render_pass()?;
        Ok(mounted)
    }

    /// Replaces the default 200ms debounce.
    #[must_use]
    pub fn with_controller(mut self, controller: ResizeController) -> Self {
        self.controller = controller;
        self
    }

    pub fn notify_resize(&mut self, now: Instant) {
        self.controller.notify(now);
    }

    /// Fires the pending render when its debounce has expired.
    ///
    /// Returns `Ok(true)` when a render pass ran.
    pub fn poll(&mut self, now: Instant) -> ChartResult<bool> {
        if !self.controller.take_due(now) {
            return Ok(false);
        }
        self.render_pass().inspect_err(|err| {
            warn!(error = %err, "resize-triggered render pass failed");
        })?;
        Ok(true)
    }

    /// Swaps the series and renders immediately.
    ///
    /// The new series is kept only when its pass succeeds; on error the
    /// previous series and painted geometry stay in place.
    pub fn replace_data(
        &mut self,
        labels: Vec<RawLabel>,
        values: Vec<C::Value>,
    ) -> ChartResult<RenderPlan> {
        let container = self.measure.measure();
        let plan = self.chart.render(&labels, &values, container)?;
        self.paint(&plan, container)?;
        self.labels = labels;
        self.values = values;
        Ok(plan)
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.controller.deadline()
    }

    #[must_use]
    pub fn controller(&self) -> &ResizeController {
        &self.controller
    }

    #[must_use]
    pub fn chart(&self) -> &C {
        &self.chart
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Completed render passes, the initial mount included.
    #[must_use]
    pub fn render_passes(&self) -> u64 {
        self.render_passes
    }

    fn render_pass(&mut self) -> ChartResult<RenderPlan> {
        let container = self.measure.measure();
        let plan = self.chart.render(&self.labels, &self.values, container)?;
        self.paint(&plan, container)?;
        Ok(plan)
    }

    fn paint(&mut self, plan: &RenderPlan, container: ContainerSize) -> ChartResult<()> {
        self.renderer.clear()?;
        self.renderer.render(plan)?;
        self.render_passes += 1;
        debug!(
            kind = ?self.chart.kind(),
            pass = self.render_passes,
            surface_width = container.width,
            surface_height = container.height,
            "render pass painted"
        );
        Ok(())
    }
}
