use crate::error::ChartResult;
use crate::render::{RenderPlan, Renderer};

/// Headless renderer used by tests and server-side planning.
///
/// It validates plan content and keeps counters so tests can observe the
/// clear/render sequence without a real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub clear_count: usize,
    pub last_vertex_count: usize,
    pub last_tick_count: usize,
    pub last_plan: Option<RenderPlan>,
}

impl Renderer for NullRenderer {
    fn clear(&mut self) -> ChartResult<()> {
        self.clear_count += 1;
        self.last_plan = None;
        self.last_vertex_count = 0;
        self.last_tick_count = 0;
        Ok(())
    }

    fn render(&mut self, plan: &RenderPlan) -> ChartResult<()> {
        plan.validate()?;
        self.render_count += 1;
        self.last_vertex_count = plan.vertex_count();
        self.last_tick_count = plan
            .x_axis
            .iter()
            .chain(&plan.y_axis)
            .map(|axis| axis.ticks.len())
            .sum();
        self.last_plan = Some(plan.clone());
        Ok(())
    }
}
