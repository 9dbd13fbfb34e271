mod null_renderer;
mod plan;

pub use null_renderer::NullRenderer;
pub use plan::{
    AxisPlacement, AxisSpec, AxisTick, AxisTitle, ChartKind, GridOrientation, GridlineSpec,
    LineSegment, PathGeometry, RENDER_PLAN_JSON_SCHEMA_V1, RenderPlan, RenderPlanJsonContractV1,
    TextAnchor, TickValue, Translate,
};

use crate::error::ChartResult;

/// Paint collaborator contract.
///
/// Backends receive a complete `RenderPlan` and never call back into the
/// chart. `clear` removes whatever the previous pass painted so geometry from
/// one pass never leaks into the next.
pub trait Renderer {
    fn clear(&mut self) -> ChartResult<()>;

    fn render(&mut self, plan: &RenderPlan) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{
    CairoContextRenderer, CairoPalette, CairoRenderStats, CairoRenderer, Color,
};
