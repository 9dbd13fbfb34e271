use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::core::{ContainerSize, Vertex, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    AxisSpec, LineSegment, PathGeometry, RenderPlan, Renderer, TextAnchor, Translate,
};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }
}

/// Fixed colors and sizes used to paint plans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CairoPalette {
    pub background: Color,
    pub axis: Color,
    pub gridline: Color,
    pub envelope_fill: Color,
    pub line_stroke: Color,
    pub text: Color,
    pub font_size_px: f64,
    pub line_width: f64,
}

impl Default for CairoPalette {
    fn default() -> Self {
        Self {
            background: Color::rgb(1.0, 1.0, 1.0),
            axis: Color::rgb(0.0, 0.0, 0.0),
            gridline: Color::rgba(0.827, 0.827, 0.827, 0.7),
            // steelblue
            envelope_fill: Color::rgb(0.275, 0.510, 0.706),
            line_stroke: Color::rgb(0.275, 0.510, 0.706),
            text: Color::rgb(0.0, 0.0, 0.0),
            font_size_px: 10.0,
            line_width: 1.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub gridlines_drawn: usize,
    pub ticks_drawn: usize,
    pub paths_drawn: usize,
    pub texts_drawn: usize,
}

/// Renderers that can paint into an external Cairo context (for example a
/// GTK `DrawingArea` draw callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, plan: &RenderPlan)
    -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo painter.
///
/// The plan viewport is fitted into the physical surface preserving aspect
/// ratio and centered, the way an SVG `viewBox` is.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    palette: CairoPalette,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::Backend(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            palette: CairoPalette::default(),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn palette(&self) -> CairoPalette {
        self.palette
    }

    pub fn set_palette(&mut self, palette: CairoPalette) {
        self.palette = palette;
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn surface_size(&self) -> ContainerSize {
        ContainerSize::new(
            u32::try_from(self.surface.width()).unwrap_or(0),
            u32::try_from(self.surface.height()).unwrap_or(0),
        )
    }

    fn paint_background(&self, context: &Context) -> ChartResult<()> {
        apply_color(context, self.palette.background);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))
    }

    fn render_with_context(
        &mut self,
        context: &Context,
        plan: &RenderPlan,
        surface: ContainerSize,
    ) -> ChartResult<()> {
        plan.validate()?;
        self.paint_background(context)?;
        if surface.is_empty() {
            self.last_stats = CairoRenderStats::default();
            return Ok(());
        }

        context.save().map_err(|err| map_backend_error("failed to save state", err))?;
        fit_viewport(context, plan.viewport, surface);

        let palette = self.palette;
        let mut stats = CairoRenderStats::default();

        for grid in plan.x_gridlines.iter().chain(&plan.y_gridlines) {
            for line in &grid.lines {
                stroke_segment(context, *line, Translate::default(), palette.gridline, 1.0)?;
                stats.gridlines_drawn += 1;
            }
        }

        for path in &plan.paths {
            match path {
                PathGeometry::Envelope(envelope) => {
                    let outline = envelope.outline();
                    if outline.is_empty() {
                        continue;
                    }
                    trace_polyline(context, &outline);
                    context.close_path();
                    apply_color(context, palette.envelope_fill);
                    context
                        .fill()
                        .map_err(|err| map_backend_error("failed to fill envelope", err))?;
                }
                PathGeometry::Line(line) => {
                    if line.is_empty() {
                        continue;
                    }
                    trace_polyline(context, &line.vertices);
                    apply_color(context, palette.line_stroke);
                    context.set_line_width(palette.line_width);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke line", err))?;
                }
            }
            stats.paths_drawn += 1;
        }

        for axis in plan.x_axis.iter().chain(&plan.y_axis) {
            paint_axis(context, axis, palette, &mut stats)?;
        }

        for title in &plan.titles {
            show_text(context, &title.text, title.at, title.anchor, palette);
            stats.texts_drawn += 1;
        }

        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore state", err))?;
        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn clear(&mut self) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.paint_background(&context)?;
        self.last_stats = CairoRenderStats::default();
        Ok(())
    }

    fn render(&mut self, plan: &RenderPlan) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        let surface = self.surface_size();
        self.render_with_context(&context, plan, surface)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        plan: &RenderPlan,
    ) -> ChartResult<()> {
        self.render_with_context(context, plan, plan.surface)
    }
}

fn fit_viewport(context: &Context, viewport: Viewport, surface: ContainerSize) {
    let surface_width = f64::from(surface.width);
    let surface_height = f64::from(surface.height);
    let scale = (surface_width / viewport.width).min(surface_height / viewport.height);
    let offset_x = (surface_width - viewport.width * scale) / 2.0;
    let offset_y = (surface_height - viewport.height * scale) / 2.0;
    context.translate(offset_x, offset_y);
    context.scale(scale, scale);
    context.translate(-viewport.min_x, -viewport.min_y);
}

fn paint_axis(
    context: &Context,
    axis: &AxisSpec,
    palette: CairoPalette,
    stats: &mut CairoRenderStats,
) -> ChartResult<()> {
    stroke_segment(context, axis.domain_line, axis.transform, palette.axis, 1.0)?;
    for tick in &axis.ticks {
        stroke_segment(context, tick.line, axis.transform, palette.axis, 1.0)?;
        let at = Vertex::new(
            tick.label_at.x + axis.transform.x,
            tick.label_at.y + axis.transform.y,
        );
        show_text(context, &tick.label, at, axis.label_anchor, palette);
        stats.ticks_drawn += 1;
        stats.texts_drawn += 1;
    }
    Ok(())
}

fn stroke_segment(
    context: &Context,
    line: LineSegment,
    offset: Translate,
    color: Color,
    width: f64,
) -> ChartResult<()> {
    apply_color(context, color);
    context.set_line_width(width);
    context.move_to(line.x1 + offset.x, line.y1 + offset.y);
    context.line_to(line.x2 + offset.x, line.y2 + offset.y);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke segment", err))
}

fn trace_polyline(context: &Context, vertices: &[Vertex]) {
    let mut iter = vertices.iter();
    if let Some(first) = iter.next() {
        context.move_to(first.x, first.y);
    }
    for vertex in iter {
        context.line_to(vertex.x, vertex.y);
    }
}

fn show_text(context: &Context, text: &str, at: Vertex, anchor: TextAnchor, palette: CairoPalette) {
    let layout = pangocairo::functions::create_layout(context);
    let font_description = FontDescription::from_string(&format!("Sans {}", palette.font_size_px));
    layout.set_font_description(Some(&font_description));
    layout.set_text(text);

    let (text_width, text_height) = layout.pixel_size();
    let x = match anchor {
        TextAnchor::Start => at.x,
        TextAnchor::Middle => at.x - f64::from(text_width) / 2.0,
        TextAnchor::End => at.x - f64::from(text_width),
    };
    let y = at.y - f64::from(text_height) / 2.0;

    apply_color(context, palette.text);
    context.move_to(x, y);
    pangocairo::functions::show_layout(context, &layout);
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
