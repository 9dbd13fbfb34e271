use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{BandEnvelope, ContainerSize, Layout, LinePath, Vertex, Viewport};
use crate::error::{ChartError, ChartResult};

pub const RENDER_PLAN_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Band,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisPlacement {
    Bottom,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Offset applied to an axis group inside the plot coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Translate {
    pub x: f64,
    pub y: f64,
}

/// Straight segment in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LineSegment {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }

    fn is_finite(self) -> bool {
        self.x1.is_finite() && self.y1.is_finite() && self.x2.is_finite() && self.y2.is_finite()
    }
}

/// Domain value a tick was generated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TickValue {
    Number(f64),
    Time(DateTime<Utc>),
    Category(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: TickValue,
    /// Pixel offset along the axis.
    pub offset: f64,
    pub label: String,
    /// Tick mark, relative to the axis transform.
    pub line: LineSegment,
    /// Label reference point, relative to the axis transform.
    pub label_at: Vertex,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub placement: AxisPlacement,
    pub transform: Translate,
    /// Axis line spanning the scale range.
    pub domain_line: LineSegment,
    pub tick_size: f64,
    pub tick_padding: f64,
    pub label_anchor: TextAnchor,
    pub ticks: Vec<AxisTick>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridOrientation {
    /// One vertical line per x tick, spanning the plot height.
    Vertical,
    /// One horizontal line per y tick, spanning the plot width.
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridlineSpec {
    pub orientation: GridOrientation,
    pub lines: Vec<LineSegment>,
}

/// Free-standing axis caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTitle {
    pub placement: AxisPlacement,
    pub text: String,
    pub at: Vertex,
    pub anchor: TextAnchor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathGeometry {
    Line(LinePath),
    Envelope(BandEnvelope),
}

impl PathGeometry {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Line(path) => path.is_empty(),
            Self::Envelope(envelope) => envelope.is_empty(),
        }
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = &Vertex> + '_> {
        match self {
            Self::Line(path) => Box::new(path.vertices.iter()),
            Self::Envelope(envelope) => Box::new(envelope.upper.iter().chain(&envelope.lower)),
        }
    }
}

/// Everything a paint collaborator needs for one render pass.
///
/// Coordinates are in plot space: the origin is the inner plot's top-left
/// corner and `viewport` describes the visible window around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPlan {
    pub kind: ChartKind,
    pub viewport: Viewport,
    pub surface: ContainerSize,
    pub inner_width: f64,
    pub inner_height: f64,
    pub x_axis: Option<AxisSpec>,
    pub y_axis: Option<AxisSpec>,
    pub x_gridlines: Option<GridlineSpec>,
    pub y_gridlines: Option<GridlineSpec>,
    pub paths: Vec<PathGeometry>,
    pub titles: Vec<AxisTitle>,
    /// Input indices dropped because their label could not be parsed.
    #[serde(default)]
    pub skipped_labels: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPlanJsonContractV1 {
    pub schema_version: u32,
    pub plan: RenderPlan,
}

impl RenderPlan {
    /// Plan with a viewport and nothing to draw.
    #[must_use]
    pub fn empty(kind: ChartKind, layout: Layout) -> Self {
        Self {
            kind,
            viewport: layout.viewport,
            surface: layout.surface,
            inner_width: layout.inner_width,
            inner_height: layout.inner_height,
            x_axis: None,
            y_axis: None,
            x_gridlines: None,
            y_gridlines: None,
            paths: Vec::new(),
            titles: Vec::new(),
            skipped_labels: Vec::new(),
        }
    }

    /// True when there are no axes and no non-empty paths.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.x_axis.is_none()
            && self.y_axis.is_none()
            && self.paths.iter().all(PathGeometry::is_empty)
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.paths.iter().map(|path| path.vertices().count()).sum()
    }

    /// Checks that every coordinate is finite.
    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidData(
                "render plan viewport must be finite and non-empty".to_owned(),
            ));
        }

        for axis in self.x_axis.iter().chain(&self.y_axis) {
            let ticks_finite = axis
                .ticks
                .iter()
                .all(|tick| tick.offset.is_finite() && tick.line.is_finite() && tick.label_at.is_finite());
            if !axis.domain_line.is_finite() || !ticks_finite {
                return Err(ChartError::InvalidData(
                    "axis coordinates must be finite".to_owned(),
                ));
            }
        }
        for grid in self.x_gridlines.iter().chain(&self.y_gridlines) {
            if !grid.lines.iter().all(|line| line.is_finite()) {
                return Err(ChartError::InvalidData(
                    "gridline coordinates must be finite".to_owned(),
                ));
            }
        }
        for path in &self.paths {
            if !path.vertices().all(|vertex| vertex.is_finite()) {
                return Err(ChartError::InvalidData(
                    "path vertices must be finite".to_owned(),
                ));
            }
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        let payload = RenderPlanJsonContractV1 {
            schema_version: RENDER_PLAN_JSON_SCHEMA_V1,
            plan: self.clone(),
        };
        serde_json::to_string_pretty(&payload)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize render plan: {e}")))
    }

    /// Accepts both the versioned contract and a bare plan.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        if let Ok(plan) = serde_json::from_str::<RenderPlan>(input) {
            return Ok(plan);
        }
        let payload: RenderPlanJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse render plan json: {e}"))
        })?;
        if payload.schema_version != RENDER_PLAN_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported render plan schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.plan)
    }
}
