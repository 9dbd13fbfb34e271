use serde::{Deserialize, Serialize};

use crate::core::{BandPoint, LinePoint, LinearScale, PositionScale, Vertex};
use crate::error::{ChartError, ChartResult};

/// How consecutive anchors are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interpolation {
    /// Straight segments between anchors.
    #[default]
    Linear,
    /// Horizontal run to the midpoint, vertical riser, horizontal run.
    Step,
    /// Vertical riser at the previous anchor, then horizontal run.
    StepBefore,
    /// Horizontal run to the next anchor, then vertical riser.
    StepAfter,
}

impl Interpolation {
    fn step_ratio(self) -> Option<f64> {
        match self {
            Self::Linear => None,
            Self::Step => Some(0.5),
            Self::StepBefore => Some(0.0),
            Self::StepAfter => Some(1.0),
        }
    }

    /// Expands mapped anchors into the vertices of the drawn polyline.
    #[must_use]
    pub fn interpolate(self, anchors: &[Vertex]) -> Vec<Vertex> {
        let Some(t) = self.step_ratio() else {
            return anchors.to_vec();
        };
        let Some(first) = anchors.first() else {
            return Vec::new();
        };

        let mut out = Vec::with_capacity(anchors.len() * 2 + 1);
        out.push(*first);
        for pair in anchors.windows(2) {
            let (previous, current) = (pair[0], pair[1]);
            if t <= 0.0 {
                out.push(Vertex::new(previous.x, current.y));
                out.push(current);
            } else {
                let riser_x = previous.x * (1.0 - t) + current.x * t;
                out.push(Vertex::new(riser_x, previous.y));
                out.push(Vertex::new(riser_x, current.y));
            }
        }
        if t > 0.0 && t < 1.0 && anchors.len() > 1 {
            out.push(anchors[anchors.len() - 1]);
        }
        out
    }
}

/// Polyline geometry for a single-series line chart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinePath {
    pub vertices: Vec<Vertex>,
}

impl LinePath {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Filled region between the interpolated high (`upper`) and low (`lower`)
/// boundaries. Both boundaries run left to right.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BandEnvelope {
    pub upper: Vec<Vertex>,
    pub lower: Vec<Vertex>,
}

impl BandEnvelope {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.upper.is_empty() && self.lower.is_empty()
    }

    /// Closed polygon: upper boundary forward, lower boundary backward, then
    /// the first vertex repeated.
    #[must_use]
    pub fn outline(&self) -> Vec<Vertex> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut polygon = Vec::with_capacity(self.upper.len() + self.lower.len() + 1);
        polygon.extend(self.upper.iter().copied());
        polygon.extend(self.lower.iter().rev().copied());
        if let Some(first) = polygon.first().copied() {
            polygon.push(first);
        }
        polygon
    }
}

fn map_x<P, X: PositionScale<P>>(x_scale: &X, position: &P, index: usize) -> ChartResult<f64> {
    x_scale.position(position).ok_or_else(|| {
        ChartError::InvalidData(format!("point #{index} is outside the x scale domain"))
    })
}

/// Maps line points through both scales and joins them.
///
/// Fewer than two points yield an empty path.
pub fn build_line_path<P, X: PositionScale<P>>(
    points: &[LinePoint<P>],
    x_scale: &X,
    y_scale: &LinearScale,
    interpolation: Interpolation,
) -> ChartResult<LinePath> {
    if points.len() < 2 {
        return Ok(LinePath::default());
    }

    let mut anchors = Vec::with_capacity(points.len());
    for (index, point) in points.iter().enumerate() {
        let x = map_x(x_scale, &point.position, index)?;
        anchors.push(Vertex::new(x, y_scale.map(point.value)));
    }

    Ok(LinePath {
        vertices: interpolation.interpolate(&anchors),
    })
}

/// Maps band points into an upper (`high`) and lower (`low`) boundary.
///
/// Fewer than two points yield an empty envelope.
pub fn build_band_envelope<P, X: PositionScale<P>>(
    points: &[BandPoint<P>],
    x_scale: &X,
    y_scale: &LinearScale,
    interpolation: Interpolation,
) -> ChartResult<BandEnvelope> {
    if points.len() < 2 {
        return Ok(BandEnvelope::default());
    }

    let mut upper = Vec::with_capacity(points.len());
    let mut lower = Vec::with_capacity(points.len());
    for (index, point) in points.iter().enumerate() {
        let x = map_x(x_scale, &point.position, index)?;
        upper.push(Vertex::new(x, y_scale.map(point.high())));
        lower.push(Vertex::new(x, y_scale.map(point.low())));
    }

    Ok(BandEnvelope {
        upper: interpolation.interpolate(&upper),
        lower: interpolation.interpolate(&lower),
    })
}
