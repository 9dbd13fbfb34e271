use serde::{Deserialize, Serialize};

use crate::core::{ContainerSize, Margin, Viewport};
use crate::error::{ChartError, ChartResult};

/// Result of one layout pass.
///
/// Logical `width`/`height` drive the inner plot and every scale range; the
/// measured container size only sets the physical surface the viewport is
/// stretched onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub inner_width: f64,
    pub inner_height: f64,
    pub margin: Margin,
    pub viewport: Viewport,
    pub surface: ContainerSize,
}

impl Layout {
    /// Computes inner plot size and viewport.
    ///
    /// `overflow_top` is the room left above the plot for labels that spill
    /// past the top tick; the viewport starts at `(-margin.left, -overflow_top)`.
    pub fn compute(
        width: f64,
        height: f64,
        margin: Margin,
        overflow_top: f64,
        container: ContainerSize,
    ) -> ChartResult<Self> {
        let margin = margin.validate()?;
        if !width.is_finite() || !height.is_finite() {
            return Err(ChartError::InvalidData(
                "chart width and height must be finite".to_owned(),
            ));
        }
        if !overflow_top.is_finite() || overflow_top < 0.0 {
            return Err(ChartError::InvalidData(
                "viewport overflow must be finite and >= 0".to_owned(),
            ));
        }

        let inner_width = width - margin.left - margin.right;
        let inner_height = height - margin.top - margin.bottom;
        if inner_width <= 0.0 || inner_height <= 0.0 {
            return Err(ChartError::DegenerateLayout {
                width,
                height,
                inner_width,
                inner_height,
            });
        }

        Ok(Self {
            inner_width,
            inner_height,
            margin,
            viewport: Viewport::new(-margin.left, -overflow_top, width, height),
            surface: container,
        })
    }

    /// Same logical layout stretched onto a different physical container.
    #[must_use]
    pub fn with_surface(self, container: ContainerSize) -> Self {
        Self {
            surface: container,
            ..self
        }
    }
}
