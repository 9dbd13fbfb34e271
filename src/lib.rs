//! chart-plan: data-to-geometry pipeline for band and line charts.
//!
//! Raw label/value arrays go in, a renderer-agnostic [`render::RenderPlan`]
//! comes out. Painting is left to a [`render::Renderer`] implementation
//! supplied by the host; container resizes are debounced by
//! [`api::ResizeController`] and replayed through [`api::ResponsiveChart`].

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{BandChart, Chart, ChartConfig, ChartConfigOverrides, LineChart};
pub use error::{ChartError, ChartResult};
