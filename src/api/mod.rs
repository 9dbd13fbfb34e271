mod axis;
mod band_chart;
mod chart;
mod chart_config;
mod line_chart;
mod resize;
mod responsive;

pub use axis::{
    AXIS_TICK_COUNT, AXIS_TICK_PADDING, AXIS_TICK_SIZE, AxisGenerator, TickMark, TickSource,
};
pub use band_chart::{BandChart, BandXAxis, ORDINAL_BAND_NICE_COUNT};
pub use chart::Chart;
pub use chart_config::{
    BAND_VIEWPORT_OVERFLOW_TOP, ChartConfig, ChartConfigOverrides, DEFAULT_CHART_HEIGHT,
    DEFAULT_CHART_MARGIN, DEFAULT_CHART_WIDTH, DEFAULT_TICK_COUNT, LINE_DEFAULT_TICK_COUNT,
    LINE_VIEWPORT_OVERFLOW_TOP, MAX_TICK_COUNT, merge_configuration,
};
pub use line_chart::{LINE_DATE_PATTERN, LineChart};
pub use resize::{RESIZE_DEBOUNCE, ResizeController, ResizeState};
pub use responsive::{ContainerMeasure, ResponsiveChart};
