use crate::core::{LinearScale, OrdinalScale, TimeScale, Vertex};
use crate::render::{
    AxisPlacement, AxisSpec, AxisTick, AxisTitle, GridOrientation, GridlineSpec, LineSegment,
    TextAnchor, TickValue, Translate,
};

use super::ChartConfig;

pub const AXIS_TICK_SIZE: f64 = 6.0;
pub const AXIS_TICK_PADDING: f64 = 3.0;
/// Tick hint for the drawn axes; the configured hint only drives gridlines.
pub const AXIS_TICK_COUNT: usize = 10;
/// The x title baseline sits this far above `inner_height + margin.top`.
const X_TITLE_LIFT: f64 = 15.0;

/// Tick value with its pixel offset and display label.
#[derive(Debug, Clone, PartialEq)]
pub struct TickMark {
    pub value: TickValue,
    pub offset: f64,
    pub label: String,
}

/// A scale an axis can be drawn for.
///
/// `count` is a hint; continuous scales may return more or fewer ticks to keep
/// values round, ordinal scales ignore it and return every category.
pub trait TickSource {
    fn tick_marks(&self, count: usize) -> Vec<TickMark>;

    /// First and last pixel of the scale range.
    fn range_extent(&self) -> (f64, f64);
}

impl TickSource for LinearScale {
    fn tick_marks(&self, count: usize) -> Vec<TickMark> {
        self.ticks(count)
            .into_iter()
            .map(|value| TickMark {
                value: TickValue::Number(value),
                offset: self.map(value),
                label: self.format_tick(value, count),
            })
            .collect()
    }

    fn range_extent(&self) -> (f64, f64) {
        self.range()
    }
}

impl TickSource for TimeScale {
    fn tick_marks(&self, count: usize) -> Vec<TickMark> {
        self.ticks(count)
            .into_iter()
            .map(|time| TickMark {
                value: TickValue::Time(time),
                offset: self.map(time),
                label: TimeScale::format_tick(time),
            })
            .collect()
    }

    fn range_extent(&self) -> (f64, f64) {
        self.range()
    }
}

impl TickSource for OrdinalScale {
    fn tick_marks(&self, _count: usize) -> Vec<TickMark> {
        self.domain()
            .zip(self.positions())
            .map(|(category, offset)| TickMark {
                value: TickValue::Category(category.to_owned()),
                offset,
                label: category.to_owned(),
            })
            .collect()
    }

    fn range_extent(&self) -> (f64, f64) {
        self.range()
    }
}

/// Builds axis and gridline specs for one plot area.
///
/// Axes and gridlines take separate tick hints so gridlines can be denser or
/// sparser than the labelled ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisGenerator {
    pub inner_width: f64,
    pub inner_height: f64,
    pub tick_count: usize,
    pub grid_tick_count: usize,
}

impl AxisGenerator {
    /// Generator using `tick_count` for both axes and gridlines.
    #[must_use]
    pub fn new(inner_width: f64, inner_height: f64, tick_count: usize) -> Self {
        Self {
            inner_width,
            inner_height,
            tick_count,
            grid_tick_count: tick_count,
        }
    }

    #[must_use]
    pub fn with_grid_tick_count(mut self, grid_tick_count: usize) -> Self {
        self.grid_tick_count = grid_tick_count;
        self
    }

    /// Axis along the bottom edge, translated to `y = inner_height`.
    #[must_use]
    pub fn bottom<S: TickSource>(&self, scale: &S) -> AxisSpec {
        let (start, end) = scale.range_extent();
        let ticks = scale
            .tick_marks(self.tick_count)
            .into_iter()
            .map(|mark| AxisTick {
                line: LineSegment::new(mark.offset, 0.0, mark.offset, AXIS_TICK_SIZE),
                label_at: Vertex::new(mark.offset, AXIS_TICK_SIZE + AXIS_TICK_PADDING),
                value: mark.value,
                offset: mark.offset,
                label: mark.label,
            })
            .collect();

        AxisSpec {
            placement: AxisPlacement::Bottom,
            transform: Translate {
                x: 0.0,
                y: self.inner_height,
            },
            domain_line: LineSegment::new(start, 0.0, end, 0.0),
            tick_size: AXIS_TICK_SIZE,
            tick_padding: AXIS_TICK_PADDING,
            label_anchor: TextAnchor::Middle,
            ticks,
        }
    }

    /// Axis along the left edge, untranslated.
    #[must_use]
    pub fn left<S: TickSource>(&self, scale: &S) -> AxisSpec {
        let (start, end) = scale.range_extent();
        let ticks = scale
            .tick_marks(self.tick_count)
            .into_iter()
            .map(|mark| AxisTick {
                line: LineSegment::new(0.0, mark.offset, -AXIS_TICK_SIZE, mark.offset),
                label_at: Vertex::new(-(AXIS_TICK_SIZE + AXIS_TICK_PADDING), mark.offset),
                value: mark.value,
                offset: mark.offset,
                label: mark.label,
            })
            .collect();

        AxisSpec {
            placement: AxisPlacement::Left,
            transform: Translate::default(),
            domain_line: LineSegment::new(0.0, start, 0.0, end),
            tick_size: AXIS_TICK_SIZE,
            tick_padding: AXIS_TICK_PADDING,
            label_anchor: TextAnchor::End,
            ticks,
        }
    }

    /// One full-height line per x tick.
    #[must_use]
    pub fn vertical_gridlines<S: TickSource>(&self, scale: &S) -> GridlineSpec {
        GridlineSpec {
            orientation: GridOrientation::Vertical,
            lines: scale
                .tick_marks(self.grid_tick_count)
                .into_iter()
                .map(|mark| LineSegment::new(mark.offset, 0.0, mark.offset, self.inner_height))
                .collect(),
        }
    }

    /// One full-width line per y tick.
    #[must_use]
    pub fn horizontal_gridlines<S: TickSource>(&self, scale: &S) -> GridlineSpec {
        GridlineSpec {
            orientation: GridOrientation::Horizontal,
            lines: scale
                .tick_marks(self.grid_tick_count)
                .into_iter()
                .map(|mark| LineSegment::new(0.0, mark.offset, self.inner_width, mark.offset))
                .collect(),
        }
    }

    /// Captions for configured, non-empty axis labels.
    #[must_use]
    pub fn titles(&self, config: &ChartConfig) -> Vec<AxisTitle> {
        let mut titles = Vec::new();
        if let Some(text) = config.axis_label_x.as_deref().filter(|text| !text.is_empty()) {
            titles.push(AxisTitle {
                placement: AxisPlacement::Bottom,
                text: text.to_owned(),
                at: Vertex::new(
                    self.inner_width / 2.0,
                    self.inner_height + config.margin.top - X_TITLE_LIFT,
                ),
                anchor: TextAnchor::Middle,
            });
        }
        if let Some(text) = config.axis_label_y.as_deref().filter(|text| !text.is_empty()) {
            titles.push(AxisTitle {
                placement: AxisPlacement::Left,
                text: text.to_owned(),
                at: Vertex::new(0.0, -config.margin.top / 2.0),
                anchor: TextAnchor::Start,
            });
        }
        titles
    }
}
