use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("label/value shape mismatch: {labels} labels, {values} values")]
    ShapeMismatch { labels: usize, values: usize },

    #[error(
        "degenerate layout: {width}x{height} leaves an inner plot of {inner_width}x{inner_height}"
    )]
    DegenerateLayout {
        width: f64,
        height: f64,
        inner_width: f64,
        inner_height: f64,
    },

    #[error("label #{index} is not a valid date: `{label}`")]
    InvalidLabelFormat { index: usize, label: String },

    #[error("band point #{index} has low {low} above high {high}")]
    InvertedBand { index: usize, low: f64, high: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("paint backend failure: {0}")]
    Backend(String),
}
