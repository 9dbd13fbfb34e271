pub mod combine;
pub mod curve;
pub mod domain;
pub mod layout;
pub mod ordinal_scale;
pub mod scale;
pub mod ticks;
pub mod time_scale;
pub mod types;

pub use combine::{
    BandPoint, CombinedPoint, CombinedSeries, DateLabelFormat, InvalidLabelPolicy, LinePoint,
    SeriesValue, check_shape, combine, combine_categories, combine_time_labels,
};
pub use curve::{BandEnvelope, Interpolation, LinePath, build_band_envelope, build_line_path};
pub use domain::{band_value_domain, category_domain, line_value_domain, time_domain};
pub use layout::Layout;
pub use ordinal_scale::OrdinalScale;
pub use scale::{LinearScale, PositionScale};
pub use time_scale::{TimeInterval, TimeScale, TimeUnit};
pub use types::{BandValue, ContainerSize, Margin, RawLabel, Vertex, Viewport};
