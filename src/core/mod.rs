pub mod area_series;
pub mod bar_series;
pub mod format;
pub mod line_series;
pub mod network;
pub mod projection;
pub mod scale;
pub mod ticks;
pub mod types;
pub mod value;

pub use area_series::{AreaGeometry, AreaVertex, baseline_pixel, project_area};
pub use bar_series::{BarGeometry, BarSeriesGeometry, project_bars};
pub use line_series::{LinePath, MissingValuePolicy, project_line_path};
pub use network::{
    DEFAULT_NODE_RADIUS, Graph, Link, LinkGeometry, NetworkGeometry, Node, NodeGeometry,
    project_network,
};
pub use projection::{PointOutcome, Projection, SkippedPoint, project_point, project_points};
pub use scale::{
    BandPadding, BandScale, ContinuousScale, Interpolation, ResolvedScale, ScaleConfig,
    ScaleDomain, ScaleKind, ScaleSource, resolve,
};
pub use ticks::{DEFAULT_TICK_COUNT, MAX_TICK_COUNT, Tick, TickFormatter, TickOptions, generate_ticks};
pub use types::{DataPoint, InnerSize, Margin, ProjectedPoint, SeriesId, Viewport};
pub use value::DataValue;
