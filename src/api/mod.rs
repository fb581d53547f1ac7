mod chart;
mod config;
mod domain;
mod elements;
mod engine;
mod size;
mod theme;
mod tooltip;

pub use chart::{
    AXES_CLASS, BACKGROUND_CLASS, ChartContext, ChartLayout, ChartScales, SERIES_CLASS,
    SeriesHits, TOOLTIP_CLASS, XyChart,
};
pub use config::{ScaleSpec, XyChartConfig};
pub use elements::{
    AREA_SERIES_CLASS, AreaSeriesProps, BAR_SERIES_CLASS, BarSeriesProps, ChartElement,
    ElementDatum, LINE_SERIES_CLASS, LineSeriesProps, NETWORK_CLASS, NetworkProps,
    POINT_SERIES_CLASS, PointSeriesProps, SeriesOutput, SeriesStyle,
};
pub use engine::ChartEngine;
pub use size::{ParentSize, ScreenSize, SizeSource};
pub use theme::{Theme, TooltipTheme};
pub use tooltip::{TooltipFormatter, default_tooltip_text};
