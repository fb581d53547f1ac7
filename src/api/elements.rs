use crate::axis::{AxisOrientation, AxisProps};
use crate::core::{
    DEFAULT_NODE_RADIUS, DataPoint, DataValue, Graph, MissingValuePolicy, ProjectedPoint,
    SeriesId, area_series::project_area, bar_series::project_bars, line_series::project_line_path,
    network::project_network, projection::project_points,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{CirclePrimitive, Color, LinePrimitive, PathPrimitive, PrimitiveGroup, RectPrimitive};

use super::ChartContext;

pub const LINE_SERIES_CLASS: &str = "line-series";
pub const AREA_SERIES_CLASS: &str = "area-series";
pub const BAR_SERIES_CLASS: &str = "bar-series";
pub const POINT_SERIES_CLASS: &str = "point-series";
pub const NETWORK_CLASS: &str = "network";

/// Optional per-series colors and sizes; unset fields use the theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub fill: Option<Color>,
    pub fill_opacity: f64,
    pub point_radius: f64,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            stroke: None,
            stroke_width: 2.0,
            fill: None,
            fill_opacity: 0.3,
            point_radius: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeriesProps {
    pub id: SeriesId,
    pub data: Vec<DataPoint>,
    pub missing: MissingValuePolicy,
    pub show_points: bool,
    pub style: SeriesStyle,
}

impl LineSeriesProps {
    #[must_use]
    pub fn new(id: impl Into<SeriesId>, data: Vec<DataPoint>) -> Self {
        Self {
            id: id.into(),
            data,
            missing: MissingValuePolicy::default(),
            show_points: false,
            style: SeriesStyle::default(),
        }
    }

    #[must_use]
    pub fn with_missing(mut self, missing: MissingValuePolicy) -> Self {
        self.missing = missing;
        self
    }

    #[must_use]
    pub fn with_points(mut self, show_points: bool) -> Self {
        self.show_points = show_points;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: SeriesStyle) -> Self {
        self.style = style;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AreaSeriesProps {
    pub id: SeriesId,
    pub data: Vec<DataPoint>,
    pub missing: MissingValuePolicy,
    pub style: SeriesStyle,
}

impl AreaSeriesProps {
    #[must_use]
    pub fn new(id: impl Into<SeriesId>, data: Vec<DataPoint>) -> Self {
        Self {
            id: id.into(),
            data,
            missing: MissingValuePolicy::default(),
            style: SeriesStyle::default(),
        }
    }

    #[must_use]
    pub fn with_missing(mut self, missing: MissingValuePolicy) -> Self {
        self.missing = missing;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeriesProps {
    pub id: SeriesId,
    pub data: Vec<DataPoint>,
    /// Required on continuous x scales; caps the band width otherwise.
    pub bar_width: Option<f64>,
    pub style: SeriesStyle,
}

impl BarSeriesProps {
    #[must_use]
    pub fn new(id: impl Into<SeriesId>, data: Vec<DataPoint>) -> Self {
        Self {
            id: id.into(),
            data,
            bar_width: None,
            style: SeriesStyle::default(),
        }
    }

    #[must_use]
    pub fn with_bar_width(mut self, width: f64) -> Self {
        self.bar_width = Some(width);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointSeriesProps {
    pub id: SeriesId,
    pub data: Vec<DataPoint>,
    pub style: SeriesStyle,
}

impl PointSeriesProps {
    #[must_use]
    pub fn new(id: impl Into<SeriesId>, data: Vec<DataPoint>) -> Self {
        Self {
            id: id.into(),
            data,
            style: SeriesStyle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkProps {
    pub id: SeriesId,
    pub graph: Graph,
    pub node_radius: f64,
    pub node_fill: Option<Color>,
    pub link_stroke: Color,
}

impl NetworkProps {
    #[must_use]
    pub fn new(id: impl Into<SeriesId>, graph: Graph) -> Self {
        Self {
            id: id.into(),
            graph,
            node_radius: DEFAULT_NODE_RADIUS,
            node_fill: None,
            link_stroke: Color::rgb(0.6, 0.6, 0.6),
        }
    }
}

/// Child of an [`super::XyChart`]. The container dispatches on the tag.
#[derive(Debug, Clone)]
pub enum ChartElement {
    XAxis(AxisProps),
    YAxis(AxisProps),
    LineSeries(LineSeriesProps),
    AreaSeries(AreaSeriesProps),
    BarSeries(BarSeriesProps),
    PointSeries(PointSeriesProps),
    Network(NetworkProps),
}

/// Source datum behind a tooltip match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementDatum<'a> {
    Point(&'a DataPoint),
    Node(&'a crate::core::Node),
}

/// Geometry produced by one series element.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesOutput {
    pub group: PrimitiveGroup,
    pub hit_points: Vec<ProjectedPoint>,
    pub skipped: usize,
}

impl ChartElement {
    #[must_use]
    pub fn is_axis(&self) -> bool {
        matches!(self, Self::XAxis(_) | Self::YAxis(_))
    }

    #[must_use]
    pub fn series_id(&self) -> Option<&SeriesId> {
        match self {
            Self::XAxis(_) | Self::YAxis(_) => None,
            Self::LineSeries(props) => Some(&props.id),
            Self::AreaSeries(props) => Some(&props.id),
            Self::BarSeries(props) => Some(&props.id),
            Self::PointSeries(props) => Some(&props.id),
            Self::Network(props) => Some(&props.id),
        }
    }

    /// `(x, y)` values this element contributes to data-derived domains.
    pub(crate) fn domain_values(&self) -> Vec<(&DataValue, Option<&DataValue>)> {
        match self {
            Self::XAxis(_) | Self::YAxis(_) => Vec::new(),
            Self::LineSeries(props) => point_values(&props.data),
            Self::AreaSeries(props) => point_values(&props.data),
            Self::BarSeries(props) => point_values(&props.data),
            Self::PointSeries(props) => point_values(&props.data),
            Self::Network(props) => props
                .graph
                .nodes
                .iter()
                .map(|node| (&node.x, Some(&node.y)))
                .collect(),
        }
    }

    /// Bars are drawn from zero, so their y domain must include it.
    #[must_use]
    pub fn anchors_y_at_zero(&self) -> bool {
        matches!(self, Self::BarSeries(_) | Self::AreaSeries(_))
    }

    #[must_use]
    pub fn datum(&self, index: usize) -> Option<ElementDatum<'_>> {
        match self {
            Self::XAxis(_) | Self::YAxis(_) => None,
            Self::LineSeries(props) => props.data.get(index).map(ElementDatum::Point),
            Self::AreaSeries(props) => props.data.get(index).map(ElementDatum::Point),
            Self::BarSeries(props) => props.data.get(index).map(ElementDatum::Point),
            Self::PointSeries(props) => props.data.get(index).map(ElementDatum::Point),
            Self::Network(props) => props.graph.nodes.get(index).map(ElementDatum::Node),
        }
    }

    /// Renders an axis element, `None` for series.
    pub fn render_axis(&self, ctx: &ChartContext<'_>) -> ChartResult<Option<PrimitiveGroup>> {
        let (props, default_orientation, scale) = match self {
            Self::XAxis(props) => (props, AxisOrientation::Bottom, ctx.x_scale()?),
            Self::YAxis(props) => (props, AxisOrientation::Right, ctx.y_scale()?),
            _ => return Ok(None),
        };
        let orientation = props.orientation.unwrap_or(default_orientation);
        if orientation.is_horizontal() != default_orientation.is_horizontal() {
            return Err(ChartError::Config(format!(
                "{} axis cannot use {} orientation",
                if default_orientation.is_horizontal() { "x" } else { "y" },
                orientation.as_str()
            )));
        }
        let (dx, dy) = orientation.origin(ctx.inner);
        let group = props
            .render(scale, orientation, ctx.theme.axis_styles(orientation))?
            .translated(dx, dy);
        Ok(Some(group))
    }

    /// Renders a series element at palette position `position`, `None` for axes.
    pub fn render_series(
        &self,
        ctx: &ChartContext<'_>,
        position: usize,
    ) -> ChartResult<Option<SeriesOutput>> {
        if self.is_axis() {
            return Ok(None);
        }
        let x_scale = ctx.x_scale()?;
        let y_scale = ctx.y_scale()?;
        let color = ctx.theme.series_color(position);

        let output = match self {
            Self::XAxis(_) | Self::YAxis(_) => return Ok(None),
            Self::LineSeries(props) => {
                let stroke = props.style.stroke.unwrap_or(color);
                let path = project_line_path(&props.data, x_scale, y_scale, props.missing);
                let mut group = PrimitiveGroup::new(LINE_SERIES_CLASS);
                for subpath in &path.subpaths {
                    let points = subpath.iter().map(|point| (point.x, point.y)).collect();
                    group.push_path(PathPrimitive::polyline(
                        points,
                        props.style.stroke_width,
                        stroke,
                    ));
                }
                let hit_points: Vec<ProjectedPoint> =
                    path.subpaths.iter().flatten().copied().collect();
                if props.show_points {
                    for point in &hit_points {
                        group.push_circle(CirclePrimitive::new(
                            point.x,
                            point.y,
                            props.style.point_radius,
                            stroke,
                        ));
                    }
                }
                SeriesOutput {
                    group,
                    hit_points,
                    skipped: path.skipped.len(),
                }
            }
            Self::AreaSeries(props) => {
                let stroke = props.style.stroke.unwrap_or(color);
                let fill = props.style.fill.unwrap_or(Color {
                    alpha: props.style.fill_opacity,
                    ..stroke
                });
                let area = project_area(&props.data, x_scale, y_scale, props.missing);
                let mut group = PrimitiveGroup::new(AREA_SERIES_CLASS);
                for polygon in &area.fill_polygons {
                    let points = polygon.iter().map(|vertex| (vertex.x, vertex.y)).collect();
                    group.push_path(PathPrimitive::polygon(points, fill));
                }
                for subpath in &area.line.subpaths {
                    let points = subpath.iter().map(|point| (point.x, point.y)).collect();
                    group.push_path(PathPrimitive::polyline(
                        points,
                        props.style.stroke_width,
                        stroke,
                    ));
                }
                SeriesOutput {
                    group,
                    hit_points: area.line.subpaths.iter().flatten().copied().collect(),
                    skipped: area.skipped().len(),
                }
            }
            Self::BarSeries(props) => {
                let fill = props.style.fill.unwrap_or(color);
                let bars = project_bars(&props.data, x_scale, y_scale, props.bar_width)?;
                let mut group = PrimitiveGroup::new(BAR_SERIES_CLASS);
                let mut hit_points = Vec::with_capacity(bars.bars.len());
                for bar in &bars.bars {
                    let mut rect = RectPrimitive::new(bar.x, bar.y, bar.width, bar.height, fill);
                    if let Some(stroke) = props.style.stroke {
                        rect = rect.with_border(props.style.stroke_width, stroke);
                    }
                    group.push_rect(rect);
                    hit_points.push(ProjectedPoint::new(bar.center_x(), bar.y, bar.index));
                }
                SeriesOutput {
                    group,
                    hit_points,
                    skipped: bars.skipped.len(),
                }
            }
            Self::PointSeries(props) => {
                let fill = props.style.fill.unwrap_or(color);
                let projection = project_points(&props.data, x_scale, y_scale);
                let mut group = PrimitiveGroup::new(POINT_SERIES_CLASS);
                for point in &projection.points {
                    let mut circle =
                        CirclePrimitive::new(point.x, point.y, props.style.point_radius, fill);
                    if let Some(stroke) = props.style.stroke {
                        circle = circle.with_stroke(props.style.stroke_width, stroke);
                    }
                    group.push_circle(circle);
                }
                SeriesOutput {
                    group,
                    skipped: projection.skipped.len(),
                    hit_points: projection.points,
                }
            }
            Self::Network(props) => {
                let fill = props.node_fill.unwrap_or(color);
                let geometry = project_network(&props.graph, x_scale, y_scale, props.node_radius)?;
                let mut group = PrimitiveGroup::new(NETWORK_CLASS);
                for link in &geometry.links {
                    let width = props
                        .graph
                        .links
                        .get(link.index)
                        .and_then(|source| source.weight)
                        .unwrap_or(1.0)
                        .max(0.5);
                    group.push_line(LinePrimitive::new(
                        link.x1,
                        link.y1,
                        link.x2,
                        link.y2,
                        width,
                        props.link_stroke,
                    ));
                }
                for node in &geometry.nodes {
                    group.push_circle(CirclePrimitive::new(node.x, node.y, node.radius, fill));
                }
                SeriesOutput {
                    group,
                    hit_points: geometry.hit_points(),
                    skipped: geometry.skipped_nodes.len() + geometry.skipped_links.len(),
                }
            }
        };
        Ok(Some(output))
    }
}

fn point_values(data: &[DataPoint]) -> Vec<(&DataValue, Option<&DataValue>)> {
    data.iter().map(|point| (&point.x, point.y.as_ref())).collect()
}
