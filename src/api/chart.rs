use tracing::{debug, warn};

use crate::core::{InnerSize, ProjectedPoint, ResolvedScale, SeriesId, resolve};
use crate::error::{ChartError, ChartResult};
use crate::render::{PrimitiveGroup, RectPrimitive, RenderFrame};

use super::domain::derive_domain;
use super::{ChartElement, ScaleSpec, Theme, XyChartConfig};

pub const BACKGROUND_CLASS: &str = "background";
pub const SERIES_CLASS: &str = "series";
pub const AXES_CLASS: &str = "axes";
pub const TOOLTIP_CLASS: &str = "tooltip";

/// Everything an element needs to draw itself, passed explicitly.
#[derive(Debug, Clone, Copy)]
pub struct ChartContext<'a> {
    pub inner: InnerSize,
    pub x_scale: Option<&'a ResolvedScale>,
    pub y_scale: Option<&'a ResolvedScale>,
    pub theme: &'a Theme,
}

impl<'a> ChartContext<'a> {
    pub fn x_scale(&self) -> ChartResult<&'a ResolvedScale> {
        self.x_scale.ok_or(ChartError::MissingScale { axis: "x" })
    }

    pub fn y_scale(&self) -> ChartResult<&'a ResolvedScale> {
        self.y_scale.ok_or(ChartError::MissingScale { axis: "y" })
    }
}

/// Scales resolved for one inner size.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScales {
    pub inner: InnerSize,
    pub x: Option<ResolvedScale>,
    pub y: Option<ResolvedScale>,
}

/// Projected points of one series, for tooltip hit-testing.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesHits {
    pub id: SeriesId,
    /// Position of the owning element in the chart's element list.
    pub element: usize,
    pub points: Vec<ProjectedPoint>,
}

/// Plot-local output of all elements.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub series: PrimitiveGroup,
    pub axes: PrimitiveGroup,
    pub hits: Vec<SeriesHits>,
    pub skipped_points: usize,
}

/// Container that owns a config and an ordered element list.
#[derive(Debug, Clone)]
pub struct XyChart {
    config: XyChartConfig,
    elements: Vec<ChartElement>,
}

impl XyChart {
    pub fn new(config: XyChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            elements: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_element(mut self, element: ChartElement) -> Self {
        self.elements.push(element);
        self
    }

    pub fn push_element(&mut self, element: ChartElement) {
        self.elements.push(element);
    }

    pub fn set_elements(&mut self, elements: Vec<ChartElement>) {
        self.elements = elements;
    }

    #[must_use]
    pub fn elements(&self) -> &[ChartElement] {
        &self.elements
    }

    #[must_use]
    pub fn config(&self) -> &XyChartConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: XyChartConfig) -> ChartResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub(crate) fn config_mut(&mut self) -> &mut XyChartConfig {
        &mut self.config
    }

    pub fn inner_size(&self) -> ChartResult<InnerSize> {
        InnerSize::from_viewport(self.config.viewport, self.config.margin)
    }

    /// Resolves both scales against the inner size, deriving missing
    /// domains from series data.
    pub fn resolve_scales(&self) -> ChartResult<ChartScales> {
        let inner = self.inner_size()?;
        let x = self
            .config
            .x_scale
            .as_ref()
            .map(|spec| self.resolve_axis_scale(spec, (0.0, inner.width), Axis::X))
            .transpose()?;
        let y = self
            .config
            .y_scale
            .as_ref()
            .map(|spec| self.resolve_axis_scale(spec, (inner.height, 0.0), Axis::Y))
            .transpose()?;
        debug!(
            width = inner.width,
            height = inner.height,
            has_x = x.is_some(),
            has_y = y.is_some(),
            "resolved chart scales"
        );
        Ok(ChartScales { inner, x, y })
    }

    fn resolve_axis_scale(
        &self,
        spec: &ScaleSpec,
        range: (f64, f64),
        axis: Axis,
    ) -> ChartResult<ResolvedScale> {
        let domain = match &spec.domain {
            Some(domain) => domain.clone(),
            None => {
                let include_zero = spec.include_zero
                    || (axis == Axis::Y && self.elements.iter().any(ChartElement::anchors_y_at_zero));
                let values = self
                    .elements
                    .iter()
                    .flat_map(ChartElement::domain_values)
                    .filter_map(|(x, y)| match axis {
                        Axis::X => Some(x),
                        Axis::Y => y,
                    });
                derive_domain(spec.kind, values, include_zero, axis.name())?
            }
        };
        resolve(&spec.to_config(domain, range))
    }

    /// Renders every element against `scales`.
    ///
    /// Elements that need an unset scale are left out; any other error
    /// aborts the layout.
    pub fn layout(&self, scales: &ChartScales) -> ChartResult<ChartLayout> {
        let ctx = ChartContext {
            inner: scales.inner,
            x_scale: scales.x.as_ref(),
            y_scale: scales.y.as_ref(),
            theme: &self.config.theme,
        };
        let mut layout = ChartLayout {
            series: PrimitiveGroup::new(SERIES_CLASS),
            axes: PrimitiveGroup::new(AXES_CLASS),
            hits: Vec::new(),
            skipped_points: 0,
        };

        let mut series_position = 0;
        for (index, element) in self.elements.iter().enumerate() {
            if element.is_axis() {
                match element.render_axis(&ctx) {
                    Ok(Some(group)) => layout.axes.push_child(group),
                    Ok(None) => {}
                    Err(err @ ChartError::MissingScale { .. }) => {
                        debug!(element = index, error = %err, "axis rendered nothing");
                    }
                    Err(err) => return Err(err),
                }
                continue;
            }

            let position = series_position;
            series_position += 1;
            match element.render_series(&ctx, position) {
                Ok(Some(output)) => {
                    layout.skipped_points += output.skipped;
                    layout.series.push_child(output.group);
                    if let Some(id) = element.series_id() {
                        layout.hits.push(SeriesHits {
                            id: id.clone(),
                            element: index,
                            points: output.hit_points,
                        });
                    }
                }
                Ok(None) => {}
                Err(err @ ChartError::MissingScale { .. }) => {
                    debug!(element = index, error = %err, "series rendered nothing");
                }
                Err(err) => return Err(err),
            }
        }

        if layout.skipped_points > 0 {
            warn!(
                skipped = layout.skipped_points,
                "chart layout omitted data points"
            );
        }
        Ok(layout)
    }

    /// Assembles a frame from a layout plus an optional tooltip group.
    #[must_use]
    pub fn compose_frame(&self, layout: &ChartLayout, tooltip: Option<PrimitiveGroup>) -> RenderFrame {
        let viewport = self.config.viewport;
        let margin = self.config.margin;

        let mut background = PrimitiveGroup::new(BACKGROUND_CLASS);
        background.push_rect(RectPrimitive::new(
            0.0,
            0.0,
            f64::from(viewport.width),
            f64::from(viewport.height),
            self.config.theme.background,
        ));

        let mut frame = RenderFrame::new(viewport)
            .with_group(background)
            .with_group(layout.series.clone().translated(margin.left, margin.top))
            .with_group(layout.axes.clone().translated(margin.left, margin.top));
        if let Some(tooltip) = tooltip {
            frame = frame.with_group(tooltip.translated(margin.left, margin.top));
        }
        frame
    }

    /// One-shot render without tooltip state.
    pub fn render_frame(&self) -> ChartResult<RenderFrame> {
        let scales = self.resolve_scales()?;
        let layout = self.layout(&scales)?;
        Ok(self.compose_frame(&layout, None))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}
