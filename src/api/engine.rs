use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::{SeriesId, Viewport};
use crate::error::ChartResult;
use crate::interaction::{TooltipCoordinator, TooltipMatch, TooltipState};
use crate::render::{RenderFrame, Renderer};

use super::tooltip::render_tooltip;
use super::{
    ChartElement, ChartLayout, ChartScales, ElementDatum, SizeSource, TooltipFormatter, XyChart,
    XyChartConfig, default_tooltip_text,
};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

#[derive(Debug, Clone, PartialEq)]
struct CachedLayout {
    generation: u64,
    scales: ChartScales,
    layout: ChartLayout,
}

/// Resolved scales and element geometry, reused until the config, the
/// size or the elements change.
#[derive(Debug, Clone, Default)]
struct ScaleCache {
    generation: u64,
    resolutions: u64,
    cached: Option<CachedLayout>,
}

impl ScaleCache {
    fn invalidate(&mut self) {
        self.generation += 1;
    }

    fn ensure(
        &mut self,
        chart: &XyChart,
        tooltip: &mut TooltipCoordinator,
    ) -> ChartResult<&CachedLayout> {
        let generation = self.generation;
        let cached = match self.cached.take() {
            Some(cached) if cached.generation == generation => cached,
            _ => {
                let scales = chart.resolve_scales()?;
                let layout = chart.layout(&scales)?;
                tooltip.clear_series();
                for hits in &layout.hits {
                    tooltip.register_series(hits.id.clone(), hits.points.clone());
                }
                self.resolutions += 1;
                debug!(
                    generation,
                    series = layout.hits.len(),
                    "recomputed chart layout"
                );
                CachedLayout {
                    generation,
                    scales,
                    layout,
                }
            }
        };
        Ok(self.cached.insert(cached))
    }
}

/// Main orchestration facade consumed by host applications.
///
/// Owns the chart, the tooltip coordinator, the scale cache and the
/// renderer. Pointer coordinates are viewport pixels.
pub struct ChartEngine<R: Renderer> {
    renderer: R,
    chart: XyChart,
    tooltip: TooltipCoordinator,
    tooltip_formatter: Option<TooltipFormatter>,
    cache: ScaleCache,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(renderer: R, config: XyChartConfig) -> ChartResult<Self> {
        let tooltip = TooltipCoordinator::new(config.tooltip)?;
        let chart = XyChart::new(config)?;
        Ok(Self {
            renderer,
            chart,
            tooltip,
            tooltip_formatter: None,
            cache: ScaleCache::default(),
        })
    }

    #[must_use]
    pub fn chart(&self) -> &XyChart {
        &self.chart
    }

    #[must_use]
    pub fn config(&self) -> &XyChartConfig {
        self.chart.config()
    }

    /// Replaces the chart config; a rejected config leaves the chart and
    /// the tooltip coordinator untouched.
    pub fn set_config(&mut self, config: XyChartConfig) -> ChartResult<()> {
        config.validate()?;
        self.tooltip.set_config(config.tooltip)?;
        self.chart.set_config(config)?;
        self.cache.invalidate();
        Ok(())
    }

    pub fn set_elements(&mut self, elements: Vec<ChartElement>) {
        self.chart.set_elements(elements);
        self.cache.invalidate();
    }

    pub fn push_element(&mut self, element: ChartElement) {
        self.chart.push_element(element);
        self.cache.invalidate();
    }

    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        viewport.validate()?;
        if self.chart.config().viewport == viewport {
            return Ok(());
        }
        debug!(
            width = viewport.width,
            height = viewport.height,
            "resize chart"
        );
        self.chart.config_mut().viewport = viewport;
        self.cache.invalidate();
        Ok(())
    }

    /// Resizes to the source's measurement. Returns `true` when the size
    /// changed; unmeasured sources leave the chart untouched.
    pub fn sync_size(&mut self, source: &impl SizeSource) -> ChartResult<bool> {
        match source.measure() {
            Some(viewport) if viewport != self.chart.config().viewport => {
                self.resize(viewport)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn set_tooltip_formatter(
        &mut self,
        formatter: impl Fn(&SeriesId, ElementDatum<'_>) -> String + Send + Sync + 'static,
    ) {
        self.tooltip_formatter = Some(Arc::new(formatter));
    }

    pub fn clear_tooltip_formatter(&mut self) {
        self.tooltip_formatter = None;
    }

    /// Resolved scales, recomputed only when stale.
    pub fn scales(&mut self) -> ChartResult<&ChartScales> {
        let cached = self.cache.ensure(&self.chart, &mut self.tooltip)?;
        Ok(&cached.scales)
    }

    /// Incremented on every config, size or element change.
    #[must_use]
    pub fn scale_generation(&self) -> u64 {
        self.cache.generation
    }

    /// Number of times scales were actually recomputed.
    #[must_use]
    pub fn scale_resolutions(&self) -> u64 {
        self.cache.resolutions
    }

    /// Hover handling. Pointers outside the plot area count as leaving it.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<&TooltipState> {
        let inner = self.cache.ensure(&self.chart, &mut self.tooltip)?.scales.inner;
        let margin = self.chart.config().margin;
        let (local_x, local_y) = (x - margin.left, y - margin.top);
        let inside = (0.0..=inner.width).contains(&local_x) && (0.0..=inner.height).contains(&local_y);
        if inside {
            Ok(self.tooltip.on_pointer_move(local_x, local_y))
        } else {
            Ok(self.tooltip.on_pointer_leave())
        }
    }

    pub fn pointer_leave(&mut self) -> &TooltipState {
        self.tooltip.on_pointer_leave()
    }

    #[must_use]
    pub fn tooltip_state(&self) -> &TooltipState {
        self.tooltip.state()
    }

    #[must_use]
    pub fn tooltip_match(&self) -> Option<&TooltipMatch> {
        self.tooltip.current_match()
    }

    /// Builds the frame for the current state without rendering it.
    pub fn build_frame(&mut self) -> ChartResult<RenderFrame> {
        let cached = self.cache.ensure(&self.chart, &mut self.tooltip)?;
        let chart = &self.chart;
        let formatter = self.tooltip_formatter.as_ref();
        let text_for = |matched: &TooltipMatch| {
            let hits = cached
                .layout
                .hits
                .iter()
                .find(|hits| hits.id == matched.series_id)?;
            let datum = chart
                .elements()
                .get(hits.element)?
                .datum(matched.point.index)?;
            Some(match formatter {
                Some(formatter) => formatter(&matched.series_id, datum),
                None => default_tooltip_text(&matched.series_id, datum),
            })
        };
        let config = chart.config();
        let tooltip = render_tooltip(
            self.tooltip.state(),
            self.tooltip.config(),
            config.theme.tooltip,
            cached.scales.inner,
            text_for,
        );
        Ok(chart.compose_frame(&cached.layout, tooltip))
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_frame()?;
        trace!(primitives = frame.counts().total(), "render chart frame");
        self.renderer.render(&frame)
    }

    /// Renders the frame into an external cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
