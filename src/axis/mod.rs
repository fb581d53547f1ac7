//! Axis rendering: tick marks, tick labels, axis line and axis label.
//!
//! An axis group has its origin on the axis line. Horizontal axes run along
//! x at `y = 0`, vertical axes along y at `x = 0`; the chart container
//! translates the group to the plot edge the orientation names.

mod style;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{
    DataValue, InnerSize, ResolvedScale, Tick, TickFormatter, TickOptions, generate_ticks,
};
use crate::error::ChartResult;
use crate::render::{LinePrimitive, PrimitiveGroup, TextAnchor, TextBaseline, TextPrimitive};

pub use style::{
    AxisStyleOverride, AxisStyles, DEFAULT_AXIS_COLOR, DEFAULT_AXIS_LABEL_FONT_SIZE,
    DEFAULT_AXIS_STROKE_WIDTH, DEFAULT_TICK_LABEL_FONT_SIZE, DEFAULT_TICK_LENGTH,
    OrientedLabelStyles, ResolvedAxisStyle, TextStyle, TextStyleOverride, TickStyleOverride,
    resolve_axis_style,
};

pub const AXIS_CLASS: &str = "axis";
pub const AXIS_TICK_CLASS: &str = "axis-tick";
pub const AXIS_LABEL_CLASS: &str = "axis-label";

/// Gap between the end of a tick mark and its label.
pub const TICK_LABEL_PADDING: f64 = 4.0;
pub const DEFAULT_LABEL_OFFSET: f64 = 14.0;

/// Per-tick label style callback, receiving the tick value and its index.
pub type TickLabelProps = Arc<dyn Fn(&DataValue, usize) -> TextStyleOverride + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrientation {
    Top,
    Bottom,
    Left,
    Right,
}

impl AxisOrientation {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// `+1` when ticks point toward increasing pixel coordinates.
    #[must_use]
    pub fn outward_sign(self) -> f64 {
        match self {
            Self::Bottom | Self::Right => 1.0,
            Self::Top | Self::Left => -1.0,
        }
    }

    /// Plot-local position of the axis line origin.
    #[must_use]
    pub fn origin(self, inner: InnerSize) -> (f64, f64) {
        match self {
            Self::Top | Self::Left => (0.0, 0.0),
            Self::Bottom => (0.0, inner.height),
            Self::Right => (inner.width, 0.0),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    fn tick_label_anchor(self) -> (TextAnchor, TextBaseline) {
        match self {
            Self::Top => (TextAnchor::Middle, TextBaseline::Bottom),
            Self::Bottom => (TextAnchor::Middle, TextBaseline::Top),
            Self::Left => (TextAnchor::End, TextBaseline::Middle),
            Self::Right => (TextAnchor::Start, TextBaseline::Middle),
        }
    }
}

/// Non-style inputs of [`render_axis`].
#[derive(Clone)]
pub struct AxisLayout {
    pub orientation: AxisOrientation,
    /// Pixel range of the scale the ticks came from.
    pub range: (f64, f64),
    pub label: Option<String>,
    pub label_offset: f64,
    pub hide_axis_line: bool,
    pub hide_ticks: bool,
    pub hide_zero: bool,
    pub tick_label_props: Option<TickLabelProps>,
}

impl fmt::Debug for AxisLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisLayout")
            .field("orientation", &self.orientation)
            .field("range", &self.range)
            .field("label", &self.label)
            .field("label_offset", &self.label_offset)
            .field("hide_axis_line", &self.hide_axis_line)
            .field("hide_ticks", &self.hide_ticks)
            .field("hide_zero", &self.hide_zero)
            .field("tick_label_props", &self.tick_label_props.is_some())
            .finish()
    }
}

impl AxisLayout {
    #[must_use]
    pub fn new(orientation: AxisOrientation, range: (f64, f64)) -> Self {
        Self {
            orientation,
            range,
            label: None,
            label_offset: DEFAULT_LABEL_OFFSET,
            hide_axis_line: false,
            hide_ticks: false,
            hide_zero: false,
            tick_label_props: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_tick_label_props(
        mut self,
        props: impl Fn(&DataValue, usize) -> TextStyleOverride + Send + Sync + 'static,
    ) -> Self {
        self.tick_label_props = Some(Arc::new(props));
        self
    }
}

/// Turns ticks into an axis primitive group.
///
/// Each tick becomes an `axis-tick` child holding its mark and label; an
/// `axis-label` child is added when the layout carries a label. With no
/// ticks the axis line and label still render.
#[must_use]
pub fn render_axis(ticks: &[Tick], layout: &AxisLayout, style: &ResolvedAxisStyle) -> PrimitiveGroup {
    let orientation = layout.orientation;
    let sign = orientation.outward_sign();
    let mut group = PrimitiveGroup::new(AXIS_CLASS);

    let (lo, hi) = if layout.range.0 <= layout.range.1 {
        layout.range
    } else {
        (layout.range.1, layout.range.0)
    };
    if !layout.hide_axis_line {
        let line = if orientation.is_horizontal() {
            LinePrimitive::new(lo, 0.0, hi, 0.0, style.stroke_width, style.stroke)
        } else {
            LinePrimitive::new(0.0, lo, 0.0, hi, style.stroke_width, style.stroke)
        };
        group.push_line(line);
    }

    let tick_length = if layout.hide_ticks { 0.0 } else { style.tick_length };
    let label_distance = sign * (tick_length + TICK_LABEL_PADDING);
    let (natural_anchor, baseline) = orientation.tick_label_anchor();

    let visible = ticks
        .iter()
        .filter(|tick| !(layout.hide_zero && is_zero(&tick.value)));
    for (index, tick) in visible.enumerate() {
        let mut tick_group = PrimitiveGroup::new(AXIS_TICK_CLASS);
        let label_style = match &layout.tick_label_props {
            Some(props) => props(&tick.value, index).apply_to(style.tick_label),
            None => style.tick_label,
        };

        let (x1, y1, x2, y2, label_x, label_y) = if orientation.is_horizontal() {
            let p = tick.position;
            (p, 0.0, p, sign * tick_length, p, label_distance)
        } else {
            let p = tick.position;
            (0.0, p, sign * tick_length, p, label_distance, p)
        };
        if !layout.hide_ticks {
            tick_group.push_line(LinePrimitive::new(
                x1,
                y1,
                x2,
                y2,
                style.tick_stroke_width,
                style.tick_stroke,
            ));
        }
        tick_group.push_text(
            TextPrimitive::new(
                tick.label.clone(),
                label_x,
                label_y,
                label_style.font_size_px,
                label_style.color,
            )
            .with_anchor(label_style.anchor.unwrap_or(natural_anchor), baseline)
            .with_rotation(label_style.rotation_deg),
        );
        group.push_child(tick_group);
    }

    if let Some(label) = &layout.label {
        group.push_child(axis_label(label, layout, style, tick_length, lo, hi));
    }

    trace!(
        orientation = orientation.as_str(),
        ticks = ticks.len(),
        labelled = layout.label.is_some(),
        "rendered axis"
    );
    group
}

fn axis_label(
    label: &str,
    layout: &AxisLayout,
    style: &ResolvedAxisStyle,
    tick_length: f64,
    lo: f64,
    hi: f64,
) -> PrimitiveGroup {
    let orientation = layout.orientation;
    let sign = orientation.outward_sign();
    let mid = (lo + hi) * 0.5;
    let distance = sign
        * (tick_length + TICK_LABEL_PADDING + style.tick_label.font_size_px + layout.label_offset);

    let text = TextPrimitive::new(label, 0.0, 0.0, style.label.font_size_px, style.label.color);
    let text = if orientation.is_horizontal() {
        let baseline = match orientation {
            AxisOrientation::Top => TextBaseline::Bottom,
            _ => TextBaseline::Top,
        };
        TextPrimitive { x: mid, y: distance, ..text }
            .with_anchor(style.label.anchor.unwrap_or(TextAnchor::Middle), baseline)
            .with_rotation(style.label.rotation_deg)
    } else {
        // Vertical labels read bottom-to-top on the left, top-to-bottom on the right.
        let rotation = if style.label.rotation_deg != 0.0 {
            style.label.rotation_deg
        } else if orientation == AxisOrientation::Left {
            -90.0
        } else {
            90.0
        };
        TextPrimitive { x: distance, y: mid, ..text }
            .with_anchor(
                style.label.anchor.unwrap_or(TextAnchor::Middle),
                TextBaseline::Middle,
            )
            .with_rotation(rotation)
    };

    let mut group = PrimitiveGroup::new(AXIS_LABEL_CLASS);
    group.push_text(text);
    group
}

/// Declarative axis element as placed in a chart.
#[derive(Clone, Default)]
pub struct AxisProps {
    /// Falls back to the element's default orientation when unset.
    pub orientation: Option<AxisOrientation>,
    pub label: Option<String>,
    pub label_offset: Option<f64>,
    pub tick_format: Option<TickFormatter>,
    pub num_ticks: Option<usize>,
    pub tick_values: Option<Vec<DataValue>>,
    pub tick_label_props: Option<TickLabelProps>,
    pub hide_zero: bool,
    pub hide_ticks: bool,
    pub hide_axis_line: bool,
    /// Highest-priority style level, above the chart theme.
    pub styles: AxisStyles,
}

impl fmt::Debug for AxisProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisProps")
            .field("orientation", &self.orientation)
            .field("label", &self.label)
            .field("label_offset", &self.label_offset)
            .field("tick_format", &self.tick_format.is_some())
            .field("num_ticks", &self.num_ticks)
            .field("tick_values", &self.tick_values)
            .field("tick_label_props", &self.tick_label_props.is_some())
            .field("hide_zero", &self.hide_zero)
            .field("hide_ticks", &self.hide_ticks)
            .field("hide_axis_line", &self.hide_axis_line)
            .field("styles", &self.styles)
            .finish()
    }
}

impl AxisProps {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: AxisOrientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_label_offset(mut self, offset: f64) -> Self {
        self.label_offset = Some(offset);
        self
    }

    #[must_use]
    pub fn with_tick_format(
        mut self,
        format: impl Fn(&DataValue, usize) -> String + Send + Sync + 'static,
    ) -> Self {
        self.tick_format = Some(Arc::new(format));
        self
    }

    #[must_use]
    pub fn with_num_ticks(mut self, count: usize) -> Self {
        self.num_ticks = Some(count);
        self
    }

    #[must_use]
    pub fn with_tick_values(mut self, values: Vec<DataValue>) -> Self {
        self.tick_values = Some(values);
        self
    }

    #[must_use]
    pub fn with_tick_label_props(
        mut self,
        props: impl Fn(&DataValue, usize) -> TextStyleOverride + Send + Sync + 'static,
    ) -> Self {
        self.tick_label_props = Some(Arc::new(props));
        self
    }

    #[must_use]
    pub fn with_hide_zero(mut self, hide: bool) -> Self {
        self.hide_zero = hide;
        self
    }

    #[must_use]
    pub fn with_hide_ticks(mut self, hide: bool) -> Self {
        self.hide_ticks = hide;
        self
    }

    #[must_use]
    pub fn with_hide_axis_line(mut self, hide: bool) -> Self {
        self.hide_axis_line = hide;
        self
    }

    #[must_use]
    pub fn with_styles(mut self, styles: AxisStyles) -> Self {
        self.styles = styles;
        self
    }

    #[must_use]
    pub fn tick_options(&self) -> TickOptions {
        TickOptions {
            count: self.num_ticks,
            formatter: self.tick_format.clone(),
            values: self.tick_values.clone(),
        }
    }

    #[must_use]
    pub fn layout(&self, orientation: AxisOrientation, range: (f64, f64)) -> AxisLayout {
        AxisLayout {
            orientation,
            range,
            label: self.label.clone(),
            label_offset: self.label_offset.unwrap_or(DEFAULT_LABEL_OFFSET),
            hide_axis_line: self.hide_axis_line,
            hide_ticks: self.hide_ticks,
            hide_zero: self.hide_zero,
            tick_label_props: self.tick_label_props.clone(),
        }
    }

    /// Generates ticks for `scale`, resolves the style cascade against
    /// `theme` and renders the axis.
    pub fn render(
        &self,
        scale: &ResolvedScale,
        default_orientation: AxisOrientation,
        theme: &AxisStyles,
    ) -> ChartResult<PrimitiveGroup> {
        let orientation = self.orientation.unwrap_or(default_orientation);
        let style = resolve_axis_style(orientation, &self.styles, theme)?;
        let ticks = self.visible_ticks(scale);
        Ok(render_axis(&ticks, &self.layout(orientation, scale.range()), &style))
    }

    /// Ticks left after `hide_zero`, labelled with their index among the
    /// visible ticks so `tick_format` and `tick_label_props` agree.
    fn visible_ticks(&self, scale: &ResolvedScale) -> Vec<Tick> {
        let options = self.tick_options();
        if !self.hide_zero {
            return generate_ticks(scale, &options);
        }

        let unformatted = TickOptions {
            formatter: None,
            ..options.clone()
        };
        let mut ticks: Vec<Tick> = generate_ticks(scale, &unformatted)
            .into_iter()
            .filter(|tick| !is_zero(&tick.value))
            .collect();
        if let Some(formatter) = &options.formatter {
            for (index, tick) in ticks.iter_mut().enumerate() {
                tick.label = formatter(&tick.value, index);
            }
        }
        ticks
    }
}

fn is_zero(value: &DataValue) -> bool {
    value.as_f64() == Some(0.0)
}
