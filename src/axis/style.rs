use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, TextAnchor};

use super::AxisOrientation;

pub const DEFAULT_AXIS_COLOR: Color = Color::rgb(0.463, 0.463, 0.463);
pub const DEFAULT_AXIS_STROKE_WIDTH: f64 = 1.0;
pub const DEFAULT_TICK_LENGTH: f64 = 8.0;
pub const DEFAULT_TICK_LABEL_FONT_SIZE: f64 = 10.0;
pub const DEFAULT_AXIS_LABEL_FONT_SIZE: f64 = 12.0;

/// Fully specified text style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub color: Color,
    pub font_size_px: f64,
    /// `None` keeps the orientation's natural anchor.
    #[serde(default)]
    pub anchor: Option<TextAnchor>,
    #[serde(default)]
    pub rotation_deg: f64,
}

impl TextStyle {
    #[must_use]
    pub const fn new(color: Color, font_size_px: f64) -> Self {
        Self {
            color,
            font_size_px,
            anchor: None,
            rotation_deg: 0.0,
        }
    }

    fn validate(self, what: &str) -> ChartResult<()> {
        self.color.validate()?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::config(format!(
                "{what} font size must be finite and > 0"
            )));
        }
        if !self.rotation_deg.is_finite() {
            return Err(ChartError::config(format!(
                "{what} rotation must be finite"
            )));
        }
        Ok(())
    }
}

/// Partial text style; unset fields fall through to the next cascade level.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyleOverride {
    pub color: Option<Color>,
    pub font_size_px: Option<f64>,
    pub anchor: Option<TextAnchor>,
    pub rotation_deg: Option<f64>,
}

impl TextStyleOverride {
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_font_size(mut self, font_size_px: f64) -> Self {
        self.font_size_px = Some(font_size_px);
        self
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = Some(rotation_deg);
        self
    }

    /// Fields set on `self` win over `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            color: self.color.or(fallback.color),
            font_size_px: self.font_size_px.or(fallback.font_size_px),
            anchor: self.anchor.or(fallback.anchor),
            rotation_deg: self.rotation_deg.or(fallback.rotation_deg),
        }
    }

    #[must_use]
    pub fn apply_to(self, base: TextStyle) -> TextStyle {
        TextStyle {
            color: self.color.unwrap_or(base.color),
            font_size_px: self.font_size_px.unwrap_or(base.font_size_px),
            anchor: self.anchor.or(base.anchor),
            rotation_deg: self.rotation_deg.unwrap_or(base.rotation_deg),
        }
    }
}

/// Axis line and axis label styling.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisStyleOverride {
    pub stroke: Option<Color>,
    pub stroke_width: Option<f64>,
    pub label: TextStyleOverride,
}

impl AxisStyleOverride {
    #[must_use]
    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = Some(stroke);
        self
    }

    #[must_use]
    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = Some(stroke_width);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: TextStyleOverride) -> Self {
        self.label = label;
        self
    }
}

/// Tick label styles keyed by the orientation of the axis drawing them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientedLabelStyles {
    pub top: TextStyleOverride,
    pub bottom: TextStyleOverride,
    pub left: TextStyleOverride,
    pub right: TextStyleOverride,
}

impl OrientedLabelStyles {
    #[must_use]
    pub fn get(&self, orientation: AxisOrientation) -> TextStyleOverride {
        match orientation {
            AxisOrientation::Top => self.top,
            AxisOrientation::Bottom => self.bottom,
            AxisOrientation::Left => self.left,
            AxisOrientation::Right => self.right,
        }
    }

    #[must_use]
    pub fn with(mut self, orientation: AxisOrientation, style: TextStyleOverride) -> Self {
        match orientation {
            AxisOrientation::Top => self.top = style,
            AxisOrientation::Bottom => self.bottom = style,
            AxisOrientation::Left => self.left = style,
            AxisOrientation::Right => self.right = style,
        }
        self
    }
}

/// Tick mark and tick label styling.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TickStyleOverride {
    pub stroke: Option<Color>,
    pub stroke_width: Option<f64>,
    pub tick_length: Option<f64>,
    pub label: OrientedLabelStyles,
}

impl TickStyleOverride {
    #[must_use]
    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = Some(stroke);
        self
    }

    #[must_use]
    pub fn with_tick_length(mut self, tick_length: f64) -> Self {
        self.tick_length = Some(tick_length);
        self
    }

    #[must_use]
    pub fn with_label(mut self, orientation: AxisOrientation, style: TextStyleOverride) -> Self {
        self.label = self.label.with(orientation, style);
        self
    }
}

/// One cascade level: axis styles plus tick styles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisStyles {
    pub axis: AxisStyleOverride,
    pub tick: TickStyleOverride,
}

/// Axis style with every field decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedAxisStyle {
    pub stroke: Color,
    pub stroke_width: f64,
    pub label: TextStyle,
    pub tick_stroke: Color,
    pub tick_stroke_width: f64,
    pub tick_length: f64,
    /// Tick label style for the orientation the style was resolved for.
    pub tick_label: TextStyle,
}

impl Default for ResolvedAxisStyle {
    fn default() -> Self {
        Self {
            stroke: DEFAULT_AXIS_COLOR,
            stroke_width: DEFAULT_AXIS_STROKE_WIDTH,
            label: TextStyle::new(DEFAULT_AXIS_COLOR, DEFAULT_AXIS_LABEL_FONT_SIZE),
            tick_stroke: DEFAULT_AXIS_COLOR,
            tick_stroke_width: DEFAULT_AXIS_STROKE_WIDTH,
            tick_length: DEFAULT_TICK_LENGTH,
            tick_label: TextStyle::new(DEFAULT_AXIS_COLOR, DEFAULT_TICK_LABEL_FONT_SIZE),
        }
    }
}

impl ResolvedAxisStyle {
    pub fn validate(&self) -> ChartResult<()> {
        self.stroke.validate()?;
        self.tick_stroke.validate()?;
        for (what, width) in [
            ("axis stroke width", self.stroke_width),
            ("tick stroke width", self.tick_stroke_width),
            ("tick length", self.tick_length),
        ] {
            if !width.is_finite() || width < 0.0 {
                return Err(ChartError::config(format!(
                    "{what} must be finite and >= 0, got {width}"
                )));
            }
        }
        self.label.validate("axis label")?;
        self.tick_label.validate("tick label")
    }
}

/// Merges style levels field by field: `explicit`, then `theme`, then the
/// built-in defaults.
pub fn resolve_axis_style(
    orientation: AxisOrientation,
    explicit: &AxisStyles,
    theme: &AxisStyles,
) -> ChartResult<ResolvedAxisStyle> {
    let defaults = ResolvedAxisStyle::default();
    let axis_label = explicit.axis.label.or(theme.axis.label);
    let tick_label = explicit
        .tick
        .label
        .get(orientation)
        .or(theme.tick.label.get(orientation));

    let resolved = ResolvedAxisStyle {
        stroke: explicit
            .axis
            .stroke
            .or(theme.axis.stroke)
            .unwrap_or(defaults.stroke),
        stroke_width: explicit
            .axis
            .stroke_width
            .or(theme.axis.stroke_width)
            .unwrap_or(defaults.stroke_width),
        label: axis_label.apply_to(defaults.label),
        tick_stroke: explicit
            .tick
            .stroke
            .or(theme.tick.stroke)
            .unwrap_or(defaults.tick_stroke),
        tick_stroke_width: explicit
            .tick
            .stroke_width
            .or(theme.tick.stroke_width)
            .unwrap_or(defaults.tick_stroke_width),
        tick_length: explicit
            .tick
            .tick_length
            .or(theme.tick.tick_length)
            .unwrap_or(defaults.tick_length),
        tick_label: tick_label.apply_to(defaults.tick_label),
    };
    resolved.validate()?;
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::{
        AxisStyleOverride, AxisStyles, DEFAULT_TICK_LENGTH, TextStyleOverride, TickStyleOverride,
        resolve_axis_style,
    };
    use crate::axis::AxisOrientation;
    use crate::render::Color;

    #[test]
    fn explicit_wins_over_theme_per_field() {
        let pink = Color::rgb(1.0, 0.75, 0.8);
        let purple = Color::rgb(0.5, 0.0, 0.5);
        let theme = AxisStyles {
            axis: AxisStyleOverride::default()
                .with_stroke(pink)
                .with_stroke_width(2.0),
            tick: TickStyleOverride::default().with_stroke(purple),
        };
        let explicit = AxisStyles {
            axis: AxisStyleOverride::default().with_stroke_width(3.0),
            ..AxisStyles::default()
        };

        let style = resolve_axis_style(AxisOrientation::Left, &explicit, &theme)
            .expect("resolved style");
        assert_eq!(style.stroke, pink);
        assert!((style.stroke_width - 3.0).abs() <= 1e-12);
        assert_eq!(style.tick_stroke, purple);
        assert!((style.tick_length - DEFAULT_TICK_LENGTH).abs() <= 1e-12);
    }

    #[test]
    fn tick_label_style_is_picked_by_orientation() {
        let skyblue = Color::rgb(0.53, 0.81, 0.92);
        let theme = AxisStyles {
            tick: TickStyleOverride::default().with_label(
                AxisOrientation::Right,
                TextStyleOverride::default().with_color(skyblue),
            ),
            ..AxisStyles::default()
        };
        let right = resolve_axis_style(AxisOrientation::Right, &AxisStyles::default(), &theme)
            .expect("right style");
        let left = resolve_axis_style(AxisOrientation::Left, &AxisStyles::default(), &theme)
            .expect("left style");
        assert_eq!(right.tick_label.color, skyblue);
        assert_ne!(left.tick_label.color, skyblue);
    }

    #[test]
    fn negative_tick_length_is_rejected() {
        let explicit = AxisStyles {
            tick: TickStyleOverride::default().with_tick_length(-1.0),
            ..AxisStyles::default()
        };
        assert!(
            resolve_axis_style(AxisOrientation::Bottom, &explicit, &AxisStyles::default()).is_err()
        );
    }
}
