use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> ChartResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => digits.to_owned(),
            _ => {
                return Err(ChartError::InvalidData(format!(
                    "color `{hex}` must have 3, 6 or 8 hex digits"
                )));
            }
        };
        let channel = |offset: usize| -> ChartResult<f64> {
            let byte = expanded
                .get(offset..offset + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| ChartError::InvalidData(format!("invalid hex color `{hex}`")))?;
            Ok(f64::from(byte) / 255.0)
        };
        let alpha = if expanded.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    /// `#rrggbb` form, ignoring alpha.
    #[must_use]
    pub fn to_hex(self) -> String {
        let byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            byte(self.red),
            byte(self.green),
            byte(self.blue)
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Stroke pattern used by line primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStrokeStyle {
    #[must_use]
    pub fn dash_pattern(self, stroke_width: f64) -> Option<[f64; 2]> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some([stroke_width * 4.0, stroke_width * 3.0]),
            Self::Dotted => Some([stroke_width, stroke_width * 2.0]),
        }
    }
}

fn validate_finite(values: &[f64], what: &str) -> ChartResult<()> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!(
            "{what} coordinates must be finite"
        )))
    }
}

fn validate_stroke_width(stroke_width: f64) -> ChartResult<()> {
    if !stroke_width.is_finite() || stroke_width < 0.0 {
        return Err(ChartError::InvalidData(
            "stroke width must be finite and >= 0".to_owned(),
        ));
    }
    Ok(())
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub stroke_style: LineStrokeStyle,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            stroke_style: LineStrokeStyle::Solid,
        }
    }

    #[must_use]
    pub const fn with_stroke_style(mut self, stroke_style: LineStrokeStyle) -> Self {
        self.stroke_style = stroke_style;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        validate_finite(&[self.x1, self.y1, self.x2, self.y2], "line")?;
        validate_stroke_width(self.stroke_width)?;
        self.color.validate()
    }
}

/// Filled (and optionally bordered) axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
    pub border_width: f64,
    pub border_color: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
            border_width: 0.0,
            border_color: Color::TRANSPARENT,
        }
    }

    #[must_use]
    pub const fn with_border(mut self, border_width: f64, border_color: Color) -> Self {
        self.border_width = border_width;
        self.border_color = border_color;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        validate_finite(&[self.x, self.y, self.width, self.height], "rect")?;
        if self.width < 0.0 || self.height < 0.0 {
            return Err(ChartError::InvalidData(
                "rect size must be >= 0".to_owned(),
            ));
        }
        validate_stroke_width(self.border_width)?;
        self.fill_color.validate()?;
        self.border_color.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill_color: Color,
    pub stroke_width: f64,
    pub stroke_color: Color,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn new(cx: f64, cy: f64, radius: f64, fill_color: Color) -> Self {
        Self {
            cx,
            cy,
            radius,
            fill_color,
            stroke_width: 0.0,
            stroke_color: Color::TRANSPARENT,
        }
    }

    #[must_use]
    pub const fn with_stroke(mut self, stroke_width: f64, stroke_color: Color) -> Self {
        self.stroke_width = stroke_width;
        self.stroke_color = stroke_color;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        validate_finite(&[self.cx, self.cy, self.radius], "circle")?;
        if self.radius < 0.0 {
            return Err(ChartError::InvalidData(
                "circle radius must be >= 0".to_owned(),
            ));
        }
        validate_stroke_width(self.stroke_width)?;
        self.fill_color.validate()?;
        self.stroke_color.validate()
    }
}

/// Polyline or polygon through `points`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub points: Vec<(f64, f64)>,
    pub closed: bool,
    pub stroke_width: f64,
    pub stroke_color: Color,
    pub fill_color: Option<Color>,
}

impl PathPrimitive {
    #[must_use]
    pub fn polyline(points: Vec<(f64, f64)>, stroke_width: f64, stroke_color: Color) -> Self {
        Self {
            points,
            closed: false,
            stroke_width,
            stroke_color,
            fill_color: None,
        }
    }

    #[must_use]
    pub fn polygon(points: Vec<(f64, f64)>, fill_color: Color) -> Self {
        Self {
            points,
            closed: true,
            stroke_width: 0.0,
            stroke_color: Color::TRANSPARENT,
            fill_color: Some(fill_color),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.points.is_empty() {
            return Err(ChartError::InvalidData(
                "path primitive must have at least one point".to_owned(),
            ));
        }
        for (x, y) in &self.points {
            validate_finite(&[*x, *y], "path")?;
        }
        validate_stroke_width(self.stroke_width)?;
        self.stroke_color.validate()?;
        if let Some(fill) = self.fill_color {
            fill.validate()?;
        }
        Ok(())
    }
}

/// Horizontal anchoring of text relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

/// Vertical anchoring of text relative to `TextPrimitive::y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBaseline {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub anchor: TextAnchor,
    pub baseline: TextBaseline,
    /// Clockwise rotation around `(x, y)` in degrees.
    pub rotation_deg: f64,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(text: impl Into<String>, x: f64, y: f64, font_size_px: f64, color: Color) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Middle,
            rotation_deg: 0.0,
        }
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: TextAnchor, baseline: TextBaseline) -> Self {
        self.anchor = anchor;
        self.baseline = baseline;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_finite(&[self.x, self.y, self.rotation_deg], "text")?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn hex_colors_round_trip_through_rgb_channels() {
        let color = Color::from_hex("#ff8000").expect("hex color");
        assert_eq!(color.to_hex(), "#ff8000");
        assert_eq!(Color::from_hex("#fff").expect("short hex"), Color::WHITE);
        assert!(Color::from_hex("#12").is_err());
    }
}
