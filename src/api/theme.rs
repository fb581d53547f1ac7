use serde::{Deserialize, Serialize};

use crate::axis::{AxisOrientation, AxisStyles};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Chart-wide visual defaults. Element-level styles override these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: Color,
    /// Series colors, assigned by series position and cycled.
    pub palette: Vec<Color>,
    pub x_axis: AxisStyles,
    pub y_axis: AxisStyles,
    pub tooltip: TooltipTheme,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            palette: default_palette(),
            x_axis: AxisStyles::default(),
            y_axis: AxisStyles::default(),
            tooltip: TooltipTheme::default(),
        }
    }
}

fn default_palette() -> Vec<Color> {
    vec![
        Color::rgb(0.0, 0.592, 0.655),
        Color::rgb(0.906, 0.298, 0.235),
        Color::rgb(0.557, 0.267, 0.678),
        Color::rgb(0.953, 0.612, 0.071),
        Color::rgb(0.153, 0.682, 0.376),
        Color::rgb(0.204, 0.286, 0.369),
    ]
}

impl Theme {
    #[must_use]
    pub fn with_x_axis(mut self, styles: AxisStyles) -> Self {
        self.x_axis = styles;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, styles: AxisStyles) -> Self {
        self.y_axis = styles;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    /// Theme styles for an axis drawn along `orientation`.
    #[must_use]
    pub fn axis_styles(&self, orientation: AxisOrientation) -> &AxisStyles {
        if orientation.is_horizontal() {
            &self.x_axis
        } else {
            &self.y_axis
        }
    }

    #[must_use]
    pub fn series_color(&self, position: usize) -> Color {
        if self.palette.is_empty() {
            return Color::BLACK;
        }
        self.palette[position % self.palette.len()]
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.background.validate()?;
        for color in &self.palette {
            color.validate()?;
        }
        self.tooltip.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipTheme {
    pub crosshair: Color,
    pub highlight_radius: f64,
    pub text: Color,
    pub font_size_px: f64,
}

impl Default for TooltipTheme {
    fn default() -> Self {
        Self {
            crosshair: Color::rgba(0.0, 0.0, 0.0, 0.4),
            highlight_radius: 4.0,
            text: Color::rgb(0.1, 0.1, 0.1),
            font_size_px: 12.0,
        }
    }
}

impl TooltipTheme {
    fn validate(self) -> ChartResult<()> {
        self.crosshair.validate()?;
        self.text.validate()?;
        if !self.highlight_radius.is_finite() || self.highlight_radius < 0.0 {
            return Err(ChartError::Config(
                "tooltip highlight radius must be finite and >= 0".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::Config(
                "tooltip font size must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}
