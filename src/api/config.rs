use serde::{Deserialize, Serialize};

use crate::core::{BandPadding, Margin, ScaleConfig, ScaleDomain, ScaleKind, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::TooltipConfig;

use super::Theme;

/// Scale description without a pixel range; the chart derives the range
/// from its inner size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleSpec {
    #[serde(rename = "type")]
    pub kind: ScaleKind,
    /// Derived from series data when unset.
    #[serde(default)]
    pub domain: Option<ScaleDomain>,
    #[serde(default)]
    pub padding: BandPadding,
    #[serde(default)]
    pub nice: bool,
    #[serde(default)]
    pub clamp: bool,
    #[serde(default = "default_log_base")]
    pub log_base: f64,
    /// Extend a derived continuous domain to include zero.
    #[serde(default)]
    pub include_zero: bool,
}

fn default_log_base() -> f64 {
    10.0
}

impl ScaleSpec {
    #[must_use]
    pub fn new(kind: ScaleKind) -> Self {
        Self {
            kind,
            domain: None,
            padding: BandPadding::default(),
            nice: false,
            clamp: false,
            log_base: default_log_base(),
            include_zero: false,
        }
    }

    #[must_use]
    pub fn linear() -> Self {
        Self::new(ScaleKind::Linear)
    }

    #[must_use]
    pub fn band() -> Self {
        Self::new(ScaleKind::Band)
    }

    #[must_use]
    pub fn with_domain(mut self, domain: ScaleDomain) -> Self {
        self.domain = Some(domain);
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: BandPadding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    #[must_use]
    pub fn with_include_zero(mut self, include_zero: bool) -> Self {
        self.include_zero = include_zero;
        self
    }

    /// Full scale config for `range`, using `domain` when the spec has none.
    #[must_use]
    pub fn to_config(&self, domain: ScaleDomain, range: (f64, f64)) -> ScaleConfig {
        ScaleConfig {
            kind: self.kind,
            domain: Some(self.domain.clone().unwrap_or(domain)),
            range: Some(range),
            padding: self.padding,
            nice: self.nice,
            clamp: self.clamp,
            log_base: self.log_base,
        }
    }
}

/// Serializable chart setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XyChartConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub margin: Margin,
    /// Components needing an unset scale render nothing.
    #[serde(default)]
    pub x_scale: Option<ScaleSpec>,
    #[serde(default)]
    pub y_scale: Option<ScaleSpec>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub tooltip: TooltipConfig,
}

impl XyChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            margin: Margin::default(),
            x_scale: None,
            y_scale: None,
            theme: Theme::default(),
            tooltip: TooltipConfig::default(),
        }
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_x_scale(mut self, spec: ScaleSpec) -> Self {
        self.x_scale = Some(spec);
        self
    }

    #[must_use]
    pub fn with_y_scale(mut self, spec: ScaleSpec) -> Self {
        self.y_scale = Some(spec);
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: TooltipConfig) -> Self {
        self.tooltip = tooltip;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.viewport.validate()?;
        for (side, value) in [
            ("top", self.margin.top),
            ("right", self.margin.right),
            ("bottom", self.margin.bottom),
            ("left", self.margin.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::Config(format!(
                    "margin {side} must be finite and >= 0, got {value}"
                )));
            }
        }
        self.theme.validate()?;
        self.tooltip.validate()?;
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::Config(format!("failed to parse chart config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart config json: {e}"))
        })
    }
}
