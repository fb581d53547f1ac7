use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::DataValue;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Space reserved around the plot area for axes and labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 64.0,
            right: 64.0,
            bottom: 64.0,
            left: 64.0,
        }
    }
}

impl Margin {
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Plot-area size left after subtracting the margin from the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InnerSize {
    pub width: f64,
    pub height: f64,
}

impl InnerSize {
    pub fn from_viewport(viewport: Viewport, margin: Margin) -> ChartResult<Self> {
        viewport.validate()?;
        let width = f64::from(viewport.width) - margin.left - margin.right;
        let height = f64::from(viewport.height) - margin.top - margin.bottom;
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ChartError::config(format!(
                "margin leaves no plot area: inner size {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }
}

/// Caller-owned datum. `y == None` marks a missing value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: DataValue,
    #[serde(default)]
    pub y: Option<DataValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, String>,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: impl Into<DataValue>, y: impl Into<DataValue>) -> Self {
        Self {
            x: x.into(),
            y: Some(y.into()),
            label: None,
            metadata: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn missing(x: impl Into<DataValue>) -> Self {
        Self {
            x: x.into(),
            y: None,
            label: None,
            metadata: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Identifier of a series (or network) registered with a chart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(pub String);

impl SeriesId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SeriesId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SeriesId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for SeriesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Datum mapped to plot-local pixel coordinates.
///
/// `index` points back into the caller's data slice; the projection never
/// owns the source datum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub index: usize,
}

impl ProjectedPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64, index: usize) -> Self {
        Self { x, y, index }
    }

    #[must_use]
    pub fn source<'a>(&self, data: &'a [DataPoint]) -> Option<&'a DataPoint> {
        data.get(self.index)
    }
}
