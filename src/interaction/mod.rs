use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{ProjectedPoint, SeriesId};
use crate::error::{ChartError, ChartResult};

/// How pointer-to-point distance is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Euclidean,
    /// Horizontal distance only; suits time series with a shared tooltip.
    XOnly,
}

impl DistanceMetric {
    #[must_use]
    pub fn distance(self, pointer: (f64, f64), point: &ProjectedPoint) -> f64 {
        let dx = point.x - pointer.0;
        match self {
            Self::Euclidean => dx.hypot(point.y - pointer.1),
            Self::XOnly => dx.abs(),
        }
    }
}

/// Tooltip tuning shared by the coordinator and the chart container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    pub metric: DistanceMetric,
    /// Matches farther than this many pixels are ignored.
    pub max_distance: Option<f64>,
    pub show_crosshair: bool,
    /// Label every series' nearest point instead of only the overall nearest.
    pub shared: bool,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            metric: DistanceMetric::Euclidean,
            max_distance: None,
            show_crosshair: true,
            shared: false,
        }
    }
}

impl TooltipConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if let Some(max) = self.max_distance {
            if !max.is_finite() || max < 0.0 {
                return Err(ChartError::Config(format!(
                    "tooltip max distance must be finite and >= 0, got {max}"
                )));
            }
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipMatch {
    pub point: ProjectedPoint,
    pub distance: f64,
    pub series_id: SeriesId,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum TooltipState {
    #[default]
    Idle,
    Hovering {
        pointer: (f64, f64),
        /// Overall nearest point, `None` when nothing is within range.
        nearest: Option<TooltipMatch>,
        /// Nearest point of each series, in registration order.
        per_series: SmallVec<[TooltipMatch; 4]>,
    },
}

impl TooltipState {
    #[must_use]
    pub fn is_hovering(&self) -> bool {
        matches!(self, Self::Hovering { .. })
    }
}

/// Pointer-driven tooltip state machine.
///
/// Holds projected points per series and recomputes the nearest match on
/// every pointer move. There is no debouncing; each event is applied in
/// order.
#[derive(Debug, Clone, Default)]
pub struct TooltipCoordinator {
    config: TooltipConfig,
    series: IndexMap<SeriesId, Vec<ProjectedPoint>>,
    state: TooltipState,
}

impl TooltipCoordinator {
    pub fn new(config: TooltipConfig) -> ChartResult<Self> {
        Ok(Self {
            config: config.validate()?,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn config(&self) -> TooltipConfig {
        self.config
    }

    pub fn set_config(&mut self, config: TooltipConfig) -> ChartResult<()> {
        self.config = config.validate()?;
        self.refresh();
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    #[must_use]
    pub fn current_match(&self) -> Option<&TooltipMatch> {
        match &self.state {
            TooltipState::Hovering { nearest, .. } => nearest.as_ref(),
            TooltipState::Idle => None,
        }
    }

    #[must_use]
    pub fn series_matches(&self) -> &[TooltipMatch] {
        match &self.state {
            TooltipState::Hovering { per_series, .. } => per_series,
            TooltipState::Idle => &[],
        }
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Registers or replaces a series. Replacing keeps its original
    /// registration position.
    pub fn register_series(&mut self, id: impl Into<SeriesId>, points: Vec<ProjectedPoint>) {
        let id = id.into();
        trace!(series = %id, points = points.len(), "register tooltip series");
        self.series.insert(id, points);
        self.refresh();
    }

    pub fn unregister_series(&mut self, id: &SeriesId) -> bool {
        let removed = self.series.shift_remove(id).is_some();
        if removed {
            self.refresh();
        }
        removed
    }

    pub fn clear_series(&mut self) {
        self.series.clear();
        self.refresh();
    }

    /// Enters or stays in `Hovering` and recomputes matches.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> &TooltipState {
        if !x.is_finite() || !y.is_finite() {
            return &self.state;
        }
        let per_series = self.nearest_per_series((x, y));
        let nearest = per_series
            .iter()
            .min_by_key(|candidate| OrderedFloat(candidate.distance))
            .cloned();
        trace!(
            x,
            y,
            matched = nearest.as_ref().map(|m| m.series_id.as_str()),
            "tooltip pointer move"
        );
        self.state = TooltipState::Hovering {
            pointer: (x, y),
            nearest,
            per_series,
        };
        &self.state
    }

    /// Returns to `Idle` and drops any match, whatever the current state.
    pub fn on_pointer_leave(&mut self) -> &TooltipState {
        if self.state.is_hovering() {
            trace!("tooltip pointer leave");
        }
        self.state = TooltipState::Idle;
        &self.state
    }

    fn refresh(&mut self) {
        if let TooltipState::Hovering { pointer, .. } = self.state {
            self.on_pointer_move(pointer.0, pointer.1);
        }
    }

    fn nearest_per_series(&self, pointer: (f64, f64)) -> SmallVec<[TooltipMatch; 4]> {
        let metric = self.config.metric;
        let max_distance = self.config.max_distance;
        self.series
            .iter()
            .filter_map(|(id, points)| {
                let (distance, point) = points
                    .iter()
                    .map(|point| (OrderedFloat(metric.distance(pointer, point)), point))
                    .min_by_key(|(distance, _)| *distance)?;
                if max_distance.is_some_and(|max| distance.0 > max) {
                    return None;
                }
                Some(TooltipMatch {
                    point: *point,
                    distance: distance.0,
                    series_id: id.clone(),
                })
            })
            .collect()
    }
}
