#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;
use tracing::warn;

use crate::core::{DataPoint, ProjectedPoint, ResolvedScale};
use crate::error::ChartError;

/// Below this size the rayon fan-out costs more than it saves.
#[cfg(feature = "parallel-projection")]
const PARALLEL_PROJECTION_MIN_POINTS: usize = 4_096;

/// Datum that could not be placed under the current scales.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedPoint {
    pub index: usize,
    /// Always a [`ChartError::DataPointSkipped`].
    pub error: ChartError,
}

/// Result of projecting one series through its x/y scales.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Projection {
    pub points: Vec<ProjectedPoint>,
    /// Indices of data with a missing y value.
    pub missing: Vec<usize>,
    pub skipped: Vec<SkippedPoint>,
}

impl Projection {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Per-datum projection outcome, in data order.
#[derive(Debug, Clone, PartialEq)]
pub enum PointOutcome {
    Projected(ProjectedPoint),
    Missing,
    Skipped(ChartError),
}

/// Maps one datum to plot-local pixels. Marks are centred in their band.
#[must_use]
pub fn project_point(
    index: usize,
    point: &DataPoint,
    x_scale: &ResolvedScale,
    y_scale: &ResolvedScale,
) -> PointOutcome {
    let Some(y_value) = point.y.as_ref() else {
        return PointOutcome::Missing;
    };
    let Some(x) = x_scale.map_center(&point.x) else {
        return PointOutcome::Skipped(ChartError::skipped(
            index,
            format!("x value `{}` is outside the {:?} x domain", point.x, x_scale.kind()),
        ));
    };
    let Some(y) = y_scale.map_center(y_value) else {
        return PointOutcome::Skipped(ChartError::skipped(
            index,
            format!("y value `{y_value}` is outside the {:?} y domain", y_scale.kind()),
        ));
    };
    PointOutcome::Projected(ProjectedPoint::new(x, y, index))
}

/// Projects every datum of a series, in data order.
#[must_use]
pub fn project_outcomes(
    data: &[DataPoint],
    x_scale: &ResolvedScale,
    y_scale: &ResolvedScale,
) -> Vec<PointOutcome> {
    #[cfg(feature = "parallel-projection")]
    {
        if data.len() >= PARALLEL_PROJECTION_MIN_POINTS {
            return data
                .par_iter()
                .enumerate()
                .map(|(index, point)| project_point(index, point, x_scale, y_scale))
                .collect();
        }
    }

    data.iter()
        .enumerate()
        .map(|(index, point)| project_point(index, point, x_scale, y_scale))
        .collect()
}

/// Projects a series, collecting unplaceable data as recoverable skips
/// instead of failing the whole series.
#[must_use]
pub fn project_points(
    data: &[DataPoint],
    x_scale: &ResolvedScale,
    y_scale: &ResolvedScale,
) -> Projection {
    let mut projection = Projection {
        points: Vec::with_capacity(data.len()),
        ..Projection::default()
    };
    for (index, outcome) in project_outcomes(data, x_scale, y_scale)
        .into_iter()
        .enumerate()
    {
        match outcome {
            PointOutcome::Projected(point) => projection.points.push(point),
            PointOutcome::Missing => projection.missing.push(index),
            PointOutcome::Skipped(error) => projection.skipped.push(SkippedPoint { index, error }),
        }
    }
    report_skipped(&projection.skipped);
    projection
}

pub(crate) fn report_skipped(skipped: &[SkippedPoint]) {
    if let Some(first) = skipped.first() {
        warn!(
            skipped = skipped.len(),
            first_index = first.index,
            error = %first.error,
            "skipping data points outside scale domains"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{PointOutcome, project_point, project_points};
    use crate::core::{DataPoint, ScaleConfig, resolve};
    use crate::error::ChartError;

    #[test]
    fn unknown_category_is_reported_as_recoverable_skip() {
        let x = resolve(&ScaleConfig::band(["a", "b"]).with_range(0.0, 100.0)).expect("x");
        let y = resolve(&ScaleConfig::linear(0.0, 10.0).with_range(100.0, 0.0)).expect("y");
        let data = vec![
            DataPoint::new("a", 5.0),
            DataPoint::new("zzz", 5.0),
            DataPoint::missing("b"),
            DataPoint::new("b", 20.0),
        ];

        let projection = project_points(&data, &x, &y);
        assert_eq!(projection.points.len(), 2);
        assert_eq!(projection.missing, vec![2]);
        assert_eq!(projection.skipped.len(), 1);
        assert_eq!(projection.skipped[0].index, 1);
        assert!(matches!(
            projection.skipped[0].error,
            ChartError::DataPointSkipped { index: 1, .. }
        ));
        // Continuous y extrapolates beyond its domain.
        assert!((projection.points[1].y - -100.0).abs() <= 1e-9);
    }

    #[test]
    fn band_points_are_centred() {
        let x = resolve(&ScaleConfig::band(["a", "b"]).with_range(0.0, 100.0)).expect("x");
        let y = resolve(&ScaleConfig::linear(0.0, 10.0).with_range(100.0, 0.0)).expect("y");
        let PointOutcome::Projected(point) = project_point(0, &DataPoint::new("b", 0.0), &x, &y)
        else {
            panic!("expected projection");
        };
        assert!((point.x - 75.0).abs() <= 1e-9);
        assert!((point.y - 100.0).abs() <= 1e-9);
    }
}
