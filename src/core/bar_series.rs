use serde::{Deserialize, Serialize};

use crate::core::area_series::baseline_pixel;
use crate::core::projection::{SkippedPoint, report_skipped};
use crate::core::{DataPoint, ResolvedScale};
use crate::error::{ChartError, ChartResult};

/// Bar rectangle in plot-local pixels, extending from the baseline to the
/// datum's value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub index: usize,
}

impl BarGeometry {
    #[must_use]
    pub fn center_x(self) -> f64 {
        self.x + self.width * 0.5
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarSeriesGeometry {
    pub bars: Vec<BarGeometry>,
    pub missing: Vec<usize>,
    pub skipped: Vec<SkippedPoint>,
}

/// Projects bars. Band x scales give each bar its band width; continuous
/// and ordinal x scales centre a bar of `bar_width` on the datum.
pub fn project_bars(
    data: &[DataPoint],
    x_scale: &ResolvedScale,
    y_scale: &ResolvedScale,
    bar_width: Option<f64>,
) -> ChartResult<BarSeriesGeometry> {
    let band_width = x_scale.bandwidth();
    let width = if band_width > 0.0 {
        bar_width.map_or(band_width, |requested| requested.min(band_width))
    } else {
        bar_width.ok_or_else(|| {
            ChartError::config("bar series on a continuous x scale requires a bar width")
        })?
    };
    if !width.is_finite() || width <= 0.0 {
        return Err(ChartError::config(format!(
            "bar width must be finite and > 0, got {width}"
        )));
    }

    let baseline = baseline_pixel(y_scale);
    let mut geometry = BarSeriesGeometry::default();
    for (index, point) in data.iter().enumerate() {
        let Some(y_value) = point.y.as_ref() else {
            geometry.missing.push(index);
            continue;
        };
        let Some(center_x) = x_scale.map_center(&point.x) else {
            geometry.skipped.push(SkippedPoint {
                index,
                error: ChartError::skipped(
                    index,
                    format!("x value `{}` is outside the x domain", point.x),
                ),
            });
            continue;
        };
        let Some(value_y) = y_scale.map_center(y_value) else {
            geometry.skipped.push(SkippedPoint {
                index,
                error: ChartError::skipped(
                    index,
                    format!("y value `{y_value}` is outside the y domain"),
                ),
            });
            continue;
        };

        geometry.bars.push(BarGeometry {
            x: center_x - width * 0.5,
            y: value_y.min(baseline),
            width,
            height: (value_y - baseline).abs(),
            index,
        });
    }

    report_skipped(&geometry.skipped);
    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::project_bars;
    use crate::core::{DataPoint, ScaleConfig, resolve};

    #[test]
    fn negative_values_extend_below_the_zero_baseline() {
        let x = resolve(&ScaleConfig::band(["a", "b"]).with_range(0.0, 200.0)).expect("x");
        let y = resolve(&ScaleConfig::linear(-10.0, 10.0).with_range(200.0, 0.0)).expect("y");
        let data = vec![DataPoint::new("a", 5.0), DataPoint::new("b", -5.0)];

        let geometry = project_bars(&data, &x, &y, None).expect("bars");
        assert_eq!(geometry.bars.len(), 2);
        let up = geometry.bars[0];
        let down = geometry.bars[1];
        assert_eq!((up.x, up.width), (0.0, 100.0));
        assert!((up.y - 50.0).abs() <= 1e-9 && (up.height - 50.0).abs() <= 1e-9);
        assert!((down.y - 100.0).abs() <= 1e-9 && (down.height - 50.0).abs() <= 1e-9);
    }

    #[test]
    fn continuous_x_requires_explicit_width() {
        let x = resolve(&ScaleConfig::linear(0.0, 10.0).with_range(0.0, 100.0)).expect("x");
        let y = resolve(&ScaleConfig::linear(0.0, 10.0).with_range(100.0, 0.0)).expect("y");
        assert!(project_bars(&[DataPoint::new(1.0, 1.0)], &x, &y, None).is_err());

        let geometry =
            project_bars(&[DataPoint::new(1.0, 1.0)], &x, &y, Some(4.0)).expect("bars");
        assert!((geometry.bars[0].center_x() - 10.0).abs() <= 1e-9);
    }
}
