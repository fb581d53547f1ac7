use serde::{Deserialize, Serialize};

use crate::core::line_series::{LinePath, MissingValuePolicy, project_line_path};
use crate::core::projection::SkippedPoint;
use crate::core::{DataPoint, Interpolation, ResolvedScale};

/// Vertex in pixel coordinates used by area fill polygons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaVertex {
    pub x: f64,
    pub y: f64,
}

/// Geometry for an area series.
///
/// `line` follows the mapped data; each fill polygon closes one sub-path
/// against the baseline and repeats its first vertex.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AreaGeometry {
    pub line: LinePath,
    pub fill_polygons: Vec<Vec<AreaVertex>>,
    pub baseline_y: f64,
}

impl AreaGeometry {
    #[must_use]
    pub fn skipped(&self) -> &[SkippedPoint] {
        &self.line.skipped
    }
}

/// Pixel y of the value-axis baseline: zero when a linear y scale can place
/// it, otherwise the start of the y range (the bottom for `[height, 0]`).
#[must_use]
pub fn baseline_pixel(y_scale: &ResolvedScale) -> f64 {
    let (r0, _) = y_scale.range();
    let (lo, hi) = y_scale.range_extent();
    match y_scale.as_continuous() {
        Some(scale) if scale.interpolation() == Interpolation::Linear => scale
            .map(0.0)
            .map_or(r0, |zero| zero.clamp(lo, hi)),
        _ => r0,
    }
}

/// Projects an area series; gaps in the line split the fill as well.
#[must_use]
pub fn project_area(
    data: &[DataPoint],
    x_scale: &ResolvedScale,
    y_scale: &ResolvedScale,
    policy: MissingValuePolicy,
) -> AreaGeometry {
    let line = project_line_path(data, x_scale, y_scale, policy);
    let baseline_y = baseline_pixel(y_scale);

    let fill_polygons = line
        .subpaths
        .iter()
        .filter(|subpath| subpath.len() >= 2)
        .map(|subpath| {
            let first_x = subpath[0].x;
            let last_x = subpath[subpath.len() - 1].x;
            let mut polygon = Vec::with_capacity(subpath.len() + 3);
            polygon.push(AreaVertex {
                x: first_x,
                y: baseline_y,
            });
            polygon.extend(subpath.iter().map(|point| AreaVertex {
                x: point.x,
                y: point.y,
            }));
            polygon.push(AreaVertex {
                x: last_x,
                y: baseline_y,
            });
            polygon.push(AreaVertex {
                x: first_x,
                y: baseline_y,
            });
            polygon
        })
        .collect();

    AreaGeometry {
        line,
        fill_polygons,
        baseline_y,
    }
}
