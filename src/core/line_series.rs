use serde::{Deserialize, Serialize};

use crate::core::projection::{PointOutcome, SkippedPoint, project_outcomes, report_skipped};
use crate::core::{DataPoint, ProjectedPoint, ResolvedScale};

/// How a line or area series treats data without a usable y value.
///
/// Both behaviors are legitimate and change the picture, so series choose
/// explicitly rather than relying on a library-wide default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValuePolicy {
    /// Break the path; neighbours of a missing value are not connected.
    #[default]
    Gap,
    /// Connect the neighbours of a missing value with a straight segment.
    Interpolate,
}

/// Projected line path split into independently stroked sub-paths.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinePath {
    pub subpaths: Vec<Vec<ProjectedPoint>>,
    pub skipped: Vec<SkippedPoint>,
}

impl LinePath {
    /// Number of straight segments across all sub-paths.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.subpaths
            .iter()
            .map(|subpath| subpath.len().saturating_sub(1))
            .sum()
    }

    /// Returns `true` when some segment connects data at `from` and `to`.
    #[must_use]
    pub fn connects(&self, from: usize, to: usize) -> bool {
        self.subpaths.iter().any(|subpath| {
            subpath
                .windows(2)
                .any(|pair| pair[0].index == from && pair[1].index == to)
        })
    }

    /// SVG path data (`M x y L x y ...`) for all sub-paths.
    #[must_use]
    pub fn to_svg_path_data(&self) -> String {
        let mut out = String::new();
        for subpath in &self.subpaths {
            for (i, point) in subpath.iter().enumerate() {
                if !out.is_empty() {
                    out.push(' ');
                }
                let command = if i == 0 { 'M' } else { 'L' };
                out.push_str(&format!("{command}{:.2},{:.2}", point.x, point.y));
            }
        }
        out
    }
}

/// Projects a line series into ordered sub-paths.
///
/// Data with `y == None`, and data the scales cannot place, either split the
/// path (`Gap`) or are stepped over (`Interpolate`). Single-point sub-paths
/// are kept so hosts can draw them as isolated markers.
#[must_use]
pub fn project_line_path(
    data: &[DataPoint],
    x_scale: &ResolvedScale,
    y_scale: &ResolvedScale,
    policy: MissingValuePolicy,
) -> LinePath {
    let mut path = LinePath::default();
    let mut current: Vec<ProjectedPoint> = Vec::new();

    for (index, outcome) in project_outcomes(data, x_scale, y_scale)
        .into_iter()
        .enumerate()
    {
        match outcome {
            PointOutcome::Projected(point) => current.push(point),
            PointOutcome::Missing => {
                if policy == MissingValuePolicy::Gap && !current.is_empty() {
                    path.subpaths.push(std::mem::take(&mut current));
                }
            }
            PointOutcome::Skipped(error) => {
                if policy == MissingValuePolicy::Gap && !current.is_empty() {
                    path.subpaths.push(std::mem::take(&mut current));
                }
                path.skipped.push(SkippedPoint { index, error });
            }
        }
    }
    if !current.is_empty() {
        path.subpaths.push(current);
    }

    report_skipped(&path.skipped);
    path
}
