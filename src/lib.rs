//! xy-chart: declarative XY charting core.
//!
//! Scales map data to pixels, tick generators and axis renderers turn scales
//! into labelled guides, series projectors turn data into geometry, and the
//! chart container assembles everything into a backend-agnostic
//! [`render::RenderFrame`] of vector primitives.

pub mod api;
pub mod axis;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartElement, ChartEngine, XyChart, XyChartConfig};
pub use error::{ChartError, ChartResult};
