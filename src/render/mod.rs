mod frame;
mod group;
mod null_renderer;
mod primitives;
mod svg;

pub use frame::RenderFrame;
pub use group::{Primitive, PrimitiveCounts, PrimitiveGroup};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, PathPrimitive, RectPrimitive,
    TextAnchor, TextBaseline, TextPrimitive,
};
pub use svg::{SvgRenderer, escape_xml};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized group tree so drawing code stays
/// isolated from scale math and pointer handling.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
