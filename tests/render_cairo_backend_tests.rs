#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use xy_chart::api::{LineSeriesProps, PointSeriesProps, ScaleSpec};
use xy_chart::axis::AxisProps;
use xy_chart::core::{DataPoint, ScaleDomain, Viewport};
use xy_chart::render::CairoRenderer;
use xy_chart::{ChartElement, ChartEngine, ChartError, XyChartConfig};

fn config(width: u32, height: u32) -> XyChartConfig {
    XyChartConfig::new(Viewport::new(width, height))
        .with_x_scale(ScaleSpec::linear().with_domain(ScaleDomain::Continuous {
            min: 0.0,
            max: 100.0,
        }))
        .with_y_scale(ScaleSpec::linear().with_domain(ScaleDomain::Continuous {
            min: 0.0,
            max: 50.0,
        }))
}

fn elements() -> Vec<ChartElement> {
    let data = vec![
        DataPoint::new(10.0, 10.0),
        DataPoint::new(20.0, 20.0),
        DataPoint::new(40.0, 15.0),
    ];
    vec![
        ChartElement::LineSeries(LineSeriesProps::new("line", data.clone())),
        ChartElement::PointSeries(PointSeriesProps::new("points", data)),
        ChartElement::XAxis(AxisProps::new().with_num_ticks(5)),
        ChartElement::YAxis(AxisProps::new().with_num_ticks(5)),
    ]
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_every_primitive_kind() {
    let renderer = CairoRenderer::new(900, 500).expect("renderer");
    let mut engine = ChartEngine::new(renderer, config(900, 500)).expect("engine init");
    engine.set_elements(elements());

    engine.render().expect("render");
    let stats = engine.into_renderer().last_stats();

    assert_eq!(stats.rects_drawn, 1);
    assert_eq!(stats.paths_drawn, 1);
    assert_eq!(stats.circles_drawn, 3);
    // 6 ticks per axis plus the two axis lines.
    assert_eq!(stats.lines_drawn, 14);
    assert_eq!(stats.texts_drawn, 12);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let renderer = CairoRenderer::new(600, 320).expect("renderer");
    let mut engine = ChartEngine::new(renderer, config(600, 320)).expect("engine init");
    engine.set_elements(elements());

    let surface = ImageSurface::create(Format::ARgb32, 600, 320).expect("surface");
    let context = Context::new(&surface).expect("context");
    engine
        .render_on_cairo_context(&context)
        .expect("render on context");

    let renderer = engine.into_renderer();
    assert!(renderer.last_stats().groups_visited >= 4);
    assert!(renderer.last_stats().lines_drawn >= 14);
}
