use xy_chart::api::{LineSeriesProps, ScaleSpec};
use xy_chart::axis::AxisProps;
use xy_chart::core::{DataPoint, Margin, ScaleDomain, Viewport};
use xy_chart::render::{
    Color, LinePrimitive, NullRenderer, PrimitiveGroup, RenderFrame, Renderer, SvgRenderer,
};
use xy_chart::{ChartElement, ChartEngine, XyChartConfig};

fn config() -> XyChartConfig {
    XyChartConfig::new(Viewport::new(640, 360))
        .with_margin(Margin::uniform(40.0))
        .with_x_scale(ScaleSpec::band().with_domain(ScaleDomain::discrete(["jan", "feb", "mar"])))
        .with_y_scale(ScaleSpec::linear().with_include_zero(true).with_nice(true))
}

fn elements() -> Vec<ChartElement> {
    vec![
        ChartElement::LineSeries(LineSeriesProps::new(
            "revenue",
            vec![
                DataPoint::new("jan", 12.0),
                DataPoint::new("feb", 18.5),
                DataPoint::new("mar", 9.0),
            ],
        )),
        ChartElement::XAxis(AxisProps::new().with_label("Month")),
        ChartElement::YAxis(AxisProps::new().with_label("Revenue & costs")),
    ]
}

#[test]
fn svg_renderer_writes_the_chart_tree() {
    let mut engine = ChartEngine::new(SvgRenderer::new(), config()).expect("engine init");
    engine.set_elements(elements());
    engine.render().expect("render");

    let svg = engine.renderer().document();
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"640\" height=\"360\""));
    assert!(svg.contains("<g class=\"series\" transform=\"translate(40.00,40.00)\">"));
    assert!(svg.contains("<g class=\"line-series\">"));
    assert!(svg.contains("<path d=\"M"));
    assert!(svg.contains(">jan</text>"));
    assert!(svg.contains("Revenue &amp; costs"));
    assert!(svg.contains("rotate(90.00"));
}

#[test]
fn xml_declaration_is_optional() {
    let mut renderer = SvgRenderer::new().with_xml_declaration(true);
    let frame = RenderFrame::new(Viewport::new(10, 10));
    renderer.render(&frame).expect("render");
    assert!(renderer.document().starts_with("<?xml"));

    let document = renderer.into_document();
    assert!(document.contains("<g class=\"chart\">"));
}

#[test]
fn renderers_reject_non_finite_geometry() {
    let mut group = PrimitiveGroup::new("broken");
    group.push_line(LinePrimitive::new(0.0, f64::NAN, 10.0, 10.0, 1.0, Color::BLACK));
    let frame = RenderFrame::new(Viewport::new(100, 100)).with_group(group);

    assert!(SvgRenderer::new().render(&frame).is_err());
    assert!(NullRenderer::default().render(&frame).is_err());
}

#[test]
fn null_renderer_records_frame_counts() {
    let mut engine = ChartEngine::new(NullRenderer::default(), config()).expect("engine init");
    engine.set_elements(elements());
    engine.render().expect("render");

    let renderer = engine.renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_counts.rects, 1);
    assert_eq!(renderer.last_counts.paths, 1);
    assert!(renderer.last_counts.texts >= 5);
    let frame = renderer.last_frame.as_ref().expect("stored frame");
    assert_eq!(frame.viewport, Viewport::new(640, 360));
}
