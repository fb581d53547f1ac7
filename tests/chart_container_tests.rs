use xy_chart::api::{
    AXES_CLASS, BACKGROUND_CLASS, BAR_SERIES_CLASS, BarSeriesProps, LINE_SERIES_CLASS,
    LineSeriesProps, NETWORK_CLASS, NetworkProps, ParentSize, SERIES_CLASS, ScaleSpec,
    ScreenSize, Theme,
};
use xy_chart::axis::{AxisOrientation, AxisProps, AxisStyleOverride, AxisStyles, AXIS_CLASS};
use xy_chart::core::{
    DataPoint, Graph, Link, Margin, Node, ScaleDomain, ScaleKind, Viewport,
};
use xy_chart::render::{Color, NullRenderer, TextAnchor};
use xy_chart::{ChartElement, ChartEngine, ChartError, XyChart, XyChartConfig};

const PINK: Color = Color::rgb(1.0, 0.753, 0.796);

fn linear_spec(min: f64, max: f64) -> ScaleSpec {
    ScaleSpec::linear().with_domain(ScaleDomain::Continuous { min, max })
}

fn base_config() -> XyChartConfig {
    XyChartConfig::new(Viewport::new(500, 300))
        .with_margin(Margin::uniform(50.0))
        .with_x_scale(linear_spec(0.0, 4.0))
        .with_y_scale(linear_spec(0.0, 10.0))
}

fn line(id: &str) -> ChartElement {
    ChartElement::LineSeries(LineSeriesProps::new(
        id,
        vec![DataPoint::new(0.0, 1.0), DataPoint::new(4.0, 9.0)],
    ))
}

#[test]
fn frame_layers_are_background_series_axes() {
    let chart = XyChart::new(base_config())
        .expect("chart init")
        .with_element(line("a"))
        .with_element(ChartElement::XAxis(AxisProps::new()))
        .with_element(ChartElement::YAxis(AxisProps::new()));
    let frame = chart.render_frame().expect("frame");

    let classes: Vec<&str> = frame
        .root
        .children
        .iter()
        .map(|group| group.class.as_str())
        .collect();
    assert_eq!(classes, vec![BACKGROUND_CLASS, SERIES_CLASS, AXES_CLASS]);

    let background = frame.find(BACKGROUND_CLASS).expect("background");
    assert_eq!(background.counts().rects, 1);
    let series = frame.find(SERIES_CLASS).expect("series");
    assert_eq!(series.translate, (50.0, 50.0));
    assert_eq!(series.find_all(LINE_SERIES_CLASS).len(), 1);
}

#[test]
fn components_without_their_scale_render_nothing() {
    let config = XyChartConfig::new(Viewport::new(500, 300)).with_x_scale(linear_spec(0.0, 4.0));
    let chart = XyChart::new(config)
        .expect("chart init")
        .with_element(line("a"))
        .with_element(ChartElement::XAxis(AxisProps::new()))
        .with_element(ChartElement::YAxis(AxisProps::new()));
    let frame = chart.render_frame().expect("frame");

    let axes = frame.find(AXES_CLASS).expect("axes");
    assert_eq!(axes.find_all(AXIS_CLASS).len(), 1);
    let series = frame.find(SERIES_CLASS).expect("series");
    assert!(series.children.is_empty());
}

#[test]
fn missing_scale_surfaces_from_the_element() {
    let chart = XyChart::new(XyChartConfig::new(Viewport::new(200, 200))).expect("chart init");
    let scales = chart.resolve_scales().expect("scales");
    let ctx = xy_chart::api::ChartContext {
        inner: scales.inner,
        x_scale: scales.x.as_ref(),
        y_scale: scales.y.as_ref(),
        theme: &chart.config().theme,
    };
    let result = ChartElement::YAxis(AxisProps::new()).render_axis(&ctx);
    assert_eq!(result, Err(ChartError::MissingScale { axis: "y" }));
}

#[test]
fn y_axis_defaults_to_the_right_edge() {
    let chart = XyChart::new(base_config())
        .expect("chart init")
        .with_element(ChartElement::YAxis(AxisProps::new()));
    let frame = chart.render_frame().expect("frame");

    let axis = frame.find(AXIS_CLASS).expect("y axis");
    assert_eq!(axis.translate, (400.0, 0.0));
    let first_label = axis
        .children
        .iter()
        .flat_map(|tick| tick.texts())
        .next()
        .expect("tick label");
    assert_eq!(first_label.anchor, TextAnchor::Start);
}

#[test]
fn x_axis_defaults_to_the_bottom_edge() {
    let chart = XyChart::new(base_config())
        .expect("chart init")
        .with_element(ChartElement::XAxis(AxisProps::new()));
    let frame = chart.render_frame().expect("frame");

    let axis = frame.find(AXIS_CLASS).expect("x axis");
    assert_eq!(axis.translate, (0.0, 200.0));
}

#[test]
fn y_axis_rejects_horizontal_orientation() {
    let chart = XyChart::new(base_config())
        .expect("chart init")
        .with_element(ChartElement::YAxis(
            AxisProps::new().with_orientation(AxisOrientation::Bottom),
        ));
    let result = chart.render_frame();
    assert!(matches!(result, Err(ChartError::Config(_))));
}

#[test]
fn theme_axis_styles_reach_the_axis_line() {
    let theme = Theme::default().with_y_axis(AxisStyles {
        axis: AxisStyleOverride::default().with_stroke(PINK),
        ..AxisStyles::default()
    });
    let chart = XyChart::new(base_config().with_theme(theme))
        .expect("chart init")
        .with_element(ChartElement::XAxis(AxisProps::new()))
        .with_element(ChartElement::YAxis(
            AxisProps::new().with_orientation(AxisOrientation::Left),
        ));
    let frame = chart.render_frame().expect("frame");

    let axes = frame.find_all(AXIS_CLASS);
    assert_eq!(axes.len(), 2);
    let x_line = axes[0].lines().next().expect("x axis line");
    let y_line = axes[1].lines().next().expect("y axis line");
    assert_ne!(x_line.color, PINK);
    assert_eq!(y_line.color, PINK);
}

#[test]
fn series_take_palette_colors_by_position() {
    let palette = vec![Color::rgb(1.0, 0.0, 0.0), Color::rgb(0.0, 1.0, 0.0)];
    let chart = XyChart::new(base_config().with_theme(Theme::default().with_palette(palette)))
        .expect("chart init")
        .with_element(ChartElement::XAxis(AxisProps::new()))
        .with_element(line("a"))
        .with_element(line("b"))
        .with_element(line("c"));
    let frame = chart.render_frame().expect("frame");

    let strokes: Vec<Color> = frame
        .find_all(LINE_SERIES_CLASS)
        .iter()
        .filter_map(|group| match group.primitives.first() {
            Some(xy_chart::render::Primitive::Path(path)) => Some(path.stroke_color),
            _ => None,
        })
        .collect();
    assert_eq!(
        strokes,
        vec![
            Color::rgb(1.0, 0.0, 0.0),
            Color::rgb(0.0, 1.0, 0.0),
            Color::rgb(1.0, 0.0, 0.0)
        ]
    );
}

#[test]
fn domains_are_derived_from_series_data() {
    let config = XyChartConfig::new(Viewport::new(500, 300))
        .with_margin(Margin::uniform(50.0))
        .with_x_scale(ScaleSpec::band())
        .with_y_scale(ScaleSpec::linear());
    let chart = XyChart::new(config)
        .expect("chart init")
        .with_element(ChartElement::BarSeries(BarSeriesProps::new(
            "bars",
            vec![
                DataPoint::new("b", 3.0),
                DataPoint::new("a", 7.0),
                DataPoint::new("b", 5.0),
            ],
        )));
    let scales = chart.resolve_scales().expect("scales");

    let x = scales.x.expect("x scale");
    assert_eq!(x.kind(), ScaleKind::Band);
    let categories: Vec<&str> = x.as_band().expect("band").domain().collect();
    assert_eq!(categories, vec!["b", "a"]);

    let y = scales
        .y
        .as_ref()
        .and_then(|scale| scale.as_continuous())
        .expect("y scale");
    assert_eq!(y.domain(), (0.0, 7.0));
    assert_eq!(y.range(), (200.0, 0.0));

    let frame = chart.render_frame().expect("frame");
    assert_eq!(
        frame
            .find(BAR_SERIES_CLASS)
            .map(|group| group.counts().rects),
        Some(3)
    );
}

#[test]
fn network_renders_links_under_nodes() {
    let graph = Graph {
        nodes: vec![
            Node::new("a", 1.0, 1.0).with_label("Alpha"),
            Node::new("b", 3.0, 9.0),
        ],
        links: vec![Link::new("a", "b")],
    };
    let chart = XyChart::new(base_config())
        .expect("chart init")
        .with_element(ChartElement::Network(NetworkProps::new("net", graph)));
    let frame = chart.render_frame().expect("frame");

    let network = frame.find(NETWORK_CLASS).expect("network group");
    let counts = network.counts();
    assert_eq!((counts.lines, counts.circles), (1, 2));
    assert!(matches!(
        network.primitives.first(),
        Some(xy_chart::render::Primitive::Line(_))
    ));
}

#[test]
fn config_round_trips_through_json() {
    let json = r#"{
        "viewport": { "width": 640, "height": 480 },
        "margin": { "top": 20.0, "right": 30.0, "bottom": 40.0, "left": 50.0 },
        "x_scale": { "type": "band", "padding": { "inner": 0.1, "align": 0.5 } },
        "y_scale": { "type": "linear", "nice": true, "include_zero": true },
        "tooltip": { "metric": "x_only", "shared": true }
    }"#;
    let config = XyChartConfig::from_json_str(json).expect("valid json");
    assert_eq!(config.viewport, Viewport::new(640, 480));
    assert_eq!(config.x_scale.as_ref().map(|spec| spec.kind), Some(ScaleKind::Band));
    assert!(config.tooltip.shared);
    assert!(config.tooltip.show_crosshair);

    let encoded = config.to_json_pretty().expect("serialize");
    let decoded = XyChartConfig::from_json_str(&encoded).expect("deserialize");
    assert_eq!(decoded, config);
}

#[test]
fn malformed_json_and_margins_are_config_errors() {
    let result = XyChartConfig::from_json_str("{ not json");
    assert!(matches!(result, Err(ChartError::Config(_))));

    let negative = XyChartConfig::new(Viewport::new(100, 100)).with_margin(Margin::uniform(-1.0));
    assert!(matches!(XyChart::new(negative), Err(ChartError::Config(_))));

    let crowded = XyChartConfig::new(Viewport::new(100, 100)).with_margin(Margin::uniform(60.0));
    let chart = XyChart::new(crowded).expect("margins alone are valid");
    assert!(chart.render_frame().is_err());
}

#[test]
fn engine_reuses_scales_until_inputs_change() {
    let mut engine =
        ChartEngine::new(NullRenderer::default(), base_config()).expect("engine init");
    engine.push_element(line("a"));

    engine.scales().expect("scales");
    engine.scales().expect("scales");
    engine.render().expect("render");
    assert_eq!(engine.scale_resolutions(), 1);

    let generation = engine.scale_generation();
    engine.resize(Viewport::new(500, 300)).expect("same size");
    assert_eq!(engine.scale_generation(), generation);

    engine.resize(Viewport::new(800, 300)).expect("resize");
    assert!(engine.scale_generation() > generation);
    let inner = engine.scales().expect("scales").inner;
    assert_eq!(inner.width, 700.0);
    assert_eq!(engine.scale_resolutions(), 2);

    engine.push_element(line("b"));
    engine.render().expect("render");
    assert_eq!(engine.scale_resolutions(), 3);
    assert_eq!(engine.renderer().frames_rendered, 2);
}

#[test]
fn resize_rejects_empty_viewport() {
    let mut engine =
        ChartEngine::new(NullRenderer::default(), base_config()).expect("engine init");
    let result = engine.resize(Viewport::new(0, 300));
    assert!(matches!(result, Err(ChartError::InvalidViewport { .. })));
}

#[test]
fn parent_size_drives_engine_viewport() {
    let mut engine =
        ChartEngine::new(NullRenderer::default(), base_config()).expect("engine init");
    let mut parent = ParentSize::new();

    assert!(!engine.sync_size(&parent).expect("unmeasured"));
    parent.update(900, 400);
    assert!(engine.sync_size(&parent).expect("measured"));
    assert_eq!(engine.config().viewport, Viewport::new(900, 400));
    assert!(!engine.sync_size(&parent).expect("unchanged"));
}

#[test]
fn screen_size_reserves_space_for_surrounding_ui() {
    let mut engine =
        ChartEngine::new(NullRenderer::default(), base_config()).expect("engine init");
    let mut screen = ScreenSize::new().with_reserve(100, 50);
    screen.on_resize(1100, 650);

    assert!(engine.sync_size(&screen).expect("measured"));
    assert_eq!(engine.config().viewport, Viewport::new(1000, 600));
}

#[test]
fn skipped_points_do_not_fail_the_render() {
    let config = XyChartConfig::new(Viewport::new(400, 300))
        .with_x_scale(ScaleSpec::band().with_domain(ScaleDomain::discrete(["a", "b"])))
        .with_y_scale(linear_spec(0.0, 10.0));
    let chart = XyChart::new(config)
        .expect("chart init")
        .with_element(line("numeric x on a band scale"))
        .with_element(ChartElement::LineSeries(LineSeriesProps::new(
            "ok",
            vec![DataPoint::new("a", 1.0), DataPoint::new("b", 2.0)],
        )));

    let scales = chart.resolve_scales().expect("scales");
    let layout = chart.layout(&scales).expect("layout");
    assert_eq!(layout.skipped_points, 2);
    assert_eq!(layout.hits.len(), 2);
    assert!(layout.hits[0].points.is_empty());
    assert_eq!(layout.hits[1].points.len(), 2);
}
