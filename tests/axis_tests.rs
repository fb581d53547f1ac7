use std::sync::{Arc, Mutex};

use xy_chart::axis::{
    AXIS_CLASS, AXIS_LABEL_CLASS, AXIS_TICK_CLASS, AxisLayout, AxisOrientation, AxisProps,
    AxisStyleOverride, AxisStyles, DEFAULT_AXIS_COLOR, ResolvedAxisStyle, TextStyleOverride,
    TickStyleOverride, render_axis,
};
use xy_chart::core::{DataValue, ResolvedScale, ScaleConfig, resolve};
use xy_chart::render::{Color, PrimitiveGroup, TextAnchor, TextPrimitive};

const PINK: Color = Color::rgb(1.0, 0.753, 0.796);
const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
const SKYBLUE: Color = Color::rgb(0.529, 0.808, 0.922);

fn y_scale() -> ResolvedScale {
    resolve(&ScaleConfig::linear(0.0, 100.0).with_range(100.0, 0.0)).expect("valid scale")
}

fn tick_texts(group: &PrimitiveGroup) -> Vec<TextPrimitive> {
    group
        .find_all(AXIS_TICK_CLASS)
        .iter()
        .flat_map(|tick| tick.texts().cloned().collect::<Vec<_>>())
        .collect()
}

fn render(props: &AxisProps, orientation: AxisOrientation) -> PrimitiveGroup {
    props
        .render(&y_scale(), orientation, &AxisStyles::default())
        .expect("axis renders")
}

#[test]
fn left_and_right_axes_mirror_label_anchors() {
    let props = AxisProps::new();
    let left = render(&props, AxisOrientation::Left);
    let right = render(&props, AxisOrientation::Right);

    let left_texts = tick_texts(&left);
    let right_texts = tick_texts(&right);
    assert!(!left_texts.is_empty());
    assert_eq!(left_texts.len(), right_texts.len());

    for (l, r) in left_texts.iter().zip(&right_texts) {
        assert_eq!(l.anchor, TextAnchor::End);
        assert_eq!(r.anchor, TextAnchor::Start);
        assert_eq!(l.y, r.y);
        assert_eq!(l.text, r.text);
        assert!(l.x < 0.0);
        assert_eq!(l.x, -r.x);
    }
}

#[test]
fn tick_format_sets_every_label() {
    let props = AxisProps::new().with_tick_format(|_, _| "iNvaRiAnT LabEl".to_owned());
    let group = render(&props, AxisOrientation::Left);

    let texts = tick_texts(&group);
    assert!(!texts.is_empty());
    assert!(texts.iter().all(|text| text.text == "iNvaRiAnT LabEl"));
}

#[test]
fn axis_label_renders_once() {
    let props = AxisProps::new().with_label("Revenue");
    let group = render(&props, AxisOrientation::Left);

    let labels = group.find_all(AXIS_LABEL_CLASS);
    assert_eq!(labels.len(), 1);
    let text = labels[0].texts().next().expect("label text");
    assert_eq!(text.text, "Revenue");
    assert_eq!(text.rotation_deg, -90.0);
    assert_eq!(text.y, 50.0);
}

#[test]
fn unlabelled_axis_has_no_label_group() {
    let group = render(&AxisProps::new(), AxisOrientation::Bottom);
    assert!(group.find(AXIS_LABEL_CLASS).is_none());
    assert_eq!(group.class, AXIS_CLASS);
}

#[test]
fn tick_label_props_style_each_tick() {
    let props = AxisProps::new()
        .with_tick_values(vec![
            DataValue::from(0.0),
            DataValue::from(50.0),
            DataValue::from(100.0),
        ])
        .with_tick_label_props(|_, index| {
            let color = if index % 2 == 0 { PINK } else { BLUE };
            TextStyleOverride::default().with_color(color)
        });
    let group = render(&props, AxisOrientation::Left);

    let colors: Vec<Color> = tick_texts(&group).iter().map(|text| text.color).collect();
    assert_eq!(colors, vec![PINK, BLUE, PINK]);
}

#[test]
fn tick_label_props_keep_unset_fields_from_style() {
    let props = AxisProps::new()
        .with_tick_values(vec![DataValue::from(10.0)])
        .with_tick_label_props(|_, _| TextStyleOverride::default().with_font_size(20.0));
    let group = render(&props, AxisOrientation::Bottom);

    let text = tick_texts(&group).pop().expect("tick text");
    assert_eq!(text.font_size_px, 20.0);
    assert_eq!(text.color, DEFAULT_AXIS_COLOR);
    assert_eq!(text.anchor, TextAnchor::Middle);
}

#[test]
fn orientation_specific_tick_label_style_applies_only_there() {
    let styles = AxisStyles {
        tick: TickStyleOverride::default().with_label(
            AxisOrientation::Left,
            TextStyleOverride::default().with_color(SKYBLUE),
        ),
        ..AxisStyles::default()
    };
    let props = AxisProps::new().with_styles(styles);

    let left = render(&props, AxisOrientation::Left);
    let right = render(&props, AxisOrientation::Right);
    assert!(tick_texts(&left).iter().all(|text| text.color == SKYBLUE));
    assert!(tick_texts(&right).iter().all(|text| text.color == DEFAULT_AXIS_COLOR));
}

#[test]
fn explicit_styles_win_over_theme_styles() {
    let theme = AxisStyles {
        axis: AxisStyleOverride::default()
            .with_stroke(BLUE)
            .with_stroke_width(3.0),
        ..AxisStyles::default()
    };
    let explicit = AxisStyles {
        axis: AxisStyleOverride::default().with_stroke(PINK),
        ..AxisStyles::default()
    };
    let props = AxisProps::new().with_styles(explicit);
    let group = props
        .render(&y_scale(), AxisOrientation::Left, &theme)
        .expect("axis renders");

    let line = group.lines().next().expect("axis line");
    assert_eq!(line.color, PINK);
    assert_eq!(line.stroke_width, 3.0);
}

#[test]
fn empty_tick_list_still_draws_axis_line_and_label() {
    let layout = AxisLayout::new(AxisOrientation::Bottom, (0.0, 400.0)).with_label("Time");
    let group = render_axis(&[], &layout, &ResolvedAxisStyle::default());

    assert!(group.find(AXIS_TICK_CLASS).is_none());
    let line = group.lines().next().expect("axis line");
    assert_eq!((line.x1, line.x2), (0.0, 400.0));
    assert_eq!(group.find_all(AXIS_LABEL_CLASS).len(), 1);
}

#[test]
fn hide_zero_drops_only_the_zero_tick() {
    let props = AxisProps::new()
        .with_tick_values(vec![
            DataValue::from(0.0),
            DataValue::from(50.0),
            DataValue::from(100.0),
        ])
        .with_hide_zero(true);
    let group = render(&props, AxisOrientation::Left);

    let labels: Vec<String> = tick_texts(&group).into_iter().map(|text| text.text).collect();
    assert_eq!(labels, vec!["50", "100"]);
}

#[test]
fn hidden_zero_does_not_shift_formatter_and_label_prop_indices() {
    let formatted = Arc::new(Mutex::new(Vec::new()));
    let styled = Arc::new(Mutex::new(Vec::new()));
    let formatted_sink = Arc::clone(&formatted);
    let styled_sink = Arc::clone(&styled);

    let props = AxisProps::new()
        .with_tick_values(vec![
            DataValue::from(0.0),
            DataValue::from(50.0),
            DataValue::from(100.0),
        ])
        .with_hide_zero(true)
        .with_tick_format(move |value, index| {
            let label = value.as_f64().unwrap_or_default().to_string();
            formatted_sink
                .lock()
                .expect("formatter log")
                .push((label.clone(), index));
            label
        })
        .with_tick_label_props(move |value, index| {
            let label = value.as_f64().unwrap_or_default().to_string();
            styled_sink.lock().expect("props log").push((label, index));
            TextStyleOverride::default()
        });
    let group = render(&props, AxisOrientation::Left);

    let expected = vec![("50".to_owned(), 0), ("100".to_owned(), 1)];
    assert_eq!(*formatted.lock().expect("formatter log"), expected);
    assert_eq!(*styled.lock().expect("props log"), expected);
    let labels: Vec<String> = tick_texts(&group).into_iter().map(|text| text.text).collect();
    assert_eq!(labels, vec!["50", "100"]);
}

#[test]
fn tick_marks_point_away_from_the_plot() {
    let bottom = render(&AxisProps::new(), AxisOrientation::Bottom);
    let left = render(&AxisProps::new(), AxisOrientation::Left);

    for tick in bottom.find_all(AXIS_TICK_CLASS) {
        let mark = tick.lines().next().expect("tick mark");
        assert!(mark.y2 > mark.y1);
    }
    for tick in left.find_all(AXIS_TICK_CLASS) {
        let mark = tick.lines().next().expect("tick mark");
        assert!(mark.x2 < mark.x1);
    }
}
