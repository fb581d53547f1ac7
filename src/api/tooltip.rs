use std::sync::Arc;

use crate::core::{InnerSize, SeriesId};
use crate::interaction::{TooltipConfig, TooltipMatch, TooltipState};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, PrimitiveGroup, TextAnchor,
    TextBaseline, TextPrimitive,
};

use super::{ElementDatum, TOOLTIP_CLASS, TooltipTheme};

const LABEL_OFFSET_PX: f64 = 8.0;
const LINE_SPACING: f64 = 1.3;

/// Builds tooltip text for one matched datum.
pub type TooltipFormatter = Arc<dyn Fn(&SeriesId, ElementDatum<'_>) -> String + Send + Sync>;

/// `"x: …, y: …"` for data points, the label (or id) for network nodes.
#[must_use]
pub fn default_tooltip_text(_series: &SeriesId, datum: ElementDatum<'_>) -> String {
    match datum {
        ElementDatum::Point(point) => match &point.y {
            Some(y) => format!("x: {}, y: {y}", point.x),
            None => format!("x: {}", point.x),
        },
        ElementDatum::Node(node) => node.label.clone().unwrap_or_else(|| node.id.clone()),
    }
}

/// Draws the tooltip for the current state, `None` when idle or unmatched.
pub(crate) fn render_tooltip(
    state: &TooltipState,
    config: TooltipConfig,
    theme: TooltipTheme,
    inner: InnerSize,
    text_for: impl Fn(&TooltipMatch) -> Option<String>,
) -> Option<PrimitiveGroup> {
    let TooltipState::Hovering {
        nearest: Some(nearest),
        per_series,
        ..
    } = state
    else {
        return None;
    };

    let mut group = PrimitiveGroup::new(TOOLTIP_CLASS);
    if config.show_crosshair {
        group.push_line(
            LinePrimitive::new(
                nearest.point.x,
                0.0,
                nearest.point.x,
                inner.height,
                1.0,
                theme.crosshair,
            )
            .with_stroke_style(LineStrokeStyle::Dashed),
        );
    }

    let shown: Vec<&TooltipMatch> = if config.shared {
        per_series.iter().collect()
    } else {
        vec![nearest]
    };
    for matched in &shown {
        group.push_circle(
            CirclePrimitive::new(
                matched.point.x,
                matched.point.y,
                theme.highlight_radius,
                Color::WHITE,
            )
            .with_stroke(2.0, theme.crosshair),
        );
    }

    // Labels stack downward from the overall nearest point and flip to the
    // left half of the plot near the right edge.
    let flip = nearest.point.x > inner.width * 0.5;
    let (x, anchor) = if flip {
        (nearest.point.x - LABEL_OFFSET_PX, TextAnchor::End)
    } else {
        (nearest.point.x + LABEL_OFFSET_PX, TextAnchor::Start)
    };
    let line_height = theme.font_size_px * LINE_SPACING;
    for (row, text) in shown.iter().filter_map(|matched| text_for(matched)).enumerate() {
        let y = nearest.point.y - LABEL_OFFSET_PX + line_height * row as f64;
        group.push_text(
            TextPrimitive::new(text, x, y, theme.font_size_px, theme.text)
                .with_anchor(anchor, TextBaseline::Bottom),
        );
    }
    Some(group)
}
