use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::TAU;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, Primitive, PrimitiveGroup, RenderFrame, Renderer, TextAnchor, TextBaseline,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub groups_visited: usize,
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub paths_drawn: usize,
    pub texts_drawn: usize,
}

/// Renderers that can draw into an externally owned Cairo context.
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango renderer backend.
///
/// Draws offscreen through `Renderer::render`, or in place on a caller's
/// context through `CairoContextRenderer`.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::WHITE,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        draw_group(context, &frame.root, &mut stats)?;
        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn draw_group(
    context: &Context,
    group: &PrimitiveGroup,
    stats: &mut CairoRenderStats,
) -> ChartResult<()> {
    context
        .save()
        .map_err(|err| map_backend_error("failed to save context", err))?;
    context.translate(group.translate.0, group.translate.1);
    stats.groups_visited += 1;

    for primitive in &group.primitives {
        draw_primitive(context, primitive, stats)?;
    }
    for child in &group.children {
        draw_group(context, child, stats)?;
    }

    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore context", err))
}

fn draw_primitive(
    context: &Context,
    primitive: &Primitive,
    stats: &mut CairoRenderStats,
) -> ChartResult<()> {
    match primitive {
        Primitive::Line(line) => {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            match line.stroke_style.dash_pattern(line.stroke_width) {
                Some(pattern) => context.set_dash(&pattern, 0.0),
                None => context.set_dash(&[], 0.0),
            }
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }
        Primitive::Rect(rect) => {
            context.rectangle(rect.x, rect.y, rect.width, rect.height);
            fill_and_stroke(
                context,
                Some(rect.fill_color),
                rect.border_width,
                rect.border_color,
            )?;
            stats.rects_drawn += 1;
        }
        Primitive::Circle(circle) => {
            context.new_sub_path();
            context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
            fill_and_stroke(
                context,
                Some(circle.fill_color),
                circle.stroke_width,
                circle.stroke_color,
            )?;
            stats.circles_drawn += 1;
        }
        Primitive::Path(path) => {
            let mut points = path.points.iter();
            if let Some((x, y)) = points.next() {
                context.move_to(*x, *y);
            }
            for (x, y) in points {
                context.line_to(*x, *y);
            }
            if path.closed {
                context.close_path();
            }
            context.set_dash(&[], 0.0);
            fill_and_stroke(context, path.fill_color, path.stroke_width, path.stroke_color)?;
            stats.paths_drawn += 1;
        }
        Primitive::Text(text) => {
            let layout = pangocairo::functions::create_layout(context);
            let font_description =
                FontDescription::from_string(&format!("Sans {}px", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (width, height) = layout.pixel_size();
            let dx = match text.anchor {
                TextAnchor::Start => 0.0,
                TextAnchor::Middle => -f64::from(width) / 2.0,
                TextAnchor::End => -f64::from(width),
            };
            let dy = match text.baseline {
                TextBaseline::Top => 0.0,
                TextBaseline::Middle => -f64::from(height) / 2.0,
                TextBaseline::Bottom => -f64::from(height),
            };

            context
                .save()
                .map_err(|err| map_backend_error("failed to save context", err))?;
            context.translate(text.x, text.y);
            context.rotate(text.rotation_deg.to_radians());
            apply_color(context, text.color);
            context.move_to(dx, dy);
            pangocairo::functions::show_layout(context, &layout);
            context
                .restore()
                .map_err(|err| map_backend_error("failed to restore context", err))?;
            stats.texts_drawn += 1;
        }
    }
    Ok(())
}

fn fill_and_stroke(
    context: &Context,
    fill: Option<Color>,
    stroke_width: f64,
    stroke_color: Color,
) -> ChartResult<()> {
    if let Some(fill) = fill {
        apply_color(context, fill);
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill shape", err))?;
    }
    if stroke_width > 0.0 {
        apply_color(context, stroke_color);
        context.set_line_width(stroke_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke shape", err))
    } else {
        context.new_path();
        Ok(())
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
