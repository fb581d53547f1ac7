use std::fmt::{self, Write as _};

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, LineStrokeStyle, Primitive, PrimitiveGroup, RenderFrame, Renderer, TextAnchor,
    TextBaseline,
};

/// Renders frames to a standalone SVG document.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    include_declaration: bool,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_xml_declaration(mut self, include: bool) -> Self {
        self.include_declaration = include;
        self
    }

    /// SVG markup of the most recently rendered frame.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let mut out = String::new();
        if self.include_declaration {
            out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        }
        writeln!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = frame.viewport.width,
            h = frame.viewport.height,
        )
        .and_then(|()| write_group(&mut out, &frame.root, 1))
        .map_err(|e| ChartError::InvalidData(format!("failed to write svg document: {e}")))?;
        out.push_str("</svg>\n");
        self.document = out;
        Ok(())
    }
}

fn write_group(out: &mut String, group: &PrimitiveGroup, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    let transform = if group.translate == (0.0, 0.0) {
        String::new()
    } else {
        format!(
            " transform=\"translate({:.2},{:.2})\"",
            group.translate.0, group.translate.1
        )
    };
    writeln!(
        out,
        "{indent}<g class=\"{}\"{transform}>",
        escape_xml(&group.class)
    )?;
    for primitive in &group.primitives {
        out.push_str(&indent);
        out.push_str("  ");
        write_primitive(out, primitive)?;
        out.push('\n');
    }
    for child in &group.children {
        write_group(out, child, depth + 1)?;
    }
    writeln!(out, "{indent}</g>")
}

fn write_primitive(out: &mut String, primitive: &Primitive) -> fmt::Result {
    match primitive {
        Primitive::Line(line) => {
            write!(
                out,
                "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" {}{}/>",
                line.x1,
                line.y1,
                line.x2,
                line.y2,
                stroke_attrs(line.color, line.stroke_width),
                dash_attr(line.stroke_style, line.stroke_width),
            )?;
        }
        Primitive::Rect(rect) => {
            write!(
                out,
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" {}",
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                fill_attrs(rect.fill_color),
            )?;
            if rect.border_width > 0.0 {
                write!(out, " {}", stroke_attrs(rect.border_color, rect.border_width))?;
            }
            out.push_str("/>");
        }
        Primitive::Circle(circle) => {
            write!(
                out,
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" {}",
                circle.cx,
                circle.cy,
                circle.radius,
                fill_attrs(circle.fill_color),
            )?;
            if circle.stroke_width > 0.0 {
                write!(
                    out,
                    " {}",
                    stroke_attrs(circle.stroke_color, circle.stroke_width)
                )?;
            }
            out.push_str("/>");
        }
        Primitive::Path(path) => {
            let mut data = String::new();
            for (i, (x, y)) in path.points.iter().enumerate() {
                let command = if i == 0 { 'M' } else { 'L' };
                write!(data, "{command}{x:.2},{y:.2} ")?;
            }
            if path.closed {
                data.push('Z');
            }
            let fill = path
                .fill_color
                .map_or_else(|| "fill=\"none\"".to_owned(), fill_attrs);
            write!(out, "<path d=\"{}\" {fill}", data.trim_end())?;
            if path.stroke_width > 0.0 {
                write!(out, " {}", stroke_attrs(path.stroke_color, path.stroke_width))?;
            }
            out.push_str("/>");
        }
        Primitive::Text(text) => {
            let anchor = match text.anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let baseline = match text.baseline {
                TextBaseline::Top => "hanging",
                TextBaseline::Middle => "middle",
                TextBaseline::Bottom => "alphabetic",
            };
            let rotation = if text.rotation_deg == 0.0 {
                String::new()
            } else {
                format!(
                    " transform=\"rotate({:.2},{:.2},{:.2})\"",
                    text.rotation_deg, text.x, text.y
                )
            };
            write!(
                out,
                "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{:.1}\" text-anchor=\"{anchor}\" dominant-baseline=\"{baseline}\" {}{rotation}>{}</text>",
                text.x,
                text.y,
                text.font_size_px,
                fill_attrs(text.color),
                escape_xml(&text.text),
            )?;
        }
    }
    Ok(())
}

fn fill_attrs(color: Color) -> String {
    if color.alpha >= 1.0 {
        format!("fill=\"{}\"", color.to_hex())
    } else {
        format!(
            "fill=\"{}\" fill-opacity=\"{:.3}\"",
            color.to_hex(),
            color.alpha
        )
    }
}

fn stroke_attrs(color: Color, width: f64) -> String {
    let mut attrs = format!("stroke=\"{}\" stroke-width=\"{width:.2}\"", color.to_hex());
    if color.alpha < 1.0 {
        attrs.push_str(&format!(" stroke-opacity=\"{:.3}\"", color.alpha));
    }
    attrs
}

fn dash_attr(style: LineStrokeStyle, width: f64) -> String {
    style
        .dash_pattern(width)
        .map(|[on, off]| format!(" stroke-dasharray=\"{on:.2},{off:.2}\""))
        .unwrap_or_default()
}

/// Escapes the five XML special characters.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
