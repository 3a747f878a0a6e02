use std::fmt::{self, Write};

use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Definition, LinePrimitive, Paint, Primitive, RectPrimitive, RenderFrame,
    Renderer, TextAnchor, TextPrimitive,
};

/// Serializes a [`RenderFrame`] into a standalone SVG document.
///
/// Output is deterministic: coordinates are written with at most two
/// decimals and primitives in layer paint order.
#[derive(Debug, Default)]
pub struct SvgRenderer;

impl Renderer for SvgRenderer {
    type Output = String;

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<String> {
        frame.validate()?;
        let mut out = String::with_capacity(16 * 1024);
        write_document(&mut out, frame)
            .map_err(|e| ChartError::InvalidData(format!("failed to write svg: {e}")))?;
        Ok(out)
    }
}

fn write_document(out: &mut String, frame: &RenderFrame) -> fmt::Result {
    let width = frame.viewport.width;
    let height = frame.viewport.height;

    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif">"#
    )?;
    if !frame.title.is_empty() {
        writeln!(out, "<title>{}</title>", escape_xml(&frame.title))?;
    }
    if !frame.description.is_empty() {
        writeln!(out, "<desc>{}</desc>", escape_xml(&frame.description))?;
    }

    if !frame.definitions.is_empty() {
        writeln!(out, "<defs>")?;
        for definition in &frame.definitions {
            write_definition(out, definition)?;
        }
        writeln!(out, "</defs>")?;
    }

    for primitive in frame.primitives() {
        match primitive {
            Primitive::Line(line) => write_line(out, line)?,
            Primitive::Rect(rect) => write_rect(out, rect)?,
            Primitive::Circle(circle) => write_circle(out, circle)?,
            Primitive::Text(text) => write_text(out, text)?,
        }
    }

    writeln!(out, "</svg>")
}

fn write_definition(out: &mut String, definition: &Definition) -> fmt::Result {
    match definition {
        Definition::ArrowMarker { id, color } => writeln!(
            out,
            r#"<marker id="{}" markerWidth="10" markerHeight="10" refX="9" refY="3" orient="auto"><polygon points="0 0, 10 3, 0 6" fill="{color}"/></marker>"#,
            escape_xml(id)
        ),
        Definition::HorizontalGradient { id, stops } => {
            writeln!(
                out,
                r#"<linearGradient id="{}" x1="0%" y1="0%" x2="100%" y2="0%">"#,
                escape_xml(id)
            )?;
            for stop in stops {
                writeln!(
                    out,
                    r#"<stop offset="{}%" stop-color="{}"/>"#,
                    num(stop.offset * 100.0),
                    stop.color
                )?;
            }
            writeln!(out, "</linearGradient>")
        }
    }
}

fn write_line(out: &mut String, line: &LinePrimitive) -> fmt::Result {
    write!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}""#,
        num(line.x1),
        num(line.y1),
        num(line.x2),
        num(line.y2),
        line.color,
        num(line.stroke_width)
    )?;
    if let Some(opacity) = line.opacity {
        write!(out, r#" opacity="{}""#, num(opacity))?;
    }
    if let Some(marker) = &line.marker_end {
        write!(out, r#" marker-end="url(#{})""#, escape_xml(marker))?;
    }
    writeln!(out, "/>")
}

fn write_rect(out: &mut String, rect: &RectPrimitive) -> fmt::Result {
    write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}""#,
        num(rect.x),
        num(rect.y),
        num(rect.width),
        num(rect.height),
        PaintAttr(&rect.fill)
    )?;
    close_with_tooltip(out, "rect", rect.tooltip.as_deref())
}

fn write_circle(out: &mut String, circle: &CirclePrimitive) -> fmt::Result {
    write!(
        out,
        r#"<circle cx="{}" cy="{}" r="{}" fill="{}""#,
        num(circle.cx),
        num(circle.cy),
        num(circle.radius),
        circle.fill
    )?;
    if let Some(opacity) = circle.opacity {
        write!(out, r#" opacity="{}""#, num(opacity))?;
    }
    if let Some(stroke) = circle.stroke {
        write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            stroke.color,
            num(stroke.width)
        )?;
    }
    close_with_tooltip(out, "circle", circle.tooltip.as_deref())
}

fn write_text(out: &mut String, text: &TextPrimitive) -> fmt::Result {
    if let Some(href) = &text.link {
        write!(
            out,
            r#"<a href="{}" target="_blank">"#,
            escape_xml(href)
        )?;
    }

    write!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" fill="{}""#,
        num(text.x),
        num(text.y),
        num(text.font_size_px),
        text.color
    )?;
    match text.anchor {
        TextAnchor::Start => {}
        TextAnchor::Middle => out.push_str(r#" text-anchor="middle""#),
        TextAnchor::End => out.push_str(r#" text-anchor="end""#),
    }
    if text.middle_baseline {
        out.push_str(r#" dominant-baseline="middle""#);
    }
    if text.bold {
        out.push_str(r#" font-weight="bold""#);
    }
    if let Some(opacity) = text.opacity {
        write!(out, r#" opacity="{}""#, num(opacity))?;
    }
    if let Some(angle) = text.rotation_deg {
        write!(
            out,
            r#" transform="rotate({} {} {})""#,
            num(angle),
            num(text.x),
            num(text.y)
        )?;
    }
    write!(out, ">{}</text>", escape_xml(&text.text))?;

    if text.link.is_some() {
        out.push_str("</a>");
    }
    out.push('\n');
    Ok(())
}

fn close_with_tooltip(out: &mut String, element: &str, tooltip: Option<&str>) -> fmt::Result {
    match tooltip {
        Some(tooltip) => writeln!(
            out,
            "><title>{}</title></{element}>",
            escape_xml(tooltip)
        ),
        None => writeln!(out, "/>"),
    }
}

struct PaintAttr<'a>(&'a Paint);

impl fmt::Display for PaintAttr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Paint::Solid(color) => write!(f, "{color}"),
            Paint::Gradient(id) => write!(f, "url(#{})", escape_xml(id)),
        }
    }
}

/// Formats a coordinate with at most two decimals and no trailing zeros.
fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, Viewport};
    use crate::render::{CanvasLayerKind, GradientStop};

    #[test]
    fn numbers_are_compact_and_stable() {
        assert_eq!(num(70.0), "70");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(1.0 / 3.0), "0.33");
        assert_eq!(num(-0.001), "0");
    }

    #[test]
    fn escapes_markup_in_names() {
        assert_eq!(
            escape_xml(r#"O'Brien <Tom> & "Co""#),
            "O&apos;Brien &lt;Tom&gt; &amp; &quot;Co&quot;"
        );
    }

    #[test]
    fn writes_document_with_defs_tooltips_and_links() {
        let mut frame = RenderFrame::new(Viewport::new(200, 100)).with_title("T & t", "desc");
        frame.define(Definition::HorizontalGradient {
            id: "g".to_owned(),
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: Color::rgb(255, 0, 0),
                },
                GradientStop {
                    offset: 1.0,
                    color: Color::rgb(255, 0, 255),
                },
            ],
        });
        frame.push(
            CanvasLayerKind::Series,
            RectPrimitive::new(1.0, 2.0, 3.0, 4.0, Paint::Gradient("g".to_owned()))
                .with_tooltip("a<b"),
        );
        frame.push(
            CanvasLayerKind::Annotation,
            TextPrimitive::new("link", 190.0, 95.0, 10.0, Color::MUTED_TEXT, TextAnchor::End)
                .with_link("https://example.com/?a=1&b=2"),
        );

        let svg = SvgRenderer::default().render(&frame).expect("render");
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<title>T &amp; t</title>"));
        assert!(svg.contains(r#"<stop offset="100%" stop-color="rgb(255,0,255)"/>"#));
        assert!(svg.contains(r#"fill="url(#g)"><title>a&lt;b</title></rect>"#));
        assert!(svg.contains(r#"<a href="https://example.com/?a=1&amp;b=2" target="_blank">"#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
