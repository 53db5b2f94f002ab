//! SVG serialization of a laid-out infographic.

use std::fmt::{self, Write};

use crate::layout::{
    Anchor, BACKGROUND, Circle, Element, Family, Infographic, Line, Rect, Stroke, TextRun,
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const SANS: &str = "'Be Vietnam Pro', 'Noto Sans', 'DejaVu Sans', sans-serif";
const SERIF: &str = "'Playfair Display', 'Noto Serif', 'DejaVu Serif', serif";

/// Serialize `infographic` as a standalone SVG document.
#[must_use]
pub fn render_svg(infographic: &Infographic) -> String {
    let mut out = String::with_capacity(64 * 1024);
    match write_svg(&mut out, infographic) {
        Ok(()) => out,
        // Writing into a String only fails if a Display impl does.
        Err(fmt::Error) => String::new(),
    }
}

/// Write the SVG document of `infographic` into `out`.
///
/// # Errors
///
/// Propagates errors from the underlying writer.
pub fn write_svg<W: Write>(out: &mut W, infographic: &Infographic) -> fmt::Result {
    let (width, height) = (infographic.width, infographic.height);
    write!(out, r#"<svg xmlns="{SVG_NS}" width="{width:.1}" height="{height:.1}""#)?;
    writeln!(out, r#" viewBox="0 0 {width:.1} {height:.1}">"#)?;
    writeln!(out, r#"<rect width="100%" height="100%" fill="{BACKGROUND}"/>"#)?;
    for block in &infographic.blocks {
        writeln!(out, r#"<g data-y="{:.1}">"#, block.y)?;
        for element in &block.elements {
            write_element(out, element)?;
        }
        writeln!(out, "</g>")?;
    }
    writeln!(out, "</svg>")
}

fn write_element<W: Write>(out: &mut W, element: &Element) -> fmt::Result {
    match element {
        Element::Rect(rect) => write_rect(out, rect),
        Element::Circle(circle) => write_circle(out, circle),
        Element::Line(line) => write_line(out, line),
        Element::Text(run) => write_text(out, run),
    }
}

fn write_rect<W: Write>(out: &mut W, rect: &Rect) -> fmt::Result {
    write!(
        out,
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="{:.1}" fill="{}""#,
        rect.x, rect.y, rect.width, rect.height, rect.radius, rect.fill
    )?;
    write_stroke(out, rect.stroke.as_ref())?;
    writeln!(out, "/>")
}

fn write_circle<W: Write>(out: &mut W, circle: &Circle) -> fmt::Result {
    write!(
        out,
        r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}""#,
        circle.cx, circle.cy, circle.radius, circle.fill
    )?;
    write_stroke(out, circle.stroke.as_ref())?;
    writeln!(out, "/>")
}

fn write_line<W: Write>(out: &mut W, line: &Line) -> fmt::Result {
    write!(
        out,
        r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}""#,
        line.from.0, line.from.1, line.to.0, line.to.1
    )?;
    write_stroke(out, Some(&line.stroke))?;
    writeln!(out, "/>")
}

fn write_stroke<W: Write>(out: &mut W, stroke: Option<&Stroke>) -> fmt::Result {
    let Some(stroke) = stroke else {
        return Ok(());
    };
    write!(
        out,
        r#" stroke="{}" stroke-width="{:.1}""#,
        stroke.color, stroke.width
    )?;
    if stroke.opacity < 1.0 {
        write!(out, r#" stroke-opacity="{:.3}""#, stroke.opacity)?;
    }
    if let Some((on, off)) = stroke.dash {
        write!(out, r#" stroke-dasharray="{on:.1} {off:.1}""#)?;
    }
    Ok(())
}

fn write_text<W: Write>(out: &mut W, run: &TextRun) -> fmt::Result {
    let anchor = match run.anchor {
        Anchor::Start => "start",
        Anchor::Middle => "middle",
        Anchor::End => "end",
    };
    let family = match run.family {
        Family::Sans => SANS,
        Family::Serif => SERIF,
    };
    write!(
        out,
        r#"<text x="{:.1}" y="{:.1}" font-size="{:.1}" font-weight="{}""#,
        run.x, run.baseline, run.size, run.weight
    )?;
    write!(
        out,
        r#" font-family="{family}" text-anchor="{anchor}" fill="{}""#,
        run.color
    )?;
    if run.italic {
        write!(out, r#" font-style="italic""#)?;
    }
    if run.opacity < 1.0 {
        write!(out, r#" fill-opacity="{:.2}""#, run.opacity)?;
    }
    writeln!(out, ">{}</text>", Escaped(&run.content))
}

/// XML text escaping. Characters XML 1.0 cannot carry are dropped.
struct Escaped<'text>(&'text str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.0.chars() {
            match ch {
                '&' => formatter.write_str("&amp;")?,
                '<' => formatter.write_str("&lt;")?,
                '>' => formatter.write_str("&gt;")?,
                '"' => formatter.write_str("&quot;")?,
                '\'' => formatter.write_str("&apos;")?,
                // C0 controls except tab, newline and CR, plus U+FFFE and U+FFFF
                '\u{0}'..='\u{8}'
                | '\u{b}'
                | '\u{c}'
                | '\u{e}'..='\u{1f}'
                | '\u{fffe}'
                | '\u{ffff}' => {}
                _ => formatter.write_char(ch)?,
            }
        }
        Ok(())
    }
}
