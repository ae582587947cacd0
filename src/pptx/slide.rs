//! DrawingML generation for the single slide part.
//!
//! Every parsed shape becomes one drawable in the slide's shape tree, in
//! source order: autoshapes for rect/circle/ellipse, a connector for line,
//! custom-geometry freeforms for polyline/polygon/path and a text box for
//! text. Positions and sizes are converted from px to EMU with the constant
//! scale factor; no rotation or skew is ever applied.

use log::warn;

use crate::style::Style;
use crate::types::{Document, Line, Point, Shape, Text};
use crate::units::px_to_emu;

/// Default slide size (10 x 7.5 inches) when the SVG declares no size
pub const DEFAULT_SLIDE_CX: i64 = 9_144_000;
pub const DEFAULT_SLIDE_CY: i64 = 6_858_000;

/// Fixed text box frame, px
const TEXT_BOX_WIDTH: f64 = 200.0;
const TEXT_BOX_HEIGHT: f64 = 80.0;

/// Slide size in EMU, from the document's declared size
pub fn slide_size(document: &Document) -> (i64, i64) {
    let cx = document
        .width
        .map(px_to_emu)
        .filter(|cx| *cx > 0)
        .unwrap_or(DEFAULT_SLIDE_CX);
    let cy = document
        .height
        .map(px_to_emu)
        .filter(|cy| *cy > 0)
        .unwrap_or(DEFAULT_SLIDE_CY);
    (cx, cy)
}

/// Escape XML special characters
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// `<a:srgbClr>` element, with an alpha child when opacity < 1
fn srgb_clr(color: &str, opacity: f64) -> String {
    let hex = color.trim_start_matches('#').to_ascii_uppercase();
    if opacity < 1.0 {
        let alpha = (opacity.clamp(0.0, 1.0) * 100_000.0).round() as i64;
        format!("<a:srgbClr val=\"{hex}\"><a:alpha val=\"{alpha}\"/></a:srgbClr>")
    } else {
        format!("<a:srgbClr val=\"{hex}\"/>")
    }
}

fn fill_xml(style: &Style) -> String {
    match &style.fill {
        Some(color) => format!("<a:solidFill>{}</a:solidFill>", srgb_clr(color, style.opacity)),
        None => "<a:noFill/>".to_string(),
    }
}

fn ln_xml(style: &Style) -> String {
    match &style.stroke {
        Some(color) => format!(
            "<a:ln w=\"{}\"><a:solidFill>{}</a:solidFill></a:ln>",
            px_to_emu(style.stroke_width),
            srgb_clr(color, style.opacity)
        ),
        None => "<a:ln><a:noFill/></a:ln>".to_string(),
    }
}

/// Preset-geometry autoshape (`rect`, `roundRect`, `ellipse`)
fn autoshape(
    id: usize,
    name: &str,
    prst: &str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    style: &Style,
) -> String {
    format!(
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"{name}\"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>\
<p:spPr><a:xfrm><a:off x=\"{}\" y=\"{}\"/><a:ext cx=\"{}\" cy=\"{}\"/></a:xfrm>\
<a:prstGeom prst=\"{prst}\"><a:avLst/></a:prstGeom>{}{}</p:spPr>\
<p:txBody><a:bodyPr/><a:lstStyle/><a:p/></p:txBody></p:sp>",
        px_to_emu(x),
        px_to_emu(y),
        px_to_emu(width),
        px_to_emu(height),
        fill_xml(style),
        ln_xml(style)
    )
}

/// Line connector. The frame is the bounding box of the endpoints; flips
/// orient the preset line geometry to match the actual segment.
fn connector(id: usize, line: &Line) -> String {
    let dx = line.x2 - line.x1;
    let dy = line.y2 - line.y1;
    let mut flips = String::new();
    if dx < 0.0 {
        flips.push_str(" flipH=\"1\"");
    }
    if dy < 0.0 {
        flips.push_str(" flipV=\"1\"");
    }
    format!(
        "<p:cxnSp><p:nvCxnSpPr><p:cNvPr id=\"{id}\" name=\"Line {id}\"/><p:cNvCxnSpPr/><p:nvPr/></p:nvCxnSpPr>\
<p:spPr><a:xfrm{flips}><a:off x=\"{}\" y=\"{}\"/><a:ext cx=\"{}\" cy=\"{}\"/></a:xfrm>\
<a:prstGeom prst=\"line\"><a:avLst/></a:prstGeom>{}</p:spPr></p:cxnSp>",
        px_to_emu(line.x1.min(line.x2)),
        px_to_emu(line.y1.min(line.y2)),
        px_to_emu(dx.abs()),
        px_to_emu(dy.abs()),
        ln_xml(&line.style)
    )
}

/// Custom-geometry freeform over an ordered vertex list.
///
/// Returns `None` (and warns) when fewer than 2 points are available.
fn freeform(id: usize, points: &[Point], closed: bool, style: &Style) -> Option<String> {
    if points.len() < 2 {
        warn!("skipping freeform with fewer than 2 points");
        return None;
    }

    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    let width = px_to_emu(max_x - min_x);
    let height = px_to_emu(max_y - min_y);

    let mut path = String::new();
    for (i, point) in points.iter().enumerate() {
        let x = px_to_emu(point.x - min_x);
        let y = px_to_emu(point.y - min_y);
        let tag = if i == 0 { "moveTo" } else { "lnTo" };
        path.push_str(&format!(
            "<a:{tag}><a:pt x=\"{x}\" y=\"{y}\"/></a:{tag}>"
        ));
    }
    if closed {
        path.push_str("<a:close/>");
    }

    Some(format!(
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"Freeform {id}\"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>\
<p:spPr><a:xfrm><a:off x=\"{}\" y=\"{}\"/><a:ext cx=\"{width}\" cy=\"{height}\"/></a:xfrm>\
<a:custGeom><a:avLst/><a:gdLst/><a:ahLst/><a:cxnLst/><a:rect l=\"0\" t=\"0\" r=\"0\" b=\"0\"/>\
<a:pathLst><a:path w=\"{width}\" h=\"{height}\">{path}</a:path></a:pathLst></a:custGeom>\
{}{}</p:spPr><p:txBody><a:bodyPr/><a:lstStyle/><a:p/></p:txBody></p:sp>",
        px_to_emu(min_x),
        px_to_emu(min_y),
        fill_xml(style),
        ln_xml(style)
    ))
}

/// Text box with a single run; fixed default frame size
fn text_box(id: usize, text: &Text) -> String {
    let sz = text
        .font_size
        .map(|px| format!(" sz=\"{}\"", (px * 0.75 * 100.0).round() as i64))
        .unwrap_or_default();
    let color = text
        .style
        .fill
        .as_ref()
        .map(|c| format!("<a:solidFill>{}</a:solidFill>", srgb_clr(c, text.style.opacity)))
        .unwrap_or_default();
    let latin = text
        .font_family
        .as_ref()
        .map(|f| format!("<a:latin typeface=\"{}\"/>", escape_xml(f)))
        .unwrap_or_default();

    format!(
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"TextBox {id}\"/><p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>\
<p:spPr><a:xfrm><a:off x=\"{}\" y=\"{}\"/><a:ext cx=\"{}\" cy=\"{}\"/></a:xfrm>\
<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>\
<p:txBody><a:bodyPr wrap=\"none\"/><a:lstStyle/><a:p><a:r><a:rPr lang=\"en-US\"{sz}>{color}{latin}</a:rPr>\
<a:t>{}</a:t></a:r></a:p></p:txBody></p:sp>",
        px_to_emu(text.x),
        px_to_emu(text.y),
        px_to_emu(TEXT_BOX_WIDTH),
        px_to_emu(TEXT_BOX_HEIGHT),
        escape_xml(&text.content)
    )
}

/// Generate the complete slide1.xml part for a document
pub fn slide_xml(document: &Document) -> String {
    let mut drawables = String::new();
    // id 1 belongs to the group shape at the tree root
    let mut id = 2;

    for shape in &document.shapes {
        match shape {
            Shape::Rect(r) => {
                let prst = if r.rx > 0.0 || r.ry > 0.0 {
                    "roundRect"
                } else {
                    "rect"
                };
                let name = format!("Rectangle {id}");
                drawables.push_str(&autoshape(
                    id, &name, prst, r.x, r.y, r.width, r.height, &r.style,
                ));
                id += 1;
            }
            Shape::Circle(c) => {
                let name = format!("Oval {id}");
                drawables.push_str(&autoshape(
                    id,
                    &name,
                    "ellipse",
                    c.cx - c.r,
                    c.cy - c.r,
                    c.r * 2.0,
                    c.r * 2.0,
                    &c.style,
                ));
                id += 1;
            }
            Shape::Ellipse(e) => {
                let name = format!("Oval {id}");
                drawables.push_str(&autoshape(
                    id,
                    &name,
                    "ellipse",
                    e.cx - e.rx,
                    e.cy - e.ry,
                    e.rx * 2.0,
                    e.ry * 2.0,
                    &e.style,
                ));
                id += 1;
            }
            Shape::Line(l) => {
                drawables.push_str(&connector(id, l));
                id += 1;
            }
            Shape::Polyline(p) => {
                if let Some(sp) = freeform(id, &p.points, false, &p.style) {
                    drawables.push_str(&sp);
                    id += 1;
                }
            }
            Shape::Polygon(p) => {
                if let Some(sp) = freeform(id, &p.points, true, &p.style) {
                    drawables.push_str(&sp);
                    id += 1;
                }
            }
            Shape::Path(p) => {
                for segment in &p.segments {
                    if let Some(sp) = freeform(id, &segment.points, segment.closed, &p.style) {
                        drawables.push_str(&sp);
                        id += 1;
                    }
                }
            }
            Shape::Text(t) => {
                drawables.push_str(&text_box(id, t));
                id += 1;
            }
        }
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<p:sld xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" \
xmlns:p=\"http://schemas.openxmlformats.org/presentationml/2006/main\">\
<p:cSld><p:spTree>\
<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
<p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/>\
<a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr>\
{drawables}</p:spTree></p:cSld>\
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"
    )
}
