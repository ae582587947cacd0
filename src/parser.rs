//! SVG parsing into the intermediate [`Document`] representation.
//!
//! Only direct children of the root element are mapped; anything else
//! (groups, defs, styles) is skipped without descending. A shape with missing
//! or unparseable required attributes is dropped with a warning rather than
//! failing the whole document.

use std::collections::HashMap;
use std::fs;
use std::path::Path as FsPath;

use log::warn;
use quick_xml::Reader;
use quick_xml::events::{BytesRef, BytesStart, Event};

use crate::error::{Error, Result};
use crate::path::{parse_path_data, parse_points};
use crate::style::{extract_style, parse_style_attr};
use crate::types::{
    Circle, Document, Ellipse, Line, Path, Polygon, Polyline, Rect, Shape, Text,
};
use crate::units::parse_length;

/// Parse the SVG file at `path` into a [`Document`].
pub fn parse_svg(path: impl AsRef<FsPath>) -> Result<Document> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| Error::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    parse_svg_str(&content)
}

/// Parse SVG source text into a [`Document`].
pub fn parse_svg_str(content: &str) -> Result<Document> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut document = Document {
        width: None,
        height: None,
        shapes: Vec::new(),
    };

    let mut buf = Vec::new();
    let mut depth = 0usize;
    // Attributes, collected content pieces and depth of an open <text> element
    let mut pending_text: Option<(HashMap<String, String>, Vec<String>, usize)> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                if depth == 1 {
                    read_root_size(&attr_map(e), &mut document);
                } else if depth == 2 {
                    let name = local_name(e);
                    if name == "text" {
                        pending_text = Some((attr_map(e), Vec::new(), depth));
                    } else if let Some(shape) = parse_shape(&name, &attr_map(e)) {
                        document.shapes.push(shape);
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                if depth == 0 {
                    read_root_size(&attr_map(e), &mut document);
                } else if depth == 1 {
                    let name = local_name(e);
                    if name == "text" {
                        document.shapes.push(build_text(&attr_map(e), String::new()));
                    } else if let Some(shape) = parse_shape(&name, &attr_map(e)) {
                        document.shapes.push(shape);
                    }
                }
            }
            Ok(Event::Text(ref e)) => {
                if let Some((_, pieces, _)) = &mut pending_text {
                    let text = String::from_utf8_lossy(e.as_ref()).to_string();
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        pieces.push(trimmed.to_string());
                    }
                }
            }
            // Entity and character references arrive as separate events
            Ok(Event::GeneralRef(ref e)) => {
                if let Some((_, pieces, _)) = &mut pending_text
                    && let Some(resolved) = resolve_reference(e)
                {
                    pieces.push(resolved);
                }
            }
            Ok(Event::End(_)) => {
                if pending_text.as_ref().is_some_and(|(_, _, d)| *d == depth) {
                    let (attrs, pieces, _) = pending_text.take().unwrap();
                    document.shapes.push(build_text(&attrs, pieces.join(" ")));
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::MalformedSource(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(document)
}

fn local_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).to_string()
}

fn attr_map(e: &BytesStart) -> HashMap<String, String> {
    let mut attrs = HashMap::new();
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
        if let Ok(value) = attr.unescape_value() {
            attrs.insert(key, value.into_owned());
        }
    }
    attrs
}

/// Resolve a `&name;` or `&#nn;` reference in text content. Unknown named
/// entities are dropped with a warning.
fn resolve_reference(e: &BytesRef) -> Option<String> {
    if let Ok(Some(ch)) = e.resolve_char_ref() {
        return Some(ch.to_string());
    }
    let name = e.decode().ok()?;
    let resolved = match name.as_ref() {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        _ => {
            warn!("ignoring unknown entity reference '&{name};'");
            return None;
        }
    };
    Some(resolved.to_string())
}

/// Determine the document size from `width`/`height`, falling back to the
/// `viewBox` width/height when either is absent.
fn read_root_size(attrs: &HashMap<String, String>, document: &mut Document) {
    document.width = attrs.get("width").and_then(|v| parse_length(v));
    document.height = attrs.get("height").and_then(|v| parse_length(v));

    if (document.width.is_none() || document.height.is_none())
        && let Some(view_box) = attrs.get("viewBox")
    {
        let numbers: Vec<f64> = view_box
            .split([' ', ','])
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse().ok())
            .collect();
        if numbers.len() == 4 {
            document.width = document.width.or(Some(numbers[2]));
            document.height = document.height.or(Some(numbers[3]));
        }
    }
}

fn attr_length(attrs: &HashMap<String, String>, key: &str) -> Option<f64> {
    attrs.get(key).and_then(|v| parse_length(v))
}

fn attr_or_zero(attrs: &HashMap<String, String>, key: &str) -> f64 {
    attr_length(attrs, key).unwrap_or(0.0)
}

fn parse_shape(name: &str, attrs: &HashMap<String, String>) -> Option<Shape> {
    match name {
        "rect" => parse_rect(attrs),
        "circle" => parse_circle(attrs),
        "ellipse" => parse_ellipse(attrs),
        "line" => Some(parse_line(attrs)),
        "polyline" => parse_poly(attrs, false),
        "polygon" => parse_poly(attrs, true),
        "path" => parse_path_element(attrs),
        _ => None,
    }
}

fn parse_rect(attrs: &HashMap<String, String>) -> Option<Shape> {
    let (Some(width), Some(height)) = (attr_length(attrs, "width"), attr_length(attrs, "height"))
    else {
        warn!("skipping <rect> with missing or invalid width/height");
        return None;
    };
    Some(Shape::Rect(Rect {
        x: attr_or_zero(attrs, "x"),
        y: attr_or_zero(attrs, "y"),
        width,
        height,
        rx: attr_or_zero(attrs, "rx"),
        ry: attr_or_zero(attrs, "ry"),
        style: extract_style(attrs),
    }))
}

fn parse_circle(attrs: &HashMap<String, String>) -> Option<Shape> {
    let Some(r) = attr_length(attrs, "r") else {
        warn!("skipping <circle> with missing or invalid r");
        return None;
    };
    Some(Shape::Circle(Circle {
        cx: attr_or_zero(attrs, "cx"),
        cy: attr_or_zero(attrs, "cy"),
        r,
        style: extract_style(attrs),
    }))
}

fn parse_ellipse(attrs: &HashMap<String, String>) -> Option<Shape> {
    let (Some(rx), Some(ry)) = (attr_length(attrs, "rx"), attr_length(attrs, "ry")) else {
        warn!("skipping <ellipse> with missing or invalid rx/ry");
        return None;
    };
    Some(Shape::Ellipse(Ellipse {
        cx: attr_or_zero(attrs, "cx"),
        cy: attr_or_zero(attrs, "cy"),
        rx,
        ry,
        style: extract_style(attrs),
    }))
}

fn parse_line(attrs: &HashMap<String, String>) -> Shape {
    Shape::Line(Line {
        x1: attr_or_zero(attrs, "x1"),
        y1: attr_or_zero(attrs, "y1"),
        x2: attr_or_zero(attrs, "x2"),
        y2: attr_or_zero(attrs, "y2"),
        style: extract_style(attrs),
    })
}

fn parse_poly(attrs: &HashMap<String, String>, closed: bool) -> Option<Shape> {
    let tag = if closed { "polygon" } else { "polyline" };
    let points = parse_points(attrs.get("points").map(String::as_str).unwrap_or(""));
    if points.len() < 2 {
        warn!("skipping <{tag}> with fewer than 2 points");
        return None;
    }
    let style = extract_style(attrs);
    if closed {
        Some(Shape::Polygon(Polygon { points, style }))
    } else {
        Some(Shape::Polyline(Polyline { points, style }))
    }
}

fn parse_path_element(attrs: &HashMap<String, String>) -> Option<Shape> {
    let segments = parse_path_data(attrs.get("d").map(String::as_str).unwrap_or(""));
    if segments.is_empty() {
        warn!("skipping <path> with no straight-line segments");
        return None;
    }
    Some(Shape::Path(Path {
        segments,
        style: extract_style(attrs),
    }))
}

fn build_text(attrs: &HashMap<String, String>, content: String) -> Shape {
    let inline = attrs
        .get("style")
        .map(|s| parse_style_attr(s))
        .unwrap_or_default();
    let lookup = |key: &str| attrs.get(key).or_else(|| inline.get(key));

    Shape::Text(Text {
        x: attr_or_zero(attrs, "x"),
        y: attr_or_zero(attrs, "y"),
        content,
        font_family: lookup("font-family").cloned(),
        font_size: lookup("font-size").and_then(|v| parse_length(v)),
        style: extract_style(attrs),
    })
}
