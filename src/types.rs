use crate::style::Style;

/// 2D point in SVG user units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A run of straight line segments from a path `d` attribute.
///
/// One segment per `M`/`m` subpath; `closed` is set by a trailing `Z`/`z`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl PathSegment {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            closed: false,
        }
    }
}

/// Rectangle shape, optionally with rounded corners
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rx: f64,
    pub ry: f64,
    pub style: Style,
}

/// Circle shape
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub style: Style,
}

/// Ellipse shape
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
    pub style: Style,
}

/// Straight line between two endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub style: Style,
}

/// Open vertex chain
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub style: Style,
}

/// Closed vertex chain (implicit edge back to the first vertex)
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point>,
    pub style: Style,
}

/// Path reduced to its straight-line subpaths
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub segments: Vec<PathSegment>,
    pub style: Style,
}

/// Text element with its anchor position and verbatim content
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub style: Style,
}

/// All supported shape kinds
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect(Rect),
    Circle(Circle),
    Ellipse(Ellipse),
    Line(Line),
    Polyline(Polyline),
    Polygon(Polygon),
    Path(Path),
    Text(Text),
}

impl Shape {
    pub fn style(&self) -> &Style {
        match self {
            Shape::Rect(s) => &s.style,
            Shape::Circle(s) => &s.style,
            Shape::Ellipse(s) => &s.style,
            Shape::Line(s) => &s.style,
            Shape::Polyline(s) => &s.style,
            Shape::Polygon(s) => &s.style,
            Shape::Path(s) => &s.style,
            Shape::Text(s) => &s.style,
        }
    }
}

/// Parsed SVG document: declared size (px) and shapes in source order
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub shapes: Vec<Shape>,
}
