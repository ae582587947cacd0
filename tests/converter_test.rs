use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use svg2pptx::{Error, build_presentation, parse_svg, parse_svg_str};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Convert a fixture SVG into a temp PPTX and return the output bytes
fn convert_fixture(name: &str) -> Vec<u8> {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join(format!("{name}.pptx"));
    let document = parse_svg(fixture_path(&format!("{name}.svg")))
        .unwrap_or_else(|e| panic!("Failed to parse {name}: {e}"));
    build_presentation(&document, &output_path)
        .unwrap_or_else(|e| panic!("Failed to build {name}: {e}"));
    fs::read(&output_path).expect("Failed to read output")
}

/// Convert inline SVG source and return the output bytes
fn convert_str(svg: &str) -> Vec<u8> {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("out.pptx");
    let document = parse_svg_str(svg).expect("Failed to parse inline SVG");
    build_presentation(&document, &output_path).expect("Failed to build presentation");
    fs::read(&output_path).expect("Failed to read output")
}

fn read_part(pptx: &[u8], part: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(pptx.to_vec())).expect("Not a valid ZIP");
    let mut content = String::new();
    archive
        .by_name(part)
        .unwrap_or_else(|_| panic!("Missing part {part}"))
        .read_to_string(&mut content)
        .expect("Part is not UTF-8");
    content
}

fn slide_part(pptx: &[u8]) -> String {
    read_part(pptx, "ppt/slides/slide1.xml")
}

fn drawable_count(slide: &str) -> usize {
    slide.matches("<p:sp>").count() + slide.matches("<p:cxnSp>").count()
}

#[test]
fn test_simple_shapes_conversion() {
    let pptx = convert_fixture("simple_shapes");
    let slide = slide_part(&pptx);

    assert_eq!(drawable_count(&slide), 3);

    // rect at (10,10) 60x40, red fill
    assert!(slide.contains("<a:prstGeom prst=\"rect\">"));
    assert!(slide.contains("<a:off x=\"95250\" y=\"95250\"/>"));
    assert!(slide.contains("<a:ext cx=\"571500\" cy=\"381000\"/>"));
    assert!(slide.contains("<a:srgbClr val=\"FF0000\"/>"));

    // circle (cx=120, cy=40, r=25) framed at (95,15), 50x50
    assert!(slide.contains("<a:prstGeom prst=\"ellipse\">"));
    assert!(slide.contains("<a:off x=\"904875\" y=\"142875\"/>"));
    assert!(slide.contains("<a:ext cx=\"476250\" cy=\"476250\"/>"));
    assert!(slide.contains("<a:srgbClr val=\"008000\"/>"));

    // blue line, 2px stroke
    assert!(slide.contains("<a:prstGeom prst=\"line\">"));
    assert!(slide.contains("<a:ln w=\"19050\"><a:solidFill><a:srgbClr val=\"0000FF\"/>"));
}

#[test]
fn test_slide_size_matches_document() {
    let pptx = convert_fixture("simple_shapes");
    let presentation = read_part(&pptx, "ppt/presentation.xml");
    // 200x150 px at 9525 EMU/px
    assert!(presentation.contains("<p:sldSz cx=\"1905000\" cy=\"1428750\"/>"));
}

#[test]
fn test_package_has_required_parts() {
    let pptx = convert_fixture("simple_shapes");
    let mut archive = ZipArchive::new(Cursor::new(pptx)).unwrap();
    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "ppt/presentation.xml",
        "ppt/_rels/presentation.xml.rels",
        "ppt/slideMasters/slideMaster1.xml",
        "ppt/slideLayouts/slideLayout1.xml",
        "ppt/theme/theme1.xml",
        "ppt/slides/slide1.xml",
        "ppt/slides/_rels/slide1.xml.rels",
    ] {
        assert!(archive.by_name(part).is_ok(), "missing part {part}");
    }
}

#[test]
fn test_text_conversion() {
    let pptx = convert_fixture("text");
    let slide = slide_part(&pptx);

    assert_eq!(drawable_count(&slide), 1);
    assert!(slide.contains("<a:t>Hello SVG Text</a:t>"));
    assert!(slide.contains("<a:srgbClr val=\"333333\"/>"));
    // 16px -> 12pt -> sz="1200"
    assert!(slide.contains(" sz=\"1200\""));
    assert!(slide.contains("<a:latin typeface=\"Arial\"/>"));
    // anchored at (20,40), fixed 200x80 px frame
    assert!(slide.contains("<a:off x=\"190500\" y=\"381000\"/>"));
    assert!(slide.contains("<a:ext cx=\"1905000\" cy=\"762000\"/>"));
}

#[test]
fn test_path_conversion() {
    let pptx = convert_fixture("path");
    let slide = slide_part(&pptx);

    assert_eq!(drawable_count(&slide), 1);
    assert!(slide.contains("<a:custGeom>"));
    assert!(slide.contains("<a:close/>"));
    assert!(slide.contains("<a:srgbClr val=\"FFAA00\"/>"));
    assert!(slide.contains("<a:srgbClr val=\"333333\"/>"));
    // frame starts at the path's minimum corner (10,10)
    assert!(slide.contains("<a:off x=\"95250\" y=\"95250\"/>"));
}

#[test]
fn test_polygon_closes_polyline_does_not() {
    let polygon = convert_str(
        r#"<svg width="20" height="20"><polygon points="0,0 10,0 10,10" fill="black"/></svg>"#,
    );
    let polyline = convert_str(
        r#"<svg width="20" height="20"><polyline points="0,0 10,0 10,10" stroke="black"/></svg>"#,
    );

    let closed = slide_part(&polygon);
    let open = slide_part(&polyline);

    assert_eq!(closed.matches("<a:moveTo>").count(), 1);
    assert_eq!(closed.matches("<a:lnTo>").count(), 2);
    assert!(closed.contains("<a:close/>"));

    assert_eq!(open.matches("<a:lnTo>").count(), 2);
    assert!(!open.contains("<a:close/>"));
}

#[test]
fn test_curve_command_truncates_path() {
    let pptx = convert_str(
        r#"<svg width="50" height="50"><path d="M0,0 L10,0 V10 C20,20 30,30 40,40" stroke="black"/></svg>"#,
    );
    let slide = slide_part(&pptx);

    // Only the straight prefix (0,0) (10,0) (10,10) survives
    assert_eq!(drawable_count(&slide), 1);
    assert_eq!(slide.matches("<a:moveTo>").count(), 1);
    assert_eq!(slide.matches("<a:lnTo>").count(), 2);
    assert!(!slide.contains("<a:close/>"));
    assert!(slide.contains("<a:path w=\"95250\" h=\"95250\">"));
}

#[test]
fn test_missing_size_uses_fallback_slide() {
    let pptx = convert_str(r#"<svg><rect width="10" height="10"/></svg>"#);
    let presentation = read_part(&pptx, "ppt/presentation.xml");
    assert!(presentation.contains("<p:sldSz cx=\"9144000\" cy=\"6858000\"/>"));
}

#[test]
fn test_view_box_size_fallback() {
    let pptx = convert_str(r#"<svg viewBox="0 0 320 240"><rect width="10" height="10"/></svg>"#);
    let presentation = read_part(&pptx, "ppt/presentation.xml");
    assert!(presentation.contains("<p:sldSz cx=\"3048000\" cy=\"2286000\"/>"));
}

#[test]
fn test_drawable_count_matches_recognized_shapes() {
    let pptx = convert_str(
        r#"<svg width="100" height="100">
  <rect width="10" height="10"/>
  <circle r="5"/>
  <ellipse rx="4" ry="3"/>
  <line x1="0" y1="0" x2="10" y2="10"/>
  <polygon points="0,0 5,0 5,5"/>
  <g><rect width="99" height="99"/></g>
  <circle cx="1" cy="1"/>
</svg>"#,
    );
    // 5 attribute-complete top-level shapes; the grouped rect and the
    // radius-less circle are not mapped
    assert_eq!(drawable_count(&slide_part(&pptx)), 5);
}

#[test]
fn test_missing_input_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("does_not_exist.svg");
    let output = dir.path().join("out.pptx");

    let err = parse_svg(&input).unwrap_err();
    assert!(matches!(err, Error::InputNotFound { .. }));
    assert!(!output.exists());
}

#[test]
fn test_unwritable_destination() {
    let document = parse_svg(fixture_path("simple_shapes.svg")).unwrap();
    let err = build_presentation(&document, "/nonexistent-dir/out.pptx").unwrap_err();
    assert!(matches!(err, Error::UnwritableDestination { .. }));
}

#[test]
fn test_output_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.pptx");
    fs::write(&output, b"stale").unwrap();

    let document = parse_svg(fixture_path("simple_shapes.svg")).unwrap();
    build_presentation(&document, &output).unwrap();

    let bytes = fs::read(&output).unwrap();
    assert!(ZipArchive::new(Cursor::new(bytes)).is_ok());
}
