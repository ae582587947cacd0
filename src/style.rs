//! Presentation attributes shared by all shapes: fill, stroke and opacity.
//!
//! Colors are normalized to lowercase `#rrggbb`. `fill="none"`, an absent
//! attribute and an unrecognized value all end up as `None`. Only inline
//! `style="k:v;..."` declarations are merged; stylesheets and cascading are
//! out of scope.

use std::collections::HashMap;

use log::warn;

use crate::units::parse_length;

/// Styling carried by every parsed shape
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: f64,
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            opacity: 1.0,
        }
    }
}

/// Normalize a color value to `#rrggbb`, or `None` for "none"/empty.
///
/// Handles a small set of keyword colors, `#rrggbb`, `#rgb` and `rgb(r,g,b)`.
/// Anything else is treated as no paint, so a bad value never reaches the
/// generated XML.
pub fn parse_color(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let named = match value.to_ascii_lowercase().as_str() {
        "black" => "#000000",
        "white" => "#ffffff",
        "red" => "#ff0000",
        "green" => "#008000",
        "blue" => "#0000ff",
        "yellow" => "#ffff00",
        "cyan" => "#00ffff",
        "magenta" => "#ff00ff",
        "none" => return None,
        _ => value,
    };

    if let Some(hex) = named.strip_prefix('#') {
        if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Some(format!("#{}", hex.to_ascii_lowercase()));
        }
        // #rgb shorthand
        if hex.len() == 3 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            let expanded: String = hex
                .chars()
                .flat_map(|c| [c.to_ascii_lowercase(), c.to_ascii_lowercase()])
                .collect();
            return Some(format!("#{}", expanded));
        }
        warn!("ignoring unrecognized color '{value}'");
        return None;
    }

    if named.starts_with("rgb") {
        let channels: Vec<u8> = named
            .trim_start_matches("rgb")
            .trim_start_matches('(')
            .trim_end_matches(')')
            .split(',')
            .filter_map(|part| part.trim().parse().ok())
            .collect();
        if channels.len() == 3 {
            return Some(format!(
                "#{:02x}{:02x}{:02x}",
                channels[0], channels[1], channels[2]
            ));
        }
    }

    warn!("ignoring unrecognized color '{value}'");
    None
}

/// Split an inline `style` attribute into its declarations
pub fn parse_style_attr(style: &str) -> HashMap<String, String> {
    let mut declarations = HashMap::new();
    for decl in style.split(';') {
        if let Some((key, value)) = decl.split_once(':') {
            declarations.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    declarations
}

/// Build a `Style` from an element's attributes.
///
/// The bare presentation attribute takes precedence over the same key in the
/// inline `style` declaration.
pub fn extract_style(attrs: &HashMap<String, String>) -> Style {
    let inline = attrs
        .get("style")
        .map(|s| parse_style_attr(s))
        .unwrap_or_default();
    let lookup = |key: &str| attrs.get(key).or_else(|| inline.get(key));

    Style {
        fill: lookup("fill").and_then(|v| parse_color(v)),
        stroke: lookup("stroke").and_then(|v| parse_color(v)),
        stroke_width: lookup("stroke-width")
            .and_then(|v| parse_length(v))
            .unwrap_or(1.0),
        opacity: lookup("opacity")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(1.0),
    }
}
