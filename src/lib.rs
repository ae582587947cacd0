//! # svg2pptx
//!
//! Convert SVG drawings into single-slide PowerPoint presentations.
//!
//! A constrained subset of SVG is supported: `rect`, `circle`, `ellipse`,
//! `line`, `polyline`, `polygon`, `text` and `path` elements whose `d`
//! attribute uses straight-line commands (`M`/`L`/`H`/`V`/`Z`). Each shape
//! becomes one drawable on a slide sized to the SVG's declared dimensions.
//!
//! ## Example
//!
//! ```rust,ignore
//! use svg2pptx::{build_presentation, parse_svg};
//!
//! let document = parse_svg("drawing.svg")?;
//! build_presentation(&document, "drawing.pptx")?;
//! ```
//!
//! The two steps are independent; the parsed [`Document`] can be inspected
//! before building.

pub mod error;
pub mod parser;
pub mod path;
pub mod pptx;
pub mod style;
pub mod types;
pub mod units;

// Re-export the main public API
pub use error::{Error, Result};
pub use parser::{parse_svg, parse_svg_str};
pub use pptx::build_presentation;
pub use types::{Document, Shape};
