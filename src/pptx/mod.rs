//! PPTX generation from a parsed [`Document`].
//!
//! [`slide`] turns the shape list into the DrawingML slide part; [`package`]
//! wraps it in the OPC container. The public entry point is
//! [`build_presentation`].

pub mod package;
pub mod slide;

use std::fs;
use std::path::Path as FsPath;

use crate::error::{Error, Result};
use crate::types::Document;

pub use slide::{DEFAULT_SLIDE_CX, DEFAULT_SLIDE_CY};

/// Build a single-slide PPTX for `document` at `output_path`.
///
/// The package is assembled fully in memory and written with one filesystem
/// write, overwriting any existing file. An unwritable destination leaves no
/// partial output behind.
pub fn build_presentation(document: &Document, output_path: impl AsRef<FsPath>) -> Result<()> {
    let output_path = output_path.as_ref();
    let (slide_cx, slide_cy) = slide::slide_size(document);
    let slide_xml = slide::slide_xml(document);
    let bytes = package::assemble(&slide_xml, slide_cx, slide_cy)?;

    fs::write(output_path, bytes).map_err(|source| Error::UnwritableDestination {
        path: output_path.to_path_buf(),
        source,
    })
}
