use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the conversion entry points.
///
/// Shape-level problems (missing attributes, unsupported path commands) are
/// never errors; they are recovered by skipping the shape and logging a
/// warning. Only document-level failures end up here.
#[derive(Debug, Error)]
pub enum Error {
    /// The input file is missing or unreadable.
    #[error("cannot read input file '{}': {source}", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not well-formed XML.
    #[error("invalid SVG: {0}")]
    MalformedSource(#[from] quick_xml::Error),

    /// The output file could not be created or written.
    #[error("cannot write output file '{}': {source}", path.display())]
    UnwritableDestination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Assembling the PPTX ZIP container failed.
    #[error("failed to assemble PPTX archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, Error>;
