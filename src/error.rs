//! Error type shared by every stage of the rendering pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures of a render.
///
/// Missing optional inputs never show up here; they are replaced by defaults in the
/// builders. Only unreadable input, malformed JSON and backend failures abort a run.
#[derive(Debug, Error)]
pub enum Error {
    /// The payload file could not be read.
    #[error("failed to read payload {}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The payload is not valid JSON or not a JSON object.
    #[error("failed to parse payload")]
    ParsePayload(#[from] serde_json::Error),

    /// A color string could not be turned into an RGB value.
    #[error("invalid color {value:?}: {reason}")]
    InvalidColor { value: String, reason: &'static str },

    /// Neither the brand font nor the standard font metrics could be loaded.
    #[error("no usable font: {0}")]
    Font(String),

    /// The logo exists on disk but could not be decoded.
    #[error("failed to load logo image {}", path.display())]
    Logo {
        path: PathBuf,
        #[source]
        source: genpdf::error::Error,
    },

    /// The layout engine rejected the document.
    #[error("failed to render PDF")]
    Render(#[from] genpdf::error::Error),

    /// The rendered PDF could not be written.
    #[error("failed to write PDF to {}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Section outlines could not be embedded into the rendered PDF.
    #[cfg(feature = "bookmarks")]
    #[error("failed to add section bookmarks")]
    Bookmarks(#[from] crate::bookmarks::BookmarkError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
