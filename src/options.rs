//! Render configuration.

use std::path::{Path, PathBuf};

use genpdf::{Margins, PaperSize, Size};

/// Left and right page margin in millimetres.
pub const SIDE_MARGIN_MM: f64 = 16.0;

/// Top and bottom page margin in millimetres.
pub const VERTICAL_MARGIN_MM: f64 = 18.0;

/// Settings that are not part of the payload.
///
/// Defaults produce an A4 document with 16 mm side and 18 mm top/bottom margins,
/// the payload's own language and section bookmarks enabled.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    paper_size: Size,
    margins: Margins,
    language: Option<String>,
    fonts_dir: Option<PathBuf>,
    bookmarks: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4.into(),
            margins: Margins::trbl(
                VERTICAL_MARGIN_MM,
                SIDE_MARGIN_MM,
                VERTICAL_MARGIN_MM,
                SIDE_MARGIN_MM,
            ),
            language: None,
            fonts_dir: None,
            bookmarks: true,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the page size.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = paper_size.into();
        self
    }

    /// Overrides the page margins.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = margins.into();
        self
    }

    /// Renders titles and labels in `language` instead of the payload language.
    pub fn with_language(mut self, language: impl Into<Option<String>>) -> Self {
        self.language = language.into();
        self
    }

    /// Searches `dir` first for the standard font metrics.
    pub fn with_fonts_dir(mut self, dir: impl Into<Option<PathBuf>>) -> Self {
        self.fonts_dir = dir.into();
        self
    }

    /// Enables or disables section bookmarks (only effective with the `bookmarks`
    /// feature).
    pub fn with_bookmarks(mut self, bookmarks: bool) -> Self {
        self.bookmarks = bookmarks;
        self
    }

    pub fn paper_size(&self) -> Size {
        self.paper_size
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn fonts_dir(&self) -> Option<&Path> {
        self.fonts_dir.as_deref()
    }

    pub fn bookmarks(&self) -> bool {
        self.bookmarks
    }
}
