//! Document construction for the KYC renderer.

use genpdf::error::Error;
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style;
use genpdf::{self, Margins, PageDecorator, Size};

use crate::elements::PageTracker;

/// Base font size of the document; text roles override it.
const BASE_FONT_SIZE: u8 = 10;

/// Builder for `genpdf::Document` instances with page tracking.
#[derive(Default)]
pub struct DocumentBuilder {
    title: Option<String>,
    paper_size: Option<Size>,
    margins: Option<Margins>,
    pages: PageTracker,
}

impl DocumentBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title stored in the PDF metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the paper size used for newly created documents.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = Some(paper_size.into());
        self
    }

    /// Sets the margins applied through the page decorator.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = Some(margins.into());
        self
    }

    /// Page counter advanced by the decorator for every new page.
    pub fn pages(&self) -> &PageTracker {
        &self.pages
    }

    /// Builds a `genpdf::Document` that uses `font_family`.
    pub fn build(self, font_family: FontFamily<FontData>) -> genpdf::Document {
        let mut document = genpdf::Document::new(font_family);
        document.set_font_size(BASE_FONT_SIZE);

        if let Some(title) = self.title {
            document.set_title(title);
        }
        if let Some(paper_size) = self.paper_size {
            document.set_paper_size(paper_size);
        }

        document.set_page_decorator(ConfiguredPageDecorator::new(self.margins, self.pages));
        document
    }
}

struct ConfiguredPageDecorator {
    margins: Option<Margins>,
    pages: PageTracker,
}

impl ConfiguredPageDecorator {
    fn new(margins: Option<Margins>, pages: PageTracker) -> Self {
        Self { margins, pages }
    }
}

impl PageDecorator for ConfiguredPageDecorator {
    fn decorate_page<'a>(
        &mut self,
        _context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        _style: style::Style,
    ) -> Result<genpdf::render::Area<'a>, Error> {
        self.pages.advance();

        if let Some(margins) = self.margins {
            area.add_margins(margins);
        }

        Ok(area)
    }
}
