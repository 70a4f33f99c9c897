//! Per-render document style context.

use genpdf::style::Style;
use genpdf::Alignment;

use crate::color::Rgb;
use crate::defaults;
use crate::error::Result;
use crate::fonts::{self, FontSource};
use crate::model::TextRole;
use crate::options::RenderOptions;
use crate::payload::Payload;

/// Dark body text.
pub const INK: Rgb = Rgb(0x0f, 0x17, 0x2a);
/// Shading of the metadata label column.
pub const SAND: Rgb = Rgb(0xf6, 0xf3, 0xef);
/// Hairline grid between table cells.
pub const GRID: Rgb = Rgb(0xe2, 0xd6, 0xc6);
/// Outer rules around metadata and signatures.
pub const RULE: Rgb = Rgb(0xd7, 0xcf, 0xc3);

/// Font settings of a [`TextRole`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font_size: u8,
    pub alignment: Alignment,
}

impl TextStyle {
    /// Style sheet used for every document.
    ///
    /// Every role uses the regular face of the document font; roles differ in size
    /// and alignment only.
    pub fn for_role(role: TextRole) -> Self {
        let (font_size, alignment) = match role {
            TextRole::Title => (18, Alignment::Center),
            TextRole::Heading2 => (14, Alignment::Left),
            TextRole::Heading3 => (12, Alignment::Left),
            TextRole::Body => (10, Alignment::Left),
            TextRole::Small => (9, Alignment::Left),
        };
        Self {
            font_size,
            alignment,
        }
    }

    /// The `genpdf` style for this role, optionally colored.
    pub fn to_style(self, color: Option<Rgb>) -> Style {
        let mut style = Style::new().with_font_size(self.font_size);
        if let Some(color) = color {
            style.set_color(color.into());
        }
        style
    }
}

/// Everything the builders and the renderer share for one document.
///
/// The context is created once per render; the selected font lives here instead of
/// in any process-wide registry.
#[derive(Clone, Debug)]
pub struct StyleContext {
    font: FontSource,
    primary_color: Rgb,
    language: String,
}

impl StyleContext {
    /// Resolves font, primary color and language for `payload`.
    ///
    /// Fails only when `primary_color` is present but not a valid hex color.
    pub fn new(payload: &Payload, options: &RenderOptions) -> Result<Self> {
        let color = defaults::resolve_with_default(
            payload.branding.primary_color.as_deref(),
            defaults::PRIMARY_COLOR,
            defaults::non_empty,
        );
        let language = options.language().unwrap_or_else(|| payload.language());

        Ok(Self {
            font: fonts::select_font_source(&payload.branding),
            primary_color: Rgb::parse_hex(color)?,
            language: language.to_owned(),
        })
    }

    /// Name of the resolved document font.
    pub fn font_name(&self) -> &'static str {
        self.font.name()
    }

    pub fn font(&self) -> &FontSource {
        &self.font
    }

    pub fn primary_color(&self) -> Rgb {
        self.primary_color
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}
