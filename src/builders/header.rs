//! Page header: logo (or fund manager label) next to the document heading.

use std::path::Path;

use log::debug;

use crate::defaults;
use crate::model::{
    Block, Cell, ImageBlock, Padding, Rule, TableBlock, TableStyle, TextBlock, TextRole,
    VerticalAlignment,
};
use crate::payload::Branding;
use crate::style::StyleContext;

pub const LOGO_WIDTH_MM: f64 = 40.0;
pub const LOGO_HEIGHT_MM: f64 = 18.0;
pub const COLUMN_WIDTHS_MM: [f64; 2] = [60.0, 120.0];

const RULE_WIDTH_PT: f64 = 1.0;
const BOTTOM_PADDING_PT: f64 = 12.0;
const GAP_AFTER_PT: f64 = 8.0;

/// Returns the header table followed by a gap.
pub fn build_header(branding: &Branding, ctx: &StyleContext) -> Vec<Block> {
    let style = TableStyle {
        vertical_alignment: VerticalAlignment::Middle,
        padding: Padding {
            top: 3.0,
            right: 6.0,
            bottom: BOTTOM_PADDING_PT,
            left: 6.0,
        },
        line_below: Some(Rule::new(RULE_WIDTH_PT, ctx.primary_color())),
        ..TableStyle::default()
    };

    let table = TableBlock::new(COLUMN_WIDTHS_MM, style)
        .with_row(vec![logo_cell(branding), heading_cell(branding)]);

    vec![Block::Table(table), Block::spacer(GAP_AFTER_PT)]
}

fn logo_cell(branding: &Branding) -> Cell {
    let logo = branding
        .logo_path
        .as_deref()
        .filter(defaults::non_empty)
        .map(Path::new);

    match logo {
        Some(path) if path.exists() => {
            Cell::Image(ImageBlock::new(path, LOGO_WIDTH_MM, LOGO_HEIGHT_MM))
        }
        _ => {
            if let Some(path) = logo {
                debug!("Logo {} not found; using text label", path.display());
            }
            Cell::Text(TextBlock::plain(defaults::LOGO_LABEL, TextRole::Title))
        }
    }
}

fn heading_cell(branding: &Branding) -> Cell {
    let text = defaults::resolve_with_default(
        branding.header_text.as_deref(),
        defaults::HEADER_TEXT,
        defaults::non_empty,
    );
    Cell::Text(TextBlock::plain(text, TextRole::Heading2))
}
