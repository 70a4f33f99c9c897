//! One heading and one field table per schema section.

use crate::color::Rgb;
use crate::model::{Block, Cell, Padding, Rule, TableBlock, TableStyle, TextBlock, TextRole};
use crate::payload::{Payload, Section};
use crate::style::{StyleContext, GRID, INK};

pub const COLUMN_WIDTHS_MM: [f64; 2] = [70.0, 110.0];

const HEADING_GAP_PT: f64 = 4.0;
const SECTION_GAP_PT: f64 = 10.0;

/// Builds the blocks of every section, in schema order.
pub fn build_sections(payload: &Payload, ctx: &StyleContext) -> Vec<Block> {
    let style = section_table_style(ctx.primary_color());
    payload
        .schema
        .sections
        .iter()
        .flat_map(|section| section_blocks(section, payload, ctx.language(), &style))
        .collect()
}

fn section_blocks(
    section: &Section,
    payload: &Payload,
    language: &str,
    style: &TableStyle,
) -> [Block; 4] {
    let heading = TextBlock::plain(section.title.resolve(language), TextRole::Heading3)
        .as_outline_entry();

    let rows = section.fields.iter().map(|field| {
        vec![
            Cell::text(field.label.resolve(language)),
            Cell::text(field.value(&payload.data).display()),
        ]
    });
    let table = TableBlock::new(COLUMN_WIDTHS_MM, style.clone())
        .with_row(vec![Cell::text("Field"), Cell::text("Value")])
        .with_rows(rows);

    [
        Block::Text(heading),
        Block::spacer(HEADING_GAP_PT),
        Block::Table(table),
        Block::spacer(SECTION_GAP_PT),
    ]
}

fn section_table_style(primary: Rgb) -> TableStyle {
    let hairline = Rule::new(0.25, GRID);
    TableStyle {
        padding: Padding::symmetric(4.0, 6.0),
        text_color: Some(INK),
        header_background: Some(primary),
        header_text_color: Some(Rgb::WHITE),
        inner_grid: Some(hairline),
        outer_box: Some(hairline),
        ..TableStyle::default()
    }
}
