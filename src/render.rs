//! Conversion of layout blocks into `genpdf` elements.

use genpdf::elements::Paragraph;
use genpdf::style::{Style, StyledString};

use crate::color::Rgb;
use crate::elements::{FixedSizeImage, GridCell, GridTable, PageMarker, PageSlot, PageTracker, VerticalGap};
use crate::error::{Error, Result};
use crate::model::{Block, Cell, TableBlock, TextBlock};
use crate::style::TextStyle;

/// An outline entry whose page becomes known once the document has been rendered.
pub struct OutlineTarget {
    pub title: String,
    pub page: PageSlot,
}

impl OutlineTarget {
    pub fn page(&self) -> Option<usize> {
        self.page.get()
    }
}

/// Pushes `blocks` onto `document` in order.
///
/// Outline headings are wrapped so that their page is recorded through `pages`; the
/// returned targets follow block order.
pub fn push_blocks(
    document: &mut genpdf::Document,
    blocks: &[Block],
    pages: &PageTracker,
) -> Result<Vec<OutlineTarget>> {
    let mut targets = Vec::new();

    for block in blocks {
        match block {
            Block::Text(text) if text.is_outline_entry() => {
                let marker = PageMarker::new(paragraph(text), pages.clone());
                targets.push(OutlineTarget {
                    title: text.text().to_owned(),
                    page: marker.slot(),
                });
                document.push(marker);
            }
            Block::Text(text) => document.push(paragraph(text)),
            Block::Table(table) => document.push(grid_table(table)?),
            Block::Spacer(points) => document.push(VerticalGap::from_points(*points)),
        }
    }

    Ok(targets)
}

fn styled_string(text: &TextBlock, color: Option<Rgb>) -> StyledString {
    let style = TextStyle::for_role(text.role()).to_style(color);
    StyledString::new(text.text(), style)
}

fn paragraph(text: &TextBlock) -> Paragraph {
    let mut paragraph = Paragraph::default();
    paragraph.push(styled_string(text, None));
    paragraph.set_alignment(TextStyle::for_role(text.role()).alignment);
    paragraph
}

/// Builds the table element, loading every image cell.
pub fn grid_table(table: &TableBlock) -> Result<GridTable> {
    let style = table.style();
    let mut grid = GridTable::new(table.column_widths_mm().to_vec(), style.clone());

    for (index, row) in table.rows().iter().enumerate() {
        let color = match style.header_text_color {
            Some(header) if index == 0 => Some(header),
            _ => style.text_color,
        };
        let cells = row
            .iter()
            .map(|cell| grid_cell(cell, color))
            .collect::<Result<Vec<_>>>()?;
        grid.push_row(cells);
    }

    Ok(grid)
}

fn grid_cell(cell: &Cell, color: Option<Rgb>) -> Result<GridCell> {
    match cell {
        Cell::Text(text) => {
            let text_style = TextStyle::for_role(text.role());
            Ok(GridCell::Text {
                strings: vec![styled_string(text, color)],
                style: Style::new().with_font_size(text_style.font_size),
                alignment: text_style.alignment,
            })
        }
        Cell::Image(image) => {
            let element = FixedSizeImage::from_path(image.path(), image.width_mm(), image.height_mm())
                .map_err(|source| Error::Logo {
                    path: image.path().to_path_buf(),
                    source,
                })?;
            Ok(GridCell::Image(element))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImageBlock, TableStyle, TextRole};
    use crate::style::INK;

    #[test]
    fn role_style_is_applied_to_verbatim_text() {
        let text = TextBlock::plain("Identity **check**", TextRole::Heading3);
        let string = styled_string(&text, Some(INK));
        assert_eq!(string.s, "Identity **check**");
        assert_eq!(string.style.font_size(), 12);
        assert!(!string.style.is_bold());
        assert_eq!(string.style.color(), Some(INK.into()));
    }

    #[test]
    fn body_text_keeps_the_cell_color() {
        let string = styled_string(&TextBlock::plain("Alice", TextRole::Body), None);
        assert_eq!(string.style.font_size(), 10);
        assert_eq!(string.style.color(), None);
    }

    #[test]
    fn undecodable_logo_is_fatal() {
        let logo = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .expect("temp logo");
        std::fs::write(logo.path(), b"not an image").expect("write logo");

        let table = TableBlock::new(vec![60.0, 120.0], TableStyle::default()).with_row(vec![
            Cell::Image(ImageBlock::new(logo.path(), 40.0, 18.0)),
            Cell::text("Header"),
        ]);
        match grid_table(&table) {
            Err(Error::Logo { path, .. }) => assert_eq!(path, logo.path()),
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("corrupt logo must fail"),
        }
    }
}
