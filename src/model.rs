//! Backend-agnostic description of the document layout.
//!
//! The builders emit [`Block`] sequences made of these types. They carry no
//! `genpdf` values, so the layout can be inspected in tests and only touches the
//! rendering crate once [`crate::render`] converts it.

use std::path::PathBuf;

use crate::color::Rgb;

/// Typographic role of a piece of text, resolved against the style sheet at
/// render time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextRole {
    /// Large centered text.
    Title,
    /// Heading used in the page header.
    Heading2,
    /// Heading above each form section.
    Heading3,
    /// Regular body and table text.
    #[default]
    Body,
    /// Fine print such as the footer note.
    Small,
}

/// A paragraph rendered verbatim in the style of its role.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextBlock {
    text: String,
    role: TextRole,
    outline: bool,
}

impl TextBlock {
    pub fn plain(text: impl Into<String>, role: TextRole) -> Self {
        Self {
            text: text.into(),
            role,
            outline: false,
        }
    }

    pub fn role(&self) -> TextRole {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the paragraph is listed in the document outline.
    pub fn is_outline_entry(&self) -> bool {
        self.outline
    }

    /// Marks the paragraph as an outline (bookmark) target.
    pub fn as_outline_entry(mut self) -> Self {
        self.outline = true;
        self
    }
}

/// An image drawn at a fixed size.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBlock {
    path: PathBuf,
    width_mm: f64,
    height_mm: f64,
}

impl ImageBlock {
    pub fn new(path: impl Into<PathBuf>, width_mm: f64, height_mm: f64) -> Self {
        Self {
            path: path.into(),
            width_mm,
            height_mm,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub fn width_mm(&self) -> f64 {
        self.width_mm
    }

    pub fn height_mm(&self) -> f64 {
        self.height_mm
    }
}

/// Content of a single table cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(TextBlock),
    Image(ImageBlock),
}

impl Cell {
    /// Body text cell.
    pub fn text(text: impl Into<String>) -> Self {
        Cell::Text(TextBlock::plain(text, TextRole::Body))
    }

    /// Displayed text of the cell; images have none.
    pub fn content(&self) -> String {
        match self {
            Cell::Text(text) => text.text().to_owned(),
            Cell::Image(_) => String::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Middle,
}

/// Cell padding in points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub fn uniform(points: f64) -> Self {
        Self::symmetric(points, points)
    }

    pub fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}

/// A stroked line with a width in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rule {
    pub width_pt: f64,
    pub color: Rgb,
}

impl Rule {
    pub fn new(width_pt: f64, color: Rgb) -> Self {
        Self { width_pt, color }
    }
}

/// Visual treatment of a table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableStyle {
    pub vertical_alignment: VerticalAlignment,
    pub padding: Padding,
    /// Text color of every cell not covered by `header_text_color`.
    pub text_color: Option<Rgb>,
    /// Background of the first row.
    pub header_background: Option<Rgb>,
    /// Text color of the first row.
    pub header_text_color: Option<Rgb>,
    /// Background of the first column.
    pub label_background: Option<Rgb>,
    /// Lines between cells.
    pub inner_grid: Option<Rule>,
    /// Outline around the table.
    pub outer_box: Option<Rule>,
    /// Line under every row.
    pub line_below: Option<Rule>,
    /// Line over the first row.
    pub line_above: Option<Rule>,
}

/// A table with fixed column widths in millimetres.
#[derive(Clone, Debug, PartialEq)]
pub struct TableBlock {
    column_widths_mm: Vec<f64>,
    rows: Vec<Vec<Cell>>,
    style: TableStyle,
}

impl TableBlock {
    pub fn new(column_widths_mm: impl Into<Vec<f64>>, style: TableStyle) -> Self {
        Self {
            column_widths_mm: column_widths_mm.into(),
            rows: Vec::new(),
            style,
        }
    }

    /// Appends a row and returns the updated table.
    pub fn with_row(mut self, row: impl Into<Vec<Cell>>) -> Self {
        self.rows.push(row.into());
        self
    }

    /// Appends rows and returns the updated table.
    pub fn with_rows<I>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<Cell>>,
    {
        self.rows.extend(rows);
        self
    }

    pub fn column_widths_mm(&self) -> &[f64] {
        &self.column_widths_mm
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn style(&self) -> &TableStyle {
        &self.style
    }

    /// Displayed text of every cell, row by row.
    pub fn texts(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(Cell::content).collect())
            .collect()
    }
}

/// A unit of layout; documents are ordered concatenations of blocks.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Text(TextBlock),
    Table(TableBlock),
    /// Vertical gap in points.
    Spacer(f64),
}

impl Block {
    pub fn spacer(points: f64) -> Self {
        Block::Spacer(points)
    }

    pub fn as_text(&self) -> Option<&TextBlock> {
        match self {
            Block::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableBlock> {
        match self {
            Block::Table(table) => Some(table),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_texts_follow_row_order() {
        let table = TableBlock::new(vec![70.0, 110.0], TableStyle::default())
            .with_row(vec![Cell::text("Field"), Cell::text("Value")])
            .with_row(vec![
                Cell::Image(ImageBlock::new("logo.png", 40.0, 18.0)),
                Cell::text("x"),
            ]);

        assert_eq!(
            table.texts(),
            vec![vec!["Field", "Value"], vec!["", "x"]]
        );
    }

    #[test]
    fn outline_flag_is_opt_in() {
        let heading = TextBlock::plain("Identity", TextRole::Heading3);
        assert!(!heading.is_outline_entry());
        assert!(heading.as_outline_entry().is_outline_entry());
    }
}
