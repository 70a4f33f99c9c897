//! Custom `genpdf` elements used by the KYC document.
//!
//! `genpdf` ships no table with cell backgrounds or colored rules, so [`GridTable`]
//! lays out rows itself: it wraps cell text, paints fills before the content and
//! strokes grid lines afterwards. The remaining elements cover fixed-size logos,
//! vertical gaps and page tracking for section outlines.

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use image::GenericImageView;

use genpdf::elements::{Image, Paragraph};
use genpdf::error::{Context as _, Error};
use genpdf::fonts::FontCache;
use genpdf::style::{Style, StyledString};
use genpdf::{render, Alignment, Element, Margins, Mm, Position, RenderResult, Scale, Size};

use crate::color::Rgb;
use crate::model::{TableStyle, VerticalAlignment};

const DEFAULT_IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;
const PT_PER_INCH: f64 = 72.0;
/// Slack subtracted from line widths so that `Paragraph` never re-wraps a line.
const WRAP_TOLERANCE_MM: f64 = 0.01;

pub(crate) fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

pub(crate) fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

/// Converts typographic points to millimetres.
pub fn pt_to_mm(points: f64) -> f64 {
    points * MM_PER_INCH / PT_PER_INCH
}

fn estimated_image_size(image: &image::DynamicImage, dpi: f64) -> (f64, f64) {
    let (px_width, px_height) = image.dimensions();
    (
        MM_PER_INCH * (px_width as f64) / dpi,
        MM_PER_INCH * (px_height as f64) / dpi,
    )
}

/// Loads an image from the given path using the [`image`] crate with descriptive errors.
pub fn decode_image_from_path(path: impl AsRef<Path>) -> Result<image::DynamicImage, Error> {
    let path = path.as_ref();
    let reader = image::io::Reader::open(path)
        .with_context(|| format!("Failed to open image file {}", path.display()))?;
    reader
        .with_guessed_format()
        .context("Unable to determine image format")?
        .decode()
        .with_context(|| format!("Failed to decode image file {}", path.display()))
}

/// Composites images with an alpha channel onto a white background.
///
/// `genpdf` refuses to embed images with transparency.
pub fn flatten_alpha(image: image::DynamicImage) -> image::DynamicImage {
    if !image.color().has_alpha() {
        return image;
    }

    let rgba = image.to_rgba8();
    let flattened = image::RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = u16::from(a);
        let blend = |channel: u8| ((u16::from(channel) * alpha + 255 * (255 - alpha)) / 255) as u8;
        image::Rgb([blend(r), blend(g), blend(b)])
    });
    image::DynamicImage::ImageRgb8(flattened)
}

/// An image stretched to an exact width and height.
pub struct FixedSizeImage {
    image: Image,
    size: Size,
}

impl FixedSizeImage {
    /// Decodes the image at `path` and scales it to `width_mm` × `height_mm`.
    pub fn from_path(path: impl AsRef<Path>, width_mm: f64, height_mm: f64) -> Result<Self, Error> {
        let dynamic = flatten_alpha(decode_image_from_path(path)?);
        let (natural_width, natural_height) = estimated_image_size(&dynamic, DEFAULT_IMAGE_DPI);

        let mut image = Image::from_dynamic_image(dynamic)?;
        if natural_width > f64::EPSILON && natural_height > f64::EPSILON {
            image.set_scale(Scale::new(
                width_mm / natural_width,
                height_mm / natural_height,
            ));
        }

        Ok(Self {
            image,
            size: Size::new(mm_from_f64(width_mm), mm_from_f64(height_mm)),
        })
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

impl Element for FixedSizeImage {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        self.image.render(context, area, style)
    }
}

/// Empty vertical space.
///
/// A gap that does not fit on the current page is cut off instead of being carried
/// over to the next one.
pub struct VerticalGap {
    height_mm: f64,
}

impl VerticalGap {
    pub fn from_points(points: f64) -> Self {
        Self {
            height_mm: pt_to_mm(points),
        }
    }
}

impl Element for VerticalGap {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let available = mm_to_f64(area.size().height);
        let mut result = RenderResult::default();
        result.size = Size::new(0, mm_from_f64(self.height_mm.min(available).max(0.0)));
        Ok(result)
    }
}

/// Number of the page currently being laid out, shared between the page decorator and
/// [`PageMarker`]s.
#[derive(Clone, Debug, Default)]
pub struct PageTracker(Rc<Cell<usize>>);

impl PageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves on to the next page and returns its 1-based number.
    pub fn advance(&self) -> usize {
        let page = self.0.get() + 1;
        self.0.set(page);
        page
    }

    /// 1-based number of the current page, `0` before the first page.
    pub fn current(&self) -> usize {
        self.0.get()
    }
}

/// Slot filled with the page a [`PageMarker`] landed on.
pub type PageSlot = Rc<Cell<Option<usize>>>;

/// Wraps an element and records the page where it is first drawn.
pub struct PageMarker<E> {
    inner: E,
    tracker: PageTracker,
    slot: PageSlot,
}

impl<E: Element> PageMarker<E> {
    pub fn new(inner: E, tracker: PageTracker) -> Self {
        Self {
            inner,
            tracker,
            slot: Rc::new(Cell::new(None)),
        }
    }

    /// Handle to the recorded page, readable after the document was rendered.
    pub fn slot(&self) -> PageSlot {
        Rc::clone(&self.slot)
    }
}

impl<E: Element> Element for PageMarker<E> {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let result = self.inner.render(context, area, style)?;
        if self.slot.get().is_none() && mm_to_f64(result.size.height) > 0.0 {
            self.slot.set(Some(self.tracker.current()));
        }
        Ok(result)
    }
}

/// Content of a [`GridTable`] cell.
pub enum GridCell {
    /// Styled strings wrapped to the column width. `style` sizes empty cells.
    Text {
        strings: Vec<StyledString>,
        style: Style,
        alignment: Alignment,
    },
    Image(FixedSizeImage),
}

struct TextLine {
    strings: Vec<StyledString>,
    height: f64,
}

enum CellLayout {
    Text(Vec<TextLine>, Alignment),
    Image(f64),
}

impl CellLayout {
    fn height(&self) -> f64 {
        match self {
            CellLayout::Text(lines, _) => lines.iter().map(|line| line.height).sum(),
            CellLayout::Image(height) => *height,
        }
    }
}

/// A table with fixed column widths that breaks between rows.
///
/// Columns wider than the frame are scaled down proportionally; narrower tables are
/// centered. Rows are never split: a row that does not fit moves to the next page.
pub struct GridTable {
    column_widths_mm: Vec<f64>,
    rows: Vec<Vec<GridCell>>,
    style: TableStyle,
    next_row: usize,
}

impl GridTable {
    pub fn new(column_widths_mm: Vec<f64>, style: TableStyle) -> Self {
        Self {
            column_widths_mm,
            rows: Vec::new(),
            style,
            next_row: 0,
        }
    }

    pub fn push_row(&mut self, row: Vec<GridCell>) {
        self.rows.push(row);
    }

    fn fitted_widths(&self, available: f64) -> (f64, Vec<f64>) {
        let total: f64 = self.column_widths_mm.iter().sum();
        if total > available && total > 0.0 {
            let factor = available / total;
            let widths = self.column_widths_mm.iter().map(|w| w * factor).collect();
            (0.0, widths)
        } else {
            ((available - total) / 2.0, self.column_widths_mm.clone())
        }
    }

    fn layout_row(
        &self,
        font_cache: &FontCache,
        row: &[GridCell],
        widths: &[f64],
        style: Style,
    ) -> Vec<CellLayout> {
        let padding = self.style.padding;
        row.iter()
            .zip(widths)
            .map(|(cell, width)| match cell {
                GridCell::Text {
                    strings,
                    style: cell_style,
                    alignment,
                } => {
                    let inner = width - pt_to_mm(padding.left + padding.right);
                    let base = style.and(*cell_style);
                    CellLayout::Text(wrap_strings(font_cache, strings, base, inner), *alignment)
                }
                GridCell::Image(image) => CellLayout::Image(mm_to_f64(image.size().height)),
            })
            .collect()
    }

    /// Background strokes of one row: the header fill on the first row, then the
    /// label fill on the first column of rows the header fill does not cover.
    fn row_fills(&self, row_index: usize, x0: f64, y: f64, widths: &[f64], height: f64) -> Vec<Stroke> {
        let mut strokes = Vec::new();
        let table_width: f64 = widths.iter().sum();

        if row_index == 0 {
            if let Some(background) = self.style.header_background {
                strokes.extend(fill_strokes(x0, y, table_width, height, background));
            }
        }
        if let (Some(background), Some(first_width)) = (self.style.label_background, widths.first()) {
            if row_index > 0 || self.style.header_background.is_none() {
                strokes.extend(fill_strokes(x0, y, *first_width, height, background));
            }
        }
        strokes
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_row(
        &mut self,
        context: &genpdf::Context,
        area: &render::Area<'_>,
        style: Style,
        row_index: usize,
        layouts: Vec<CellLayout>,
        x0: f64,
        y: f64,
        widths: &[f64],
        row_height: f64,
    ) -> Result<(), Error> {
        let padding = self.style.padding;
        draw_strokes(area, &self.row_fills(row_index, x0, y, widths, row_height));

        let content_height = row_height - pt_to_mm(padding.top + padding.bottom);
        let area_width = mm_to_f64(area.size().width);
        let mut x = x0;
        for ((layout, width), cell) in layouts.iter().zip(widths).zip(&mut self.rows[row_index]) {
            let offset = match self.style.vertical_alignment {
                VerticalAlignment::Top => 0.0,
                VerticalAlignment::Middle => (content_height - layout.height()).max(0.0) / 2.0,
            };
            let left = x + pt_to_mm(padding.left);
            let right = (area_width - (x + width - pt_to_mm(padding.right))).max(0.0);
            let mut cell_area = area.clone();
            cell_area.add_margins(Margins::trbl(
                mm_from_f64(y + pt_to_mm(padding.top) + offset),
                mm_from_f64(right),
                mm_from_f64(0.0),
                mm_from_f64(left),
            ));

            match (layout, cell) {
                (CellLayout::Text(lines, alignment), _) => {
                    for line in lines {
                        if !line.strings.is_empty() {
                            let mut paragraph = Paragraph::default();
                            for string in &line.strings {
                                paragraph.push(string.clone());
                            }
                            paragraph.set_alignment(*alignment);
                            paragraph.render(context, cell_area.clone(), style)?;
                        }
                        cell_area.add_offset(Position::new(0, mm_from_f64(line.height)));
                    }
                }
                (CellLayout::Image(_), GridCell::Image(image)) => {
                    image.render(context, cell_area, style)?;
                }
                (CellLayout::Image(_), GridCell::Text { .. }) => {}
            }
            x += width;
        }
        Ok(())
    }

    /// Grid, box and row rules around the rows drawn on the current page.
    ///
    /// `rows` holds `(row index, top, height)` of each drawn row.
    fn rule_strokes(&self, x0: f64, widths: &[f64], rows: &[(usize, f64, f64)]) -> Vec<Stroke> {
        let mut strokes = Vec::new();
        let (Some(&(_, top, _)), Some(&(_, last_top, last_height))) = (rows.first(), rows.last()) else {
            return strokes;
        };
        let bottom = last_top + last_height;
        let x1 = x0 + widths.iter().sum::<f64>();

        if let Some(rule) = self.style.inner_grid {
            let mut x = x0;
            for width in &widths[..widths.len().saturating_sub(1)] {
                x += width;
                strokes.push(Stroke::new((x, top), (x, bottom), rule.color));
            }
            for &(_, row_top, _) in rows.iter().skip(1) {
                strokes.push(Stroke::new((x0, row_top), (x1, row_top), rule.color));
            }
        }

        if let Some(rule) = self.style.line_below {
            for &(_, row_top, row_height) in rows {
                let y = row_top + row_height;
                strokes.push(Stroke::new((x0, y), (x1, y), rule.color));
            }
        }

        if let Some(rule) = self.style.line_above {
            if let Some(&(0, row_top, _)) = rows.first() {
                strokes.push(Stroke::new((x0, row_top), (x1, row_top), rule.color));
            }
        }

        if let Some(rule) = self.style.outer_box {
            strokes.push(Stroke::new((x0, top), (x1, top), rule.color));
            strokes.push(Stroke::new((x1, top), (x1, bottom), rule.color));
            strokes.push(Stroke::new((x1, bottom), (x0, bottom), rule.color));
            strokes.push(Stroke::new((x0, bottom), (x0, top), rule.color));
        }
        strokes
    }
}

/// Width of every line `genpdf` strokes: the PDF default of one point.
const STROKE_WIDTH_MM: f64 = 0.3528;
/// Distance between the hairlines that paint a filled rectangle.
const FILL_STEP_MM: f64 = 0.3;

/// A colored line segment in area coordinates, in millimetres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Stroke {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub color: Rgb,
}

impl Stroke {
    pub fn new(from: (f64, f64), to: (f64, f64), color: Rgb) -> Self {
        Self { from, to, color }
    }

    fn draw(&self, area: &render::Area<'_>) {
        area.draw_line(
            vec![
                Position::new(mm_from_f64(self.from.0), mm_from_f64(self.from.1)),
                Position::new(mm_from_f64(self.to.0), mm_from_f64(self.to.1)),
            ],
            Style::new().with_color(self.color.into()),
        );
    }
}

fn draw_strokes(area: &render::Area<'_>, strokes: &[Stroke]) {
    for stroke in strokes {
        stroke.draw(area);
    }
}

/// Paints a rectangle with horizontal hairlines close enough to overlap.
///
/// `genpdf` has no filled shapes, so the lines are kept half a stroke inside the
/// rectangle and spaced at most [`FILL_STEP_MM`] apart.
pub(crate) fn fill_strokes(x: f64, y: f64, width: f64, height: f64, color: Rgb) -> Vec<Stroke> {
    if width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }
    let first = y + (STROKE_WIDTH_MM / 2.0).min(height / 2.0);
    let last = y + height - (STROKE_WIDTH_MM / 2.0).min(height / 2.0);
    let steps = ((last - first) / FILL_STEP_MM).ceil() as usize;
    if steps == 0 {
        return vec![Stroke::new((x, first), (x + width, first), color)];
    }
    (0..=steps)
        .map(|step| {
            let line_y = first + (last - first) * step as f64 / steps as f64;
            Stroke::new((x, line_y), (x + width, line_y), color)
        })
        .collect()
}

impl Element for GridTable {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let size = area.size();
        let (x0, widths) = self.fitted_widths(mm_to_f64(size.width));
        let available = mm_to_f64(size.height);
        let vertical_padding = pt_to_mm(self.style.padding.top + self.style.padding.bottom);

        let mut drawn = Vec::new();
        let mut y = 0.0;
        while self.next_row < self.rows.len() {
            let row_index = self.next_row;
            let layouts = self.layout_row(&context.font_cache, &self.rows[row_index], &widths, style);
            let content = layouts.iter().map(CellLayout::height).fold(0.0, f64::max);
            let row_height = content + vertical_padding;
            if y + row_height > available {
                break;
            }

            self.draw_row(context, &area, style, row_index, layouts, x0, y, &widths, row_height)?;
            drawn.push((row_index, y, row_height));
            y += row_height;
            self.next_row += 1;
        }

        draw_strokes(&area, &self.rule_strokes(x0, &widths, &drawn));

        let mut result = RenderResult::default();
        if !drawn.is_empty() {
            result.size = Size::new(mm_from_f64(widths.iter().sum()), mm_from_f64(y));
        }
        result.has_more = self.next_row < self.rows.len();
        Ok(result)
    }
}

/// Breaks styled strings into lines no wider than `max_width` millimetres.
///
/// Words are split at spaces; a single word wider than the line is split between
/// characters. Embedded newlines force a break. The result always holds at least one
/// line.
fn wrap_strings(
    font_cache: &FontCache,
    strings: &[StyledString],
    base: Style,
    max_width: f64,
) -> Vec<TextLine> {
    let limit = (max_width - WRAP_TOLERANCE_MM).max(0.0);
    let mut wrapper = LineWrapper::new(font_cache, base);

    for string in strings {
        let style = base.and(string.style);
        for (index, segment) in string.s.split('\n').enumerate() {
            if index > 0 {
                wrapper.finish_line();
            }
            for word in segment.split_inclusive(' ') {
                wrapper.push_word(word, style, limit);
            }
        }
    }
    wrapper.finish()
}

struct LineWrapper<'f> {
    font_cache: &'f FontCache,
    base: Style,
    lines: Vec<TextLine>,
    current: Vec<StyledString>,
    width: f64,
}

impl<'f> LineWrapper<'f> {
    fn new(font_cache: &'f FontCache, base: Style) -> Self {
        Self {
            font_cache,
            base,
            lines: Vec::new(),
            current: Vec::new(),
            width: 0.0,
        }
    }

    fn measure(&self, text: &str, style: Style) -> f64 {
        mm_to_f64(StyledString::new(text.to_owned(), style).width(self.font_cache))
    }

    fn push_word(&mut self, word: &str, style: Style, limit: f64) {
        if word.is_empty() {
            return;
        }
        let visible = self.measure(word.trim_end(), style);
        if self.width + visible > limit && !self.current.is_empty() {
            self.finish_line();
        }
        if self.current.is_empty() && word.trim().is_empty() {
            return;
        }

        if visible > limit {
            self.push_long_word(word, style, limit);
            return;
        }

        self.width += self.measure(word, style);
        self.current.push(StyledString::new(word.to_owned(), style));
    }

    fn push_long_word(&mut self, word: &str, style: Style, limit: f64) {
        let mut chunk = String::new();
        for ch in word.chars() {
            chunk.push(ch);
            if self.measure(chunk.trim_end(), style) > limit && chunk.chars().count() > 1 {
                chunk.pop();
                self.current.push(StyledString::new(std::mem::take(&mut chunk), style));
                self.finish_line();
                chunk.push(ch);
            }
        }
        if !chunk.is_empty() {
            self.width += self.measure(&chunk, style);
            self.current.push(StyledString::new(chunk, style));
        }
    }

    fn finish_line(&mut self) {
        if let Some(last) = self.current.last_mut() {
            let trimmed = last.s.trim_end().len();
            last.s.truncate(trimmed);
        }
        let height = self
            .current
            .iter()
            .map(|string| mm_to_f64(string.style.line_height(self.font_cache)))
            .fold(mm_to_f64(self.base.line_height(self.font_cache)), f64::max);
        self.lines.push(TextLine {
            strings: std::mem::take(&mut self.current),
            height,
        });
        self.width = 0.0;
    }

    fn finish(mut self) -> Vec<TextLine> {
        if !self.current.is_empty() || self.lines.is_empty() {
            self.finish_line();
        }
        self.lines
    }
}
