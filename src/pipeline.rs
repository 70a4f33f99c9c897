//! End-to-end rendering: payload → blocks → PDF bytes → file.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::builder::DocumentBuilder;
use crate::builders;
use crate::error::{Error, Result};
use crate::model::Block;
use crate::options::RenderOptions;
use crate::payload::{render_text, Payload};
use crate::render;
use crate::style::StyleContext;

/// A rendered document held in memory.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    /// Complete PDF file contents.
    pub bytes: Vec<u8>,
    /// Section titles in document order.
    pub section_titles: Vec<String>,
    /// 1-based page of every section heading, matched to `section_titles` by index.
    pub section_pages: Vec<Option<usize>>,
    /// Number of pages in the document.
    pub page_count: usize,
}

/// Concatenates the block lists of every builder in document order: header,
/// metadata, sections, footer note, signatures.
pub fn assemble(payload: &Payload, ctx: &StyleContext) -> Vec<Block> {
    let mut blocks = builders::build_header(&payload.branding, ctx);
    blocks.extend(builders::build_metadata(payload));
    blocks.extend(builders::build_sections(payload, ctx));
    blocks.extend(builders::build_footer(&payload.branding));
    blocks.extend(builders::build_signatures(&payload.branding));
    blocks
}

/// Title stored in the PDF metadata.
pub fn document_title(payload: &Payload) -> String {
    let id = render_text(&payload.submission_id);
    if id.is_empty() {
        "KYC Submission".to_owned()
    } else {
        format!("KYC Submission {id}")
    }
}

/// Renders `payload` into PDF bytes.
pub fn render_pdf(payload: &Payload, options: &RenderOptions) -> Result<RenderedPdf> {
    let ctx = StyleContext::new(payload, options)?;
    let blocks = assemble(payload, &ctx);
    debug!(
        "Assembled {} blocks for {} sections using font {}",
        blocks.len(),
        payload.schema.sections.len(),
        ctx.font_name()
    );

    let builder = DocumentBuilder::new()
        .with_title(document_title(payload))
        .with_paper_size(options.paper_size())
        .with_margins(options.margins());
    let pages = builder.pages().clone();
    let family = ctx.font().clone().into_family(options.fonts_dir())?;
    let mut document = builder.build(family);

    let targets = render::push_blocks(&mut document, &blocks, &pages)?;

    let mut bytes = Vec::new();
    document.render(&mut bytes)?;

    let section_titles: Vec<String> = targets.iter().map(|target| target.title.clone()).collect();
    let section_pages: Vec<Option<usize>> = targets.iter().map(|target| target.page()).collect();

    #[cfg(feature = "bookmarks")]
    if options.bookmarks() {
        bytes = crate::bookmarks::apply_section_bookmarks(&bytes, &section_titles, &section_pages)?;
    }

    let page_count = pages.current();
    info!("Rendered {page_count} page(s), {} bytes", bytes.len());

    Ok(RenderedPdf {
        bytes,
        section_titles,
        section_pages,
        page_count,
    })
}

/// Loads the payload at `input` and writes the rendered PDF to `output`.
///
/// Nothing is written unless rendering succeeds.
pub fn render_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &RenderOptions,
) -> Result<RenderedPdf> {
    let input = input.as_ref();
    let output = output.as_ref();

    info!("Rendering {} to {}", input.display(), output.display());
    let payload = Payload::load(input)?;
    let rendered = render_pdf(&payload, options)?;

    fs::write(output, &rendered.bytes).map_err(|source| Error::WriteOutput {
        path: output.to_path_buf(),
        source,
    })?;
    Ok(rendered)
}
