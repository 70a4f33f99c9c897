//! Renders KYC submission payloads into branded, paginated A4 PDF documents.
//!
//! A payload carries branding, a form schema and the submitted answers. The
//! [`builders`] turn it into a backend-independent [`model::Block`] list, which
//! [`render`] hands to `genpdf`:
//!
//! ```no_run
//! use kyc_pdf::{render_file, RenderOptions};
//!
//! render_file("submission.json", "submission.pdf", &RenderOptions::default())?;
//! # Ok::<(), kyc_pdf::Error>(())
//! ```

pub mod builder;
pub mod builders;
pub mod color;
pub mod defaults;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod model;
pub mod options;
pub mod payload;
pub mod pipeline;
pub mod render;
pub mod style;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use error::{Error, Result};
pub use options::RenderOptions;
pub use payload::Payload;
pub use pipeline::{assemble, render_file, render_pdf, RenderedPdf};
pub use style::StyleContext;
