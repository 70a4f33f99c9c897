//! Block builders, one per document region.
//!
//! Each builder reads the payload (and the per-render
//! [`StyleContext`](crate::style::StyleContext)) and returns
//! its own ordered block list. Builders never look at each other's output; the
//! assembler in [`crate::pipeline`] concatenates them.

pub mod header;
pub mod metadata;
pub mod sections;
pub mod signatures;

pub use header::build_header;
pub use metadata::build_metadata;
pub use sections::build_sections;
pub use signatures::build_signatures;

use crate::defaults;
use crate::model::{Block, TextBlock, TextRole};
use crate::payload::Branding;

/// Fine-print paragraph for `branding.footer_text`, when it is present and
/// non-empty. The text is printed as given.
pub fn build_footer(branding: &Branding) -> Option<Block> {
    branding
        .footer_text
        .as_deref()
        .filter(defaults::non_empty)
        .map(|text| Block::Text(TextBlock::plain(text, TextRole::Small)))
}

#[cfg(test)]
pub(crate) mod test_support {
    use serde_json::Value;

    use crate::options::RenderOptions;
    use crate::payload::Payload;
    use crate::style::StyleContext;

    pub fn payload(value: Value) -> Payload {
        Payload::from_value(value).expect("payload parses")
    }

    pub fn context(payload: &Payload) -> StyleContext {
        StyleContext::new(payload, &RenderOptions::default()).expect("style context")
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::payload;
    use super::*;
    use serde_json::json;

    #[test]
    fn footer_requires_text() {
        assert!(build_footer(&Branding::default()).is_none());

        let empty = payload(json!({"branding": {"footer_text": ""}}));
        assert!(build_footer(&empty.branding).is_none());

        let present = payload(json!({"branding": {"footer_text": "Confidential **draft**"}}));
        let footer = build_footer(&present.branding).expect("footer block");
        let text = footer.as_text().expect("text block");
        assert_eq!(text.role(), TextRole::Small);
        assert_eq!(text.text(), "Confidential **draft**");
    }
}
