//! Signature block at the end of the document.

use crate::defaults;
use crate::model::{Block, Cell, Padding, Rule, TableBlock, TableStyle};
use crate::payload::{render_text, Branding};
use crate::style::{INK, RULE};

pub const COLUMN_WIDTHS_MM: [f64; 2] = [80.0, 100.0];

const GAP_BEFORE_PT: f64 = 8.0;

/// Returns a gap followed by one row per signature.
///
/// An absent or empty signature list is replaced by the default approval lines.
pub fn build_signatures(branding: &Branding) -> Vec<Block> {
    let configured: Vec<(String, String)> = branding
        .signatures
        .iter()
        .map(|signature| (render_text(&signature.label), render_text(&signature.name)))
        .collect();
    let fallback = defaults::SIGNATURES
        .iter()
        .map(|(label, line)| (label.to_string(), line.to_string()))
        .collect();
    let entries = defaults::resolve_with_default(Some(configured), fallback, |list| {
        !list.is_empty()
    });

    let style = TableStyle {
        padding: Padding::symmetric(8.0, 6.0),
        text_color: Some(INK),
        line_above: Some(Rule::new(0.5, RULE)),
        ..TableStyle::default()
    };
    let table = TableBlock::new(COLUMN_WIDTHS_MM, style).with_rows(
        entries
            .into_iter()
            .map(|(label, name)| vec![Cell::text(label), Cell::text(name)]),
    );

    vec![Block::spacer(GAP_BEFORE_PT), Block::Table(table)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::test_support::payload;
    use serde_json::json;

    fn signature_rows(value: serde_json::Value) -> Vec<Vec<String>> {
        let blocks = build_signatures(&payload(value).branding);
        assert_eq!(blocks[0], Block::Spacer(8.0));
        blocks[1].as_table().expect("signature table").texts()
    }

    #[test]
    fn defaults_when_absent_or_empty() {
        let expected = vec![
            vec!["GP Approval", "____________________"],
            vec!["Compliance", "____________________"],
        ];
        assert_eq!(signature_rows(json!({})), expected);
        assert_eq!(signature_rows(json!({"branding": {"signatures": []}})), expected);
    }

    #[test]
    fn configured_signatures_replace_defaults() {
        let rows = signature_rows(json!({"branding": {"signatures": [
            {"label": "Director", "name": "J. Doe"},
            {"label": "Witness"},
            {},
        ]}}));
        assert_eq!(
            rows,
            vec![vec!["Director", "J. Doe"], vec!["Witness", ""], vec!["", ""]]
        );
    }
}
