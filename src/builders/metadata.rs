//! Submission metadata table.

use serde_json::Value;

use crate::model::{Block, Cell, Padding, Rule, TableBlock, TableStyle, VerticalAlignment};
use crate::payload::{render_text, Payload};
use crate::style::{GRID, INK, RULE, SAND};

pub const COLUMN_WIDTHS_MM: [f64; 2] = [40.0, 140.0];

const GAP_AFTER_PT: f64 = 12.0;

/// Returns the four-row metadata table followed by a gap.
///
/// Missing values print as empty cells, unlike form fields which use a dash.
pub fn build_metadata(payload: &Payload) -> Vec<Block> {
    let entries: [(&str, &Value); 4] = [
        ("Investor", &payload.investor_name),
        ("Submission ID", &payload.submission_id),
        ("Template", &payload.template_name),
        ("Generated", &payload.generated_at),
    ];

    let style = TableStyle {
        vertical_alignment: VerticalAlignment::Top,
        padding: Padding::uniform(6.0),
        text_color: Some(INK),
        label_background: Some(SAND),
        inner_grid: Some(Rule::new(0.25, GRID)),
        outer_box: Some(Rule::new(0.5, RULE)),
        ..TableStyle::default()
    };

    let table = TableBlock::new(COLUMN_WIDTHS_MM, style).with_rows(
        entries
            .iter()
            .map(|(label, value)| vec![Cell::text(*label), Cell::text(render_text(value))]),
    );

    vec![Block::Table(table), Block::spacer(GAP_AFTER_PT)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::test_support::payload;
    use serde_json::json;

    #[test]
    fn renders_fixed_labels_in_order() {
        let payload = payload(json!({
            "investor_name": "Alice Example",
            "submission_id": 42,
            "template_name": "Individual KYC",
            "generated_at": "2026-02-12 10:00:00",
        }));
        let blocks = build_metadata(&payload);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1], Block::Spacer(12.0));

        let table = blocks[0].as_table().expect("metadata table");
        assert_eq!(
            table.texts(),
            vec![
                vec!["Investor", "Alice Example"],
                vec!["Submission ID", "42"],
                vec!["Template", "Individual KYC"],
                vec!["Generated", "2026-02-12 10:00:00"],
            ]
        );
        assert_eq!(table.style().label_background, Some(SAND));
    }

    #[test]
    fn missing_values_are_blank_not_dashed() {
        let blocks = build_metadata(&payload(json!({"investor_name": null})));
        let table = blocks[0].as_table().expect("metadata table");
        assert!(table.texts().iter().all(|row| row[1].is_empty()));
    }
}
