use kyc_pdf::fonts;
use kyc_pdf::{assemble, render_pdf, Payload, RenderOptions, StyleContext};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

fn payload(value: Value) -> Payload {
    Payload::from_value(value).expect("payload parses")
}

fn sample_payload() -> Payload {
    payload(json!({
        "investor_name": "Alice Example",
        "submission_id": "SUB-001",
        "template_name": "Individual KYC",
        "generated_at": "2026-02-12 10:00:00",
        "language": "en",
        "branding": {
            "font_path": "/__kyc_pdf_missing__/Brand.ttf",
            "header_text": "Acme Capital",
            "footer_text": "Confidential",
        },
        "schema": {"sections": [
            {"title": {"en": "Basics"}, "fields": [{"key": "name", "label": {"en": "Name"}}]},
            {"title": {"en": "Documents"}, "fields": [{"key": "docs", "label": {"en": "Documents"}}]},
        ]},
        "data": {"name": "Alice", "docs": ["passport", "utility bill"]},
    }))
}

fn render(payload: &Payload) -> kyc_pdf::RenderedPdf {
    render_pdf(payload, &RenderOptions::default()).expect("render pdf")
}

fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if data[index..].starts_with(tag) {
                let mut cursor = index + tag.len();
                while cursor < data.len() && data[cursor] != terminator {
                    if terminator == b')'
                        || !matches!(data[cursor], b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t')
                    {
                        data[cursor] = b'0';
                    }
                    cursor += 1;
                }
                index = cursor;
            } else {
                index += 1;
            }
        }
    }

    fn scrub_xml(data: &mut [u8], start: &[u8], end: &[u8]) {
        let mut offset = 0;
        while offset + start.len() < data.len() {
            let Some(start_pos) = data[offset..]
                .windows(start.len())
                .position(|window| window == start)
            else {
                break;
            };
            let start_index = offset + start_pos + start.len();
            let Some(end_pos) = data[start_index..]
                .windows(end.len())
                .position(|window| window == end)
            else {
                break;
            };
            for byte in &mut data[start_index..start_index + end_pos] {
                if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                    *byte = b'0';
                }
            }
            offset = start_index + end_pos + end.len();
        }
    }

    let mut normalized = bytes.to_vec();
    scrub_segment(&mut normalized, b"/CreationDate(", b')');
    scrub_segment(&mut normalized, b"/ModDate(", b')');
    scrub_segment(&mut normalized, b"/ID[", b']');
    scrub_segment(&mut normalized, b"/Producer(", b')');
    for tag in [
        "xmp:CreateDate",
        "xmp:ModifyDate",
        "xmp:MetadataDate",
        "xmpMM:DocumentID",
        "xmpMM:InstanceID",
        "xmpMM:VersionID",
    ] {
        let start = format!("<{tag}>");
        let end = format!("</{tag}>");
        scrub_xml(&mut normalized, start.as_bytes(), end.as_bytes());
    }
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(scrub_pdf(bytes)).into()
}

#[test]
fn basics_section_lays_out_name_row() {
    let payload = sample_payload();
    let ctx = StyleContext::new(&payload, &RenderOptions::default()).expect("style context");
    assert_eq!(ctx.font_name(), fonts::STANDARD_FONT_NAME);

    let blocks = assemble(&payload, &ctx);
    let heading = blocks
        .iter()
        .position(|block| block.as_text().map(|text| text.text()) == Some("Basics"))
        .expect("Basics heading");
    let table = blocks[heading + 2].as_table().expect("Basics table");
    assert_eq!(table.texts(), vec![vec!["Field", "Value"], vec!["Name", "Alice"]]);
}

#[test]
fn renders_pdf_with_section_pages() {
    let rendered = render(&sample_payload());

    assert!(rendered.bytes.starts_with(b"%PDF"));
    assert_eq!(rendered.page_count, 1);
    assert_eq!(rendered.section_titles, vec!["Basics", "Documents"]);
    assert_eq!(rendered.section_pages, vec![Some(1), Some(1)]);
}

#[test]
fn empty_payload_renders_a_document() {
    let rendered = render(&payload(json!({})));

    assert!(!rendered.bytes.is_empty());
    assert_eq!(rendered.page_count, 1);
    assert!(rendered.section_titles.is_empty());
}

#[test]
fn renders_without_installed_font_metrics() {
    let options = RenderOptions::default()
        .with_fonts_dir(Some("/__kyc_pdf_missing_fonts__".into()));
    let rendered = render_pdf(&payload(json!({})), &options).expect("render pdf");

    assert!(rendered.bytes.starts_with(b"%PDF"));
    assert_eq!(rendered.page_count, 1);
}

#[test]
fn long_forms_break_across_pages() {
    let fields: Vec<Value> = (0..120)
        .map(|index| json!({"key": format!("f{index}"), "label": format!("Field {index}")}))
        .collect();
    let data: serde_json::Map<String, Value> = (0..120)
        .map(|index| (format!("f{index}"), json!(format!("value {index}"))))
        .collect();
    let long = payload(json!({
        "schema": {"sections": [
            {"title": "First", "fields": fields},
            {"title": "Second", "fields": [{"key": "f0", "label": "Again"}]},
        ]},
        "data": data,
    }));

    let rendered = render(&long);

    assert!(rendered.page_count > 1);
    assert_eq!(rendered.section_pages[0], Some(1));
    let second = rendered.section_pages[1].expect("second section page");
    assert!(second > 1 && second <= rendered.page_count);
}

#[test]
fn transparent_logo_is_embedded() {
    let dir = tempfile::tempdir().expect("temp dir");
    let logo = dir.path().join("logo.png");
    image::RgbaImage::from_pixel(80, 36, image::Rgba([47, 143, 131, 128]))
        .save(&logo)
        .expect("write logo");

    let with_logo = payload(json!({"branding": {"logo_path": logo}}));
    let rendered = render(&with_logo);
    assert!(rendered.bytes.starts_with(b"%PDF"));
}

#[test]
fn rendering_is_deterministic() {
    let payload = sample_payload();
    let first = render(&payload);
    let second = render(&payload);

    assert_eq!(first.bytes.len(), second.bytes.len(), "PDF sizes should match");
    assert_eq!(
        normalized_hash(&first.bytes),
        normalized_hash(&second.bytes),
        "PDF renders must be deterministic after metadata normalization"
    );
}
