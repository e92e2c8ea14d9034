//! End-to-end layout and encoding checks for the report synthesizer.

use sentilens_report::layout::{build_report, ENTITIES_CONT_HEADING, NO_ENTITIES_MESSAGE};
use sentilens_report::render_report;
use sentilens_common::{AnalysisResult, ColorMap, NamedEntity};

fn fixture() -> AnalysisResult {
    serde_json::from_value(serde_json::json!({
        "sentiment": "Positive",
        "score": 0.42,
        "subjectivity": 0.3,
        "emotions": {"joy": 0.8, "anger": 0.1},
        "entities": [],
        "toxicity": {"toxic": 0.05},
        "language": "en",
        "translated_text": ""
    }))
    .unwrap()
}

#[test]
fn test_report_contains_required_literals() {
    let doc = build_report("Great phone, loved it.", &fixture(), &ColorMap::entities());

    assert!(doc.contains("Positive"));
    assert!(doc.contains("0.420"));
    assert!(doc.contains("0.300"));
    assert!(doc.contains(NO_ENTITIES_MESSAGE));

    // Joy's row pairs the display name with its one-decimal percentage.
    let joy_row = doc
        .pages
        .iter()
        .flatten()
        .find(|line| line.text == "Joy")
        .expect("emotion row for joy");
    assert_eq!(joy_row.column.as_deref(), Some("80.0%"));
}

#[test]
fn test_section_order_is_fixed() {
    let doc = build_report("review text", &fixture(), &ColorMap::entities());
    let texts: Vec<&str> = doc
        .pages
        .iter()
        .flatten()
        .map(|line| line.text.as_str())
        .collect();

    let position = |needle: &str| {
        texts
            .iter()
            .position(|t| *t == needle)
            .unwrap_or_else(|| panic!("missing section heading {needle}"))
    };

    let order = [
        position("Review Analysis Report"),
        position("Original Review"),
        position("Sentiment Summary"),
        position("Emotion Breakdown"),
        position("Named Entities"),
        position("Toxicity Breakdown"),
        position("Language & Translation"),
    ];
    assert!(order.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_entity_overflow_starts_new_page_with_cont_heading() {
    let mut result = fixture();
    result.entities = (0..120)
        .map(|i| NamedEntity {
            text: format!("Entity{i}"),
            label: "ORG".to_string(),
        })
        .collect();

    let doc = build_report("short review", &result, &ColorMap::entities());
    assert!(doc.pages.len() >= 2);
    assert!(doc.contains(ENTITIES_CONT_HEADING));

    // Every entity survives pagination.
    let bullet_count = doc
        .pages
        .iter()
        .flatten()
        .filter(|line| line.text.starts_with("- Entity"))
        .count();
    assert_eq!(bullet_count, 120);
}

#[test]
fn test_unknown_entity_label_gets_default_color() {
    let mut result = fixture();
    result.entities = vec![NamedEntity {
        text: "Weirdness".to_string(),
        label: "MYSTERY".to_string(),
    }];
    let doc = build_report("r", &result, &ColorMap::entities());
    let bullet = doc
        .pages
        .iter()
        .flatten()
        .find(|line| line.text.contains("Weirdness"))
        .unwrap();
    assert_eq!(
        bullet.color.as_deref(),
        Some(sentilens_common::colors::DEFAULT_ENTITY_COLOR)
    );
}

#[test]
fn test_render_report_emits_pdf_bytes() {
    let bytes = render_report("Great phone, loved it.", &fixture()).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(bytes.len() > 500);
}
