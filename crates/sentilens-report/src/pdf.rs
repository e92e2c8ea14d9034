//! PDF encoding of a laid-out report via lopdf.
//!
//! Plain Type1 Helvetica text, one content stream per page. Text is reduced
//! to Latin-1-safe ASCII before it enters a literal string.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use sentilens_common::colors::hex_to_rgb;
use sentilens_common::{Result, SentilensError};

use crate::layout::{LineStyle, ReportDoc, ReportLine, COLUMN_OFFSET, MARGIN, PAGE_HEIGHT, PAGE_WIDTH};

const BULLET_INDENT: f32 = 12.0;

/// Encode the laid-out document into a complete PDF byte vector.
pub fn render_pdf(doc: &ReportDoc) -> Result<Vec<u8>> {
    let mut pdf = Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let regular = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = pdf.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in &doc.pages {
        let content = page_content(page);
        let encoded = content
            .encode()
            .map_err(|e| SentilensError::Report(e.to_string()))?;
        let content_id = pdf.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);
    pdf.compress();

    let mut buf = Vec::new();
    pdf.save_to(&mut buf)
        .map_err(|e| SentilensError::Report(e.to_string()))?;
    Ok(buf)
}

fn page_content(lines: &[ReportLine]) -> Content {
    let mut operations = Vec::new();
    let mut y = PAGE_HEIGHT - MARGIN;
    for line in lines {
        y -= line.style.leading();
        let (r, g, b) = hex_to_rgb(line.color.as_deref().unwrap_or("#000000"));
        let font = if line.style.bold() { "F2" } else { "F1" };
        let indent = if line.style == LineStyle::Bullet {
            BULLET_INDENT
        } else {
            0.0
        };
        if !line.text.is_empty() {
            operations.extend(text_ops(
                font,
                line.style.font_size(),
                MARGIN + indent,
                y,
                (r, g, b),
                &line.text,
            ));
        }
        if let Some(col) = &line.column {
            operations.extend(text_ops(
                font,
                line.style.font_size(),
                MARGIN + COLUMN_OFFSET,
                y,
                (r, g, b),
                col,
            ));
        }
    }
    Content { operations }
}

fn text_ops(
    font: &str,
    size: f32,
    x: f32,
    y: f32,
    (r, g, b): (f32, f32, f32),
    text: &str,
) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("rg", vec![r.into(), g.into(), b.into()]),
        Operation::new("Tf", vec![font.into(), size.into()]),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![Object::string_literal(sanitize(text))]),
        Operation::new("ET", vec![]),
    ]
}

/// Replace characters Helvetica's default encoding cannot carry.
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            c if c.is_ascii() && !c.is_control() => c,
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2022}' => '-',
            _ => '?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_passes_ascii_through() {
        assert_eq!(sanitize("Polarity: 0.420"), "Polarity: 0.420");
    }

    #[test]
    fn test_sanitize_maps_smart_punctuation() {
        assert_eq!(sanitize("\u{2018}hi\u{2019} \u{2014} ok"), "'hi' - ok");
    }

    #[test]
    fn test_sanitize_replaces_unencodable() {
        assert_eq!(sanitize("caf\u{e9} \u{26a0}"), "caf? ?");
    }
}
