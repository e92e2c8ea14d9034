//! sentilens-report — deterministic synthesis of a downloadable PDF report
//! from one analysis result plus the original review text.
//!
//! Split in two stages so the section layout is testable without decoding
//! PDF bytes: `layout` turns the result into paginated styled lines, `pdf`
//! encodes those pages with lopdf.

pub mod layout;
pub mod pdf;

use sentilens_common::{AnalysisResult, ColorMap, Result};

/// File name of the saved artifact.
pub const REPORT_FILENAME: &str = "review_report.pdf";

/// Render the full report document as PDF bytes.
pub fn render_report(review: &str, result: &AnalysisResult) -> Result<Vec<u8>> {
    let doc = layout::build_report(review, result, &ColorMap::entities());
    pdf::render_pdf(&doc)
}
