//! Report layout: fixed section order, word wrapping, and pagination.
//!
//! Section order is part of the report's contract: title block, original
//! review, sentiment summary, emotion table, named entities, toxicity table,
//! language and translation. Only the entity list carries an overflow check;
//! the other sections are assumed to fit on the current page (known
//! limitation for extremely long reviews).

use chrono::Utc;
use sentilens_common::colors::DEFAULT_ENTITY_COLOR;
use sentilens_common::format::{display_category, percent1, score3};
use sentilens_common::{AnalysisResult, ColorMap};

/// A4 portrait, in points.
pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;
pub const MARGIN: f32 = 50.0;

/// Column width the review and translation text are wrapped to.
pub const WRAP_COLUMNS: usize = 90;

/// X offset of the second column in table rows, relative to the margin.
pub const COLUMN_OFFSET: f32 = 200.0;

pub const NO_ENTITIES_MESSAGE: &str = "No named entities detected.";
pub const ENTITIES_CONT_HEADING: &str = "Named Entities (cont.)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Heading,
    Body,
    Bullet,
    Row,
}

impl LineStyle {
    pub fn font_size(self) -> f32 {
        match self {
            LineStyle::Title => 18.0,
            LineStyle::Heading => 13.0,
            _ => 10.0,
        }
    }

    /// Vertical advance consumed by a line of this style.
    pub fn leading(self) -> f32 {
        match self {
            LineStyle::Title => 26.0,
            LineStyle::Heading => 20.0,
            _ => 14.0,
        }
    }

    pub fn bold(self) -> bool {
        matches!(self, LineStyle::Title | LineStyle::Heading)
    }
}

/// One laid-out line. `column` holds the second cell of a table row; `color`
/// is a hex display color, black when absent.
#[derive(Debug, Clone)]
pub struct ReportLine {
    pub text: String,
    pub style: LineStyle,
    pub color: Option<String>,
    pub column: Option<String>,
}

impl ReportLine {
    fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
            color: None,
            column: None,
        }
    }

    fn title(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Title)
    }

    fn heading(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Heading)
    }

    fn body(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Body)
    }

    fn bullet(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::new(text, LineStyle::Bullet)
        }
    }

    fn row(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: Some(value.into()),
            ..Self::new(name, LineStyle::Row)
        }
    }
}

/// The laid-out document: pages of lines, top to bottom.
#[derive(Debug, Default)]
pub struct ReportDoc {
    pub pages: Vec<Vec<ReportLine>>,
}

impl ReportDoc {
    /// True if any line (either cell) contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.pages.iter().flatten().any(|line| {
            line.text.contains(needle)
                || line.column.as_deref().is_some_and(|col| col.contains(needle))
        })
    }
}

/// Tracks the vertical cursor while sections are appended.
struct PageCursor {
    pages: Vec<Vec<ReportLine>>,
    current: Vec<ReportLine>,
    y: f32,
}

impl PageCursor {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn push(&mut self, line: ReportLine) {
        self.y -= line.style.leading();
        self.current.push(line);
    }

    fn blank(&mut self) {
        self.push(ReportLine::body(""));
    }

    /// Entity-list append with the overflow check: when the cursor would
    /// drop past the bottom margin, start a new page and repeat the
    /// continuation sub-header.
    fn push_entity(&mut self, line: ReportLine) {
        if self.y - line.style.leading() < MARGIN {
            self.break_page();
            self.push(ReportLine::heading(ENTITIES_CONT_HEADING));
        }
        self.push(line);
    }

    fn break_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn finish(mut self) -> ReportDoc {
        if !self.current.is_empty() {
            self.pages.push(self.current);
        }
        ReportDoc { pages: self.pages }
    }
}

/// Greedy word wrap to `width` characters; oversized tokens are hard-split.
pub fn word_wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in text.lines() {
        if raw_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let mut word = word;
            while word.len() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let split = word
                    .char_indices()
                    .take_while(|(i, _)| *i < width)
                    .last()
                    .map(|(i, c)| i + c.len_utf8())
                    .unwrap_or(word.len());
                lines.push(word[..split].to_string());
                word = &word[split..];
            }
            if word.is_empty() {
                continue;
            }
            if current.is_empty() {
                current = word.to_string();
            } else if current.len() + 1 + word.len() <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Lay out the full report for one analysis.
pub fn build_report(
    review: &str,
    result: &AnalysisResult,
    entity_colors: &ColorMap,
) -> ReportDoc {
    let mut cur = PageCursor::new();

    cur.push(ReportLine::title("Review Analysis Report"));
    cur.push(ReportLine::body(format!(
        "Generated on {}",
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    )));
    cur.blank();

    cur.push(ReportLine::heading("Original Review"));
    for line in word_wrap(review, WRAP_COLUMNS) {
        cur.push(ReportLine::body(line));
    }
    cur.blank();

    cur.push(ReportLine::heading("Sentiment Summary"));
    cur.push(ReportLine::row("Sentiment", result.sentiment.to_string()));
    cur.push(ReportLine::row("Polarity", score3(result.score)));
    cur.push(ReportLine::row("Subjectivity", score3(result.subjectivity)));
    cur.blank();

    cur.push(ReportLine::heading("Emotion Breakdown"));
    if result.emotions.is_empty() {
        cur.push(ReportLine::body("No emotion data."));
    } else {
        for (name, value) in &result.emotions {
            cur.push(ReportLine::row(display_category(name), percent1(*value)));
        }
    }
    cur.blank();

    cur.push(ReportLine::heading("Named Entities"));
    if result.entities.is_empty() {
        cur.push(ReportLine::body(NO_ENTITIES_MESSAGE));
    } else {
        for entity in &result.entities {
            let color = entity_colors
                .lookup(&entity.label)
                .unwrap_or(DEFAULT_ENTITY_COLOR);
            cur.push_entity(ReportLine::bullet(
                format!("- {} ({})", entity.text, entity.label),
                color,
            ));
        }
    }
    cur.blank();

    cur.push(ReportLine::heading("Toxicity Breakdown"));
    if result.toxicity.is_empty() {
        cur.push(ReportLine::body("No toxicity data."));
    } else {
        for (name, value) in &result.toxicity {
            cur.push(ReportLine::row(display_category(name), percent1(*value)));
        }
    }
    cur.blank();

    cur.push(ReportLine::heading("Language & Translation"));
    let language = if result.language.is_empty() {
        "unknown"
    } else {
        &result.language
    };
    cur.push(ReportLine::row("Detected Language", language));
    cur.push(ReportLine::body("Translated Text:"));
    for line in word_wrap(&result.translated_text, WRAP_COLUMNS) {
        cur.push(ReportLine::body(line));
    }

    cur.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_wrap_respects_width() {
        let text = "the quick brown fox jumps over the lazy dog";
        let lines = word_wrap(text, 15);
        assert!(lines.iter().all(|l| l.len() <= 15));
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_word_wrap_hard_splits_long_tokens() {
        let lines = word_wrap(&"x".repeat(25), 10);
        assert_eq!(lines, vec!["x".repeat(10), "x".repeat(10), "x".repeat(5)]);
    }

    #[test]
    fn test_word_wrap_empty_text() {
        assert_eq!(word_wrap("", 80), vec![String::new()]);
    }

    #[test]
    fn test_word_wrap_keeps_blank_paragraph() {
        let lines = word_wrap("one\n\ntwo", 80);
        assert_eq!(lines, vec!["one".to_string(), String::new(), "two".to_string()]);
    }
}
