//! Static category → display color tables, defined once and passed explicitly
//! to every renderer. Keys are stored normalized (lowercase, underscores) so
//! lookups are case-insensitive.

use std::collections::BTreeMap;

use crate::format::color_key;

/// Emotion categories as colored in the dashboard.
const EMOTION_COLORS: &[(&str, &str)] = &[
    ("joy", "#FACC15"),
    ("anger", "#EF4444"),
    ("fear", "#9333EA"),
    ("sadness", "#3B82F6"),
    ("trust", "#22C55E"),
    ("surprise", "#EC4899"),
    ("anticipation", "#FB923C"),
    ("disgust", "#6B7280"),
];

/// Toxicity sub-categories (Detoxify label set).
const TOXICITY_COLORS: &[(&str, &str)] = &[
    ("toxic", "#DC2626"),
    ("severe_toxic", "#991B1B"),
    ("obscene", "#F97316"),
    ("threat", "#7E22CE"),
    ("insult", "#DB2777"),
    ("identity_hate", "#CA8A04"),
];

/// Named-entity labels (spaCy label set, the common ones).
const ENTITY_COLORS: &[(&str, &str)] = &[
    ("person", "#22C55E"),
    ("org", "#3B82F6"),
    ("gpe", "#F97316"),
    ("loc", "#14B8A6"),
    ("product", "#EC4899"),
    ("date", "#A855F7"),
    ("time", "#8B5CF6"),
    ("money", "#EAB308"),
    ("cardinal", "#64748B"),
];

/// Default color for entity labels absent from the table.
pub const DEFAULT_ENTITY_COLOR: &str = "#FDE047";

/// Immutable mapping from category name to hex display color.
#[derive(Debug, Clone)]
pub struct ColorMap {
    colors: BTreeMap<String, String>,
}

impl ColorMap {
    fn from_table(table: &[(&str, &str)]) -> Self {
        let colors = table
            .iter()
            .map(|(name, color)| (color_key(name), (*color).to_string()))
            .collect();
        Self { colors }
    }

    pub fn emotions() -> Self {
        Self::from_table(EMOTION_COLORS)
    }

    pub fn toxicity() -> Self {
        Self::from_table(TOXICITY_COLORS)
    }

    pub fn entities() -> Self {
        Self::from_table(ENTITY_COLORS)
    }

    /// Case-insensitive lookup; `Severe toxic` and `severe_toxic` both match.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.colors.get(&color_key(name)).map(String::as_str)
    }
}

/// Parse `#RRGGBB` into (r, g, b) components in [0, 1] for PDF color
/// operators. Malformed input falls back to black.
pub fn hex_to_rgb(hex: &str) -> (f32, f32, f32) {
    let h = hex.trim_start_matches('#');
    if h.len() != 6 || !h.is_ascii() {
        return (0.0, 0.0, 0.0);
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).unwrap_or(0) as f32 / 255.0;
    (channel(&h[0..2]), channel(&h[2..4]), channel(&h[4..6]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let colors = ColorMap::toxicity();
        assert_eq!(colors.lookup("toxic"), Some("#DC2626"));
        assert_eq!(colors.lookup("Severe toxic"), Some("#991B1B"));
        assert_eq!(colors.lookup("SEVERE_TOXIC"), Some("#991B1B"));
    }

    #[test]
    fn test_lookup_unknown_is_none() {
        let colors = ColorMap::emotions();
        assert_eq!(colors.lookup("boredom"), None);
    }

    #[test]
    fn test_entity_labels_match_uppercase_input() {
        let colors = ColorMap::entities();
        assert_eq!(colors.lookup("PERSON"), Some("#22C55E"));
        assert_eq!(colors.lookup("ORG"), Some("#3B82F6"));
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#FF0000"), (1.0, 0.0, 0.0));
        let (r, g, b) = hex_to_rgb("#808080");
        assert!((r - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(g, r);
        assert_eq!(b, r);
    }

    #[test]
    fn test_hex_to_rgb_malformed_is_black() {
        assert_eq!(hex_to_rgb("nonsense"), (0.0, 0.0, 0.0));
        assert_eq!(hex_to_rgb("#FFF"), (0.0, 0.0, 0.0));
    }
}
