//! Display formatting shared by the chart renderers and the report
//! synthesizer. The rules here are fixed for compatibility with the
//! dashboard's existing output; do not change rounding or casing.

/// Turn a raw category key into its display form: underscores become spaces,
/// first letter capitalized. `severe_toxic` → `Severe toxic`.
pub fn display_category(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Normalize a display name back into a color-table key: lowercase, spaces
/// become underscores. `Severe toxic` → `severe_toxic`.
pub fn color_key(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Probability-like value in [0,1] as a percentage with one decimal (report
/// tables): 0.8 → `80.0%`.
pub fn percent1(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Percentage with two decimals (chart labels): 0.056 → `5.60%`.
pub fn percent2(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Polarity / subjectivity rendering, three decimal places.
pub fn score3(value: f64) -> String {
    format!("{:.3}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_category_replaces_underscores_and_capitalizes() {
        assert_eq!(display_category("severe_toxic"), "Severe toxic");
        assert_eq!(display_category("joy"), "Joy");
        assert_eq!(display_category("identity_hate"), "Identity hate");
    }

    #[test]
    fn test_display_category_single_pass_on_formatted_input() {
        // Already-formatted input keeps its shape: no double-capitalization,
        // no reintroduced underscores.
        assert_eq!(display_category("Severe toxic"), "Severe toxic");
    }

    #[test]
    fn test_display_category_empty() {
        assert_eq!(display_category(""), "");
    }

    #[test]
    fn test_color_key_round_trip() {
        assert_eq!(color_key("Severe toxic"), "severe_toxic");
        assert_eq!(color_key("PERSON"), "person");
    }

    #[test]
    fn test_percent_formatting() {
        assert_eq!(percent1(0.8), "80.0%");
        assert_eq!(percent1(0.05), "5.0%");
        assert_eq!(percent2(0.056), "5.60%");
        assert_eq!(percent2(1.0), "100.00%");
    }

    #[test]
    fn test_score3() {
        assert_eq!(score3(0.42), "0.420");
        assert_eq!(score3(-0.5), "-0.500");
        assert_eq!(score3(0.3), "0.300");
    }
}
