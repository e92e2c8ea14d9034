//! sentilens-charts — chart-data preparation for the dashboard renderers.
//!
//! A chart here is a pure function of a `{category: score}` mapping, a title,
//! and a color lookup. Near-zero entries are filtered out, values become
//! percentages, and each entry gets its color resolved up front so the
//! renderer receives a parallel color per entry rather than a lookup callback.

use std::collections::BTreeMap;

use sentilens_common::format::display_category;
use sentilens_common::ColorMap;
use serde::Serialize;

/// Entries whose percentage value falls below this are dropped for visual
/// clarity.
pub const MIN_VISIBLE_PERCENT: f64 = 0.01;

/// Fallback slice color for the distribution (pie) chart.
pub const DISTRIBUTION_FALLBACK_COLOR: &str = "#FF7F50";

/// Fallback bar color for the breakdown (bar) chart.
pub const BREAKDOWN_FALLBACK_COLOR: &str = "#8884d8";

/// Placeholder shown when every entry was filtered out.
pub const NO_DATA_MESSAGE: &str = "No significant data to display for this chart.";

/// One visual element: display name, percentage value (two decimals), and the
/// precomputed display color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartEntry {
    pub name: String,
    pub value: f64,
    pub color: String,
}

/// A prepared chart: either a non-empty entry list or the placeholder path.
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub title: String,
    pub entries: Vec<ChartEntry>,
}

impl Chart {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Filter, format, and color a score mapping.
pub fn prepare(
    data: &BTreeMap<String, f64>,
    colors: &ColorMap,
    fallback_color: &str,
) -> Vec<ChartEntry> {
    data.iter()
        .filter(|(_, value)| *value * 100.0 >= MIN_VISIBLE_PERCENT)
        .map(|(key, value)| ChartEntry {
            name: display_category(key),
            value: (*value * 10_000.0).round() / 100.0,
            color: colors.lookup(key).unwrap_or(fallback_color).to_string(),
        })
        .collect()
}

/// Distribution (pie) chart over a score mapping.
pub fn distribution(title: &str, data: &BTreeMap<String, f64>, colors: &ColorMap) -> Chart {
    Chart {
        title: title.to_string(),
        entries: prepare(data, colors, DISTRIBUTION_FALLBACK_COLOR),
    }
}

/// Breakdown (bar) chart over a score mapping.
pub fn breakdown(title: &str, data: &BTreeMap<String, f64>, colors: &ColorMap) -> Chart {
    Chart {
        title: title.to_string(),
        entries: prepare(data, colors, BREAKDOWN_FALLBACK_COLOR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_one_entry_per_visible_category() {
        let data = scores(&[("joy", 0.8), ("anger", 0.1), ("fear", 0.00005)]);
        let entries = prepare(&data, &ColorMap::emotions(), DISTRIBUTION_FALLBACK_COLOR);
        // fear is 0.005% — below the 0.01% floor
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.name != "Fear"));
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let data = scores(&[("joy", 0.0001)]);
        let entries = prepare(&data, &ColorMap::emotions(), DISTRIBUTION_FALLBACK_COLOR);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].value, 0.01);
    }

    #[test]
    fn test_empty_mapping_takes_placeholder_path() {
        let chart = distribution("Emotions", &BTreeMap::new(), &ColorMap::emotions());
        assert!(chart.is_empty());
        assert_eq!(NO_DATA_MESSAGE, "No significant data to display for this chart.");
    }

    #[test]
    fn test_values_are_percentages_to_two_decimals() {
        let data = scores(&[("toxic", 0.05678)]);
        let entries = prepare(&data, &ColorMap::toxicity(), BREAKDOWN_FALLBACK_COLOR);
        assert_eq!(entries[0].value, 5.68);
    }

    #[test]
    fn test_names_are_display_formatted() {
        let data = scores(&[("severe_toxic", 0.3)]);
        let entries = prepare(&data, &ColorMap::toxicity(), BREAKDOWN_FALLBACK_COLOR);
        assert_eq!(entries[0].name, "Severe toxic");
        assert_eq!(entries[0].color, "#991B1B");
    }

    #[test]
    fn test_unmapped_category_gets_fallback_color() {
        let data = scores(&[("boredom", 0.4)]);
        let entries = prepare(&data, &ColorMap::emotions(), DISTRIBUTION_FALLBACK_COLOR);
        assert_eq!(entries[0].color, DISTRIBUTION_FALLBACK_COLOR);
    }
}
