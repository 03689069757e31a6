//! Embedded chart block extraction.
//!
//! Generation results may carry structured chart data inside a comment-like
//! block: `<!-- CHART_DATA {json} -->`. The block is always stripped from the
//! displayed text; parsing it is best-effort and a parse failure only means
//! the chart is omitted.

use serde::Deserialize;

const BLOCK_OPEN: &str = "<!-- CHART_DATA";
const BLOCK_CLOSE: &str = "-->";

/// Chart presentation mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartKind {
    /// Discrete bars, legend hidden.
    #[default]
    Bar,
    /// Radial axes with a filled region, legend shown.
    Radar,
}

impl ChartKind {
    /// Maps the wire `type` field to a kind. Anything but "radar" is bar.
    fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some("radar") => ChartKind::Radar,
            _ => ChartKind::Bar,
        }
    }
}

/// Parsed chart data from an embedded block.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    pub label: Option<String>,
    pub unit: Option<String>,
}

/// Wire shape of the embedded JSON payload.
#[derive(Debug, Deserialize)]
struct RawChartSpec {
    #[serde(rename = "type")]
    kind: Option<String>,
    labels: Vec<String>,
    data: Vec<f64>,
    label: Option<String>,
    unit: Option<String>,
}

impl ChartSpec {
    fn from_raw(raw: RawChartSpec) -> Self {
        Self {
            kind: ChartKind::from_wire(raw.kind.as_deref()),
            labels: raw.labels,
            data: raw.data,
            label: raw.label,
            unit: raw.unit,
        }
    }

    /// Legend label for the series.
    pub fn series_label(&self) -> &str {
        self.label.as_deref().unwrap_or("Data")
    }

    /// Zipped (label, value) points. Extra labels or values are ignored.
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.data.iter().copied())
    }

    /// True when there are no renderable points.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.data.is_empty()
    }
}

/// Result of scanning a generation result for chart blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartExtraction {
    /// Input text with every complete chart block removed.
    pub text: String,
    /// Chart parsed from the first block, if any parsed.
    pub chart: Option<ChartSpec>,
}

/// Strips chart blocks from `input` and parses the first one.
///
/// Every complete `<!-- CHART_DATA ... -->` block is removed from the text
/// whether or not its payload parses. An unterminated block (no closing
/// marker) is left in place.
pub fn extract_chart_block(input: &str) -> ChartExtraction {
    let mut text = String::with_capacity(input.len());
    let mut chart = None;
    let mut rest = input;

    loop {
        let Some(open) = rest.find(BLOCK_OPEN) else {
            text.push_str(rest);
            break;
        };
        let after_open = &rest[open + BLOCK_OPEN.len()..];
        let Some(close) = after_open.find(BLOCK_CLOSE) else {
            // No closing marker: keep the tail as-is
            text.push_str(rest);
            break;
        };

        text.push_str(&rest[..open]);

        if chart.is_none() {
            let payload = after_open[..close].trim();
            if let Ok(raw) = serde_json::from_str::<RawChartSpec>(payload) {
                chart = Some(ChartSpec::from_raw(raw));
            }
        }

        rest = &after_open[close + BLOCK_CLOSE.len()..];
    }

    ChartExtraction { text, chart }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_and_strips_bar_chart() {
        let input = "Before\n<!-- CHART_DATA {\"labels\": [\"a\", \"b\"], \"data\": [1, 2]} -->\nAfter";
        let out = extract_chart_block(input);

        assert_eq!(out.text, "Before\n\nAfter");
        let chart = out.chart.unwrap();
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.labels, vec!["a", "b"]);
        assert_eq!(chart.data, vec![1.0, 2.0]);
    }

    #[test]
    fn test_radar_type_with_label_and_unit() {
        let input = r#"<!-- CHART_DATA {"type": "radar", "labels": ["x"], "data": [5], "label": "Demand", "unit": "LPA"} -->"#;
        let out = extract_chart_block(input);

        let chart = out.chart.unwrap();
        assert_eq!(chart.kind, ChartKind::Radar);
        assert_eq!(chart.series_label(), "Demand");
        assert_eq!(chart.unit.as_deref(), Some("LPA"));
    }

    #[test]
    fn test_unknown_type_defaults_to_bar() {
        let input = r#"<!-- CHART_DATA {"type": "line", "labels": ["x"], "data": [1]} -->"#;
        let out = extract_chart_block(input);
        assert_eq!(out.chart.unwrap().kind, ChartKind::Bar);
    }

    #[test]
    fn test_malformed_block_is_stripped_without_chart() {
        let input = "Intro\n<!-- CHART_DATA {not json} -->\nOutro";
        let out = extract_chart_block(input);

        assert_eq!(out.text, "Intro\n\nOutro");
        assert!(out.chart.is_none());
    }

    #[test]
    fn test_multiple_blocks_all_stripped_first_parsed() {
        let input = "\
<!-- CHART_DATA {\"labels\": [\"first\"], \"data\": [1]} -->mid\
<!-- CHART_DATA {\"labels\": [\"second\"], \"data\": [2]} -->";
        let out = extract_chart_block(input);

        assert_eq!(out.text, "mid");
        assert_eq!(out.chart.unwrap().labels, vec!["first"]);
    }

    #[test]
    fn test_unterminated_block_left_in_place() {
        let input = "Text <!-- CHART_DATA {\"labels\": [], \"data\": []}";
        let out = extract_chart_block(input);

        assert_eq!(out.text, input);
        assert!(out.chart.is_none());
    }

    #[test]
    fn test_no_block_passes_text_through() {
        let input = "# Heading\n\nJust prose.";
        let out = extract_chart_block(input);

        assert_eq!(out.text, input);
        assert!(out.chart.is_none());
    }

    #[test]
    fn test_points_zip_ignores_extras() {
        let chart = ChartSpec {
            kind: ChartKind::Bar,
            labels: vec!["a".into(), "b".into(), "c".into()],
            data: vec![1.0, 2.0],
            label: None,
            unit: None,
        };

        let points: Vec<(&str, f64)> = chart.points().collect();
        assert_eq!(points, vec![("a", 1.0), ("b", 2.0)]);
    }

    #[test]
    fn test_default_series_label() {
        let chart = ChartSpec {
            kind: ChartKind::Bar,
            labels: vec!["a".into()],
            data: vec![1.0],
            label: None,
            unit: None,
        };
        assert_eq!(chart.series_label(), "Data");
    }

    #[test]
    fn test_missing_required_fields_means_no_chart() {
        let input = r#"<!-- CHART_DATA {"type": "bar"} -->"#;
        let out = extract_chart_block(input);

        assert_eq!(out.text, "");
        assert!(out.chart.is_none());
    }
}
