//! JSON output format for comparison results

use serde::{Deserialize, Serialize};

use crate::analysis::{MarkerComparison, Significance};

/// Normality block for one marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonNormality {
    /// Shapiro-Wilk p-value for the CONTROL sample
    pub control_p_value: f64,
    /// Shapiro-Wilk p-value for the ECI sample
    pub eci_p_value: f64,
    pub both_normal: bool,
}

/// One marker's comparison outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonComparison {
    /// Marker name (e.g., "GFAP")
    pub marker: String,
    /// Applied test label ("t-Student" or "Mann-Whitney U")
    pub test: String,
    pub statistic: f64,
    pub p_value: f64,
    pub normality: JsonNormality,
    /// True when p_value is strictly below alpha
    pub significant: bool,
    /// Group with significantly higher values (absent when not significant)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub higher_group: Option<String>,
}

impl JsonComparison {
    /// Build the JSON record for one comparison at the given alpha
    pub fn from_comparison(result: &MarkerComparison, alpha: f64) -> Self {
        let higher_group = match result.significance(alpha) {
            Significance::Higher(group) => Some(group.name().to_string()),
            Significance::NotSignificant => None,
        };

        Self {
            marker: result.marker.name().to_string(),
            test: result.test.label().to_string(),
            statistic: result.statistic,
            p_value: result.p_value,
            normality: JsonNormality {
                control_p_value: result.normality.control_p,
                eci_p_value: result.normality.eci_p,
                both_normal: result.normality.both_normal,
            },
            significant: higher_group.is_some(),
            higher_group,
        }
    }
}

/// Serialize a full set of comparisons as a pretty-printed JSON array
pub fn to_json_string(results: &[MarkerComparison], alpha: f64) -> serde_json::Result<String> {
    let records: Vec<JsonComparison> = results
        .iter()
        .map(|r| JsonComparison::from_comparison(r, alpha))
        .collect();
    serde_json::to_string_pretty(&records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{compare_panel, AnalysisConfig};
    use crate::dataset::builtin_panel;

    fn builtin_records() -> Vec<JsonComparison> {
        let config = AnalysisConfig::default();
        compare_panel(&builtin_panel(), &config)
            .unwrap()
            .iter()
            .map(|r| JsonComparison::from_comparison(r, config.alpha))
            .collect()
    }

    #[test]
    fn test_json_records_cover_panel() {
        let records = builtin_records();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].marker, "GFAP");
        assert_eq!(records[0].test, "t-Student");
        assert_eq!(records[1].test, "Mann-Whitney U");
    }

    #[test]
    fn test_json_not_significant_omits_higher_group() {
        let records = builtin_records();
        for record in &records {
            assert!(!record.significant);
            assert!(record.higher_group.is_none());
        }

        let json = serde_json::to_string(&records).unwrap();
        assert!(!json.contains("higher_group"));
    }

    #[test]
    fn test_json_string_parses_back() {
        let config = AnalysisConfig::default();
        let results = compare_panel(&builtin_panel(), &config).unwrap();
        let json = to_json_string(&results, config.alpha).unwrap();

        let parsed: Vec<JsonComparison> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed[3].marker, "CB");
        assert!((parsed[3].p_value - 0.685_714).abs() < 1e-4);
    }

    #[test]
    fn test_json_significant_comparison_names_group() {
        use crate::analysis::compare_marker;
        use crate::dataset::{Marker, MarkerPair};

        let pair = MarkerPair::new(
            Marker::Gfap,
            vec![100.0, 102.0, 101.0, 103.0],
            vec![10.0, 12.0, 11.0, 13.0],
        );
        let result = compare_marker(&pair, &AnalysisConfig::default()).unwrap();
        let record = JsonComparison::from_comparison(&result, 0.05);
        assert!(record.significant);
        assert_eq!(record.higher_group.as_deref(), Some("CONTROL"));
    }
}
