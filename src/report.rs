//! Text report for the CONTROL vs. ECI comparison
//!
//! Per-marker narration (normality block, applied test), a final
//! results table, and the interpretation lines.

use crate::analysis::{AnalysisConfig, MarkerComparison};

/// Render the full text report for a set of marker comparisons
pub fn render_report(results: &[MarkerComparison], config: &AnalysisConfig) -> String {
    let mut report = String::new();

    for result in results {
        report.push_str(&format!(
            "🔍 Normality (Shapiro-Wilk) for {}\n",
            result.marker
        ));
        report.push_str(&format!(
            "   - CONTROL p-value: {:.5}\n",
            result.normality.control_p
        ));
        report.push_str(&format!(
            "   - ECI p-value:     {:.5}\n",
            result.normality.eci_p
        ));

        if result.normality.both_normal {
            report.push_str("✅ Both groups normal. Applying t-Student.\n");
        } else {
            report.push_str("⚠️  At least one group is NOT normal. Applying Mann-Whitney U.\n");
        }

        report.push_str(&format!(
            "📊 Test applied for {}: {}\n",
            result.marker, result.test
        ));
        report.push_str(&format!("   - Statistic: {:.5}\n", result.statistic));
        report.push_str(&format!("   - P-Value:   {:.5}\n\n", result.p_value));
    }

    // Aggregated results table
    report.push_str("🔹 Final results:\n");
    report.push_str(&format!(
        "{:<8} {:<16} {:>12} {:>12}\n",
        "marker", "test", "statistic", "p-value"
    ));
    for result in results {
        report.push_str(&format!(
            "{:<8} {:<16} {:>12.5} {:>12.5}\n",
            result.marker.name(),
            result.test.label(),
            result.statistic,
            result.p_value
        ));
    }

    report.push_str("\n🔹 Interpretation:\n");
    for result in results {
        report.push_str(&result.interpretation(config.alpha));
        report.push('\n');
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::compare_panel;
    use crate::dataset::builtin_panel;

    fn builtin_report() -> String {
        let config = AnalysisConfig::default();
        let results = compare_panel(&builtin_panel(), &config).unwrap();
        render_report(&results, &config)
    }

    #[test]
    fn test_report_contains_all_markers() {
        let report = builtin_report();
        for name in ["GFAP", "Ki67", "DCX", "CB"] {
            assert!(report.contains(name), "missing {}", name);
        }
    }

    #[test]
    fn test_report_contains_sections() {
        let report = builtin_report();
        assert!(report.contains("🔍 Normality (Shapiro-Wilk) for GFAP"));
        assert!(report.contains("🔹 Final results:"));
        assert!(report.contains("🔹 Interpretation:"));
    }

    #[test]
    fn test_report_shows_both_test_kinds() {
        let report = builtin_report();
        assert!(report.contains("t-Student"));
        assert!(report.contains("Mann-Whitney U"));
    }

    #[test]
    fn test_report_interpretation_lines_for_builtin_panel() {
        // Nothing is significant on the builtin panel at alpha 0.05
        let report = builtin_report();
        assert_eq!(report.matches('❌').count(), 4);
        assert!(report.contains("no significant difference"));
    }

    #[test]
    fn test_report_is_idempotent() {
        assert_eq!(builtin_report(), builtin_report());
    }
}
