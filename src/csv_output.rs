//! CSV output format for comparison results
//!
//! One row per marker, for spreadsheet analysis and machine parsing.

use crate::analysis::{MarkerComparison, Significance};

/// CSV record for a single marker comparison
#[derive(Debug, Clone)]
pub struct CsvRow {
    pub marker: String,
    pub test: String,
    pub statistic: f64,
    pub p_value: f64,
    pub control_normality_p: f64,
    pub eci_normality_p: f64,
    pub significant: bool,
    pub higher_group: Option<String>,
}

/// CSV output formatter
#[derive(Debug, Default)]
pub struct CsvOutput {
    rows: Vec<CsvRow>,
}

impl CsvOutput {
    /// Create a new CSV output formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the formatter from a set of comparisons at the given alpha
    pub fn from_comparisons(results: &[MarkerComparison], alpha: f64) -> Self {
        let mut output = Self::new();
        for result in results {
            let higher_group = match result.significance(alpha) {
                Significance::Higher(group) => Some(group.name().to_string()),
                Significance::NotSignificant => None,
            };
            output.add_row(CsvRow {
                marker: result.marker.name().to_string(),
                test: result.test.label().to_string(),
                statistic: result.statistic,
                p_value: result.p_value,
                control_normality_p: result.normality.control_p,
                eci_normality_p: result.normality.eci_p,
                significant: higher_group.is_some(),
                higher_group,
            });
        }
        output
    }

    /// Add a row to the output
    pub fn add_row(&mut self, row: CsvRow) {
        self.rows.push(row);
    }

    /// Header row
    fn header() -> &'static str {
        "marker,test,statistic,p_value,control_normality_p,eci_normality_p,significant,higher_group"
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Format one comparison as a CSV row
    fn format_row(row: &CsvRow) -> String {
        let fields = [
            Self::escape_field(&row.marker),
            Self::escape_field(&row.test),
            format!("{:.5}", row.statistic),
            format!("{:.5}", row.p_value),
            format!("{:.5}", row.control_normality_p),
            format!("{:.5}", row.eci_normality_p),
            row.significant.to_string(),
            row.higher_group.clone().unwrap_or_default(),
        ];
        fields.join(",")
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(Self::header());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&Self::format_row(row));
            output.push('\n');
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{compare_panel, AnalysisConfig};
    use crate::dataset::builtin_panel;

    fn builtin_csv() -> String {
        let config = AnalysisConfig::default();
        let results = compare_panel(&builtin_panel(), &config).unwrap();
        CsvOutput::from_comparisons(&results, config.alpha).to_csv()
    }

    #[test]
    fn test_csv_header_first() {
        let csv = builtin_csv();
        assert!(csv.starts_with("marker,test,statistic,p_value"));
    }

    #[test]
    fn test_csv_one_row_per_marker() {
        let csv = builtin_csv();
        // Header plus four data rows
        assert_eq!(csv.lines().count(), 5);
        assert!(csv.contains("GFAP,t-Student,"));
        assert!(csv.contains("CB,Mann-Whitney U,"));
    }

    #[test]
    fn test_csv_not_significant_leaves_group_empty() {
        let csv = builtin_csv();
        for line in csv.lines().skip(1) {
            assert!(line.ends_with(",false,"), "line: {}", line);
        }
    }

    #[test]
    fn test_csv_escapes_commas() {
        assert_eq!(CsvOutput::escape_field("a,b"), "\"a,b\"");
        assert_eq!(CsvOutput::escape_field("plain"), "plain");
        assert_eq!(CsvOutput::escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_csv_empty_output_is_header_only() {
        let output = CsvOutput::new();
        assert_eq!(output.to_csv().lines().count(), 1);
    }
}
