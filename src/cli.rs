//! CLI argument parsing for Contraste

use clap::{Parser, ValueEnum};

/// Output format for comparison results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "contraste")]
#[command(version)]
#[command(about = "Normality-gated CONTROL vs. ECI biomarker comparison", long_about = None)]
pub struct Cli {
    /// Output format (text, json, or csv)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Significance level for the normality gate and the two-group tests
    #[arg(long = "alpha", value_name = "ALPHA", default_value = "0.05")]
    pub alpha: f64,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["contraste"]);
        assert!(matches!(cli.format, OutputFormat::Text));
        assert_eq!(cli.alpha, 0.05);
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_format_json() {
        let cli = Cli::parse_from(["contraste", "--format", "json"]);
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn test_cli_format_csv() {
        let cli = Cli::parse_from(["contraste", "--format", "csv"]);
        assert!(matches!(cli.format, OutputFormat::Csv));
    }

    #[test]
    fn test_cli_alpha_custom() {
        let cli = Cli::parse_from(["contraste", "--alpha", "0.01"]);
        assert_eq!(cli.alpha, 0.01);
    }

    #[test]
    fn test_cli_debug_flag() {
        let cli = Cli::parse_from(["contraste", "--debug"]);
        assert!(cli.debug);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["contraste", "--format", "yaml"]).is_err());
    }
}
