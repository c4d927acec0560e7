// Configuration for the gated comparison

use serde::{Deserialize, Serialize};

/// Configuration for the normality-gated two-group comparison
///
/// One significance level drives both decisions: a sample counts as
/// normal when its Shapiro-Wilk p-value exceeds `alpha`, and a marker
/// difference counts as significant when the chosen test's p-value is
/// strictly below `alpha`.
///
/// # Example
/// ```
/// use contraste::analysis::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.alpha, 0.05); // 95% confidence
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Statistical significance level (alpha)
    ///
    /// - 0.05 (default): 95% confidence level
    /// - 0.01: 99% confidence level, stricter
    /// - 0.10: 90% confidence level, looser
    ///
    /// A p-value of exactly `alpha` is NOT significant (strict
    /// inequality), and a Shapiro-Wilk p-value of exactly `alpha` does
    /// NOT count as normal.
    pub alpha: f64,

    /// Minimum observations required per sample
    ///
    /// Shapiro-Wilk needs at least 3 observations; the builtin panel
    /// carries 4 per group.
    ///
    /// Default: 3
    pub min_sample_len: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,       // 95% confidence (standard in science)
            min_sample_len: 3, // Shapiro-Wilk lower bound
        }
    }
}

impl AnalysisConfig {
    /// Strict configuration (fewer false positives, more false negatives)
    pub fn strict() -> Self {
        Self {
            alpha: 0.01, // 99% confidence
            min_sample_len: 3,
        }
    }

    /// Permissive configuration (more false positives, fewer false negatives)
    pub fn permissive() -> Self {
        Self {
            alpha: 0.10, // 90% confidence
            min_sample_len: 3,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(format!("alpha must be in (0, 1), got {}", self.alpha));
        }

        if self.min_sample_len < 3 {
            return Err(format!(
                "min_sample_len must be >= 3 for Shapiro-Wilk, got {}",
                self.min_sample_len
            ));
        }

        Ok(())
    }
}
