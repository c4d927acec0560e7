// Per-marker verdict: normality gate, test selection, interpretation
//
// One deterministic forward pass per marker: Shapiro-Wilk on both
// groups decides between Welch's t-test and Mann-Whitney U, and the
// chosen test's p-value decides significance at the configured alpha.

use std::fmt;

use crate::analysis::config::AnalysisConfig;
use crate::analysis::mann_whitney::mann_whitney_u;
use crate::analysis::normality::shapiro_wilk;
use crate::analysis::ttest::welch_t_test;
use crate::analysis::{Result, StatError};
use crate::dataset::{Group, Marker, MarkerPair};

/// Statistical test chosen by the normality gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestKind {
    /// Welch's two-sample t-test (both groups normal)
    StudentT,
    /// Mann-Whitney U test (at least one group non-normal)
    MannWhitneyU,
}

impl TestKind {
    /// Display label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            TestKind::StudentT => "t-Student",
            TestKind::MannWhitneyU => "Mann-Whitney U",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shapiro-Wilk p-values for a CONTROL/ECI pair
#[derive(Debug, Clone, Copy)]
pub struct NormalityCheck {
    pub control_p: f64,
    pub eci_p: f64,
    /// True iff both p-values are strictly above alpha
    pub both_normal: bool,
}

impl NormalityCheck {
    /// Run Shapiro-Wilk on both groups and apply the gate
    pub fn run(control: &[f64], eci: &[f64], alpha: f64) -> Result<Self> {
        let control_p = shapiro_wilk(control)?.p_value;
        let eci_p = shapiro_wilk(eci)?.p_value;
        Ok(Self {
            control_p,
            eci_p,
            both_normal: control_p > alpha && eci_p > alpha,
        })
    }
}

/// Significance classification of a comparison at a given alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Significance {
    /// p < alpha; this group's values are significantly higher
    Higher(Group),
    /// p >= alpha (a p-value of exactly alpha lands here)
    NotSignificant,
}

/// Outcome of the gated comparison for one marker
///
/// Created once per marker, never mutated.
#[derive(Debug, Clone)]
pub struct MarkerComparison {
    pub marker: Marker,
    pub normality: NormalityCheck,
    pub test: TestKind,
    pub statistic: f64,
    pub p_value: f64,
    /// Group the statistic leans toward; only meaningful when the
    /// p-value clears alpha
    pub leaning: Group,
}

impl MarkerComparison {
    /// Classify significance at the given alpha (strict inequality)
    pub fn significance(&self, alpha: f64) -> Significance {
        if self.p_value < alpha {
            Significance::Higher(self.leaning)
        } else {
            Significance::NotSignificant
        }
    }

    /// Human-readable interpretation line
    pub fn interpretation(&self, alpha: f64) -> String {
        match self.significance(alpha) {
            Significance::Higher(group) => format!(
                "✅ {}: {} values are significantly higher than {} ({}, p = {:.5})",
                self.marker,
                group,
                group.other(),
                self.test,
                self.p_value
            ),
            Significance::NotSignificant => format!(
                "❌ {}: no significant difference between CONTROL and ECI ({}, p = {:.5})",
                self.marker, self.test, self.p_value
            ),
        }
    }
}

/// Compare one marker's CONTROL and ECI samples
///
/// Both groups normal per Shapiro-Wilk: Welch's t-test. Otherwise:
/// Mann-Whitney U. The direction a significant result reports is the
/// group whose values actually sit higher: the sign of t for Welch
/// (CONTROL is the first sample), the side of the null midpoint for U.
pub fn compare_marker(pair: &MarkerPair, config: &AnalysisConfig) -> Result<MarkerComparison> {
    pair.validate(config.min_sample_len)
        .map_err(StatError::InvalidPanel)?;

    let normality = NormalityCheck::run(&pair.control, &pair.eci, config.alpha)?;
    tracing::debug!(
        marker = %pair.marker,
        control_p = normality.control_p,
        eci_p = normality.eci_p,
        both_normal = normality.both_normal,
        "normality gate"
    );

    let (test, statistic, p_value, leaning) = if normality.both_normal {
        let t = welch_t_test(&pair.control, &pair.eci)?;
        let leaning = if t.statistic >= 0.0 {
            Group::Control
        } else {
            Group::Eci
        };
        (TestKind::StudentT, t.statistic, t.p_value, leaning)
    } else {
        let u = mann_whitney_u(&pair.control, &pair.eci)?;
        let leaning = if u.statistic >= u.midpoint {
            Group::Control
        } else {
            Group::Eci
        };
        (TestKind::MannWhitneyU, u.statistic, u.p_value, leaning)
    };

    tracing::debug!(
        marker = %pair.marker,
        test = %test,
        statistic,
        p_value,
        "test applied"
    );

    Ok(MarkerComparison {
        marker: pair.marker,
        normality,
        test,
        statistic,
        p_value,
        leaning,
    })
}

/// Compare every marker of a panel, in panel order
pub fn compare_panel(
    panel: &[MarkerPair],
    config: &AnalysisConfig,
) -> Result<Vec<MarkerComparison>> {
    config.validate().map_err(StatError::InvalidConfig)?;
    panel
        .iter()
        .map(|pair| compare_marker(pair, config))
        .collect()
}
