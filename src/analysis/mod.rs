// Normality-gated two-group comparison
//
// Statistical core of the crate: Shapiro-Wilk normality gate, Welch's
// t-test, Mann-Whitney U, and the per-marker verdict. Test statistics
// are computed in-crate on f64 slices; p-values come from statrs
// distributions (Normal, Student's t).

mod config;
mod mann_whitney;
mod normality;
mod ttest;
mod verdict;

pub use config::AnalysisConfig;
pub use mann_whitney::{mann_whitney_u, MannWhitneyU, MwuMethod};
pub use normality::{shapiro_wilk, ShapiroWilk};
pub use ttest::{welch_t_test, WelchTTest};
pub use verdict::{
    compare_marker, compare_panel, MarkerComparison, NormalityCheck, Significance, TestKind,
};

use thiserror::Error;

/// Errors from the statistical routines
///
/// All of these are fatal to the run: the binary propagates them up to
/// `main` and terminates with an error trace.
#[derive(Error, Debug)]
pub enum StatError {
    #[error("Insufficient sample: need at least {required} observations, got {actual}")]
    InsufficientSample { required: usize, actual: usize },

    #[error("Sample contains a non-finite value")]
    NonFinite,

    #[error("Degenerate sample: observations have zero spread")]
    ConstantSample,

    #[error("Invalid panel: {0}")]
    InvalidPanel(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, StatError>;

/// Reject NaN / Inf inputs before any test statistic is computed
#[inline]
pub(crate) fn reject_nonfinite(xs: &[f64]) -> Result<()> {
    if xs.iter().any(|v| !v.is_finite()) {
        Err(StatError::NonFinite)
    } else {
        Ok(())
    }
}

/// Mean of a slice (callers guarantee non-empty input)
#[inline]
pub(crate) fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / (xs.len() as f64)
}

/// Sample variance (ddof = 1); callers guarantee at least 2 observations
#[inline]
pub(crate) fn var_sample(xs: &[f64], mean: f64) -> f64 {
    let ss: f64 = xs.iter().map(|&v| (v - mean) * (v - mean)).sum();
    ss / ((xs.len() - 1) as f64)
}
