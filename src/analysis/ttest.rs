// Welch's two-sample t-test (unequal variances), two-sided
//
// Statistic and Welch-Satterthwaite degrees of freedom computed on f64
// slices; the tail probability comes from statrs's Student's t CDF.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::analysis::{mean, reject_nonfinite, var_sample, Result, StatError};

/// Result of a Welch's t-test between two independent samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WelchTTest {
    /// t statistic; positive when the first sample's mean is higher
    pub statistic: f64,
    /// Welch-Satterthwaite degrees of freedom
    pub df: f64,
    /// Two-sided p-value
    pub p_value: f64,
}

/// Welch's independent two-sample t-test, two-sided
///
/// Does not assume equal variances. Needs at least 2 finite
/// observations per sample and a non-zero pooled standard error;
/// two constant samples are a fatal error.
pub fn welch_t_test(first: &[f64], second: &[f64]) -> Result<WelchTTest> {
    let n1 = first.len();
    let n2 = second.len();
    if n1 < 2 || n2 < 2 {
        return Err(StatError::InsufficientSample {
            required: 2,
            actual: n1.min(n2),
        });
    }
    reject_nonfinite(first)?;
    reject_nonfinite(second)?;

    let m1 = mean(first);
    let m2 = mean(second);
    let sem1 = var_sample(first, m1) / n1 as f64;
    let sem2 = var_sample(second, m2) / n2 as f64;

    let se2 = sem1 + sem2;
    if se2 <= 0.0 {
        return Err(StatError::ConstantSample);
    }

    let statistic = (m1 - m2) / se2.sqrt();
    let df = se2 * se2 / (sem1 * sem1 / (n1 as f64 - 1.0) + sem2 * sem2 / (n2 as f64 - 1.0));

    // df > 0 is guaranteed once se2 > 0, so construction cannot fail
    let p_value = match StudentsT::new(0.0, 1.0, df) {
        Ok(t_dist) => (2.0 * t_dist.cdf(-statistic.abs())).min(1.0),
        Err(_) => return Err(StatError::ConstantSample),
    };

    Ok(WelchTTest {
        statistic,
        df,
        p_value,
    })
}
