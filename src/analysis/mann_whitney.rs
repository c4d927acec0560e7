// Mann-Whitney U test, two-sided
//
// Exact p-value by enumerating the null distribution of U (standard
// counting recurrence) when both groups are small and tie-free;
// otherwise the normal approximation with tie and continuity
// corrections. Midranks handle ties in the statistic itself.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::analysis::{reject_nonfinite, Result, StatError};

/// Largest per-group size for which the exact null distribution is used
const EXACT_LIMIT: usize = 8;

/// How the p-value was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MwuMethod {
    /// Full enumeration of the null distribution of U
    Exact,
    /// Normal approximation with tie and continuity corrections
    Asymptotic,
}

/// Result of a Mann-Whitney U test between two independent samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MannWhitneyU {
    /// U statistic for the first sample
    pub statistic: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// Null-hypothesis midpoint n1*n2/2; U above it means the first
    /// sample tends to rank higher
    pub midpoint: f64,
    pub method: MwuMethod,
}

/// Mann-Whitney U test, two-sided
///
/// U is computed from midranks, so tied observations are handled in
/// the statistic. The exact method kicks in for tie-free samples with
/// at most 8 observations per group; everything tied across both
/// groups is a fatal error.
pub fn mann_whitney_u(first: &[f64], second: &[f64]) -> Result<MannWhitneyU> {
    let n1 = first.len();
    let n2 = second.len();
    if n1 == 0 || n2 == 0 {
        return Err(StatError::InsufficientSample {
            required: 1,
            actual: 0,
        });
    }
    reject_nonfinite(first)?;
    reject_nonfinite(second)?;

    // Pool and midrank
    let mut pooled: Vec<(f64, bool)> = first
        .iter()
        .map(|&v| (v, true))
        .chain(second.iter().map(|&v| (v, false)))
        .collect();
    pooled.sort_by(|a, b| a.0.total_cmp(&b.0));

    let n = pooled.len();
    let mut ranks = vec![0.0; n];
    let mut tie_term = 0.0;
    let mut has_ties = false;
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && pooled[j + 1].0 == pooled[i].0 {
            j += 1;
        }
        let run = (j - i + 1) as f64;
        if run > 1.0 {
            has_ties = true;
            tie_term += run * run * run - run;
        }
        let midrank = (i + j) as f64 / 2.0 + 1.0;
        for rank in ranks.iter_mut().take(j + 1).skip(i) {
            *rank = midrank;
        }
        i = j + 1;
    }

    let mut rank_sum = 0.0;
    for (idx, &(_, in_first)) in pooled.iter().enumerate() {
        if in_first {
            rank_sum += ranks[idx];
        }
    }
    let statistic = rank_sum - (n1 * (n1 + 1)) as f64 / 2.0;
    let midpoint = (n1 * n2) as f64 / 2.0;

    let (p_value, method) = if !has_ties && n1 <= EXACT_LIMIT && n2 <= EXACT_LIMIT {
        // Tie-free U is an integer
        let u = statistic.round() as usize;
        (exact_p(n1, n2, u), MwuMethod::Exact)
    } else {
        (
            asymptotic_p(n1, n2, statistic, tie_term)?,
            MwuMethod::Asymptotic,
        )
    };

    Ok(MannWhitneyU {
        statistic,
        p_value,
        midpoint,
        method,
    })
}

/// Exact two-sided p-value: 2 * min(P(U <= u), P(U >= u)), capped at 1
fn exact_p(n1: usize, n2: usize, u: usize) -> f64 {
    let counts = u_distribution(n1, n2);
    let total: f64 = counts.iter().sum();
    let le: f64 = counts[..=u].iter().sum::<f64>() / total;
    let ge: f64 = counts[u..].iter().sum::<f64>() / total;
    (2.0 * le.min(ge)).min(1.0)
}

/// Null distribution of U as counts over 0..=n1*n2
///
/// c(i, j, u) = c(i-1, j, u-j) + c(i, j-1, u): the largest pooled rank
/// either belongs to the first group (beating all j of the second) or
/// it does not.
fn u_distribution(n1: usize, n2: usize) -> Vec<f64> {
    let max_u = n1 * n2;
    let mut table = vec![vec![vec![0.0_f64; max_u + 1]; n2 + 1]; n1 + 1];
    for j in 0..=n2 {
        table[0][j][0] = 1.0;
    }
    for i in 1..=n1 {
        table[i][0][0] = 1.0;
        for j in 1..=n2 {
            for u in 0..=max_u {
                let mut count = table[i][j - 1][u];
                if u >= j {
                    count += table[i - 1][j][u - j];
                }
                table[i][j][u] = count;
            }
        }
    }
    std::mem::take(&mut table[n1][n2])
}

/// Normal approximation with tie correction and continuity correction
fn asymptotic_p(n1: usize, n2: usize, u: f64, tie_term: f64) -> Result<f64> {
    let n = (n1 + n2) as f64;
    let mu = (n1 * n2) as f64 / 2.0;
    let sigma2 = (n1 * n2) as f64 / 12.0 * ((n + 1.0) - tie_term / (n * (n - 1.0)));
    if sigma2 <= 0.0 {
        // Every observation tied across both groups
        return Err(StatError::ConstantSample);
    }

    let diff = u - mu;
    // Continuity correction shrinks |U - mu| by 0.5
    let corrected = diff - 0.5 * diff.signum();
    let z = if diff == 0.0 {
        0.0
    } else {
        corrected / sigma2.sqrt()
    };
    let std_normal = Normal::standard();
    Ok((2.0 * std_normal.cdf(-z.abs())).min(1.0))
}
