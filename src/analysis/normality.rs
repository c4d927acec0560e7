// Shapiro-Wilk normality test, Royston's AS R94 approximation
//
// Royston, P. (1995). Remark AS R94: A remark on Algorithm AS 181:
// The W-test for normality. Applied Statistics, 44(4), 547-551.
//
// W is computed from Blom-score coefficients over the sorted sample;
// the p-value comes from the n-dependent normalizing transform. Uses
// statrs's standard Normal for quantiles and the tail probability.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::analysis::{reject_nonfinite, Result, StatError};

/// Outcome of a Shapiro-Wilk test on a single sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapiroWilk {
    /// W statistic, in (0, 1]; values near 1 are consistent with normality
    pub statistic: f64,
    /// Upper-tail p-value for the null hypothesis of normality
    pub p_value: f64,
}

// AS R94 polynomial coefficients (ascending powers)
const C1: [f64; 6] = [0.0, 0.221_157, -0.147_981, -2.071_190, 4.434_685, -2.706_056];
const C2: [f64; 6] = [0.0, 0.042_981, -0.293_762, -1.752_461, 5.682_633, -3.582_633];
const C3: [f64; 4] = [0.544_0, -0.399_78, 0.025_054, -6.714e-4];
const C4: [f64; 4] = [1.382_2, -0.778_57, 0.062_767, -0.002_032_2];
const C5: [f64; 4] = [-1.586_1, -0.310_82, -0.083_751, 0.003_891_5];
const C6: [f64; 3] = [-0.480_3, -0.082_676, 0.003_030_2];
const G: [f64; 2] = [-2.273, 0.459];

/// Evaluate a polynomial with coefficients in ascending order (Horner)
fn poly(coef: &[f64], x: f64) -> f64 {
    coef.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Shapiro-Wilk test for normality of a single sample
///
/// Requires at least 3 finite observations with non-zero spread;
/// degenerate input is a fatal error, not a p-value.
pub fn shapiro_wilk(sample: &[f64]) -> Result<ShapiroWilk> {
    let n = sample.len();
    if n < 3 {
        return Err(StatError::InsufficientSample {
            required: 3,
            actual: n,
        });
    }
    reject_nonfinite(sample)?;

    let mut x = sample.to_vec();
    x.sort_by(f64::total_cmp);

    if x[n - 1] - x[0] <= 0.0 {
        return Err(StatError::ConstantSample);
    }

    let an = n as f64;
    let n2 = n / 2;
    let std_normal = Normal::standard();

    // Blom scores for the lower half of the order statistics
    let an25 = an + 0.25;
    let m: Vec<f64> = (1..=n2)
        .map(|i| std_normal.inverse_cdf((i as f64 - 0.375) / an25))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / an.sqrt();

    // Royston-corrected coefficients: the largest one (two for n > 5)
    // come from the C1/C2 polynomials, the rest are renormalized
    let mut a = vec![0.0; n2];
    if n == 3 {
        a[0] = std::f64::consts::FRAC_1_SQRT_2;
    } else {
        let a1 = poly(&C1, rsn) - m[0] / ssumm2;
        if n > 5 {
            let a2 = poly(&C2, rsn) - m[1] / ssumm2;
            let fac = ((summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1])
                / (1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2))
                .sqrt();
            a[0] = a1;
            a[1] = a2;
            for i in 2..n2 {
                a[i] = -m[i] / fac;
            }
        } else {
            let fac = ((summ2 - 2.0 * m[0] * m[0]) / (1.0 - 2.0 * a1 * a1)).sqrt();
            a[0] = a1;
            for i in 1..n2 {
                a[i] = -m[i] / fac;
            }
        }
    }

    // W from the symmetric differences of the sorted sample
    let mean = crate::analysis::mean(&x);
    let ssq: f64 = x.iter().map(|v| (v - mean) * (v - mean)).sum();
    if ssq <= 0.0 {
        return Err(StatError::ConstantSample);
    }
    let sax: f64 = (0..n2).map(|i| a[i] * (x[n - 1 - i] - x[i])).sum();
    let w = (sax * sax / ssq).min(1.0);

    let p_value = if n == 3 {
        // Exact for n == 3
        const PI6: f64 = 1.909_859_317_102_744; // 6/pi
        const STQR: f64 = 1.047_197_551_196_598; // asin(sqrt(3/4))
        (PI6 * (w.sqrt().asin() - STQR)).clamp(0.0, 1.0)
    } else {
        let y = (-w).ln_1p(); // ln(1 - W)
        let (value, mu, sigma) = if n <= 11 {
            // gamma - ln(1 - W) stays positive for any attainable W at these n
            let gamma = poly(&G, an);
            (-(gamma - y).ln(), poly(&C3, an), poly(&C4, an).exp())
        } else {
            let log_n = an.ln();
            (y, poly(&C5, log_n), poly(&C6, log_n).exp())
        };
        let z = (value - mu) / sigma;
        std_normal.cdf(-z)
    };

    Ok(ShapiroWilk {
        statistic: w,
        p_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-4;

    #[test]
    fn test_shapiro_wilk_uniform_spacing_n8() {
        // Evenly spaced values look normal enough to pass
        let sample = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let result = shapiro_wilk(&sample).unwrap();
        assert!((result.statistic - 0.974_858).abs() < TOL);
        assert!((result.p_value - 0.933_165).abs() < TOL);
    }

    #[test]
    fn test_shapiro_wilk_skewed_sample_rejects() {
        // One extreme value drags W down hard
        let sample = [1.0, 1.1, 1.2, 8.0];
        let result = shapiro_wilk(&sample).unwrap();
        assert!((result.statistic - 0.652_287).abs() < TOL);
        assert!(result.p_value < 0.01);
    }

    #[test]
    fn test_shapiro_wilk_gfap_control() {
        let sample = [0.000_144_30, 0.000_299_1, 0.000_465_2, 0.000_216];
        let result = shapiro_wilk(&sample).unwrap();
        assert!((result.statistic - 0.960_787).abs() < TOL);
        assert!((result.p_value - 0.783_859).abs() < TOL);
    }

    #[test]
    fn test_shapiro_wilk_ki67_eci_fails_normality() {
        let sample = [0.000_039_6, 0.000_044_999_3, 0.000_076_5, 0.000_58];
        let result = shapiro_wilk(&sample).unwrap();
        assert!((result.p_value - 0.006_670).abs() < TOL);
        assert!(result.p_value < 0.05);
    }

    #[test]
    fn test_shapiro_wilk_scale_invariant() {
        // W and p only depend on the shape, not the scale
        let small = [0.000_1, 0.000_3, 0.000_2, 0.000_4];
        let big: Vec<f64> = small.iter().map(|v| v * 1e6).collect();
        let a = shapiro_wilk(&small).unwrap();
        let b = shapiro_wilk(&big).unwrap();
        assert!((a.statistic - b.statistic).abs() < 1e-10);
        assert!((a.p_value - b.p_value).abs() < 1e-10);
    }

    #[test]
    fn test_shapiro_wilk_too_few_observations() {
        assert!(matches!(
            shapiro_wilk(&[1.0, 2.0]),
            Err(StatError::InsufficientSample { .. })
        ));
    }

    #[test]
    fn test_shapiro_wilk_constant_sample_is_fatal() {
        assert!(matches!(
            shapiro_wilk(&[5.0, 5.0, 5.0, 5.0]),
            Err(StatError::ConstantSample)
        ));
    }

    #[test]
    fn test_shapiro_wilk_rejects_nan() {
        assert!(matches!(
            shapiro_wilk(&[1.0, f64::NAN, 3.0, 4.0]),
            Err(StatError::NonFinite)
        ));
    }

    #[test]
    fn test_shapiro_wilk_n3_exact_branch() {
        let result = shapiro_wilk(&[1.0, 2.0, 4.0]).unwrap();
        assert!(result.statistic > 0.0 && result.statistic <= 1.0);
        assert!((0.0..=1.0).contains(&result.p_value));
    }

    #[test]
    fn test_shapiro_wilk_large_n_branch() {
        // n >= 12 takes the ln(n) polynomial path
        let sample: Vec<f64> = (1..=15).map(|i| i as f64).collect();
        let result = shapiro_wilk(&sample).unwrap();
        assert!(result.statistic > 0.9);
        assert!(result.p_value > 0.05);
    }
}
