//! Normality testing.
//!
//! Wraps the Shapiro-Wilk W test and turns its p-value into a verdict at a
//! chosen significance level.
//!
//! # Examples
//!
//! ```
//! use spc_core::{normality_test, Series, SignificanceLevel};
//!
//! let series = Series::new(vec![-1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5]).unwrap();
//! let r = normality_test(&series, SignificanceLevel::P05).unwrap();
//! assert!(r.is_normal);
//! assert!(r.p_value > 0.05);
//! ```

use serde::Serialize;
use u_numflow::special;

use crate::config::SignificanceLevel;
use crate::error::{Result, SpcError};
use crate::series::Series;

/// Largest sample Royston's approximation is calibrated for.
pub const MAX_SHAPIRO_WILK_N: usize = 5000;

/// Outcome of a normality check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalityResult {
    /// `p_value > significance_level`.
    pub is_normal: bool,
    pub p_value: f64,
    pub significance_level: f64,
    /// Shapiro-Wilk W statistic, in (0, 1].
    pub w: f64,
}

/// Tests whether `series` is consistent with a normal distribution.
///
/// # Errors
///
/// - [`SpcError::InsufficientData`] if n < 3 or all values are identical
/// - [`SpcError::SampleTooLarge`] if n > 5000
/// - [`SpcError::NonFiniteStatistic`] if the sums overflow or W leaves [0, 1]
pub fn normality_test(series: &Series, alpha: SignificanceLevel) -> Result<NormalityResult> {
    let sw = ShapiroWilk::test(series.values())?;
    let significance_level = alpha.value();
    Ok(NormalityResult {
        is_normal: sw.p_value > significance_level,
        p_value: sw.p_value,
        significance_level,
        w: sw.w,
    })
}

/// Shapiro-Wilk W statistic and its p-value.
///
/// # Algorithm
///
/// Royston (1992, 1995), algorithm AS R94:
/// 1. Approximate the expected normal order statistics (Blom scores).
/// 2. Correct the outermost one or two weights with Royston's polynomials.
/// 3. W = (Σ aᵢ x₍ᵢ₎)² / Σ (xᵢ - x̄)².
/// 4. Map W to a normal deviate and take the upper tail.
///
/// For n = 3 the exact distribution of W is used instead.
///
/// # References
///
/// - Shapiro & Wilk (1965). "An analysis of variance test for normality".
///   Biometrika, 52(3–4), 591–611.
/// - Royston (1992). "Approximating the Shapiro-Wilk W-test for
///   non-normality". Statistics and Computing, 2, 117–119.
/// - Royston (1995). "Remark AS R94: A remark on Algorithm AS 181".
///   Applied Statistics, 44(4), 547–551.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShapiroWilk {
    pub w: f64,
    pub p_value: f64,
}

// Royston polynomial coefficients (AS R94), lowest order first.
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

impl ShapiroWilk {
    /// Runs the test on raw (unsorted) data.
    ///
    /// # Errors
    ///
    /// See [`normality_test`].
    pub fn test(data: &[f64]) -> Result<Self> {
        let n = data.len();
        if n < 3 {
            return Err(SpcError::InsufficientData {
                required: 3,
                actual: n,
            });
        }
        if n > MAX_SHAPIRO_WILK_N {
            return Err(SpcError::SampleTooLarge {
                max: MAX_SHAPIRO_WILK_N,
                actual: n,
            });
        }
        if let Some(index) = data.iter().position(|v| !v.is_finite()) {
            return Err(SpcError::NonFiniteValue { index });
        }

        let mut x = data.to_vec();
        x.sort_by(f64::total_cmp);

        let no_variance = SpcError::InsufficientData {
            required: 3,
            actual: n,
        };
        if x[n - 1] - x[0] < 1e-300 {
            return Err(no_variance);
        }

        let mean = x.iter().sum::<f64>() / n as f64;
        let ss: f64 = x.iter().map(|&v| (v - mean).powi(2)).sum();
        if !ss.is_finite() {
            return Err(SpcError::NonFiniteStatistic {
                statistic: "sum of squares",
            });
        }
        if ss < 1e-300 {
            return Err(no_variance);
        }

        if n == 3 {
            // a = [1/√2, 0, -1/√2]; W has a closed-form distribution.
            let sa = std::f64::consts::FRAC_1_SQRT_2 * (x[2] - x[0]);
            let w = checked_w(sa, ss)?.clamp(0.75, 1.0);
            let p = 1.0 - (6.0 / std::f64::consts::PI) * w.sqrt().acos();
            return Ok(Self {
                w,
                p_value: p.clamp(0.0, 1.0),
            });
        }

        let a = weights(n).ok_or(no_variance)?;
        let sa: f64 = a
            .iter()
            .enumerate()
            .map(|(i, &ai)| ai * (x[n - 1 - i] - x[i]))
            .sum();
        let w = checked_w(sa, ss)?.min(1.0);

        Ok(Self {
            w,
            p_value: p_value(w, n).clamp(0.0, 1.0),
        })
    }
}

/// W = (Σ a_i x_(i))² / SS, rejected when overflow pushed it outside [0, 1].
fn checked_w(sa: f64, ss: f64) -> Result<f64> {
    let w = sa * sa / ss;
    if !(0.0..=1.0 + 1e-10).contains(&w) {
        return Err(SpcError::NonFiniteStatistic {
            statistic: "W statistic",
        });
    }
    Ok(w)
}

/// Horner evaluation of `c[0] + c[1]·x + c[2]·x² + …`.
fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)
}

/// Antisymmetric weights for the lower half of the order statistics.
///
/// Returns `None` when the normalising factor degenerates.
fn weights(n: usize) -> Option<Vec<f64>> {
    let half = n / 2;
    let nf = n as f64;

    let m: Vec<f64> = (1..=half)
        .map(|i| special::inverse_normal_cdf((i as f64 - 0.375) / (nf + 0.25)))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / nf.sqrt();

    // The outermost weights (one for n <= 5, two above) get polynomial
    // corrections; the rest are rescaled Blom scores.
    let corrected: Vec<f64> = if n <= 5 {
        vec![poly(&C1, rsn) - m[0] / ssumm2]
    } else {
        vec![
            poly(&C1, rsn) - m[0] / ssumm2,
            poly(&C2, rsn) - m[1] / ssumm2,
        ]
    };

    let k = corrected.len();
    let fac_sq = summ2 - 2.0 * m[..k].iter().map(|v| v * v).sum::<f64>();
    let one_minus = 1.0 - 2.0 * corrected.iter().map(|v| v * v).sum::<f64>();
    if fac_sq <= 0.0 || one_minus <= 0.0 {
        return None;
    }
    let fac = (fac_sq / one_minus).sqrt();

    Some(
        corrected
            .into_iter()
            .chain(m[k..].iter().map(|&mi| -mi / fac))
            .collect(),
    )
}

/// Upper-tail p-value of W via Royston's normalising transformation.
fn p_value(w: f64, n: usize) -> f64 {
    let w1 = 1.0 - w;
    if w1 <= 0.0 {
        return 1.0;
    }
    let y = w1.ln();
    let nf = n as f64;

    let (z_input, mu, sigma) = if n <= 11 {
        let gamma = poly(&G, nf);
        if y >= gamma {
            return 0.0;
        }
        (-(gamma - y).ln(), poly(&C3, nf), poly(&C4, nf).exp())
    } else {
        let ln_n = nf.ln();
        (y, poly(&C5, ln_n), poly(&C6, ln_n).exp())
    };

    if sigma < 1e-300 {
        return 0.0;
    }
    1.0 - special::standard_normal_cdf((z_input - mu) / sigma)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> Series {
        Series::new(values.to_vec()).expect("valid")
    }

    #[test]
    fn test_symmetric_data_is_normal() {
        let data = [-2.0, -1.5, -1.0, -0.5, 0.0, 0.0, 0.5, 1.0, 1.5, 2.0];
        let r = normality_test(&series(&data), SignificanceLevel::P05).expect("should compute");
        assert!(r.w > 0.9, "W = {}", r.w);
        assert!(r.p_value > 0.05, "p = {}", r.p_value);
        assert!(r.is_normal);
        assert!((r.significance_level - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bimodal_data_is_not_normal() {
        let mut data = vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5];
        data.extend_from_slice(&[9.5, 9.6, 9.7, 9.8, 9.9, 10.0]);
        let r = normality_test(&series(&data), SignificanceLevel::P01).expect("should compute");
        assert!(r.p_value < 0.01, "p = {}", r.p_value);
        assert!(!r.is_normal);
    }

    #[test]
    fn test_skewed_data_is_not_normal() {
        let data = [0.1, 0.2, 0.3, 0.5, 0.8, 1.3, 2.1, 3.4, 5.5, 8.9, 14.4, 23.3];
        let r = ShapiroWilk::test(&data).expect("should compute");
        assert!(r.p_value < 0.05, "p = {}", r.p_value);
    }

    #[test]
    fn test_small_samples() {
        for data in [
            vec![1.0, 2.0, 3.0],
            vec![1.0, 2.0, 3.0, 4.0],
            vec![-1.0, -0.5, 0.0, 0.5, 1.0],
        ] {
            let r = ShapiroWilk::test(&data).expect("should compute");
            assert!(r.w > 0.0 && r.w <= 1.0, "W = {}", r.w);
            assert!((0.0..=1.0).contains(&r.p_value), "p = {}", r.p_value);
        }
    }

    #[test]
    fn test_n3_equally_spaced_is_perfect() {
        // Equally spaced triple: W = 1, p = 1.
        let r = ShapiroWilk::test(&[1.0, 2.0, 3.0]).expect("should compute");
        assert!((r.w - 1.0).abs() < 1e-12);
        assert!((r.p_value - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_large_normal_quantiles() {
        let n = 100;
        let data: Vec<f64> = (1..=n)
            .map(|i| special::inverse_normal_cdf((i as f64 - 0.5) / n as f64))
            .collect();
        let r = ShapiroWilk::test(&data).expect("should compute");
        assert!(r.w > 0.98, "W = {}", r.w);
        assert!(r.p_value > 0.1, "p = {}", r.p_value);
    }

    #[test]
    fn test_too_short() {
        assert_eq!(
            normality_test(&series(&[1.0, 2.0]), SignificanceLevel::P05),
            Err(SpcError::InsufficientData {
                required: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_constant_is_insufficient() {
        assert!(matches!(
            normality_test(&series(&[4.0; 10]), SignificanceLevel::P05),
            Err(SpcError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_too_large() {
        let data: Vec<f64> = (0..5001).map(|i| i as f64).collect();
        assert_eq!(
            ShapiroWilk::test(&data),
            Err(SpcError::SampleTooLarge {
                max: 5000,
                actual: 5001
            })
        );
    }

    #[test]
    fn test_overflowing_data_is_rejected() {
        let r = normality_test(
            &series(&[1e308, -1e308, 1e308, -1e308, 1e308]),
            SignificanceLevel::P05,
        );
        assert!(
            matches!(r, Err(SpcError::NonFiniteStatistic { .. })),
            "got {r:?}"
        );
        assert!(matches!(
            ShapiroWilk::test(&[1e308, -1e308, 1e308]),
            Err(SpcError::NonFiniteStatistic { .. })
        ));
    }

    #[test]
    fn test_w_outside_unit_interval_is_rejected() {
        assert!(checked_w(f64::NAN, 1.0).is_err());
        assert!(checked_w(2.0, 1.0).is_err());
        assert!((checked_w(0.9, 1.0).expect("in range") - 0.81).abs() < 1e-12);
    }

    #[test]
    fn test_verdict_follows_alpha() {
        // Same data, stricter alpha can only make "normal" more likely.
        let data = [0.1, 0.2, 0.3, 0.5, 0.8, 1.3, 2.1, 3.4, 5.5, 8.9, 14.4, 23.3];
        let s = series(&data);
        let loose = normality_test(&s, SignificanceLevel::P10).expect("compute");
        let strict = normality_test(&s, SignificanceLevel::P01).expect("compute");
        assert_eq!(loose.p_value.to_bits(), strict.p_value.to_bits());
        assert!(strict.is_normal || !loose.is_normal);
    }

    #[test]
    fn test_poly_horner() {
        // 1 + 2x + 3x² at x = 2
        assert!((poly(&[1.0, 2.0, 3.0], 2.0) - 17.0).abs() < f64::EPSILON);
    }
}
