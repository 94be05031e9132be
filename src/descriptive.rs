//! Descriptive summary of a series.
//!
//! The companion table to the control charts: location, spread, quartiles
//! and shape. Quartiles use the R-7 (linear interpolation) definition.
//!
//! Skewness and kurtosis are the biased moment estimators
//! g1 = m3 / m2^(3/2) and g2 = m4 / m2² - 3, where m_k is the k-th central
//! moment with denominator n. These are the values the dashboard reports.

use serde::Serialize;
use u_numflow::stats;

use crate::error::{Result, SpcError};
use crate::series::Series;

/// Summary statistics of one series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptiveSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` for a single observation.
    pub std_dev: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Biased sample skewness g1. `None` when n < 3 or the series is constant.
    pub skewness: Option<f64>,
    /// Biased excess kurtosis g2. `None` when n < 3 or the series is constant.
    pub kurtosis: Option<f64>,
}

/// Summarises `series`.
///
/// # Errors
///
/// [`SpcError::NonFiniteStatistic`] if large values overflow the mean or the
/// standard deviation.
///
/// # Examples
///
/// ```
/// use spc_core::{describe, Series};
///
/// let s = Series::new(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// let d = describe(&s).unwrap();
/// assert_eq!(d.count, 5);
/// assert_eq!(d.median, 3.0);
/// assert_eq!(d.q1, 2.0);
/// ```
pub fn describe(series: &Series) -> Result<DescriptiveSummary> {
    let data = series.values();
    let n = data.len();
    let missing = SpcError::InsufficientData {
        required: 1,
        actual: n,
    };

    let mean = stats::mean(data).ok_or_else(|| missing.clone())?;
    if !mean.is_finite() {
        return Err(SpcError::NonFiniteStatistic { statistic: "mean" });
    }
    let std_dev = stats::std_dev(data);
    if std_dev.is_some_and(|sd| !sd.is_finite()) {
        return Err(SpcError::NonFiniteStatistic {
            statistic: "standard deviation",
        });
    }
    let quartile = |p: f64| stats::quantile(data, p).ok_or_else(|| missing.clone());

    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // Shape is meaningless without spread.
    let moments = (n >= 3 && max > min)
        .then(|| shape(data, mean))
        .flatten();

    Ok(DescriptiveSummary {
        count: n,
        mean,
        std_dev,
        min,
        q1: quartile(0.25)?,
        median: quartile(0.5)?,
        q3: quartile(0.75)?,
        max,
        skewness: moments.map(|(g1, _)| g1),
        kurtosis: moments.map(|(_, g2)| g2),
    })
}

/// Biased (g1, g2) from the central moments; `None` if they overflow.
fn shape(data: &[f64], mean: f64) -> Option<(f64, f64)> {
    let n = data.len() as f64;
    let (m2, m3, m4) = data.iter().fold((0.0, 0.0, 0.0), |(m2, m3, m4), &x| {
        let d = x - mean;
        let d2 = d * d;
        (m2 + d2, m3 + d2 * d, m4 + d2 * d2)
    });
    let (m2, m3, m4) = (m2 / n, m3 / n, m4 / n);
    let g1 = m3 / m2.powf(1.5);
    let g2 = m4 / (m2 * m2) - 3.0;
    (g1.is_finite() && g2.is_finite()).then_some((g1, g2))
}
