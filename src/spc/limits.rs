//! Control limits for the Individual and Moving Range charts.
//!
//! # Control Chart Factors
//!
//! The moving range spans two consecutive observations, so all factors are
//! the ASTM E2587 values for a subgroup size of n = 2.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.,
//!   Chapter 6: Control Charts for Variables.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

use serde::Serialize;
use u_numflow::stats;

use super::chart::ControlLimits;
use crate::error::{Result, SpcError};
use crate::series::{MovingRange, Series};

/// d2 for n = 2: mean of the relative range, sigma-hat = MR-bar / d2.
pub const D2: f64 = 1.128;

/// D4 for n = 2: UCL_MR = D4 * MR-bar.
pub const D4: f64 = 3.267;

/// D3 for n = 2: LCL_MR = D3 * MR-bar = 0.
pub const D3: f64 = 0.0;

/// Limits of both I-MR charts derived from one series.
///
/// # Examples
///
/// ```
/// use spc_core::{Series, spc::ImrLimits};
///
/// let series = Series::new(vec![10.0, 12.0, 8.0, 14.0, 80.0]).unwrap();
/// let limits = ImrLimits::compute(&series).unwrap();
///
/// assert!((limits.mr_bar - 19.5).abs() < 1e-12);
/// assert!((limits.individuals.ucl - 76.66).abs() < 0.01);
/// assert_eq!(limits.moving_range.lcl, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImrLimits {
    /// I-chart limits: CL = x-bar, UCL/LCL = x-bar ± 3 sigma-hat.
    pub individuals: ControlLimits,
    /// MR-chart limits: CL = MR-bar, UCL = D4 * MR-bar, LCL = 0.
    pub moving_range: ControlLimits,
    /// Average moving range.
    pub mr_bar: f64,
    /// Short-term sigma estimate, MR-bar / d2.
    pub sigma_hat: f64,
}

impl ImrLimits {
    /// Derives I-chart and MR-chart limits from a series.
    ///
    /// # Algorithm
    ///
    /// 1. MR_i = |x_i - x_{i-1}| for i = 1..n-1.
    /// 2. MR-bar = mean(MR), sigma-hat = MR-bar / 1.128.
    /// 3. I chart: CL = mean(x), UCL/LCL = CL ± 3 * sigma-hat.
    /// 4. MR chart: CL = MR-bar, UCL = 3.267 * MR-bar, LCL = 0.
    ///
    /// # Errors
    ///
    /// - [`SpcError::InsufficientData`] if the series has fewer than 2 points
    /// - [`SpcError::ZeroVariation`] if every moving range is zero
    /// - [`SpcError::NonFiniteStatistic`] if the mean, MR-bar or a limit overflows
    pub fn compute(series: &Series) -> Result<Self> {
        Self::from_parts(series.values(), &series.moving_range())
    }

    pub(crate) fn from_parts(values: &[f64], moving_range: &MovingRange) -> Result<Self> {
        if values.len() < 2 {
            return Err(SpcError::InsufficientData {
                required: 2,
                actual: values.len(),
            });
        }

        let x_bar = stats::mean(values).ok_or(SpcError::InsufficientData {
            required: 2,
            actual: values.len(),
        })?;
        let mr_bar = stats::mean(moving_range.values()).ok_or(SpcError::InsufficientData {
            required: 2,
            actual: values.len(),
        })?;

        finite(x_bar, "mean")?;
        finite(mr_bar, "moving range mean")?;
        if mr_bar <= 0.0 {
            return Err(SpcError::ZeroVariation {
                statistic: "moving range mean",
            });
        }

        let sigma_hat = mr_bar / D2;
        let half_width = 3.0 * sigma_hat;

        let individuals = ControlLimits {
            ucl: x_bar + half_width,
            cl: x_bar,
            lcl: x_bar - half_width,
        };
        let moving_range = ControlLimits {
            ucl: D4 * mr_bar,
            cl: mr_bar,
            lcl: D3 * mr_bar,
        };
        finite(individuals.ucl, "I-chart UCL")?;
        finite(individuals.lcl, "I-chart LCL")?;
        finite(moving_range.ucl, "MR-chart UCL")?;

        Ok(Self {
            individuals,
            moving_range,
            mr_bar,
            sigma_hat,
        })
    }
}

fn finite(value: f64, statistic: &'static str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SpcError::NonFiniteStatistic { statistic })
    }
}
