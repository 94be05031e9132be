//! Capability indices from a series and its specification limits.
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.,
//!   Chapter 8.
//! - Kane (1986), "Process Capability Indices", *Journal of Quality Technology*
//!   18(1), pp. 41--52.

use serde::Serialize;
use u_numflow::stats;

use crate::config::SpecLimits;
use crate::error::{Result, SpcError};
use crate::series::Series;

/// Computed capability, or the explicit marker for coinciding limits.
///
/// # Index interpretation
///
/// | Index | Value | Interpretation |
/// |-------|-------|----------------|
/// | Cp | >= 1.33 | Process spread fits the tolerance |
/// | Cpk | >= 1.33 | Process is capable and centered |
///
/// Reference: Montgomery (2019), Chapter 8, Table 8.5.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CapabilityResult {
    Defined {
        /// Sample mean of the data.
        mean: f64,
        /// Standard deviation the indices were computed with.
        std_dev: f64,
        /// Cpk = min(Cpu, Cpl).
        cpk: f64,
        /// Cp = (USL - LSL) / (6 * sigma).
        cp: f64,
        /// Cpu = (USL - mean) / (3 * sigma).
        cpu: f64,
        /// Cpl = (mean - LSL) / (3 * sigma).
        cpl: f64,
        usl: f64,
        lsl: f64,
    },
    /// USL equals LSL; there is no tolerance to compare against.
    Undefined,
}

impl CapabilityResult {
    pub fn cpk(&self) -> Option<f64> {
        match self {
            CapabilityResult::Defined { cpk, .. } => Some(*cpk),
            CapabilityResult::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, CapabilityResult::Defined { .. })
    }

    /// Converts the `Undefined` marker into [`SpcError::UndefinedCapability`]
    /// for callers that want to propagate it with `?`.
    pub fn into_result(self) -> Result<Self> {
        match self {
            CapabilityResult::Undefined => Err(SpcError::UndefinedCapability),
            defined => Ok(defined),
        }
    }
}

/// Computes Cpk from the sample standard deviation (n - 1 denominator).
///
/// Limits are used as given: USL below LSL yields negative indices rather
/// than an error.
///
/// # Errors
///
/// - [`SpcError::InsufficientData`] if the series has fewer than 2 points
/// - [`SpcError::ZeroVariation`] if the standard deviation is zero
/// - [`SpcError::NonFiniteStatistic`] if large values overflow the sums
///
/// Coinciding limits are not an error; they return
/// [`CapabilityResult::Undefined`] before any statistic is computed.
///
/// # Examples
///
/// ```
/// use spc_core::{capability, CapabilityResult, Series, SpecLimits};
///
/// let series = Series::new(vec![9.5, 10.0, 10.2, 9.8, 10.1, 10.3, 9.9, 10.0]).unwrap();
/// let result = capability(&series, SpecLimits { usl: 11.0, lsl: 9.0 }).unwrap();
/// assert!(result.cpk().unwrap() > 1.0);
///
/// let same = capability(&series, SpecLimits { usl: 10.0, lsl: 10.0 }).unwrap();
/// assert_eq!(same, CapabilityResult::Undefined);
/// ```
pub fn capability(series: &Series, limits: SpecLimits) -> Result<CapabilityResult> {
    if limits.usl == limits.lsl {
        return Ok(CapabilityResult::Undefined);
    }
    let data = series.values();
    let std_dev = stats::std_dev(data).ok_or(SpcError::InsufficientData {
        required: 2,
        actual: data.len(),
    })?;
    capability_with_sigma(series, limits, std_dev)
}

/// Computes capability indices against a caller-supplied sigma.
///
/// Use this with a short-term estimate such as the I-MR chart's
/// `sigma_hat` to obtain within-process Cpk.
///
/// # Errors
///
/// - [`SpcError::ZeroVariation`] if `sigma` is zero or negative
/// - [`SpcError::NonFiniteStatistic`] if `sigma`, the mean or an index is
///   NaN or infinite
pub fn capability_with_sigma(
    series: &Series,
    limits: SpecLimits,
    sigma: f64,
) -> Result<CapabilityResult> {
    if limits.usl == limits.lsl {
        return Ok(CapabilityResult::Undefined);
    }
    if !sigma.is_finite() {
        return Err(SpcError::NonFiniteStatistic {
            statistic: "standard deviation",
        });
    }
    if sigma <= 0.0 {
        return Err(SpcError::ZeroVariation {
            statistic: "standard deviation",
        });
    }
    let data = series.values();
    let mean = stats::mean(data).ok_or(SpcError::InsufficientData {
        required: 1,
        actual: data.len(),
    })?;
    if !mean.is_finite() {
        return Err(SpcError::NonFiniteStatistic { statistic: "mean" });
    }

    let SpecLimits { usl, lsl } = limits;
    let cpu = (usl - mean) / (3.0 * sigma);
    let cpl = (mean - lsl) / (3.0 * sigma);
    let cp = (usl - lsl) / (6.0 * sigma);
    if ![cpu, cpl, cp].iter().all(|v| v.is_finite()) {
        return Err(SpcError::NonFiniteStatistic {
            statistic: "capability index",
        });
    }

    Ok(CapabilityResult::Defined {
        mean,
        std_dev: sigma,
        cpk: cpu.min(cpl),
        cp,
        cpu,
        cpl,
        usl,
        lsl,
    })
}
