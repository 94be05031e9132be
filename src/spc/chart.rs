//! Core control chart types.
//!
//! Defines the building blocks shared by the limit calculator, the zone
//! classifier and the rule engine: control limits, chart identity, zoned
//! points and violations.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

use serde::Serialize;

use super::rules::Rule;
use super::zones::Zone;

/// Control limits for a chart.
///
/// Represents the upper control limit (UCL), center line (CL), and lower
/// control limit (LCL) computed from the process data.
///
/// # Invariants
///
/// - `lcl <= cl <= ucl`
/// - All values are finite
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControlLimits {
    /// Upper control limit (UCL = CL + 3 sigma).
    pub ucl: f64,
    /// Center line (process mean or average moving range).
    pub cl: f64,
    /// Lower control limit (CL - 3 sigma, clamped to 0 on the MR chart).
    pub lcl: f64,
}

impl ControlLimits {
    /// One sigma as recovered from the upper half-width: `(UCL - CL) / 3`.
    ///
    /// Zone boundaries are always derived from this value so that they agree
    /// with the limits exactly, including on the MR chart where the LCL is
    /// clamped and the band is asymmetric.
    pub fn sigma(&self) -> f64 {
        (self.ucl - self.cl) / 3.0
    }
}

/// Which of the two I-MR charts a point or violation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ChartId {
    /// Chart of individual observations.
    Individuals,
    /// Chart of moving ranges between consecutive observations.
    MovingRange,
}

/// A single point on a control chart together with its sigma zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZonedPoint {
    /// Observation index. On the MR chart this is the index of the later
    /// observation of the pair, so it starts at 1.
    pub index: usize,
    /// Plotted value (observation or moving range).
    pub value: f64,
    /// Zone relative to the chart's center line.
    pub zone: Zone,
}

/// A rule violation detected on a chart.
///
/// A point may carry several violations, one per rule it trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Violation {
    /// Chart the violating point was plotted on.
    pub chart: ChartId,
    /// Index of the point that closes the matched pattern.
    pub point_index: usize,
    /// Rule that matched.
    pub rule: Rule,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_limits_sigma() {
        let limits = ControlLimits {
            ucl: 30.0,
            cl: 25.0,
            lcl: 20.0,
        };
        assert!((limits.sigma() - 5.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_sigma_ignores_clamped_lcl() {
        // MR chart: LCL clamped to 0, sigma still comes from the upper side.
        let limits = ControlLimits {
            ucl: 3.267 * 2.0,
            cl: 2.0,
            lcl: 0.0,
        };
        assert!((limits.sigma() - (3.267 * 2.0 - 2.0) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_violation_ordering() {
        let a = Violation {
            chart: ChartId::Individuals,
            point_index: 9,
            rule: Rule::Rule02,
        };
        let b = Violation {
            chart: ChartId::MovingRange,
            point_index: 1,
            rule: Rule::Rule01,
        };
        let c = Violation {
            chart: ChartId::Individuals,
            point_index: 9,
            rule: Rule::Rule05,
        };
        let mut v = vec![b, c, a];
        v.sort();
        assert_eq!(v, vec![a, c, b]);
    }
}
