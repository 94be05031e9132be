//! One-shot SPC analysis of a series.
//!
//! [`analyze`] is the single entry point a host application calls: it takes
//! the series and an [`AnalysisConfig`] and returns an immutable
//! [`AnalysisReport`]. Each independent computation reports its own
//! outcome, so an undefined Cpk or a failed normality test never hides the
//! control charts, and vice versa.

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::capability::{capability, CapabilityResult};
use crate::config::AnalysisConfig;
use crate::descriptive::{describe, DescriptiveSummary};
use crate::error::Result;
use crate::normality::{normality_test, NormalityResult};
use crate::series::Series;
use crate::spc::{ImrChart, StabilityVerdict, Violation};

/// Everything computed for one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Both zoned charts with their limits.
    pub charts: Result<ImrChart>,
    /// Stability verdict carrying every violation; fails with the chart
    /// error when there are no charts.
    pub stability: Result<StabilityVerdict>,
    pub normality: Result<NormalityResult>,
    /// `None` when no specification limits were configured.
    pub capability: Option<Result<CapabilityResult>>,
    pub summary: Result<DescriptiveSummary>,
}

impl AnalysisReport {
    /// `Some(true)` iff the charts were computed and no rule fired.
    pub fn is_stable(&self) -> Option<bool> {
        self.stability.as_ref().ok().map(StabilityVerdict::is_stable)
    }

    /// Violations from both charts, I chart first. Empty when the charts
    /// could not be computed.
    pub fn violations(&self) -> &[Violation] {
        self.stability
            .as_ref()
            .map(StabilityVerdict::violations)
            .unwrap_or(&[])
    }
}

/// Runs the full analysis.
///
/// Pure and reentrant: nothing is cached between calls, and the same input
/// always produces the same report.
///
/// # Examples
///
/// ```
/// use spc_core::{analyze, AnalysisConfig, Series};
///
/// let series = Series::new(vec![10.0, 12.0, 8.0, 14.0, 80.0]).unwrap();
/// let config = AnalysisConfig::default().with_spec_limits(90.0, 0.0);
/// let report = analyze(&series, &config);
///
/// assert_eq!(report.is_stable(), Some(false));
/// assert_eq!(report.violations().len(), 2);
/// assert!(report.capability.unwrap().is_ok());
/// ```
#[instrument(skip_all, fields(n = series.len(), rules = config.rules.len()))]
pub fn analyze(series: &Series, config: &AnalysisConfig) -> AnalysisReport {
    let charts = ImrChart::compute(series);

    let stability = match &charts {
        Ok(chart) => {
            debug!(
                cl = chart.limits.individuals.cl,
                ucl = chart.limits.individuals.ucl,
                lcl = chart.limits.individuals.lcl,
                mr_bar = chart.limits.mr_bar,
                "computed I-MR limits"
            );
            let violations = chart.evaluate(&config.rules);
            debug!(violations = violations.len(), "evaluated run rules");
            Ok(StabilityVerdict::evaluate(violations))
        }
        Err(e) => {
            warn!(error = %e, "control limits unavailable");
            Err(e.clone())
        }
    };

    let normality = normality_test(series, config.significance);
    match &normality {
        Ok(r) => debug!(p_value = r.p_value, is_normal = r.is_normal, "normality test"),
        Err(e) => warn!(error = %e, "normality test skipped"),
    }

    let capability = config.spec_limits.map(|limits| {
        let result = capability(series, limits);
        match &result {
            Ok(CapabilityResult::Undefined) => warn!("capability undefined: USL equals LSL"),
            Ok(r) => debug!(cpk = ?r.cpk(), "capability computed"),
            Err(e) => warn!(error = %e, "capability skipped"),
        }
        result
    });

    let summary = describe(series);

    AnalysisReport {
        charts,
        stability,
        normality,
        capability,
        summary,
    }
}
