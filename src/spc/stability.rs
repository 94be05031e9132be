//! Process stability verdict.

use serde::Serialize;

use super::chart::{ChartId, Violation};

/// Whether the process is in statistical control.
///
/// An unstable verdict keeps every violation so the caller can point at the
/// offending points, rules and charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum StabilityVerdict {
    Stable,
    Unstable { violations: Vec<Violation> },
}

impl StabilityVerdict {
    /// Folds a violation list into a verdict: stable iff it is empty.
    pub fn evaluate(violations: Vec<Violation>) -> Self {
        if violations.is_empty() {
            StabilityVerdict::Stable
        } else {
            StabilityVerdict::Unstable { violations }
        }
    }

    pub fn is_stable(&self) -> bool {
        matches!(self, StabilityVerdict::Stable)
    }

    pub fn violations(&self) -> &[Violation] {
        match self {
            StabilityVerdict::Stable => &[],
            StabilityVerdict::Unstable { violations } => violations,
        }
    }

    /// Violations on one chart only.
    pub fn violations_on(&self, chart: ChartId) -> impl Iterator<Item = &Violation> {
        self.violations().iter().filter(move |v| v.chart == chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spc::rules::Rule;

    #[test]
    fn test_empty_is_stable() {
        let verdict = StabilityVerdict::evaluate(Vec::new());
        assert!(verdict.is_stable());
        assert!(verdict.violations().is_empty());
    }

    #[test]
    fn test_any_violation_is_unstable() {
        let v = Violation {
            chart: ChartId::MovingRange,
            point_index: 3,
            rule: Rule::Rule06,
        };
        let verdict = StabilityVerdict::evaluate(vec![v]);
        assert!(!verdict.is_stable());
        assert_eq!(verdict.violations(), &[v]);
        assert_eq!(verdict.violations_on(ChartId::MovingRange).count(), 1);
        assert_eq!(verdict.violations_on(ChartId::Individuals).count(), 0);
    }

    #[test]
    fn test_serializes_with_tag() {
        let json = serde_json::to_string(&StabilityVerdict::Stable).expect("serialize");
        assert_eq!(json, r#"{"verdict":"stable"}"#);
    }
}
