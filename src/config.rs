//! Analysis configuration.
//!
//! Everything an analysis needs besides the series itself, passed once and
//! never mutated. All types deserialize from JSON/TOML so a host can keep
//! them in its own settings files.

use serde::{Deserialize, Serialize};

use crate::error::SpcError;
use crate::spc::RuleSet;

/// Significance level α for the normality test.
///
/// Restricted to the levels the dashboard offers. Serialized as the bare
/// number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum SignificanceLevel {
    /// α = 0.01
    P01,
    /// α = 0.025
    P025,
    /// α = 0.05
    #[default]
    P05,
    /// α = 0.1
    P10,
}

impl SignificanceLevel {
    pub const ALL: [SignificanceLevel; 4] = [
        SignificanceLevel::P01,
        SignificanceLevel::P025,
        SignificanceLevel::P05,
        SignificanceLevel::P10,
    ];

    pub fn value(self) -> f64 {
        match self {
            SignificanceLevel::P01 => 0.01,
            SignificanceLevel::P025 => 0.025,
            SignificanceLevel::P05 => 0.05,
            SignificanceLevel::P10 => 0.1,
        }
    }
}

impl TryFrom<f64> for SignificanceLevel {
    type Error = SpcError;

    fn try_from(alpha: f64) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|level| level.value() == alpha)
            .ok_or(SpcError::InvalidSignificance(alpha))
    }
}

impl From<SignificanceLevel> for f64 {
    fn from(level: SignificanceLevel) -> Self {
        level.value()
    }
}

/// Upper and lower specification limits for capability analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecLimits {
    pub usl: f64,
    pub lsl: f64,
}

/// Immutable analysis request settings.
///
/// # Examples
///
/// ```
/// use spc_core::{AnalysisConfig, SignificanceLevel};
///
/// let config: AnalysisConfig =
///     serde_json::from_str(r#"{ "significance": 0.01, "rules": ["Rule01", "Rule02"] }"#).unwrap();
/// assert_eq!(config.significance, SignificanceLevel::P01);
/// assert_eq!(config.rules.len(), 2);
/// assert!(config.spec_limits.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Rules to evaluate on both charts. Defaults to all eight.
    pub rules: RuleSet,
    /// α for the normality verdict. Defaults to 0.05.
    pub significance: SignificanceLevel,
    /// Limits for capability analysis; skipped when absent.
    pub spec_limits: Option<SpecLimits>,
}

impl AnalysisConfig {
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_significance(mut self, significance: SignificanceLevel) -> Self {
        self.significance = significance;
        self
    }

    pub fn with_spec_limits(mut self, usl: f64, lsl: f64) -> Self {
        self.spec_limits = Some(SpecLimits { usl, lsl });
        self
    }
}
