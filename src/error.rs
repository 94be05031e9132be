//! Error type shared by every computation in the crate.
//!
//! All failures are recoverable conditions reported as values. A failed
//! sub-computation never aborts the others; see [`crate::analysis::analyze`].

use serde::Serialize;

/// Errors reported by the SPC engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
pub enum SpcError {
    /// The series is too short for the requested computation.
    #[error("insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// A statistic used as a divisor is zero.
    #[error("zero variation: {statistic} is zero")]
    ZeroVariation { statistic: &'static str },

    /// A statistic overflowed to NaN or infinity although every input was finite.
    #[error("non-finite statistic: {statistic} overflowed")]
    NonFiniteStatistic { statistic: &'static str },

    /// Upper and lower specification limits coincide.
    #[error("capability undefined: USL equals LSL")]
    UndefinedCapability,

    /// A value in the input is NaN or infinite.
    #[error("non-finite value at index {index}")]
    NonFiniteValue { index: usize },

    /// Label count does not match value count.
    #[error("label count {labels} does not match value count {values}")]
    LabelMismatch { values: usize, labels: usize },

    /// The sample exceeds the supported range of the test.
    #[error("sample too large: at most {max} points supported, got {actual}")]
    SampleTooLarge { max: usize, actual: usize },

    /// Significance level outside the supported set.
    #[error("unsupported significance level {0}")]
    InvalidSignificance(f64),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SpcError>;
