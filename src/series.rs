//! Input series and its derived moving range.
//!
//! A [`Series`] is the cleaned, ordered sequence of observations the caller
//! hands to the engine. It is validated once on construction and never
//! mutated afterwards; every downstream quantity is recomputed from it.

use serde::Serialize;

use crate::error::{Result, SpcError};

/// Ordered sequence of finite observations, optionally labelled.
///
/// # Invariants
///
/// - `len() >= 1`
/// - every value is finite
/// - when present, `labels.len() == values.len()`
///
/// # Examples
///
/// ```
/// use spc_core::Series;
///
/// let s = Series::new(vec![10.0, 12.0, 8.0]).unwrap();
/// assert_eq!(s.len(), 3);
/// assert!(Series::new(vec![]).is_err());
/// assert!(Series::new(vec![1.0, f64::NAN]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    values: Vec<f64>,
    labels: Option<Vec<String>>,
}

impl Series {
    /// Builds a series from raw values.
    ///
    /// # Errors
    ///
    /// - [`SpcError::InsufficientData`] if `values` is empty
    /// - [`SpcError::NonFiniteValue`] at the first NaN or infinity
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(SpcError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(SpcError::NonFiniteValue { index });
        }
        Ok(Self {
            values,
            labels: None,
        })
    }

    /// Builds a series whose points carry a display label each.
    ///
    /// Labels never take part in computation.
    ///
    /// # Errors
    ///
    /// Same as [`Series::new`], plus [`SpcError::LabelMismatch`] when the
    /// counts differ.
    pub fn with_labels<S: Into<String>>(values: Vec<f64>, labels: Vec<S>) -> Result<Self> {
        if labels.len() != values.len() {
            return Err(SpcError::LabelMismatch {
                values: values.len(),
                labels: labels.len(),
            });
        }
        let mut series = Self::new(values)?;
        series.labels = Some(labels.into_iter().map(Into::into).collect());
        Ok(series)
    }

    /// Observations in order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Label of the point at `index`, if labels were supplied.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels
            .as_ref()
            .and_then(|l| l.get(index))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Derives the moving range of consecutive observations.
    pub fn moving_range(&self) -> MovingRange {
        MovingRange::from_values(&self.values)
    }
}

/// Absolute differences of consecutive observations.
///
/// Element `i` is `|x[i + 1] - x[i]|`, so a series of length `n` yields
/// `n - 1` ranges, all non-negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovingRange {
    ranges: Vec<f64>,
}

impl MovingRange {
    fn from_values(values: &[f64]) -> Self {
        Self {
            ranges: values.windows(2).map(|w| (w[1] - w[0]).abs()).collect(),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty() {
        assert_eq!(
            Series::new(vec![]),
            Err(SpcError::InsufficientData {
                required: 1,
                actual: 0
            })
        );
    }

    #[test]
    fn test_rejects_non_finite() {
        assert_eq!(
            Series::new(vec![1.0, 2.0, f64::INFINITY]),
            Err(SpcError::NonFiniteValue { index: 2 })
        );
        assert_eq!(
            Series::new(vec![f64::NAN]),
            Err(SpcError::NonFiniteValue { index: 0 })
        );
    }

    #[test]
    fn test_labels() {
        let s = Series::with_labels(vec![1.0, 2.0], vec!["a", "b"]).expect("valid");
        assert_eq!(s.label(0), Some("a"));
        assert_eq!(s.label(1), Some("b"));
        assert_eq!(s.label(2), None);

        let unlabelled = Series::new(vec![1.0]).expect("valid");
        assert_eq!(unlabelled.label(0), None);
    }

    #[test]
    fn test_label_mismatch() {
        assert_eq!(
            Series::with_labels(vec![1.0, 2.0], vec!["a"]),
            Err(SpcError::LabelMismatch {
                values: 2,
                labels: 1
            })
        );
    }

    #[test]
    fn test_moving_range_values() {
        let s = Series::new(vec![10.0, 12.0, 8.0, 14.0, 80.0]).expect("valid");
        let mr = s.moving_range();
        assert_eq!(mr.values(), &[2.0, 4.0, 6.0, 66.0]);
    }

    #[test]
    fn test_single_point_has_empty_moving_range() {
        let s = Series::new(vec![3.0]).expect("valid");
        assert!(s.moving_range().is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn moving_range_length_and_sign(
            data in proptest::collection::vec(-1e6_f64..1e6, 1..=200)
        ) {
            let n = data.len();
            let s = Series::new(data).expect("finite input");
            let mr = s.moving_range();
            prop_assert_eq!(mr.len(), n - 1);
            prop_assert!(mr.values().iter().all(|&r| r >= 0.0));
        }
    }
}
