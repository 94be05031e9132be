//! Statistical Process Control (SPC) for individual observations.
//!
//! Builds Individual and Moving Range (I-MR) charts from a [`Series`](crate::Series),
//! classifies every point into a sigma zone and runs the Nelson pattern
//! rules over both charts.
//!
//! # Pipeline
//!
//! - [`ImrLimits`] — CL/UCL/LCL for the I chart and the MR chart
//! - [`Zone`] — sigma-zone label of each point, derived from the limits
//! - [`Rule`] / [`RuleSet`] — the eight Nelson rules and the enabled subset
//! - [`ImrChart`] — both zoned charts, with rule dispatch
//! - [`StabilityVerdict`] — stable iff no rule fired on either chart
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts
//! - Nelson, L.S. (1984). "The Shewhart Control Chart — Tests for Special Causes",
//!   *Journal of Quality Technology* 16(4), pp. 237-239.

mod chart;
mod imr;
mod limits;
mod rules;
mod stability;
mod zones;

pub use chart::{ChartId, ControlLimits, Violation, ZonedPoint};
pub use imr::{ChartData, ChartRow, ImrChart};
pub use limits::{ImrLimits, D2, D3, D4};
pub use rules::{evaluate_rules, Rule, RuleSet};
pub use stability::StabilityVerdict;
pub use zones::{Band, Side, Zone};
