//! Run rules for detecting non-random patterns in control charts.
//!
//! Implements the eight Nelson tests for special causes over a zoned point
//! sequence. Each rule is a fixed variant of [`Rule`] carrying its own
//! window length and predicate; a [`RuleSet`] selects which of them run.
//!
//! Every rule scans the sequence left to right and reports a violation at the
//! last point of each matched window. While a pattern persists the rule keeps
//! firing, so a 10-point one-sided run yields [`Rule::Rule02`] at its 9th and
//! 10th points. Sequences shorter than a rule's window produce nothing.
//!
//! # References
//!
//! - Nelson, L.S. (1984). "The Shewhart Control Chart — Tests for Special Causes",
//!   *Journal of Quality Technology* 16(4), pp. 237-239.
//! - Western Electric (1956). *Statistical Quality Control Handbook*.
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::chart::{ChartId, Violation, ZonedPoint};
use super::zones::{Band, Side};

/// One of the eight Nelson run rules.
///
/// Variants are ordered by rule number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Rule {
    /// One point beyond the 3σ control limits.
    Rule01,
    /// 9 points in a row on the same side of the center line.
    Rule02,
    /// 6 points in a row steadily increasing or decreasing.
    Rule03,
    /// 14 points in a row alternating up and down.
    Rule04,
    /// 2 out of 3 points in a row beyond 2σ, same side.
    Rule05,
    /// 4 out of 5 points in a row beyond 1σ, same side.
    Rule06,
    /// 15 points in a row within 1σ of the center line, either side.
    Rule07,
    /// 8 points in a row beyond 1σ, either side.
    Rule08,
}

impl Rule {
    /// All rules in ordinal order.
    pub const ALL: [Rule; 8] = [
        Rule::Rule01,
        Rule::Rule02,
        Rule::Rule03,
        Rule::Rule04,
        Rule::Rule05,
        Rule::Rule06,
        Rule::Rule07,
        Rule::Rule08,
    ];

    /// Rule number, 1 through 8.
    pub fn ordinal(self) -> u8 {
        self as u8 + 1
    }

    /// Number of points the rule's pattern spans.
    pub fn window(self) -> usize {
        match self {
            Rule::Rule01 => 1,
            Rule::Rule02 => 9,
            Rule::Rule03 => 6,
            Rule::Rule04 => 14,
            Rule::Rule05 => 3,
            Rule::Rule06 => 5,
            Rule::Rule07 => 15,
            Rule::Rule08 => 8,
        }
    }

    /// Short human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            Rule::Rule01 => "point beyond control limits",
            Rule::Rule02 => "9 points in a row on one side of the center line",
            Rule::Rule03 => "6 points in a row steadily increasing or decreasing",
            Rule::Rule04 => "14 points in a row alternating up and down",
            Rule::Rule05 => "2 of 3 points beyond 2 sigma on one side",
            Rule::Rule06 => "4 of 5 points beyond 1 sigma on one side",
            Rule::Rule07 => "15 points in a row within 1 sigma",
            Rule::Rule08 => "8 points in a row beyond 1 sigma on either side",
        }
    }

    /// Returns the indices of the points that close a matching window.
    pub fn evaluate(self, points: &[ZonedPoint]) -> Vec<usize> {
        if points.len() < self.window() {
            return Vec::new();
        }
        match self {
            Rule::Rule01 => beyond_limits(points),
            Rule::Rule02 => one_side_run(points, self.window()),
            Rule::Rule03 => trend(points, self.window()),
            Rule::Rule04 => alternating(points, self.window()),
            Rule::Rule05 => k_of_window(points, self.window(), 2, Band::A),
            Rule::Rule06 => k_of_window(points, self.window(), 4, Band::B),
            Rule::Rule07 => band_run(points, self.window(), |b| b == Band::C),
            Rule::Rule08 => band_run(points, self.window(), |b| b >= Band::B),
        }
    }
}

/// Ordered, duplicate-free selection of rules to evaluate.
///
/// # Examples
///
/// ```
/// use spc_core::spc::{Rule, RuleSet};
///
/// let set = RuleSet::new([Rule::Rule05, Rule::Rule01, Rule::Rule05]);
/// assert_eq!(set.iter().collect::<Vec<_>>(), vec![Rule::Rule05, Rule::Rule01]);
/// assert_eq!(RuleSet::default().len(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Rule>", into = "Vec<Rule>")]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Builds a set from `rules`, keeping the first occurrence of each.
    pub fn new<I: IntoIterator<Item = Rule>>(rules: I) -> Self {
        let mut kept: Vec<Rule> = Vec::new();
        for rule in rules {
            if !kept.contains(&rule) {
                kept.push(rule);
            }
        }
        Self { rules: kept }
    }

    /// All eight Nelson rules.
    pub fn all() -> Self {
        Self::new(Rule::ALL)
    }

    /// The four classic Western Electric rules (Nelson 1, 2, 5, 6).
    pub fn western_electric() -> Self {
        Self::new([Rule::Rule01, Rule::Rule02, Rule::Rule05, Rule::Rule06])
    }

    /// No rules. Evaluation with an empty set never reports violations.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn iter(&self) -> impl Iterator<Item = Rule> + '_ {
        self.rules.iter().copied()
    }

    pub fn contains(&self, rule: Rule) -> bool {
        self.rules.contains(&rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::all()
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self::new(rules)
    }
}

impl From<RuleSet> for Vec<Rule> {
    fn from(set: RuleSet) -> Self {
        set.rules
    }
}

/// Runs every rule in `rules` over one chart's zoned points.
///
/// Rules are independent; the result is sorted by point index then rule,
/// so it does not depend on the order of `rules`.
pub fn evaluate_rules(chart: ChartId, points: &[ZonedPoint], rules: &RuleSet) -> Vec<Violation> {
    let mut violations: Vec<Violation> = rules
        .iter()
        .flat_map(|rule| {
            rule.evaluate(points)
                .into_iter()
                .map(move |point_index| Violation {
                    chart,
                    point_index,
                    rule,
                })
        })
        .collect();
    violations.sort();
    violations
}

// ---------------------------------------------------------------------------
// Rule detectors
// ---------------------------------------------------------------------------

/// Nelson Rule 1: point beyond the control limits.
fn beyond_limits(points: &[ZonedPoint]) -> Vec<usize> {
    points
        .iter()
        .filter(|p| p.zone.band == Band::Beyond)
        .map(|p| p.index)
        .collect()
}

/// Nelson Rule 2: `run` consecutive points on the same side of CL.
///
/// A point exactly on CL breaks the run.
fn one_side_run(points: &[ZonedPoint], run: usize) -> Vec<usize> {
    let mut hits = Vec::new();
    let mut length = 0_usize;
    let mut side = Side::Center;
    for p in points {
        if p.zone.side == Side::Center {
            length = 0;
        } else if p.zone.side == side {
            length += 1;
        } else {
            length = 1;
        }
        side = p.zone.side;
        if length >= run {
            hits.push(p.index);
        }
    }
    hits
}

/// Direction of each step: `Greater` = up, `Less` = down, `Equal` = flat.
fn steps(points: &[ZonedPoint]) -> Vec<Ordering> {
    points
        .windows(2)
        .map(|w| w[1].value.total_cmp(&w[0].value))
        .collect()
}

/// Nelson Rule 3: `run` points steadily increasing or decreasing.
///
/// `run` points form `run - 1` steps in the same direction. Flat steps
/// break the trend.
fn trend(points: &[ZonedPoint], run: usize) -> Vec<usize> {
    let mut hits = Vec::new();
    let mut length = 0_usize;
    let mut previous = Ordering::Equal;
    for (i, step) in steps(points).into_iter().enumerate() {
        length = match step {
            Ordering::Equal => 0,
            s if s == previous => length + 1,
            _ => 1,
        };
        previous = step;
        // step i joins points[i] and points[i + 1]
        if length + 1 >= run {
            hits.push(points[i + 1].index);
        }
    }
    hits
}

/// Nelson Rule 4: `run` points alternating up and down.
fn alternating(points: &[ZonedPoint], run: usize) -> Vec<usize> {
    let mut hits = Vec::new();
    let mut length = 0_usize;
    let mut previous = Ordering::Equal;
    for (i, step) in steps(points).into_iter().enumerate() {
        length = match step {
            Ordering::Equal => 0,
            s if previous != Ordering::Equal && s == previous.reverse() => length + 1,
            _ => 1,
        };
        previous = step;
        if length + 1 >= run {
            hits.push(points[i + 1].index);
        }
    }
    hits
}

/// Nelson Rules 5 and 6: at least `k` of `window` consecutive points at
/// `band` or further out, all on the same side.
fn k_of_window(points: &[ZonedPoint], window: usize, k: usize, band: Band) -> Vec<usize> {
    points
        .windows(window)
        .filter(|w| {
            [Side::Above, Side::Below]
                .iter()
                .any(|&side| w.iter().filter(|p| p.zone.at_least(band, side)).count() >= k)
        })
        .filter_map(|w| w.last().map(|p| p.index))
        .collect()
}

/// Nelson Rules 7 and 8: `run` consecutive points whose band satisfies `pred`,
/// regardless of side.
fn band_run(points: &[ZonedPoint], run: usize, pred: impl Fn(Band) -> bool) -> Vec<usize> {
    let mut hits = Vec::new();
    let mut length = 0_usize;
    for p in points {
        if pred(p.zone.band) {
            length += 1;
        } else {
            length = 0;
        }
        if length >= run {
            hits.push(p.index);
        }
    }
    hits
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::spc::chart::ControlLimits;
    use crate::spc::zones::Zone;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn rule1_matches_limit_breaches_exactly(
            data in proptest::collection::vec(-50.0_f64..50.0, 1..=60)
        ) {
            let limits = ControlLimits { ucl: 20.0, cl: 0.0, lcl: -20.0 };
            let points: Vec<ZonedPoint> = data
                .iter()
                .enumerate()
                .map(|(i, &v)| ZonedPoint { index: i, value: v, zone: Zone::classify(v, &limits) })
                .collect();
            let expected: Vec<usize> = data
                .iter()
                .enumerate()
                .filter(|&(_, &v)| v > limits.ucl || v < limits.lcl)
                .map(|(i, _)| i)
                .collect();
            prop_assert_eq!(Rule::Rule01.evaluate(&points), expected);
        }

        #[test]
        fn violations_never_precede_window(
            data in proptest::collection::vec(-30.0_f64..30.0, 0..=60)
        ) {
            let limits = ControlLimits { ucl: 15.0, cl: 0.0, lcl: -15.0 };
            let points: Vec<ZonedPoint> = data
                .iter()
                .enumerate()
                .map(|(i, &v)| ZonedPoint { index: i, value: v, zone: Zone::classify(v, &limits) })
                .collect();
            for rule in Rule::ALL {
                for idx in rule.evaluate(&points) {
                    prop_assert!(idx + 1 >= rule.window(), "{:?} fired at {}", rule, idx);
                }
            }
        }
    }
}
