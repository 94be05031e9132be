//! Individual and Moving Range (I-MR) chart assembly.
//!
//! Combines the limit calculator and the zone classifier into the two
//! zoned point sequences the rule engine consumes.

use serde::Serialize;

use super::chart::{ChartId, ControlLimits, Violation, ZonedPoint};
use super::limits::ImrLimits;
use super::rules::{evaluate_rules, Rule, RuleSet};
use super::zones::Zone;
use crate::error::Result;
use crate::series::Series;

/// One chart's limits and zoned points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub id: ChartId,
    pub limits: ControlLimits,
    pub points: Vec<ZonedPoint>,
}

/// A display row of a chart: the point, its limits and what it violated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub index: usize,
    pub label: Option<String>,
    pub value: f64,
    pub cl: f64,
    pub ucl: f64,
    pub lcl: f64,
    pub zone: Zone,
    pub rules: Vec<Rule>,
}

impl ChartData {
    fn zoned(id: ChartId, limits: ControlLimits, values: impl Iterator<Item = (usize, f64)>) -> Self {
        let points = values
            .map(|(index, value)| ZonedPoint {
                index,
                value,
                zone: Zone::classify(value, &limits),
            })
            .collect();
        Self { id, limits, points }
    }

    /// Tabulates the chart, one row per point.
    ///
    /// Labels come from `series`; violations for other charts are ignored.
    pub fn rows(&self, series: &Series, violations: &[Violation]) -> Vec<ChartRow> {
        self.points
            .iter()
            .map(|p| ChartRow {
                index: p.index,
                label: series.label(p.index).map(str::to_owned),
                value: p.value,
                cl: self.limits.cl,
                ucl: self.limits.ucl,
                lcl: self.limits.lcl,
                zone: p.zone,
                rules: violations
                    .iter()
                    .filter(|v| v.chart == self.id && v.point_index == p.index)
                    .map(|v| v.rule)
                    .collect(),
            })
            .collect()
    }
}

/// Both I-MR charts computed from one series.
///
/// # Examples
///
/// ```
/// use spc_core::{Series, spc::{ImrChart, RuleSet, Rule, ChartId}};
///
/// let series = Series::new(vec![10.0, 12.0, 8.0, 14.0, 80.0]).unwrap();
/// let chart = ImrChart::compute(&series).unwrap();
/// let violations = chart.evaluate(&RuleSet::all());
///
/// assert_eq!(violations.len(), 2);
/// assert!(violations.iter().all(|v| v.rule == Rule::Rule01));
/// assert_eq!(violations[0].chart, ChartId::Individuals);
/// assert_eq!(violations[0].point_index, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImrChart {
    pub limits: ImrLimits,
    pub individuals: ChartData,
    pub moving_range: ChartData,
}

impl ImrChart {
    /// Computes limits and zones for both charts.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`ImrLimits::compute`].
    pub fn compute(series: &Series) -> Result<Self> {
        let moving_range = series.moving_range();
        let limits = ImrLimits::from_parts(series.values(), &moving_range)?;

        let individuals = ChartData::zoned(
            ChartId::Individuals,
            limits.individuals,
            series.values().iter().copied().enumerate(),
        );
        // MR_i pairs observations i-1 and i, so it is indexed from 1.
        let moving_range = ChartData::zoned(
            ChartId::MovingRange,
            limits.moving_range,
            moving_range
                .values()
                .iter()
                .copied()
                .enumerate()
                .map(|(i, v)| (i + 1, v)),
        );

        Ok(Self {
            limits,
            individuals,
            moving_range,
        })
    }

    /// Runs `rules` over both charts independently.
    ///
    /// I-chart violations come first, each chart sorted by point index.
    pub fn evaluate(&self, rules: &RuleSet) -> Vec<Violation> {
        let mut violations = evaluate_rules(ChartId::Individuals, &self.individuals.points, rules);
        violations.extend(evaluate_rules(
            ChartId::MovingRange,
            &self.moving_range.points,
            rules,
        ));
        violations
    }

    pub fn chart(&self, id: ChartId) -> &ChartData {
        match id {
            ChartId::Individuals => &self.individuals,
            ChartId::MovingRange => &self.moving_range,
        }
    }
}
