//! Cost series and projection output structures

use super::PROJECTION_DAYS;
use crate::params::RateParameters;
use serde::{Deserialize, Serialize};

/// Cumulative cost per day, index 0 is day 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSeries(Vec<f64>);

impl CostSeries {
    /// Straight-line accumulation: day `d` costs `d * daily_increment`
    pub fn linear(daily_increment: f64) -> Self {
        Self(
            (1..=PROJECTION_DAYS)
                .map(|day| day as f64 * daily_increment)
                .collect(),
        )
    }

    /// Cumulative cost at a 1-indexed day
    pub fn day(&self, day: usize) -> Option<f64> {
        day.checked_sub(1).and_then(|idx| self.0.get(idx).copied())
    }

    /// Cost on the last projected day
    pub fn final_value(&self) -> f64 {
        self.0.last().copied().unwrap_or(0.0)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(0.0, f64::max)
    }
}

/// Which series ends the horizon cheaper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheaperSeries {
    Baseline,
    Alternative,
    /// Both final costs are equal
    Neither,
}

/// Larger final cost over smaller final cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRatio {
    /// Always >= 1
    pub ratio: f64,
    pub cheaper: CheaperSeries,
}

impl ComparisonRatio {
    /// `None` when either final cost is zero (ratio not applicable)
    pub fn between(baseline_final: f64, alternative_final: f64) -> Option<Self> {
        if !(baseline_final > 0.0 && alternative_final > 0.0) {
            return None;
        }

        let comparison = if alternative_final < baseline_final {
            Self {
                ratio: baseline_final / alternative_final,
                cheaper: CheaperSeries::Alternative,
            }
        } else if baseline_final < alternative_final {
            Self {
                ratio: alternative_final / baseline_final,
                cheaper: CheaperSeries::Baseline,
            }
        } else {
            Self {
                ratio: 1.0,
                cheaper: CheaperSeries::Neither,
            }
        };
        Some(comparison)
    }
}

/// One day of output, as written to CSV
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayRow {
    pub day: u32,
    pub baseline: f64,
    pub alternative: f64,
    /// Baseline minus alternative
    pub difference: f64,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Parameters the result was computed from
    pub params: RateParameters,

    /// Cumulative baseline cost (display currency)
    pub baseline: CostSeries,

    /// Cumulative alternative cost (display currency)
    pub alternative: CostSeries,

    pub baseline_daily: f64,
    pub alternative_daily: f64,

    pub total_primary_events: f64,
    pub total_secondary_events_a: f64,
    pub total_secondary_events_b: f64,

    /// `None` when the ratio is not applicable
    pub comparison: Option<ComparisonRatio>,

    /// Baseline minus alternative on the last day; positive when the alternative saves money
    pub savings: f64,

    /// Primary rate where both models cost the same, other rates held fixed
    pub breakeven_primary_rate: Option<f64>,
}

impl ProjectionResult {
    pub fn final_baseline(&self) -> f64 {
        self.baseline.final_value()
    }

    pub fn final_alternative(&self) -> f64 {
        self.alternative.final_value()
    }

    /// Largest value across both series (chart y-axis bound)
    pub fn max_cost(&self) -> f64 {
        self.baseline.max().max(self.alternative.max())
    }

    /// Day-by-day rows for export
    pub fn rows(&self) -> Vec<DayRow> {
        self.baseline
            .values()
            .iter()
            .zip(self.alternative.values())
            .enumerate()
            .map(|(idx, (&baseline, &alternative))| DayRow {
                day: idx as u32 + 1,
                baseline,
                alternative,
                difference: baseline - alternative,
            })
            .collect()
    }
}
