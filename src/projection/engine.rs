//! Core projection engine for daily cumulative fee costs

use super::daily::DailyVolumes;
use super::series::{ComparisonRatio, CostSeries, ProjectionResult};
use super::{PROJECTION_DAYS, SECONDS_PER_DAY};
use crate::params::RateParameters;
use crate::schedule::FeeSchedule;
use log::debug;

/// Project both cost models over the fixed horizon.
///
/// Pure and total: parameters are expected to be validated upstream.
pub fn compute(params: &RateParameters, schedule: &FeeSchedule, unit_price_usd: f64) -> ProjectionResult {
    let daily = DailyVolumes::from_params(params);

    let baseline_daily = schedule
        .baseline()
        .daily_fee(daily.primary, daily.secondary_a, daily.secondary_b)
        * unit_price_usd;

    let mut alternative_daily = schedule
        .alternative_for(params.mode.discounted)
        .daily_fee(daily.primary, daily.secondary_a, daily.secondary_b)
        * unit_price_usd;
    if params.mode.dedicated {
        alternative_daily += daily.primary * schedule.dedicated_surcharge() * unit_price_usd;
    }

    let baseline = CostSeries::linear(baseline_daily);
    let alternative = CostSeries::linear(alternative_daily);
    let totals = daily.over(PROJECTION_DAYS);

    let comparison = ComparisonRatio::between(baseline.final_value(), alternative.final_value());
    let savings = baseline.final_value() - alternative.final_value();

    debug!(
        "projected {:?}: baseline {:.2}/day, alternative {:.2}/day",
        params, baseline_daily, alternative_daily
    );

    ProjectionResult {
        params: *params,
        baseline,
        alternative,
        baseline_daily,
        alternative_daily,
        total_primary_events: totals.primary,
        total_secondary_events_a: totals.secondary_a,
        total_secondary_events_b: totals.secondary_b,
        comparison,
        savings,
        breakeven_primary_rate: breakeven_primary_rate(params, schedule),
    }
}

/// Primary rate (events/sec) at which both models cost the same.
///
/// Both costs are linear in the primary rate; the secondary rates and mode
/// are held fixed. `None` when the baseline never overtakes the alternative.
/// A crossover below zero is reported as `0.0`: the alternative is cheaper at
/// any primary rate.
pub fn breakeven_primary_rate(params: &RateParameters, schedule: &FeeSchedule) -> Option<f64> {
    let daily = DailyVolumes::from_params(params);
    let base = schedule.baseline();
    let alt = schedule.alternative_for(params.mode.discounted);

    let surcharge = if params.mode.dedicated {
        schedule.dedicated_surcharge()
    } else {
        0.0
    };

    // Fee per primary event the baseline pays over the alternative
    let slope = base.per_primary - alt.per_primary - surcharge;
    if slope <= 0.0 {
        return None;
    }

    let fixed_gap = daily.secondary_a * (alt.per_secondary_a - base.per_secondary_a)
        + daily.secondary_b * (alt.per_secondary_b - base.per_secondary_b);

    Some((fixed_gap / slope / SECONDS_PER_DAY).max(0.0))
}

/// Engine bound to one immutable fee schedule
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    schedule: FeeSchedule,
}

impl ProjectionEngine {
    pub fn new(schedule: FeeSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    /// Project at the schedule's unit price
    pub fn project(&self, params: &RateParameters) -> ProjectionResult {
        compute(params, &self.schedule, self.schedule.unit_price_usd())
    }
}
