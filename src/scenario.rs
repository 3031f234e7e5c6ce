//! Scenario runner for batch projections
//!
//! Holds one immutable fee schedule and parameter bounds, then runs any
//! number of projections against them. Batches run in parallel; each task
//! owns its parameters and shares only the schedule.

use crate::error::{Result, SimulatorError};
use crate::params::{ParameterBounds, ParameterController, RateParameters};
use crate::projection::{ProjectionEngine, ProjectionResult};
use crate::schedule::{FeeSchedule, Variant};
use rayon::prelude::*;

/// Most points a single primary-rate grid may hold
pub const MAX_GRID_POINTS: usize = 100_000;

/// Pre-configured runner for many projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::for_variant(Variant::Standard)?;
/// let results = runner.sweep_primary(&runner.default_params(), &[1.0, 10.0, 100.0])?;
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
    bounds: ParameterBounds,
}

impl ScenarioRunner {
    pub fn new(schedule: FeeSchedule, bounds: ParameterBounds) -> Result<Self> {
        bounds.validate()?;
        Ok(Self {
            engine: ProjectionEngine::new(schedule),
            bounds,
        })
    }

    /// Runner with a variant's built-in schedule and bounds
    pub fn for_variant(variant: Variant) -> Result<Self> {
        Self::new(variant.fee_schedule(), variant.bounds())
    }

    pub fn schedule(&self) -> &FeeSchedule {
        self.engine.schedule()
    }

    pub fn bounds(&self) -> &ParameterBounds {
        &self.bounds
    }

    /// Run a single projection after a strict bounds check
    pub fn run(&self, params: &RateParameters) -> Result<ProjectionResult> {
        self.bounds.check(params)?;
        Ok(self.engine.project(params))
    }

    /// Run projections for many parameter sets, preserving input order
    pub fn run_batch(&self, params: &[RateParameters]) -> Result<Vec<ProjectionResult>> {
        params.iter().try_for_each(|p| self.bounds.check(p))?;
        Ok(params.par_iter().map(|p| self.engine.project(p)).collect())
    }

    /// Evenly spaced primary rates from `from` to `to` inclusive.
    ///
    /// Both ends are first clipped to the primary range, since every rate
    /// outside it projects the same as the nearest end.
    pub fn primary_grid(&self, from: f64, to: f64, step: f64) -> Result<Vec<f64>> {
        for (field, value) in [("from", from), ("to", to), ("step", step)] {
            if !value.is_finite() {
                return Err(SimulatorError::invalid(field, value, "must be finite"));
            }
        }
        if step <= 0.0 {
            return Err(SimulatorError::invalid("step", step, "must be positive"));
        }
        if to < from {
            return Err(SimulatorError::invalid("to", to, format!("below from = {from}")));
        }

        let range = self.bounds.primary;
        let (from, to) = (range.clamp(from), range.clamp(to));
        let intervals = ((to - from) / step).floor();
        if intervals >= MAX_GRID_POINTS as f64 {
            return Err(SimulatorError::invalid(
                "step",
                step,
                format!("grid over [{from}, {to}] exceeds {MAX_GRID_POINTS} points"),
            ));
        }

        Ok((0..=intervals as usize).map(|i| from + i as f64 * step).collect())
    }

    /// Project `base` at each primary rate.
    ///
    /// Every point goes through a fresh controller, so rates outside the
    /// bounds are clamped and secondary rates follow the ratio limit.
    pub fn sweep_primary(&self, base: &RateParameters, primary_rates: &[f64]) -> Result<Vec<ProjectionResult>> {
        let points = primary_rates
            .iter()
            .map(|&rate| {
                let mut controller = ParameterController::new(self.bounds, *base)?;
                Ok(controller.set_primary_rate(rate))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(points.par_iter().map(|p| self.engine.project(p)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::CheaperSeries;

    #[test]
    fn test_batch_preserves_order() {
        let runner = ScenarioRunner::for_variant(Variant::Standard).unwrap();
        let params: Vec<_> = (1..=100)
            .map(|tps| RateParameters::new(tps as f64, 20.0, 1.0))
            .collect();

        let results = runner.run_batch(&params).unwrap();
        assert_eq!(results.len(), 100);
        for (input, result) in params.iter().zip(&results) {
            assert_eq!(&result.params, input);
        }

        // Higher throughput costs more under the baseline model
        assert!(results[99].final_baseline() > results[0].final_baseline());
    }

    #[test]
    fn test_batch_rejects_invalid_params() {
        let runner = ScenarioRunner::for_variant(Variant::Standard).unwrap();
        let params = [RateParameters::new(50.0, 30.0, 1.0), RateParameters::new(1.0, 100.0, 1.0)];
        assert!(matches!(
            runner.run_batch(&params),
            Err(SimulatorError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_sweep_crosses_over() {
        let runner = ScenarioRunner::for_variant(Variant::Standard).unwrap();
        let base = Variant::Standard.default_params();
        let results = runner.sweep_primary(&base, &[1.0, 11.0, 100.0]).unwrap();

        // 1 tps clamps secondary A from 30 down to 20
        assert_eq!(results[0].params.secondary_rate_a, 20.0);
        assert_eq!(results[0].comparison.unwrap().cheaper, CheaperSeries::Baseline);
        assert_eq!(results[2].comparison.unwrap().cheaper, CheaperSeries::Alternative);
    }

    #[test]
    fn test_primary_grid_inclusive() {
        let runner = ScenarioRunner::for_variant(Variant::Standard).unwrap();
        assert_eq!(runner.primary_grid(1.0, 5.0, 2.0).unwrap(), vec![1.0, 3.0, 5.0]);
        assert_eq!(runner.primary_grid(10.0, 10.0, 1.0).unwrap(), vec![10.0]);
    }

    #[test]
    fn test_primary_grid_clipped_to_range() {
        let runner = ScenarioRunner::for_variant(Variant::Standard).unwrap();
        let grid = runner.primary_grid(-5.0, 1e12, 1.0).unwrap();
        assert_eq!(grid.len(), 100);
        assert_eq!(grid[0], 1.0);
        assert_eq!(grid[99], 100.0);
    }

    #[test]
    fn test_primary_grid_rejects_non_finite_and_oversized() {
        let runner = ScenarioRunner::for_variant(Variant::Dedicated).unwrap();
        for (from, to, step) in [
            (1.0, f64::INFINITY, 1.0),
            (f64::NAN, 10.0, 1.0),
            (1.0, 10.0, f64::NAN),
            (1.0, 10.0, 0.0),
            (10.0, 1.0, 1.0),
        ] {
            assert!(
                matches!(runner.primary_grid(from, to, step), Err(SimulatorError::InvalidParameter { .. })),
                "accepted {from}..{to} by {step}"
            );
        }
        // 50,000 / 0.01 points
        assert!(runner.primary_grid(1.0, 50_000.0, 0.01).is_err());
        assert_eq!(runner.primary_grid(1.0, 50_000.0, 1.0).unwrap().len(), 50_000);
    }

    #[test]
    fn test_sweep_clamps_out_of_range_rates() {
        let runner = ScenarioRunner::for_variant(Variant::Standard).unwrap();
        let base = Variant::Standard.default_params();
        let results = runner.sweep_primary(&base, &[500.0]).unwrap();
        assert_eq!(results[0].params.primary_rate, 100.0);
    }
}
