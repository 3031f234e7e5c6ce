//! Range bounds and the cross-field ratio limit

use super::RateParameters;
use crate::error::{Result, SimulatorError};
use serde::{Deserialize, Serialize};

/// Maximum secondary events per minute allowed per primary event per second
pub const DEFAULT_RATIO_LIMIT: f64 = 20.0;

/// Inclusive range for one rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateRange {
    pub min: f64,
    pub max: f64,

    /// Input granularity; `0.0` means continuous
    #[serde(default)]
    pub step: f64,
}

impl RateRange {
    /// Continuous range
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max, step: 0.0 }
    }

    /// Same range, restricted to multiples of `step`
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Smallest multiple of `step` at or above `value`
    pub fn round_up(&self, value: f64) -> f64 {
        if self.step > 0.0 {
            (value / self.step).ceil() * self.step
        } else {
            value
        }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Valid input domain of the rate parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterBounds {
    /// Primary rate range (events/sec)
    pub primary: RateRange,

    /// Range shared by both secondary rates (events/min)
    pub secondary: RateRange,

    /// secondary_rate <= ratio_limit * primary_rate
    pub ratio_limit: f64,
}

impl ParameterBounds {
    /// Build bounds, rejecting combinations where the ratio limit can't be met
    pub fn new(primary: RateRange, secondary: RateRange, ratio_limit: f64) -> Result<Self> {
        let bounds = Self {
            primary,
            secondary,
            ratio_limit,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.primary.min,
            self.primary.max,
            self.primary.step,
            self.secondary.min,
            self.secondary.max,
            self.secondary.step,
            self.ratio_limit,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(SimulatorError::config("bounds must be finite"));
        }
        if self.primary.step < 0.0 || self.secondary.step < 0.0 {
            return Err(SimulatorError::config("range steps must not be negative"));
        }
        if self.ratio_limit <= 0.0 {
            return Err(SimulatorError::config(format!(
                "ratio limit must be positive, got {}",
                self.ratio_limit
            )));
        }
        if self.primary.min <= 0.0 || self.primary.min > self.primary.max {
            return Err(SimulatorError::config(format!(
                "primary range [{}, {}] must be positive and ordered",
                self.primary.min, self.primary.max
            )));
        }
        if self.secondary.min < 0.0 || self.secondary.min > self.secondary.max {
            return Err(SimulatorError::config(format!(
                "secondary range [{}, {}] must be non-negative and ordered",
                self.secondary.min, self.secondary.max
            )));
        }
        // Highest secondary rate must be reachable by raising primary
        if self.secondary.max > self.ratio_limit * self.primary.max {
            return Err(SimulatorError::config(format!(
                "secondary max {} exceeds {} x primary max {}",
                self.secondary.max, self.ratio_limit, self.primary.max
            )));
        }
        // Lowest primary rate must still admit the lowest secondary rate
        if self.secondary.min > self.ratio_limit * self.primary.min {
            return Err(SimulatorError::config(format!(
                "secondary min {} exceeds {} x primary min {}",
                self.secondary.min, self.ratio_limit, self.primary.min
            )));
        }
        Ok(())
    }

    /// Largest secondary rate allowed for a primary rate
    pub fn max_secondary_for(&self, primary_rate: f64) -> f64 {
        (self.ratio_limit * primary_rate).min(self.secondary.max)
    }

    /// Smallest primary rate on the primary step admitting a secondary rate
    pub fn required_primary_for(&self, secondary_rate: f64) -> f64 {
        self.primary.clamp(self.primary.round_up(secondary_rate / self.ratio_limit))
    }

    /// Strict check: every field in range and both ratio constraints hold
    pub fn check(&self, params: &RateParameters) -> Result<()> {
        if !params.primary_rate.is_finite() || !self.primary.contains(params.primary_rate) {
            return Err(SimulatorError::invalid(
                "primary_rate",
                params.primary_rate,
                format!("outside [{}, {}]", self.primary.min, self.primary.max),
            ));
        }
        for (field, value) in [
            ("secondary_rate_a", params.secondary_rate_a),
            ("secondary_rate_b", params.secondary_rate_b),
        ] {
            if !value.is_finite() || !self.secondary.contains(value) {
                return Err(SimulatorError::invalid(
                    field,
                    value,
                    format!("outside [{}, {}]", self.secondary.min, self.secondary.max),
                ));
            }
            if value > self.ratio_limit * params.primary_rate {
                return Err(SimulatorError::invalid(
                    field,
                    value,
                    format!(
                        "exceeds {} x primary rate {}",
                        self.ratio_limit, params.primary_rate
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Whether both ratio constraints hold
    pub fn satisfies_ratio(&self, params: &RateParameters) -> bool {
        let limit = self.ratio_limit * params.primary_rate;
        params.secondary_rate_a <= limit && params.secondary_rate_b <= limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> ParameterBounds {
        ParameterBounds::new(
            RateRange::new(1.0, 100.0).with_step(1.0),
            RateRange::new(1.0, 100.0),
            DEFAULT_RATIO_LIMIT,
        )
        .unwrap()
    }

    #[test]
    fn test_required_primary_rounds_up() {
        let bounds = standard();
        assert_eq!(bounds.required_primary_for(100.0), 5.0);
        assert_eq!(bounds.required_primary_for(41.0), 3.0);
        assert_eq!(bounds.required_primary_for(20.0), 1.0);
        // Never below the primary minimum
        assert_eq!(bounds.required_primary_for(1.0), 1.0);
    }

    #[test]
    fn test_required_primary_on_continuous_range() {
        let bounds =
            ParameterBounds::new(RateRange::new(0.1, 10.0), RateRange::new(0.0, 100.0), DEFAULT_RATIO_LIMIT).unwrap();
        // 1.5 / 20 = 0.075, lifted only to the range minimum
        assert_eq!(bounds.required_primary_for(1.5), 0.1);
        assert_eq!(bounds.required_primary_for(3.0), 0.15);
    }

    #[test]
    fn test_required_primary_on_fractional_step() {
        let bounds = ParameterBounds::new(
            RateRange::new(0.5, 10.0).with_step(0.5),
            RateRange::new(0.0, 100.0),
            DEFAULT_RATIO_LIMIT,
        )
        .unwrap();
        assert_eq!(bounds.required_primary_for(25.0), 1.5);
        assert_eq!(bounds.required_primary_for(5.0), 0.5);
    }

    #[test]
    fn test_negative_step_rejected() {
        let result = ParameterBounds::new(
            RateRange::new(1.0, 100.0).with_step(-1.0),
            RateRange::new(1.0, 100.0),
            DEFAULT_RATIO_LIMIT,
        );
        assert!(matches!(result, Err(SimulatorError::Configuration(_))));
    }

    #[test]
    fn test_max_secondary_capped_by_range() {
        let bounds = standard();
        assert_eq!(bounds.max_secondary_for(2.0), 40.0);
        assert_eq!(bounds.max_secondary_for(50.0), 100.0);
    }

    #[test]
    fn test_unreachable_secondary_max_rejected() {
        let result = ParameterBounds::new(RateRange::new(1.0, 2.0), RateRange::new(1.0, 100.0), 20.0);
        assert!(matches!(result, Err(SimulatorError::Configuration(_))));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = ParameterBounds::new(RateRange::new(10.0, 1.0), RateRange::new(1.0, 100.0), 20.0);
        assert!(result.is_err());
        let result = ParameterBounds::new(RateRange::new(1.0, 100.0), RateRange::new(1.0, 100.0), 0.0);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_reports_field() {
        let bounds = standard();
        assert!(bounds.check(&RateParameters::new(50.0, 30.0, 1.0)).is_ok());

        match bounds.check(&RateParameters::new(0.5, 1.0, 1.0)) {
            Err(SimulatorError::InvalidParameter { field, .. }) => assert_eq!(field, "primary_rate"),
            other => panic!("expected invalid primary, got {:?}", other),
        }

        // In range but violates the ratio
        match bounds.check(&RateParameters::new(1.0, 1.0, 21.0)) {
            Err(SimulatorError::InvalidParameter { field, .. }) => assert_eq!(field, "secondary_rate_b"),
            other => panic!("expected ratio violation, got {:?}", other),
        }

        assert!(bounds.check(&RateParameters::new(50.0, f64::NAN, 1.0)).is_err());
    }
}
