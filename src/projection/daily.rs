//! Per-day event volumes derived from the rate parameters

use super::{SECONDS_PER_DAY, SECONDS_PER_MINUTE};
use crate::params::RateParameters;
use serde::{Deserialize, Serialize};

/// Events per day on each stream
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyVolumes {
    pub primary: f64,
    pub secondary_a: f64,
    pub secondary_b: f64,
}

impl DailyVolumes {
    /// Primary rate is per second, secondary rates per minute
    pub fn from_params(params: &RateParameters) -> Self {
        Self {
            primary: params.primary_rate * SECONDS_PER_DAY,
            secondary_a: params.secondary_rate_a / SECONDS_PER_MINUTE * SECONDS_PER_DAY,
            secondary_b: params.secondary_rate_b / SECONDS_PER_MINUTE * SECONDS_PER_DAY,
        }
    }

    /// Volumes over `days` days
    pub fn over(&self, days: usize) -> Self {
        let days = days as f64;
        Self {
            primary: self.primary * days,
            secondary_a: self.secondary_a * days,
            secondary_b: self.secondary_b * days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        let volumes = DailyVolumes::from_params(&RateParameters::new(50.0, 30.0, 1.0));
        assert_eq!(volumes.primary, 4_320_000.0);
        assert_eq!(volumes.secondary_a, 43_200.0);
        assert_eq!(volumes.secondary_b, 1_440.0);

        let month = volumes.over(30);
        assert_eq!(month.primary, 129_600_000.0);
        assert_eq!(month.secondary_a, 1_296_000.0);
    }
}
