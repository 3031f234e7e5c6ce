//! Fee schedules: the static per-event fee constants of both cost models

mod variant;
pub mod loader;

pub use variant::{HeadlineStream, SeriesLabels, Variant};

use crate::error::{Result, SimulatorError};
use serde::{Deserialize, Serialize};

/// Solana base fee per signature (SOL)
pub const SOLANA_FEE_PER_TX: f64 = 0.000005;

/// Ephemeral Rollup fee per commit (SOL)
pub const ER_FEE_PER_COMMIT: f64 = 0.0001;

/// Ephemeral Rollup fee per delegation session (SOL)
pub const ER_FEE_PER_SESSION: f64 = 0.0003;

/// Extra fee per transaction on a dedicated ER node (SOL)
pub const DEDICATED_BASE_FEE: f64 = 0.00000005;

/// Third-party VRF fee per request (SOL)
pub const ALTERNATIVE_VRF_FEE: f64 = 0.002;

/// Native VRF fee per request outside an ER (SOL)
pub const NATIVE_VRF_FEE: f64 = 0.0005;

/// Display price of one SOL
pub const DEFAULT_UNIT_PRICE_USD: f64 = 200.0;

/// Per-event fee coefficients of one cost model, in fee units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeModel {
    pub per_primary: f64,
    pub per_secondary_a: f64,
    pub per_secondary_b: f64,
}

impl FeeModel {
    /// Model charging only primary events
    pub fn primary_only(fee: f64) -> Self {
        Self {
            per_primary: fee,
            ..Default::default()
        }
    }

    /// Model charging only the two secondary streams
    pub fn secondary_only(fee_a: f64, fee_b: f64) -> Self {
        Self {
            per_primary: 0.0,
            per_secondary_a: fee_a,
            per_secondary_b: fee_b,
        }
    }

    /// Fee units charged for one day of the given event volumes
    pub fn daily_fee(&self, primary: f64, secondary_a: f64, secondary_b: f64) -> f64 {
        primary * self.per_primary + secondary_a * self.per_secondary_a + secondary_b * self.per_secondary_b
    }

    fn validate(&self, model: &str) -> Result<()> {
        check_fee(&format!("{model}.per_primary"), self.per_primary)?;
        check_fee(&format!("{model}.per_secondary_a"), self.per_secondary_a)?;
        check_fee(&format!("{model}.per_secondary_b"), self.per_secondary_b)
    }
}

fn check_fee(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SimulatorError::config(format!(
            "fee constant {name} must be finite and non-negative, got {value}"
        )));
    }
    Ok(())
}

/// Immutable fee constants for both models
///
/// Construct through [`FeeSchedule::new`] so that every constant is checked
/// before the first projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeSchedule {
    name: String,
    baseline: FeeModel,
    alternative: FeeModel,
    dedicated_surcharge: f64,
    discounted_alternative: Option<FeeModel>,
    unit_price_usd: f64,
}

impl FeeSchedule {
    pub fn new(
        name: impl Into<String>,
        baseline: FeeModel,
        alternative: FeeModel,
        dedicated_surcharge: f64,
        discounted_alternative: Option<FeeModel>,
        unit_price_usd: f64,
    ) -> Result<Self> {
        baseline.validate("baseline")?;
        alternative.validate("alternative")?;
        check_fee("dedicated_surcharge", dedicated_surcharge)?;
        if let Some(discounted) = &discounted_alternative {
            discounted.validate("discounted")?;
        }
        check_unit_price(unit_price_usd)?;

        Ok(Self {
            name: name.into(),
            baseline,
            alternative,
            dedicated_surcharge,
            discounted_alternative,
            unit_price_usd,
        })
    }

    /// Same schedule with a different display price
    pub fn with_unit_price(mut self, unit_price_usd: f64) -> Result<Self> {
        check_unit_price(unit_price_usd)?;
        self.unit_price_usd = unit_price_usd;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn baseline(&self) -> &FeeModel {
        &self.baseline
    }

    pub fn alternative(&self) -> &FeeModel {
        &self.alternative
    }

    pub fn dedicated_surcharge(&self) -> f64 {
        self.dedicated_surcharge
    }

    pub fn discounted_alternative(&self) -> Option<&FeeModel> {
        self.discounted_alternative.as_ref()
    }

    pub fn unit_price_usd(&self) -> f64 {
        self.unit_price_usd
    }

    /// Alternative model in effect for the discount flag.
    /// Falls back to the regular model when no discounted one is configured.
    pub fn alternative_for(&self, discounted: bool) -> &FeeModel {
        match (&self.discounted_alternative, discounted) {
            (Some(model), true) => model,
            _ => &self.alternative,
        }
    }

    /// Solana transactions vs ER commits and delegation sessions
    pub fn standard() -> Self {
        Self {
            name: "standard".to_string(),
            baseline: FeeModel::primary_only(SOLANA_FEE_PER_TX),
            alternative: FeeModel::secondary_only(ER_FEE_PER_COMMIT, ER_FEE_PER_SESSION),
            dedicated_surcharge: 0.0,
            discounted_alternative: None,
            unit_price_usd: DEFAULT_UNIT_PRICE_USD,
        }
    }

    /// Standard schedule plus the per-transaction fee of a dedicated node
    pub fn dedicated() -> Self {
        Self {
            name: "dedicated".to_string(),
            dedicated_surcharge: DEDICATED_BASE_FEE,
            ..Self::standard()
        }
    }

    /// Third-party VRF vs native VRF, free inside an ER.
    /// VRF requests are carried on secondary stream A.
    pub fn vrf() -> Self {
        Self {
            name: "vrf".to_string(),
            baseline: FeeModel::secondary_only(ALTERNATIVE_VRF_FEE, 0.0),
            alternative: FeeModel::secondary_only(NATIVE_VRF_FEE, 0.0),
            dedicated_surcharge: 0.0,
            discounted_alternative: Some(FeeModel::default()),
            unit_price_usd: DEFAULT_UNIT_PRICE_USD,
        }
    }
}

fn check_unit_price(unit_price_usd: f64) -> Result<()> {
    if !unit_price_usd.is_finite() || unit_price_usd <= 0.0 {
        return Err(SimulatorError::config(format!(
            "unit price must be finite and positive, got {unit_price_usd}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_pass_validation() {
        for schedule in [FeeSchedule::standard(), FeeSchedule::dedicated(), FeeSchedule::vrf()] {
            let rebuilt = FeeSchedule::new(
                schedule.name(),
                *schedule.baseline(),
                *schedule.alternative(),
                schedule.dedicated_surcharge(),
                schedule.discounted_alternative().copied(),
                schedule.unit_price_usd(),
            );
            assert!(rebuilt.is_ok(), "{} preset rejected: {:?}", schedule.name(), rebuilt.err());
            assert_eq!(rebuilt.unwrap(), schedule);
        }
    }

    #[test]
    fn test_negative_fee_rejected() {
        let result = FeeSchedule::new(
            "bad",
            FeeModel::primary_only(-0.000005),
            FeeModel::secondary_only(0.0001, 0.0003),
            0.0,
            None,
            200.0,
        );
        assert!(matches!(result, Err(SimulatorError::Configuration(_))));
    }

    #[test]
    fn test_nan_surcharge_rejected() {
        let result = FeeSchedule::new(
            "bad",
            FeeModel::primary_only(0.000005),
            FeeModel::secondary_only(0.0001, 0.0003),
            f64::NAN,
            None,
            200.0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_unit_price_rejected() {
        assert!(FeeSchedule::standard().with_unit_price(0.0).is_err());
        let repriced = FeeSchedule::standard().with_unit_price(150.0).unwrap();
        assert_eq!(repriced.unit_price_usd(), 150.0);
    }

    #[test]
    fn test_discount_falls_back_without_discounted_model() {
        let schedule = FeeSchedule::standard();
        assert_eq!(schedule.alternative_for(true), schedule.alternative());

        let vrf = FeeSchedule::vrf();
        assert_eq!(vrf.alternative_for(true).per_secondary_a, 0.0);
        assert_eq!(vrf.alternative_for(false).per_secondary_a, NATIVE_VRF_FEE);
    }
}
