//! Built-in simulator deployments

use super::FeeSchedule;
use crate::params::{ModeFlags, ParameterBounds, RateParameters, RateRange, DEFAULT_RATIO_LIMIT};
use serde::{Deserialize, Serialize};

/// Event stream used for the headline volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeadlineStream {
    Primary,
    SecondaryA,
}

/// Display names for a variant's series and event volumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesLabels {
    pub baseline: &'static str,
    pub alternative: &'static str,
    pub headline_stream: HeadlineStream,
    pub headline_noun: &'static str,
}

/// Simulator deployment: fee schedule, input ranges and starting rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Solana tx fees vs ER commits and sessions, up to 100 tps
    Standard,
    /// Same comparison up to 50,000 tps with an optional dedicated node
    Dedicated,
    /// Third-party VRF vs native VRF, free from inside an ER
    Vrf,
}

impl Variant {
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Standard => "standard",
            Variant::Dedicated => "dedicated",
            Variant::Vrf => "vrf",
        }
    }

    pub fn fee_schedule(&self) -> FeeSchedule {
        match self {
            Variant::Standard => FeeSchedule::standard(),
            Variant::Dedicated => FeeSchedule::dedicated(),
            Variant::Vrf => FeeSchedule::vrf(),
        }
    }

    pub fn bounds(&self) -> ParameterBounds {
        let primary_max = match self {
            Variant::Dedicated => 50_000.0,
            Variant::Standard | Variant::Vrf => 100.0,
        };
        ParameterBounds {
            primary: RateRange::new(1.0, primary_max).with_step(1.0),
            secondary: RateRange::new(1.0, 100.0),
            ratio_limit: DEFAULT_RATIO_LIMIT,
        }
    }

    pub fn default_params(&self) -> RateParameters {
        match self {
            Variant::Standard => RateParameters::new(50.0, 30.0, 1.0),
            Variant::Dedicated => RateParameters::new(10_000.0, 30.0, 1.0),
            Variant::Vrf => RateParameters::new(1.0, 5.0, 1.0),
        }
        .with_mode(ModeFlags::default())
    }

    pub fn labels(&self) -> SeriesLabels {
        match self {
            Variant::Standard => SeriesLabels {
                baseline: "Solana",
                alternative: "ER (Commits + Delegations)",
                headline_stream: HeadlineStream::Primary,
                headline_noun: "transactions",
            },
            Variant::Dedicated => SeriesLabels {
                baseline: "Solana Only",
                alternative: "MagicBlock (ER Sessions + Commits)",
                headline_stream: HeadlineStream::Primary,
                headline_noun: "transactions",
            },
            Variant::Vrf => SeriesLabels {
                baseline: "Alternative VRF",
                alternative: "MagicBlock VRF",
                headline_stream: HeadlineStream::SecondaryA,
                headline_noun: "randomness provisions",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_bounds_valid() {
        for variant in [Variant::Standard, Variant::Dedicated, Variant::Vrf] {
            let bounds = variant.bounds();
            assert!(bounds.validate().is_ok(), "{} bounds invalid", variant.name());
            assert!(
                bounds.check(&variant.default_params()).is_ok(),
                "{} defaults out of bounds",
                variant.name()
            );
        }
    }

    #[test]
    fn test_schedule_names_match_variant() {
        for variant in [Variant::Standard, Variant::Dedicated, Variant::Vrf] {
            assert_eq!(variant.fee_schedule().name(), variant.name());
        }
    }
}
