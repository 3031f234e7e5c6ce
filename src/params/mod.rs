//! Rate parameters and the controller that keeps them inside their valid domain

mod bounds;
mod controller;

pub use bounds::{ParameterBounds, RateRange, DEFAULT_RATIO_LIMIT};
pub use controller::ParameterController;

use serde::{Deserialize, Serialize};

/// Mode flags altering which fee constants apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeFlags {
    /// Dedicated node: adds the per-primary-event surcharge
    pub dedicated: bool,

    /// Discounted alternative fees (e.g. VRF requested from inside an ER)
    pub discounted: bool,
}

/// Snapshot of the user-adjustable rates for one computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateParameters {
    /// Primary events per second (transactions)
    pub primary_rate: f64,

    /// Secondary stream A, events per minute (commits, VRF requests)
    pub secondary_rate_a: f64,

    /// Secondary stream B, events per minute (delegation sessions)
    pub secondary_rate_b: f64,

    #[serde(default)]
    pub mode: ModeFlags,
}

impl RateParameters {
    pub fn new(primary_rate: f64, secondary_rate_a: f64, secondary_rate_b: f64) -> Self {
        Self {
            primary_rate,
            secondary_rate_a,
            secondary_rate_b,
            mode: ModeFlags::default(),
        }
    }

    pub fn with_mode(mut self, mode: ModeFlags) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_primary_rate(mut self, primary_rate: f64) -> Self {
        self.primary_rate = primary_rate;
        self
    }
}
