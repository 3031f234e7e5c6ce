//! Bidirectional clamping of rate parameters
//!
//! Each setter changes one field, then re-checks both secondary rates against
//! the ratio limit:
//! - raising a secondary rate past `ratio_limit * primary` raises the primary
//!   rate to `secondary / ratio_limit`, rounded up to the primary range's step
//! - lowering the primary rate clamps any secondary rate down to
//!   `ratio_limit * primary`

use super::{ModeFlags, ParameterBounds, RateParameters};
use crate::error::Result;
use log::{debug, warn};

/// Which secondary stream a setter addresses
#[derive(Debug, Clone, Copy)]
enum Secondary {
    A,
    B,
}

/// Owns the current parameters and keeps them inside `bounds`
#[derive(Debug, Clone)]
pub struct ParameterController {
    bounds: ParameterBounds,
    params: RateParameters,
}

impl ParameterController {
    /// Create a controller, normalizing `initial` into the valid domain
    pub fn new(bounds: ParameterBounds, initial: RateParameters) -> Result<Self> {
        bounds.validate()?;

        let mut controller = Self {
            bounds,
            params: RateParameters {
                primary_rate: bounds.primary.min,
                secondary_rate_a: bounds.secondary.min,
                secondary_rate_b: bounds.secondary.min,
                mode: initial.mode,
            },
        };
        controller.set_primary_rate(initial.primary_rate);
        controller.set_secondary_rate_a(initial.secondary_rate_a);
        controller.set_secondary_rate_b(initial.secondary_rate_b);
        Ok(controller)
    }

    pub fn params(&self) -> RateParameters {
        self.params
    }

    pub fn bounds(&self) -> &ParameterBounds {
        &self.bounds
    }

    pub fn set_primary_rate(&mut self, value: f64) -> RateParameters {
        if !value.is_finite() {
            warn!("ignoring non-finite primary rate {}", value);
            return self.params;
        }

        self.params.primary_rate = self.bounds.primary.clamp(value);
        self.reconcile();
        self.params
    }

    pub fn set_secondary_rate_a(&mut self, value: f64) -> RateParameters {
        self.set_secondary(Secondary::A, value)
    }

    pub fn set_secondary_rate_b(&mut self, value: f64) -> RateParameters {
        self.set_secondary(Secondary::B, value)
    }

    pub fn set_mode(&mut self, mode: ModeFlags) -> RateParameters {
        self.params.mode = mode;
        self.params
    }

    fn set_secondary(&mut self, which: Secondary, value: f64) -> RateParameters {
        if !value.is_finite() {
            warn!("ignoring non-finite secondary rate {:?} {}", which, value);
            return self.params;
        }

        let rate = self.bounds.secondary.clamp(value);
        let required = self.bounds.required_primary_for(rate);
        if required > self.params.primary_rate {
            debug!(
                "secondary {:?} = {} raises primary rate {} -> {}",
                which, rate, self.params.primary_rate, required
            );
            self.params.primary_rate = required;
        }

        match which {
            Secondary::A => self.params.secondary_rate_a = rate,
            Secondary::B => self.params.secondary_rate_b = rate,
        }
        self.reconcile();
        self.params
    }

    /// Clamp both secondary rates down to what the primary rate allows
    fn reconcile(&mut self) {
        let cap = self.bounds.max_secondary_for(self.params.primary_rate);

        if self.params.secondary_rate_a > cap {
            debug!("clamping secondary A {} -> {}", self.params.secondary_rate_a, cap);
            self.params.secondary_rate_a = cap;
        }
        if self.params.secondary_rate_b > cap {
            debug!("clamping secondary B {} -> {}", self.params.secondary_rate_b, cap);
            self.params.secondary_rate_b = cap;
        }

        debug_assert!(self.bounds.satisfies_ratio(&self.params));
    }
}
