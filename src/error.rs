//! Error types shared across the simulator

use thiserror::Error;

/// Errors raised while building schedules, bounds, or validating parameters
#[derive(Error, Debug)]
pub enum SimulatorError {
    /// A rate outside its configured range, or violating the ratio limit
    #[error("invalid {field} = {value}: {reason}")]
    InvalidParameter {
        field: &'static str,
        value: f64,
        reason: String,
    },

    /// Negative, non-finite or missing constant, or unsatisfiable bounds
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("could not parse number: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),
}

impl SimulatorError {
    pub fn invalid(field: &'static str, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            value,
            reason: reason.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SimulatorError>;
