//! Projection engine for 30-day cumulative fee costs

mod daily;
mod engine;
mod series;

pub use daily::DailyVolumes;
pub use engine::{breakeven_primary_rate, compute, ProjectionEngine};
pub use series::{CheaperSeries, ComparisonRatio, CostSeries, DayRow, ProjectionResult};

/// Fixed projection horizon
pub const PROJECTION_DAYS: usize = 30;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

pub const SECONDS_PER_MINUTE: f64 = 60.0;
