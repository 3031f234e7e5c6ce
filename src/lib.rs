//! Fee Simulator - 30-day cost projections for competing fee models
//!
//! This library provides:
//! - A pure projection engine comparing per-transaction fees against
//!   batched rollup fees (commits, sessions) or VRF request fees
//! - A parameter controller enforcing range bounds and the secondary/primary ratio limit
//! - Built-in and CSV-loaded fee schedules
//! - Batch and sweep runs, chart geometry, and CSV/JSON/SVG output

pub mod error;
pub mod params;
pub mod schedule;
pub mod projection;
pub mod scenario;
pub mod chart;
pub mod report;

// Re-export commonly used types
pub use error::{Result, SimulatorError};
pub use params::{ModeFlags, ParameterBounds, ParameterController, RateParameters};
pub use schedule::{FeeModel, FeeSchedule, Variant};
pub use projection::{compute, ComparisonRatio, CostSeries, ProjectionEngine, ProjectionResult};
pub use scenario::ScenarioRunner;
