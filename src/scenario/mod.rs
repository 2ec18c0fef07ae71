//! Scenario runs: adjustments in, component projections and the
//! reconstructed aggregate out

mod params;
mod engine;
pub mod report;

pub use params::{InvalidRatePolicy, ScenarioConfig, ScenarioParams};
pub use engine::{ComponentProjection, ScenarioEngine, ScenarioResult};
