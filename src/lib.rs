//! Expenditure-approach GDP scenario engine
//!
//! Each component series gets a baseline growth rate and a projection under
//! a user adjustment; the projections are summed into a reconstructed
//! aggregate and compared with the historical total.

pub mod error;
pub mod series;
pub mod projection;
pub mod scenario;

pub use error::{Result, ScenarioError};
pub use projection::{aggregate, estimate_growth_rate, project, Projection, ProjectionMethod};
pub use scenario::{ScenarioConfig, ScenarioEngine, ScenarioParams, ScenarioResult};
pub use series::{default_dataset, ComponentSeries, Dataset};
