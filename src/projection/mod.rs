//! Growth-rate estimation, scenario projection and aggregation

mod growth;
mod projector;
mod aggregate;

pub use growth::estimate_growth_rate;
pub use projector::{project, project_with, Projection, ProjectionMethod};
pub use aggregate::{aggregate, aggregate_slices, AggregateComparison, ComparisonRow};

// ============================================================================
// Default Scenario Constants
// ============================================================================
// - Uncertainty half-width grows by 3% of the historical magnitude per period
// - Components are reported in millions, the aggregate in billions

/// Per-period growth of the uncertainty half-width, as a share of |v_t|
pub const DEFAULT_NOISE_RATE: f64 = 0.03;

/// Divisor converting summed components into the aggregate's reporting unit
pub const DEFAULT_UNIT_DIVISOR: f64 = 1000.0;

/// Lowest adjustment percentage the caller is expected to pass
pub const MIN_ADJUSTMENT_PCT: f64 = -50.0;

/// Highest adjustment percentage the caller is expected to pass
pub const MAX_ADJUSTMENT_PCT: f64 = 50.0;
