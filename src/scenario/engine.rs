//! Scenario engine: per-component projection fanned out over rayon,
//! joined by the aggregator

use super::{InvalidRatePolicy, ScenarioConfig, ScenarioParams};
use crate::error::{Result, ScenarioError};
use crate::projection::{
    aggregate_slices, estimate_growth_rate, project_with, AggregateComparison, Projection,
};
use crate::series::{ComponentSeries, Dataset, Period};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Projection of one component under one adjustment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentProjection {
    pub name: String,
    pub adjustment_pct: f64,
    /// None when the series has no real growth rate (zero anchor, sign flip)
    pub baseline_rate: Option<f64>,
    pub historical: Vec<f64>,
    #[serde(flatten)]
    pub projection: Projection,
}

/// Everything one run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub periods: Vec<Period>,
    pub aggregate_name: String,
    pub unit_divisor: f64,
    /// In dataset column order
    pub components: Vec<ComponentProjection>,
    pub comparison: AggregateComparison,
}

impl ScenarioResult {
    pub fn component(&self, name: &str) -> Option<&ComponentProjection> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn reconstructed(&self) -> Vec<f64> {
        self.comparison.reconstructed()
    }
}

/// Stateless engine; each `run` recomputes everything from its inputs
#[derive(Debug, Clone, Default)]
pub struct ScenarioEngine {
    config: ScenarioConfig,
}

impl ScenarioEngine {
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Estimate the baseline rate and project a single component
    pub fn project_component(
        &self,
        series: &ComponentSeries,
        adjustment_pct: f64,
    ) -> Result<ComponentProjection> {
        let (baseline_rate, rate) = match estimate_growth_rate(&series.values) {
            Ok(rate) => (Some(rate), rate),
            Err(e) => match self.config.invalid_rate {
                InvalidRatePolicy::Reject => return Err(e.for_component(&series.name)),
                InvalidRatePolicy::Substitute { rate } => {
                    warn!("{}: {}, substituting rate {}", series.name, e, rate);
                    (None, rate)
                }
            },
        };

        let projection = project_with(
            &series.values,
            rate,
            adjustment_pct,
            self.config.method,
            self.config.noise_rate,
        );
        debug!(
            "{}: baseline rate {:?}, adjustment {}%",
            series.name, baseline_rate, adjustment_pct
        );

        Ok(ComponentProjection {
            name: series.name.clone(),
            adjustment_pct,
            baseline_rate,
            historical: series.values.clone(),
            projection,
        })
    }

    /// Project every component in parallel, then aggregate
    ///
    /// Adjustment values are not range-checked here; see
    /// [`ScenarioParams::validate`] for the caller-side check.
    pub fn run(&self, dataset: &Dataset, params: &ScenarioParams) -> Result<ScenarioResult> {
        if let Some(unknown) = params
            .adjustments
            .keys()
            .find(|name| dataset.component(name).is_none())
        {
            return Err(ScenarioError::UnknownComponent(unknown.clone()));
        }

        let components: Vec<ComponentProjection> = dataset
            .components()
            .par_iter()
            .map(|series| self.project_component(series, params.adjustment(&series.name)))
            .collect::<Result<Vec<_>>>()?;

        let reconstructed = aggregate_slices(
            components
                .iter()
                .map(|c| (c.name.as_str(), c.projection.projected.as_slice())),
            self.config.unit_divisor,
        )?;
        let comparison =
            AggregateComparison::new(dataset.periods(), &reconstructed, dataset.ground_truth())?;

        info!(
            "Scenario over {} components x {} periods: mean |diff| {:.3}",
            components.len(),
            dataset.n_periods(),
            comparison.mean_abs_difference()
        );

        Ok(ScenarioResult {
            periods: dataset.periods().to_vec(),
            aggregate_name: dataset.aggregate_name().to_string(),
            unit_divisor: self.config.unit_divisor,
            components,
            comparison,
        })
    }
}
