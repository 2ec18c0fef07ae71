//! Component series and the validated dataset they belong to

use crate::error::{Result, ScenarioError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Calendar year used as the period axis
pub type Period = i32;

/// One expenditure-approach component (private consumption, investment, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSeries {
    pub name: String,
    /// Values in the component monetary unit, one per period (may be negative)
    pub values: Vec<f64>,
}

impl ComponentSeries {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Anchor value (first observation)
    pub fn anchor(&self) -> Option<f64> {
        self.values.first().copied()
    }
}

/// Historical input for one scenario run: the period axis, every component
/// series aligned to it, and the ground-truth aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    periods: Vec<Period>,
    components: Vec<ComponentSeries>,
    aggregate_name: String,
    ground_truth: Vec<f64>,
}

impl Dataset {
    /// Build a dataset, validating the period axis and alignment
    ///
    /// - at least two periods, consecutive years with no gaps
    /// - every component and the ground truth match the axis length
    /// - component names are unique and non-empty
    /// - all values are finite
    pub fn new(
        periods: Vec<Period>,
        components: Vec<ComponentSeries>,
        aggregate_name: impl Into<String>,
        ground_truth: Vec<f64>,
    ) -> Result<Self> {
        let aggregate_name = aggregate_name.into();

        if periods.len() < 2 {
            return Err(ScenarioError::invalid_series(format!(
                "period axis needs at least 2 periods, got {}",
                periods.len()
            )));
        }
        for pair in periods.windows(2) {
            if pair[1] != pair[0] + 1 {
                return Err(ScenarioError::invalid_series(format!(
                    "period axis must be consecutive years: {} followed by {}",
                    pair[0], pair[1]
                )));
            }
        }

        let n = periods.len();
        check_aligned(&aggregate_name, &ground_truth, n)?;

        let mut seen = HashSet::new();
        for component in &components {
            if component.name.trim().is_empty() {
                return Err(ScenarioError::invalid_series("component name is empty"));
            }
            if !seen.insert(component.name.as_str()) {
                return Err(ScenarioError::invalid_series(format!(
                    "duplicate component '{}'",
                    component.name
                )));
            }
            check_aligned(&component.name, &component.values, n)?;
        }

        Ok(Self {
            periods,
            components,
            aggregate_name,
            ground_truth,
        })
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn components(&self) -> &[ComponentSeries] {
        &self.components
    }

    pub fn component(&self, name: &str) -> Option<&ComponentSeries> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|c| c.name.as_str())
    }

    pub fn aggregate_name(&self) -> &str {
        &self.aggregate_name
    }

    /// Historical aggregate, untouched
    pub fn ground_truth(&self) -> &[f64] {
        &self.ground_truth
    }

    pub fn n_periods(&self) -> usize {
        self.periods.len()
    }
}

fn check_aligned(name: &str, values: &[f64], expected: usize) -> Result<()> {
    if values.len() != expected {
        return Err(ScenarioError::MisalignedSeries {
            component: name.to_string(),
            expected,
            actual: values.len(),
        });
    }
    if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
        return Err(ScenarioError::invalid_series(format!(
            "'{}' has a non-finite value at index {}",
            name, idx
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_components() -> Vec<ComponentSeries> {
        vec![
            ComponentSeries::new("cons", vec![10.0, 11.0, 12.0]),
            ComponentSeries::new("inv", vec![-1.0, 2.0, 3.0]),
        ]
    }

    #[test]
    fn test_valid_dataset() {
        let ds = Dataset::new(vec![2019, 2020, 2021], two_components(), "gdp", vec![9.0, 13.0, 15.0])
            .expect("valid dataset");

        assert_eq!(ds.n_periods(), 3);
        assert_eq!(ds.component_names().collect::<Vec<_>>(), vec!["cons", "inv"]);
        assert_eq!(ds.component("inv").and_then(|c| c.anchor()), Some(-1.0));
        assert!(ds.component("exports").is_none());
    }

    #[test]
    fn test_gap_in_periods_rejected() {
        let err = Dataset::new(vec![2019, 2021, 2022], two_components(), "gdp", vec![0.0; 3])
            .unwrap_err();
        assert!(err.is_invalid_series());
    }

    #[test]
    fn test_short_component_rejected() {
        let mut components = two_components();
        components[1].values.pop();
        let err = Dataset::new(vec![2019, 2020, 2021], components, "gdp", vec![0.0; 3]).unwrap_err();

        match err {
            ScenarioError::MisalignedSeries { component, expected, actual } => {
                assert_eq!(component, "inv");
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_names_and_nan_rejected() {
        let dup = vec![
            ComponentSeries::new("cons", vec![1.0, 2.0]),
            ComponentSeries::new("cons", vec![1.0, 2.0]),
        ];
        assert!(Dataset::new(vec![2019, 2020], dup, "gdp", vec![0.0; 2]).is_err());

        let nan = vec![ComponentSeries::new("cons", vec![1.0, f64::NAN])];
        assert!(Dataset::new(vec![2019, 2020], nan, "gdp", vec![0.0; 2])
            .unwrap_err()
            .is_invalid_series());
    }

    #[test]
    fn test_single_period_rejected() {
        let one = vec![ComponentSeries::new("cons", vec![1.0])];
        assert!(Dataset::new(vec![2019], one, "gdp", vec![1.0]).is_err());
    }
}
