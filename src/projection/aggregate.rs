//! Reconstruct the aggregate from component projections

use crate::error::{Result, ScenarioError};
use crate::series::Period;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sum component sequences per period and divide by `divisor`
///
/// Every sequence must have the same length. An empty mapping yields an
/// empty result.
pub fn aggregate(components: &BTreeMap<String, Vec<f64>>, divisor: f64) -> Result<Vec<f64>> {
    aggregate_slices(
        components.iter().map(|(name, values)| (name.as_str(), values.as_slice())),
        divisor,
    )
}

/// Same as [`aggregate`] over borrowed `(name, values)` pairs
pub fn aggregate_slices<'a, I>(components: I, divisor: f64) -> Result<Vec<f64>>
where
    I: IntoIterator<Item = (&'a str, &'a [f64])>,
{
    if divisor == 0.0 || !divisor.is_finite() {
        return Err(ScenarioError::InvalidDivisor(divisor));
    }

    let mut totals: Option<Vec<f64>> = None;
    for (name, values) in components {
        match totals.as_mut() {
            None => totals = Some(values.to_vec()),
            Some(acc) => {
                if acc.len() != values.len() {
                    return Err(ScenarioError::MisalignedSeries {
                        component: name.to_string(),
                        expected: acc.len(),
                        actual: values.len(),
                    });
                }
                for (total, v) in acc.iter_mut().zip(values) {
                    *total += v;
                }
            }
        }
    }

    let mut totals = totals.unwrap_or_default();
    for total in &mut totals {
        *total /= divisor;
    }
    Ok(totals)
}

/// One period of the reconstructed vs. historical comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub period: Period,
    pub reconstructed: f64,
    pub ground_truth: f64,
    /// reconstructed - ground_truth
    pub difference: f64,
    /// difference / ground_truth, None when the truth is zero
    pub relative_difference: Option<f64>,
}

/// Reconstructed aggregate side by side with the unmodified ground truth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateComparison {
    pub rows: Vec<ComparisonRow>,
}

impl AggregateComparison {
    pub fn new(periods: &[Period], reconstructed: &[f64], ground_truth: &[f64]) -> Result<Self> {
        let n = periods.len();
        if reconstructed.len() != n {
            return Err(ScenarioError::MisalignedSeries {
                component: "reconstructed".to_string(),
                expected: n,
                actual: reconstructed.len(),
            });
        }
        if ground_truth.len() != n {
            return Err(ScenarioError::MisalignedSeries {
                component: "ground_truth".to_string(),
                expected: n,
                actual: ground_truth.len(),
            });
        }

        let rows = periods
            .iter()
            .zip(reconstructed.iter().zip(ground_truth))
            .map(|(&period, (&reconstructed, &ground_truth))| {
                let difference = reconstructed - ground_truth;
                let relative_difference = if ground_truth != 0.0 {
                    Some(difference / ground_truth)
                } else {
                    None
                };
                ComparisonRow {
                    period,
                    reconstructed,
                    ground_truth,
                    difference,
                    relative_difference,
                }
            })
            .collect();

        Ok(Self { rows })
    }

    pub fn reconstructed(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.reconstructed).collect()
    }

    pub fn ground_truth(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.ground_truth).collect()
    }

    pub fn mean_abs_difference(&self) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        self.rows.iter().map(|r| r.difference.abs()).sum::<f64>() / self.rows.len() as f64
    }

    /// Period with the largest absolute difference
    pub fn max_abs_difference(&self) -> Option<(Period, f64)> {
        self.rows
            .iter()
            .map(|r| (r.period, r.difference.abs()))
            .fold(None, |best, (period, diff)| match best {
                Some((_, d)) if d >= diff => best,
                _ => Some((period, diff)),
            })
    }
}
