//! Baseline compound annual growth rate

use crate::error::{Result, ScenarioError};

/// Compound growth rate reconciling the first and last observations
///
/// Returns r such that `v[n-1] = v[0] * (1 + r)^(n-1)`.
///
/// Rejects series shorter than two points, a zero anchor, non-finite
/// endpoints, and endpoints of opposite sign (no real root).
pub fn estimate_growth_rate(series: &[f64]) -> Result<f64> {
    let n = series.len();
    if n < 2 {
        return Err(ScenarioError::invalid_series(format!(
            "growth rate needs at least 2 points, got {}",
            n
        )));
    }

    let first = series[0];
    let last = series[n - 1];
    if !first.is_finite() || !last.is_finite() {
        return Err(ScenarioError::invalid_series("endpoint is not finite"));
    }
    if first == 0.0 {
        return Err(ScenarioError::invalid_series("anchor value is zero"));
    }
    if last != 0.0 && first.signum() != last.signum() {
        return Err(ScenarioError::invalid_series(format!(
            "endpoints have opposite signs ({} -> {})",
            first, last
        )));
    }

    let ratio = last / first;
    let rate = ratio.powf(1.0 / (n - 1) as f64) - 1.0;
    if !rate.is_finite() {
        return Err(ScenarioError::invalid_series("growth rate is not finite"));
    }
    Ok(rate)
}
