//! Scenario projector: adjusted trajectory plus uncertainty envelope

use super::DEFAULT_NOISE_RATE;
use serde::{Deserialize, Serialize};

/// How the adjustment percentage bends a component's trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMethod {
    /// Rescale the historical deviation from the anchor by `1 + a/100`.
    /// At a = 0 the projection equals history.
    #[default]
    DeviationScaling,
    /// Compound the anchor at the adjusted rate `r * (1 + a/100)`
    CompoundGrowth,
}

/// Projected values and envelope for one component, aligned to the period axis
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Projection {
    pub projected: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl Projection {
    pub fn len(&self) -> usize {
        self.projected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projected.is_empty()
    }

    /// Envelope width (upper - lower) at each period
    pub fn widths(&self) -> Vec<f64> {
        self.upper
            .iter()
            .zip(&self.lower)
            .map(|(u, l)| u - l)
            .collect()
    }
}

/// Project a series with deviation scaling and the default noise rate
///
/// `baseline_rate` is not used by deviation scaling; it is accepted so
/// callers can switch to [`project_with`] without changing inputs.
pub fn project(series: &[f64], baseline_rate: f64, adjustment_pct: f64) -> Projection {
    project_with(
        series,
        baseline_rate,
        adjustment_pct,
        ProjectionMethod::DeviationScaling,
        DEFAULT_NOISE_RATE,
    )
}

/// Project a series with an explicit method and noise rate
///
/// The anchor `series[0]` is returned unchanged at t = 0. The envelope
/// half-width is `|v_t| * noise_rate * t`, computed from the historical
/// value and independent of the adjustment.
pub fn project_with(
    series: &[f64],
    baseline_rate: f64,
    adjustment_pct: f64,
    method: ProjectionMethod,
    noise_rate: f64,
) -> Projection {
    let n = series.len();
    let mut out = Projection {
        projected: Vec::with_capacity(n),
        lower: Vec::with_capacity(n),
        upper: Vec::with_capacity(n),
    };
    let Some(&anchor) = series.first() else {
        return out;
    };

    let growth_factor = 1.0 + adjustment_pct / 100.0;
    let adjusted_rate = baseline_rate * growth_factor;

    for (t, &historical) in series.iter().enumerate() {
        let value = if t == 0 {
            anchor
        } else {
            match method {
                // a = 0 must return history bit-for-bit, (v - v0) + v0 can round
                ProjectionMethod::DeviationScaling if growth_factor == 1.0 => historical,
                ProjectionMethod::DeviationScaling => anchor + (historical - anchor) * growth_factor,
                ProjectionMethod::CompoundGrowth => anchor * (1.0 + adjusted_rate).powi(t as i32),
            }
        };

        let noise = if t > 0 {
            historical.abs() * noise_rate * t as f64
        } else {
            0.0
        };

        out.projected.push(value);
        out.lower.push(value - noise);
        out.upper.push(value + noise);
    }

    out
}
