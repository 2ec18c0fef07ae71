//! Scenario inputs: per-component adjustments and run configuration

use crate::error::{Result, ScenarioError};
use crate::projection::{
    ProjectionMethod, DEFAULT_NOISE_RATE, DEFAULT_UNIT_DIVISOR, MAX_ADJUSTMENT_PCT,
    MIN_ADJUSTMENT_PCT,
};
use crate::series::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Adjustment percentages keyed by component name
///
/// Components without an entry run at 0% (history reproduced).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    #[serde(default)]
    pub adjustments: BTreeMap<String, f64>,
}

impl ScenarioParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, component: impl Into<String>, pct: f64) -> Self {
        self.adjustments.insert(component.into(), pct);
        self
    }

    pub fn set(&mut self, component: impl Into<String>, pct: f64) {
        self.adjustments.insert(component.into(), pct);
    }

    pub fn adjustment(&self, component: &str) -> f64 {
        self.adjustments.get(component).copied().unwrap_or(0.0)
    }

    pub fn is_neutral(&self) -> bool {
        self.adjustments.values().all(|&pct| pct == 0.0)
    }

    /// Parse a `name=pct` assignment as given on the command line
    pub fn parse_assignment(s: &str) -> std::result::Result<(String, f64), String> {
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=PCT, got '{}'", s))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("missing component name in '{}'", s));
        }
        let pct: f64 = value
            .trim()
            .trim_end_matches('%')
            .parse()
            .map_err(|_| format!("invalid percentage '{}'", value))?;
        Ok((name.to_string(), pct))
    }

    /// Caller-side check: every name exists and every value is within -50..=50
    pub fn validate(&self, dataset: &Dataset) -> Result<()> {
        for (name, &pct) in &self.adjustments {
            if dataset.component(name).is_none() {
                return Err(ScenarioError::UnknownComponent(name.clone()));
            }
            if !(MIN_ADJUSTMENT_PCT..=MAX_ADJUSTMENT_PCT).contains(&pct) {
                return Err(ScenarioError::AdjustmentOutOfRange {
                    component: name.clone(),
                    value: pct,
                });
            }
        }
        Ok(())
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// What to do when a component's growth rate is undefined
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum InvalidRatePolicy {
    /// Warn and project with a fixed rate
    Substitute { rate: f64 },
    /// Fail the whole run
    Reject,
}

impl Default for InvalidRatePolicy {
    fn default() -> Self {
        InvalidRatePolicy::Substitute { rate: 0.0 }
    }
}

/// Run-level settings shared by every component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Summed components are divided by this (millions -> billions by default)
    #[serde(default = "default_unit_divisor")]
    pub unit_divisor: f64,

    #[serde(default)]
    pub method: ProjectionMethod,

    /// Envelope half-width per period as a share of |v_t|
    #[serde(default = "default_noise_rate")]
    pub noise_rate: f64,

    #[serde(default)]
    pub invalid_rate: InvalidRatePolicy,
}

fn default_unit_divisor() -> f64 { DEFAULT_UNIT_DIVISOR }
fn default_noise_rate() -> f64 { DEFAULT_NOISE_RATE }

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            unit_divisor: DEFAULT_UNIT_DIVISOR,
            method: ProjectionMethod::DeviationScaling,
            noise_rate: DEFAULT_NOISE_RATE,
            invalid_rate: InvalidRatePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::default_dataset;

    #[test]
    fn test_missing_adjustment_is_neutral() {
        let params = ScenarioParams::new().with("inv", 0.0);
        assert_eq!(params.adjustment("inv"), 0.0);
        assert_eq!(params.adjustment("publ_cons"), 0.0);
        assert!(params.is_neutral());
        assert!(!params.with("publ_cons", -5.0).is_neutral());
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            ScenarioParams::parse_assignment("inv=12.5"),
            Ok(("inv".to_string(), 12.5))
        );
        assert_eq!(
            ScenarioParams::parse_assignment(" publ_cons = -20% "),
            Ok(("publ_cons".to_string(), -20.0))
        );
        assert!(ScenarioParams::parse_assignment("inv").is_err());
        assert!(ScenarioParams::parse_assignment("=5").is_err());
        assert!(ScenarioParams::parse_assignment("inv=abc").is_err());
    }

    #[test]
    fn test_validate() {
        let ds = default_dataset().unwrap();

        assert!(ScenarioParams::new().with("inv", 50.0).with("invent", -50.0).validate(&ds).is_ok());

        let err = ScenarioParams::new().with("inv", 50.5).validate(&ds).unwrap_err();
        assert!(matches!(err, ScenarioError::AdjustmentOutOfRange { .. }));

        let err = ScenarioParams::new().with("imports", 1.0).validate(&ds).unwrap_err();
        assert!(matches!(err, ScenarioError::UnknownComponent(name) if name == "imports"));
    }

    #[test]
    fn test_config_json_defaults() {
        let config: ScenarioConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ScenarioConfig::default());

        let config: ScenarioConfig = serde_json::from_str(
            r#"{"unit_divisor": 1.0, "method": "compound_growth", "invalid_rate": {"policy": "reject"}}"#,
        )
        .unwrap();
        assert_eq!(config.unit_divisor, 1.0);
        assert_eq!(config.method, ProjectionMethod::CompoundGrowth);
        assert_eq!(config.invalid_rate, InvalidRatePolicy::Reject);
        assert_eq!(config.noise_rate, DEFAULT_NOISE_RATE);
    }

    #[test]
    fn test_params_json() {
        let params: ScenarioParams =
            serde_json::from_str(r#"{"adjustments": {"inv": 10, "publ_cons": -25.5}}"#).unwrap();
        assert_eq!(params.adjustment("inv"), 10.0);
        assert_eq!(params.adjustment("publ_cons"), -25.5);
    }
}
