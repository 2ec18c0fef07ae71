//! Error types for estimation, projection and aggregation

use thiserror::Error;

/// Errors raised by the scenario engine and its data loaders
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// Series cannot yield a real growth rate, or fails dataset validation
    #[error("Invalid series: {reason}")]
    InvalidSeries { reason: String },

    /// Sequences that must share a period axis differ in length
    #[error("Misaligned series '{component}': expected {expected} periods, got {actual}")]
    MisalignedSeries {
        component: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid unit divisor: {0}")]
    InvalidDivisor(f64),

    /// Caller-side range check on adjustment percentages
    #[error("Adjustment for '{component}' out of range: {value}% (allowed -50..=50)")]
    AdjustmentOutOfRange { component: String, value: f64 },

    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    /// Error attributed to a single component
    #[error("Component '{name}': {source}")]
    Component {
        name: String,
        #[source]
        source: Box<ScenarioError>,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScenarioError {
    pub(crate) fn invalid_series(reason: impl Into<String>) -> Self {
        ScenarioError::InvalidSeries {
            reason: reason.into(),
        }
    }

    /// Attach the component name to this error
    pub fn for_component(self, name: &str) -> Self {
        ScenarioError::Component {
            name: name.to_string(),
            source: Box::new(self),
        }
    }

    /// True for `InvalidSeries`, looking through component wrappers
    pub fn is_invalid_series(&self) -> bool {
        match self {
            ScenarioError::InvalidSeries { .. } => true,
            ScenarioError::Component { source, .. } => source.is_invalid_series(),
            _ => false,
        }
    }

    /// True for `MisalignedSeries`, looking through component wrappers
    pub fn is_misaligned(&self) -> bool {
        match self {
            ScenarioError::MisalignedSeries { .. } => true,
            ScenarioError::Component { source, .. } => source.is_misaligned(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScenarioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_misaligned_message() {
        let error = ScenarioError::MisalignedSeries {
            component: "inv".to_string(),
            expected: 9,
            actual: 8,
        };
        assert_eq!(
            error.to_string(),
            "Misaligned series 'inv': expected 9 periods, got 8"
        );
    }

    #[test]
    fn test_component_wrapper() {
        let error = ScenarioError::invalid_series("anchor value is zero").for_component("invent");
        assert_eq!(
            error.to_string(),
            "Component 'invent': Invalid series: anchor value is zero"
        );
        assert!(error.is_invalid_series());
        assert!(!error.is_misaligned());
    }

    #[test]
    fn test_error_implements_std_error() {
        fn assert_std_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_std_error::<ScenarioError>();
    }
}
