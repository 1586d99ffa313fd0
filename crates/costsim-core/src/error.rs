//! Error types for the costsim workspace.
//!
//! The calculators themselves are infallible pure functions; errors
//! only arise at the scenario-file and CLI boundary.

use thiserror::Error;

/// Errors raised while loading or interpreting scenario input.
#[derive(Error, Debug)]
pub enum CostSimError {
    /// IO error (scenario file reading)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Semantically invalid scenario (e.g. unknown pricing tier)
    #[error("invalid scenario: {0}")]
    Scenario(String),
}

impl CostSimError {
    /// Create a scenario error from any displayable message.
    pub fn scenario(message: impl Into<String>) -> Self {
        CostSimError::Scenario(message.into())
    }
}

/// Result type for costsim operations.
pub type Result<T> = std::result::Result<T, CostSimError>;
