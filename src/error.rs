//! Error types for the planner

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;

#[derive(Error, Debug)]
pub enum PlannerError {

    // =============================
    // Domain Errors
    // =============================

    /// Negative, non-finite or zero-where-forbidden input to a calculator.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Snapshot storage error: {0}")]
    Storage(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlannerError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        PlannerError::InvalidInput(msg.into())
    }
}
