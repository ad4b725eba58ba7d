//! Error types for the axis_chart crate

use thiserror::Error;

/// Errors that can occur when preparing a chart layout
#[derive(Error, Debug)]
pub enum ChartError {
    /// Series data that the layout pass cannot consume
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Layout options outside their accepted range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        ChartError::Serialization(err.to_string())
    }
}

/// Result type for chart operations
pub type ChartResult<T> = Result<T, ChartError>;
