//! Error types for the sales_forecast crate

use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the sales_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// No local catalog product matched the requested brand
    #[error("No local products found for brand '{brand}'")]
    NoMatchingProducts { brand: String },

    /// A label is not part of an encoder's trained vocabulary
    #[error("Label '{label}' is not known to the {encoder} encoder")]
    UnknownLabel { encoder: String, label: String },

    /// The requested product is not in the local catalog
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// A model or encoder artifact is malformed
    #[error("Artifact error: {0}")]
    ArtifactError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV reading or writing
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Error from JSON artifact decoding
    #[error("JSON error: {0}")]
    JsonError(String),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),
}

impl ForecastError {
    /// Whether this error is the empty-selection or unknown-label condition
    /// reported back to the user, as opposed to a load or data failure.
    pub fn is_user_condition(&self) -> bool {
        matches!(
            self,
            ForecastError::NoMatchingProducts { .. }
                | ForecastError::UnknownLabel { .. }
                | ForecastError::UnknownProduct(_)
                | ForecastError::InvalidParameter(_)
        )
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::CsvError(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::JsonError(err.to_string())
    }
}
