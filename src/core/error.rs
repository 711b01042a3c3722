//! Error taxonomy for the pricing models

use thiserror::Error;

/// Errors raised while fetching market data or evaluating a model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The data service could not deliver a required value.
    #[error("Data unavailable for {ticker}: {reason}")]
    DataUnavailable { ticker: String, reason: String },

    /// Not enough observations to evaluate the model.
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// A formula would divide by zero or produce a non-finite value.
    #[error("Numeric domain error: {0}")]
    NumericDomain(String),
}

impl ModelError {
    pub fn unavailable(ticker: &str, reason: impl Into<String>) -> Self {
        ModelError::DataUnavailable {
            ticker: ticker.to_string(),
            reason: reason.into(),
        }
    }
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;
