//! Error types for feature assembly and prediction operations.

use thiserror::Error;

use crate::vector::RangeViolation;

/// Result type alias for prediction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Prediction pipeline error types.
#[derive(Debug, Error)]
pub enum Error {
    /// A schema feature was not supplied by the input source.
    #[error("missing value for feature `{name}`")]
    MissingFeature { name: &'static str },

    /// A supplied name does not belong to the feature schema.
    #[error("unknown feature `{name}`")]
    UnknownFeature { name: String },

    /// The same feature was supplied more than once.
    #[error("duplicate value for feature `{name}`")]
    DuplicateFeature { name: &'static str },

    /// One or more values fell outside the documented training ranges.
    ///
    /// Only produced by the opt-in range check; assembly itself never
    /// rejects out-of-range values.
    #[error("{} value(s) outside the documented training ranges", .violations.len())]
    OutOfRange { violations: Vec<RangeViolation> },

    /// The external predictor failed to produce an output.
    #[error("prediction failed: {message}")]
    Prediction {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Create a prediction error from a message.
    pub fn prediction(message: impl Into<String>) -> Self {
        Error::Prediction {
            message: message.into(),
            source: None,
        }
    }

    /// Create a prediction error wrapping an underlying cause.
    pub fn prediction_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::Prediction {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check if the error is fixable by correcting the supplied inputs.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Error::Prediction { .. })
    }

    /// Get error category for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Error::MissingFeature { .. } => "missing_feature",
            Error::UnknownFeature { .. } => "unknown_feature",
            Error::DuplicateFeature { .. } => "duplicate_feature",
            Error::OutOfRange { .. } => "out_of_range",
            Error::Prediction { .. } => "prediction",
        }
    }
}
