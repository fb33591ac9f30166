//! Error types for model loading and validation.

use thiserror::Error;

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Model file and structure error types.
///
/// These cover everything up to the point a validated model exists.
/// Failures during prediction itself surface as
/// [`vassago_core::Error::Prediction`] instead, so callers at the
/// predictor boundary only ever deal with the core taxonomy.
#[derive(Debug, Error)]
pub enum ModelError {
    /// File or payload bytes do not form a valid model.
    #[error("invalid model format: {0}")]
    InvalidFormat(String),

    /// Format version this build does not understand.
    #[error("unsupported format version {found}")]
    UnsupportedVersion { found: u16 },

    /// Model carries no trees at all.
    #[error("model contains no trees")]
    EmptyForest,

    /// Metadata feature count does not match the schema.
    #[error("model expects {found} features, schema has {expected}")]
    FeatureCountMismatch { expected: usize, found: usize },

    /// A tree failed structural validation.
    #[error("malformed tree {tree}: {message}")]
    Structure { tree: usize, message: String },

    /// I/O error reading or writing a model file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse error during import.
    #[error("JSON import error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    /// Create an invalid-format error.
    pub fn invalid(message: impl Into<String>) -> Self {
        ModelError::InvalidFormat(message.into())
    }

    /// Create a structure error for one tree.
    pub fn structure(tree: usize, message: impl Into<String>) -> Self {
        ModelError::Structure {
            tree,
            message: message.into(),
        }
    }
}
