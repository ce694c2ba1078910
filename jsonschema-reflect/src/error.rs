//! Error types.

use thiserror::Error;

/// Errors that abort a reflection call.
#[derive(Debug, Error)]
pub enum ReflectError {
    /// The root type has no JSON Schema representation.
    #[error("cannot reflect type `{type_name}`: {kind} types have no JSON encoding")]
    Unsupported {
        type_name: &'static str,
        kind: &'static str,
    },

    /// Encoding the finished schema failed.
    #[error("failed to encode schema: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Error reported by strict directive parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("directive `{key}` expects true or no value, got `{value}`")]
    InvalidFlag { key: String, value: String },

    #[error("directive `{key}` expects a number, got `{value}`")]
    InvalidNumber { key: String, value: String },

    #[error("directive `{0}` requires a value")]
    MissingValue(String),
}
