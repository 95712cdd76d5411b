//! Client error types.

use serde::Deserialize;
use thiserror::Error;

use crate::validate::ValidationErrors;

/// Errors that can occur when calling the Messaging API.
#[derive(Debug, Error)]
pub enum LineError {
    /// The payload was rejected locally; nothing was sent.
    #[error("{0}")]
    Invalid(#[from] ValidationErrors),

    /// The API answered with a non-success status.
    #[error("LINE API error {status}: {message}")]
    Api {
        status: u16,
        message: String,
        details: Vec<ErrorDetail>,
    },

    /// HTTP transport error.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Missing or unreadable configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A response lacked a header the operation returns.
    #[error("response is missing the `{0}` header")]
    MissingHeader(&'static str),
}

impl LineError {
    /// The validation findings, when the payload was rejected locally.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            LineError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }

    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            LineError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Body the API returns with 4xx/5xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default)]
    pub details: Vec<ErrorDetail>,
}

/// One entry of an error body's `details`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    /// JSON path of the offending property, e.g. `messages[0].text`.
    #[serde(default)]
    pub property: Option<String>,
}

/// Library result type alias.
pub type LineResult<T> = Result<T, LineError>;
