//! Media client error types.

use std::collections::BTreeMap;

use atrium_sdk::TransportError;
use serde::Deserialize;
use thiserror::Error;

/// Errors returned by the media resource client.
#[derive(Debug, Error)]
pub enum MediaError {
    /// A required field is missing or invalid.
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        /// Per-field messages as reported by the server.
        errors: BTreeMap<String, Vec<String>>,
    },

    /// The referenced folder or file does not exist.
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    /// Network failure or an unexpected status.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A body could not be encoded, or the response did not match the
    /// expected envelope.
    #[error("malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type alias using MediaError.
pub type MediaResult<T> = Result<T, MediaError>;

/// Body of a 400/422 response.
#[derive(Debug, Deserialize)]
struct ValidationBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: BTreeMap<String, Vec<String>>,
}

impl MediaError {
    /// Client-side rejection of a single field.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Validation {
            errors: BTreeMap::from([(field.to_string(), vec![message.clone()])]),
            message,
        }
    }

    /// Build a validation error from a server response body.
    ///
    /// Falls back to the raw body text when it is not the usual
    /// `{message, errors}` shape.
    pub(crate) fn from_validation_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<ValidationBody>(body) {
            Ok(parsed) => Self::Validation {
                message: parsed
                    .message
                    .unwrap_or_else(|| "the given data was invalid".to_string()),
                errors: parsed.errors,
            },
            Err(_) => Self::Validation {
                message: String::from_utf8_lossy(body).into_owned(),
                errors: BTreeMap::new(),
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
