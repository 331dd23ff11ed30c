// src/errors.rs
// DOCUMENTATION: Custom error types for the Places client
// PURPOSE: Centralized error handling for the entire crate

use thiserror::Error;

/// Failure of the underlying HTTP GET
/// DOCUMENTATION: Produced by a `Transport` or by the client when the
/// response status is not a success. Never retried.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request URL is stripped; it carries the API key
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    /// Used by non-reqwest transports to surface their own cause
    #[error("Request failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError::Request(e.without_url())
    }
}

impl TransportError {
    /// HTTP status code, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Request(e) => e.status().map(|s| s.as_u16()),
            TransportError::Other(_) => None,
        }
    }
}

/// Crate-level error type
/// DOCUMENTATION: Every fallible operation of the client and builder
/// returns this enum
#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Decode error: {source}")]
    Decode {
        /// Raw response body that failed to parse
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing configuration value: apiKey")]
    MissingApiKey,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl PlacesError {
    /// Raw body attached to a decode failure
    pub fn body(&self) -> Option<&str> {
        match self {
            PlacesError::Decode { body, .. } => Some(body),
            PlacesError::Transport(TransportError::Status { body, .. }) => Some(body),
            _ => None,
        }
    }
}

impl From<validator::ValidationErrors> for PlacesError {
    fn from(e: validator::ValidationErrors) -> Self {
        PlacesError::ValidationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_exposes_body() {
        let err = PlacesError::from(TransportError::Status {
            status: 403,
            body: "denied".to_string(),
        });

        assert_eq!(err.body(), Some("denied"));
        assert_eq!(err.to_string(), "Transport error: API error 403: denied");
    }

    #[test]
    fn test_decode_error_exposes_body() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = PlacesError::Decode {
            body: "{oops".to_string(),
            source,
        };

        assert_eq!(err.body(), Some("{oops"));
        assert!(err.to_string().starts_with("Decode error:"));
    }
}
