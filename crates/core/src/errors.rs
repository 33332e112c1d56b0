//! Core error types for the Stockdesk client.
//!
//! This module defines transport-agnostic error types. HTTP-specific
//! failures are converted into [`ApiError`] by the api-client crate so the
//! rest of the workspace never sees a raw transport error.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the client application.
///
/// Every failure a view can observe flattens to a human-readable message
/// through `Display`; the variants preserve enough structure for policy
/// decisions (first-load vs background, validation vs backend).
#[derive(Error, Debug)]
pub enum Error {
    #[error("API request failed: {0}")]
    Api(#[from] ApiError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Session marker error: {0}")]
    Marker(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Errors reported by (or on the way to) the remote backend.
///
/// The backend is the source of truth for business rules; its `detail`
/// message is carried verbatim and shown to the user as-is on first-load
/// failures.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No response was received (DNS, connect, broken pipe, timeout).
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-2xx response. `detail` is the backend's human-readable message.
    #[error("{detail}")]
    Backend { status: u16, detail: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// True when the failure came from the backend rather than the network.
    pub fn is_backend(&self) -> bool {
        matches!(self, ApiError::Backend { .. })
    }
}

impl Error {
    /// The text a view should surface.
    ///
    /// Backend `detail` messages and validation messages pass through
    /// without their wrapper prefixes; everything else uses the display
    /// form.
    pub fn user_message(&self) -> String {
        match self {
            Error::Api(ApiError::Backend { detail, .. }) => detail.clone(),
            Error::Validation(v) => v.to_string(),
            other => other.to_string(),
        }
    }
}

/// Validation errors for user input, raised before a request is sent.
///
/// These surface through the same inline-error convention as backend
/// failures rather than through blocking dialogs.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_detail_is_displayed_verbatim() {
        let err = Error::Api(ApiError::Backend {
            status: 422,
            detail: "Insufficient funds for this trade".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "API request failed: Insufficient funds for this trade"
        );
    }

    #[test]
    fn missing_field_names_the_field() {
        let err = Error::Validation(ValidationError::MissingField("strike".to_string()));
        assert!(err.to_string().contains("'strike'"));
    }

    #[test]
    fn user_message_passes_backend_detail_through_verbatim() {
        let err = Error::Api(ApiError::Backend {
            status: 400,
            detail: "Market is closed".to_string(),
        });
        assert_eq!(err.user_message(), "Market is closed");

        let transport = Error::Api(ApiError::Transport("connection refused".to_string()));
        assert!(transport.user_message().starts_with("API request failed"));
    }
}
