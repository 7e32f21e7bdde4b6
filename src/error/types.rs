//! Core error type for the request pipeline.

use crate::types::ResponseType;
use thiserror::Error;

/// Faults raised while driving a request through the pipeline.
///
/// Every variant ends up on the exceptional path of
/// [`crate::client::Fetch::request`]. Non-2xx responses are not errors at
/// this level; they are reported as [`crate::types::FetchFailure::Http`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The caller cancelled the request through its [`crate::utils::cancel::CancelHandle`].
    #[error("request was aborted")]
    Aborted,

    /// The transport call itself failed (DNS, connection reset, TLS, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded with the requested selector.
    #[error("failed to decode response body as {response_type}: {message}")]
    Decode {
        response_type: ResponseType,
        message: String,
    },

    /// A middleware returned an error; the transport was not invoked.
    #[error("middleware error: {0}")]
    Middleware(String),

    /// An interceptor returned an error.
    #[error("interceptor error: {0}")]
    Interceptor(String),

    /// A header name or value could not be used on the wire.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// Invalid client configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// JSON serialization of a request body failed.
    #[error("JSON error: {0}")]
    Json(String),

    /// Telemetry initialization error
    #[cfg(feature = "telemetry")]
    #[error("Telemetry initialization error: {0}")]
    TelemetryInit(String),
}

impl FetchError {
    /// Whether this fault is a user-initiated cancellation.
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }

    /// Build a decode error for the given selector.
    pub fn decode(response_type: ResponseType, message: impl Into<String>) -> Self {
        Self::Decode {
            response_type,
            message: message.into(),
        }
    }

    /// Build a middleware error from any displayable value.
    pub fn middleware(message: impl std::fmt::Display) -> Self {
        Self::Middleware(message.to_string())
    }

    /// Build an interceptor error from any displayable value.
    pub fn interceptor(message: impl std::fmt::Display) -> Self {
        Self::Interceptor(message.to_string())
    }
}
