//! Typed request outcomes.

use super::response::{FetchResponse, RawResponse, ResponseData};
use crate::error::FetchError;
use crate::utils::cancel::CancelHandle;
use thiserror::Error;

/// Result of [`crate::client::Fetch::request`].
pub type FetchResult = Result<FetchSuccess, FetchFailure>;

/// A request that completed with a 2xx status.
#[derive(Debug, Clone)]
pub struct FetchSuccess {
    /// Envelope after the interceptor chain.
    pub envelope: FetchResponse,
    /// Cancellation handle of the request.
    pub abort: CancelHandle,
    pub response: RawResponse,
}

impl FetchSuccess {
    pub fn status(&self) -> u16 {
        self.response.status
    }

    pub fn data(&self) -> Option<&ResponseData> {
        self.envelope.data.as_ref()
    }

    /// Trigger the request's cancellation handle.
    pub fn cancel(&self) {
        self.abort.cancel();
    }
}

/// A request that did not succeed.
#[derive(Error, Debug, Clone)]
pub enum FetchFailure {
    /// The transport completed with a status outside 200..=299.
    #[error("request failed with status {status}")]
    Http {
        envelope: FetchResponse,
        status: u16,
        response: RawResponse,
    },

    /// A fault occurred anywhere in the pipeline, including cancellation.
    #[error("request failed: {error}")]
    Exception {
        envelope: FetchResponse,
        is_aborted: bool,
        #[source]
        error: FetchError,
    },
}

impl FetchFailure {
    pub fn envelope(&self) -> &FetchResponse {
        match self {
            Self::Http { envelope, .. } | Self::Exception { envelope, .. } => envelope,
        }
    }

    pub fn into_envelope(self) -> FetchResponse {
        match self {
            Self::Http { envelope, .. } | Self::Exception { envelope, .. } => envelope,
        }
    }

    pub fn is_success(&self) -> bool {
        self.envelope().is_success
    }

    /// True only when the caller cancelled the request.
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Exception { is_aborted: true, .. })
    }

    /// HTTP status for controlled rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Exception { .. } => None,
        }
    }

    /// Raw transport response, if the transport call completed.
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            Self::Http { response, .. } => Some(response),
            Self::Exception { envelope, .. } => envelope.response.as_ref(),
        }
    }

    /// Underlying fault on the exceptional path.
    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Http { .. } => None,
            Self::Exception { error, .. } => Some(error),
        }
    }
}
