//! Cancellation utilities
//!
//! Provides the per-request cancellation handle handed to transports and
//! exposed to callers.

use crate::error::FetchError;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// A handle that can be used to request cancellation.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    /// Create a new cancel handle.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Request cancellation. A request still waiting on its transport call
    /// settles with [`FetchError::Aborted`]; once settled this is a no-op.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A future that resolves when cancellation is requested.
    pub fn cancelled(&self) -> tokio_util::sync::WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }

    /// The underlying token, for transports that integrate with `tokio_util`.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Drive `future` unless cancellation wins first.
    ///
    /// A handle that is already cancelled never polls `future`.
    pub async fn guard<F, T>(&self, future: F) -> Result<T, FetchError>
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(FetchError::Aborted),
            res = future => res,
        }
    }
}
