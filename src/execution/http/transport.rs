//! HTTP transport abstraction.
//!
//! The pipeline never talks to the network directly. It hands the resolved
//! URL and the final middleware output to an injectable transport, which can
//! be backed by `reqwest` ([`super::ReqwestTransport`]) or by a synthetic
//! implementation in tests.

use crate::error::FetchError;
use crate::types::{FetchBody, FetchRequest, HeaderMapping, HttpMethod, RawResponse};
use crate::utils::cancel::CancelHandle;
use async_trait::async_trait;
use std::sync::Arc;

/// Transport-level request data.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub body: Option<FetchBody>,
    pub headers: Option<HeaderMapping>,
    /// Cancellation signal of the request. Transports should stop work once
    /// it fires; the pipeline also stops waiting on its own.
    pub signal: CancelHandle,
}

impl TransportRequest {
    pub fn new(request: FetchRequest, signal: CancelHandle) -> Self {
        let FetchRequest {
            method,
            body,
            headers,
        } = request;
        Self {
            method,
            body,
            headers,
            signal,
        }
    }
}

/// Custom HTTP transport.
///
/// Implementations return the buffered response for any status code; only
/// failures to obtain a response at all are errors.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, url: &str, request: TransportRequest) -> Result<RawResponse, FetchError>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    async fn send(&self, url: &str, request: TransportRequest) -> Result<RawResponse, FetchError> {
        (**self).send(url, request).await
    }
}
