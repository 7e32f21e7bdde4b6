//! Request orchestrator
//!
//! [`Fetch`] owns the middleware and interceptor registries and drives every
//! request through the pipeline:
//!
//! ```text
//! RequestSpec
//!     → format_url (base URL resolution)
//!     → FetchRequest (body only for write methods)
//!     → middlewares (sequential fold)
//!     → HttpTransport::send (raced against the cancel handle)
//!     → decode (text | json | blob)
//!     → is_success_http_code
//!     → interceptors (sequential fold)
//!     → FetchSuccess | FetchFailure::Http
//!
//! any fault → interceptors over the failure envelope → FetchFailure::Exception
//! ```

mod verbs;

#[cfg(test)]
mod tests;

use crate::error::FetchError;
use crate::execution::http::{HttpTransport, ReqwestTransport, TransportRequest};
use crate::execution::interceptor::{FetchInterceptor, apply_interceptors};
use crate::execution::middleware::{FetchMiddleware, StaticHeaders, apply_middlewares};
use crate::types::{
    FetchConfig, FetchFailure, FetchRequest, FetchResponse, FetchResult, FetchSuccess,
    RawResponse, RequestSpec,
};
use crate::utils::cancel::CancelHandle;
use crate::utils::url::{format_url, is_success_http_code};
use std::fmt;
use std::sync::Arc;
use tracing::Instrument;

/// Generate a unique request id for log correlation.
pub fn generate_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// HTTP request pipeline.
///
/// Registration takes `&mut self`; requests take `&self`, so a shared
/// instance can serve concurrent requests while its registries stay fixed.
pub struct Fetch {
    config: FetchConfig,
    transport: Arc<dyn HttpTransport>,
    middlewares: Vec<Arc<dyn FetchMiddleware>>,
    interceptors: Vec<Arc<dyn FetchInterceptor>>,
}

/// Transport completed and the chains ran.
enum Settled {
    Success {
        envelope: FetchResponse,
        response: RawResponse,
    },
    Http {
        envelope: FetchResponse,
        response: RawResponse,
    },
}

/// A fault plus the raw response, when the transport got that far.
struct Fault {
    error: FetchError,
    response: Option<RawResponse>,
}

impl From<FetchError> for Fault {
    fn from(error: FetchError) -> Self {
        Self {
            error,
            response: None,
        }
    }
}

impl Fault {
    fn with_response(error: FetchError, response: &RawResponse) -> Self {
        Self {
            error,
            response: Some(response.clone()),
        }
    }
}

impl Fetch {
    /// Create a client backed by the default `reqwest` transport.
    pub fn new(config: FetchConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }

    /// Create a client backed by a custom transport.
    pub fn with_transport(config: FetchConfig, transport: impl HttpTransport + 'static) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
            middlewares: Vec::new(),
            interceptors: Vec::new(),
        }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn middleware_count(&self) -> usize {
        self.middlewares.len()
    }

    pub fn interceptor_count(&self) -> usize {
        self.interceptors.len()
    }

    /// Append a middleware. Duplicates are allowed.
    pub fn add_middleware(&mut self, middleware: impl FetchMiddleware + 'static) -> &mut Self {
        self.middlewares.push(Arc::new(middleware));
        self
    }

    /// Append an interceptor. Duplicates are allowed.
    pub fn add_interceptor(&mut self, interceptor: impl FetchInterceptor + 'static) -> &mut Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn clear_middlewares(&mut self) -> &mut Self {
        self.middlewares.clear();
        self
    }

    pub fn clear_interceptors(&mut self) -> &mut Self {
        self.interceptors.clear();
        self
    }

    /// Append a middleware merging `headers` into every subsequent request.
    pub fn set_headers<I, K, V>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.add_middleware(StaticHeaders::new(headers))
    }

    /// Append a middleware adding `ngrok-skip-browser-warning: any`.
    pub fn bypass_ngrok_security(&mut self) -> &mut Self {
        self.add_middleware(StaticHeaders::ngrok_bypass())
    }

    /// Issue a request with a fresh cancel handle.
    pub async fn request(&self, spec: RequestSpec) -> FetchResult {
        self.request_with_cancel(spec, CancelHandle::new()).await
    }

    /// Issue a request tied to a caller-held cancel handle, so the caller can
    /// abort it before it settles.
    pub async fn request_with_cancel(&self, spec: RequestSpec, abort: CancelHandle) -> FetchResult {
        let span = tracing::debug_span!(
            target: "fetchkit::http",
            "fetch",
            request_id = %generate_request_id(),
            method = %spec.method,
        );

        async move {
            match self.run(spec, &abort).await {
                Ok(Settled::Success { envelope, response }) => Ok(FetchSuccess {
                    envelope,
                    abort,
                    response,
                }),
                Ok(Settled::Http { envelope, response }) => Err(FetchFailure::Http {
                    envelope,
                    status: response.status,
                    response,
                }),
                Err(fault) => Err(self.fail(fault).await),
            }
        }
        .instrument(span)
        .await
    }

    async fn run(&self, spec: RequestSpec, abort: &CancelHandle) -> Result<Settled, Fault> {
        let RequestSpec {
            method,
            url,
            body,
            headers,
            response_config,
        } = spec;

        let url = format_url(&self.config.base_url, &url);
        let response_type = response_config.unwrap_or_default().response_type;

        let request = FetchRequest::new(method, body, headers);
        let request = apply_middlewares(&self.middlewares, request).await?;

        tracing::debug!(target: "fetchkit::http", %url, method = %request.method, "sending request");
        let transport_request = TransportRequest::new(request, abort.clone());
        let response = abort
            .guard(self.transport.send(&url, transport_request))
            .await?;

        let data = response
            .decode(response_type)
            .map_err(|e| Fault::with_response(e, &response))?;

        let is_success = is_success_http_code(response.status);
        tracing::debug!(target: "fetchkit::http", status = response.status, is_success, "response received");

        let mut envelope = apply_interceptors(&self.interceptors, FetchResponse::new(data, is_success))
            .await
            .map_err(|e| Fault::with_response(e, &response))?;
        // The outcome variant is decided by the status, never by interceptors.
        envelope.is_success = is_success;

        if is_success {
            Ok(Settled::Success { envelope, response })
        } else {
            Ok(Settled::Http { envelope, response })
        }
    }

    async fn fail(&self, fault: Fault) -> FetchFailure {
        let Fault { error, response } = fault;
        let is_aborted = error.is_aborted();
        if is_aborted {
            tracing::debug!(target: "fetchkit::http", "request aborted");
        } else {
            tracing::warn!(target: "fetchkit::http", err = %error, "request error");
        }

        let envelope =
            match apply_interceptors(&self.interceptors, FetchResponse::failure(response.clone()))
                .await
            {
                Ok(mut envelope) => {
                    envelope.is_success = false;
                    envelope
                }
                Err(e) => {
                    tracing::warn!(target: "fetchkit::http", err = %e, "interceptor failed on error path");
                    FetchResponse::failure(response)
                }
            };

        FetchFailure::Exception {
            envelope,
            is_aborted,
            error,
        }
    }
}

impl Default for Fetch {
    fn default() -> Self {
        Self::new(FetchConfig::default())
    }
}

impl fmt::Debug for Fetch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetch")
            .field("config", &self.config)
            .field("middlewares", &self.middlewares.len())
            .field("interceptors", &self.interceptors.len())
            .finish_non_exhaustive()
    }
}
