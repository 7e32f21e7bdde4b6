//! Response interceptor interfaces
//!
//! Interceptors are async transforms applied to the normalized
//! [`FetchResponse`] envelope after the transport completed and the status
//! was classified. They also run once over the failure envelope when the
//! pipeline takes its exceptional path.

use crate::error::FetchError;
use crate::types::{FetchResponse, ResponseData};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// Response envelope transform.
#[async_trait]
pub trait FetchInterceptor: Send + Sync {
    /// Return the envelope handed to the next stage.
    async fn intercept(&self, response: FetchResponse) -> Result<FetchResponse, FetchError>;

    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Adapter turning an async closure into a [`FetchInterceptor`].
#[derive(Clone)]
pub struct InterceptorFn<F> {
    f: F,
}

/// Wrap an async closure as an interceptor.
pub fn interceptor_fn<F, Fut>(f: F) -> InterceptorFn<F>
where
    F: Fn(FetchResponse) -> Fut + Send + Sync,
    Fut: Future<Output = Result<FetchResponse, FetchError>> + Send + 'static,
{
    InterceptorFn { f }
}

#[async_trait]
impl<F, Fut> FetchInterceptor for InterceptorFn<F>
where
    F: Fn(FetchResponse) -> Fut + Send + Sync,
    Fut: Future<Output = Result<FetchResponse, FetchError>> + Send + 'static,
{
    async fn intercept(&self, response: FetchResponse) -> Result<FetchResponse, FetchError> {
        (self.f)(response).await
    }

    fn name(&self) -> &str {
        "interceptor_fn"
    }
}

/// Fold `response` through `interceptors` in order.
pub async fn apply_interceptors(
    interceptors: &[Arc<dyn FetchInterceptor>],
    response: FetchResponse,
) -> Result<FetchResponse, FetchError> {
    let mut current = response;
    for interceptor in interceptors {
        tracing::trace!(target: "fetchkit::http", interceptor = interceptor.name(), "applying interceptor");
        current = interceptor.intercept(current).await?;
    }
    Ok(current)
}

/// A simple logging interceptor backed by `tracing` (no payload contents).
#[derive(Clone, Debug, Default)]
pub struct LoggingInterceptor;

#[async_trait]
impl FetchInterceptor for LoggingInterceptor {
    async fn intercept(&self, response: FetchResponse) -> Result<FetchResponse, FetchError> {
        let status = response.response.as_ref().map(|r| r.status);
        let kind = match &response.data {
            Some(ResponseData::Text(_)) => "text",
            Some(ResponseData::Json(_)) => "json",
            Some(ResponseData::Blob(_)) => "blob",
            None => "none",
        };
        if response.is_success {
            tracing::debug!(target: "fetchkit::http", data = kind, ?status, "response received");
        } else {
            tracing::debug!(target: "fetchkit::http", data = kind, ?status, "response failed");
        }
        Ok(response)
    }

    fn name(&self) -> &str {
        "logging"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[tokio::test]
    async fn chain_replaces_envelope_in_order() {
        let wrap = |suffix: &'static str| -> Arc<dyn FetchInterceptor> {
            Arc::new(interceptor_fn(move |mut res: FetchResponse| async move {
                let text = res
                    .data
                    .as_ref()
                    .and_then(|d| d.as_text())
                    .unwrap_or_default()
                    .to_string();
                res.data = Some(ResponseData::Text(format!("{text}{suffix}")));
                Ok::<_, FetchError>(res)
            }))
        };
        let chain = vec![wrap("1"), wrap("2")];
        let out = apply_interceptors(&chain, FetchResponse::new(ResponseData::Text("0".into()), true))
            .await
            .unwrap();
        assert_eq!(out.data.as_ref().and_then(|d| d.as_text()), Some("012"));
        assert!(out.is_success);
    }

    #[tokio::test]
    async fn error_stops_the_chain() {
        let fail: Arc<dyn FetchInterceptor> = Arc::new(interceptor_fn(|_res: FetchResponse| async {
            Err::<FetchResponse, _>(FetchError::interceptor("bad envelope"))
        }));
        let err = apply_interceptors(&[fail], FetchResponse::failure(None))
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::Interceptor("bad envelope".into()));
    }

    #[tokio::test]
    #[traced_test]
    async fn logging_interceptor_passes_through_and_logs() {
        let envelope = FetchResponse::new(ResponseData::Json(serde_json::json!({})), true);
        let out = LoggingInterceptor.intercept(envelope).await.unwrap();
        assert!(out.is_success);
        assert!(logs_contain("response received"));

        LoggingInterceptor
            .intercept(FetchResponse::failure(None))
            .await
            .unwrap();
        assert!(logs_contain("response failed"));
    }
}
