//! Middleware module (request-level)
//!
//! Middlewares are async transforms applied to the outgoing [`FetchRequest`]
//! before transport dispatch. They run in registration order, one at a time,
//! and each receives the previous stage's output by value.

pub mod presets;

use crate::error::FetchError;
use crate::types::FetchRequest;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

pub use presets::StaticHeaders;

/// Outgoing request transform.
#[async_trait]
pub trait FetchMiddleware: Send + Sync {
    /// Return the request handed to the next stage, or an error to stop the
    /// pipeline before the transport is invoked.
    async fn handle(&self, request: FetchRequest) -> Result<FetchRequest, FetchError>;

    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Adapter turning an async closure into a [`FetchMiddleware`].
#[derive(Clone)]
pub struct MiddlewareFn<F> {
    f: F,
}

/// Wrap an async closure as a middleware.
///
/// ```rust,ignore
/// api.add_middleware(middleware_fn(|req: FetchRequest| async move {
///     Ok(req.with_header("x-trace", "1"))
/// }));
/// ```
pub fn middleware_fn<F, Fut>(f: F) -> MiddlewareFn<F>
where
    F: Fn(FetchRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<FetchRequest, FetchError>> + Send + 'static,
{
    MiddlewareFn { f }
}

#[async_trait]
impl<F, Fut> FetchMiddleware for MiddlewareFn<F>
where
    F: Fn(FetchRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<FetchRequest, FetchError>> + Send + 'static,
{
    async fn handle(&self, request: FetchRequest) -> Result<FetchRequest, FetchError> {
        (self.f)(request).await
    }

    fn name(&self) -> &str {
        "middleware_fn"
    }
}

/// Fold `request` through `middlewares` in order.
pub async fn apply_middlewares(
    middlewares: &[Arc<dyn FetchMiddleware>],
    request: FetchRequest,
) -> Result<FetchRequest, FetchError> {
    let mut current = request;
    for middleware in middlewares {
        tracing::trace!(target: "fetchkit::http", middleware = middleware.name(), "applying middleware");
        current = middleware.handle(current).await?;
    }
    Ok(current)
}
