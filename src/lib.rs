//! fetchkit
//!
//! A thin HTTP request pipeline: base-URL resolution, ordered async
//! middlewares for outgoing requests, ordered async interceptors for incoming
//! responses, cancellation, and response-type coercion on top of a pluggable
//! transport.
//!
//! ```rust,ignore
//! use fetchkit::prelude::*;
//!
//! let mut api = Fetch::new(FetchConfig::builder().base_url("https://api.example.com").build());
//! api.set_headers([("authorization", "Bearer token")]);
//! api.add_interceptor(LoggingInterceptor);
//!
//! match api.get("/users", None, None).await {
//!     Ok(ok) => println!("{:?}", ok.envelope.data),
//!     Err(failure) if failure.is_aborted() => println!("cancelled"),
//!     Err(failure) => println!("failed: {failure}"),
//! }
//! ```
#![deny(unsafe_code)]

pub mod client;
pub mod error;
pub mod execution;
#[cfg(feature = "telemetry")]
pub mod telemetry;
pub mod types;
pub mod utils;

pub use client::Fetch;
pub use error::FetchError;
pub use types::{FetchConfig, FetchFailure, FetchResult, FetchSuccess};

/// Commonly used items.
pub mod prelude {
    pub use crate::client::Fetch;
    pub use crate::error::FetchError;
    pub use crate::execution::http::transport::{HttpTransport, TransportRequest};
    pub use crate::execution::interceptor::{
        FetchInterceptor, LoggingInterceptor, interceptor_fn,
    };
    pub use crate::execution::middleware::{FetchMiddleware, middleware_fn};
    pub use crate::types::{
        FetchBody, FetchConfig, FetchFailure, FetchRequest, FetchResponse, FetchResult,
        FetchSuccess, HeaderMapping, HttpMethod, RawResponse, RequestSpec, ResponseConfig,
        ResponseData, ResponseType,
    };
    pub use crate::utils::cancel::CancelHandle;
}
