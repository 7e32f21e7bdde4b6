//! Core types shared across the pipeline.
//!
//! - `http`: methods, response selectors and header mappings
//! - `request`: the caller's [`RequestSpec`] and the middleware-facing [`FetchRequest`]
//! - `response`: the raw transport response and the interceptor-facing envelope
//! - `outcome`: the typed success/failure result of a request
//! - `config`: client configuration

pub mod config;
pub mod http;
pub mod outcome;
pub mod request;
pub mod response;

pub use config::*;
pub use http::*;
pub use outcome::*;
pub use request::*;
pub use response::*;
