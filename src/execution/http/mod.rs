//! HTTP Utilities
//!
//! This module contains HTTP-related utilities:
//! - Transport abstraction
//! - Header conversion
//! - The default `reqwest` transport

pub mod headers;
pub mod reqwest_transport;
pub mod transport;

pub use headers::*;
pub use reqwest_transport::ReqwestTransport;
pub use transport::*;
