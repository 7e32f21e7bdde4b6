//! Execution layer
//!
//! - `http`: the transport seam, header helpers and the bundled `reqwest` transport
//! - `middleware`: async transforms applied to outgoing requests
//! - `interceptor`: async transforms applied to response envelopes

pub mod http;
pub mod interceptor;
pub mod middleware;
