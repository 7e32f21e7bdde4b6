//! Utility modules for fetchkit
//!
//! URL resolution, status classification and cancellation primitives used by
//! the request pipeline.

pub mod cancel;
pub mod url;

pub use cancel::CancelHandle;
pub use url::*;
