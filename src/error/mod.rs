//! Error Handling Module
//!
//! Pipeline faults are represented by [`FetchError`]. The caller-facing
//! outcome of a failed request is [`crate::types::FetchFailure`], which wraps
//! a `FetchError` on the exceptional path.
//!
//! # Example
//!
//! ```rust,ignore
//! use fetchkit::error::FetchError;
//!
//! let error = FetchError::Aborted;
//! assert!(error.is_aborted());
//! ```

mod conversions;
pub mod types;

pub use types::*;
