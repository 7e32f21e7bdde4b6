//! HTTP Headers Utility
//!
//! Conversions between the pipeline's [`HeaderMapping`] and `reqwest`
//! header maps.

use crate::error::FetchError;
use crate::types::HeaderMapping;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Build a `HeaderMap` from a mapping, rejecting invalid names or values.
pub fn build_header_map(headers: &HeaderMapping) -> Result<HeaderMap, FetchError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (key, value) in headers {
        let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
            FetchError::InvalidHeader(format!("Invalid header name '{key}': {e}"))
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            FetchError::InvalidHeader(format!("Invalid header value for '{key}': {e}"))
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

/// Convert reqwest HeaderMap to a mapping
///
/// Invalid UTF-8 header values are filtered out.
pub fn headermap_to_hashmap(headers: &HeaderMap) -> HeaderMapping {
    headers
        .iter()
        .filter_map(|(k, v)| {
            v.to_str()
                .ok()
                .map(|v_str| (k.as_str().to_string(), v_str.to_string()))
        })
        .collect()
}
