//! Response-side types.

use super::http::{HeaderMapping, ResponseType};
use crate::error::FetchError;
use crate::execution::http::headers::headermap_to_hashmap;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

/// Transport-level response data.
///
/// The body is fully buffered, so the decoders can be called repeatedly and
/// the response can be cloned cheaply into outcomes.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    /// Final URL as reported by the transport.
    pub url: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, url: impl Into<String>, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            url: url.into(),
            headers,
            body: body.into(),
        }
    }

    /// Response headers with lowercase names; non UTF-8 values are skipped.
    pub fn header_mapping(&self) -> HeaderMapping {
        headermap_to_hashmap(&self.headers)
    }

    /// Body as UTF-8 text. Invalid sequences become U+FFFD.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body deserialized from JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| FetchError::decode(ResponseType::Json, e.to_string()))
    }

    /// Raw body bytes.
    pub fn blob(&self) -> Bytes {
        self.body.clone()
    }

    /// Decode the body with the given selector.
    pub fn decode(&self, response_type: ResponseType) -> Result<ResponseData, FetchError> {
        match response_type {
            ResponseType::Text => Ok(ResponseData::Text(self.text())),
            ResponseType::Json => self.json().map(ResponseData::Json),
            ResponseType::Blob => Ok(ResponseData::Blob(self.blob())),
        }
    }
}

/// A decoded response payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    Text(String),
    Json(serde_json::Value),
    Blob(Bytes),
}

impl ResponseData {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Blob(b) => Some(b),
            _ => None,
        }
    }

    /// Deserialize a JSON payload into `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        match self {
            Self::Json(v) => serde_json::from_value(v.clone())
                .map_err(|e| FetchError::decode(ResponseType::Json, e.to_string())),
            Self::Text(s) => serde_json::from_str(s)
                .map_err(|e| FetchError::decode(ResponseType::Json, e.to_string())),
            Self::Blob(b) => serde_json::from_slice(b)
                .map_err(|e| FetchError::decode(ResponseType::Json, e.to_string())),
        }
    }
}

/// The normalized response envelope threaded through the interceptor chain.
#[derive(Debug, Clone, Default)]
pub struct FetchResponse {
    pub data: Option<ResponseData>,
    /// Mirrors the 2xx classification of the status code.
    pub is_success: bool,
    pub response: Option<RawResponse>,
}

impl FetchResponse {
    /// Envelope for a completed transport call.
    pub fn new(data: ResponseData, is_success: bool) -> Self {
        Self {
            data: Some(data),
            is_success,
            response: None,
        }
    }

    /// Envelope for the exceptional path. `response` is `None` when the
    /// transport never completed.
    pub fn failure(response: Option<RawResponse>) -> Self {
        Self {
            data: None,
            is_success: false,
            response,
        }
    }
}
