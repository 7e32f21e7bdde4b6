//! Request-side types.

use super::http::{HeaderMapping, HttpMethod, ResponseConfig};
use crate::error::FetchError;
use bytes::Bytes;
use serde::Serialize;

/// Request body payload.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchBody {
    Text(String),
    Json(serde_json::Value),
    Bytes(Bytes),
}

impl FetchBody {
    /// Serialize any value into a JSON body.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, FetchError> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Wire bytes for this body.
    pub fn to_bytes(&self) -> Result<Bytes, FetchError> {
        match self {
            Self::Text(s) => Ok(Bytes::from(s.clone())),
            Self::Json(v) => Ok(Bytes::from(serde_json::to_vec(v)?)),
            Self::Bytes(b) => Ok(b.clone()),
        }
    }
}

impl From<&str> for FetchBody {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FetchBody {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<serde_json::Value> for FetchBody {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<Bytes> for FetchBody {
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

impl From<Vec<u8>> for FetchBody {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(value))
    }
}

/// What the caller asks for. Consumed once by [`crate::client::Fetch::request`].
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    /// Absolute URL or a path relative to the configured base URL.
    pub url: String,
    /// Only sent for write methods.
    pub body: Option<FetchBody>,
    pub headers: Option<HeaderMapping>,
    pub response_config: Option<ResponseConfig>,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            headers: None,
            response_config: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<FetchBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_headers(mut self, headers: HeaderMapping) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HeaderMapping::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_response_config(mut self, response_config: ResponseConfig) -> Self {
        self.response_config = Some(response_config);
        self
    }
}

/// The request object threaded through the middleware chain.
///
/// Middlewares take it by value and hand back a replacement, so each stage
/// may merge, overwrite, or drop any field.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub method: HttpMethod,
    pub body: Option<FetchBody>,
    pub headers: Option<HeaderMapping>,
}

impl FetchRequest {
    /// Initial request built from a [`RequestSpec`]'s fields. The body is dropped unless
    /// `method` is a write method.
    pub fn new(method: HttpMethod, body: Option<FetchBody>, headers: Option<HeaderMapping>) -> Self {
        Self {
            method,
            body: if method.is_write() { body } else { None },
            headers,
        }
    }

    /// Merge `extra` into the current headers; `extra` wins on collision.
    ///
    /// Names compare case-insensitively, so `Authorization` is replaced by
    /// `authorization` instead of both reaching the transport.
    pub fn merge_headers<'a, I>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let headers = self.headers.get_or_insert_with(HeaderMapping::new);
        for (k, v) in extra {
            insert_header(headers, k.clone(), v.clone());
        }
        self
    }

    /// Set one header, replacing any case-variant of `name`.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        insert_header(
            self.headers.get_or_insert_with(HeaderMapping::new),
            name.into(),
            value.into(),
        );
        self
    }

    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .as_ref()?
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn insert_header(headers: &mut HeaderMapping, name: String, value: String) {
    headers.retain(|k, _| !k.eq_ignore_ascii_case(&name));
    headers.insert(name, value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_is_only_kept_for_write_methods() {
        for method in [HttpMethod::Get, HttpMethod::Delete] {
            let req = FetchRequest::new(method, Some("payload".into()), None);
            assert!(req.body.is_none(), "{method} must not carry a body");
        }
        for method in [HttpMethod::Post, HttpMethod::Put, HttpMethod::Patch] {
            let req = FetchRequest::new(method, Some("payload".into()), None);
            assert_eq!(req.body, Some(FetchBody::Text("payload".into())));
        }
    }

    #[test]
    fn merge_headers_overwrites_on_collision() {
        let mut base = HeaderMapping::new();
        base.insert("x-a".into(), "1".into());
        base.insert("x-b".into(), "1".into());
        let mut extra = HeaderMapping::new();
        extra.insert("x-b".into(), "2".into());

        let req = FetchRequest::new(HttpMethod::Get, None, Some(base)).merge_headers(&extra);
        assert_eq!(req.header("x-a"), Some("1"));
        assert_eq!(req.header("x-b"), Some("2"));
    }

    #[test]
    fn merge_headers_replaces_case_variants() {
        let mut base = HeaderMapping::new();
        base.insert("Authorization".into(), "old".into());
        let mut extra = HeaderMapping::new();
        extra.insert("authorization".into(), "new".into());

        let req = FetchRequest::new(HttpMethod::Get, None, Some(base))
            .merge_headers(&extra)
            .with_header("X-Trace", "1")
            .with_header("x-trace", "2");
        let headers = req.headers.as_ref().unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("authorization").map(String::as_str), Some("new"));
        assert_eq!(req.header("AUTHORIZATION"), Some("new"));
        assert_eq!(req.header("x-trace"), Some("2"));
    }

    #[test]
    fn json_body_serializes_to_bytes() {
        let body = FetchBody::json(&serde_json::json!({"a": 1})).unwrap();
        assert_eq!(body.to_bytes().unwrap(), Bytes::from_static(b"{\"a\":1}"));
    }
}
