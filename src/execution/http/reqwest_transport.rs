//! `reqwest`-backed transport.

use super::headers::build_header_map;
use super::transport::{HttpTransport, TransportRequest};
use crate::error::FetchError;
use crate::types::{FetchBody, RawResponse};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

/// Default transport. Reads the whole body before returning.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a caller-configured client (timeouts, proxies, TLS, ...).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, url: &str, request: TransportRequest) -> Result<RawResponse, FetchError> {
        let TransportRequest {
            method,
            body,
            headers,
            signal,
        } = request;

        let mut header_map = match &headers {
            Some(h) => build_header_map(h)?,
            None => HeaderMap::new(),
        };

        let mut rb = self.client.request(method.into(), url);
        if let Some(body) = body {
            if matches!(body, FetchBody::Json(_)) && !header_map.contains_key(CONTENT_TYPE) {
                header_map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            }
            rb = rb.body(body.to_bytes()?);
        }
        rb = rb.headers(header_map);

        // Dropping the in-flight future on cancel closes the connection.
        signal
            .guard(async {
                let resp = rb.send().await?;
                let status = resp.status().as_u16();
                let final_url = resp.url().to_string();
                let response_headers = resp.headers().clone();
                let bytes = resp.bytes().await?;
                Ok::<_, FetchError>(RawResponse::new(status, final_url, response_headers, bytes))
            })
            .await
    }
}
