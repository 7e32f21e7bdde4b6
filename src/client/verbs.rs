//! Verb shortcuts. Each one only shapes arguments for [`Fetch::request`].

use super::Fetch;
use crate::types::{FetchBody, FetchResult, HeaderMapping, HttpMethod, RequestSpec, ResponseConfig};

fn spec(
    method: HttpMethod,
    url: impl Into<String>,
    body: Option<FetchBody>,
    headers: Option<HeaderMapping>,
    response_config: Option<ResponseConfig>,
) -> RequestSpec {
    RequestSpec {
        method,
        url: url.into(),
        body,
        headers,
        response_config,
    }
}

impl Fetch {
    pub async fn get(
        &self,
        url: impl Into<String>,
        headers: Option<HeaderMapping>,
        response_config: Option<ResponseConfig>,
    ) -> FetchResult {
        self.request(spec(HttpMethod::Get, url, None, headers, response_config))
            .await
    }

    pub async fn post(
        &self,
        url: impl Into<String>,
        body: Option<FetchBody>,
        headers: Option<HeaderMapping>,
        response_config: Option<ResponseConfig>,
    ) -> FetchResult {
        self.request(spec(HttpMethod::Post, url, body, headers, response_config))
            .await
    }

    pub async fn put(
        &self,
        url: impl Into<String>,
        body: Option<FetchBody>,
        headers: Option<HeaderMapping>,
        response_config: Option<ResponseConfig>,
    ) -> FetchResult {
        self.request(spec(HttpMethod::Put, url, body, headers, response_config))
            .await
    }

    pub async fn patch(
        &self,
        url: impl Into<String>,
        body: Option<FetchBody>,
        headers: Option<HeaderMapping>,
        response_config: Option<ResponseConfig>,
    ) -> FetchResult {
        self.request(spec(HttpMethod::Patch, url, body, headers, response_config))
            .await
    }

    /// DELETE, or GET when `legacy_delete_as_get` is set.
    pub async fn delete(
        &self,
        url: impl Into<String>,
        headers: Option<HeaderMapping>,
        response_config: Option<ResponseConfig>,
    ) -> FetchResult {
        let method = if self.config.legacy_delete_as_get {
            HttpMethod::Get
        } else {
            HttpMethod::Delete
        };
        self.request(spec(method, url, None, headers, response_config))
            .await
    }
}
