//! Bundled middlewares.

use super::FetchMiddleware;
use crate::error::FetchError;
use crate::types::{FetchRequest, HeaderMapping};
use async_trait::async_trait;

/// Header that asks ngrok to skip its browser warning page.
pub const NGROK_SKIP_BROWSER_WARNING: &str = "ngrok-skip-browser-warning";

/// Merges a fixed header set into every request. On collision the fixed
/// value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticHeaders {
    headers: HeaderMapping,
}

impl StaticHeaders {
    pub fn new<I, K, V>(headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// `ngrok-skip-browser-warning: any`
    pub fn ngrok_bypass() -> Self {
        Self::new([(NGROK_SKIP_BROWSER_WARNING, "any")])
    }

    pub fn headers(&self) -> &HeaderMapping {
        &self.headers
    }
}

#[async_trait]
impl FetchMiddleware for StaticHeaders {
    async fn handle(&self, request: FetchRequest) -> Result<FetchRequest, FetchError> {
        Ok(request.merge_headers(&self.headers))
    }

    fn name(&self) -> &str {
        "static_headers"
    }
}
