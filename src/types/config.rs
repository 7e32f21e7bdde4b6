//! Client configuration.
//!
//! `FetchConfig` and its builder configure a [`crate::client::Fetch`]
//! instance.

use serde::{Deserialize, Serialize};

/// Environment variable read by [`FetchConfig::from_env`].
pub const BASE_URL_ENV: &str = "FETCHKIT_BASE_URL";

/// Fetch client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Prefixed to every non-absolute request URL. Empty by default.
    pub base_url: String,
    /// When `true`, `Fetch::delete` issues GET instead of DELETE. Only for
    /// callers that depend on that legacy behaviour.
    pub legacy_delete_as_get: bool,
}

impl FetchConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Create a new builder
    pub fn builder() -> FetchConfigBuilder {
        FetchConfigBuilder::default()
    }

    /// Read the configuration from the environment (`FETCHKIT_BASE_URL`).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config.base_url = base_url;
        }
        config
    }
}

/// Builder for `FetchConfig`
#[derive(Debug, Clone, Default)]
pub struct FetchConfigBuilder {
    base_url: Option<String>,
    legacy_delete_as_get: Option<bool>,
}

impl FetchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn legacy_delete_as_get(mut self, val: bool) -> Self {
        self.legacy_delete_as_get = Some(val);
        self
    }

    pub fn build(self) -> FetchConfig {
        FetchConfig {
            base_url: self.base_url.unwrap_or_default(),
            legacy_delete_as_get: self.legacy_delete_as_get.unwrap_or(false),
        }
    }
}
