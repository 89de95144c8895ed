//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the shell.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::validation::ValidationError;

/// Root configuration for the application shell.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ShellConfig {
    /// Route table and history settings.
    pub router: RouterConfig,

    /// Request gateway settings.
    pub gateway: GatewayConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Router configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Mount prefix every navigable path must start with.
    pub base: String,

    /// View rendered when no route matches.
    pub fallback_view: String,

    /// Ordered route table. First match wins.
    pub routes: Vec<RouteConfig>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base: "/".to_string(),
            fallback_view: "not-found".to_string(),
            routes: vec![
                RouteConfig::new("/", "home"),
                RouteConfig::new("/datasets/list", "dataset-list"),
                RouteConfig::new("/datasets/create", "dataset-create"),
                RouteConfig::new("/datasets/run", "dataset-run"),
                RouteConfig::new("/datasets/view/:id", "dataset-view").with_props(),
            ],
        }
    }
}

/// A single route table entry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Path pattern, e.g. `/datasets/view/:id`.
    pub path: String,

    /// View identifier rendered for this route.
    pub view: String,

    /// Forward extracted path parameters to the view.
    #[serde(default)]
    pub props: bool,
}

impl RouteConfig {
    pub fn new(path: impl Into<String>, view: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            view: view.into(),
            props: false,
        }
    }

    pub fn with_props(mut self) -> Self {
        self.props = true;
        self
    }
}

/// Request gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Origin relative request URLs are resolved against.
    pub base_url: String,

    /// Header carrying the anti-forgery token.
    pub token_header: String,

    /// Name of the document field holding the token.
    pub token_field: String,

    /// Headers sent with every request unless the caller sets them.
    pub default_headers: BTreeMap<String, String>,

    /// Transport-level request timeout. `None` leaves the transport default.
    pub timeout_secs: Option<u64>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        let mut default_headers = BTreeMap::new();
        default_headers.insert("X-Requested-With".to_string(), "XMLHttpRequest".to_string());

        Self {
            base_url: "http://localhost:8000/".to_string(),
            token_header: "X-CSRFToken".to_string(),
            token_field: "csrfmiddlewaretoken".to_string(),
            default_headers,
            timeout_secs: None,
        }
    }
}

impl GatewayConfig {
    /// Parsed token header name.
    pub fn token_header_name(&self) -> Result<HeaderName, ValidationError> {
        HeaderName::from_bytes(self.token_header.as_bytes())
            .map_err(|_| ValidationError::InvalidTokenHeader(self.token_header.clone()))
    }

    /// Default headers as a header map.
    pub fn default_header_map(&self) -> Result<HeaderMap, ValidationError> {
        let mut headers = HeaderMap::with_capacity(self.default_headers.len());
        for (name, value) in &self.default_headers {
            let invalid = || ValidationError::InvalidDefaultHeader { name: name.clone() };
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    pub fn parsed_base_url(&self) -> Result<Url, ValidationError> {
        Url::parse(&self.base_url).map_err(|e| ValidationError::InvalidBaseUrl {
            value: self.base_url.clone(),
            reason: e.to_string(),
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
