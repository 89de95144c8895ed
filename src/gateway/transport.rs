//! HTTP transports.
//!
//! # Responsibilities
//! - Define the seam between the gateway and the wire
//! - Provide the reqwest-backed production transport
//!
//! # Design Decisions
//! - The transport owns its error type; the gateway surfaces it unwrapped
//! - Non-2xx statuses are failures, matching the front end's HTTP client
//! - Timeouts are the transport's business; the gateway only hands them over

use std::future::Future;

use url::Url;

use crate::config::GatewayConfig;
use crate::config::ValidationError;
use crate::gateway::request::OutgoingRequest;

/// Something that can put an [`OutgoingRequest`] on the wire.
pub trait Transport: Send + Sync {
    type Response: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    fn send(
        &self,
        request: OutgoingRequest,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send;
}

/// Transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: Option<Url>,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: None,
        }
    }

    /// Resolve relative request URLs against `base_url`.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Build the client from gateway settings.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, TransportBuildError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self::new(client).with_base_url(config.parsed_base_url()?))
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Target URL for `url`. Unresolvable input is passed on for the client
    /// to reject.
    pub fn resolve(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) => base
                .join(url)
                .map(String::from)
                .unwrap_or_else(|_| url.to_string()),
            None => url.to_string(),
        }
    }
}

/// Errors building a [`ReqwestTransport`] from configuration.
#[derive(Debug, thiserror::Error)]
pub enum TransportBuildError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error(transparent)]
    Config(#[from] ValidationError),
}

impl Transport for ReqwestTransport {
    type Response = reqwest::Response;
    type Error = reqwest::Error;

    async fn send(&self, request: OutgoingRequest) -> Result<Self::Response, Self::Error> {
        let mut builder = self
            .client
            .request(request.method, self.resolve(&request.url))
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        builder.send().await?.error_for_status()
    }
}
