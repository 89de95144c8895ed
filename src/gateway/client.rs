//! The request gateway.
//!
//! # Responsibilities
//! - Offer the generic client call shape (method, url, headers, body)
//! - Merge configured default headers under the caller's headers
//! - Look the token up fresh and apply the injection rule
//! - Hand the request to the transport and return its result untouched
//!
//! # Design Decisions
//! - No state survives a request; the gateway is shareable via Arc
//! - No retries, no wrapping: callers see the transport's own errors
//! - Correlation IDs go into the tracing span only, never onto the wire

use reqwest::header::{HeaderMap, HeaderName};
use reqwest::Method;
use tracing::Instrument;
use uuid::Uuid;

use crate::gateway::inject::{inject_token, TokenOutcome};
use crate::gateway::request::OutgoingRequest;
use crate::gateway::token::TokenProvider;
use crate::gateway::transport::Transport;
use crate::gateway::DEFAULT_TOKEN_HEADER;
use crate::observability::metrics;

/// HTTP client front that attaches the anti-forgery token.
#[derive(Debug, Clone)]
pub struct RequestGateway<T, P> {
    transport: T,
    tokens: P,
    token_header: HeaderName,
    default_headers: HeaderMap,
}

impl<T: Transport, P: TokenProvider> RequestGateway<T, P> {
    pub fn new(transport: T, tokens: P) -> Self {
        Self {
            transport,
            tokens,
            token_header: HeaderName::from_static(DEFAULT_TOKEN_HEADER),
            default_headers: HeaderMap::new(),
        }
    }

    pub fn with_token_header(mut self, name: HeaderName) -> Self {
        self.token_header = name;
        self
    }

    pub fn with_default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }

    /// Issue a request. The result is exactly what the transport returned.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        headers: Option<HeaderMap>,
        body: Option<Vec<u8>>,
    ) -> Result<T::Response, T::Error> {
        let mut request = OutgoingRequest::new(method, url);
        if let Some(headers) = headers {
            request.headers = headers;
        }
        request.body = body;
        self.send(request).await
    }

    pub async fn get(&self, url: &str) -> Result<T::Response, T::Error> {
        self.request(Method::GET, url, None, None).await
    }

    pub async fn delete(&self, url: &str) -> Result<T::Response, T::Error> {
        self.request(Method::DELETE, url, None, None).await
    }

    pub async fn post(&self, url: &str, body: impl Into<Vec<u8>>) -> Result<T::Response, T::Error> {
        self.request(Method::POST, url, None, Some(body.into())).await
    }

    pub async fn put(&self, url: &str, body: impl Into<Vec<u8>>) -> Result<T::Response, T::Error> {
        self.request(Method::PUT, url, None, Some(body.into())).await
    }

    /// Send a fully built descriptor.
    pub async fn send(&self, mut request: OutgoingRequest) -> Result<T::Response, T::Error> {
        let request_id = Uuid::new_v4();
        let span = tracing::debug_span!(
            "gateway_request",
            %request_id,
            method = %request.method,
            url = %request.url
        );

        async move {
            let outcome = self.prepare(&mut request);
            tracing::debug!(token = outcome.as_str(), "Forwarding request");

            let result = self.transport.send(request).await;
            if let Err(e) = &result {
                tracing::debug!(error = %e, "Transport failed");
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Apply default headers and the token rule to `request` in place.
    pub fn prepare(&self, request: &mut OutgoingRequest) -> TokenOutcome {
        for name in self.default_headers.keys() {
            if !request.headers.contains_key(name) {
                for value in self.default_headers.get_all(name) {
                    request.headers.append(name.clone(), value.clone());
                }
            }
        }

        let discovered = self.tokens.token();
        let outcome = inject_token(&mut request.headers, &self.token_header, discovered.as_deref());
        metrics::record_gateway_request(outcome);
        outcome
    }

    pub fn token_header(&self) -> &HeaderName {
        &self.token_header
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn tokens(&self) -> &P {
        &self.tokens
    }
}
