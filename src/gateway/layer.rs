//! Tower middleware applying the token rule.
//!
//! For client stacks built from tower services over `http::Request<B>`
//! (e.g. a hyper client). Same rule as [`RequestGateway`]: fresh lookup per
//! call, caller-set header wins, everything else untouched.
//!
//! [`RequestGateway`]: crate::gateway::RequestGateway

use std::task::{Context, Poll};

use hyper::header::HeaderName;
use hyper::Request;
use tower::{Layer, Service};

use crate::gateway::inject::inject_token;
use crate::gateway::token::TokenProvider;
use crate::gateway::DEFAULT_TOKEN_HEADER;
use crate::observability::metrics;

/// Layer that wraps services with [`CsrfService`].
#[derive(Debug, Clone)]
pub struct CsrfLayer<P> {
    tokens: P,
    header: HeaderName,
}

impl<P> CsrfLayer<P> {
    pub fn new(tokens: P) -> Self {
        Self {
            tokens,
            header: HeaderName::from_static(DEFAULT_TOKEN_HEADER),
        }
    }

    pub fn with_header(mut self, header: HeaderName) -> Self {
        self.header = header;
        self
    }
}

impl<S, P: Clone> Layer<S> for CsrfLayer<P> {
    type Service = CsrfService<S, P>;

    fn layer(&self, inner: S) -> Self::Service {
        CsrfService {
            inner,
            tokens: self.tokens.clone(),
            header: self.header.clone(),
        }
    }
}

/// Service injecting the token before calling the inner service.
#[derive(Debug, Clone)]
pub struct CsrfService<S, P> {
    inner: S,
    tokens: P,
    header: HeaderName,
}

impl<S, P, B> Service<Request<B>> for CsrfService<S, P>
where
    S: Service<Request<B>>,
    P: TokenProvider,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let discovered = self.tokens.token();
        let outcome = inject_token(req.headers_mut(), &self.header, discovered.as_deref());
        metrics::record_gateway_request(outcome);
        tracing::debug!(uri = %req.uri(), token = outcome.as_str(), "Forwarding request");
        self.inner.call(req)
    }
}
