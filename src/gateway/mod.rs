//! Outbound request gateway.
//!
//! # Data Flow
//! ```text
//! view code
//!     → client.rs (request / get / post / send)
//!     → merge default headers under caller headers
//!     → token.rs (fresh lookup: none / static / live document)
//!     → inject.rs (set token header unless caller set it)
//!     → transport.rs (reqwest or any Transport)
//!     → Result<Response, transport error> back to the caller, untouched
//! ```
//!
//! `layer.rs` offers the same rule as tower middleware.

pub mod client;
pub mod inject;
pub mod layer;
pub mod request;
pub mod token;
pub mod transport;

pub use client::RequestGateway;
pub use inject::{inject_token, TokenOutcome};
pub use layer::{CsrfLayer, CsrfService};
pub use request::OutgoingRequest;
pub use token::{DocumentToken, NoToken, StaticToken, TokenProvider};
pub use transport::{ReqwestTransport, Transport, TransportBuildError};

/// Token header used when none is configured.
pub const DEFAULT_TOKEN_HEADER: &str = "x-csrftoken";
