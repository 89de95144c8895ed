//! Metrics collection.
//!
//! # Metrics
//! - `shell_route_resolutions_total` (counter): by `outcome` (matched, fallback)
//! - `shell_gateway_requests_total` (counter): by `token` (injected, caller, absent)

use crate::gateway::TokenOutcome;

pub fn record_resolution(fallback: bool) {
    let outcome = if fallback { "fallback" } else { "matched" };
    ::metrics::counter!("shell_route_resolutions_total", "outcome" => outcome).increment(1);
}

pub fn record_gateway_request(outcome: TokenOutcome) {
    ::metrics::counter!("shell_gateway_requests_total", "token" => outcome.as_str()).increment(1);
}
