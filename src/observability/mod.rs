//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing + gateway produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (resolution and token-outcome counters)
//! ```
//!
//! # Design Decisions
//! - Gateway calls carry a per-request correlation id in their span
//! - Metrics are cheap no-ops until a recorder is installed
//! - Logs go to stderr so CLI output stays machine readable

pub mod logging;
pub mod metrics;
