//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Compile routes → Build transport + gateway
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Nothing is served until the route table compiled

pub mod startup;

pub use startup::{Shell, ShellGateway, StartupError};
