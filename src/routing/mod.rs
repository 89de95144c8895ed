//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → pattern.rs (parse segments, reject malformed patterns)
//!     → router.rs (reject unreachable duplicates)
//!     → Freeze as immutable RouteTable
//!
//! Navigation event (navigate / back / forward / pop)
//!     → navigator.rs (check mount prefix)
//!     → router.rs (route lookup)
//!     → matcher.rs (positional segment match)
//!     → Resolution: matched view or fallback
//!     → history.rs (push entry) + ViewHost (unmount old, mount new)
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)
//! - No match resolves to the fallback view, never an error

pub mod history;
pub mod matcher;
pub mod navigator;
pub mod pattern;
pub mod router;

pub use history::{History, MemoryHistory};
pub use matcher::RouteParams;
pub use navigator::{NavigationError, NavigationState, Navigator, RecordingHost, ViewEvent, ViewHost};
pub use pattern::{PatternError, RoutePattern};
pub use router::{Resolution, RouteEntry, RouteError, RouteTable, ViewId};
