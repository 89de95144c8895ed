//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes in declaration order
//! - Resolve a path to exactly one view
//! - Fall back to the designated view when nothing matches
//!
//! # Design Decisions
//! - Immutable after construction (shareable via Arc without locks)
//! - O(n) linear scan, first full match wins
//! - A miss is a normal outcome, never an error

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::schema::{RouteConfig, RouterConfig};
use crate::observability::metrics;
use crate::routing::matcher::{split_path, Matcher, RouteParams};
use crate::routing::pattern::{PatternError, RoutePattern};

/// Identifier of a renderable view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(String);

impl ViewId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Route table construction errors. All of them are fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("route {index}: {source}")]
    Pattern {
        index: usize,
        #[source]
        source: PatternError,
    },

    #[error("route {index}: view identifier is empty")]
    EmptyView { index: usize },

    #[error("route {index}: pattern '{pattern}' can never match, route {first} has the same shape")]
    Duplicate {
        index: usize,
        first: usize,
        pattern: String,
    },

    #[error("fallback view identifier is empty")]
    EmptyFallback,
}

/// A compiled route table entry.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pattern: RoutePattern,
    view: ViewId,
    props: bool,
}

impl RouteEntry {
    pub fn new(pattern: RoutePattern, view: ViewId, props: bool) -> Self {
        Self {
            pattern,
            view,
            props,
        }
    }

    /// Compile one configured route. `index` is its table position.
    pub fn from_config(index: usize, route: &RouteConfig) -> Result<Self, RouteError> {
        let pattern = RoutePattern::parse(&route.path)
            .map_err(|source| RouteError::Pattern { index, source })?;
        if route.view.trim().is_empty() {
            return Err(RouteError::EmptyView { index });
        }
        Ok(Self::new(pattern, ViewId::new(route.view.as_str()), route.props))
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn view(&self) -> &ViewId {
        &self.view
    }

    /// Whether extracted parameters are forwarded to the view.
    pub fn props(&self) -> bool {
        self.props
    }
}

/// Outcome of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// View to render.
    pub view: ViewId,

    /// Index of the matched entry; `None` for the fallback.
    pub route: Option<usize>,

    /// Every parameter extracted from the path.
    pub params: RouteParams,

    /// Whether the parameters are forwarded to the view.
    pub props: bool,
}

impl Resolution {
    pub fn is_fallback(&self) -> bool {
        self.route.is_none()
    }

    /// Parameters the view is allowed to see.
    pub fn forwarded_params(&self) -> Option<&RouteParams> {
        self.props.then_some(&self.params)
    }
}

/// Immutable, ordered route table with a designated fallback view.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    fallback: ViewId,
}

impl RouteTable {
    /// Build a table from compiled entries.
    ///
    /// Rejects an empty fallback, empty view identifiers, and entries whose
    /// shape repeats an earlier one (they could never be reached).
    pub fn new(entries: Vec<RouteEntry>, fallback: ViewId) -> Result<Self, RouteError> {
        if fallback.as_str().trim().is_empty() {
            return Err(RouteError::EmptyFallback);
        }

        for (index, entry) in entries.iter().enumerate() {
            if entry.view.as_str().trim().is_empty() {
                return Err(RouteError::EmptyView { index });
            }
            let shape = entry.pattern.shape();
            if let Some(first) = entries[..index]
                .iter()
                .position(|earlier| earlier.pattern.shape() == shape)
            {
                return Err(RouteError::Duplicate {
                    index,
                    first,
                    pattern: entry.pattern.as_str().to_string(),
                });
            }
        }

        Ok(Self { entries, fallback })
    }

    /// Compile the configured route table.
    pub fn from_config(config: &RouterConfig) -> Result<Self, RouteError> {
        let entries = config
            .routes
            .iter()
            .enumerate()
            .map(|(index, route)| RouteEntry::from_config(index, route))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(entries, ViewId::new(config.fallback_view.as_str()))
    }

    /// Resolve a path relative to the mount prefix.
    pub fn resolve(&self, path: &str) -> Resolution {
        let components = split_path(path);

        for (index, entry) in self.entries.iter().enumerate() {
            if let Some(params) = entry.pattern.matches(&components) {
                tracing::debug!(
                    path = %path,
                    route = %entry.pattern,
                    view = %entry.view,
                    "Route matched"
                );
                metrics::record_resolution(false);
                return Resolution {
                    view: entry.view.clone(),
                    route: Some(index),
                    params,
                    props: entry.props,
                };
            }
        }

        tracing::warn!(path = %path, view = %self.fallback, "No route matched, using fallback");
        metrics::record_resolution(true);
        Resolution {
            view: self.fallback.clone(),
            route: None,
            params: RouteParams::new(),
            props: false,
        }
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn fallback(&self) -> &ViewId {
        &self.fallback
    }
}
