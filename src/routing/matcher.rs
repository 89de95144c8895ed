//! Route matching logic.
//!
//! # Responsibilities
//! - Split a concrete path into components
//! - Match components positionally against a compiled pattern
//! - Extract named parameters on a full match
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Segment counts must be equal; no prefix matches
//! - Query string and fragment never take part in matching
//! - Parameter values are percent-decoded; literals compare raw
//! - No regex to guarantee O(n) matching

use std::collections::BTreeMap;
use std::fmt;

use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::routing::pattern::{RoutePattern, Segment};

/// Parameters extracted from named path segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Trait for matching path components against a condition.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Returns the extracted parameters if every component matches.
    fn matches(&self, components: &[&str]) -> Option<RouteParams>;
}

impl Matcher for RoutePattern {
    fn matches(&self, components: &[&str]) -> Option<RouteParams> {
        let segments = self.segments();
        if segments.len() != components.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (segment, component) in segments.iter().zip(components) {
            match segment {
                Segment::Literal(text) if text == component => {}
                Segment::Param(name) if !component.is_empty() => {
                    params.insert(name.as_str(), decode_param(component));
                }
                _ => return None,
            }
        }
        Some(params)
    }
}

/// Percent-decode a captured component. Input that does not decode to UTF-8
/// is kept as written.
fn decode_param(component: &str) -> String {
    percent_decode_str(component)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| component.to_string())
}

/// Strip the query string and fragment from a path.
pub fn strip_query(path: &str) -> &str {
    match path.find(|c: char| c == '?' || c == '#') {
        Some(end) => &path[..end],
        None => path,
    }
}

/// Split an absolute path into its components.
///
/// The query string and fragment are dropped and a single trailing slash is
/// ignored. Interior empty components are kept so that `//` never matches a
/// parameter.
pub fn split_path(path: &str) -> Vec<&str> {
    let path = strip_query(path);
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);
    if path.is_empty() {
        return Vec::new();
    }
    path.split('/').collect()
}
