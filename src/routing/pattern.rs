//! Route pattern compilation.
//!
//! # Responsibilities
//! - Parse `/`-separated patterns into positional segments
//! - Reject malformed patterns at table-definition time
//!
//! # Design Decisions
//! - `:name` captures exactly one non-empty path component
//! - Every other segment is a case-sensitive literal
//! - No wildcards, optional segments or inline regex: a pattern's segment
//!   count is fixed, which keeps matching a positional comparison

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

/// Characters with routing meaning elsewhere that a segment may not carry.
const RESERVED: &[char] = &['?', '#', '*', '(', ')', '+'];

/// One positional component of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches only this exact component.
    Literal(String),
    /// Matches any non-empty component and captures it under this name.
    Param(String),
}

impl Segment {
    pub fn is_param(&self) -> bool {
        matches!(self, Segment::Param(_))
    }
}

/// Errors produced while compiling a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,

    #[error("pattern '{0}' must start with '/'")]
    NotAbsolute(String),

    #[error("pattern '{pattern}' has an empty segment at position {position}")]
    EmptySegment { pattern: String, position: usize },

    #[error("pattern '{pattern}' has an unnamed parameter at position {position}")]
    UnnamedParam { pattern: String, position: usize },

    #[error("pattern '{pattern}' has an invalid parameter name '{name}'")]
    InvalidParamName { pattern: String, name: String },

    #[error("pattern '{pattern}' declares parameter '{name}' more than once")]
    DuplicateParam { pattern: String, name: String },

    #[error("pattern '{pattern}' contains unsupported character '{ch}'")]
    UnsupportedChar { pattern: String, ch: char },
}

/// A compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Compile a pattern such as `/datasets/view/:id`.
    ///
    /// `/` compiles to zero segments. A single trailing slash is ignored.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }
        let Some(rest) = pattern.strip_prefix('/') else {
            return Err(PatternError::NotAbsolute(pattern.to_string()));
        };
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let mut segments = Vec::new();
        let mut seen = HashSet::new();
        if !rest.is_empty() {
            for (position, raw) in rest.split('/').enumerate() {
                segments.push(parse_segment(pattern, position, raw, &mut seen)?);
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as written in the route table.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Structural key ignoring parameter names.
    ///
    /// Two patterns with the same shape match exactly the same paths.
    pub fn shape(&self) -> Vec<Option<&str>> {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(text) => Some(text.as_str()),
                Segment::Param(_) => None,
            })
            .collect()
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_segment(
    pattern: &str,
    position: usize,
    raw: &str,
    seen: &mut HashSet<String>,
) -> Result<Segment, PatternError> {
    if raw.is_empty() {
        return Err(PatternError::EmptySegment {
            pattern: pattern.to_string(),
            position,
        });
    }
    if let Some(ch) = raw.chars().find(|c| RESERVED.contains(c) || c.is_whitespace()) {
        return Err(PatternError::UnsupportedChar {
            pattern: pattern.to_string(),
            ch,
        });
    }

    match raw.strip_prefix(':') {
        Some("") => Err(PatternError::UnnamedParam {
            pattern: pattern.to_string(),
            position,
        }),
        Some(name) => {
            if !is_valid_param_name(name) {
                return Err(PatternError::InvalidParamName {
                    pattern: pattern.to_string(),
                    name: name.to_string(),
                });
            }
            if !seen.insert(name.to_string()) {
                return Err(PatternError::DuplicateParam {
                    pattern: pattern.to_string(),
                    name: name.to_string(),
                });
            }
            Ok(Segment::Param(name.to_string()))
        }
        None if raw.contains(':') => Err(PatternError::UnsupportedChar {
            pattern: pattern.to_string(),
            ch: ':',
        }),
        None => Ok(Segment::Literal(raw.to_string())),
    }
}

fn is_valid_param_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
