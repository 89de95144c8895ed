//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Compile every route pattern so malformed tables never reach navigation
//! - Validate header names/values and the gateway base URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ShellConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::ShellConfig;
use crate::routing::router::{RouteEntry, RouteError, RouteTable};
use crate::routing::ViewId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("router.base '{0}' must start with '/'")]
    InvalidBase(String),

    #[error("router.{0}")]
    Route(#[from] RouteError),

    #[error("gateway.base_url '{value}' is not a valid URL: {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    #[error("gateway.token_header '{0}' is not a valid header name")]
    InvalidTokenHeader(String),

    #[error("gateway.token_field must not be empty")]
    EmptyTokenField,

    #[error("gateway.default_headers: invalid header '{name}'")]
    InvalidDefaultHeader { name: String },

    #[error("gateway.timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ShellConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let router = &config.router;
    if !router.base.starts_with('/') {
        errors.push(ValidationError::InvalidBase(router.base.clone()));
    }

    let mut entries = Vec::with_capacity(router.routes.len());
    let mut routes_ok = true;
    for (index, route) in router.routes.iter().enumerate() {
        match RouteEntry::from_config(index, route) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                routes_ok = false;
                errors.push(e.into());
            }
        }
    }
    // Table-level checks only make sense once every entry compiled.
    if routes_ok {
        if let Err(e) = RouteTable::new(entries, ViewId::new(router.fallback_view.as_str())) {
            errors.push(e.into());
        }
    }

    let gateway = &config.gateway;
    if let Err(e) = gateway.parsed_base_url() {
        errors.push(e);
    }
    if let Err(e) = gateway.token_header_name() {
        errors.push(e);
    }
    if gateway.token_field.trim().is_empty() {
        errors.push(ValidationError::EmptyTokenField);
    }
    if let Err(e) = gateway.default_header_map() {
        errors.push(e);
    }
    if gateway.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
