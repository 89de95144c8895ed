//! Token discovery.
//!
//! A [`TokenProvider`] is asked for the token once per outgoing request.
//! Implementations must be side-effect free and must not cache.

use std::sync::Arc;

use crate::document::SharedDocument;

/// Source of the anti-forgery token.
pub trait TokenProvider: Send + Sync {
    /// The current token, or `None` when none is discoverable.
    fn token(&self) -> Option<String>;
}

impl<P: TokenProvider + ?Sized> TokenProvider for Arc<P> {
    fn token(&self) -> Option<String> {
        (**self).token()
    }
}

impl<P: TokenProvider + ?Sized> TokenProvider for Box<P> {
    fn token(&self) -> Option<String> {
        (**self).token()
    }
}

/// Never finds a token (e.g. cross-origin contexts).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenProvider for NoToken {
    fn token(&self) -> Option<String> {
        None
    }
}

/// Always yields the same token. An empty value counts as absent.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        (!self.0.is_empty()).then(|| self.0.clone())
    }
}

/// Reads a named field from the live document on every call.
#[derive(Debug, Clone)]
pub struct DocumentToken {
    document: SharedDocument,
    field: String,
}

impl DocumentToken {
    pub fn new(document: SharedDocument, field: impl Into<String>) -> Self {
        Self {
            document,
            field: field.into(),
        }
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl TokenProvider for DocumentToken {
    fn token(&self) -> Option<String> {
        self.document.field_value(&self.field)
    }
}
