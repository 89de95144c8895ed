//! Shared, atomically replaceable document handle.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use super::Document;

/// Handle to the current document, cheap to clone.
///
/// Readers never block; replacing the document is visible to the next read.
#[derive(Clone, Default)]
pub struct SharedDocument {
    inner: Arc<ArcSwapOption<Document>>,
}

impl SharedDocument {
    /// A handle with no document loaded.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(document: Document) -> Self {
        let shared = Self::empty();
        shared.replace(document);
        shared
    }

    /// Swap in a new document.
    pub fn replace(&self, document: Document) {
        self.inner.store(Some(Arc::new(document)));
    }

    /// Parse HTML and swap it in.
    pub fn load_html(&self, html: &str) {
        self.replace(Document::from_html(html));
    }

    /// Drop the current document.
    pub fn clear(&self) {
        self.inner.store(None);
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.load().is_some()
    }

    /// Snapshot of the current document.
    pub fn snapshot(&self) -> Option<Arc<Document>> {
        self.inner.load_full()
    }

    /// Look up a field in the current document.
    pub fn field_value(&self, name: &str) -> Option<String> {
        self.inner
            .load_full()
            .and_then(|doc| doc.field_value(name).map(str::to_owned))
    }
}

impl fmt::Debug for SharedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedDocument")
            .field("document", &self.snapshot())
            .finish()
    }
}
