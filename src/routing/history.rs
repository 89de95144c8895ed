//! Session history.
//!
//! Mirrors the browser history API the navigator drives: a linear stack of
//! locations with a cursor. Pushing discards any forward entries.

/// History backend used by the navigator.
pub trait History {
    /// Current location, if any entry exists.
    fn location(&self) -> Option<&str>;

    /// Add a new entry after the current one, dropping forward entries.
    fn push(&mut self, path: &str);

    /// Overwrite the current entry.
    fn replace(&mut self, path: &str);

    /// Step back one entry. Returns the new location.
    fn back(&mut self) -> Option<&str>;

    /// Step forward one entry. Returns the new location.
    fn forward(&mut self) -> Option<&str>;
}

/// In-process history stack.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl History for MemoryHistory {
    fn location(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(String::as_str)
    }

    fn push(&mut self, path: &str) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(path.to_string());
        self.cursor = self.entries.len() - 1;
    }

    fn replace(&mut self, path: &str) {
        match self.entries.get_mut(self.cursor) {
            Some(entry) => *entry = path.to_string(),
            None => self.push(path),
        }
    }

    fn back(&mut self) -> Option<&str> {
        if self.cursor == 0 || self.entries.is_empty() {
            return None;
        }
        self.cursor -= 1;
        self.location()
    }

    fn forward(&mut self) -> Option<&str> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.location()
    }
}
