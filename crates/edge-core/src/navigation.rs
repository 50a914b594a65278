//! Navigation commands issued by workloads.

/// Accepts "go to" commands from a view.
///
/// Server-side handlers turn a push into a redirect; in-process callers can
/// keep a [`History`].
pub trait Navigator {
    /// Navigate to `path`.
    fn push(&mut self, path: &str);
}

/// Navigator that records every pushed path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// All pushed paths, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The most recent path, if any.
    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }
}

impl Navigator for History {
    fn push(&mut self, path: &str) {
        self.entries.push(path.to_string());
    }
}
