//! Session values supplied by the client (cookies and the like).

use std::collections::HashMap;

/// Read-only key-value store carrying per-session values such as the
/// bearer token.
pub trait SessionStore {
    /// Look up a value by key. Empty values count as absent.
    fn get(&self, key: &str) -> Option<&str>;
}

/// Cookies parsed from a `Cookie` request header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: HashMap<String, String>,
}

impl CookieJar {
    /// Parse a `Cookie` header value (`a=1; b=2`).
    ///
    /// Pairs without `=` are skipped. Values wrapped in double quotes are
    /// unquoted. The first occurrence of a name wins.
    pub fn parse(header: &str) -> Self {
        let mut cookies = HashMap::new();
        for pair in header.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            cookies
                .entry(name.to_string())
                .or_insert_with(|| value.to_string());
        }
        Self { cookies }
    }

    /// Number of cookies.
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Whether no cookies were sent.
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl SessionStore for CookieJar {
    fn get(&self, key: &str) -> Option<&str> {
        self.cookies
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// In-memory session, for tests and in-process callers.
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    values: HashMap<String, String>,
}

impl MemorySession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}
