//! Outbound request description.

use edge_core::Method;

/// A fully described outbound HTTP request.
///
/// Header names are kept in insertion order; setting a header that already
/// exists (case-insensitive) replaces its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
}

impl Request {
    /// Create a request with no headers.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// Create a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    /// Set a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.headers.push((name, value)),
        }
        self
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    /// HTTP method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// All headers in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Get a header value (case-insensitive).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_auth_header() {
        let req = Request::get("https://api.test/products/1").bearer_auth("tok");
        assert_eq!(req.method(), Method::Get);
        assert_eq!(req.url(), "https://api.test/products/1");
        assert_eq!(req.header_value("authorization"), Some("Bearer tok"));
    }

    #[test]
    fn test_header_replaces_existing() {
        let req = Request::get("/")
            .header("Accept", "text/html")
            .accept("application/json");
        assert_eq!(req.headers().len(), 1);
        assert_eq!(req.header_value("ACCEPT"), Some("application/json"));
    }

    #[test]
    fn test_missing_header() {
        let req = Request::get("/");
        assert_eq!(req.header_value("Authorization"), None);
    }
}
