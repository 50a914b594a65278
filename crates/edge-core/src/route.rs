//! Route configuration and path matching.

use serde::{Deserialize, Serialize};

use crate::context::{decode_path_segment, RouteParams};

/// Configuration for a single route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Route pattern (e.g., "/products/:id").
    pub pattern: String,
    /// Handler function name.
    pub handler: String,
    /// HTTP methods this route accepts.
    #[serde(default = "default_methods")]
    pub methods: Vec<String>,
}

fn default_methods() -> Vec<String> {
    vec!["GET".to_string()]
}

impl RouteConfig {
    /// Create a new route configuration.
    pub fn new(pattern: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            handler: handler.into(),
            methods: default_methods(),
        }
    }

    /// Set allowed HTTP methods.
    pub fn with_methods(mut self, methods: Vec<&str>) -> Self {
        self.methods = methods.into_iter().map(String::from).collect();
        self
    }

    /// Whether the route accepts the given method.
    pub fn allows(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m.eq_ignore_ascii_case(method))
    }

    /// Match a request path against the pattern.
    ///
    /// `:name` segments capture one non-empty, percent-decoded segment.
    /// A single trailing slash on the path is ignored.
    pub fn match_path(&self, path: &str) -> Option<RouteParams> {
        let path = path.strip_suffix('/').filter(|p| !p.is_empty()).unwrap_or(path);
        let mut pattern = self.pattern.split('/');
        let mut segments = path.split('/');
        let mut params = RouteParams::new();

        loop {
            match (pattern.next(), segments.next()) {
                (None, None) => return Some(params),
                (Some(p), Some(s)) => {
                    if let Some(name) = p.strip_prefix(':') {
                        if s.is_empty() {
                            return None;
                        }
                        params.insert(name.to_string(), decode_path_segment(s));
                    } else if p != s {
                        return None;
                    }
                }
                _ => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_captures_param() {
        let route = RouteConfig::new("/products/:id", "product_item_details");
        let params = route.match_path("/products/abc").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("abc"));
    }

    #[test]
    fn test_match_trailing_slash() {
        let route = RouteConfig::new("/products/:id", "h");
        assert!(route.match_path("/products/12/").is_some());
    }

    #[test]
    fn test_match_decodes_param() {
        let route = RouteConfig::new("/products/:id", "h");
        let params = route.match_path("/products/a%20b").unwrap();
        assert_eq!(params["id"], "a b");
    }

    #[test]
    fn test_match_keeps_plus() {
        let route = RouteConfig::new("/products/:id", "h");
        let params = route.match_path("/products/a+b").unwrap();
        assert_eq!(params["id"], "a+b");
    }

    #[test]
    fn test_no_match() {
        let route = RouteConfig::new("/products/:id", "h");
        assert!(route.match_path("/products").is_none());
        assert!(route.match_path("/products/").is_none());
        assert!(route.match_path("/products/1/reviews").is_none());
        assert!(route.match_path("/cart/1").is_none());
    }

    #[test]
    fn test_static_route() {
        let route = RouteConfig::new("/", "home");
        assert!(route.match_path("/").is_some());
        assert!(route.match_path("/x").is_none());
    }

    #[test]
    fn test_methods() {
        let route = RouteConfig::new("/products/:id", "h").with_methods(vec!["GET", "HEAD"]);
        assert!(route.allows("get"));
        assert!(route.allows("HEAD"));
        assert!(!route.allows("POST"));
    }
}
