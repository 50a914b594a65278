//! Platform fetch client.

use edge_core::{Method, RequestId};

use crate::{FetchError, Request, Response, Transport};

/// Platform-controlled fetch client.
///
/// Wraps a [`Transport`] with a base URL and the originating request ID,
/// which is forwarded as `x-request-id` for correlation. One call is one
/// request: there is no retry, timeout or cache at this layer.
pub struct FetchClient<T> {
    request_id: RequestId,
    base_url: Option<String>,
    transport: T,
}

impl<T: Transport> FetchClient<T> {
    /// Create a new fetch client.
    pub fn new(request_id: RequestId, transport: T) -> Self {
        Self {
            request_id,
            base_url: None,
            transport,
        }
    }

    /// Resolve relative URLs against `base_url`. A trailing `/` is ignored.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = Some(base_url.trim_end_matches('/').to_string());
        self
    }

    /// Start a GET request.
    pub fn get(&self, url: &str) -> ClientRequest<'_, T> {
        self.request(Method::Get, url)
    }

    /// Start a request with any method.
    pub fn request(&self, method: Method, url: &str) -> ClientRequest<'_, T> {
        let full_url = match &self.base_url {
            Some(base) if !url.starts_with("http://") && !url.starts_with("https://") => {
                format!("{}{}", base, url)
            }
            _ => url.to_string(),
        };

        ClientRequest {
            client: self,
            request: Request::new(method, full_url).header("x-request-id", self.request_id.as_str()),
        }
    }

    /// Get the request ID.
    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    /// Get the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

/// A request bound to a client.
pub struct ClientRequest<'a, T> {
    client: &'a FetchClient<T>,
    request: Request,
}

impl<'a, T: Transport> ClientRequest<'a, T> {
    /// Add a header to the request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request = self.request.header(name, value);
        self
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.request = self.request.bearer_auth(token);
        self
    }

    /// Add a bearer token only when one is present.
    pub fn maybe_bearer_auth(self, token: Option<&str>) -> Self {
        match token {
            Some(token) => self.bearer_auth(token),
            None => self,
        }
    }

    /// Set the Accept header.
    pub fn accept(mut self, content_type: impl Into<String>) -> Self {
        self.request = self.request.accept(content_type);
        self
    }

    /// Inspect the request before it is sent.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Send the request. Any status code is returned as `Ok`.
    pub async fn send(self) -> Result<Response, FetchError> {
        if !self.request.url().starts_with("http://") && !self.request.url().starts_with("https://") {
            return Err(FetchError::InvalidUrl(self.request.url().to_string()));
        }
        self.client.transport.execute(&self.request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockTransport;
    use futures::executor::block_on;

    fn client(mock: MockTransport) -> FetchClient<MockTransport> {
        FetchClient::new(RequestId::from_string("req-1"), mock).with_base_url("https://api.test/")
    }

    #[test]
    fn test_relative_url_uses_base() {
        let client = client(MockTransport::new().respond_json("https://api.test/products/1", serde_json::json!({})));
        let resp = block_on(client.get("/products/1").send()).unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(client.transport().requests()[0].url(), "https://api.test/products/1");
    }

    #[test]
    fn test_absolute_url_bypasses_base() {
        let client = client(MockTransport::new());
        let req = client.get("https://other.test/x");
        assert_eq!(req.request().url(), "https://other.test/x");
    }

    #[test]
    fn test_request_id_and_auth_headers() {
        let client = client(MockTransport::new());
        let _ = block_on(client.get("/p").bearer_auth("jwt").send());
        let sent = &client.transport().requests()[0];
        assert_eq!(sent.header_value("x-request-id"), Some("req-1"));
        assert_eq!(sent.header_value("Authorization"), Some("Bearer jwt"));
    }

    #[test]
    fn test_maybe_bearer_auth_without_token() {
        let client = client(MockTransport::new());
        let req = client.get("/p").maybe_bearer_auth(None);
        assert_eq!(req.request().header_value("Authorization"), None);
    }

    #[test]
    fn test_non_success_status_is_ok() {
        let client = client(MockTransport::new());
        let resp = block_on(client.get("/missing").send()).unwrap();
        assert_eq!(resp.status, 404);
    }

    #[test]
    fn test_invalid_url_is_rejected_before_sending() {
        let client = FetchClient::new(RequestId::from_string("r"), MockTransport::new());
        let err = block_on(client.get("products/1").send()).unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
        assert_eq!(client.transport().request_count(), 0);
    }
}
