//! Transports that put requests on the wire.

use async_trait::async_trait;

use crate::{FetchError, Request, Response};

/// Sends a request and returns the raw response.
///
/// Workloads run on a single-threaded executor, so futures are not `Send`.
/// A transport reports failures to reach the server as `Err`; any status
/// code the server returns comes back as `Ok`.
#[async_trait(?Send)]
pub trait Transport {
    /// Execute one request.
    async fn execute(&self, request: &Request) -> Result<Response, FetchError>;
}

/// Outbound HTTP through the Spin host.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct SpinTransport;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl Transport for SpinTransport {
    async fn execute(&self, request: &Request) -> Result<Response, FetchError> {
        use edge_core::Method;
        use spin_sdk::http::Method as SpinMethod;

        let method = match request.method() {
            Method::Get => SpinMethod::Get,
            Method::Post => SpinMethod::Post,
            Method::Put => SpinMethod::Put,
            Method::Delete => SpinMethod::Delete,
            Method::Patch => SpinMethod::Patch,
            Method::Head => SpinMethod::Head,
            Method::Options => SpinMethod::Options,
        };

        let mut builder = spin_sdk::http::Request::builder();
        builder.method(method).uri(request.url());
        for (name, value) in request.headers() {
            builder.header(name.as_str(), value.as_str());
        }

        let resp: spin_sdk::http::Response = spin_sdk::http::send(builder.build())
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let mut response = Response::new(*resp.status(), Vec::new());
        if let Some(content_type) = resp.header("content-type").and_then(|v| v.as_str()) {
            response = response.with_header("content-type", content_type);
        }
        response.body = resp.into_body();
        Ok(response)
    }
}
