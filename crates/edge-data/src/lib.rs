//! Data access layer for outbound HTTP.
//!
//! This crate provides:
//! - `FetchClient` - Platform fetch with base URL and request correlation
//! - `Request` / `Response` - Transport-neutral request and response
//! - `Transport` - Seam between the client and the wire (`SpinTransport` on
//!   wasm32, `MockTransport` in tests)

mod client;
mod error;
mod mock;
mod request;
mod response;
mod transport;

pub use client::*;
pub use error::FetchError;
pub use mock::MockTransport;
pub use request::Request;
pub use response::Response;
pub use transport::*;
