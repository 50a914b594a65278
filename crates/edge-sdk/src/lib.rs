//! Public SDK for the edge streaming SSR platform.
//!
//! This crate re-exports the platform crates a workload builds on:
//!
//! ```ignore
//! use edge_sdk::prelude::*;
//!
//! async fn handle<T: Transport>(ctx: RequestContext, transport: T) -> Result<(), FetchError> {
//!     let logger = StructuredLogger::new(ctx.request_id.clone());
//!     let client = FetchClient::new(ctx.request_id.clone(), transport);
//!
//!     let response = client.get("https://api.example.com/products/1").send().await?;
//!     logger.info_builder("fetched").field_i64("status", response.status as i64).emit();
//!     Ok(())
//! }
//! ```

pub use edge_core;
pub use edge_data;
pub use edge_observability;
pub use edge_streaming;

/// Prelude for convenient imports.
pub mod prelude {
    pub use edge_core::*;
    pub use edge_data::*;
    pub use edge_observability::*;
    pub use edge_streaming::*;
}
