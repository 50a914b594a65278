//! Core abstractions for the edge streaming SSR platform.
//!
//! This crate provides the fundamental types:
//! - `RequestContext` - Typed request parameters
//! - `RouteConfig` / `WorkloadManifest` - Route matching
//! - `SessionStore` / `CookieJar` - Client session values
//! - `Navigator` - Navigation commands from views
//! - `LifecyclePhase` / `TimingContext` - Request lifecycle tracking

mod context;
mod lifecycle;
mod navigation;
mod route;
mod session;
mod workload;

pub use context::*;
pub use lifecycle::*;
pub use navigation::*;
pub use route::*;
pub use session::*;
pub use workload::*;
