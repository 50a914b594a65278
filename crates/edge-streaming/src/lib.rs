//! Streaming primitives for shell-first SSR.
//!
//! This crate enforces shell-first streaming patterns:
//! - `Shell` / `HeadContent` - Page frame sent before any data is ready
//! - `StreamingSink` - Platform-controlled streaming of named sections
//! - `escape_html` - Escaping for interpolated text

mod shell;
mod sink;

pub use shell::*;
pub use sink::*;
