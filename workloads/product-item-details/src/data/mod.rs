//! Data models for the product item details page.

mod payload;
mod product;

pub use payload::*;
pub use product::*;
