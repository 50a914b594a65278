//! Section renderers for the product item details page.

mod card;
mod details;
mod failure;
mod loading;
mod similar;

pub use card::*;
pub use details::*;
pub use failure::*;
pub use loading::*;
pub use similar::*;

/// Format a price as `"{prefix} {price}/-"`, e.g. `Rs 100/-`.
pub fn format_price(prefix: &str, price: f64) -> String {
    format!("{} {}/-", prefix, price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price("Rs", 100.0), "Rs 100/-");
        assert_eq!(format_price("Rs", 99.5), "Rs 99.5/-");
        assert_eq!(format_price("USD", 0.0), "USD 0/-");
    }
}
