//! Similar products list.

use crate::config::PdpConfig;
use crate::data::SimilarProduct;

use super::render_product_card;

/// Render the "Similar Products" heading and one card per product, in
/// catalog order. An empty list keeps the heading.
pub fn render_similar_products(products: &[SimilarProduct], config: &PdpConfig) -> String {
    let cards: String = products
        .iter()
        .map(|product| {
            let alt = format!("similar product {}", product.title);
            render_product_card(product, &alt, config)
        })
        .collect();

    format!(
        r#"<section class="similar-products" data-section="similar-products">
    <h1 class="similar-products-heading">Similar Products</h1>
    <ul class="similar-products-list">
        {cards}
    </ul>
</section>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, title: &str) -> SimilarProduct {
        SimilarProduct {
            id: id.to_string(),
            title: title.to_string(),
            brand: "B".to_string(),
            price: 10.0,
            image_url: format!("https://img.test/{id}.png"),
            rating: 4.0,
        }
    }

    #[test]
    fn test_cards_in_order_with_labels() {
        let html = render_similar_products(
            &[product("1", "First"), product("2", "Second")],
            &PdpConfig::default(),
        );
        assert!(html.contains("Similar Products"));
        let first = html.find(r#"alt="similar product First""#).unwrap();
        let second = html.find(r#"alt="similar product Second""#).unwrap();
        assert!(first < second);
        assert_eq!(html.matches("data-product-id=").count(), 2);
    }

    #[test]
    fn test_empty_list_keeps_heading() {
        let html = render_similar_products(&[], &PdpConfig::default());
        assert!(html.contains("Similar Products"));
        assert!(!html.contains("data-product-id="));
    }
}
