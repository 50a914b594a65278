//! Product card, shared by every product list on the page.

use edge_sdk::edge_core::encode_path_segment;
use edge_sdk::edge_streaming::escape_html;

use crate::config::PdpConfig;
use crate::data::SimilarProduct;

use super::format_price;

/// Render one product card keyed by the product id, with `alt` as the
/// image's accessible label.
pub fn render_product_card(product: &SimilarProduct, alt: &str, config: &PdpConfig) -> String {
    format!(
        r#"<li class="similar-product-item" data-product-id="{id}">
    <a href="{route}/{href_id}" class="similar-product-link">
        <img src="{image}" alt="{alt}" class="similar-product-image">
        <p class="similar-product-title">{title}</p>
        <p class="similar-product-brand">by {brand}</p>
        <div class="similar-product-price-rating">
            <p class="similar-product-price">{price}</p>
            <div class="rating-container">
                <p class="rating">{rating}</p>
                <img src="{star}" alt="star" class="star">
            </div>
        </div>
    </a>
</li>"#,
        id = escape_html(&product.id),
        route = escape_html(&config.products_route),
        href_id = escape_html(&encode_path_segment(&product.id)),
        image = escape_html(&product.image_url),
        alt = escape_html(alt),
        title = escape_html(&product.title),
        brand = escape_html(&product.brand),
        price = escape_html(&format_price(&config.currency_prefix, product.price)),
        rating = product.rating,
        star = escape_html(&config.star_image_url),
    )
}
