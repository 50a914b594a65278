//! Success view: product summary, quantity controls and similar products.

use edge_sdk::edge_streaming::escape_html;

use crate::config::PdpConfig;
use crate::data::ProductDetails;
use crate::quantity::Quantity;

use super::{format_price, render_similar_products};

/// Render the loaded product.
pub fn render_details(details: &ProductDetails, quantity: Quantity, config: &PdpConfig) -> String {
    format!(
        r#"<section class="product-details-success-view" data-section="details" data-product-id="{id}">
    <div class="product-details-container">
        <img src="{image}" alt="product" class="product-image">
        <div class="product">
            <h1 class="product-name">{title}</h1>
            <p class="price-details">{price}</p>
            <div class="rating-and-reviews-count">
                <div class="rating-container">
                    <p class="rating">{rating}</p>
                    <img src="{star}" alt="star" class="star">
                </div>
                <p class="reviews-count">{reviews} Reviews</p>
            </div>
            <p class="product-description">{description}</p>
            <div class="label-value-container">
                <p class="label">Available:</p>
                <p class="value">{availability}</p>
            </div>
            <div class="label-value-container">
                <p class="label">Brand:</p>
                <p class="value">{brand}</p>
            </div>
            <hr class="horizontal-line">
            {controls}
            {add_to_cart}
        </div>
    </div>
    {similar}
</section>"#,
        id = escape_html(&details.id),
        image = escape_html(&details.image_url),
        title = escape_html(&details.title),
        price = escape_html(&format_price(&config.currency_prefix, details.price)),
        rating = details.rating,
        star = escape_html(&config.star_image_url),
        reviews = details.total_reviews,
        description = escape_html(&details.description),
        availability = escape_html(&details.availability),
        brand = escape_html(&details.brand),
        controls = render_quantity_controls(quantity),
        add_to_cart = render_add_to_cart(quantity),
        similar = render_similar_products(&details.similar_products, config),
    )
}

/// Render the minus / quantity / plus pair.
///
/// Each button submits the current quantity with its action, so the page
/// re-renders with the adjusted value.
pub fn render_quantity_controls(quantity: Quantity) -> String {
    format!(
        r#"<form method="get" class="quantity-container">
                <input type="hidden" name="quantity" value="{quantity}">
                <button type="submit" name="action" value="decrement" class="quantity-controller-button" data-testid="minus" aria-label="Decrease quantity">-</button>
                <p class="quantity">{quantity}</p>
                <button type="submit" name="action" value="increment" class="quantity-controller-button" data-testid="plus" aria-label="Increase quantity">+</button>
            </form>"#
    )
}

fn render_add_to_cart(quantity: Quantity) -> String {
    format!(
        r#"<form method="get" class="add-to-cart-form">
                <input type="hidden" name="quantity" value="{quantity}">
                <button type="submit" name="action" value="add-to-cart" class="button add-to-cart-btn">ADD TO CART</button>
            </form>"#
    )
}
