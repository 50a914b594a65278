//! Failure view.

use edge_sdk::edge_streaming::escape_html;

use crate::config::PdpConfig;

/// Render the "Product Not Found" view.
///
/// "Continue Shopping" submits `action=continue-shopping` back to the page,
/// which answers with a redirect to the product listing.
pub fn render_failure(config: &PdpConfig) -> String {
    format!(
        r#"<section class="product-details-failure-view" data-section="failure">
    <img src="{image}" alt="error view" class="failure-view-image">
    <h1 class="product-not-found-heading">Product Not Found</h1>
    <form method="get" class="continue-shopping-form">
        <button type="submit" name="action" value="continue-shopping" class="button">Continue Shopping</button>
    </form>
</section>"#,
        image = escape_html(&config.error_image_url),
    )
}
