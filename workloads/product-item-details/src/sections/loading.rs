//! Loading indicator.

/// Element id of the loader, removed once the view resolves.
pub const LOADER_ID: &str = "pdp-loader";

/// Render the progress indicator shown while the product loads.
pub fn render_loading() -> String {
    format!(
        r#"<section class="products-loader-container" id="{LOADER_ID}" data-section="loading" data-testid="loader" role="status" aria-live="polite">
    <div class="loader" aria-hidden="true"></div>
    <span class="visually-hidden">Loading</span>
</section>"#
    )
}

/// Script removing the loader once the resolved view has streamed in.
pub fn render_loader_removal() -> String {
    format!(
        r#"<script>(function(){{var l=document.getElementById("{LOADER_ID}");if(l){{l.remove();}}}})();</script>"#
    )
}
