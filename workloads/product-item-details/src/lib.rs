//! Product Item Details - streaming SSR workload.
//!
//! Renders one catalog product:
//! - Authenticated fetch of the product and its similar products
//! - Loading, success and failure views driven by the request status
//! - Quantity controls and an "add to cart" intent, round-tripped as forms
//! - "Continue Shopping" answered with a redirect to the product listing

pub mod component;
pub mod config;
pub mod data;
pub mod fetcher;
pub mod page;
pub mod quantity;
pub mod sections;
pub mod status;

pub use component::{AddToCart, FetchTicket, ProductItemDetails};
pub use config::{ConfigError, PdpConfig};
pub use data::{ProductDetails, SimilarProduct};
pub use fetcher::{ProductFetchError, ProductFetcher};
pub use page::{manifest, page_shell, stream_page, PageAction, PageRequest, WORKLOAD_NAME};
pub use quantity::Quantity;
pub use status::RequestStatus;

#[cfg(target_arch = "wasm32")]
use spin_sdk::http::{Fields, IncomingRequest, Method as SpinMethod, OutgoingResponse, ResponseOutparam};
#[cfg(target_arch = "wasm32")]
use spin_sdk::http_component;

#[cfg(target_arch = "wasm32")]
use edge_sdk::edge_core::{Method, RequestContext, RequestId};
#[cfg(target_arch = "wasm32")]
use edge_sdk::edge_data::{FetchClient, SpinTransport};
#[cfg(target_arch = "wasm32")]
use edge_sdk::edge_observability::StructuredLogger;
#[cfg(target_arch = "wasm32")]
use edge_sdk::edge_streaming::StreamingSink;

/// Main HTTP handler for the product page.
#[cfg(target_arch = "wasm32")]
#[http_component]
async fn handle_product_item_details(req: IncomingRequest, response_out: ResponseOutparam) {
    let method = match req.method() {
        SpinMethod::Get => Method::Get,
        SpinMethod::Head => Method::Head,
        _ => {
            if let Ok(response) = build_response(405, &[]) {
                response_out.set(response);
            }
            return;
        }
    };

    let mut ctx = RequestContext::new(method, req.path_with_query().unwrap_or_default());
    let cookie = req
        .headers()
        .get(&"cookie".to_string())
        .iter()
        .map(|v| String::from_utf8_lossy(v).into_owned())
        .collect::<Vec<_>>()
        .join("; ");
    if !cookie.is_empty() {
        ctx = ctx.with_header("cookie", cookie);
    }

    let (config, config_error) = match PdpConfig::from_spin_variables() {
        Ok(config) => (config, None),
        Err(e) => (PdpConfig::default(), Some(e)),
    };

    let logger = StructuredLogger::new(ctx.request_id.clone())
        .with_workload(WORKLOAD_NAME)
        .with_route(&ctx.path)
        .with_min_level(config.min_log_level())
        .with_format(config.log_format());
    if let Some(e) = config_error {
        logger
            .warn_builder("Invalid configuration, using defaults")
            .field("error", e.to_string())
            .emit();
    }

    let request = PageRequest::from_context(&ctx, &manifest());
    logger
        .info_builder("PDP request started")
        .field("product_id", request.product_id.clone().unwrap_or_default())
        .field("action", request.action.map(PageAction::as_str).unwrap_or("none"))
        .emit();

    if let Some(location) = request.redirect_target(&config) {
        logger
            .info_builder("Continue shopping")
            .field("location", location.clone())
            .emit();
        match build_response(303, &[("location", location.as_str()), ("x-request-id", ctx.request_id.as_str())]) {
            Ok(response) => response_out.set(response),
            Err(e) => logger.error_builder("Failed to build redirect").field("error", e.to_string()).emit(),
        }
        return;
    }

    let status = request.response_status();
    if request.head_only {
        match html_response(status, &ctx.request_id) {
            Ok(response) => response_out.set(response),
            Err(e) => logger.error_builder("Failed to build response").field("error", e.to_string()).emit(),
        }
        logger
            .info_builder("PDP request complete")
            .field_i64("status", status as i64)
            .field_bool("head", true)
            .emit();
        return;
    }

    let response = match html_response(status, &ctx.request_id) {
        Ok(response) => response,
        Err(e) => {
            logger.error_builder("Failed to build response").field("error", e.to_string()).emit();
            return;
        }
    };
    let body = response.take_body();
    response_out.set(response);
    let mut sink = StreamingSink::new(body, ctx.timing.clone());

    let client = FetchClient::new(ctx.request_id.clone(), SpinTransport).with_base_url(&config.catalog_base);
    let fetcher = ProductFetcher::new(&client, &config, &logger);
    let session = ctx.cookies();

    if let Err(e) = stream_page(&request, &config, &fetcher, &session, &mut sink, &logger).await {
        logger
            .error_builder("Streaming failed")
            .field("error", e.to_string())
            .emit();
    }
}

#[cfg(target_arch = "wasm32")]
fn html_response(status: u16, request_id: &RequestId) -> anyhow::Result<OutgoingResponse> {
    build_response(
        status,
        &[
            ("content-type", "text/html; charset=utf-8"),
            ("cache-control", "private, no-store"),
            ("x-request-id", request_id.as_str()),
        ],
    )
}

#[cfg(target_arch = "wasm32")]
fn build_response(status: u16, headers: &[(&str, &str)]) -> anyhow::Result<OutgoingResponse> {
    let list: Vec<(String, Vec<u8>)> = headers
        .iter()
        .map(|(name, value)| (name.to_string(), value.as_bytes().to_vec()))
        .collect();
    let fields = Fields::from_list(&list).map_err(|e| anyhow::anyhow!("invalid headers: {e:?}"))?;
    let response = OutgoingResponse::new(fields);
    response
        .set_status_code(status)
        .map_err(|_| anyhow::anyhow!("invalid status code {status}"))?;
    Ok(response)
}

/// CSS styles for the product page.
pub const PDP_STYLES: &str = r#"
* { box-sizing: border-box; }
body { font-family: 'Roboto', -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 0; background: #ffffff; color: #171f46; }
.site-header { background: #ffffff; padding: 1rem 2rem; box-shadow: 0 4px 16px rgba(234, 238, 245, 0.8); }
.site-header nav { display: flex; gap: 1.5rem; }
.site-header a { color: #475569; text-decoration: none; font-weight: 500; }
.product-item-details-container { max-width: 1110px; margin: 0 auto; padding: 2rem; }
.visually-hidden { position: absolute; width: 1px; height: 1px; overflow: hidden; clip: rect(0 0 0 0); }

/* Loader */
.products-loader-container { display: flex; justify-content: center; align-items: center; min-height: 50vh; }
.loader { width: 50px; height: 50px; border: 4px solid #e2e8f0; border-top-color: #0b69ff; border-radius: 50%; animation: spin 0.8s linear infinite; }
@keyframes spin { to { transform: rotate(360deg); } }

/* Success view */
.product-details-container { display: flex; flex-wrap: wrap; gap: 3rem; margin-bottom: 3rem; }
.product-image { width: 100%; max-width: 520px; border-radius: 16px; }
.product { flex: 1; min-width: 280px; }
.product-name { font-size: 2rem; margin: 0 0 0.5rem; }
.price-details { font-size: 1.5rem; font-weight: 700; margin: 0.5rem 0; }
.rating-and-reviews-count { display: flex; align-items: center; gap: 1rem; }
.rating-container { display: flex; align-items: center; gap: 0.25rem; background: #3b82f6; color: #ffffff; padding: 0.25rem 0.75rem; border-radius: 8px; }
.rating { margin: 0; }
.star { width: 16px; height: 16px; }
.reviews-count { color: #12022f; }
.product-description { color: #616e7c; line-height: 1.6; }
.label-value-container { display: flex; gap: 0.5rem; }
.label { font-weight: 600; margin: 0.25rem 0; }
.value { color: #616e7c; margin: 0.25rem 0; }
.horizontal-line { border: none; border-top: 1px solid #cbd5e1; margin: 1.5rem 0; }
.quantity-container { display: flex; align-items: center; gap: 1rem; }
.quantity-controller-button { background: transparent; border: 1px solid #616e7c; width: 32px; height: 32px; cursor: pointer; font-size: 1.25rem; }
.quantity { font-size: 1.25rem; margin: 0; }
.button { background: #3b82f6; color: #ffffff; border: none; border-radius: 8px; padding: 0.75rem 1.5rem; font-weight: 600; cursor: pointer; margin-top: 1.5rem; }

/* Similar products */
.similar-products-heading { font-size: 1.5rem; }
.similar-products-list { display: flex; flex-wrap: wrap; gap: 1.5rem; list-style: none; padding: 0; }
.similar-product-item { width: 240px; }
.similar-product-link { color: inherit; text-decoration: none; }
.similar-product-image { width: 100%; border-radius: 8px; }
.similar-product-title { font-weight: 600; margin: 0.5rem 0 0.25rem; }
.similar-product-brand { color: #64748b; margin: 0; }
.similar-product-price-rating { display: flex; justify-content: space-between; align-items: center; }

/* Failure view */
.product-details-failure-view { display: flex; flex-direction: column; align-items: center; padding: 2rem; }
.failure-view-image { width: 100%; max-width: 480px; }
.product-not-found-heading { font-size: 2rem; }
"#;
