//! Request parsing and shell-first streaming of the page.

use std::fmt::Display;

use futures::Sink;

use edge_sdk::edge_core::{
    History, Method, RequestContext, RouteConfig, SessionStore, WorkloadError, WorkloadManifest,
};
use edge_sdk::edge_data::Transport;
use edge_sdk::edge_observability::StructuredLogger;
use edge_sdk::edge_streaming::{escape_html, HeadContent, Shell, StreamingSink};

use crate::component::ProductItemDetails;
use crate::config::PdpConfig;
use crate::fetcher::{ProductFetchError, ProductFetcher};
use crate::quantity::Quantity;
use crate::sections::render_loader_removal;
use crate::status::RequestStatus;
use crate::PDP_STYLES;

/// Workload name used in logs and the manifest.
pub const WORKLOAD_NAME: &str = "product-item-details";

/// Route served by this workload.
pub const PRODUCT_ROUTE: &str = "/products/:id";

/// Manifest with the single product route.
pub fn manifest() -> WorkloadManifest {
    WorkloadManifest::new(WORKLOAD_NAME, env!("CARGO_PKG_VERSION")).with_route(
        RouteConfig::new(PRODUCT_ROUTE, "product_item_details").with_methods(vec!["GET", "HEAD"]),
    )
}

/// Form action submitted back to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Increment,
    Decrement,
    AddToCart,
    ContinueShopping,
}

impl PageAction {
    /// Parse the `action` query value. Unknown values are ignored.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "increment" => Some(Self::Increment),
            "decrement" => Some(Self::Decrement),
            "add-to-cart" => Some(Self::AddToCart),
            "continue-shopping" => Some(Self::ContinueShopping),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Increment => "increment",
            Self::Decrement => "decrement",
            Self::AddToCart => "add-to-cart",
            Self::ContinueShopping => "continue-shopping",
        }
    }
}

/// What the browser asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Product id from the route, `None` when no route matched.
    pub product_id: Option<String>,
    /// Quantity carried over from the previous render.
    pub quantity: Quantity,
    pub action: Option<PageAction>,
    /// HEAD request: answer with headers only, without fetching.
    pub head_only: bool,
}

impl PageRequest {
    /// Extract the product id, quantity and action from a request.
    pub fn from_context(ctx: &RequestContext, manifest: &WorkloadManifest) -> Self {
        let product_id = manifest
            .resolve(&ctx.path)
            .filter(|(route, _)| route.allows(ctx.method.as_str()))
            .and_then(|(_, params)| params.get("id").cloned());

        Self {
            product_id,
            quantity: Quantity::from_query(ctx.query_param("quantity")),
            action: ctx.query_param("action").and_then(PageAction::parse),
            head_only: ctx.method == Method::Head,
        }
    }

    /// Status line of the page response.
    pub fn response_status(&self) -> u16 {
        if self.product_id.is_some() {
            200
        } else {
            404
        }
    }

    /// Location to redirect to instead of rendering, if the shopper chose to
    /// leave the page.
    pub fn redirect_target(&self, config: &PdpConfig) -> Option<String> {
        if self.action != Some(PageAction::ContinueShopping) {
            return None;
        }
        let view = ProductItemDetails::new(self.product_id.clone().unwrap_or_default());
        let mut history = History::new();
        view.continue_shopping(&mut history, &config.products_route);
        history.current().map(str::to_string)
    }
}

/// Page shell with the site header.
pub fn page_shell(config: &PdpConfig) -> Shell {
    Shell::new(
        HeadContent::new("Product Details | Nxt Trendz")
            .with_meta("viewport", "width=device-width, initial-scale=1")
            .with_style(PDP_STYLES),
    )
    .with_body_start(format!(
        r#"<body>
    <header class="site-header">
        <nav><a href="/">Home</a> <a href="{products}">Products</a> <a href="/cart">Cart</a></nav>
    </header>
    <main class="product-item-details-container">
"#,
        products = escape_html(&config.products_route),
    ))
    .with_body_end("    </main>\n</body>\n")
}

/// Stream the page: shell, loading indicator, resolved view, closing.
///
/// Returns the final view state. Errors only when the sink fails.
pub async fn stream_page<T, S, E>(
    request: &PageRequest,
    config: &PdpConfig,
    fetcher: &ProductFetcher<'_, T>,
    session: &dyn SessionStore,
    sink: &mut StreamingSink<S, E>,
    logger: &StructuredLogger,
) -> Result<ProductItemDetails, WorkloadError>
where
    T: Transport,
    S: Sink<Vec<u8>, Error = E> + Unpin,
    E: Display,
{
    let shell = page_shell(config);
    sink.send_shell(&shell.render_opening()).await?;
    logger.debug("Shell sent");

    let mut view = ProductItemDetails::new(request.product_id.clone().unwrap_or_default())
        .with_quantity(request.quantity);
    match request.action {
        Some(PageAction::Increment) => view.increment(),
        Some(PageAction::Decrement) => view.decrement(),
        Some(PageAction::AddToCart) => {
            view.add_to_cart(logger);
        }
        Some(PageAction::ContinueShopping) | None => {}
    }
    if let Some(action) = request.action {
        logger
            .debug_builder("Action applied")
            .field("action", action.as_str())
            .field_i64("quantity", view.quantity().get() as i64)
            .emit();
    }

    if let Some(ticket) = view.start() {
        match &request.product_id {
            Some(id) => {
                sink.send_section("loading", &view.render(config)).await?;
                let result = fetcher.fetch(id, session).await;
                view.resolve(ticket, result);
            }
            None => {
                logger.warn("No product route matched");
                view.resolve(ticket, Err(ProductFetchError::Rejected { status: 404 }));
            }
        }
    }

    let section = match view.status() {
        RequestStatus::Success => "details",
        _ => "failure",
    };
    let html = format!("{}\n{}", view.render(config), render_loader_removal());
    sink.send_section(section, &html).await?;
    sink.finish(&shell.render_closing()).await?;

    let mut done = logger
        .info_builder("PDP request complete")
        .field("status", view.status().as_str())
        .field_i64("sections", sink.sections_sent().len() as i64);
    if let Some(ttfb) = sink.timing().time_to_shell() {
        done = done.duration_ms("time_to_shell_ms", ttfb);
    }
    done.emit();

    Ok(view)
}
