//! The product item details view.
//!
//! [`ProductItemDetails`] owns the fetch status, the loaded product and the
//! chosen quantity. Rendering is a pure function of that state.

use edge_sdk::edge_core::{Navigator, SessionStore};
use edge_sdk::edge_data::Transport;
use edge_sdk::edge_observability::StructuredLogger;

use crate::config::PdpConfig;
use crate::data::ProductDetails;
use crate::fetcher::{ProductFetchError, ProductFetcher};
use crate::quantity::Quantity;
use crate::sections::{render_details, render_failure, render_loading};
use crate::status::RequestStatus;

/// Handle for one fetch attempt. Only the latest ticket may resolve the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct FetchTicket {
    generation: u64,
}

/// Cart intent produced by "ADD TO CART". Nothing is sent anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToCart {
    pub product_id: String,
    pub quantity: Quantity,
}

/// State of one product details view.
#[derive(Debug, Clone)]
pub struct ProductItemDetails {
    product_id: String,
    status: RequestStatus,
    details: Option<ProductDetails>,
    quantity: Quantity,
    generation: u64,
    mounted: bool,
}

impl ProductItemDetails {
    /// A fresh, unmounted view of `product_id`.
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            status: RequestStatus::Idle,
            details: None,
            quantity: Quantity::default(),
            generation: 0,
            mounted: false,
        }
    }

    /// Start from a quantity other than 1.
    pub fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Loaded product. Present only in `Success`.
    pub fn details(&self) -> Option<&ProductDetails> {
        self.details.as_ref()
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Mark the view mounted and begin its first fetch.
    ///
    /// Returns `None` if already mounted, in which case nothing changes.
    pub fn start(&mut self) -> Option<FetchTicket> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        Some(self.begin_fetch())
    }

    /// Mount and load the product. A second mount is a no-op.
    pub async fn mount<T: Transport>(
        &mut self,
        fetcher: &ProductFetcher<'_, T>,
        session: &dyn SessionStore,
    ) -> RequestStatus {
        if let Some(ticket) = self.start() {
            let result = fetcher.fetch(&self.product_id, session).await;
            self.resolve(ticket, result);
        }
        self.status
    }

    /// Fetch again, replacing whatever was loaded.
    pub async fn reload<T: Transport>(
        &mut self,
        fetcher: &ProductFetcher<'_, T>,
        session: &dyn SessionStore,
    ) -> RequestStatus {
        let ticket = self.begin_fetch();
        let result = fetcher.fetch(&self.product_id, session).await;
        self.resolve(ticket, result);
        self.status
    }

    /// Enter `InProgress` and drop loaded data. Earlier tickets become stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.status = self.status.begin();
        self.details = None;
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Apply the outcome of the attempt behind `ticket`.
    ///
    /// Returns `false`, leaving the view untouched, when the view is
    /// unmounted or the ticket was superseded by a later attempt.
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        result: Result<ProductDetails, ProductFetchError>,
    ) -> bool {
        if !self.mounted || ticket.generation != self.generation {
            return false;
        }
        let Some(next) = self.status.resolve(result.is_ok()) else {
            return false;
        };
        self.status = next;
        self.details = result.ok();
        true
    }

    /// Tear down. Results arriving afterwards are ignored.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.details = None;
    }

    pub fn increment(&mut self) {
        self.quantity.increment();
    }

    pub fn decrement(&mut self) {
        self.quantity.decrement();
    }

    /// Record the intent to buy the current quantity.
    pub fn add_to_cart(&self, logger: &StructuredLogger) -> AddToCart {
        let intent = AddToCart {
            product_id: self.product_id.clone(),
            quantity: self.quantity,
        };
        logger
            .info_builder("Add to cart requested")
            .field("product_id", intent.product_id.clone())
            .field_i64("quantity", intent.quantity.get() as i64)
            .emit();
        intent
    }

    /// Leave for the product listing.
    pub fn continue_shopping(&self, navigator: &mut dyn Navigator, products_route: &str) {
        navigator.push(products_route);
    }

    /// HTML for the current state. Empty while idle.
    pub fn render(&self, config: &PdpConfig) -> String {
        match (self.status, &self.details) {
            (RequestStatus::Idle, _) => String::new(),
            (RequestStatus::InProgress, _) => render_loading(),
            (RequestStatus::Success, Some(details)) => {
                render_details(details, self.quantity, config)
            }
            (RequestStatus::Success, None) | (RequestStatus::Failure, _) => {
                render_failure(config)
            }
        }
    }
}
