//! Catalog fetch for a single product.

use edge_sdk::edge_core::{encode_path_segment, SessionStore};
use edge_sdk::edge_data::{FetchClient, FetchError, Transport};
use edge_sdk::edge_observability::StructuredLogger;

use crate::config::PdpConfig;
use crate::data::{ProductDetails, ProductPayload};

/// Why a product could not be loaded.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProductFetchError {
    #[error("Catalog rejected the request with status {status}")]
    Rejected { status: u16 },

    #[error("Catalog unreachable: {0}")]
    Transport(#[from] FetchError),

    #[error("Malformed product payload: {0}")]
    Malformed(String),
}

impl ProductFetchError {
    /// Upstream status code, when the catalog answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status } => Some(*status),
            _ => None,
        }
    }
}

/// Loads products from the catalog service.
///
/// The client is expected to carry the catalog base URL. One call issues
/// exactly one request.
pub struct ProductFetcher<'a, T> {
    client: &'a FetchClient<T>,
    token_key: String,
    logger: &'a StructuredLogger,
}

impl<'a, T: Transport> ProductFetcher<'a, T> {
    /// Create a fetcher reading the bearer token under `config.token_key`.
    pub fn new(client: &'a FetchClient<T>, config: &PdpConfig, logger: &'a StructuredLogger) -> Self {
        Self {
            client,
            token_key: config.token_key.clone(),
            logger,
        }
    }

    /// Fetch and normalize the product `id`.
    pub async fn fetch(
        &self,
        id: &str,
        session: &dyn SessionStore,
    ) -> Result<ProductDetails, ProductFetchError> {
        let path = format!("/products/{}", encode_path_segment(id));
        let token = session.get(&self.token_key);
        if token.is_none() {
            self.logger
                .warn_builder("No session token, sending unauthenticated request")
                .field("token_key", self.token_key.clone())
                .emit();
        }

        self.logger
            .debug_builder("Fetching product")
            .field("product_id", id)
            .field("path", path.clone())
            .field_bool("authenticated", token.is_some())
            .emit();

        let response = self
            .client
            .get(&path)
            .accept("application/json")
            .maybe_bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                self.logger
                    .warn_builder("Product fetch failed")
                    .field("product_id", id)
                    .field("error", e.to_string())
                    .emit();
                ProductFetchError::Transport(e)
            })?;

        if !response.is_success() {
            self.logger
                .warn_builder("Catalog rejected product request")
                .field("product_id", id)
                .field_i64("status", response.status as i64)
                .emit();
            return Err(ProductFetchError::Rejected {
                status: response.status,
            });
        }

        let payload: ProductPayload = response.json().map_err(|e| {
            self.logger
                .warn_builder("Product payload did not parse")
                .field("product_id", id)
                .field("error", e.to_string())
                .emit();
            ProductFetchError::Malformed(e.to_string())
        })?;

        self.logger
            .info_builder("Product loaded")
            .field("product_id", id)
            .field_i64("similar_products", payload.similar_products.len() as i64)
            .emit();

        Ok(payload.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SimilarProduct;
    use edge_sdk::edge_core::{MemorySession, RequestId};
    use edge_sdk::edge_data::{MockTransport, Response};
    use futures::executor::block_on;
    use serde_json::json;

    const BASE: &str = "https://catalog.test";

    fn product_json() -> serde_json::Value {
        json!({
            "id": "abc",
            "title": "T",
            "brand": "B",
            "price": 100,
            "rating": 4.1,
            "description": "D",
            "image_url": "https://img.test/t.png",
            "availability": "In Stock",
            "total_reviews": 10,
            "similar_products": [{
                "id": 7,
                "title": "S",
                "brand": "SB",
                "price": 50,
                "image_url": "https://img.test/s.png",
                "rating": 3.9
            }]
        })
    }

    fn client(mock: MockTransport) -> FetchClient<MockTransport> {
        FetchClient::new(RequestId::from_string("req-test"), mock).with_base_url(BASE)
    }

    fn session() -> MemorySession {
        MemorySession::new().with("jwt_token", "secret")
    }

    #[test]
    fn test_success_projects_fields() {
        let client = client(MockTransport::new().respond_json(format!("{BASE}/products/abc"), product_json()));
        let (logger, _logs) = StructuredLogger::capturing(RequestId::from_string("req-test"));
        let fetcher = ProductFetcher::new(&client, &PdpConfig::default(), &logger);

        let details = block_on(fetcher.fetch("abc", &session())).unwrap();
        let expected = ProductDetails {
            id: "abc".to_string(),
            title: "T".to_string(),
            brand: "B".to_string(),
            price: 100.0,
            rating: 4.1,
            description: "D".to_string(),
            image_url: "https://img.test/t.png".to_string(),
            availability: "In Stock".to_string(),
            total_reviews: 10,
            similar_products: vec![SimilarProduct {
                id: "7".to_string(),
                title: "S".to_string(),
                brand: "SB".to_string(),
                price: 50.0,
                image_url: "https://img.test/s.png".to_string(),
                rating: 3.9,
            }],
        };
        assert_eq!(details, expected);
    }

    #[test]
    fn test_sends_bearer_token_and_accept() {
        let client = client(MockTransport::new().respond_json(format!("{BASE}/products/abc"), product_json()));
        let (logger, _logs) = StructuredLogger::capturing(RequestId::from_string("req-test"));
        let fetcher = ProductFetcher::new(&client, &PdpConfig::default(), &logger);

        block_on(fetcher.fetch("abc", &session())).unwrap();

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].header_value("authorization"), Some("Bearer secret"));
        assert_eq!(requests[0].header_value("accept"), Some("application/json"));
    }

    #[test]
    fn test_missing_token_omits_authorization() {
        let client = client(MockTransport::new().respond(
            format!("{BASE}/products/abc"),
            Response::new(401, "unauthorized"),
        ));
        let (logger, logs) = StructuredLogger::capturing(RequestId::from_string("req-test"));
        let fetcher = ProductFetcher::new(&client, &PdpConfig::default(), &logger);

        let err = block_on(fetcher.fetch("abc", &MemorySession::new())).unwrap_err();
        assert_eq!(err, ProductFetchError::Rejected { status: 401 });
        assert_eq!(client.transport().requests()[0].header_value("authorization"), None);
        assert!(logs.borrow().iter().any(|e| e.message.starts_with("No session token")));
        let logs = logs.borrow();
        let fetching = logs.iter().find(|e| e.message == "Fetching product").unwrap();
        assert_eq!(fetching.fields.get("authenticated"), Some(&json!(false)));
    }

    #[test]
    fn test_non_ok_status_is_rejected() {
        let client = client(MockTransport::new());
        let (logger, _logs) = StructuredLogger::capturing(RequestId::from_string("req-test"));
        let fetcher = ProductFetcher::new(&client, &PdpConfig::default(), &logger);

        let err = block_on(fetcher.fetch("bad", &session())).unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_transport_error() {
        let client = client(MockTransport::new().fail(
            format!("{BASE}/products/abc"),
            FetchError::Request("connection reset".to_string()),
        ));
        let (logger, _logs) = StructuredLogger::capturing(RequestId::from_string("req-test"));
        let fetcher = ProductFetcher::new(&client, &PdpConfig::default(), &logger);

        let err = block_on(fetcher.fetch("abc", &session())).unwrap_err();
        assert!(matches!(err, ProductFetchError::Transport(FetchError::Request(_))));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_malformed_body() {
        let client = client(MockTransport::new().respond_json(
            format!("{BASE}/products/abc"),
            json!({ "title": "no id" }),
        ));
        let (logger, _logs) = StructuredLogger::capturing(RequestId::from_string("req-test"));
        let fetcher = ProductFetcher::new(&client, &PdpConfig::default(), &logger);

        let err = block_on(fetcher.fetch("abc", &session())).unwrap_err();
        assert!(matches!(err, ProductFetchError::Malformed(_)));
    }

    #[test]
    fn test_id_is_encoded_as_one_segment() {
        let client = client(MockTransport::new());
        let (logger, _logs) = StructuredLogger::capturing(RequestId::from_string("req-test"));
        let fetcher = ProductFetcher::new(&client, &PdpConfig::default(), &logger);

        let _ = block_on(fetcher.fetch("a/b c", &session()));
        assert_eq!(
            client.transport().requests()[0].url(),
            format!("{BASE}/products/a%2Fb%20c")
        );
    }
}
