//! Product data models.

use serde::{Deserialize, Serialize};

use super::payload::{ProductPayload, SimilarProductPayload};

/// Normalized product record shown on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    pub id: String,
    pub title: String,
    pub brand: String,
    pub price: f64,
    pub rating: f64,
    pub description: String,
    pub image_url: String,
    pub availability: String,
    pub total_reviews: u32,
    pub similar_products: Vec<SimilarProduct>,
}

/// Reduced projection of a catalog product, for the similar-products list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarProduct {
    pub id: String,
    pub title: String,
    pub brand: String,
    pub price: f64,
    pub image_url: String,
    pub rating: f64,
}

impl From<SimilarProductPayload> for SimilarProduct {
    fn from(p: SimilarProductPayload) -> Self {
        Self {
            id: p.id,
            title: p.title,
            brand: p.brand,
            price: p.price,
            image_url: p.image_url,
            rating: p.rating,
        }
    }
}

impl From<ProductPayload> for ProductDetails {
    fn from(p: ProductPayload) -> Self {
        Self {
            id: p.id,
            title: p.title,
            brand: p.brand,
            price: p.price,
            rating: p.rating,
            description: p.description,
            image_url: p.image_url,
            availability: p.availability,
            total_reviews: p.total_reviews,
            similar_products: p.similar_products.into_iter().map(Into::into).collect(),
        }
    }
}
