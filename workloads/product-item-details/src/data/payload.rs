//! Wire format of the catalog service.

use serde::{Deserialize, Deserializer};

/// Product as returned by `GET /products/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPayload {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub title: String,
    pub brand: String,
    pub price: f64,
    pub rating: f64,
    pub description: String,
    pub image_url: String,
    pub availability: String,
    pub total_reviews: u32,
    #[serde(default)]
    pub similar_products: Vec<SimilarProductPayload>,
}

/// Entry of `similar_products`.
#[derive(Debug, Clone, Deserialize)]
pub struct SimilarProductPayload {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub title: String,
    pub brand: String,
    pub price: f64,
    pub image_url: String,
    pub rating: f64,
}

/// The catalog sends ids as strings or as numbers.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_id_becomes_string() {
        let payload: SimilarProductPayload = serde_json::from_value(json!({
            "id": 16,
            "title": "Watch",
            "brand": "Fossil",
            "price": 1200,
            "image_url": "w.png",
            "rating": 4.1
        }))
        .unwrap();
        assert_eq!(payload.id, "16");
        assert_eq!(payload.price, 1200.0);
    }

    #[test]
    fn test_missing_similar_products_defaults_to_empty() {
        let payload: ProductPayload = serde_json::from_value(json!({
            "id": "abc",
            "title": "T",
            "brand": "B",
            "price": 100,
            "rating": 4,
            "description": "d",
            "image_url": "u",
            "availability": "IN STOCK",
            "total_reviews": 10
        }))
        .unwrap();
        assert!(payload.similar_products.is_empty());
    }

    #[test]
    fn test_missing_required_field_is_an_error() {
        let result: Result<ProductPayload, _> = serde_json::from_value(json!({
            "id": "abc",
            "title": "T"
        }));
        assert!(result.is_err());
    }
}
