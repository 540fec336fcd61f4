//! Product entity.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

use super::ValidationError;

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Price in minor currency units (cents).
    pub price: Price,
    pub description: String,
    pub image_url: String,
    pub category: String,
    pub gender: String,
    /// Ordered size labels, e.g. `["S", "M", "L"]` or `["40", "41"]`.
    pub available_sizes: Vec<String>,
}

/// Insert shape for a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub description: String,
    pub image_url: String,
    pub category: String,
    pub gender: String,
    pub available_sizes: Vec<String>,
}

impl NewProduct {
    /// Validate the insert shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or no sizes are listed.
    /// Non-negative price is guaranteed by [`Price`]'s construction.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.available_sizes.is_empty() {
            return Err(ValidationError::NoSizes);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewProduct {
        NewProduct {
            name: "Slim Fit T-Shirt".to_owned(),
            price: Price::from_cents(2499).expect("price"),
            description: "Comfortable slim fit t-shirt".to_owned(),
            image_url: "https://example.com/tshirt.jpg".to_owned(),
            category: "tshirts".to_owned(),
            gender: "men".to_owned(),
            available_sizes: vec!["S".to_owned(), "M".to_owned(), "L".to_owned()],
        }
    }

    #[test]
    fn test_valid_product() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_sizes() {
        let mut product = sample();
        product.available_sizes.clear();
        assert_eq!(product.validate(), Err(ValidationError::NoSizes));
    }

    #[test]
    fn test_camel_case_wire_format() {
        let product = Product {
            id: ProductId::new(1),
            name: "Coat".to_owned(),
            price: Price::from_cents(11999).expect("price"),
            description: "Warm wool coat".to_owned(),
            image_url: "https://example.com/coat.jpg".to_owned(),
            category: "coats".to_owned(),
            gender: "women".to_owned(),
            available_sizes: vec!["M".to_owned()],
        };
        let json = serde_json::to_value(&product).expect("serialize");
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("availableSizes").is_some());
        assert!(json.get("image_url").is_none());
    }
}
