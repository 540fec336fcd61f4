//! Cart item entity.

use serde::{Deserialize, Serialize};

use crate::types::{CartItemId, ProductId, UserId};

use super::{Product, ValidationError};

/// Upper bound for a single cart line's quantity.
///
/// Merging duplicate adds clamps to this value, so line quantities can
/// never overflow no matter how many times a line is re-added.
pub const MAX_QUANTITY: i32 = 99;

/// A line in a user's cart: one `(user, product, size)` tuple with a
/// quantity. The storage layer guarantees at most one row per tuple by
/// merging duplicate adds into the existing row's quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub size: String,
    pub quantity: i32,
}

/// Insert shape for adding to the cart.
///
/// The route layer fills `user_id` from the session; clients never supply it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub size: String,
    pub quantity: i32,
}

impl NewCartItem {
    /// Validate the insert shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the quantity is outside `1..=MAX_QUANTITY` or the
    /// size label is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.quantity < 1 {
            return Err(ValidationError::QuantityTooSmall);
        }
        if self.quantity > MAX_QUANTITY {
            return Err(ValidationError::QuantityTooLarge);
        }
        if self.size.is_empty() {
            return Err(ValidationError::EmptySize);
        }
        Ok(())
    }
}

/// A cart line joined to its product, as returned by `GET /api/cart`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartItemWithProduct {
    #[serde(flatten)]
    pub item: CartItem,
    pub product: Product,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewCartItem {
        NewCartItem {
            user_id: UserId::new(1),
            product_id: ProductId::new(2),
            size: "M".to_owned(),
            quantity: 1,
        }
    }

    #[test]
    fn test_valid_item() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_quantity() {
        let mut item = sample();
        item.quantity = 0;
        assert_eq!(item.validate(), Err(ValidationError::QuantityTooSmall));
    }

    #[test]
    fn test_rejects_negative_quantity() {
        let mut item = sample();
        item.quantity = -3;
        assert_eq!(item.validate(), Err(ValidationError::QuantityTooSmall));
    }

    #[test]
    fn test_rejects_oversized_quantity() {
        let mut item = sample();
        item.quantity = i32::MAX;
        assert_eq!(item.validate(), Err(ValidationError::QuantityTooLarge));
        item.quantity = MAX_QUANTITY;
        assert!(item.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_size() {
        let mut item = sample();
        item.size.clear();
        assert_eq!(item.validate(), Err(ValidationError::EmptySize));
    }

    #[test]
    fn test_join_shape_flattens_item() {
        use crate::types::Price;

        let with_product = CartItemWithProduct {
            item: CartItem {
                id: CartItemId::new(1),
                user_id: UserId::new(1),
                product_id: ProductId::new(2),
                size: "M".to_owned(),
                quantity: 3,
            },
            product: Product {
                id: ProductId::new(2),
                name: "Denim Casual Shirt".to_owned(),
                price: Price::from_cents(4599).expect("price"),
                description: "Classic denim shirt".to_owned(),
                image_url: "https://example.com/shirt.jpg".to_owned(),
                category: "shirts".to_owned(),
                gender: "men".to_owned(),
                available_sizes: vec!["M".to_owned()],
            },
        };
        let json = serde_json::to_value(&with_product).expect("serialize");
        // {...item, product} shape: item fields at the top level
        assert_eq!(json["quantity"], 3);
        assert_eq!(json["product"]["name"], "Denim Casual Shirt");
    }
}
