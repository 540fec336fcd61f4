//! Cart handle.

use std::sync::Arc;

use fashionzone_core::{CartItem, CartItemId, CartItemWithProduct, ProductId};

use crate::cache::Collection;
use crate::error::ClientError;
use crate::ApiClient;

/// Cached view of the logged-in user's cart.
pub struct CartHandle {
    client: Arc<ApiClient>,
    cache: Collection<CartItemWithProduct>,
}

impl CartHandle {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            cache: Collection::new(),
        }
    }

    /// Cart lines with product details, cached until a mutation.
    ///
    /// # Errors
    ///
    /// Propagates transport and API failures.
    pub async fn items(&self) -> Result<Vec<CartItemWithProduct>, ClientError> {
        if let Some(items) = self.cache.get().await {
            return Ok(items);
        }
        let items = self.client.cart().await?;
        self.cache.fill(items.clone()).await;
        Ok(items)
    }

    /// Add a line. The server merges lines with the same product and size.
    ///
    /// # Errors
    ///
    /// Propagates transport and API failures.
    pub async fn add(
        &self,
        product_id: ProductId,
        size: &str,
        quantity: i32,
    ) -> Result<CartItem, ClientError> {
        let item = self.client.add_to_cart(product_id, size, quantity).await?;
        self.cache.invalidate().await;
        Ok(item)
    }

    /// Overwrite a line's quantity.
    ///
    /// # Errors
    ///
    /// Propagates transport and API failures.
    pub async fn update_quantity(
        &self,
        id: CartItemId,
        quantity: i32,
    ) -> Result<CartItem, ClientError> {
        let item = self.client.update_cart_item(id, quantity).await?;
        self.cache.invalidate().await;
        Ok(item)
    }

    /// Remove a line.
    ///
    /// # Errors
    ///
    /// Propagates transport and API failures.
    pub async fn remove(&self, id: CartItemId) -> Result<(), ClientError> {
        self.client.remove_from_cart(id).await?;
        self.cache.invalidate().await;
        Ok(())
    }

    /// Total number of units across all lines.
    ///
    /// # Errors
    ///
    /// Propagates transport and API failures.
    pub async fn count(&self) -> Result<i64, ClientError> {
        let items = self.items().await?;
        Ok(items.iter().map(|line| i64::from(line.item.quantity)).sum())
    }

    /// Subtotal in minor currency units.
    ///
    /// # Errors
    ///
    /// Propagates transport and API failures.
    pub async fn subtotal_cents(&self) -> Result<i64, ClientError> {
        let items = self.items().await?;
        Ok(items
            .iter()
            .map(|line| i64::from(line.product.price.as_cents()) * i64::from(line.item.quantity))
            .sum())
    }
}
