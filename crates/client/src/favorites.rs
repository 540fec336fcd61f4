//! Favorites handle.

use std::sync::Arc;

use fashionzone_core::{FavoriteWithProduct, ProductId};

use crate::cache::Collection;
use crate::error::ClientError;
use crate::ApiClient;

/// Cached view of the logged-in user's favorites, with a toggle API shaped
/// for a "heart" button.
pub struct FavoritesHandle {
    client: Arc<ApiClient>,
    cache: Collection<FavoriteWithProduct>,
}

impl FavoritesHandle {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            cache: Collection::new(),
        }
    }

    /// Favorites with product details, cached until a mutation.
    ///
    /// # Errors
    ///
    /// Propagates transport and API failures.
    pub async fn items(&self) -> Result<Vec<FavoriteWithProduct>, ClientError> {
        if let Some(items) = self.cache.get().await {
            return Ok(items);
        }
        let items = self.client.favorites().await?;
        self.cache.fill(items.clone()).await;
        Ok(items)
    }

    /// Whether the product is currently favorited.
    ///
    /// # Errors
    ///
    /// Propagates transport and API failures.
    pub async fn is_favorite(&self, product_id: ProductId) -> Result<bool, ClientError> {
        let items = self.items().await?;
        Ok(items.iter().any(|f| f.favorite.product_id == product_id))
    }

    /// Flip the favorite state of a product. Returns the new state.
    ///
    /// # Errors
    ///
    /// Propagates transport and API failures.
    pub async fn toggle(&self, product_id: ProductId) -> Result<bool, ClientError> {
        let now_favorite = if self.is_favorite(product_id).await? {
            self.client.remove_favorite(product_id).await?;
            false
        } else {
            self.client.add_favorite(product_id).await?;
            true
        };
        self.cache.invalidate().await;
        Ok(now_favorite)
    }
}
