//! Favorite entity.

use serde::{Deserialize, Serialize};

use crate::types::{FavoriteId, ProductId, UserId};

use super::Product;

/// A `(user, product)` favorite marker. Adding an existing pair is a no-op
/// returning the original row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Favorite {
    pub id: FavoriteId,
    pub user_id: UserId,
    pub product_id: ProductId,
}

/// Insert shape for a favorite. `user_id` comes from the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFavorite {
    pub user_id: UserId,
    pub product_id: ProductId,
}

/// A favorite joined to its product, as returned by `GET /api/favorites`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoriteWithProduct {
    #[serde(flatten)]
    pub favorite: Favorite,
    pub product: Product,
}
