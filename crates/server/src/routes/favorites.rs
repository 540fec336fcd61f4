//! Favorites route handlers.
//!
//! Removal is keyed by product id rather than favorite row id, which is what
//! a "toggle heart" client naturally holds.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use fashionzone_core::{Favorite, FavoriteWithProduct, NewFavorite, ProductId};

use crate::error::AppError;
use crate::middleware::auth::RequireAuth;
use crate::state::AppState;

use super::{parse_body, parse_id};

/// `GET /api/favorites`
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<FavoriteWithProduct>>, AppError> {
    let favorites = state.store.favorites_with_products(user.id).await?;
    Ok(Json(favorites))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    pub product_id: ProductId,
}

/// `POST /api/favorites`
///
/// Adding an already-favorited product returns the existing row.
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Favorite>), AppError> {
    let request: AddFavoriteRequest = parse_body(body)?;

    if state
        .store
        .product_by_id(request.product_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Product"));
    }

    let row = state
        .store
        .add_to_favorites(NewFavorite {
            user_id: user.id,
            product_id: request.product_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// `DELETE /api/favorites/{productId}`
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(product_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let product_id = ProductId::new(parse_id(&product_id)?);
    if state.store.remove_from_favorites(user.id, product_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Favorite"))
    }
}
