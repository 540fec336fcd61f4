//! Cart route handlers.
//!
//! The user id always comes from the session; a body-supplied `userId` is
//! ignored. Line ownership is checked before any mutation by id.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use fashionzone_core::{
    CartItem, CartItemId, CartItemWithProduct, MAX_QUANTITY, NewCartItem, ProductId,
};

use crate::error::AppError;
use crate::middleware::auth::RequireAuth;
use crate::state::AppState;

use super::{parse_body, parse_id};

/// `GET /api/cart`
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<CartItemWithProduct>>, AppError> {
    let items = state.store.cart_with_products(user.id).await?;
    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub size: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

const fn default_quantity() -> i32 {
    1
}

/// `POST /api/cart`
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<CartItem>), AppError> {
    let request: AddToCartRequest = parse_body(body)?;
    let item = NewCartItem {
        user_id: user.id,
        product_id: request.product_id,
        size: request.size,
        quantity: request.quantity,
    };
    item.validate()
        .map_err(|err| AppError::Validation(err.to_string()))?;

    if state.store.product_by_id(item.product_id).await?.is_none() {
        return Err(AppError::NotFound("Product"));
    }

    let row = state.store.add_to_cart(item).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub quantity: i32,
}

/// `PATCH /api/cart/{id}`
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<CartItem>, AppError> {
    let id = CartItemId::new(parse_id(&id)?);
    let request: UpdateCartRequest = parse_body(body)?;
    if request.quantity < 1 {
        return Err(AppError::Validation(
            "Quantity must be at least 1".to_owned(),
        ));
    }
    if request.quantity > MAX_QUANTITY {
        return Err(AppError::Validation(format!(
            "Quantity cannot exceed {MAX_QUANTITY}"
        )));
    }

    // A line belonging to another user is indistinguishable from a missing one.
    if !owns_line(&state, user.id, id).await? {
        return Err(AppError::NotFound("Cart item"));
    }

    let row = state
        .store
        .update_cart_item(id, request.quantity)
        .await?
        .ok_or(AppError::NotFound("Cart item"))?;
    Ok(Json(row))
}

/// `DELETE /api/cart/{id}`
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = CartItemId::new(parse_id(&id)?);

    if !owns_line(&state, user.id, id).await? {
        return Err(AppError::NotFound("Cart item"));
    }

    if state.store.remove_from_cart(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Cart item"))
    }
}

async fn owns_line(
    state: &AppState,
    user_id: fashionzone_core::UserId,
    id: CartItemId,
) -> Result<bool, AppError> {
    let items = state.store.cart_items(user_id).await?;
    Ok(items.iter().any(|item| item.id == id))
}
