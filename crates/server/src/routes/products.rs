//! Product route handlers. All public, no session required.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use fashionzone_core::{Product, ProductId};

use crate::error::AppError;
use crate::state::AppState;

use super::parse_id;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub gender: Option<String>,
}

/// `GET /api/products` and `GET /api/products/filter`
///
/// Both filters present narrows by both, one narrows by it alone, neither
/// returns the full catalog.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = match (params.category.as_deref(), params.gender.as_deref()) {
        (Some(category), Some(gender)) => {
            state
                .store
                .products_by_category_and_gender(category, gender)
                .await?
        }
        (Some(category), None) => state.store.products_by_category(category).await?,
        (None, Some(gender)) => state.store.products_by_gender(gender).await?,
        (None, None) => state.store.products().await?,
    };
    Ok(Json(products))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// `GET /api/products/search?query=`
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Product>>, AppError> {
    let query = params
        .query
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::Validation("Search query is required".to_owned()))?;
    let products = state.store.search_products(&query).await?;
    Ok(Json(products))
}

/// `GET /api/products/{id}`
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    let id = ProductId::new(parse_id(&id)?);
    let product = state
        .store
        .product_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Product"))?;
    Ok(Json(product))
}
