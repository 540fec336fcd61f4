//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (storage reachable)
//!
//! # Products (public)
//! GET  /api/products                - Full catalog
//! GET  /api/products/filter         - ?category= and ?gender= narrowing
//! GET  /api/products/search?query=  - Substring search
//! GET  /api/products/{id}           - Product detail
//!
//! # Cart (requires auth)
//! GET    /api/cart                  - Cart lines joined with products
//! POST   /api/cart                  - Add line (merges same product+size)
//! PATCH  /api/cart/{id}             - Overwrite line quantity
//! DELETE /api/cart/{id}             - Remove line
//!
//! # Favorites (requires auth)
//! GET    /api/favorites             - Favorites joined with products
//! POST   /api/favorites             - Add favorite (idempotent)
//! DELETE /api/favorites/{productId} - Remove favorite
//!
//! # Notifications (requires auth)
//! GET    /api/notifications        - Newest first
//! PATCH  /api/notifications/{id}   - Mark read
//! DELETE /api/notifications/{id}   - Delete
//!
//! # Auth
//! POST /api/register                - Create account, starts a session
//! POST /api/login                   - Start a session
//! POST /api/logout                  - End the session
//! GET  /api/user                    - Current user (requires auth)
//! ```

pub mod auth;
pub mod cart;
pub mod favorites;
pub mod notifications;
pub mod products;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::state::AppState;

/// Decode a JSON body into a typed request shape.
///
/// Handlers accept `Json<serde_json::Value>` and decode here so that a shape
/// mismatch becomes a 400 with the decoder's message rather than a 422.
fn parse_body<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, AppError> {
    serde_json::from_value(body).map_err(|err| AppError::Validation(err.to_string()))
}

/// Parse a path segment as a numeric id.
fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.parse::<i32>()
        .map_err(|_| AppError::Validation(format!("Invalid id: {raw}")))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list))
        .route("/filter", get(products::list))
        .route("/search", get(products::search))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::list).post(cart::add))
        .route("/{id}", patch(cart::update).delete(cart::remove))
}

/// Create the favorites routes router.
pub fn favorites_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(favorites::list).post(favorites::add))
        .route("/{productId}", delete(favorites::remove))
}

/// Create the notification routes router.
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::list))
        .route(
            "/{id}",
            patch(notifications::mark_read).delete(notifications::remove),
        )
}

/// Create all `/api` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/favorites", favorites_routes())
        .nest("/notifications", notification_routes())
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/user", get(auth::current_user))
}
