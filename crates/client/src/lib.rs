//! Typed client for the FashionZone API.
//!
//! [`ApiClient`] wraps a cookie-holding `reqwest` client, so `login` and
//! `register` leave a session behind and every later call rides on it. The
//! handle types ([`CartHandle`], [`FavoritesHandle`], [`NotificationsHandle`])
//! add a per-endpoint response cache that mutations invalidate.
//!
//! ```rust,ignore
//! let client = Arc::new(ApiClient::new("http://localhost:5000")?);
//! client.login("demo", "password123").await?;
//!
//! let cart = CartHandle::new(Arc::clone(&client));
//! cart.add(ProductId::new(1), "M", 2).await?;
//! println!("{} items", cart.count().await?);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cache;
pub mod cart;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod notifications;

pub use cart::CartHandle;
pub use error::ClientError;
pub use favorites::FavoritesHandle;
pub use filter::{FilterState, SortBy};
pub use notifications::NotificationsHandle;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

use fashionzone_core::{
    CartItem, CartItemId, CartItemWithProduct, Favorite, FavoriteWithProduct, Notification,
    NotificationId, Product, ProductId, User,
};

/// HTTP client for the FashionZone API. Holds the session cookie.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against `base_url` (e.g. `http://localhost:5000`).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body["message"].as_str().map(str::to_owned))
            .unwrap_or_else(|| status.to_string());
        tracing::debug!(%status, message, "api request rejected");
        Err(ClientError::Api { status, message })
    }

    // --- auth ---

    /// Create an account. The new session is kept in the cookie store.
    ///
    /// # Errors
    ///
    /// Propagates transport and API failures.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, ClientError> {
        let response = self
            .http
            .post(self.url("/api/register"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Log in. The session is kept in the cookie store.
    ///
    /// # Errors
    ///
    /// [`ClientError::Unauthorized`] on bad credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ClientError> {
        let response = self
            .http
            .post(self.url("/api/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;
        Self::decode(response).await
    }

    /// End the session.
    ///
    /// # Errors
    ///
    /// Propagates transport and API failures.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self.http.post(self.url("/api/logout")).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// The logged-in user.
    ///
    /// # Errors
    ///
    /// [`ClientError::Unauthorized`] without a live session.
    pub async fn current_user(&self) -> Result<User, ClientError> {
        let response = self.http.get(self.url("/api/user")).send().await?;
        Self::decode(response).await
    }

    // --- products ---

    /// List products, optionally narrowed by category and gender.
    ///
    /// # Errors
    ///
    /// Propagates transport and API failures.
    pub async fn products(
        &self,
        category: Option<&str>,
        gender: Option<&str>,
    ) -> Result<Vec<Product>, ClientError> {
        let mut request = self.http.get(self.url("/api/products/filter"));
        if let Some(category) = category {
            request = request.query(&[("category", category)]);
        }
        if let Some(gender) = gender {
            request = request.query(&[("gender", gender)]);
        }
        Self::decode(request.send().await?).await
    }

    /// Substring search over name, description, and category.
    ///
    /// # Errors
    ///
    /// Propagates transport and API failures.
    pub async fn search_products(&self, query: &str) -> Result<Vec<Product>, ClientError> {
        let response = self
            .http
            .get(self.url("/api/products/search"))
            .query(&[("query", query)])
            .send()
            .await?;
        Self::decode(response).await
    }

    /// A single product.
    ///
    /// # Errors
    ///
    /// `ClientError::Api` with status 404 for an unknown id.
    pub async fn product(&self, id: ProductId) -> Result<Product, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/api/products/{id}")))
            .send()
            .await?;
        Self::decode(response).await
    }

    // --- cart ---

    pub(crate) async fn cart(&self) -> Result<Vec<CartItemWithProduct>, ClientError> {
        let response = self.http.get(self.url("/api/cart")).send().await?;
        Self::decode(response).await
    }

    pub(crate) async fn add_to_cart(
        &self,
        product_id: ProductId,
        size: &str,
        quantity: i32,
    ) -> Result<CartItem, ClientError> {
        let response = self
            .http
            .post(self.url("/api/cart"))
            .json(&json!({ "productId": product_id, "size": size, "quantity": quantity }))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub(crate) async fn update_cart_item(
        &self,
        id: CartItemId,
        quantity: i32,
    ) -> Result<CartItem, ClientError> {
        let response = self
            .http
            .patch(self.url(&format!("/api/cart/{id}")))
            .json(&json!({ "quantity": quantity }))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub(crate) async fn remove_from_cart(&self, id: CartItemId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/cart/{id}")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    // --- favorites ---

    pub(crate) async fn favorites(&self) -> Result<Vec<FavoriteWithProduct>, ClientError> {
        let response = self.http.get(self.url("/api/favorites")).send().await?;
        Self::decode(response).await
    }

    pub(crate) async fn add_favorite(&self, product_id: ProductId) -> Result<Favorite, ClientError> {
        let response = self
            .http
            .post(self.url("/api/favorites"))
            .json(&json!({ "productId": product_id }))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub(crate) async fn remove_favorite(&self, product_id: ProductId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/favorites/{product_id}")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    // --- notifications ---

    pub(crate) async fn notifications(&self) -> Result<Vec<Notification>, ClientError> {
        let response = self.http.get(self.url("/api/notifications")).send().await?;
        Self::decode(response).await
    }

    pub(crate) async fn mark_notification_read(
        &self,
        id: NotificationId,
    ) -> Result<Notification, ClientError> {
        let response = self
            .http
            .patch(self.url(&format!("/api/notifications/{id}")))
            .json(&json!({ "read": true }))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub(crate) async fn delete_notification(&self, id: NotificationId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/notifications/{id}")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.url("/api/products"), "http://localhost:5000/api/products");
    }
}
