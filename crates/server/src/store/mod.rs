//! Storage layer: single point of access to persisted entities.
//!
//! One [`Storage`] trait, two backends:
//!
//! - [`MemoryStorage`] - keyed maps behind a mutex, lost on restart
//! - [`PostgresStorage`] - relational tables via sqlx
//!
//! Both backends implement identical merge and ordering semantics: adding an
//! existing `(user, product, size)` cart line increments its quantity,
//! favorites are idempotent on `(user, product)`, and notifications list
//! newest-first. Mutations are immediately visible to subsequent reads; no
//! transaction spans more than one entity write.

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use fashionzone_core::{
    CartItem, CartItemId, CartItemWithProduct, Favorite, FavoriteWithProduct, NewCartItem,
    NewFavorite, NewNotification, NewProduct, NewUser, Notification, NotificationId, Product,
    ProductId, User, UserId, Username,
};

pub use memory::MemoryStorage;
pub use postgres::PostgresStorage;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g. unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A cart item or favorite references a product that no longer exists.
    /// Surfaced as a hard failure by the join reads rather than silently
    /// skipping the row.
    #[error("product not found: {0}")]
    MissingProduct(ProductId),
}

/// CRUD contract over the entity tables.
///
/// Read misses return `Ok(None)` or `Ok(false)`, never an error; errors are
/// reserved for backend faults and broken referential integrity.
#[async_trait]
pub trait Storage: Send + Sync {
    // User operations

    async fn user_by_id(&self, id: UserId) -> Result<Option<User>, StorageError>;
    async fn user_by_username(&self, username: &Username) -> Result<Option<User>, StorageError>;
    /// Insert a user and return the row with its generated id. Username
    /// uniqueness is a schema constraint in the relational backing; callers
    /// are expected to check [`Self::user_by_username`] first.
    async fn create_user(&self, user: NewUser) -> Result<User, StorageError>;

    // Product operations

    async fn products(&self) -> Result<Vec<Product>, StorageError>;
    async fn product_by_id(&self, id: ProductId) -> Result<Option<Product>, StorageError>;
    async fn products_by_category(&self, category: &str) -> Result<Vec<Product>, StorageError>;
    async fn products_by_gender(&self, gender: &str) -> Result<Vec<Product>, StorageError>;
    async fn products_by_category_and_gender(
        &self,
        category: &str,
        gender: &str,
    ) -> Result<Vec<Product>, StorageError>;
    /// Case-insensitive substring match across name, description and
    /// category. Returns an empty list for no matches.
    async fn search_products(&self, query: &str) -> Result<Vec<Product>, StorageError>;
    async fn create_product(&self, product: NewProduct) -> Result<Product, StorageError>;

    // Cart operations

    async fn cart_items(&self, user_id: UserId) -> Result<Vec<CartItem>, StorageError>;
    /// Cart lines joined to their products. A missing referenced product is
    /// a [`StorageError::MissingProduct`] fault, not a filtered skip.
    async fn cart_with_products(
        &self,
        user_id: UserId,
    ) -> Result<Vec<CartItemWithProduct>, StorageError>;
    /// Merge-by-increment: if a row exists for `(user, product, size)`, its
    /// quantity grows by `item.quantity`; otherwise a new row is inserted.
    /// Returns the resulting row either way.
    async fn add_to_cart(&self, item: NewCartItem) -> Result<CartItem, StorageError>;
    /// Overwrite the quantity on the row with this id. `None` if no such row.
    async fn update_cart_item(
        &self,
        id: CartItemId,
        quantity: i32,
    ) -> Result<Option<CartItem>, StorageError>;
    /// Delete by id; `false` if nothing was deleted.
    async fn remove_from_cart(&self, id: CartItemId) -> Result<bool, StorageError>;

    // Favorites operations

    async fn favorites(&self, user_id: UserId) -> Result<Vec<Favorite>, StorageError>;
    async fn favorites_with_products(
        &self,
        user_id: UserId,
    ) -> Result<Vec<FavoriteWithProduct>, StorageError>;
    /// Idempotent add: an existing `(user, product)` row is returned
    /// unchanged.
    async fn add_to_favorites(&self, favorite: NewFavorite) -> Result<Favorite, StorageError>;
    async fn remove_from_favorites(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<bool, StorageError>;

    // Notification operations

    /// All notifications for the user, newest first (descending id).
    async fn notifications(&self, user_id: UserId) -> Result<Vec<Notification>, StorageError>;
    async fn add_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, StorageError>;
    async fn mark_notification_read(
        &self,
        id: NotificationId,
    ) -> Result<Option<Notification>, StorageError>;
    async fn delete_notification(&self, id: NotificationId) -> Result<bool, StorageError>;

    // Helpers used by startup seeding

    /// Whether any users exist.
    async fn has_users(&self) -> Result<bool, StorageError>;
    /// Whether any products exist.
    async fn has_products(&self) -> Result<bool, StorageError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
