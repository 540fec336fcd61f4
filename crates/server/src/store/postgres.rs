//! Postgres storage backend.
//!
//! Runtime-checked queries over a shared [`PgPool`]. Schema lives in the
//! crate's `migrations/` directory and is applied by the companion CLI.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use fashionzone_core::{
    CartItem, CartItemId, CartItemWithProduct, Favorite, FavoriteWithProduct, MAX_QUANTITY,
    NewCartItem, NewFavorite, NewNotification, NewProduct, NewUser, Notification, NotificationId,
    Price, Product, ProductId, User, UserId, Username,
};

use super::{Storage, StorageError};

/// Postgres-backed [`Storage`] implementation.
pub struct PostgresStorage {
    pool: PgPool,
}

impl PostgresStorage {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for readiness probes.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// `products.available_sizes` is JSONB, so the row shape differs from the
/// wire shape and gets mapped explicitly.
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    price: Price,
    description: String,
    image_url: String,
    category: String,
    gender: String,
    available_sizes: Json<Vec<String>>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            description: row.description,
            image_url: row.image_url,
            category: row.category,
            gender: row.gender,
            available_sizes: row.available_sizes.0,
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

const PRODUCT_COLUMNS: &str =
    "id, name, price, description, image_url, category, gender, available_sizes";

#[async_trait]
impl Storage for PostgresStorage {
    async fn user_by_id(&self, id: UserId) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn user_by_username(&self, username: &Username) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        let created = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password) VALUES ($1, $2)
             RETURNING id, username, password",
        )
        .bind(&user.username)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                StorageError::Conflict(format!("username {} already taken", user.username))
            } else {
                StorageError::Database(err)
            }
        })?;
        Ok(created)
    }

    async fn products(&self) -> Result<Vec<Product>, StorageError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn product_by_id(&self, id: ProductId) -> Result<Option<Product>, StorageError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Product::from))
    }

    async fn products_by_category(&self, category: &str) -> Result<Vec<Product>, StorageError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE category = $1 ORDER BY id"
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn products_by_gender(&self, gender: &str) -> Result<Vec<Product>, StorageError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE gender = $1 ORDER BY id"
        ))
        .bind(gender)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn products_by_category_and_gender(
        &self,
        category: &str,
        gender: &str,
    ) -> Result<Vec<Product>, StorageError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE category = $1 AND gender = $2 ORDER BY id"
        ))
        .bind(category)
        .bind(gender)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn search_products(&self, query: &str) -> Result<Vec<Product>, StorageError> {
        let pattern = format!("%{}%", query.to_lowercase());
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products
             WHERE lower(name) LIKE $1
                OR lower(description) LIKE $1
                OR lower(category) LIKE $1
             ORDER BY id"
        ))
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, StorageError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO products (name, price, description, image_url, category, gender, available_sizes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.image_url)
        .bind(&product.category)
        .bind(&product.gender)
        .bind(Json(&product.available_sizes))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn cart_items(&self, user_id: UserId) -> Result<Vec<CartItem>, StorageError> {
        let items = sqlx::query_as::<_, CartItem>(
            "SELECT id, user_id, product_id, size, quantity
             FROM cart_items WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn cart_with_products(
        &self,
        user_id: UserId,
    ) -> Result<Vec<CartItemWithProduct>, StorageError> {
        let items = self.cart_items(user_id).await?;
        let mut joined = Vec::with_capacity(items.len());
        for item in items {
            let product = self
                .product_by_id(item.product_id)
                .await?
                .ok_or(StorageError::MissingProduct(item.product_id))?;
            joined.push(CartItemWithProduct { item, product });
        }
        Ok(joined)
    }

    async fn add_to_cart(&self, item: NewCartItem) -> Result<CartItem, StorageError> {
        // Same line item again merges by incrementing the quantity, clamped
        // to MAX_QUANTITY. The bigint cast keeps the sum from overflowing.
        let row = sqlx::query_as::<_, CartItem>(
            "INSERT INTO cart_items (user_id, product_id, size, quantity)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id, product_id, size)
             DO UPDATE SET quantity =
                 LEAST(cart_items.quantity::bigint + EXCLUDED.quantity, $5)::int
             RETURNING id, user_id, product_id, size, quantity",
        )
        .bind(item.user_id)
        .bind(item.product_id)
        .bind(&item.size)
        .bind(item.quantity)
        .bind(MAX_QUANTITY)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_cart_item(
        &self,
        id: CartItemId,
        quantity: i32,
    ) -> Result<Option<CartItem>, StorageError> {
        let row = sqlx::query_as::<_, CartItem>(
            "UPDATE cart_items SET quantity = $2 WHERE id = $1
             RETURNING id, user_id, product_id, size, quantity",
        )
        .bind(id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn remove_from_cart(&self, id: CartItemId) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn favorites(&self, user_id: UserId) -> Result<Vec<Favorite>, StorageError> {
        let favorites = sqlx::query_as::<_, Favorite>(
            "SELECT id, user_id, product_id FROM favorites WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(favorites)
    }

    async fn favorites_with_products(
        &self,
        user_id: UserId,
    ) -> Result<Vec<FavoriteWithProduct>, StorageError> {
        let favorites = self.favorites(user_id).await?;
        let mut joined = Vec::with_capacity(favorites.len());
        for favorite in favorites {
            let product = self
                .product_by_id(favorite.product_id)
                .await?
                .ok_or(StorageError::MissingProduct(favorite.product_id))?;
            joined.push(FavoriteWithProduct { favorite, product });
        }
        Ok(joined)
    }

    async fn add_to_favorites(&self, favorite: NewFavorite) -> Result<Favorite, StorageError> {
        // Idempotent. ON CONFLICT DO NOTHING returns no row, so a second
        // query fetches the existing one.
        let row = sqlx::query_as::<_, Favorite>(
            "INSERT INTO favorites (user_id, product_id)
             VALUES ($1, $2)
             ON CONFLICT (user_id, product_id) DO NOTHING
             RETURNING id, user_id, product_id",
        )
        .bind(favorite.user_id)
        .bind(favorite.product_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            return Ok(row);
        }
        let existing = sqlx::query_as::<_, Favorite>(
            "SELECT id, user_id, product_id FROM favorites
             WHERE user_id = $1 AND product_id = $2",
        )
        .bind(favorite.user_id)
        .bind(favorite.product_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(existing)
    }

    async fn remove_from_favorites(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND product_id = $2")
            .bind(user_id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn notifications(&self, user_id: UserId) -> Result<Vec<Notification>, StorageError> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT id, user_id, message, read FROM notifications
             WHERE user_id = $1 ORDER BY id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(notifications)
    }

    async fn add_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, StorageError> {
        let row = sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (user_id, message, read)
             VALUES ($1, $2, $3)
             RETURNING id, user_id, message, read",
        )
        .bind(notification.user_id)
        .bind(&notification.message)
        .bind(notification.read)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn mark_notification_read(
        &self,
        id: NotificationId,
    ) -> Result<Option<Notification>, StorageError> {
        let row = sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET read = TRUE WHERE id = $1
             RETURNING id, user_id, message, read",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_notification(&self, id: NotificationId) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn has_users(&self) -> Result<bool, StorageError> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users)")
            .fetch_one(&self.pool)
            .await?;
        Ok(exists.0)
    }

    async fn has_products(&self) -> Result<bool, StorageError> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM products)")
            .fetch_one(&self.pool)
            .await?;
        Ok(exists.0)
    }
}
