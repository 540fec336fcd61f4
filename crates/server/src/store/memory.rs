//! In-memory storage backend.
//!
//! Keyed maps with per-entity id counters, guarded by a single mutex. An
//! explicitly constructed object handed to the router via [`crate::state::AppState`],
//! not a module-level singleton. State does not survive a restart.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use fashionzone_core::{
    CartItem, CartItemId, CartItemWithProduct, Favorite, FavoriteId, FavoriteWithProduct,
    MAX_QUANTITY, NewCartItem, NewFavorite, NewNotification, NewProduct, NewUser, Notification,
    NotificationId, Product, ProductId, User, UserId, Username,
};

use super::{Storage, StorageError};

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    products: HashMap<ProductId, Product>,
    cart_items: HashMap<CartItemId, CartItem>,
    favorites: HashMap<FavoriteId, Favorite>,
    notifications: HashMap<NotificationId, Notification>,

    next_user_id: i32,
    next_product_id: i32,
    next_cart_item_id: i32,
    next_favorite_id: i32,
    next_notification_id: i32,
}

impl Tables {
    fn new() -> Self {
        Self {
            next_user_id: 1,
            next_product_id: 1,
            next_cart_item_id: 1,
            next_favorite_id: 1,
            next_notification_id: 1,
            ..Self::default()
        }
    }
}

/// In-memory [`Storage`] implementation.
pub struct MemoryStorage {
    tables: Mutex<Tables>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables::new()),
        }
    }

    // A poisoned mutex means a panic mid-mutation; propagating the panic is
    // the only sound option for an in-process map.
    #[allow(clippy::unwrap_used)]
    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn user_by_id(&self, id: UserId) -> Result<Option<User>, StorageError> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn user_by_username(&self, username: &Username) -> Result<Option<User>, StorageError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|user| &user.username == username)
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        let mut tables = self.lock();
        let id = UserId::new(tables.next_user_id);
        tables.next_user_id += 1;
        let user = User {
            id,
            username: user.username,
            password: user.password,
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn products(&self) -> Result<Vec<Product>, StorageError> {
        let mut products: Vec<Product> = self.lock().products.values().cloned().collect();
        products.sort_by_key(|product| product.id);
        Ok(products)
    }

    async fn product_by_id(&self, id: ProductId) -> Result<Option<Product>, StorageError> {
        Ok(self.lock().products.get(&id).cloned())
    }

    async fn products_by_category(&self, category: &str) -> Result<Vec<Product>, StorageError> {
        let mut products: Vec<Product> = self
            .lock()
            .products
            .values()
            .filter(|product| product.category == category)
            .cloned()
            .collect();
        products.sort_by_key(|product| product.id);
        Ok(products)
    }

    async fn products_by_gender(&self, gender: &str) -> Result<Vec<Product>, StorageError> {
        let mut products: Vec<Product> = self
            .lock()
            .products
            .values()
            .filter(|product| product.gender == gender)
            .cloned()
            .collect();
        products.sort_by_key(|product| product.id);
        Ok(products)
    }

    async fn products_by_category_and_gender(
        &self,
        category: &str,
        gender: &str,
    ) -> Result<Vec<Product>, StorageError> {
        let mut products: Vec<Product> = self
            .lock()
            .products
            .values()
            .filter(|product| product.category == category && product.gender == gender)
            .cloned()
            .collect();
        products.sort_by_key(|product| product.id);
        Ok(products)
    }

    async fn search_products(&self, query: &str) -> Result<Vec<Product>, StorageError> {
        let query = query.to_lowercase();
        let mut products: Vec<Product> = self
            .lock()
            .products
            .values()
            .filter(|product| {
                product.name.to_lowercase().contains(&query)
                    || product.description.to_lowercase().contains(&query)
                    || product.category.to_lowercase().contains(&query)
            })
            .cloned()
            .collect();
        products.sort_by_key(|product| product.id);
        Ok(products)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, StorageError> {
        let mut tables = self.lock();
        let id = ProductId::new(tables.next_product_id);
        tables.next_product_id += 1;
        let product = Product {
            id,
            name: product.name,
            price: product.price,
            description: product.description,
            image_url: product.image_url,
            category: product.category,
            gender: product.gender,
            available_sizes: product.available_sizes,
        };
        tables.products.insert(id, product.clone());
        Ok(product)
    }

    async fn cart_items(&self, user_id: UserId) -> Result<Vec<CartItem>, StorageError> {
        let mut items: Vec<CartItem> = self
            .lock()
            .cart_items
            .values()
            .filter(|item| item.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn cart_with_products(
        &self,
        user_id: UserId,
    ) -> Result<Vec<CartItemWithProduct>, StorageError> {
        let tables = self.lock();
        let mut items: Vec<&CartItem> = tables
            .cart_items
            .values()
            .filter(|item| item.user_id == user_id)
            .collect();
        items.sort_by_key(|item| item.id);

        items
            .into_iter()
            .map(|item| {
                let product = tables
                    .products
                    .get(&item.product_id)
                    .cloned()
                    .ok_or(StorageError::MissingProduct(item.product_id))?;
                Ok(CartItemWithProduct {
                    item: item.clone(),
                    product,
                })
            })
            .collect()
    }

    async fn add_to_cart(&self, item: NewCartItem) -> Result<CartItem, StorageError> {
        let mut tables = self.lock();

        let existing_id = tables
            .cart_items
            .values()
            .find(|row| {
                row.user_id == item.user_id
                    && row.product_id == item.product_id
                    && row.size == item.size
            })
            .map(|row| row.id);

        if let Some(id) = existing_id {
            let row = tables
                .cart_items
                .get_mut(&id)
                .ok_or_else(|| StorageError::DataCorruption("cart row vanished".to_owned()))?;
            row.quantity = row
                .quantity
                .saturating_add(item.quantity)
                .min(MAX_QUANTITY);
            return Ok(row.clone());
        }

        let id = CartItemId::new(tables.next_cart_item_id);
        tables.next_cart_item_id += 1;
        let row = CartItem {
            id,
            user_id: item.user_id,
            product_id: item.product_id,
            size: item.size,
            quantity: item.quantity,
        };
        tables.cart_items.insert(id, row.clone());
        Ok(row)
    }

    async fn update_cart_item(
        &self,
        id: CartItemId,
        quantity: i32,
    ) -> Result<Option<CartItem>, StorageError> {
        let mut tables = self.lock();
        Ok(tables.cart_items.get_mut(&id).map(|row| {
            row.quantity = quantity;
            row.clone()
        }))
    }

    async fn remove_from_cart(&self, id: CartItemId) -> Result<bool, StorageError> {
        Ok(self.lock().cart_items.remove(&id).is_some())
    }

    async fn favorites(&self, user_id: UserId) -> Result<Vec<Favorite>, StorageError> {
        let mut favorites: Vec<Favorite> = self
            .lock()
            .favorites
            .values()
            .filter(|favorite| favorite.user_id == user_id)
            .cloned()
            .collect();
        favorites.sort_by_key(|favorite| favorite.id);
        Ok(favorites)
    }

    async fn favorites_with_products(
        &self,
        user_id: UserId,
    ) -> Result<Vec<FavoriteWithProduct>, StorageError> {
        let tables = self.lock();
        let mut favorites: Vec<&Favorite> = tables
            .favorites
            .values()
            .filter(|favorite| favorite.user_id == user_id)
            .collect();
        favorites.sort_by_key(|favorite| favorite.id);

        favorites
            .into_iter()
            .map(|favorite| {
                let product = tables
                    .products
                    .get(&favorite.product_id)
                    .cloned()
                    .ok_or(StorageError::MissingProduct(favorite.product_id))?;
                Ok(FavoriteWithProduct {
                    favorite: favorite.clone(),
                    product,
                })
            })
            .collect()
    }

    async fn add_to_favorites(&self, favorite: NewFavorite) -> Result<Favorite, StorageError> {
        let mut tables = self.lock();

        if let Some(existing) = tables
            .favorites
            .values()
            .find(|row| row.user_id == favorite.user_id && row.product_id == favorite.product_id)
        {
            return Ok(existing.clone());
        }

        let id = FavoriteId::new(tables.next_favorite_id);
        tables.next_favorite_id += 1;
        let row = Favorite {
            id,
            user_id: favorite.user_id,
            product_id: favorite.product_id,
        };
        tables.favorites.insert(id, row.clone());
        Ok(row)
    }

    async fn remove_from_favorites(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<bool, StorageError> {
        let mut tables = self.lock();
        let id = tables
            .favorites
            .values()
            .find(|row| row.user_id == user_id && row.product_id == product_id)
            .map(|row| row.id);

        Ok(match id {
            Some(id) => tables.favorites.remove(&id).is_some(),
            None => false,
        })
    }

    async fn notifications(&self, user_id: UserId) -> Result<Vec<Notification>, StorageError> {
        let mut notifications: Vec<Notification> = self
            .lock()
            .notifications
            .values()
            .filter(|notification| notification.user_id == user_id)
            .cloned()
            .collect();
        // Newest first
        notifications.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(notifications)
    }

    async fn add_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, StorageError> {
        let mut tables = self.lock();
        let id = NotificationId::new(tables.next_notification_id);
        tables.next_notification_id += 1;
        let row = Notification {
            id,
            user_id: notification.user_id,
            message: notification.message,
            read: notification.read,
        };
        tables.notifications.insert(id, row.clone());
        Ok(row)
    }

    async fn mark_notification_read(
        &self,
        id: NotificationId,
    ) -> Result<Option<Notification>, StorageError> {
        let mut tables = self.lock();
        Ok(tables.notifications.get_mut(&id).map(|row| {
            row.read = true;
            row.clone()
        }))
    }

    async fn delete_notification(&self, id: NotificationId) -> Result<bool, StorageError> {
        Ok(self.lock().notifications.remove(&id).is_some())
    }

    async fn has_users(&self) -> Result<bool, StorageError> {
        Ok(!self.lock().users.is_empty())
    }

    async fn has_products(&self) -> Result<bool, StorageError> {
        Ok(!self.lock().products.is_empty())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fashionzone_core::Price;

    use super::*;

    fn new_product(name: &str, category: &str, gender: &str) -> NewProduct {
        NewProduct {
            name: name.to_owned(),
            price: Price::from_cents(4599).unwrap(),
            description: format!("{name} description"),
            image_url: "https://example.com/image.jpg".to_owned(),
            category: category.to_owned(),
            gender: gender.to_owned(),
            available_sizes: vec!["S".to_owned(), "M".to_owned()],
        }
    }

    fn cart_line(user: i32, product: ProductId, size: &str, quantity: i32) -> NewCartItem {
        NewCartItem {
            user_id: UserId::new(user),
            product_id: product,
            size: size.to_owned(),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_user_ids_start_at_one() {
        let store = MemoryStorage::new();
        let user = store
            .create_user(NewUser {
                username: Username::parse("alice").unwrap(),
                password: "hash.salt".to_owned(),
            })
            .await
            .unwrap();
        assert_eq!(user.id, UserId::new(1));

        let found = store
            .user_by_username(&Username::parse("alice").unwrap())
            .await
            .unwrap();
        assert_eq!(found.unwrap().id, user.id);

        assert!(store.user_by_id(UserId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_to_cart_merges_by_increment() {
        let store = MemoryStorage::new();
        let product = store
            .create_product(new_product("Denim Shirt", "shirts", "men"))
            .await
            .unwrap();

        let first = store
            .add_to_cart(cart_line(1, product.id, "M", 1))
            .await
            .unwrap();
        let second = store
            .add_to_cart(cart_line(1, product.id, "M", 2))
            .await
            .unwrap();

        // One row, quantity q1+q2
        assert_eq!(second.id, first.id);
        assert_eq!(second.quantity, 3);

        let items = store.cart_items(UserId::new(1)).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_add_to_cart_merge_clamps_at_max_quantity() {
        let store = MemoryStorage::new();
        let product = store
            .create_product(new_product("Denim Shirt", "shirts", "men"))
            .await
            .unwrap();

        store
            .add_to_cart(cart_line(1, product.id, "M", i32::MAX))
            .await
            .unwrap();
        let merged = store
            .add_to_cart(cart_line(1, product.id, "M", 2))
            .await
            .unwrap();

        assert_eq!(merged.quantity, MAX_QUANTITY);
    }

    #[tokio::test]
    async fn test_add_to_cart_distinct_sizes_get_distinct_rows() {
        let store = MemoryStorage::new();
        let product = store
            .create_product(new_product("Denim Shirt", "shirts", "men"))
            .await
            .unwrap();

        store
            .add_to_cart(cart_line(1, product.id, "M", 1))
            .await
            .unwrap();
        store
            .add_to_cart(cart_line(1, product.id, "L", 1))
            .await
            .unwrap();

        let items = store.cart_items(UserId::new(1)).await.unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_cart_is_scoped_per_user() {
        let store = MemoryStorage::new();
        let product = store
            .create_product(new_product("Denim Shirt", "shirts", "men"))
            .await
            .unwrap();

        store
            .add_to_cart(cart_line(1, product.id, "M", 1))
            .await
            .unwrap();
        store
            .add_to_cart(cart_line(2, product.id, "M", 5))
            .await
            .unwrap();

        assert_eq!(store.cart_items(UserId::new(1)).await.unwrap().len(), 1);
        assert_eq!(
            store.cart_items(UserId::new(2)).await.unwrap()[0].quantity,
            5
        );
    }

    #[tokio::test]
    async fn test_update_cart_item_overwrites_quantity() {
        let store = MemoryStorage::new();
        let product = store
            .create_product(new_product("Denim Shirt", "shirts", "men"))
            .await
            .unwrap();
        let row = store
            .add_to_cart(cart_line(1, product.id, "M", 1))
            .await
            .unwrap();

        let updated = store.update_cart_item(row.id, 7).await.unwrap().unwrap();
        assert_eq!(updated.quantity, 7);

        assert!(
            store
                .update_cart_item(CartItemId::new(999), 1)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_remove_from_cart() {
        let store = MemoryStorage::new();
        let product = store
            .create_product(new_product("Denim Shirt", "shirts", "men"))
            .await
            .unwrap();
        let row = store
            .add_to_cart(cart_line(1, product.id, "M", 1))
            .await
            .unwrap();

        assert!(store.remove_from_cart(row.id).await.unwrap());
        assert!(!store.remove_from_cart(row.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_cart_join_faults_on_missing_product() {
        let store = MemoryStorage::new();
        store
            .add_to_cart(cart_line(1, ProductId::new(42), "M", 1))
            .await
            .unwrap();

        let err = store.cart_with_products(UserId::new(1)).await.unwrap_err();
        assert!(matches!(err, StorageError::MissingProduct(id) if id == ProductId::new(42)));
    }

    #[tokio::test]
    async fn test_favorites_add_is_idempotent() {
        let store = MemoryStorage::new();
        let product = store
            .create_product(new_product("Biker Jacket", "jackets", "women"))
            .await
            .unwrap();
        let favorite = NewFavorite {
            user_id: UserId::new(1),
            product_id: product.id,
        };

        let first = store.add_to_favorites(favorite.clone()).await.unwrap();
        let second = store.add_to_favorites(favorite).await.unwrap();

        assert_eq!(second, first);
        assert_eq!(store.favorites(UserId::new(1)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_missing_favorite_returns_false() {
        let store = MemoryStorage::new();
        let removed = store
            .remove_from_favorites(UserId::new(1), ProductId::new(9))
            .await
            .unwrap();
        assert!(!removed);
    }

    #[tokio::test]
    async fn test_remove_favorite_by_user_and_product() {
        let store = MemoryStorage::new();
        let product = store
            .create_product(new_product("Biker Jacket", "jackets", "women"))
            .await
            .unwrap();
        store
            .add_to_favorites(NewFavorite {
                user_id: UserId::new(1),
                product_id: product.id,
            })
            .await
            .unwrap();

        assert!(
            store
                .remove_from_favorites(UserId::new(1), product.id)
                .await
                .unwrap()
        );
        assert!(store.favorites(UserId::new(1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_matches_name_description_category() {
        let store = MemoryStorage::new();
        store
            .create_product(new_product("Denim Casual Shirt", "shirts", "men"))
            .await
            .unwrap();
        store
            .create_product(new_product("Wool Coat", "coats", "women"))
            .await
            .unwrap();
        store
            .create_product(new_product("Slim Fit T-Shirt", "tshirts", "men"))
            .await
            .unwrap();

        let results = store.search_products("SHIRT").await.unwrap();
        let names: Vec<&str> = results.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Denim Casual Shirt", "Slim Fit T-Shirt"]);

        assert!(store.search_products("sneaker").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_filter_combines_category_and_gender() {
        let store = MemoryStorage::new();
        store
            .create_product(new_product("High Waist Jeans", "pants", "women"))
            .await
            .unwrap();
        store
            .create_product(new_product("Chino Pants", "pants", "men"))
            .await
            .unwrap();
        store
            .create_product(new_product("Denim Shirt", "shirts", "men"))
            .await
            .unwrap();

        let results = store
            .products_by_category_and_gender("pants", "men")
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Chino Pants");
    }

    #[tokio::test]
    async fn test_notifications_newest_first() {
        let store = MemoryStorage::new();
        for message in ["first", "second", "third"] {
            store
                .add_notification(NewNotification {
                    user_id: UserId::new(1),
                    message: message.to_owned(),
                    read: false,
                })
                .await
                .unwrap();
        }

        let list = store.notifications(UserId::new(1)).await.unwrap();
        let messages: Vec<&str> = list.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_mark_notification_read() {
        let store = MemoryStorage::new();
        let row = store
            .add_notification(NewNotification {
                user_id: UserId::new(1),
                message: "Welcome!".to_owned(),
                read: false,
            })
            .await
            .unwrap();

        let updated = store
            .mark_notification_read(row.id)
            .await
            .unwrap()
            .unwrap();
        assert!(updated.read);

        assert!(
            store
                .mark_notification_read(NotificationId::new(99))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_delete_notification() {
        let store = MemoryStorage::new();
        let row = store
            .add_notification(NewNotification {
                user_id: UserId::new(1),
                message: "Welcome!".to_owned(),
                read: false,
            })
            .await
            .unwrap();

        assert!(store.delete_notification(row.id).await.unwrap());
        assert!(!store.delete_notification(row.id).await.unwrap());
    }
}
