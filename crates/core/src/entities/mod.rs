//! Entity schema shared by the server's storage layer and the client.
//!
//! Each entity has a row type (with its generated id) and a `New*` insert
//! shape. Insert shapes carry the validation the route layer applies before
//! anything reaches storage. JSON field names are camelCase on the wire
//! (`userId`, `productId`, `imageUrl`, `availableSizes`).

pub mod cart;
pub mod favorite;
pub mod notification;
pub mod product;
pub mod user;

pub use cart::{CartItem, CartItemWithProduct, MAX_QUANTITY, NewCartItem};
pub use favorite::{Favorite, FavoriteWithProduct, NewFavorite};
pub use notification::{NewNotification, Notification};
pub use product::{NewProduct, Product};
pub use user::{NewUser, User};

/// Errors produced by insert-shape validation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Cart quantity below the minimum of 1.
    #[error("quantity must be at least 1")]
    QuantityTooSmall,
    /// Cart quantity above the per-line maximum.
    #[error("quantity cannot exceed {}", cart::MAX_QUANTITY)]
    QuantityTooLarge,
    /// Cart item size label is empty.
    #[error("size cannot be empty")]
    EmptySize,
    /// Product has no available sizes.
    #[error("availableSizes cannot be empty")]
    NoSizes,
    /// Product name is empty.
    #[error("name cannot be empty")]
    EmptyName,
    /// Notification message is empty.
    #[error("message cannot be empty")]
    EmptyMessage,
    /// Password is empty.
    #[error("password cannot be empty")]
    EmptyPassword,
}
