//! Core type definitions.

pub mod id;
pub mod price;
pub mod username;

pub use id::{CartItemId, FavoriteId, NotificationId, ProductId, UserId};
pub use price::{Price, PriceError};
pub use username::{Username, UsernameError};
