//! Session payload.

use serde::{Deserialize, Serialize};

use fashionzone_core::{UserId, Username};

/// Session key for the logged-in user.
pub const CURRENT_USER_KEY: &str = "current_user";

/// What a live session knows about its user. Stored server-side; the cookie
/// only carries the opaque session id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: Username,
}

impl From<&fashionzone_core::User> for CurrentUser {
    fn from(user: &fashionzone_core::User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}
