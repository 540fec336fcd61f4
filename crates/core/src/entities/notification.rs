//! Notification entity.

use serde::{Deserialize, Serialize};

use crate::types::{NotificationId, UserId};

use super::ValidationError;

/// A message for a user. `read` starts false and flips via an explicit
/// mark-as-read operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub message: String,
    pub read: bool,
}

/// Insert shape for a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub user_id: UserId,
    pub message: String,
    #[serde(default)]
    pub read: bool,
}

impl NewNotification {
    /// Validate the insert shape.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyMessage`] if the message is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.message.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        Ok(())
    }
}
