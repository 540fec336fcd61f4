//! Notifications handle.

use std::sync::Arc;

use fashionzone_core::{Notification, NotificationId};

use crate::cache::Collection;
use crate::error::ClientError;
use crate::ApiClient;

/// Cached view of the logged-in user's notifications, newest first.
pub struct NotificationsHandle {
    client: Arc<ApiClient>,
    cache: Collection<Notification>,
}

impl NotificationsHandle {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            cache: Collection::new(),
        }
    }

    /// Notifications, newest first, cached until a mutation.
    ///
    /// # Errors
    ///
    /// Propagates transport and API failures.
    pub async fn items(&self) -> Result<Vec<Notification>, ClientError> {
        if let Some(items) = self.cache.get().await {
            return Ok(items);
        }
        let items = self.client.notifications().await?;
        self.cache.fill(items.clone()).await;
        Ok(items)
    }

    /// Number of unread notifications, for a badge.
    ///
    /// # Errors
    ///
    /// Propagates transport and API failures.
    pub async fn unread_count(&self) -> Result<usize, ClientError> {
        let items = self.items().await?;
        Ok(items.iter().filter(|n| !n.read).count())
    }

    /// Mark one notification read.
    ///
    /// # Errors
    ///
    /// Propagates transport and API failures.
    pub async fn mark_read(&self, id: NotificationId) -> Result<Notification, ClientError> {
        let updated = self.client.mark_notification_read(id).await?;
        self.cache.invalidate().await;
        Ok(updated)
    }

    /// Delete one notification.
    ///
    /// # Errors
    ///
    /// Propagates transport and API failures.
    pub async fn delete(&self, id: NotificationId) -> Result<(), ClientError> {
        self.client.delete_notification(id).await?;
        self.cache.invalidate().await;
        Ok(())
    }
}
