//! Response caching.
//!
//! Each handle keeps the last fetched collection and serves it until a
//! mutation invalidates it. Mirrors a query cache keyed per endpoint.

use tokio::sync::RwLock;

/// Cached list of `T`, refreshed on demand.
pub struct Collection<T> {
    cached: RwLock<Option<Vec<T>>>,
}

impl<T: Clone> Collection<T> {
    pub fn new() -> Self {
        Self {
            cached: RwLock::new(None),
        }
    }

    /// The cached value, if any.
    pub async fn get(&self) -> Option<Vec<T>> {
        self.cached.read().await.clone()
    }

    /// Replace the cached value.
    pub async fn fill(&self, items: Vec<T>) {
        *self.cached.write().await = Some(items);
    }

    /// Drop the cached value so the next read refetches.
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }
}

impl<T: Clone> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}
