//! Shared application state.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::auth::AuthService;
use crate::store::Storage;

/// State handed to every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Storage>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn Storage>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Auth service over this state's storage.
    #[must_use]
    pub fn auth(&self) -> AuthService {
        AuthService::new(Arc::clone(&self.store))
    }
}
