//! End-to-end tests for FashionZone.
//!
//! These tests hit a running server and are `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the API (memory backend seeds itself)
//! cargo run -p fashionzone-server
//!
//! # Run the ignored end-to-end tests
//! cargo test -p fashionzone-integration-tests -- --ignored
//! ```
//!
//! Point `FZ_TEST_BASE_URL` at a different instance if the server is not on
//! the default port.

use std::sync::Arc;

use fashionzone_client::ApiClient;

/// Base URL of the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("FZ_TEST_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_owned())
}

/// Shared context for a test run: one cookie-holding client.
pub struct TestContext {
    pub client: Arc<ApiClient>,
}

impl TestContext {
    /// Build a context against the configured server.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed.
    #[must_use]
    pub fn new() -> Self {
        let client = ApiClient::new(base_url()).expect("build client");
        Self {
            client: Arc::new(client),
        }
    }

    /// Register a throwaway account with a unique username and leave the
    /// session on this context's client.
    ///
    /// # Panics
    ///
    /// Panics if registration fails.
    pub async fn register_fresh_account(&self) -> String {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let username = format!("e2e_{nanos}");
        self.client
            .register(&username, "hunter2")
            .await
            .expect("register");
        username
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
