//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `FZ_HOST` - Bind address (default: 127.0.0.1)
//! - `FZ_PORT` - Listen port (default: 5000)
//! - `FZ_BASE_URL` - Public URL (default: `http://localhost:5000`); an
//!   `https://` base URL makes session cookies Secure
//! - `FZ_STORE_BACKEND` - `memory` or `postgres` (default: memory)
//!
//! ## Required for the postgres backend
//! - `FZ_DATABASE_URL` - `PostgreSQL` connection string (falls back to the
//!   generic `DATABASE_URL`)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which storage backend to construct at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// In-memory maps, lost on restart. The default for development.
    #[default]
    Memory,
    /// `PostgreSQL` via sqlx.
    Postgres,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(Self::Memory),
            "postgres" => Ok(Self::Postgres),
            other => Err(format!("unknown backend '{other}' (expected 'memory' or 'postgres')")),
        }
    }
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL
    pub base_url: String,
    /// Storage backend selection
    pub store_backend: StoreBackend,
    /// `PostgreSQL` connection URL (contains password); only present when the
    /// postgres backend is selected
    pub database_url: Option<SecretString>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed, or if the postgres
    /// backend is selected without a database URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("FZ_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("FZ_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("FZ_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("FZ_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("FZ_BASE_URL", "http://localhost:5000");
        let store_backend = get_env_or_default("FZ_STORE_BACKEND", "memory")
            .parse::<StoreBackend>()
            .map_err(|e| ConfigError::InvalidEnvVar("FZ_STORE_BACKEND".to_string(), e))?;

        let database_url = get_database_url();
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingEnvVar("FZ_DATABASE_URL".to_string()));
        }

        Ok(Self {
            host,
            port,
            base_url,
            store_backend,
            database_url,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies should carry the Secure flag.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url() -> Option<SecretString> {
    std::env::var("FZ_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .map(SecretString::from)
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_from_str() {
        assert_eq!("memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert_eq!(
            "postgres".parse::<StoreBackend>().unwrap(),
            StoreBackend::Postgres
        );
        assert!("sqlite".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            store_backend: StoreBackend::Memory,
            database_url: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_secure_from_base_url() {
        let mut config = AppConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            store_backend: StoreBackend::Memory,
            database_url: None,
        };
        assert!(!config.is_secure());

        config.base_url = "https://shop.example.com".to_string();
        assert!(config.is_secure());
    }
}
