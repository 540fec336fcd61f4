pub mod migrate;
pub mod seed;

use secrecy::SecretString;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Missing environment variable: set FZ_DATABASE_URL or DATABASE_URL")]
    MissingDatabaseUrl,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Seed error: {0}")]
    Seed(#[from] fashionzone_server::seed::SeedError),
}

/// Resolve the database URL from the environment.
pub fn database_url() -> Result<SecretString, CommandError> {
    dotenvy::dotenv().ok();

    std::env::var("FZ_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingDatabaseUrl)
}
