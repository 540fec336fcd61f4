//! Database migration command.
//!
//! Migration files live in `crates/server/migrations/` and are embedded at
//! compile time, so the binary carries its own schema.

use fashionzone_server::store::create_pool;

use super::{CommandError, database_url};

/// Apply pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = create_pool(&database_url).await?;

    tracing::info!("Applying migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
