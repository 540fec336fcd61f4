//! Database seed command.
//!
//! Inserts the demo catalog and account through the same seeding path the
//! server uses for the memory backend. Safe to re-run; existing data is
//! left alone.

use fashionzone_server::seed::seed_if_empty;
use fashionzone_server::store::{PostgresStorage, create_pool};

use super::{CommandError, database_url};

/// Seed the demo catalog and account if the database is empty.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = create_pool(&database_url).await?;

    let store = PostgresStorage::new(pool);
    seed_if_empty(&store).await?;

    tracing::info!("Seeding complete");
    Ok(())
}
