use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use tracing::{debug, error, info, trace};

/// Connects to `database_url` and applies every pending migration.
pub async fn init_database(database_url: &str) -> Result<()> {
    trace!("Entering init_database function");
    debug!("Database URL: {}", database_url);

    let db = Database::connect(database_url).await.map_err(|e| {
        error!("Failed to connect to database '{}': {}", database_url, e);
        e
    })?;
    info!("Connected to database");

    let pending = Migrator::get_pending_migrations(&db).await?.len();
    info!("Applying {} pending migration(s)", pending);

    Migrator::up(&db, None).await.map_err(|e| {
        error!("Failed to run database migrations: {}", e);
        e
    })?;

    info!("Database initialization completed successfully");
    Ok(())
}
